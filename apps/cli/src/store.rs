// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor records kept as JSON files on disk

use plan3d_core::{AnnotationSet, Floor};
use plan3d_editor::{FloorPlanStore, StoreError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Store backed by one floor record file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Floor, StoreError> {
        let json = std::fs::read_to_string(&self.path)?;
        Ok(Floor::from_json(&json)?)
    }
}

impl FloorPlanStore for JsonFileStore {
    fn save_annotations(
        &mut self,
        floor_id: &str,
        annotations: &AnnotationSet,
    ) -> Result<(), StoreError> {
        let floor = self.load()?;
        if floor.id != floor_id {
            return Err(format!(
                "{} holds floor '{}', not '{}'",
                self.path.display(),
                floor.id,
                floor_id
            )
            .into());
        }
        let json = floor.with_annotations(annotations.clone()).to_json_pretty()?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), floor = floor_id, "floor record written");
        Ok(())
    }
}
