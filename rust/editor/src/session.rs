// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Editing session over one floor record

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::error::{Error, Result, StoreError};
use plan3d_core::{AnnotationSet, Floor};
use tracing::{info, warn};

/// Persistence collaborator that receives the annotations on save
pub trait FloorPlanStore {
    fn save_annotations(
        &mut self,
        floor_id: &str,
        annotations: &AnnotationSet,
    ) -> std::result::Result<(), StoreError>;
}

/// Open editing session
///
/// The floor's annotations are loaded into an [`Editor`] on open. Saving
/// hands them to the store and closes the session; a failed save leaves both
/// the session and the annotations as they were.
#[derive(Debug)]
pub struct EditSession {
    floor: Floor,
    editor: Editor,
    open: bool,
}

impl EditSession {
    pub fn open(floor: Floor) -> Self {
        Self::open_with_config(floor, EditorConfig::default())
    }

    pub fn open_with_config(floor: Floor, config: EditorConfig) -> Self {
        let annotations = floor.annotation_set();
        info!(
            floor = %floor.id,
            legacy = floor.is_legacy(),
            annotations = annotations.len(),
            "editing session opened"
        );
        Self {
            editor: Editor::with_config(annotations, config),
            floor,
            open: true,
        }
    }

    pub fn floor(&self) -> &Floor {
        &self.floor
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Persist the annotations and close the session
    ///
    /// Returns the updated floor record, which always carries the typed
    /// annotation set.
    pub fn save<S: FloorPlanStore + ?Sized>(&mut self, store: &mut S) -> Result<Floor> {
        if !self.open {
            return Err(Error::SessionClosed(self.floor.id.clone()));
        }

        let annotations = self.editor.annotations();
        if let Err(source) = store.save_annotations(&self.floor.id, annotations) {
            warn!(floor = %self.floor.id, error = %source, "save failed");
            return Err(Error::Store {
                floor_id: self.floor.id.clone(),
                source,
            });
        }

        self.floor = self.floor.with_annotations(annotations.clone());
        self.open = false;
        info!(floor = %self.floor.id, "annotations saved");
        Ok(self.floor.clone())
    }

    /// Drop every edit; the floor comes back untouched
    pub fn cancel(self) -> Floor {
        info!(floor = %self.floor.id, "editing session cancelled");
        self.floor
    }
}
