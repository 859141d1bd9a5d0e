// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted floor records
//!
//! Older records store their outlines as a flat `data` list of point loops.
//! Newer ones carry a typed `annotations` set. The typed set wins whenever it
//! is present; a record without one is migrated by treating every loop in
//! `data` as a wall. Saving always writes the typed set and drops `data`.

use crate::annotation::AnnotationSet;
use crate::error::Result;
use crate::point::Point2D;
use serde::{Deserialize, Serialize};

/// A floor as exchanged with the floor-plan store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Background image reference
    #[serde(default)]
    pub picture: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<AnnotationSet>,
    /// Legacy flat list of wall loops
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<Vec<Point2D>>,
}

impl Floor {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether this record still needs migrating to the typed set
    pub fn is_legacy(&self) -> bool {
        self.annotations.is_none() && !self.data.is_empty()
    }

    /// The annotation set an editing session should open with
    pub fn annotation_set(&self) -> AnnotationSet {
        match &self.annotations {
            Some(set) => set.clone(),
            None => AnnotationSet::from_legacy(self.data.clone()),
        }
    }

    /// Copy of this record carrying `set` as its only annotation data
    pub fn with_annotations(&self, set: AnnotationSet) -> Self {
        Self {
            annotations: Some(set),
            data: Vec::new(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_data_migrates_to_walls() {
        let floor = Floor::from_json(
            r#"{"id":"f1","name":"Ground","picture":"plan.png","data":[[[0,0],[10,0],[10,10]]]}"#,
        )
        .unwrap();
        assert!(floor.is_legacy());

        let set = floor.annotation_set();
        assert_eq!(set.walls.len(), 1);
        assert_eq!(set.walls[0].points[1], Point2D::new(10.0, 0.0));
        assert!(set.doors.is_empty());
    }

    #[test]
    fn test_typed_set_takes_precedence() {
        let floor = Floor::from_json(
            r#"{"id":"f1","data":[[[0,0],[1,0],[1,1]]],"annotations":{"walls":[],"doors":[[[0,0],[5,0]]]}}"#,
        )
        .unwrap();
        assert!(!floor.is_legacy());

        let set = floor.annotation_set();
        assert!(set.walls.is_empty());
        assert_eq!(set.doors.len(), 1);
    }

    #[test]
    fn test_with_annotations_drops_legacy_data() {
        let floor = Floor {
            id: "f1".into(),
            data: vec![vec![Point2D::new(0.0, 0.0)]],
            ..Floor::default()
        };
        let saved = floor.with_annotations(floor.annotation_set());
        assert!(saved.data.is_empty());
        assert!(saved.annotations.is_some());

        let json = saved.to_json_pretty().unwrap();
        assert!(!json.contains("\"data\""));
    }
}
