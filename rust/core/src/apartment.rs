// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Apartment parameter records
//!
//! Records carry physical placement and cosmetic fields. Cosmetic fields pass
//! through geometry and emitters unchanged; numeric fields are lengths in the
//! apartment's unit unless listed in [`crate::units::DIMENSIONLESS_FIELDS`].

use crate::annotation::{Annotation, AnnotationSet};
use crate::error::Result;
use crate::point::Point2D;
use crate::units::{convert_record, LengthUnit};
use serde::{Deserialize, Serialize};

/// Window height as a fraction of the wall height
const WINDOW_HEIGHT_RATIO: f64 = 0.4;
/// Window sill height as a fraction of the wall height
const WINDOW_SILL_RATIO: f64 = 0.3;
/// Door height as a fraction of the wall height
const DOOR_HEIGHT_RATIO: f64 = 0.8;

/// Apartment-wide dimensions and finishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApartmentDetails {
    pub unit: LengthUnit,
    pub shape: String,
    pub width: f64,
    pub length: f64,
    pub height: f64,
    pub floors: u32,
    pub wall_thickness: f64,
    pub foundation_depth: f64,
    pub exterior_finish: String,
    pub insulation_type: String,
    pub insulation_thickness: f64,
}

impl Default for ApartmentDetails {
    fn default() -> Self {
        Self {
            unit: LengthUnit::In,
            shape: "rectangle".into(),
            width: 200.0,
            length: 160.0,
            height: 100.0,
            floors: 1,
            wall_thickness: 8.0,
            foundation_depth: 40.0,
            exterior_finish: "paint".into(),
            insulation_type: "fiberglass".into(),
            insulation_thickness: 4.0,
        }
    }
}

/// One room, usually derived from a wall polygon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub name: String,
    pub width: f64,
    pub length: f64,
    pub height: f64,
    pub floor_level: u32,
    pub flooring_type: String,
    pub flooring_thickness: f64,
    pub wall_color: String,
    pub has_ceiling_moulding: bool,
    pub has_baseboards: bool,
    pub window_trim: String,
    pub door_trim: String,
    pub position_x: f64,
    pub position_y: f64,
    pub position_z: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point2D>>,
}

impl Room {
    /// Room for the `index`-th wall polygon, sized by its bounding box
    ///
    /// Returns `None` for an annotation with no points.
    pub fn from_outline(index: usize, outline: &Annotation, height: f64) -> Option<Self> {
        let bounds = outline.bounds()?;
        Some(Self {
            name: format!("Room {}", index + 1),
            width: bounds.width(),
            length: bounds.length(),
            height,
            floor_level: 1,
            flooring_type: "wood".into(),
            flooring_thickness: 0.75,
            wall_color: "#FFFFFF".into(),
            has_ceiling_moulding: false,
            has_baseboards: true,
            window_trim: "standard".into(),
            door_trim: "standard".into(),
            position_x: bounds.min_x,
            position_y: 0.0,
            position_z: bounds.min_y,
            points: Some(outline.points.clone()),
        })
    }

    /// Outline as a closed loop, when it has more than two points
    pub fn wall_loop(&self) -> Option<&[Point2D]> {
        self.points.as_deref().filter(|pts| pts.len() > 2)
    }
}

/// A window opening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSpec {
    pub width: f64,
    pub height: f64,
    pub sill_height: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub glazing_layers: u32,
    pub frame_color: String,
    pub has_screen: bool,
    pub has_curtains: bool,
    pub curtain_color: String,
    pub room_id: String,
    pub wall_position: String,
    pub position_x: f64,
    pub position_y: f64,
    pub position_z: f64,
    /// Degrees about the vertical axis
    #[serde(default)]
    pub rotation: f64,
}

impl WindowSpec {
    /// Window spanning the segment `a`-`b` in a wall of `wall_height`
    pub fn from_segment(index: usize, a: Point2D, b: Point2D, wall_height: f64) -> Self {
        let mid = a.midpoint(&b);
        Self {
            width: a.distance_to(&b),
            height: wall_height * WINDOW_HEIGHT_RATIO,
            sill_height: wall_height * WINDOW_SILL_RATIO,
            kind: "casement".into(),
            glazing_layers: 2,
            frame_color: "#FFFFFF".into(),
            has_screen: false,
            has_curtains: false,
            curtain_color: "#FFFFFF".into(),
            room_id: format!("window{}", index + 1),
            wall_position: "auto".into(),
            position_x: mid.x,
            position_y: wall_height * WINDOW_SILL_RATIO,
            position_z: mid.y,
            rotation: segment_angle_deg(a, b),
        }
    }
}

/// A door opening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorSpec {
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub material: String,
    pub color: String,
    pub has_glass: bool,
    pub glass_type: String,
    pub handle_type: String,
    pub handle_finish: String,
    pub room_id: String,
    pub wall_position: String,
    pub swing_direction: String,
    pub position_x: f64,
    pub position_y: f64,
    pub position_z: f64,
    /// Degrees about the vertical axis
    #[serde(default)]
    pub rotation: f64,
}

impl DoorSpec {
    /// Door spanning the segment `a`-`b` in a wall of the given size
    pub fn from_segment(
        index: usize,
        a: Point2D,
        b: Point2D,
        wall_height: f64,
        wall_thickness: f64,
    ) -> Self {
        let mid = a.midpoint(&b);
        Self {
            width: a.distance_to(&b),
            height: wall_height * DOOR_HEIGHT_RATIO,
            thickness: wall_thickness,
            kind: "hinged".into(),
            material: "wood".into(),
            color: "SaddleBrown".into(),
            has_glass: false,
            glass_type: "none".into(),
            handle_type: "lever".into(),
            handle_finish: "brass".into(),
            room_id: format!("door{}", index + 1),
            wall_position: "auto".into(),
            swing_direction: "inward".into(),
            position_x: mid.x,
            position_y: 0.0,
            position_z: mid.y,
            rotation: segment_angle_deg(a, b),
        }
    }
}

fn segment_angle_deg(a: Point2D, b: Point2D) -> f64 {
    (b.y - a.y).atan2(b.x - a.x).to_degrees()
}

/// Everything the apartment generators consume
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApartmentModel {
    pub details: ApartmentDetails,
    pub rooms: Vec<Room>,
    pub windows: Vec<WindowSpec>,
    pub doors: Vec<DoorSpec>,
}

impl ApartmentModel {
    /// Derive rooms and openings from an annotation set
    ///
    /// Every wall annotation becomes a room; door and window segments become
    /// openings sized from the apartment's wall dimensions. Segments with
    /// fewer than two points are skipped.
    pub fn from_annotations(details: ApartmentDetails, set: &AnnotationSet) -> Self {
        let rooms = set
            .walls
            .iter()
            .enumerate()
            .filter_map(|(i, outline)| Room::from_outline(i, outline, details.height))
            .collect();

        let windows = set
            .windows
            .iter()
            .filter_map(segment)
            .enumerate()
            .map(|(i, (a, b))| WindowSpec::from_segment(i, a, b, details.height))
            .collect();

        let doors = set
            .doors
            .iter()
            .filter_map(segment)
            .enumerate()
            .map(|(i, (a, b))| {
                DoorSpec::from_segment(i, a, b, details.height, details.wall_thickness)
            })
            .collect();

        Self {
            details,
            rooms,
            windows,
            doors,
        }
    }

    /// Copy of the model with every record converted to centimetres
    pub fn converted(&self) -> Result<ConvertedApartment> {
        let unit = self.details.unit;
        Ok(ConvertedApartment(Self {
            details: convert_record(&self.details, unit)?,
            rooms: self
                .rooms
                .iter()
                .map(|r| convert_record(r, unit))
                .collect::<Result<_>>()?,
            windows: self
                .windows
                .iter()
                .map(|w| convert_record(w, unit))
                .collect::<Result<_>>()?,
            doors: self
                .doors
                .iter()
                .map(|d| convert_record(d, unit))
                .collect::<Result<_>>()?,
        }))
    }
}

/// An [`ApartmentModel`] with every length field in centimetres
///
/// Only [`ApartmentModel::converted`] makes one, so generators that take it
/// never see raw values. `details.unit` still names the unit the record was
/// entered in.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedApartment(ApartmentModel);

impl ConvertedApartment {
    pub fn source_unit(&self) -> LengthUnit {
        self.0.details.unit
    }

    pub fn into_inner(self) -> ApartmentModel {
        self.0
    }
}

impl std::ops::Deref for ConvertedApartment {
    type Target = ApartmentModel;

    fn deref(&self) -> &ApartmentModel {
        &self.0
    }
}

fn segment(annotation: &Annotation) -> Option<(Point2D, Point2D)> {
    match annotation.points.as_slice() {
        [a, b, ..] => Some((*a, *b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationKind;
    use approx::assert_relative_eq;

    fn plan() -> AnnotationSet {
        let mut set = AnnotationSet::new();
        set.push(
            AnnotationKind::Wall,
            Annotation::new(vec![
                Point2D::new(10.0, 20.0),
                Point2D::new(110.0, 20.0),
                Point2D::new(110.0, 70.0),
                Point2D::new(10.0, 70.0),
            ]),
        );
        set.push(
            AnnotationKind::Door,
            Annotation::new(vec![Point2D::new(40.0, 20.0), Point2D::new(60.0, 20.0)]),
        );
        set
    }

    #[test]
    fn test_rooms_from_walls() {
        let model = ApartmentModel::from_annotations(ApartmentDetails::default(), &plan());
        assert_eq!(model.rooms.len(), 1);

        let room = &model.rooms[0];
        assert_eq!(room.name, "Room 1");
        assert_relative_eq!(room.width, 100.0);
        assert_relative_eq!(room.length, 50.0);
        assert_relative_eq!(room.height, 100.0);
        assert_relative_eq!(room.position_x, 10.0);
        assert_relative_eq!(room.position_z, 20.0);
        assert_eq!(room.wall_color, "#FFFFFF");
        assert!(room.has_baseboards);
    }

    #[test]
    fn test_door_from_segment() {
        let model = ApartmentModel::from_annotations(ApartmentDetails::default(), &plan());
        let door = &model.doors[0];
        assert_relative_eq!(door.width, 20.0);
        assert_relative_eq!(door.position_x, 50.0);
        assert_relative_eq!(door.position_z, 20.0);
        assert_relative_eq!(door.thickness, 8.0);
        assert_relative_eq!(door.rotation, 0.0);
    }

    #[test]
    fn test_converted_keeps_points_and_counts() {
        let model = ApartmentModel::from_annotations(ApartmentDetails::default(), &plan());
        let converted = model.converted().unwrap();

        assert_relative_eq!(converted.details.height, 254.0, epsilon = 1e-9);
        assert_eq!(converted.details.floors, 1);
        assert_eq!(converted.details.unit, LengthUnit::In);
        assert_relative_eq!(converted.rooms[0].width, 254.0, epsilon = 1e-9);
        assert_eq!(converted.rooms[0].points, model.rooms[0].points);
        assert_eq!(converted.rooms[0].floor_level, 1);
    }

    #[test]
    fn test_details_camel_case() {
        let json = serde_json::to_value(ApartmentDetails::default()).unwrap();
        assert_eq!(json["wallThickness"], 8.0);
        assert_eq!(json["unit"], "in");

        let partial: ApartmentDetails =
            serde_json::from_str(r#"{"unit":"cm","height":250}"#).unwrap();
        assert_eq!(partial.unit, LengthUnit::Cm);
        assert_relative_eq!(partial.height, 250.0);
        assert_relative_eq!(partial.width, 200.0);
    }
}
