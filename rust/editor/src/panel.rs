// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Side-panel rows: annotation list and point coordinate fields
//!
//! Coordinates are shown divided by a display scale and stored multiplied by
//! it, so the panel can present image pixels in a physical unit.

use plan3d_core::{AnnotationKind, Point2D};

/// Coordinate axis of a point field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn get(self, point: &Point2D) -> f64 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
        }
    }

    pub fn set(self, point: &mut Point2D, value: f64) {
        match self {
            Axis::X => point.x = value,
            Axis::Y => point.y = value,
        }
    }
}

/// One point of the active annotation as shown in the panel
#[derive(Debug, Clone, PartialEq)]
pub struct PointRow {
    pub index: usize,
    pub label: String,
    pub x: String,
    pub y: String,
    pub selected: bool,
}

impl PointRow {
    pub fn new(index: usize, point: &Point2D, scale: f64, selected: bool) -> Self {
        Self {
            index,
            label: format!("Point {}", index + 1),
            x: format_coordinate(point.x, scale),
            y: format_coordinate(point.y, scale),
            selected,
        }
    }
}

/// Stored value as displayed, two decimals
pub fn format_coordinate(value: f64, scale: f64) -> String {
    format!("{:.2}", value / scale)
}

/// List label of an annotation, e.g. `Polygon 2`
pub fn entry_label(kind: AnnotationKind, index: usize) -> String {
    format!("{} {}", kind.label(), index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_unscale() {
        let row = PointRow::new(0, &Point2D::new(25.0, 10.0), 2.0, true);
        assert_eq!(row.label, "Point 1");
        assert_eq!(row.x, "12.50");
        assert_eq!(row.y, "5.00");
        assert!(row.selected);
    }

    #[test]
    fn test_entry_labels() {
        assert_eq!(entry_label(AnnotationKind::Wall, 0), "Polygon 1");
        assert_eq!(entry_label(AnnotationKind::Window, 2), "Line 3");
    }

    #[test]
    fn test_axis_set() {
        let mut p = Point2D::new(1.0, 2.0);
        Axis::Y.set(&mut p, 7.0);
        assert_eq!(p, Point2D::new(1.0, 7.0));
        assert_eq!(Axis::X.get(&p), 1.0);
    }
}
