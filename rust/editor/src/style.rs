// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-kind drawing styles for the annotation overlay

use plan3d_core::AnnotationKind;
use std::fmt;

/// Stroke width of door and window segments
pub const LINE_STROKE_WIDTH: f64 = 4.0;
/// Stroke width of wall polygons
pub const POLYGON_STROKE_WIDTH: f64 = 2.0;
/// Opacity of wall polygons
pub const POLYGON_OPACITY: f64 = 0.6;
/// Alpha of the polygon fill
pub const FILL_ALPHA: u8 = 0x33;

/// Handle fill for every point of the active annotation
pub const HANDLE_FILL: &str = "white";
/// Handle fill for the selected point
pub const HANDLE_ACTIVE_FILL: &str = "yellow";
pub const HANDLE_STROKE: &str = "black";

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WALL: Rgb = Rgb(98, 130, 255);
    pub const DOOR: Rgb = Rgb(139, 69, 19);
    pub const WINDOW: Rgb = Rgb(135, 206, 235);

    /// `#rrggbbaa`
    pub fn hex_with_alpha(self, alpha: u8) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.0, self.1, self.2, alpha)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

/// How one annotation is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub stroke: Rgb,
    pub stroke_width: f64,
    /// Alpha of the fill; segments have none
    pub fill_alpha: Option<u8>,
    pub opacity: f64,
}

impl ShapeStyle {
    pub fn fill(&self) -> Option<String> {
        self.fill_alpha.map(|a| self.stroke.hex_with_alpha(a))
    }
}

/// Maps an annotation kind to its style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTable {
    pub wall: Rgb,
    pub door: Rgb,
    pub window: Rgb,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            wall: Rgb::WALL,
            door: Rgb::DOOR,
            window: Rgb::WINDOW,
        }
    }
}

impl StyleTable {
    /// Table with a caller-chosen wall colour
    pub fn with_wall_color(wall: Rgb) -> Self {
        Self {
            wall,
            ..Self::default()
        }
    }

    pub fn color(&self, kind: AnnotationKind) -> Rgb {
        match kind {
            AnnotationKind::Wall => self.wall,
            AnnotationKind::Door => self.door,
            AnnotationKind::Window => self.window,
        }
    }

    pub fn style(&self, kind: AnnotationKind) -> ShapeStyle {
        let stroke = self.color(kind);
        if kind.is_polygon() {
            ShapeStyle {
                stroke,
                stroke_width: POLYGON_STROKE_WIDTH,
                fill_alpha: Some(FILL_ALPHA),
                opacity: POLYGON_OPACITY,
            }
        } else {
            ShapeStyle {
                stroke,
                stroke_width: LINE_STROKE_WIDTH,
                fill_alpha: None,
                opacity: 1.0,
            }
        }
    }

    pub fn handle_fill(selected: bool) -> &'static str {
        if selected {
            HANDLE_ACTIVE_FILL
        } else {
            HANDLE_FILL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openings_have_fixed_colors() {
        let table = StyleTable::with_wall_color(Rgb(1, 2, 3));
        assert_eq!(table.style(AnnotationKind::Door).stroke.to_string(), "rgb(139, 69, 19)");
        assert_eq!(table.style(AnnotationKind::Window).stroke, Rgb::WINDOW);
        assert_eq!(table.style(AnnotationKind::Wall).stroke, Rgb(1, 2, 3));
    }

    #[test]
    fn test_polygon_fill() {
        let style = StyleTable::default().style(AnnotationKind::Wall);
        assert_eq!(style.fill().as_deref(), Some("#6282ff33"));
        assert_eq!(style.stroke_width, 2.0);
        assert_eq!(style.opacity, 0.6);

        let line = StyleTable::default().style(AnnotationKind::Door);
        assert_eq!(line.fill(), None);
        assert_eq!(line.stroke_width, 4.0);
    }
}
