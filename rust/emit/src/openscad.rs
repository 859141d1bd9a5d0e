// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OpenSCAD generators
//!
//! Walls come out as one centred cube per outline edge, with the same
//! midpoint, length and angle the mesh kernel uses for its wall boxes.

use crate::format::{comment_text, dq_str, Num};
use plan3d_core::{section_spans, ConvertedApartment, Section};
use plan3d_geometry::wall_edges;

/// Fragment count of every bottle cylinder
pub const CYLINDER_FRAGMENTS: u32 = 100;

/// `module apartment()` for a converted apartment model
pub fn apartment_scad(model: &ConvertedApartment) -> String {
    let wall_height = model.details.height;
    let wall_thickness = model.details.wall_thickness;

    let mut code = String::new();
    code.push_str("// Advanced Apartment Model\n");
    code.push_str(&format!("// Units: {}\n\n", model.source_unit()));
    code.push_str("module apartment() {\n");

    code.push_str("  // Floor\n");
    code.push_str("  color(\"LightGray\")\n");
    code.push_str("    linear_extrude(height = 1)\n");
    code.push_str("      hull() {\n");
    for p in model.rooms.iter().filter_map(|r| r.points.as_deref()).flatten() {
        code.push_str(&format!(
            "        translate([{}, {}]) circle(r=0.1);\n",
            Num(p.x),
            Num(p.y)
        ));
    }
    code.push_str("      }\n\n");

    code.push_str("  // Walls\n");
    for (i, room) in model.rooms.iter().enumerate() {
        let Some(outline) = room.wall_loop() else {
            continue;
        };
        code.push_str(&format!("  // Room {}: {}\n", i + 1, comment_text(&room.name)));
        code.push_str(&format!("  color({}) {{\n", dq_str(&room.wall_color)));
        for edge in wall_edges(outline) {
            code.push_str(&format!(
                "    translate([{}, {}, {}])\n",
                Num(edge.midpoint.x),
                Num(edge.midpoint.y),
                Num(wall_height / 2.0)
            ));
            code.push_str(&format!("      rotate([0, 0, {}])\n", Num(edge.angle_deg())));
            code.push_str(&format!(
                "        cube([{}, {}, {}], center = true);\n",
                Num(edge.length),
                Num(wall_thickness),
                Num(wall_height)
            ));
        }
        code.push_str("  }\n\n");
    }

    code.push_str("  // Windows\n");
    for window in &model.windows {
        code.push_str("  color(\"SkyBlue\", 0.7)\n");
        code.push_str(&format!(
            "    translate([{}, {}, {}])\n",
            Num(window.position_x),
            Num(window.position_z),
            Num(window.position_y + window.height / 2.0)
        ));
        code.push_str(&format!("      rotate([0, 0, {}])\n", Num(window.rotation)));
        code.push_str(&format!(
            "        cube([{}, {}, {}], center = true);\n",
            Num(window.width),
            Num(wall_thickness * 2.0),
            Num(window.height)
        ));
    }

    code.push_str("  // Doors\n");
    for door in &model.doors {
        code.push_str(&format!("  color({})\n", dq_str(&door.color)));
        code.push_str(&format!(
            "    translate([{}, {}, {}])\n",
            Num(door.position_x),
            Num(door.position_z),
            Num(door.position_y + door.height / 2.0)
        ));
        code.push_str(&format!("      rotate([0, 0, {}])\n", Num(door.rotation)));
        code.push_str(&format!(
            "        cube([{}, {}, {}], center = true);\n",
            Num(door.width),
            Num(door.thickness),
            Num(door.height)
        ));
    }

    code.push_str("}\n\n");
    code.push_str("apartment();\n");
    code
}

/// `module bottle()`: one tapered cylinder per section, stacked
pub fn bottle_scad(sections: &[Section]) -> String {
    let blocks: Vec<String> = sections
        .iter()
        .zip(section_spans(sections))
        .map(|(section, span)| {
            format!(
                "  // {}\n  translate([0, 0, {}])\n    cylinder(h={}, d1={}, d2={}, $fn={});\n",
                comment_text(&section.name),
                Num(span.base_height),
                Num(span.height),
                Num(span.start_radius * 2.0),
                Num(span.end_radius * 2.0),
                CYLINDER_FRAGMENTS
            )
        })
        .collect();

    format!("module bottle() {{\n{}}}\n\nbottle();\n", blocks.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan3d_core::{
        default_sections, Annotation, AnnotationKind, AnnotationSet, ApartmentDetails,
        ApartmentModel, LengthUnit, Point2D,
    };

    fn model() -> ConvertedApartment {
        let mut set = AnnotationSet::new();
        set.push(
            AnnotationKind::Wall,
            Annotation::new(vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(300.0, 0.0),
                Point2D::new(300.0, 400.0),
            ]),
        );
        set.push(
            AnnotationKind::Window,
            Annotation::new(vec![Point2D::new(100.0, 0.0), Point2D::new(200.0, 0.0)]),
        );
        let details = ApartmentDetails {
            unit: LengthUnit::Cm,
            ..ApartmentDetails::default()
        };
        ApartmentModel::from_annotations(details, &set)
            .converted()
            .unwrap()
    }

    #[test]
    fn test_wall_cubes_follow_edges() {
        let code = apartment_scad(&model());
        assert!(code.starts_with("// Advanced Apartment Model\n// Units: cm\n\nmodule apartment() {\n"));
        assert!(code.contains("  // Room 1: Room 1\n  color(\"#FFFFFF\") {\n"));
        // Hypotenuse from (300, 400) back to the origin
        assert!(code.contains("    translate([150, 200, 50])\n"));
        assert!(code.contains("        cube([500, 8, 100], center = true);\n"));
        assert!(code.ends_with("}\n\napartment();\n"));
    }

    #[test]
    fn test_window_block() {
        let code = apartment_scad(&model());
        assert!(code.contains(
            "  color(\"SkyBlue\", 0.7)\n    translate([150, 0, 50])\n      rotate([0, 0, 0])\n        cube([100, 16, 40], center = true);\n"
        ));
        assert!(code.contains("  // Doors\n}\n"));
    }

    #[test]
    fn test_bottle_module() {
        let code = bottle_scad(&default_sections());
        let expected = "module bottle() {\n\
            \x20 // Bottom\n\
            \x20 translate([0, 0, 0])\n\
            \x20   cylinder(h=40, d1=50, d2=40, $fn=100);\n\
            \n\
            \x20 // Middle\n\
            \x20 translate([0, 0, 40])\n\
            \x20   cylinder(h=80, d1=40, d2=20, $fn=100);\n\
            \n\
            \x20 // Top\n\
            \x20 translate([0, 0, 120])\n\
            \x20   cylinder(h=30, d1=20, d2=16, $fn=100);\n\
            }\n\nbottle();\n";
        assert_eq!(code, expected);
    }
}
