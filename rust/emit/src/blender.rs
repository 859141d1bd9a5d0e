// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Blender Python generators
//!
//! The apartment script carries its data as Python literals after a fixed
//! prelude of helper functions. Every physical quantity is multiplied by
//! [`BLENDER_SCALE`] so centimetres become Blender metres.

use crate::format::{dq_str, points_literal, py_str, Num};
use plan3d_core::{ConvertedApartment, Section};

/// Centimetres to Blender units
pub const BLENDER_SCALE: f64 = 0.01;

const APARTMENT_PRELUDE: &str = r#"import bpy
import bmesh
import math

def clear_scene():
    bpy.ops.object.select_all(action='SELECT')
    bpy.ops.object.delete()

def create_material(name, color):
    material = bpy.data.materials.new(name=name)
    material.use_nodes = True
    material.node_tree.nodes["Principled BSDF"].inputs[0].default_value = (*color, 1)
    return material

def create_floor(room):
    bm = bmesh.new()
    for point in room['points']:
        bm.verts.new((point[0], point[1], 0))
    bm.faces.new(bm.verts)
    mesh = bpy.data.meshes.new(f"{room['name']}_Floor")
    bm.to_mesh(mesh)
    bm.free()
    floor = bpy.data.objects.new(f"{room['name']}_Floor", mesh)
    bpy.context.collection.objects.link(floor)
    return floor

def create_walls(room):
    wall_height = room['height']
    walls = []
    for i in range(len(room['points'])):
        start = room['points'][i]
        end = room['points'][(i + 1) % len(room['points'])]

        wall_length = math.sqrt((end[0] - start[0])**2 + (end[1] - start[1])**2)
        wall_angle = math.atan2(end[1] - start[1], end[0] - start[0])

        bpy.ops.mesh.primitive_cube_add(size=1)
        wall = bpy.context.active_object
        wall.name = f"{room['name']}_Wall_{i}"
        wall.scale = (wall_length, room['wallThickness'], wall_height)
        wall.rotation_euler[2] = wall_angle
        wall.location = ((start[0] + end[0]) / 2, (start[1] + end[1]) / 2, wall_height / 2)

        walls.append(wall)
    return walls

def create_window(window):
    bpy.ops.mesh.primitive_cube_add(size=1)
    window_obj = bpy.context.active_object
    window_obj.name = f"Window_{window['roomId']}"
    window_obj.scale = (window['width'], window['thickness'], window['height'])
    window_obj.rotation_euler[2] = math.radians(window['rotation'])
    window_obj.location = (window['positionX'], window['positionZ'], window['positionY'] + window['height'] / 2)
    return window_obj

def create_door(door):
    bpy.ops.mesh.primitive_cube_add(size=1)
    door_obj = bpy.context.active_object
    door_obj.name = f"Door_{door['roomId']}"
    door_obj.scale = (door['width'], door['thickness'], door['height'])
    door_obj.rotation_euler[2] = math.radians(door['rotation'])
    door_obj.location = (door['positionX'], door['positionZ'], door['positionY'] + door['height'] / 2)
    return door_obj

def generate_apartment(apartment_details, rooms, windows, doors):
    clear_scene()

    wall_material = create_material("Wall", (0.8, 0.8, 0.8))
    floor_material = create_material("Floor", (0.5, 0.5, 0.5))
    window_material = create_material("Window", (0.9, 0.9, 1))
    door_material = create_material("Door", (0.6, 0.4, 0.2))

    for room in rooms:
        floor = create_floor(room)
        floor.data.materials.append(floor_material)

        walls = create_walls(room)
        for wall in walls:
            wall.data.materials.append(wall_material)

    for window in windows:
        window_obj = create_window(window)
        window_obj.data.materials.append(window_material)

    for door in doors:
        door_obj = create_door(door)
        door_obj.data.materials.append(door_material)

    bpy.ops.object.camera_add(location=(0, -5, 2.5), rotation=(math.radians(80), 0, 0))
    bpy.context.scene.camera = bpy.context.object

    bpy.ops.object.light_add(type='SUN', location=(2.5, 2.5, 5))
    sun = bpy.context.object
    sun.data.energy = 2

"#;

/// Python list of dict literals, one per record
fn dict_list(name: &str, records: Vec<Vec<(&str, String)>>) -> String {
    let mut out = format!("{} = [\n", name);
    let count = records.len();
    for (i, fields) in records.into_iter().enumerate() {
        out.push_str("    {\n");
        let body: Vec<String> = fields
            .into_iter()
            .map(|(key, value)| format!("        '{}': {}", key, value))
            .collect();
        out.push_str(&body.join(",\n"));
        out.push('\n');
        out.push_str(if i + 1 < count { "    },\n" } else { "    }\n" });
    }
    out.push_str("]\n\n");
    out
}

/// Blender script building a converted apartment model
pub fn apartment_py(model: &ConvertedApartment) -> String {
    let s = |v: f64| Num(v * BLENDER_SCALE).to_string();
    let details = &model.details;

    let mut code = String::from(APARTMENT_PRELUDE);

    code.push_str("# Apartment details\n");
    code.push_str("apartment_details = {\n");
    code.push_str(&format!("    'unit': {},\n", py_str(details.unit.as_str())));
    code.push_str(&format!("    'shape': {},\n", py_str(&details.shape)));
    code.push_str(&format!("    'width': {},\n", s(details.width)));
    code.push_str(&format!("    'length': {},\n", s(details.length)));
    code.push_str(&format!("    'height': {},\n", s(details.height)));
    code.push_str(&format!("    'wallThickness': {}\n", s(details.wall_thickness)));
    code.push_str("}\n\n");

    let rooms = model
        .rooms
        .iter()
        .map(|room| {
            vec![
                ("name", py_str(&room.name)),
                ("width", s(room.width)),
                ("length", s(room.length)),
                ("height", s(room.height)),
                ("wallThickness", s(details.wall_thickness)),
                (
                    "points",
                    points_literal(room.points.as_deref().unwrap_or_default(), BLENDER_SCALE),
                ),
            ]
        })
        .collect();
    code.push_str("# Rooms\n");
    code.push_str(&dict_list("rooms", rooms));

    let windows = model
        .windows
        .iter()
        .map(|window| {
            vec![
                ("width", s(window.width)),
                ("height", s(window.height)),
                ("thickness", s(details.wall_thickness * 2.0)),
                ("positionX", s(window.position_x)),
                ("positionY", s(window.position_y)),
                ("positionZ", s(window.position_z)),
                ("rotation", Num(window.rotation).to_string()),
                ("roomId", py_str(&window.room_id)),
            ]
        })
        .collect();
    code.push_str("# Windows\n");
    code.push_str(&dict_list("windows", windows));

    let doors = model
        .doors
        .iter()
        .map(|door| {
            vec![
                ("width", s(door.width)),
                ("height", s(door.height)),
                ("thickness", s(door.thickness)),
                ("positionX", s(door.position_x)),
                ("positionY", s(door.position_y)),
                ("positionZ", s(door.position_z)),
                ("rotation", Num(door.rotation).to_string()),
                ("roomId", py_str(&door.room_id)),
            ]
        })
        .collect();
    code.push_str("# Doors\n");
    code.push_str(&dict_list("doors", doors));

    code.push_str("generate_apartment(apartment_details, rooms, windows, doors)\n");
    code
}

const BOTTLE_BODY: &str = r#"    ]

    vertices = []
    faces = []
    current_height = 0

    for i, section in enumerate(sections):
        radius = section["diameter"] / 2
        next_radius = sections[i+1]["diameter"] / 2 if i < len(sections) - 1 else radius * 0.8

        for angle in range(0, 360, 10):
            x = radius * math.cos(math.radians(angle))
            y = radius * math.sin(math.radians(angle))
            vertices.append((x, y, current_height))

            x = next_radius * math.cos(math.radians(angle))
            y = next_radius * math.sin(math.radians(angle))
            vertices.append((x, y, current_height + section["height"]))

        current_height += section["height"]

    for i in range(0, len(vertices) - 2, 2):
        faces.append((i, i+1, i+3, i+2))

    mesh = bpy.data.meshes.new(name="Bottle")
    mesh.from_pydata(vertices, [], faces)
    mesh.update()

    obj = bpy.data.objects.new("Bottle", mesh)
    bpy.context.collection.objects.link(obj)

create_bottle()
"#;

/// Blender script building the stacked-section solid from ring vertices
pub fn bottle_py(sections: &[Section]) -> String {
    let mut code = String::from("import bpy\nimport math\n\ndef create_bottle():\n    sections = [\n");
    for section in sections {
        code.push_str(&format!(
            "        {{\"name\": {}, \"height\": {}, \"diameter\": {}}},\n",
            dq_str(&section.name),
            Num(section.height),
            Num(section.diameter)
        ));
    }
    code.push_str(BOTTLE_BODY);
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan3d_core::{
        default_sections, Annotation, AnnotationKind, AnnotationSet, ApartmentDetails,
        ApartmentModel, Point2D,
    };

    fn model() -> ConvertedApartment {
        let mut set = AnnotationSet::new();
        set.push(
            AnnotationKind::Wall,
            Annotation::new(vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(200.0, 0.0),
                Point2D::new(200.0, 100.0),
                Point2D::new(0.0, 100.0),
            ]),
        );
        set.push(
            AnnotationKind::Door,
            Annotation::new(vec![Point2D::new(50.0, 0.0), Point2D::new(50.0, 50.0)]),
        );
        ApartmentModel::from_annotations(ApartmentDetails::default(), &set)
            .converted()
            .unwrap()
    }

    #[test]
    fn test_prelude_then_data() {
        let code = apartment_py(&model());
        assert!(code.starts_with("import bpy\nimport bmesh\nimport math\n"));
        assert!(code.contains("    'unit': 'in',\n"));
        assert!(code.contains("        'name': 'Room 1',\n"));
        assert!(code.contains("        'points': [[0,0],[2,0],[2,1],[0,1]]\n    }\n]\n"));
        assert!(code.ends_with("generate_apartment(apartment_details, rooms, windows, doors)\n"));
    }

    #[test]
    fn test_empty_lists() {
        let code = apartment_py(&model());
        assert!(code.contains("# Windows\nwindows = [\n]\n\n"));
    }

    #[test]
    fn test_door_rotation_is_not_scaled() {
        let code = apartment_py(&model());
        assert!(code.contains("        'rotation': 90,\n        'roomId': 'door1'\n"));
    }

    #[test]
    fn test_bottle_sections_literal() {
        let code = bottle_py(&default_sections());
        assert!(code.contains(
            "    sections = [\n        {\"name\": \"Bottom\", \"height\": 40, \"diameter\": 50},\n"
        ));
        assert!(code.ends_with("create_bottle()\n"));
    }
}
