// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pure scene synthesis
//!
//! Turns model data into an immutable list of meshes keyed by semantic id.
//! Nothing here touches a render surface.

use crate::config::ViewerConfig;
use crate::keys::SceneNodeId;
use plan3d_core::{
    AnnotationSet, ConvertedApartment, DoorSpec, PlanBounds, Point2D, Section, WindowSpec,
};
use plan3d_geometry::{
    box_at, fit_camera_with_margin, plan_overview, revolve_profile, Aabb, CameraFit, Mesh,
    Point3, Vector3, WallSynthesisStrategy,
};

/// Flat colour and opacity of a scene node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneMaterial {
    pub color: [f32; 3],
    pub opacity: f32,
}

impl SceneMaterial {
    pub const WALL: SceneMaterial = SceneMaterial {
        color: [0.8, 0.8, 0.8],
        opacity: 1.0,
    };
    pub const WINDOW: SceneMaterial = SceneMaterial {
        color: [0.53, 0.81, 0.92],
        opacity: 0.7,
    };
    pub const DOOR: SceneMaterial = SceneMaterial {
        color: [0.55, 0.27, 0.07],
        opacity: 1.0,
    };
    pub const SOLID: SceneMaterial = SceneMaterial {
        color: [0.4, 0.6, 0.9],
        opacity: 1.0,
    };
}

/// Data a viewer can show
#[derive(Debug, Clone, PartialEq)]
pub enum SceneInput {
    /// Annotated plan in image pixels: one wall slab plus opening boxes
    Annotations {
        annotations: AnnotationSet,
        wall_height: f64,
        wall_thickness: f64,
    },
    /// Apartment records in centimetres: per-edge room walls plus openings
    Apartment(ConvertedApartment),
    /// Stacked sections revolved into a solid
    Sections(Vec<Section>),
}

/// One mesh of a synthesized scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: SceneNodeId,
    pub mesh: Mesh,
    pub material: SceneMaterial,
}

/// Immutable result of synthesis, in scene units
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    /// Camera suited to this kind of scene, when it has any geometry
    pub camera: Option<CameraFit>,
}

impl Scene {
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_meshes(self.nodes.iter().map(|n| &n.mesh))
    }

    pub fn get(&self, id: SceneNodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Build the scene for `input`
pub fn synthesize(input: &SceneInput, config: &ViewerConfig) -> Scene {
    let mut nodes = match input {
        SceneInput::Annotations {
            annotations,
            wall_height,
            wall_thickness,
        } => annotation_nodes(annotations, *wall_height, *wall_thickness),
        SceneInput::Apartment(model) => apartment_nodes(model),
        SceneInput::Sections(sections) => {
            let mesh = revolve_profile(sections);
            if mesh.is_empty() {
                Vec::new()
            } else {
                vec![SceneNode {
                    id: SceneNodeId::Sections,
                    mesh,
                    material: SceneMaterial::SOLID,
                }]
            }
        }
    };

    for node in &mut nodes {
        node.mesh.scale(config.scene_scale);
    }

    let bounds = Aabb::from_meshes(nodes.iter().map(|n| &n.mesh));
    let camera = match input {
        SceneInput::Apartment(model) => room_bounds(model)
            .map(|b| plan_overview(&b, model.details.height, config.scene_scale)),
        _ => None,
    }
    .or_else(|| {
        bounds.map(|b| fit_camera_with_margin(&b, config.field_of_view_deg, config.fit_margin))
    });

    Scene { nodes, camera }
}

fn annotation_nodes(set: &AnnotationSet, wall_height: f64, wall_thickness: f64) -> Vec<SceneNode> {
    let loops: Vec<&[Point2D]> = set.wall_loops().collect();
    let mut nodes: Vec<SceneNode> = WallSynthesisStrategy::HullWithHoles
        .synthesize(&loops, wall_height, wall_thickness)
        .into_iter()
        .map(|mesh| SceneNode {
            id: SceneNodeId::Walls,
            mesh,
            material: SceneMaterial::WALL,
        })
        .collect();

    for (i, annotation) in set.windows.iter().enumerate() {
        if let [a, b, ..] = annotation.points.as_slice() {
            let spec = WindowSpec::from_segment(i, *a, *b, wall_height);
            nodes.push(SceneNode {
                id: SceneNodeId::Window(i),
                mesh: window_box(&spec, wall_thickness),
                material: SceneMaterial::WINDOW,
            });
        }
    }
    for (i, annotation) in set.doors.iter().enumerate() {
        if let [a, b, ..] = annotation.points.as_slice() {
            let spec = DoorSpec::from_segment(i, *a, *b, wall_height, wall_thickness);
            nodes.push(SceneNode {
                id: SceneNodeId::Door(i),
                mesh: door_box(&spec),
                material: SceneMaterial::DOOR,
            });
        }
    }
    nodes
}

fn apartment_nodes(model: &ConvertedApartment) -> Vec<SceneNode> {
    let height = model.details.height;
    let thickness = model.details.wall_thickness;
    let mut nodes = Vec::new();

    for (i, room) in model.rooms.iter().enumerate() {
        let Some(outline) = room.wall_loop() else {
            continue;
        };
        let mut mesh = Mesh::new();
        let walls = WallSynthesisStrategy::PerEdgeBoxes.synthesize(&[outline], height, thickness);
        mesh.merge_all(&walls);
        nodes.push(SceneNode {
            id: SceneNodeId::Room(i),
            mesh,
            material: SceneMaterial::WALL,
        });
    }
    for (i, window) in model.windows.iter().enumerate() {
        nodes.push(SceneNode {
            id: SceneNodeId::Window(i),
            mesh: window_box(window, thickness),
            material: SceneMaterial::WINDOW,
        });
    }
    for (i, door) in model.doors.iter().enumerate() {
        nodes.push(SceneNode {
            id: SceneNodeId::Door(i),
            mesh: door_box(door),
            material: SceneMaterial::DOOR,
        });
    }
    nodes
}

/// Window pane standing in its wall, twice the wall thickness deep
pub fn window_box(window: &WindowSpec, wall_thickness: f64) -> Mesh {
    box_at(
        Point3::new(
            window.position_x,
            window.position_z,
            window.position_y + window.height / 2.0,
        ),
        Vector3::new(window.width, wall_thickness * 2.0, window.height),
        window.rotation.to_radians(),
    )
}

pub fn door_box(door: &DoorSpec) -> Mesh {
    box_at(
        Point3::new(
            door.position_x,
            door.position_z,
            door.position_y + door.height / 2.0,
        ),
        Vector3::new(door.width, door.thickness, door.height),
        door.rotation.to_radians(),
    )
}

fn room_bounds(model: &ConvertedApartment) -> Option<PlanBounds> {
    PlanBounds::from_points(model.rooms.iter().filter_map(|r| r.wall_loop()).flatten())
}
