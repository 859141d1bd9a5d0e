// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boxes and per-edge wall segments

use crate::extrusion::apply_transform;
use crate::mesh::Mesh;
use nalgebra::{Matrix4, Point3, Vector3};
use plan3d_core::Point2D;

/// Corners of the unit box centred on the origin, per face, with the face
/// normal. Each face is wound counter-clockwise seen from outside.
const UNIT_BOX_FACES: [([[f64; 3]; 4], [f64; 3]); 6] = [
    (
        [[0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5], [0.5, -0.5, 0.5]],
        [1.0, 0.0, 0.0],
    ),
    (
        [[-0.5, 0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5]],
        [-1.0, 0.0, 0.0],
    ),
    (
        [[0.5, 0.5, -0.5], [-0.5, 0.5, -0.5], [-0.5, 0.5, 0.5], [0.5, 0.5, 0.5]],
        [0.0, 1.0, 0.0],
    ),
    (
        [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]],
        [0.0, -1.0, 0.0],
    ),
    (
        [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]],
        [0.0, 0.0, 1.0],
    ),
    (
        [[-0.5, 0.5, -0.5], [0.5, 0.5, -0.5], [0.5, -0.5, -0.5], [-0.5, -0.5, -0.5]],
        [0.0, 0.0, -1.0],
    ),
];

/// Unit box scaled to `size`, rotated by `rotation` radians about the
/// vertical (+Z) axis and centred on `center`
pub fn box_at(center: Point3<f64>, size: Vector3<f64>, rotation: f64) -> Mesh {
    let mut mesh = Mesh::with_capacity(24, 36);

    for (corners, normal) in &UNIT_BOX_FACES {
        let base = mesh.vertex_count() as u32;
        let normal = Vector3::new(normal[0], normal[1], normal[2]);
        for c in corners {
            mesh.add_vertex(Point3::new(c[0], c[1], c[2]), normal);
        }
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }

    let transform = Matrix4::new_translation(&center.coords)
        * Matrix4::new_rotation(Vector3::z() * rotation)
        * Matrix4::new_nonuniform_scaling(&size);
    apply_transform(&mut mesh, &transform);

    mesh
}

/// One edge of a closed wall loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallEdge {
    pub start: Point2D,
    pub end: Point2D,
    pub length: f64,
    /// Radians from +X, as `atan2(dy, dx)`
    pub angle: f64,
    pub midpoint: Point2D,
}

impl WallEdge {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        Self {
            start,
            end,
            length: (dx * dx + dy * dy).sqrt(),
            angle: dy.atan2(dx),
            midpoint: Point2D::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0),
        }
    }

    /// Angle in degrees
    #[inline]
    pub fn angle_deg(&self) -> f64 {
        self.angle * 180.0 / std::f64::consts::PI
    }
}

/// Every edge of the implicitly closed loop, wrap-around edge last
pub fn wall_edges(points: &[Point2D]) -> Vec<WallEdge> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    (0..n)
        .map(|i| WallEdge::new(points[i], points[(i + 1) % n]))
        .collect()
}

/// One box per loop edge, standing on the floor
pub fn wall_segments_for_loop(points: &[Point2D], wall_height: f64, wall_thickness: f64) -> Vec<Mesh> {
    wall_edges(points)
        .iter()
        .map(|edge| {
            box_at(
                Point3::new(edge.midpoint.x, edge.midpoint.y, wall_height / 2.0),
                Vector3::new(edge.length, wall_thickness, wall_height),
                edge.angle,
            )
        })
        .collect()
}
