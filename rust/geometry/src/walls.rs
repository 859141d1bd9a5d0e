// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall synthesis strategies
//!
//! Plain wall annotations render as one solid slab: the bounding rectangle
//! of every wall point, extruded to wall height with each closed wall loop
//! cut out. Room records render instead as one box per outline edge.

use crate::extrusion::extrude_with_holes;
use crate::mesh::Mesh;
use crate::primitives::wall_segments_for_loop;
use plan3d_core::{PlanBounds, Point2D};

/// How wall loops become meshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSynthesisStrategy {
    /// One slab over the outer hull with every loop punched through
    HullWithHoles,
    /// One box per loop edge
    PerEdgeBoxes,
}

impl WallSynthesisStrategy {
    /// Build wall meshes for `loops`
    ///
    /// `HullWithHoles` returns at most one mesh and ignores `wall_thickness`.
    pub fn synthesize(self, loops: &[&[Point2D]], wall_height: f64, wall_thickness: f64) -> Vec<Mesh> {
        match self {
            Self::HullWithHoles => {
                let mesh = hull_with_holes(loops, wall_height);
                if mesh.is_empty() {
                    Vec::new()
                } else {
                    vec![mesh]
                }
            }
            Self::PerEdgeBoxes => loops
                .iter()
                .filter(|pts| pts.len() > 2)
                .flat_map(|pts| wall_segments_for_loop(pts, wall_height, wall_thickness))
                .collect(),
        }
    }
}

/// Slab over the bounding rectangle of every point in `loops`, with each
/// loop of more than two points cut out
pub fn hull_with_holes(loops: &[&[Point2D]], height: f64) -> Mesh {
    let Some(bounds) = PlanBounds::from_points(loops.iter().flat_map(|pts| pts.iter())) else {
        return Mesh::new();
    };
    extrude_with_holes(&bounds.corners(), loops, height)
}
