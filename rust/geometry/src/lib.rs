// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan3D Geometry Kernel
//!
//! Pure mesh synthesis for floor plans and lathe solids using earcutr
//! triangulation and nalgebra for transformations. The kernel frame is Z up;
//! plan `(x, y)` lies on the floor.

pub mod camera;
pub mod error;
pub mod extrusion;
pub mod mesh;
pub mod primitives;
pub mod profile;
pub mod revolve;
pub mod walls;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use camera::{fit_camera, fit_camera_with_margin, plan_overview, Aabb, CameraFit};
pub use error::{Error, Result};
pub use extrusion::{apply_transform, extrude_profile, extrude_with_holes};
pub use mesh::{calculate_normals, Mesh};
pub use primitives::{box_at, wall_edges, wall_segments_for_loop, WallEdge};
pub use profile::{Profile2D, Triangulation};
pub use revolve::{lathe, revolve_profile, section_profile, LATHE_SEGMENTS};
pub use walls::{hull_with_holes, WallSynthesisStrategy};
