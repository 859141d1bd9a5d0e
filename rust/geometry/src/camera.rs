// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounding boxes and camera framing

use crate::mesh::Mesh;
use nalgebra::{Point3, Vector3};
use plan3d_core::PlanBounds;

/// Distance multiplier applied on top of the exact fit
pub const DEFAULT_FIT_MARGIN: f64 = 1.5;

/// Field of view of the plan overview camera, degrees
pub const PLAN_OVERVIEW_FOV_DEG: f64 = 60.0;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Bounds of a mesh, or `None` when it has no vertices
    pub fn from_mesh(mesh: &Mesh) -> Option<Self> {
        if mesh.is_empty() {
            return None;
        }
        let (min, max) = mesh.bounds();
        Some(Self {
            min: min.cast::<f64>(),
            max: max.cast::<f64>(),
        })
    }

    /// Union of the bounds of every non-empty mesh
    pub fn from_meshes<'a, I>(meshes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Mesh>,
    {
        meshes
            .into_iter()
            .filter_map(Aabb::from_mesh)
            .reduce(|acc, b| acc.union(&b))
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    #[inline]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    #[inline]
    pub fn max_dimension(&self) -> f64 {
        let s = self.size();
        s.x.max(s.y).max(s.z)
    }

    /// Whether any corner moved by more than `tolerance`
    pub fn differs_from(&self, other: &Aabb, tolerance: f64) -> bool {
        (self.min - other.min).amax() > tolerance || (self.max - other.max).amax() > tolerance
    }
}

/// Where to put the camera and what it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFit {
    pub position: Point3<f64>,
    pub target: Point3<f64>,
    pub distance: f64,
    pub fov_deg: f64,
}

/// Frame `bounds` with the default margin
pub fn fit_camera(bounds: &Aabb, fov_deg: f64) -> CameraFit {
    fit_camera_with_margin(bounds, fov_deg, DEFAULT_FIT_MARGIN)
}

/// Frame `bounds` for a camera with the given field of view
///
/// The distance is `|maxDimension / tan(fov / 2)| * margin`. The camera looks
/// at the box centre from `distance` along each axis.
pub fn fit_camera_with_margin(bounds: &Aabb, fov_deg: f64, margin: f64) -> CameraFit {
    let half_fov = fov_deg.to_radians() / 2.0;
    let distance = (bounds.max_dimension() / half_fov.tan()).abs() * margin;
    let target = bounds.center();

    CameraFit {
        position: target + Vector3::repeat(distance),
        target,
        distance,
        fov_deg,
    }
}

/// Overview of a floor plan seen from above and in front
///
/// Plan coordinates are multiplied by `scale`. The camera hovers at twice the
/// largest dimension, pulled back by the plan's length, and looks at the plan
/// centre on the floor.
pub fn plan_overview(bounds: &PlanBounds, wall_height: f64, scale: f64) -> CameraFit {
    let width = bounds.width() * scale;
    let length = bounds.length() * scale;
    let height = wall_height * scale;
    let center = bounds.center();
    let (cx, cy) = (center.x * scale, center.y * scale);

    let max_dim = width.max(length).max(height);
    let target = Point3::new(cx, cy, 0.0);
    let position = Point3::new(cx, cy + length, max_dim * 2.0);

    CameraFit {
        position,
        target,
        distance: (position - target).norm(),
        fov_deg: PLAN_OVERVIEW_FOV_DEG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_distance() {
        let bounds = Aabb::new(Point3::new(-25.0, -25.0, 0.0), Point3::new(25.0, 25.0, 150.0));
        let fit = fit_camera(&bounds, 45.0);

        let expected = 150.0 / (22.5f64.to_radians()).tan() * 1.5;
        assert_relative_eq!(fit.distance, expected, epsilon = 1e-9);
        assert_eq!(fit.target, Point3::new(0.0, 0.0, 75.0));
        assert_relative_eq!(fit.position.z, 75.0 + expected, epsilon = 1e-9);
    }

    #[test]
    fn test_union_and_tolerance() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point3::new(-1.0, 0.5, 0.0), Point3::new(0.5, 2.0, 1.0));
        let u = a.union(&b);
        assert_eq!(u.min, Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(u.max, Point3::new(1.0, 2.0, 1.0));

        assert!(!a.differs_from(&a, 1e-6));
        assert!(u.differs_from(&a, 0.5));
        assert!(!u.differs_from(&a, 1.0));
    }

    #[test]
    fn test_plan_overview() {
        let bounds = PlanBounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 400.0,
            max_y: 300.0,
        };
        let cam = plan_overview(&bounds, 250.0, 0.01);
        assert_relative_eq!(cam.target.x, 2.0);
        assert_relative_eq!(cam.target.y, 1.5);
        assert_relative_eq!(cam.position.y, 4.5);
        assert_relative_eq!(cam.position.z, 8.0);
        assert_eq!(cam.fov_deg, 60.0);
    }
}
