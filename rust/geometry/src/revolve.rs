// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface of revolution for stacked sections

use crate::mesh::{calculate_normals, Mesh};
use nalgebra::{Point2, Point3, Rotation3, Vector3};
use plan3d_core::{section_spans, Section};

/// Angular resolution of the lathe
pub const LATHE_SEGMENTS: usize = 100;

/// Profile polyline of a section stack as (radius, height) pairs
///
/// Starts on the axis at height zero, then visits each section's start and
/// end radius at its base and top height, and returns to the axis at the
/// total height.
pub fn section_profile(sections: &[Section]) -> Vec<Point2<f64>> {
    let spans = section_spans(sections);
    let mut points = Vec::with_capacity(spans.len() * 2 + 2);

    points.push(Point2::new(0.0, 0.0));
    for span in &spans {
        points.push(Point2::new(span.start_radius, span.base_height));
        points.push(Point2::new(span.end_radius, span.top_height()));
    }
    let top = spans.last().map_or(0.0, |s| s.top_height());
    points.push(Point2::new(0.0, top));

    points
}

/// Revolve the section stack 360 degrees about +Z
pub fn revolve_profile(sections: &[Section]) -> Mesh {
    if sections.is_empty() {
        return Mesh::new();
    }
    lathe(&section_profile(sections), LATHE_SEGMENTS)
}

/// Revolve a (radius, height) polyline about +Z in `segments` steps
///
/// The last ring reuses angle zero so the seam closes exactly.
pub fn lathe(profile: &[Point2<f64>], segments: usize) -> Mesh {
    let n = profile.len();
    if n < 2 || segments < 3 {
        return Mesh::new();
    }

    let mut mesh = Mesh::with_capacity((segments + 1) * n, segments * (n - 1) * 6);
    let axis = Vector3::z_axis();

    for i in 0..=segments {
        let angle = if i == segments {
            0.0
        } else {
            std::f64::consts::TAU * i as f64 / segments as f64
        };
        let rotation = Rotation3::from_axis_angle(&axis, angle);

        for (j, p) in profile.iter().enumerate() {
            let pos = rotation * Point3::new(p.x, 0.0, p.y);
            mesh.add_vertex(pos, Vector3::z());

            if i < segments && j < n - 1 {
                let current = (i * n + j) as u32;
                let next_ring = ((i + 1) * n + j) as u32;

                mesh.add_triangle(current, next_ring, next_ring + 1);
                mesh.add_triangle(current, next_ring + 1, current + 1);
            }
        }
    }

    calculate_normals(&mut mesh);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use plan3d_core::default_sections;

    #[test]
    fn test_profile_shape() {
        let profile = section_profile(&default_sections());
        assert_eq!(profile.len(), 8);

        assert_eq!(profile[0], Point2::new(0.0, 0.0));
        assert_eq!(profile[1], Point2::new(25.0, 0.0));
        assert_eq!(profile[2], Point2::new(20.0, 40.0));

        let top = profile[profile.len() - 1];
        assert_relative_eq!(top.x, 0.0);
        assert_relative_eq!(top.y, 150.0);
    }

    #[test]
    fn test_lathe_vertex_count() {
        let mesh = revolve_profile(&default_sections());
        assert_eq!(mesh.vertex_count(), (LATHE_SEGMENTS + 1) * 8);
        assert_eq!(mesh.triangle_count(), LATHE_SEGMENTS * 7 * 2);
    }

    #[test]
    fn test_lathe_bounds() {
        let mesh = revolve_profile(&default_sections());
        let (min, max) = mesh.bounds();
        assert_relative_eq!(max.x, 25.0, epsilon = 1e-4);
        assert_relative_eq!(min.x, -25.0, epsilon = 1e-4);
        assert_relative_eq!(min.z, 0.0, epsilon = 1e-4);
        assert_relative_eq!(max.z, 150.0, epsilon = 1e-4);
    }

    #[test]
    fn test_empty_sections() {
        assert!(revolve_profile(&[]).is_empty());
    }
}
