// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Kernel-level checks across extrusion, lathe and wall synthesis.

use approx::assert_relative_eq;
use plan3d_core::{default_sections, Point2D, Section};
use plan3d_geometry::{
    fit_camera, revolve_profile, section_profile, wall_edges, wall_segments_for_loop, Aabb,
    WallSynthesisStrategy,
};

/// Irregular loop of `n` points, not axis aligned
fn wobbly_loop(n: usize) -> Vec<Point2D> {
    (0..n)
        .map(|i| {
            let a = std::f64::consts::TAU * i as f64 / n as f64;
            let r = 120.0 + 15.0 * (i % 3) as f64;
            Point2D::new(300.0 + r * a.cos(), 200.0 + r * a.sin())
        })
        .collect()
}

#[test]
fn wall_segment_count_equals_point_count() {
    for n in 3..=24 {
        let pts = wobbly_loop(n);
        let segments = wall_segments_for_loop(&pts, 100.0, 8.0);
        assert_eq!(segments.len(), n, "loop of {} points", n);
        assert!(segments.iter().all(|m| m.vertex_count() == 24));
    }
}

#[test]
fn wrap_around_segment_is_centred_between_last_and_first() {
    let pts = wobbly_loop(5);
    let segments = wall_segments_for_loop(&pts, 100.0, 8.0);
    let last = segments.last().unwrap();

    let bounds = Aabb::from_mesh(last).unwrap();
    let mid = pts[4].midpoint(&pts[0]);
    assert_relative_eq!(bounds.center().x, mid.x, epsilon = 1e-3);
    assert_relative_eq!(bounds.center().y, mid.y, epsilon = 1e-3);
    assert_relative_eq!(bounds.center().z, 50.0, epsilon = 1e-3);
}

#[test]
fn edge_lengths_match_point_distance() {
    let pts = wobbly_loop(7);
    for (i, edge) in wall_edges(&pts).iter().enumerate() {
        let expected = pts[i].distance_to(&pts[(i + 1) % pts.len()]);
        assert_eq!(edge.length, expected);
    }
}

#[test]
fn stacked_sections_top_and_joint() {
    let sections = vec![
        Section::new(1, "Bottom", 40.0, 50.0),
        Section::new(2, "Middle", 80.0, 40.0),
        Section::new(3, "Top", 30.0, 20.0),
    ];
    let profile = section_profile(&sections);

    let top = profile.last().unwrap();
    assert_relative_eq!(top.y, 150.0);
    assert_relative_eq!(top.x, 0.0);

    // Radius where the first section meets the second
    let joint: Vec<_> = profile.iter().filter(|p| p.y == 40.0).collect();
    assert!(!joint.is_empty());
    assert!(joint.iter().all(|p| p.x == 20.0));
}

#[test]
fn lathe_fits_camera_around_centre() {
    let mesh = revolve_profile(&default_sections());
    let bounds = Aabb::from_mesh(&mesh).unwrap();
    let fit = fit_camera(&bounds, 45.0);

    assert_relative_eq!(fit.target.z, 75.0, epsilon = 1e-3);
    assert!(fit.distance > bounds.max_dimension());
}

#[test]
fn strategies_cover_same_footprint() {
    let a = vec![
        Point2D::new(0.0, 0.0),
        Point2D::new(200.0, 0.0),
        Point2D::new(200.0, 100.0),
        Point2D::new(0.0, 100.0),
    ];
    let b = vec![
        Point2D::new(200.0, 0.0),
        Point2D::new(320.0, 0.0),
        Point2D::new(320.0, 100.0),
        Point2D::new(200.0, 100.0),
    ];
    let loops = [a.as_slice(), b.as_slice()];

    let hull = WallSynthesisStrategy::HullWithHoles.synthesize(&loops, 100.0, 8.0);
    let boxes = WallSynthesisStrategy::PerEdgeBoxes.synthesize(&loops, 100.0, 8.0);
    assert_eq!(hull.len(), 1);
    assert_eq!(boxes.len(), 8);

    let hull_bounds = Aabb::from_meshes(&hull).unwrap();
    let box_bounds = Aabb::from_meshes(&boxes).unwrap();
    assert_relative_eq!(hull_bounds.center().x, box_bounds.center().x, epsilon = 1e-3);
    assert_relative_eq!(hull_bounds.max.z, box_bounds.max.z, epsilon = 1e-3);
}
