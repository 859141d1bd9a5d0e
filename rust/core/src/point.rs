// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan-space points and bounds
//!
//! Points carry no unit of their own; the surrounding parameter set does.
//! They persist as two-element arrays (`[x, y]`), which is the shape floor
//! records have always been stored in.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point in editor pixel space or in a physical unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Multiply both coordinates by `factor`
    #[inline]
    pub fn scaled(&self, factor: f64) -> Point2D {
        Point2D::new(self.x * factor, self.y * factor)
    }

    /// Distance from this point to the segment `a`-`b`
    ///
    /// The projection parameter is clamped to `[0, 1]`, so points beyond an
    /// endpoint measure against that endpoint. A zero-length segment measures
    /// against `a`.
    pub fn distance_to_segment(&self, a: &Point2D, b: &Point2D) -> f64 {
        let c = b.x - a.x;
        let d = b.y - a.y;
        let len_sq = c * c + d * d;

        let t = if len_sq != 0.0 {
            ((self.x - a.x) * c + (self.y - a.y) * d) / len_sq
        } else {
            -1.0
        };

        let closest = if t < 0.0 {
            *a
        } else if t > 1.0 {
            *b
        } else {
            Point2D::new(a.x + t * c, a.y + t * d)
        };

        self.distance_to(&closest)
    }
}

impl From<[f64; 2]> for Point2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point2D> for [f64; 2] {
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned bounds of a set of plan points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl PlanBounds {
    /// Bounds of `points`, or `None` when there are none
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2D>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = PlanBounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in iter {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn length(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Corners in loop order starting at (min_x, min_y)
    pub fn corners(&self) -> [Point2D; 4] {
        [
            Point2D::new(self.min_x, self.min_y),
            Point2D::new(self.max_x, self.min_y),
            Point2D::new(self.max_x, self.max_y),
            Point2D::new(self.min_x, self.max_y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_serializes_as_pair() {
        let p = Point2D::new(1.5, -2.0);
        assert_eq!(serde_json::to_string(&p).unwrap(), "[1.5,-2.0]");

        let back: Point2D = serde_json::from_str("[3,4]").unwrap();
        assert_eq!(back, Point2D::new(3.0, 4.0));
    }

    #[test]
    fn test_distance_to_segment_interior() {
        let p = Point2D::new(50.0, 10.0);
        let d = p.distance_to_segment(&Point2D::new(0.0, 0.0), &Point2D::new(100.0, 0.0));
        assert!((d - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_to_segment_clamps_to_endpoint() {
        let p = Point2D::new(-3.0, 4.0);
        let d = p.distance_to_segment(&Point2D::new(0.0, 0.0), &Point2D::new(100.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_to_degenerate_segment() {
        let a = Point2D::new(1.0, 1.0);
        let p = Point2D::new(4.0, 5.0);
        assert!((p.distance_to_segment(&a, &a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounds() {
        let pts = [
            Point2D::new(10.0, 5.0),
            Point2D::new(-2.0, 7.0),
            Point2D::new(4.0, -1.0),
        ];
        let b = PlanBounds::from_points(&pts).unwrap();
        assert_eq!(b.min_x, -2.0);
        assert_eq!(b.max_x, 10.0);
        assert_eq!(b.min_y, -1.0);
        assert_eq!(b.max_y, 7.0);
        assert_eq!(b.center(), Point2D::new(4.0, 3.0));
        assert!(PlanBounds::from_points(&[]).is_none());
    }
}
