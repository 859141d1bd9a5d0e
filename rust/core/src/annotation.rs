// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Annotation model
//!
//! An [`AnnotationSet`] groups annotations by their semantic kind. The three
//! kinds are fixed; each list may be empty. Insertion order within a list is
//! both the draw order on the plan and the row order in the side panel.

use crate::error::{Error, Result};
use crate::point::{PlanBounds, Point2D};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic kind of an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnnotationKind {
    #[serde(rename = "walls")]
    Wall,
    #[serde(rename = "doors")]
    Door,
    #[serde(rename = "windows")]
    Window,
}

impl AnnotationKind {
    /// Panel order
    pub const ALL: [AnnotationKind; 3] = [Self::Wall, Self::Door, Self::Window];

    /// Order in which kinds are painted on the plan; later kinds sit on top
    pub const DRAW_ORDER: [AnnotationKind; 3] = [Self::Wall, Self::Window, Self::Door];

    /// Walls are closed polygons, openings are two-point segments
    #[inline]
    pub fn is_polygon(self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Fewest points an annotation of this kind may have
    #[inline]
    pub fn min_points(self) -> usize {
        if self.is_polygon() {
            3
        } else {
            2
        }
    }

    /// Persisted key of this kind's list
    pub fn key(self) -> &'static str {
        match self {
            Self::Wall => "walls",
            Self::Door => "doors",
            Self::Window => "windows",
        }
    }

    /// Shape label shown next to each entry in the side panel
    pub fn label(self) -> &'static str {
        if self.is_polygon() {
            "Polygon"
        } else {
            "Line"
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AnnotationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walls" | "wall" => Ok(Self::Wall),
            "doors" | "door" => Ok(Self::Door),
            "windows" | "window" => Ok(Self::Window),
            other => Err(Error::UnknownKind(other.to_string())),
        }
    }
}

/// Ordered point sequence for one wall polygon or one door/window segment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotation {
    pub points: Vec<Point2D>,
}

impl Annotation {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Edges of the closed loop, including the wrap-around edge
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Move every point by the same delta
    pub fn translate(&mut self, delta: Point2D) {
        for p in &mut self.points {
            *p = *p + delta;
        }
    }

    pub fn scale(&mut self, factor: f64) {
        for p in &mut self.points {
            *p = p.scaled(factor);
        }
    }

    pub fn bounds(&self) -> Option<PlanBounds> {
        PlanBounds::from_points(&self.points)
    }

    /// Even-odd test of `pos` against the closed loop
    pub fn contains(&self, pos: Point2D) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > pos.y) != (b.y > pos.y) {
                let x = a.x + (pos.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if pos.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

impl From<Vec<Point2D>> for Annotation {
    fn from(points: Vec<Point2D>) -> Self {
        Self { points }
    }
}

/// Reference to one annotation inside an [`AnnotationSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnnotationRef {
    pub kind: AnnotationKind,
    pub index: usize,
}

impl AnnotationRef {
    pub fn new(kind: AnnotationKind, index: usize) -> Self {
        Self { kind, index }
    }
}

/// Annotations grouped by kind; the unit of persistence for a floor plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSet {
    #[serde(default)]
    pub walls: Vec<Annotation>,
    #[serde(default)]
    pub doors: Vec<Annotation>,
    #[serde(default)]
    pub windows: Vec<Annotation>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a legacy flat list of loops, all of which are walls
    pub fn from_legacy(loops: Vec<Vec<Point2D>>) -> Self {
        Self {
            walls: loops.into_iter().map(Annotation::new).collect(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn list(&self, kind: AnnotationKind) -> &[Annotation] {
        match kind {
            AnnotationKind::Wall => &self.walls,
            AnnotationKind::Door => &self.doors,
            AnnotationKind::Window => &self.windows,
        }
    }

    pub fn list_mut(&mut self, kind: AnnotationKind) -> &mut Vec<Annotation> {
        match kind {
            AnnotationKind::Wall => &mut self.walls,
            AnnotationKind::Door => &mut self.doors,
            AnnotationKind::Window => &mut self.windows,
        }
    }

    pub fn get(&self, r: AnnotationRef) -> Option<&Annotation> {
        self.list(r.kind).get(r.index)
    }

    pub fn get_mut(&mut self, r: AnnotationRef) -> Option<&mut Annotation> {
        self.list_mut(r.kind).get_mut(r.index)
    }

    /// Append an annotation and return its reference
    pub fn push(&mut self, kind: AnnotationKind, annotation: Annotation) -> AnnotationRef {
        let list = self.list_mut(kind);
        list.push(annotation);
        AnnotationRef::new(kind, list.len() - 1)
    }

    pub fn remove(&mut self, r: AnnotationRef) -> Option<Annotation> {
        let list = self.list_mut(r.kind);
        (r.index < list.len()).then(|| list.remove(r.index))
    }

    pub fn len(&self) -> usize {
        self.walls.len() + self.doors.len() + self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every annotation in paint order (walls, windows, doors)
    pub fn iter_draw_order(&self) -> impl Iterator<Item = (AnnotationRef, &Annotation)> {
        AnnotationKind::DRAW_ORDER.into_iter().flat_map(move |kind| {
            self.list(kind)
                .iter()
                .enumerate()
                .map(move |(index, a)| (AnnotationRef::new(kind, index), a))
        })
    }

    /// Multiply every coordinate of every annotation by `factor`
    pub fn scale(&mut self, factor: f64) {
        for kind in AnnotationKind::ALL {
            for annotation in self.list_mut(kind) {
                annotation.scale(factor);
            }
        }
    }

    /// Wall annotations that form closed loops (more than two points)
    pub fn wall_loops(&self) -> impl Iterator<Item = &[Point2D]> {
        self.walls
            .iter()
            .filter(|a| a.len() > 2)
            .map(|a| a.points.as_slice())
    }

    /// Bounds of every wall point
    pub fn wall_bounds(&self) -> Option<PlanBounds> {
        PlanBounds::from_points(self.walls.iter().flat_map(|a| a.points.iter()))
    }
}
