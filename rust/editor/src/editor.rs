// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Annotation editing state machine
//!
//! The editor owns the [`AnnotationSet`] of one floor plan together with the
//! active [`Selection`] and the current [`DragState`]. Hosts feed it pointer
//! events and panel actions; every operation reports whether the annotations
//! changed. Operations that make no sense for the current selection are
//! no-ops.
//!
//! ```text
//!            pointer_down (on a vertex)
//!   Idle ─────────────────────────────> DraggingVertex
//!    │  pointer_down (elsewhere)              │
//!    └──────────────> DraggingShape           │
//!                          │                  │
//!   Idle <─────────────────┴──────────────────┘
//!          pointer_up / pointer_leave
//! ```

use crate::config::EditorConfig;
use crate::panel::{Axis, PointRow};
use crate::selection::{DragState, Selection};
use crate::style::LINE_STROKE_WIDTH;
use plan3d_core::{
    parse_number, toggle_unit, Annotation, AnnotationKind, AnnotationRef, AnnotationSet,
    LengthUnit, Point2D, ScaleLengths,
};
use tracing::debug;

/// Interactive editor over one floor plan's annotations
#[derive(Debug, Clone)]
pub struct Editor {
    annotations: AnnotationSet,
    selection: Selection,
    drag: DragState,
    add_point_armed: bool,
    view_size: Option<(f64, f64)>,
    unit: LengthUnit,
    config: EditorConfig,
    revision: u64,
}

impl Editor {
    pub fn new(annotations: AnnotationSet) -> Self {
        Self::with_config(annotations, EditorConfig::default())
    }

    pub fn with_config(annotations: AnnotationSet, config: EditorConfig) -> Self {
        Self {
            annotations,
            selection: Selection::default(),
            drag: DragState::Idle,
            add_point_armed: false,
            view_size: None,
            unit: LengthUnit::Mm,
            config,
            revision: 0,
        }
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn into_annotations(self) -> AnnotationSet {
        self.annotations
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Unit the annotation coordinates are currently expressed in
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Bumped on every change to the annotations
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_add_point_armed(&self) -> bool {
        self.add_point_armed
    }

    /// Size of the displayed plan image, once it is known
    pub fn set_view_size(&mut self, width: f64, height: f64) {
        self.view_size = Some((width, height));
    }

    /// Centre of the displayed image, or the configured fallback
    pub fn view_center(&self) -> Point2D {
        match self.view_size {
            Some((w, h)) if w > 0.0 && h > 0.0 => Point2D::new(w / 2.0, h / 2.0),
            _ => self.config.fallback_center,
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn activate(&mut self, target: AnnotationRef) {
        if self.drag.target().is_some_and(|dragged| dragged != target) {
            self.drag = DragState::Idle;
        }
        if !self.selection.is_active(target) {
            self.selection = Selection::annotation(target);
        }
        if !target.kind.is_polygon() {
            self.add_point_armed = false;
        }
    }

    // ------------------------------------------------------------------
    // Pointer
    // ------------------------------------------------------------------

    /// Press on `target` at `pos`
    ///
    /// The target becomes active. A press on one of its vertices starts a
    /// vertex drag and selects that point; anywhere else starts a shape drag.
    pub fn pointer_down(&mut self, target: AnnotationRef, pos: Point2D) -> bool {
        let Some(annotation) = self.annotations.get(target) else {
            return false;
        };
        let hit = hit_vertex(annotation, pos, self.config.hit_radius());

        self.activate(target);
        self.drag = match hit {
            Some(point) => {
                self.selection.point = Some(point);
                DragState::DraggingVertex {
                    target,
                    point,
                    last: pos,
                }
            }
            None => DragState::DraggingShape { target, last: pos },
        };

        debug!(kind = %target.kind, index = target.index, vertex = ?hit, "pointer down");
        true
    }

    /// Press at `pos` on whatever annotation is on top there
    pub fn pointer_down_at(&mut self, pos: Point2D) -> bool {
        match self.pick(pos) {
            Some(target) => self.pointer_down(target, pos),
            None => false,
        }
    }

    /// Pointer moved to `pos`; returns whether any point moved
    pub fn pointer_move(&mut self, pos: Point2D) -> bool {
        let target = match self.drag {
            DragState::Idle => return false,
            DragState::DraggingShape { target, .. } | DragState::DraggingVertex { target, .. } => {
                target
            }
        };
        if !self.selection.is_active(target) {
            self.drag = DragState::Idle;
            return false;
        }

        let moved = match &mut self.drag {
            DragState::Idle => false,
            DragState::DraggingShape { last, .. } => {
                let delta = pos - *last;
                *last = pos;
                match self.annotations.get_mut(target) {
                    Some(annotation) => {
                        annotation.translate(delta);
                        true
                    }
                    None => false,
                }
            }
            DragState::DraggingVertex { point, last, .. } => {
                *last = pos;
                match self
                    .annotations
                    .get_mut(target)
                    .and_then(|a| a.points.get_mut(*point))
                {
                    Some(p) => {
                        *p = pos;
                        true
                    }
                    None => false,
                }
            }
        };

        if moved {
            self.touch();
        } else {
            self.drag = DragState::Idle;
        }
        moved
    }

    /// Release ends any drag; the selected point stays selected
    pub fn pointer_up(&mut self) {
        if !self.drag.is_idle() {
            debug!("drag ended");
        }
        self.drag = DragState::Idle;
    }

    /// Pointer left the drawing area; same as a release
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Topmost annotation under `pos`
    ///
    /// Kinds are searched against paint order, so doors win over windows and
    /// windows over walls; later annotations of a kind win over earlier ones.
    /// The active annotation's handles count as part of it.
    pub fn pick(&self, pos: Point2D) -> Option<AnnotationRef> {
        let hit_radius = self.config.hit_radius();
        let stroke_reach = LINE_STROKE_WIDTH / 2.0;
        let ordered: Vec<_> = self.annotations.iter_draw_order().collect();

        ordered
            .into_iter()
            .rev()
            .find(|(target, annotation)| {
                if self.selection.is_active(*target)
                    && hit_vertex(annotation, pos, hit_radius).is_some()
                {
                    return true;
                }
                if target.kind.is_polygon() {
                    annotation.contains(pos)
                } else {
                    annotation
                        .edges()
                        .any(|(a, b)| pos.distance_to_segment(&a, &b) <= stroke_reach)
                }
            })
            .map(|(target, _)| target)
    }

    // ------------------------------------------------------------------
    // Add-point mode
    // ------------------------------------------------------------------

    /// Arm or disarm add-point mode; only walls take extra points
    ///
    /// Returns whether the mode is armed afterwards.
    pub fn toggle_add_point_mode(&mut self) -> bool {
        if self.selection.kind.is_polygon() {
            self.add_point_armed = !self.add_point_armed;
        } else {
            self.add_point_armed = false;
        }
        self.add_point_armed
    }

    /// Click on the plan at `pos`
    ///
    /// With add-point mode armed and a wall active, the point goes into the
    /// edge nearest to `pos` and the mode disarms.
    pub fn click(&mut self, pos: Point2D) -> bool {
        if !self.add_point_armed {
            return false;
        }
        let Some(target) = self.selection.active() else {
            return false;
        };
        if !target.kind.is_polygon() {
            return false;
        }
        let Some(annotation) = self.annotations.get_mut(target) else {
            return false;
        };
        let Some(at) = insert_point_near_edge(&mut annotation.points, pos) else {
            return false;
        };

        self.add_point_armed = false;
        self.touch();
        debug!(index = target.index, at, "point inserted");
        true
    }

    // ------------------------------------------------------------------
    // Deletion
    // ------------------------------------------------------------------

    /// Remove the selected point
    ///
    /// Refused for segments and for walls that would drop below three points.
    pub fn delete_point(&mut self) -> bool {
        let Some((target, point)) = self.selection.active_point() else {
            return false;
        };
        if !target.kind.is_polygon() {
            return false;
        }
        let Some(annotation) = self.annotations.get_mut(target) else {
            return false;
        };
        if point >= annotation.len() || annotation.len() <= target.kind.min_points() {
            return false;
        }

        annotation.points.remove(point);
        self.selection.point = None;
        self.touch();
        debug!(index = target.index, point, "point deleted");
        true
    }

    /// Remove the active annotation; the selection is cleared either way
    pub fn delete_annotation(&mut self) -> bool {
        let active = self.selection.active();
        self.selection.clear();
        self.drag = DragState::Idle;

        let Some(target) = active else {
            return false;
        };
        if self.annotations.remove(target).is_none() {
            return false;
        }
        self.touch();
        debug!(kind = %target.kind, index = target.index, "annotation deleted");
        true
    }

    // ------------------------------------------------------------------
    // Creation and selection
    // ------------------------------------------------------------------

    /// Append a default shape of the active kind at the view centre and
    /// select it
    pub fn add_annotation(&mut self) -> AnnotationRef {
        let kind = self.selection.kind;
        let c = self.view_center();

        let points = if kind.is_polygon() {
            let h = self.config.default_square_half_size;
            vec![
                Point2D::new(c.x - h, c.y - h),
                Point2D::new(c.x + h, c.y - h),
                Point2D::new(c.x + h, c.y + h),
                Point2D::new(c.x - h, c.y + h),
            ]
        } else {
            let h = self.config.default_segment_length / 2.0;
            vec![Point2D::new(c.x - h, c.y), Point2D::new(c.x + h, c.y)]
        };

        let target = self.annotations.push(kind, Annotation::new(points));
        self.selection = Selection::annotation(target);
        self.touch();
        debug!(%kind, index = target.index, "annotation added");
        target
    }

    /// Switch the kind being edited; nothing stays selected
    pub fn set_active_kind(&mut self, kind: AnnotationKind) {
        self.selection = Selection::of_kind(kind);
        self.drag = DragState::Idle;
        if !kind.is_polygon() {
            self.add_point_armed = false;
        }
    }

    /// Make `target` the active annotation
    pub fn select(&mut self, target: AnnotationRef) -> bool {
        if self.annotations.get(target).is_none() {
            return false;
        }
        self.selection = Selection::annotation(target);
        self.activate(target);
        true
    }

    /// Select point `index` of the active annotation
    pub fn select_point(&mut self, index: usize) -> bool {
        let Some(target) = self.selection.active() else {
            return false;
        };
        match self.annotations.get(target) {
            Some(annotation) if index < annotation.len() => {
                self.selection.point = Some(index);
                true
            }
            _ => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ------------------------------------------------------------------
    // Panel
    // ------------------------------------------------------------------

    /// Coordinate rows of the active annotation, divided by `scale`
    pub fn point_rows(&self, scale: f64) -> Vec<PointRow> {
        let Some(annotation) = self.selection.active().and_then(|t| self.annotations.get(t)) else {
            return Vec::new();
        };
        annotation
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| PointRow::new(i, p, scale, self.selection.point == Some(i)))
            .collect()
    }

    /// Commit text typed into a coordinate field of the active annotation
    ///
    /// The parsed value is multiplied by `scale` before it is stored. Text
    /// that is not a number is discarded and the point keeps its value.
    pub fn edit_point_field(&mut self, point: usize, axis: Axis, text: &str, scale: f64) -> bool {
        let Some(target) = self.selection.active() else {
            return false;
        };
        let value = match parse_number(text) {
            Ok(value) => value,
            Err(err) => {
                debug!(%err, "coordinate edit discarded");
                return false;
            }
        };
        let Some(slot) = self
            .annotations
            .get_mut(target)
            .and_then(|a| a.points.get_mut(point))
        else {
            return false;
        };

        axis.set(slot, value * scale);
        self.touch();
        true
    }

    /// Switch between millimetres and centimetres, rescaling every point
    pub fn toggle_unit(&mut self) -> LengthUnit {
        self.toggle_unit_with(&mut ())
    }

    /// Like [`Editor::toggle_unit`], also rescaling a parameter record held
    /// next to the plan
    pub fn toggle_unit_with<P: ScaleLengths + ?Sized>(&mut self, params: &mut P) -> LengthUnit {
        if let Some(unit) = toggle_unit(self.unit, &mut (&mut self.annotations, params)) {
            debug!(from = %self.unit, to = %unit, "annotation unit toggled");
            // Drag positions are in the old unit
            self.drag = DragState::Idle;
            self.unit = unit;
            self.touch();
        }
        self.unit
    }
}

/// First point of `annotation` strictly within `radius` of `pos` on both axes
pub fn hit_vertex(annotation: &Annotation, pos: Point2D, radius: f64) -> Option<usize> {
    annotation
        .points
        .iter()
        .position(|p| (p.x - pos.x).abs() < radius && (p.y - pos.y).abs() < radius)
}

/// Index of the closed-loop edge nearest to `pos`; ties go to the first edge
pub fn nearest_edge(points: &[Point2D], pos: Point2D) -> Option<usize> {
    let n = points.len();
    if n < 2 {
        return None;
    }

    let mut best = None;
    let mut min_distance = f64::INFINITY;
    for i in 0..n {
        let distance = pos.distance_to_segment(&points[i], &points[(i + 1) % n]);
        if distance < min_distance {
            min_distance = distance;
            best = Some(i);
        }
    }
    best
}

/// Insert `pos` right after the start of its nearest edge
///
/// Returns the index the point landed at.
pub fn insert_point_near_edge(points: &mut Vec<Point2D>, pos: Point2D) -> Option<usize> {
    let at = nearest_edge(points, pos)? + 1;
    points.insert(at, pos);
    Some(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Vec<Point2D> {
        vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(100.0, 0.0),
            Point2D::new(100.0, 100.0),
            Point2D::new(0.0, 100.0),
        ]
    }

    fn editor_with_wall() -> (Editor, AnnotationRef) {
        let mut set = AnnotationSet::new();
        let wall = set.push(AnnotationKind::Wall, Annotation::new(square()));
        (Editor::new(set), wall)
    }

    #[test]
    fn test_hit_vertex_is_strict() {
        let a = Annotation::new(square());
        assert_eq!(hit_vertex(&a, Point2D::new(9.9, -9.9), 10.0), Some(0));
        assert_eq!(hit_vertex(&a, Point2D::new(10.0, 0.0), 10.0), None);
    }

    #[test]
    fn test_first_vertex_wins() {
        let a = Annotation::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(4.0, 50.0),
        ]);
        assert_eq!(hit_vertex(&a, Point2D::new(3.0, 0.0), 10.0), Some(0));
    }

    #[test]
    fn test_nearest_edge_tie_goes_first() {
        // Equidistant from the bottom and right edges
        assert_eq!(nearest_edge(&square(), Point2D::new(110.0, -10.0)), Some(0));
        assert_eq!(nearest_edge(&square()[..1], Point2D::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_shape_drag_translates() {
        let (mut editor, wall) = editor_with_wall();
        assert!(editor.pointer_down(wall, Point2D::new(50.0, 50.0)));
        assert!(matches!(editor.drag_state(), DragState::DraggingShape { .. }));

        assert!(editor.pointer_move(Point2D::new(60.0, 45.0)));
        assert!(editor.pointer_move(Point2D::new(70.0, 45.0)));
        let pts = &editor.annotations().walls[0].points;
        assert_eq!(pts[0], Point2D::new(20.0, -5.0));
        assert_eq!(pts[2], Point2D::new(120.0, 95.0));
    }

    #[test]
    fn test_vertex_drag_moves_one_point() {
        let (mut editor, wall) = editor_with_wall();
        editor.pointer_down(wall, Point2D::new(101.0, 99.0));
        assert_eq!(editor.selection().point, Some(2));

        editor.pointer_move(Point2D::new(130.0, 140.0));
        let pts = &editor.annotations().walls[0].points;
        assert_eq!(pts[2], Point2D::new(130.0, 140.0));
        assert_eq!(pts[1], Point2D::new(100.0, 0.0));

        editor.pointer_up();
        assert!(editor.drag_state().is_idle());
        assert_eq!(editor.selection().point, Some(2));
    }

    #[test]
    fn test_click_requires_armed_mode() {
        let (mut editor, wall) = editor_with_wall();
        editor.select(wall);
        assert!(!editor.click(Point2D::new(50.0, 0.0)));

        assert!(editor.toggle_add_point_mode());
        assert!(editor.click(Point2D::new(50.0, 0.0)));
        assert!(!editor.is_add_point_armed());
        assert!(!editor.click(Point2D::new(50.0, 100.0)));
        assert_eq!(editor.annotations().walls[0].len(), 5);
    }

    #[test]
    fn test_add_point_mode_is_walls_only() {
        let (mut editor, _) = editor_with_wall();
        editor.set_active_kind(AnnotationKind::Door);
        assert!(!editor.toggle_add_point_mode());

        editor.set_active_kind(AnnotationKind::Wall);
        assert!(editor.toggle_add_point_mode());
        editor.set_active_kind(AnnotationKind::Window);
        assert!(!editor.is_add_point_armed());
    }

    #[test]
    fn test_add_annotation_defaults() {
        let mut editor = Editor::new(AnnotationSet::new());
        editor.set_active_kind(AnnotationKind::Door);
        let door = editor.add_annotation();
        assert_eq!(
            editor.annotations().get(door).unwrap().points,
            vec![Point2D::new(75.0, 100.0), Point2D::new(125.0, 100.0)]
        );
        assert_eq!(editor.selection().active(), Some(door));

        editor.set_view_size(800.0, 600.0);
        editor.set_active_kind(AnnotationKind::Wall);
        let wall = editor.add_annotation();
        let bounds = editor.annotations().get(wall).unwrap().bounds().unwrap();
        assert_eq!(bounds.center(), Point2D::new(400.0, 300.0));
        assert_eq!(bounds.width(), 100.0);
        assert_eq!(wall.index, 0);
    }

    #[test]
    fn test_delete_annotation_clears_selection() {
        let (mut editor, wall) = editor_with_wall();
        editor.select(wall);
        editor.select_point(1);
        assert!(editor.delete_annotation());
        assert!(editor.annotations().walls.is_empty());
        assert_eq!(editor.selection().index, None);
        assert_eq!(editor.selection().point, None);

        assert!(!editor.delete_annotation());
    }

    #[test]
    fn test_segment_points_cannot_be_deleted() {
        let mut editor = Editor::new(AnnotationSet::new());
        editor.set_active_kind(AnnotationKind::Window);
        editor.add_annotation();
        editor.select_point(0);
        assert!(!editor.delete_point());
        assert_eq!(editor.annotations().windows[0].len(), 2);
    }

    #[test]
    fn test_pick_prefers_doors_over_walls() {
        let (mut editor, wall) = editor_with_wall();
        editor.set_active_kind(AnnotationKind::Door);
        let door = editor.add_annotation();
        // Door runs from (75, 100) to (125, 100), across the wall's top edge
        assert_eq!(editor.pick(Point2D::new(90.0, 101.0)), Some(door));
        assert_eq!(editor.pick(Point2D::new(50.0, 50.0)), Some(wall));
        assert_eq!(editor.pick(Point2D::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_edit_point_field_scales_and_discards() {
        let (mut editor, wall) = editor_with_wall();
        editor.select(wall);
        assert!(editor.edit_point_field(1, Axis::X, "12.5", 4.0));
        assert_eq!(editor.annotations().walls[0].points[1].x, 50.0);

        let before = editor.revision();
        assert!(!editor.edit_point_field(1, Axis::Y, "abc", 4.0));
        assert!(!editor.edit_point_field(1, Axis::Y, "", 4.0));
        assert_eq!(editor.annotations().walls[0].points[1].y, 0.0);
        assert_eq!(editor.revision(), before);

        let rows = editor.point_rows(4.0);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].x, "12.50");
    }

    #[test]
    fn test_toggle_unit_rescales() {
        let (mut editor, _) = editor_with_wall();
        assert_eq!(editor.toggle_unit(), LengthUnit::Cm);
        assert_relative_eq!(editor.annotations().walls[0].points[2].x, 10.0);
        assert_eq!(editor.toggle_unit(), LengthUnit::Mm);
        assert_relative_eq!(editor.annotations().walls[0].points[2].x, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_toggle_unit_with_parameters() {
        let (mut editor, _) = editor_with_wall();
        let mut details = plan3d_core::ApartmentDetails::default();
        assert_eq!(editor.toggle_unit_with(&mut details), LengthUnit::Cm);
        assert_relative_eq!(details.width, 20.0, epsilon = 1e-12);
        assert_relative_eq!(editor.annotations().walls[0].points[2].x, 10.0);
    }
}
