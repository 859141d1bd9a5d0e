// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Active selection and drag tracking

use plan3d_core::{AnnotationKind, AnnotationRef, Point2D};

/// Which annotation kind, annotation and point are eligible for editing
///
/// `point` only means something while `index` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub kind: AnnotationKind,
    pub index: Option<usize>,
    pub point: Option<usize>,
}

impl Default for Selection {
    fn default() -> Self {
        Self::of_kind(AnnotationKind::Wall)
    }
}

impl Selection {
    /// Nothing selected within `kind`
    pub fn of_kind(kind: AnnotationKind) -> Self {
        Self {
            kind,
            index: None,
            point: None,
        }
    }

    /// Select a whole annotation, without a point
    pub fn annotation(target: AnnotationRef) -> Self {
        Self {
            kind: target.kind,
            index: Some(target.index),
            point: None,
        }
    }

    pub fn active(&self) -> Option<AnnotationRef> {
        self.index.map(|index| AnnotationRef::new(self.kind, index))
    }

    /// Selected point, only while an annotation is selected
    pub fn active_point(&self) -> Option<(AnnotationRef, usize)> {
        Some((self.active()?, self.point?))
    }

    pub fn is_active(&self, target: AnnotationRef) -> bool {
        self.active() == Some(target)
    }

    pub fn clear(&mut self) {
        self.index = None;
        self.point = None;
    }
}

/// Pointer drag phase
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No pointer held
    #[default]
    Idle,
    /// Every point of `target` follows the pointer
    DraggingShape { target: AnnotationRef, last: Point2D },
    /// Only `point` of `target` follows the pointer
    DraggingVertex {
        target: AnnotationRef,
        point: usize,
        last: Point2D,
    },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Annotation being dragged
    pub fn target(&self) -> Option<AnnotationRef> {
        match self {
            Self::Idle => None,
            Self::DraggingShape { target, .. } | Self::DraggingVertex { target, .. } => {
                Some(*target)
            }
        }
    }

    /// Pointer position at the previous event
    pub fn last_position(&self) -> Option<Point2D> {
        match self {
            Self::Idle => None,
            Self::DraggingShape { last, .. } | Self::DraggingVertex { last, .. } => Some(*last),
        }
    }
}
