// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Plan3D Editor
//!
//! Interaction layer for annotating floor-plan images. Hosts translate their
//! pointer events and button actions into [`Editor`] calls; the editor keeps
//! the selection and drag state explicit so every transition can be driven
//! from a test without a display.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use plan3d_editor::EditSession;
//!
//! let mut session = EditSession::open(floor);
//! let editor = session.editor_mut();
//! editor.pointer_down_at(pos);
//! editor.pointer_move(next);
//! editor.pointer_up();
//! let saved = session.save(&mut store)?;
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod panel;
pub mod sections;
pub mod selection;
pub mod session;
pub mod style;

pub use config::EditorConfig;
pub use editor::{hit_vertex, insert_point_near_edge, nearest_edge, Editor};
pub use error::{Error, Result, StoreError};
pub use panel::{entry_label, format_coordinate, Axis, PointRow};
pub use sections::SectionEditor;
pub use selection::{DragState, Selection};
pub use session::{EditSession, FloorPlanStore};
pub use style::{Rgb, ShapeStyle, StyleTable};
