// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Plan3D Core
//!
//! Data model shared by the floor-plan editor, the geometry kernel and the
//! code emitters.
//!
//! ## Overview
//!
//! - **Annotations**: wall polygons and door/window segments grouped by kind
//! - **Floor records**: persisted floors, including migration of legacy
//!   flat-list records
//! - **Apartment records**: rooms, windows and doors with their physical
//!   placement and cosmetic fields
//! - **Sections**: the stacked profile of a rotationally symmetric solid
//! - **Units**: conversion of parameter records to centimetres and the
//!   in-place mm/cm toggle
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use plan3d_core::{ApartmentDetails, ApartmentModel, Floor};
//!
//! let floor = Floor::from_json(&json)?;
//! let model = ApartmentModel::from_annotations(ApartmentDetails::default(), &floor.annotation_set());
//! let in_cm = model.converted()?;
//! ```

pub mod annotation;
pub mod apartment;
pub mod error;
pub mod field;
pub mod floor;
pub mod point;
pub mod section;
pub mod units;

pub use annotation::{Annotation, AnnotationKind, AnnotationRef, AnnotationSet};
pub use apartment::{
    ApartmentDetails, ApartmentModel, ConvertedApartment, DoorSpec, Room, WindowSpec,
};
pub use error::{Error, Result};
pub use field::{commit_number, parse_number};
pub use floor::Floor;
pub use point::{PlanBounds, Point2D};
pub use section::{
    default_sections, next_section_id, section_spans, total_height, Section, SectionSpan,
    TOP_TAPER,
};
pub use units::{convert_record, toggle_unit, LengthUnit, ScaleLengths};
