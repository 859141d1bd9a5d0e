// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Plan3D Viewer
//!
//! Live binding between model data and a host renderer. Geometry synthesis
//! is a pure function ([`synthesize`]) producing an immutable [`Scene`]; the
//! [`SceneArena`] diffs each new scene against what the surface already holds
//! and applies only the difference.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use plan3d_viewer::{HeadlessSurface, SceneInput, ViewerBinding, ViewerConfig};
//!
//! let mut surface = HeadlessSurface::new();
//! let mut viewer = ViewerBinding::mount(&mut surface, ViewerConfig::default());
//! viewer.update(&SceneInput::Sections(sections));
//! viewer.frame();
//! viewer.unmount();
//! ```

pub mod arena;
pub mod binding;
pub mod config;
pub mod keys;
pub mod scene;
pub mod surface;

pub use arena::{fingerprint, ApplyStats, LiveNode, SceneArena};
pub use binding::ViewerBinding;
pub use config::ViewerConfig;
pub use keys::{SceneNodeId, SceneNodeKey};
pub use scene::{door_box, synthesize, window_box, Scene, SceneInput, SceneMaterial, SceneNode};
pub use surface::{HeadlessMeshKey, HeadlessSurface, RenderSurface};
