// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene node identity

use slotmap::new_key_type;
use std::fmt;

new_key_type! {
    /// Arena slot of a live scene node
    pub struct SceneNodeKey;
}

/// Stable semantic id of a scene node
///
/// Ids survive rebuilds, so a node whose mesh did not change keeps its
/// surface handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SceneNodeId {
    /// The single wall slab of an annotated plan
    Walls,
    Room(usize),
    Window(usize),
    Door(usize),
    /// The lathe solid of the stacked-section generator
    Sections,
}

impl fmt::Display for SceneNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Walls => f.write_str("walls"),
            Self::Room(i) => write!(f, "room{}", i + 1),
            Self::Window(i) => write!(f, "window{}", i + 1),
            Self::Door(i) => write!(f, "door{}", i + 1),
            Self::Sections => f.write_str("sections"),
        }
    }
}
