// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena of live scene nodes
//!
//! Each node synthesized into the scene gets a slot holding the surface
//! handle of its mesh and a fingerprint of what was uploaded. Applying a new
//! [`Scene`] diffs by [`SceneNodeId`]: unchanged nodes keep their handle,
//! changed ones are swapped, missing ones are removed from the surface.

use crate::keys::{SceneNodeId, SceneNodeKey};
use crate::scene::{Scene, SceneNode};
use crate::surface::RenderSurface;
use rustc_hash::{FxHashMap, FxHashSet, FxHasher};
use slotmap::SlotMap;
use std::hash::{Hash, Hasher};

/// Live node: what the surface holds for one semantic id
#[derive(Debug, Clone)]
pub struct LiveNode<H> {
    pub id: SceneNodeId,
    pub handle: H,
    pub fingerprint: u64,
}

/// What one [`SceneArena::apply`] did to the surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    pub added: usize,
    pub replaced: usize,
    pub removed: usize,
    pub kept: usize,
}

impl ApplyStats {
    pub fn changed(&self) -> bool {
        self.added + self.replaced + self.removed > 0
    }
}

#[derive(Debug)]
pub struct SceneArena<H> {
    nodes: SlotMap<SceneNodeKey, LiveNode<H>>,
    by_id: FxHashMap<SceneNodeId, SceneNodeKey>,
}

impl<H> Default for SceneArena<H> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            by_id: FxHashMap::default(),
        }
    }
}

impl<H: Copy> SceneArena<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: SceneNodeId) -> Option<&LiveNode<H>> {
        self.by_id.get(&id).and_then(|key| self.nodes.get(*key))
    }

    pub fn ids(&self) -> impl Iterator<Item = SceneNodeId> + '_ {
        self.nodes.values().map(|n| n.id)
    }

    /// Make the surface show exactly `scene`
    pub fn apply<S>(&mut self, scene: &Scene, surface: &mut S) -> ApplyStats
    where
        S: RenderSurface<Handle = H>,
    {
        let mut stats = ApplyStats::default();
        let mut seen: FxHashSet<SceneNodeId> = FxHashSet::default();

        for node in &scene.nodes {
            seen.insert(node.id);
            let fingerprint = fingerprint(node);

            match self.by_id.get(&node.id).copied() {
                Some(key) => {
                    let Some(live) = self.nodes.get_mut(key) else {
                        continue;
                    };
                    if live.fingerprint == fingerprint {
                        stats.kept += 1;
                        continue;
                    }
                    surface.remove_mesh(live.handle);
                    live.handle = surface.add_mesh(&node.mesh, &node.material);
                    live.fingerprint = fingerprint;
                    stats.replaced += 1;
                }
                None => {
                    let handle = surface.add_mesh(&node.mesh, &node.material);
                    let key = self.nodes.insert(LiveNode {
                        id: node.id,
                        handle,
                        fingerprint,
                    });
                    self.by_id.insert(node.id, key);
                    stats.added += 1;
                }
            }
        }

        let stale: Vec<SceneNodeKey> = self
            .nodes
            .iter()
            .filter(|(_, live)| !seen.contains(&live.id))
            .map(|(key, _)| key)
            .collect();
        for key in stale {
            if let Some(live) = self.nodes.remove(key) {
                surface.remove_mesh(live.handle);
                self.by_id.remove(&live.id);
                stats.removed += 1;
            }
        }

        stats
    }

    /// Remove every node from the surface
    pub fn clear<S>(&mut self, surface: &mut S) -> usize
    where
        S: RenderSurface<Handle = H>,
    {
        let count = self.nodes.len();
        for (_, live) in self.nodes.drain() {
            surface.remove_mesh(live.handle);
        }
        self.by_id.clear();
        count
    }
}

/// Hash of everything a surface is given for `node`
pub fn fingerprint(node: &SceneNode) -> u64 {
    let mut hasher = FxHasher::default();
    for v in node.mesh.positions.iter().chain(&node.mesh.normals) {
        v.to_bits().hash(&mut hasher);
    }
    node.mesh.indices.hash(&mut hasher);
    for c in node.material.color {
        c.to_bits().hash(&mut hasher);
    }
    node.material.opacity.to_bits().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneMaterial;
    use crate::surface::HeadlessSurface;
    use plan3d_geometry::{box_at, Point3, Vector3};

    fn node(id: SceneNodeId, x: f64) -> SceneNode {
        SceneNode {
            id,
            mesh: box_at(Point3::new(x, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0), 0.0),
            material: SceneMaterial::WALL,
        }
    }

    fn scene(nodes: Vec<SceneNode>) -> Scene {
        Scene {
            nodes,
            camera: None,
        }
    }

    #[test]
    fn test_unchanged_nodes_keep_handles() {
        let mut surface = HeadlessSurface::new();
        let mut arena = SceneArena::new();

        let first = scene(vec![node(SceneNodeId::Walls, 0.0), node(SceneNodeId::Door(0), 5.0)]);
        let stats = arena.apply(&first, &mut surface);
        assert_eq!(stats.added, 2);
        let handle = arena.get(SceneNodeId::Walls).unwrap().handle;

        let second = scene(vec![node(SceneNodeId::Walls, 0.0), node(SceneNodeId::Door(0), 6.0)]);
        let stats = arena.apply(&second, &mut surface);
        assert_eq!(stats, ApplyStats { added: 0, replaced: 1, removed: 0, kept: 1 });
        assert_eq!(arena.get(SceneNodeId::Walls).unwrap().handle, handle);
        assert_eq!(surface.live_count(), 2);
    }

    #[test]
    fn test_missing_nodes_are_removed() {
        let mut surface = HeadlessSurface::new();
        let mut arena = SceneArena::new();
        arena.apply(
            &scene(vec![node(SceneNodeId::Window(0), 0.0), node(SceneNodeId::Window(1), 2.0)]),
            &mut surface,
        );
        let stats = arena.apply(&scene(vec![node(SceneNodeId::Window(1), 2.0)]), &mut surface);
        assert_eq!(stats.removed, 1);
        assert!(arena.get(SceneNodeId::Window(0)).is_none());
        assert_eq!(surface.live_count(), 1);

        assert_eq!(arena.clear(&mut surface), 1);
        assert_eq!(surface.live_count(), 0);
        assert_eq!(surface.added, surface.removed);
    }
}
