// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Render surface seam
//!
//! A surface owns GPU or scene-graph resources. The viewer only ever adds and
//! removes whole meshes through the handles it gets back.

use crate::scene::SceneMaterial;
use plan3d_geometry::{CameraFit, Mesh};
use slotmap::{new_key_type, SlotMap};
use std::fmt::Debug;

/// Host renderer the viewer drives
pub trait RenderSurface {
    type Handle: Copy + Eq + Debug;

    fn add_mesh(&mut self, mesh: &Mesh, material: &SceneMaterial) -> Self::Handle;

    fn remove_mesh(&mut self, handle: Self::Handle);

    fn set_camera(&mut self, camera: &CameraFit);

    fn start_render_loop(&mut self);

    fn stop_render_loop(&mut self);

    /// Draw one frame from the current camera
    fn render_frame(&mut self);
}

new_key_type! {
    /// Mesh slot of a [`HeadlessSurface`]
    pub struct HeadlessMeshKey;
}

/// Surface that keeps meshes in memory and draws nothing
///
/// Used for exports and tests; its counters show whether every mesh that
/// was added got removed again.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    meshes: SlotMap<HeadlessMeshKey, (Mesh, SceneMaterial)>,
    camera: Option<CameraFit>,
    running: bool,
    pub added: usize,
    pub removed: usize,
    pub camera_updates: usize,
    pub frames: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Meshes currently on the surface
    pub fn live_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn meshes(&self) -> impl Iterator<Item = (&Mesh, &SceneMaterial)> {
        self.meshes.values().map(|(mesh, material)| (mesh, material))
    }

    pub fn camera(&self) -> Option<&CameraFit> {
        self.camera.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl RenderSurface for HeadlessSurface {
    type Handle = HeadlessMeshKey;

    fn add_mesh(&mut self, mesh: &Mesh, material: &SceneMaterial) -> HeadlessMeshKey {
        self.added += 1;
        self.meshes.insert((mesh.clone(), *material))
    }

    fn remove_mesh(&mut self, handle: HeadlessMeshKey) {
        if self.meshes.remove(handle).is_some() {
            self.removed += 1;
        }
    }

    fn set_camera(&mut self, camera: &CameraFit) {
        self.camera_updates += 1;
        self.camera = Some(*camera);
    }

    fn start_render_loop(&mut self) {
        self.running = true;
    }

    fn stop_render_loop(&mut self) {
        self.running = false;
    }

    fn render_frame(&mut self) {
        if self.running {
            self.frames += 1;
        }
    }
}
