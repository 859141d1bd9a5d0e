// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mounted viewer
//!
//! A [`ViewerBinding`] borrows a render surface for as long as the viewer is
//! mounted. Everything it puts on the surface comes off again when it is
//! unmounted or dropped, and the render loop stops with it.

use crate::arena::{ApplyStats, SceneArena};
use crate::config::ViewerConfig;
use crate::scene::{synthesize, SceneInput};
use crate::surface::RenderSurface;
use plan3d_geometry::Aabb;
use tracing::{debug, info};

pub struct ViewerBinding<'s, S: RenderSurface> {
    surface: &'s mut S,
    arena: SceneArena<S::Handle>,
    config: ViewerConfig,
    last_input: Option<SceneInput>,
    fitted_bounds: Option<Aabb>,
    mounted: bool,
}

impl<'s, S: RenderSurface> ViewerBinding<'s, S> {
    /// Take over `surface` and start its render loop
    pub fn mount(surface: &'s mut S, config: ViewerConfig) -> Self {
        surface.start_render_loop();
        info!("viewer mounted");
        Self {
            surface,
            arena: SceneArena::new(),
            config,
            last_input: None,
            fitted_bounds: None,
            mounted: true,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn arena(&self) -> &SceneArena<S::Handle> {
        &self.arena
    }

    /// Bring the surface in line with `input`
    ///
    /// Returns `None` when `input` equals the previous one and nothing was
    /// rebuilt. The camera is refit only when the geometry bounds moved by
    /// more than the configured tolerance.
    pub fn update(&mut self, input: &SceneInput) -> Option<ApplyStats> {
        if !self.mounted || self.last_input.as_ref() == Some(input) {
            return None;
        }

        let scene = synthesize(input, &self.config);
        let stats = self.arena.apply(&scene, &mut *self.surface);
        debug!(
            added = stats.added,
            replaced = stats.replaced,
            removed = stats.removed,
            kept = stats.kept,
            "scene applied"
        );

        let bounds = scene.bounds();
        let moved = match (bounds, self.fitted_bounds) {
            (Some(new), Some(old)) => new.differs_from(&old, self.config.refit_tolerance),
            (Some(_), None) => true,
            (None, _) => false,
        };
        if moved {
            if let Some(camera) = scene.camera {
                self.surface.set_camera(&camera);
                debug!(distance = camera.distance, "camera refit");
            }
            self.fitted_bounds = bounds;
        }

        self.last_input = Some(input.clone());
        Some(stats)
    }

    /// Draw one frame; called by the host's frame clock
    pub fn frame(&mut self) {
        if self.mounted {
            self.surface.render_frame();
        }
    }

    /// Remove every mesh and stop the render loop
    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.mounted {
            return;
        }
        let removed = self.arena.clear(&mut *self.surface);
        self.surface.stop_render_loop();
        self.mounted = false;
        self.last_input = None;
        self.fitted_bounds = None;
        info!(removed, "viewer unmounted");
    }
}

impl<S: RenderSurface> Drop for ViewerBinding<'_, S> {
    fn drop(&mut self) {
        self.release();
    }
}
