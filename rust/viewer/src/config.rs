// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use plan3d_geometry::camera::DEFAULT_FIT_MARGIN;

/// Viewer tunables
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Multiplier from model units (centimetres or pixels) to scene units
    pub scene_scale: f64,
    /// Vertical field of view of the auto-fit camera, degrees
    pub field_of_view_deg: f64,
    /// Extra distance factor on top of the exact fit
    pub fit_margin: f64,
    /// Bounds must move by more than this, in scene units, to refit
    pub refit_tolerance: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scene_scale: 0.01,
            field_of_view_deg: 45.0,
            fit_margin: DEFAULT_FIT_MARGIN,
            refit_tolerance: 1e-3,
        }
    }
}
