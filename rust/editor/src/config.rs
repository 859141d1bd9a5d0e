// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use plan3d_core::Point2D;

/// Tunables of the annotation editor
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Side of the square vertex handle, in image pixels
    pub handle_size: f64,
    /// Length of a freshly created door or window segment
    pub default_segment_length: f64,
    /// Half the side of a freshly created wall square
    pub default_square_half_size: f64,
    /// Where new shapes go while the image size is unknown
    pub fallback_center: Point2D,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            handle_size: 20.0,
            default_segment_length: 50.0,
            default_square_half_size: 50.0,
            fallback_center: Point2D::new(100.0, 100.0),
        }
    }
}

impl EditorConfig {
    /// Half the handle side; a vertex is hit strictly inside this distance
    #[inline]
    pub fn hit_radius(&self) -> f64 {
        self.handle_size / 2.0
    }
}
