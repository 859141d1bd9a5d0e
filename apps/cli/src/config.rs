// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables.

use plan3d_core::LengthUnit;
use std::path::PathBuf;

/// Default tracing filter when neither `PLAN3D_LOG` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "info,plan3d=debug";

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory generated files are written to.
    pub output_dir: PathBuf,
    /// Unit the apartment parameters are entered in.
    pub unit: LengthUnit,
    /// Wall height in parameter units.
    pub wall_height: f64,
    /// Wall thickness in parameter units.
    pub wall_thickness: f64,
    /// Field of view of the auto-fit camera, in degrees.
    pub fov_deg: f64,
    /// Tracing filter directives.
    pub log_filter: String,
    /// Emit logs as JSON lines instead of plain text.
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            output_dir: lookup("PLAN3D_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            unit: lookup("PLAN3D_UNIT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(LengthUnit::In),
            wall_height: lookup("PLAN3D_WALL_HEIGHT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(100.0),
            wall_thickness: lookup("PLAN3D_WALL_THICKNESS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(8.0),
            fov_deg: lookup("PLAN3D_FOV_DEG")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(45.0),
            log_filter: lookup("PLAN3D_LOG")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.into()),
            log_json: lookup("PLAN3D_LOG_FORMAT")
                .is_some_and(|s| s.trim().eq_ignore_ascii_case("json")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
