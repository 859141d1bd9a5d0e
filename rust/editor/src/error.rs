// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for editing sessions
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a [`FloorPlanStore`](crate::FloorPlanStore)
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while saving an editing session
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to save annotations for floor {floor_id}")]
    Store {
        floor_id: String,
        #[source]
        source: StoreError,
    },

    #[error("Editing session for floor {0} is already closed")]
    SessionClosed(String),
}
