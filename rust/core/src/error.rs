// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or converting model data
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown length unit: {0}")]
    UnknownUnit(String),

    #[error("Unknown annotation type: {0}")]
    UnknownKind(String),

    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("Parameter record must be a JSON object")]
    NotARecord,
}
