// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for airspace record handling

use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while building or decoding airspace records
#[derive(Error, Debug)]
pub enum ModelError {
    /// Vertical limit value could not be interpreted
    #[error("Invalid vertical limit: {0}")]
    InvalidLimit(String),

    /// Unit of measure is not one of FT, FL or M
    #[error("Unknown unit of measure: {0}")]
    UnknownUnit(String),

    /// Altitude reference is not one of SFC, MSL, STD or W84
    #[error("Unknown altitude reference: {0}")]
    UnknownReference(String),

    /// Malformed JSON record or options document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    /// Create an invalid limit error
    pub fn invalid_limit(msg: impl Into<String>) -> Self {
        ModelError::InvalidLimit(msg.into())
    }

    /// Create an unknown unit error
    pub fn unknown_unit(unit: impl Into<String>) -> Self {
        ModelError::UnknownUnit(unit.into())
    }

    /// Create an unknown reference error
    pub fn unknown_reference(reference: impl Into<String>) -> Self {
        ModelError::UnknownReference(reference.into())
    }
}
