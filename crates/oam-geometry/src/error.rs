// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for airspace tessellation
//!
//! Every error describes one volume that could not be built. None of them is
//! fatal to a batch.

use thiserror::Error;

/// Tessellation result type
pub type Result<T> = std::result::Result<T, Error>;

/// Tessellation errors
#[derive(Error, Debug)]
pub enum Error {
    /// Fewer than 3 distinct boundary points, or unusable coordinates
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Zero-area or fully collinear ring
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A sub-stage produced no triangles
    #[error("Empty mesh: {0}")]
    EmptyMesh(String),

    /// Upper limit below lower limit, or non-finite limits
    #[error("Invalid altitude limits: lower {lower} m, upper {upper} m")]
    InvalidLimits { lower: f64, upper: f64 },

    /// Triangulation error
    #[error("Triangulation error: {0}")]
    Triangulation(String),

    /// Record-level error from the model crate
    #[error(transparent)]
    Model(#[from] oam_model::ModelError),
}

impl Error {
    /// Create an invalid geometry error
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Error::InvalidGeometry(msg.into())
    }

    /// Create a degenerate geometry error
    pub fn degenerate_geometry(msg: impl Into<String>) -> Self {
        Error::DegenerateGeometry(msg.into())
    }

    /// Create an empty mesh error
    pub fn empty_mesh(msg: impl Into<String>) -> Self {
        Error::EmptyMesh(msg.into())
    }

    /// Create an invalid limits error
    pub fn invalid_limits(lower: f64, upper: f64) -> Self {
        Error::InvalidLimits { lower, upper }
    }

    /// Create a triangulation error
    pub fn triangulation(msg: impl Into<String>) -> Self {
        Error::Triangulation(msg.into())
    }
}
