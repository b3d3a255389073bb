// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OAM Model - Shared types for airspace tessellation
//!
//! This crate defines the records that cross the boundary between the
//! tessellation core and its collaborators. The document parser produces
//! [`AirspaceRecord`]s, the geometry crate turns them into
//! [`AirspaceMeshData`], and the renderer consumes those.
//!
//! # Contents
//!
//! - [`AirspaceRecord`] - Input record: boundary ring and altitude limits
//! - [`AirspaceMeshData`] - Output record: flat position/index buffers
//! - [`VerticalLimit`] - AIXM-style vertical limits with unit conversion
//! - [`AirspaceType`] - Airspace classification and display colour
//! - [`TessellationOptions`] - Tolerances and switches for the tessellator
//!
//! # Example
//!
//! ```ignore
//! use oam_model::{AirspaceRecord, VerticalLimit, TessellationOptions};
//!
//! let options = TessellationOptions::default();
//! let lower = VerticalLimit::parse("GND", "FT", "SFC")?;
//! let upper = VerticalLimit::parse("65", "FL", "STD")?;
//! let record = AirspaceRecord::from_limits("LHR1", boundary, &lower, &upper, &options);
//! ```

pub mod error;
pub mod geometry;
pub mod limits;
pub mod record;
pub mod types;

// Re-export all public types
pub use error::*;
pub use geometry::*;
pub use limits::*;
pub use record::*;
pub use types::*;
