// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # OAM Geometry - Airspace Volume Tessellation
//!
//! Turns airspace volumes (a boundary ring between a floor and a ceiling)
//! into closed, GPU-ready triangle meshes.
//!
//! ## Overview
//!
//! - **Ring normalization**: closing point, duplicates, antimeridian, winding
//! - **Cap triangulation**: ear clipping via earcutr, one topology for both caps
//! - **Walls**: two triangles per boundary segment, closing segment included
//! - **Assembly**: one indexed triangle list plus a bounding sphere
//! - **Batches**: many records in parallel via rayon, failures isolated
//!
//! ## Architecture
//!
//! Coordinates reach the renderer's frame through the [`FrameProjection`]
//! trait. [`Ellipsoid`] gives Earth-centered WGS84 coordinates, and any
//! `Fn(lon, lat, height) -> Point3` closure works as well.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use oam_geometry::{AirspaceTessellator, AirspaceRecord};
//!
//! let record = AirspaceRecord::new(
//!     "ED-R 1",
//!     vec![[10.0, 50.0], [10.1, 50.0], [10.1, 50.1], [10.0, 50.1]],
//!     0.0,
//!     1500.0,
//! );
//!
//! let mesh = AirspaceTessellator::wgs84().tessellate_record(&record)?;
//! println!("Generated {} triangles", mesh.triangle_count());
//! ```

pub mod batch;
pub mod error;
pub mod mesh;
pub mod projection;
pub mod ring;
pub mod tessellator;
pub mod triangulation;
pub mod wall;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

// Re-export the model types callers need alongside the tessellator
pub use oam_model::{
    AirspaceMeshData, AirspaceRecord, AirspaceType, DistanceUnit, TessellationOptions,
    VerticalLimit,
};

// Re-export main types
pub use batch::{BatchFailure, BatchOutput};
pub use error::{Error, Result};
pub use mesh::{assemble_mesh, BoundingSphere, MeshPart, TriangleMesh};
pub use projection::{
    Ellipsoid, FrameProjection, PlanarProjection, WGS84_FLATTENING, WGS84_SEMI_MAJOR_AXIS,
};
pub use ring::{BoundaryRing, GeoPoint};
pub use tessellator::{AirspaceTessellator, AirspaceVolume, TerrainOffsets};
pub use triangulation::{triangulate_cap, triangulate_polygon, CapTriangulation};
pub use wall::{build_wall, WallMesh};
