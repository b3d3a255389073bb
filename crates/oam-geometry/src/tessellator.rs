// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Airspace volume tessellation
//!
//! A volume is a boundary ring between two altitudes. It becomes one closed
//! mesh: an upper cap facing up, a lower cap facing down and a wall joining
//! them. The cap topology is computed once and reused for both altitudes.

use crate::{
    assemble_mesh, build_wall, triangulate_cap, BoundaryRing, Ellipsoid, Error, FrameProjection,
    MeshPart, Result, TriangleMesh,
};
use oam_model::{AirspaceMeshData, AirspaceRecord, DistanceUnit, TessellationOptions};

/// Ground heights sampled along the boundary
///
/// `heights` is indexed by input boundary point, so it stays valid however
/// the ring was normalized. The flags say which limit is measured from the
/// surface and therefore gets the ground height added.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainOffsets {
    pub heights: Vec<f64>,
    pub lower: bool,
    pub upper: bool,
}

impl TerrainOffsets {
    pub fn new(heights: Vec<f64>, lower: bool, upper: bool) -> Self {
        Self {
            heights,
            lower,
            upper,
        }
    }
}

/// Boundary ring with a floor and a ceiling in meters
#[derive(Debug, Clone, PartialEq)]
pub struct AirspaceVolume {
    boundary: BoundaryRing,
    lower_altitude: f64,
    upper_altitude: f64,
    terrain: Option<TerrainOffsets>,
}

impl AirspaceVolume {
    /// Create a volume; the ceiling may equal but not undercut the floor
    pub fn new(boundary: BoundaryRing, lower_altitude: f64, upper_altitude: f64) -> Result<Self> {
        if !lower_altitude.is_finite()
            || !upper_altitude.is_finite()
            || upper_altitude < lower_altitude
        {
            return Err(Error::invalid_limits(lower_altitude, upper_altitude));
        }

        Ok(Self {
            boundary,
            lower_altitude,
            upper_altitude,
            terrain: None,
        })
    }

    /// Attach terrain offsets
    ///
    /// Every boundary point must have a finite height.
    pub fn with_terrain(mut self, terrain: TerrainOffsets) -> Result<Self> {
        let needed = self.boundary.sources().iter().max().map_or(0, |&i| i + 1);
        if terrain.heights.len() < needed {
            return Err(Error::invalid_geometry(format!(
                "{} terrain heights for a boundary of {} points",
                terrain.heights.len(),
                needed
            )));
        }
        if let Some(i) = self
            .boundary
            .sources()
            .iter()
            .copied()
            .find(|&i| !terrain.heights[i].is_finite())
        {
            return Err(Error::invalid_geometry(format!(
                "non-finite terrain height at point {}",
                i
            )));
        }

        self.terrain = Some(terrain);
        Ok(self)
    }

    /// Build a volume from an input record
    ///
    /// A surface-referenced limit without terrain heights is taken as
    /// referenced to mean sea level.
    pub fn from_record(record: &AirspaceRecord, options: &TessellationOptions) -> Result<Self> {
        let boundary = BoundaryRing::from_degrees(&record.boundary, options.ring_epsilon)?;
        let volume = Self::new(
            boundary,
            record.lower_altitude_meters,
            record.upper_altitude_meters,
        )?;

        if !record.needs_terrain() {
            return Ok(volume);
        }

        match &record.terrain_heights {
            Some(heights) => volume.with_terrain(TerrainOffsets::new(
                heights.clone(),
                record.lower_reference.is_ground_relative(),
                record.upper_reference.is_ground_relative(),
            )),
            None => {
                log::debug!("{}: surface-referenced limit without terrain heights", record.id);
                Ok(volume)
            }
        }
    }

    pub fn boundary(&self) -> &BoundaryRing {
        &self.boundary
    }

    pub fn lower_altitude(&self) -> f64 {
        self.lower_altitude
    }

    pub fn upper_altitude(&self) -> f64 {
        self.upper_altitude
    }

    pub fn terrain(&self) -> Option<&TerrainOffsets> {
        self.terrain.as_ref()
    }

    /// Floor height at ring vertex `i`
    pub fn lower_height(&self, i: usize) -> f64 {
        match &self.terrain {
            Some(t) if t.lower => self.lower_altitude + self.ground_height(t, i),
            _ => self.lower_altitude,
        }
    }

    /// Ceiling height at ring vertex `i`, never below the floor
    pub fn upper_height(&self, i: usize) -> f64 {
        let upper = match &self.terrain {
            Some(t) if t.upper => self.upper_altitude + self.ground_height(t, i),
            _ => self.upper_altitude,
        };
        upper.max(self.lower_height(i))
    }

    #[inline]
    fn ground_height(&self, terrain: &TerrainOffsets, i: usize) -> f64 {
        self.boundary
            .sources()
            .get(i)
            .and_then(|&source| terrain.heights.get(source))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Turns airspace volumes into closed triangle meshes
///
/// Holds the projection into the renderer's frame and the tessellation
/// options. Stateless otherwise, so one instance can serve many threads.
#[derive(Debug, Clone)]
pub struct AirspaceTessellator<P = Ellipsoid> {
    projection: P,
    options: TessellationOptions,
}

impl AirspaceTessellator<Ellipsoid> {
    /// Tessellator emitting WGS84 Earth-centered coordinates
    pub fn wgs84() -> Self {
        Self::new(Ellipsoid::WGS84)
    }
}

impl Default for AirspaceTessellator<Ellipsoid> {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl<P: FrameProjection> AirspaceTessellator<P> {
    /// Create a tessellator with default options
    pub fn new(projection: P) -> Self {
        Self {
            projection,
            options: TessellationOptions::default(),
        }
    }

    /// Replace the options
    pub fn with_options(mut self, options: TessellationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &TessellationOptions {
        &self.options
    }

    pub fn projection(&self) -> &P {
        &self.projection
    }

    /// Tessellate one volume
    ///
    /// Vertex layout without deduplication: upper cap, lower cap, then the
    /// wall (upper ring followed by lower ring).
    pub fn tessellate(&self, volume: &AirspaceVolume) -> Result<TriangleMesh> {
        let ring = volume.boundary();
        let cap = triangulate_cap(ring, self.options.collinear_tolerance)?;

        let upper = ring.project(&self.projection, |i| volume.upper_height(i));
        let lower = ring.project(&self.projection, |i| volume.lower_height(i));
        let wall = build_wall(&upper, &lower);

        let upper_cap = cap.upper_cap();
        let lower_cap = cap.lower_cap();
        let mesh = assemble_mesh(
            &[
                MeshPart::new("upper cap", &upper, &upper_cap),
                MeshPart::new("lower cap", &lower, &lower_cap),
                MeshPart::new("wall", &wall.positions, &wall.indices),
            ],
            self.options.deduplicate_vertices,
        )?;

        log::debug!(
            "tessellated ring of {} points: {} cap + {} wall triangles, {} vertices",
            ring.len(),
            cap.triangle_count(),
            wall.triangle_count(),
            mesh.vertex_count()
        );

        Ok(mesh)
    }

    /// Tessellate an input record into the renderer's output record
    pub fn tessellate_record(&self, record: &AirspaceRecord) -> Result<AirspaceMeshData> {
        let volume = AirspaceVolume::from_record(record, &self.options)?;
        let mesh = self.tessellate(&volume)?;
        Ok(mesh.to_mesh_data(record.id.clone(), record.color()))
    }

    /// Tessellate a longitude/latitude box (degrees)
    pub fn tessellate_extent(
        &self,
        west: f64,
        south: f64,
        east: f64,
        north: f64,
        lower_altitude: f64,
        upper_altitude: f64,
    ) -> Result<TriangleMesh> {
        let ring = BoundaryRing::from_extent(west, south, east, north)?;
        self.tessellate(&AirspaceVolume::new(ring, lower_altitude, upper_altitude)?)
    }

    /// Tessellate a circular airspace around `center` (`[lon, lat]` degrees)
    pub fn tessellate_circle(
        &self,
        center: [f64; 2],
        radius: f64,
        unit: DistanceUnit,
        lower_altitude: f64,
        upper_altitude: f64,
    ) -> Result<TriangleMesh> {
        let ring = BoundaryRing::circle(center, radius, unit, self.options.circle_segments)?;
        self.tessellate(&AirspaceVolume::new(ring, lower_altitude, upper_altitude)?)
    }
}
