// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Indexed triangle meshes and mesh assembly

use crate::{Error, Point3, Result};
use oam_model::{AirspaceMeshData, BoundingSphereData, PrimitiveType};
use rustc_hash::FxHashMap;

/// Sphere enclosing every vertex of a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Point3<f64>,
    pub radius: f64,
}

impl BoundingSphere {
    /// Centroid of the points plus the distance to the farthest one
    ///
    /// Not minimal, but always encloses every point.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3<f64>> + Clone,
    {
        let mut sum = Point3::origin().coords;
        let mut count = 0usize;
        for p in points.clone() {
            sum += p.coords;
            count += 1;
        }
        if count == 0 {
            return Self {
                center: Point3::origin(),
                radius: 0.0,
            };
        }

        let center = Point3::from(sum / count as f64);
        let radius = points
            .into_iter()
            .map(|p| (p - center).norm())
            .fold(0.0, f64::max);

        Self { center, radius }
    }

    /// Whether a point lies inside (with a small absolute slack)
    pub fn contains(&self, point: &Point3<f64>, slack: f64) -> bool {
        (point - self.center).norm() <= self.radius + slack
    }

    /// Convert to the output record type
    pub fn to_data(&self) -> BoundingSphereData {
        BoundingSphereData {
            center: [self.center.x, self.center.y, self.center.z],
            radius: self.radius,
        }
    }
}

/// Triangle mesh with one triangle-list batch
///
/// Invariants: every index is below the vertex count, the index count is a
/// multiple of 3, and `bounding_sphere` encloses all positions.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    positions: Vec<Point3<f64>>,
    indices: Vec<u32>,
    bounding_sphere: BoundingSphere,
}

impl TriangleMesh {
    /// Create a mesh, validating indices and computing the bounding sphere
    pub fn from_parts(positions: Vec<Point3<f64>>, indices: Vec<u32>) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(Error::invalid_geometry(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(Error::invalid_geometry(format!(
                "index {} out of range for {} vertices",
                bad,
                positions.len()
            )));
        }

        let bounding_sphere = BoundingSphere::from_points(positions.iter());
        Ok(Self {
            positions,
            indices,
            bounding_sphere,
        })
    }

    /// Vertex positions
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Triangle indices
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Bounding volume
    pub fn bounding_sphere(&self) -> &BoundingSphere {
        &self.bounding_sphere
    }

    /// Primitive type of the single index batch
    pub fn primitive_type(&self) -> PrimitiveType {
        PrimitiveType::Triangles
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over triangles as vertex positions
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |t| {
            [
                self.positions[t[0] as usize],
                self.positions[t[1] as usize],
                self.positions[t[2] as usize],
            ]
        })
    }

    /// Flat `x, y, z` position buffer
    pub fn flat_positions(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(self.positions.len() * 3);
        for p in &self.positions {
            flat.extend_from_slice(&[p.x, p.y, p.z]);
        }
        flat
    }

    /// Merge vertices with bit-identical positions
    ///
    /// Triangle geometry is unchanged; only the vertex buffer shrinks.
    pub fn deduplicated(&self) -> TriangleMesh {
        let mut lookup: FxHashMap<[u64; 3], u32> = FxHashMap::default();
        let mut positions = Vec::with_capacity(self.positions.len());
        let mut remap = Vec::with_capacity(self.positions.len());

        for p in &self.positions {
            let key = [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
            let index = *lookup.entry(key).or_insert_with(|| {
                positions.push(*p);
                (positions.len() - 1) as u32
            });
            remap.push(index);
        }

        let indices = self.indices.iter().map(|&i| remap[i as usize]).collect();
        let bounding_sphere = BoundingSphere::from_points(positions.iter());

        TriangleMesh {
            positions,
            indices,
            bounding_sphere,
        }
    }

    /// Convert to the output record handed to the renderer
    pub fn to_mesh_data(&self, id: impl Into<String>, color: [f32; 4]) -> AirspaceMeshData {
        AirspaceMeshData {
            id: id.into(),
            positions: self.flat_positions(),
            triangle_indices: self.indices.clone(),
            bounding_sphere: self.bounding_sphere.to_data(),
            primitive_type: self.primitive_type(),
            color,
        }
    }
}

/// One source of geometry for [`assemble_mesh`]
///
/// Indices are local to `positions`.
#[derive(Debug, Clone, Copy)]
pub struct MeshPart<'a> {
    pub name: &'static str,
    pub positions: &'a [Point3<f64>],
    pub indices: &'a [u32],
}

impl<'a> MeshPart<'a> {
    pub fn new(name: &'static str, positions: &'a [Point3<f64>], indices: &'a [u32]) -> Self {
        Self {
            name,
            positions,
            indices,
        }
    }
}

/// Concatenate mesh parts into one indexed mesh
///
/// Each part's indices are rebased onto its offset in the combined vertex
/// buffer. A part without triangles fails the whole mesh with `EmptyMesh`.
pub fn assemble_mesh(parts: &[MeshPart<'_>], deduplicate: bool) -> Result<TriangleMesh> {
    let vertex_total: usize = parts.iter().map(|p| p.positions.len()).sum();
    let index_total: usize = parts.iter().map(|p| p.indices.len()).sum();

    let mut positions = Vec::with_capacity(vertex_total);
    let mut indices = Vec::with_capacity(index_total);

    for part in parts {
        if part.indices.len() < 3 {
            return Err(Error::empty_mesh(format!("{} produced no triangles", part.name)));
        }

        let offset = positions.len() as u32;
        positions.extend_from_slice(part.positions);
        indices.extend(part.indices.iter().map(|&i| i + offset));
    }

    let mesh = TriangleMesh::from_parts(positions, indices)?;
    Ok(if deduplicate { mesh.deduplicated() } else { mesh })
}
