// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tessellated airspace output and tessellation options

use crate::Result;
use serde::{Deserialize, Serialize};

/// Primitive type of an index batch
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimitiveType {
    /// Independent triangles, three indices each
    #[default]
    Triangles,
}

/// Bounding sphere in the projection frame
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct BoundingSphereData {
    pub center: [f64; 3],
    pub radius: f64,
}

/// Tessellated airspace, ready for the renderer
///
/// Positions stay in `f64`: ellipsoid-frame coordinates are in the millions
/// of meters and `f32` would cost sub-meter precision.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirspaceMeshData {
    /// Airspace designator
    pub id: String,
    /// Vertex positions (x, y, z triplets)
    pub positions: Vec<f64>,
    /// Triangle indices (triples)
    pub triangle_indices: Vec<u32>,
    /// Bounding volume over all positions
    pub bounding_sphere: BoundingSphereData,
    /// Single batch primitive type
    pub primitive_type: PrimitiveType,
    /// RGBA colour [r, g, b, a] in 0-1 range
    pub color: [f32; 4],
}

impl AirspaceMeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangle_indices.len() / 3
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.triangle_indices.is_empty()
    }

    /// Serialize to a JSON string for the rendering collaborator
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Tessellation options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TessellationOptions {
    /// Distance (degrees) under which two boundary points are the same point
    pub ring_epsilon: f64,
    /// Relative area under which a ring or triangle counts as collinear
    pub collinear_tolerance: f64,
    /// Whether to merge coincident vertices at cap/wall seams
    pub deduplicate_vertices: bool,
    /// Segment count when approximating circular boundaries
    pub circle_segments: usize,
    /// Altitude (meters) used for `UNL` ceilings
    pub unlimited_ceiling_meters: f64,
}

impl Default for TessellationOptions {
    fn default() -> Self {
        Self {
            ring_epsilon: 1e-9,
            collinear_tolerance: 1e-12,
            deduplicate_vertices: false,
            circle_segments: 36,
            // FL660, the usual top of charted airspace
            unlimited_ceiling_meters: 66_000.0 * 0.3048,
        }
    }
}

impl TessellationOptions {
    /// Create options for fast processing (less optimization)
    pub fn fast() -> Self {
        Self {
            deduplicate_vertices: false,
            circle_segments: 24,
            ..Self::default()
        }
    }

    /// Create options for optimized output (smaller buffers, smoother circles)
    pub fn optimized() -> Self {
        Self {
            deduplicate_vertices: true,
            circle_segments: 72,
            ..Self::default()
        }
    }

    /// Load options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_partial_json() {
        let options = TessellationOptions::from_json(r#"{ "deduplicateVertices": true }"#).unwrap();
        assert!(options.deduplicate_vertices);
        assert_eq!(options.circle_segments, 36);
        assert_eq!(options.ring_epsilon, 1e-9);
    }

    #[test]
    fn test_option_presets() {
        assert!(!TessellationOptions::fast().deduplicate_vertices);
        assert!(TessellationOptions::optimized().deduplicate_vertices);
        assert!(TessellationOptions::optimized().circle_segments > TessellationOptions::fast().circle_segments);
    }

    #[test]
    fn test_mesh_data_json_field_names() {
        let mesh = AirspaceMeshData {
            id: "ED-R1".to_string(),
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            triangle_indices: vec![0, 1, 2],
            bounding_sphere: BoundingSphereData {
                center: [0.5, 0.5, 0.0],
                radius: 1.0,
            },
            primitive_type: PrimitiveType::Triangles,
            color: [1.0, 0.0, 0.0, 0.3],
        };

        let json = mesh.to_json().unwrap();
        assert!(json.contains("\"triangleIndices\":[0,1,2]"));
        assert!(json.contains("\"boundingSphere\""));
        assert!(json.contains("\"primitiveType\":\"TRIANGLES\""));
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.is_empty());
    }
}
