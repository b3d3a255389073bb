// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Side wall construction
//!
//! Two triangles per boundary segment, closing segment included:
//!
//! ```text
//!    A        B       E
//!    +--------+-------+
//!    |      / |      /|    triangles:  A C B
//!    |     /  |     / |                B C D
//!    |    /   |    /  |
//!    |   /    |   /   |
//!    |  /     |  /    |
//!    | /      | /     |
//!    +--------+-------+
//!    C        D       F
//! ```
//!
//! With the ring counter-clockwise from above this winding makes every wall
//! triangle face outwards.

use crate::Point3;

/// Vertical skirt around a ring
///
/// Positions hold the upper ring followed by the lower ring, so vertex `i`
/// sits directly above vertex `n + i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallMesh {
    pub positions: Vec<Point3<f64>>,
    pub indices: Vec<u32>,
}

impl WallMesh {
    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when no triangles were emitted
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Build the wall between an upper and a lower ring
///
/// `upper[i]` and `lower[i]` must be the same boundary vertex at the two
/// altitudes. Rings shorter than 2 points emit nothing.
pub fn build_wall(upper: &[Point3<f64>], lower: &[Point3<f64>]) -> WallMesh {
    debug_assert_eq!(upper.len(), lower.len());
    let n = upper.len().min(lower.len());
    if n < 2 {
        return WallMesh::default();
    }

    let mut positions = Vec::with_capacity(n * 2);
    positions.extend_from_slice(&upper[..n]);
    positions.extend_from_slice(&lower[..n]);

    let mut indices = Vec::with_capacity(n * 6);
    let n32 = n as u32;
    for i in 0..n32 {
        let j = (i + 1) % n32;

        let a = i;
        let b = j;
        let c = n32 + i;
        let d = n32 + j;

        indices.extend_from_slice(&[a, c, b]);
        indices.extend_from_slice(&[b, c, d]);
    }

    WallMesh { positions, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector3;
    use approx::assert_relative_eq;

    fn square(height: f64) -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, height),
            Point3::new(1.0, 0.0, height),
            Point3::new(1.0, 1.0, height),
            Point3::new(0.0, 1.0, height),
        ]
    }

    fn normal(mesh: &WallMesh, tri: &[u32]) -> Vector3<f64> {
        let a = mesh.positions[tri[0] as usize];
        let b = mesh.positions[tri[1] as usize];
        let c = mesh.positions[tri[2] as usize];
        (b - a).cross(&(c - a))
    }

    #[test]
    fn test_two_triangles_per_segment() {
        for n in 3..9 {
            let upper: Vec<_> = (0..n)
                .map(|i| {
                    let t = std::f64::consts::TAU * i as f64 / n as f64;
                    Point3::new(t.cos(), t.sin(), 10.0)
                })
                .collect();
            let lower: Vec<_> = upper.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect();

            let wall = build_wall(&upper, &lower);
            assert_eq!(wall.triangle_count(), 2 * n);
            assert_eq!(wall.indices.len(), 6 * n);
            assert_eq!(wall.positions.len(), 2 * n);
        }
    }

    #[test]
    fn test_closing_segment_is_present() {
        let wall = build_wall(&square(10.0), &square(0.0));
        let n = 4u32;
        let last = &wall.indices[wall.indices.len() - 6..];

        // A C B and B C D for the segment from vertex n-1 back to vertex 0
        assert_eq!(last, &[n - 1, 2 * n - 1, 0, 0, 2 * n - 1, n]);
    }

    #[test]
    fn test_exact_triangle_order() {
        let wall = build_wall(&square(10.0), &square(0.0));
        assert_eq!(&wall.indices[..6], &[0, 4, 1, 1, 4, 5]);
    }

    #[test]
    fn test_normals_point_outwards() {
        let wall = build_wall(&square(10.0), &square(0.0));
        let center = Point3::new(0.5, 0.5, 5.0);

        for tri in wall.indices.chunks_exact(3) {
            let n = normal(&wall, tri);
            let a = wall.positions[tri[0] as usize];
            assert!(n.dot(&(a - center)) > 0.0);
            assert_relative_eq!(n.z, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_height_wall_has_no_area() {
        let wall = build_wall(&square(5.0), &square(5.0));
        assert_eq!(wall.triangle_count(), 8);
        for tri in wall.indices.chunks_exact(3) {
            assert_relative_eq!(normal(&wall, tri).norm(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_short_rings_emit_nothing() {
        assert!(build_wall(&[], &[]).is_empty());
        let p = [Point3::new(0.0, 0.0, 1.0)];
        let q = [Point3::new(0.0, 0.0, 0.0)];
        assert!(build_wall(&p, &q).is_empty());
    }
}
