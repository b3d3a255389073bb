// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cap triangulation
//!
//! Caps are triangulated once, in a local 2D projection of the boundary
//! ring. The resulting topology is then elevated to the upper and the lower
//! altitude, so it never depends on height.

use crate::{BoundaryRing, Error, Point2, Result};

/// Check if a polygon is convex (all cross products have same sign)
#[inline]
fn is_convex(points: &[Point2<f64>]) -> bool {
    if points.len() < 3 {
        return false;
    }

    let n = points.len();
    let mut sign = 0i8;

    for i in 0..n {
        let p0 = &points[i];
        let p1 = &points[(i + 1) % n];
        let p2 = &points[(i + 2) % n];

        let cross = (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x);

        if cross.abs() > 1e-14 {
            let current_sign = if cross > 0.0 { 1i8 } else { -1i8 };
            if sign == 0 {
                sign = current_sign;
            } else if sign != current_sign {
                return false;
            }
        }
    }

    true
}

/// Simple fan triangulation for convex polygons
#[inline]
fn fan_triangulate(n: usize) -> Vec<usize> {
    let mut indices = Vec::with_capacity((n - 2) * 3);
    for i in 1..n - 1 {
        indices.push(0);
        indices.push(i);
        indices.push(i + 1);
    }
    indices
}

/// Triangulate a simple polygon (no holes)
///
/// Returns triangle indices into the input points. Winding of the output
/// triangles is whatever the ear-clipper produces; callers that care fix it
/// afterwards.
#[inline]
pub fn triangulate_polygon(points: &[Point2<f64>]) -> Result<Vec<usize>> {
    let n = points.len();

    if n < 3 {
        return Err(Error::triangulation(
            "Need at least 3 points to triangulate",
        ));
    }

    // FAST PATH: Triangle - no triangulation needed
    if n == 3 {
        return Ok(vec![0, 1, 2]);
    }

    // FAST PATH: Small convex polygon - use fan triangulation
    if n <= 8 && is_convex(points) {
        return Ok(fan_triangulate(n));
    }

    // Flatten points for earcutr
    let mut vertices = Vec::with_capacity(n * 2);
    for p in points {
        vertices.push(p.x);
        vertices.push(p.y);
    }

    let indices = earcutr::earcut(&vertices, &[], 2)
        .map_err(|e| Error::triangulation(format!("{:?}", e)))?;

    Ok(indices)
}

/// Signed area of a polygon (shoelace); positive when counter-clockwise
pub fn signed_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        let p = &points[i];
        let q = &points[(i + 1) % n];
        area += p.x * q.y - q.x * p.y;
    }
    area * 0.5
}

/// Signed area of a single triangle
#[inline]
pub fn triangle_area(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y))
}

/// Project a ring onto a local tangent plane (radians)
///
/// Equirectangular around the first vertex, with longitude scaled by the
/// cosine of the mean latitude. The scale is positive, so the ring keeps its
/// counter-clockwise orientation.
pub fn project_ring_local(ring: &BoundaryRing) -> Vec<Point2<f64>> {
    let points = ring.points();
    let Some(origin) = points.first() else {
        return Vec::new();
    };

    let mean_lat = points.iter().map(|p| p.latitude).sum::<f64>() / points.len() as f64;
    let scale = mean_lat.cos().max(1e-6);

    points
        .iter()
        .map(|p| {
            Point2::new(
                (p.longitude - origin.longitude) * scale,
                p.latitude - origin.latitude,
            )
        })
        .collect()
}

/// Triangle topology of a cap, as indices into the boundary ring
///
/// Triangles are counter-clockwise seen from above, so used as-is they face
/// up. [`CapTriangulation::lower_cap`] gives the downward-facing copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapTriangulation {
    triangles: Vec<[u32; 3]>,
}

impl CapTriangulation {
    /// Triangles facing up (upper cap)
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True when no triangles were produced
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Flat index list for the upper cap
    pub fn upper_cap(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Flat index list for the lower cap (every triangle reversed)
    pub fn lower_cap(&self) -> Vec<u32> {
        self.triangles
            .iter()
            .flat_map(|&[a, b, c]| [a, c, b])
            .collect()
    }
}

/// Triangulate the cap of a boundary ring
///
/// `tolerance` is relative to the squared extent of the ring: a ring whose
/// area falls below it is degenerate, and triangles below it are sliver
/// artifacts of collinear runs and are dropped.
///
/// The ring must be simple. Self-intersecting rings are not detected and
/// give an unspecified triangulation.
pub fn triangulate_cap(ring: &BoundaryRing, tolerance: f64) -> Result<CapTriangulation> {
    let local = project_ring_local(ring);

    let (min_x, max_x, min_y, max_y) = local.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(min_x, max_x, min_y, max_y), p| {
            (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
        },
    );
    let extent = (max_x - min_x).max(max_y - min_y);
    let min_area = tolerance * extent * extent;

    let area = signed_area(&local);
    if !(extent > 0.0) || area.abs() <= min_area {
        return Err(Error::degenerate_geometry(format!(
            "ring of {} points encloses no area",
            ring.len()
        )));
    }

    let indices = triangulate_polygon(&local)?;

    let mut triangles = Vec::with_capacity(indices.len() / 3);
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let t = triangle_area(&local[a], &local[b], &local[c]);
        if t.abs() <= min_area {
            continue;
        }
        if t > 0.0 {
            triangles.push([a as u32, b as u32, c as u32]);
        } else {
            triangles.push([a as u32, c as u32, b as u32]);
        }
    }

    if triangles.is_empty() {
        return Err(Error::degenerate_geometry(
            "triangulation produced only zero-area triangles",
        ));
    }

    Ok(CapTriangulation { triangles })
}
