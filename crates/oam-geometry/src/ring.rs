// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary ring normalization
//!
//! GIS formats usually close a polygon by repeating its first point and do
//! not agree on winding order. [`BoundaryRing`] strips the closing point,
//! drops consecutive duplicates, unwraps longitudes across the antimeridian
//! and fixes the winding to counter-clockwise seen from above.

use crate::{Error, FrameProjection, Point3, Result};
use oam_model::DistanceUnit;

/// Geographic position in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    /// Create from radians
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Create from degrees
    pub fn from_degrees(longitude: f64, latitude: f64) -> Self {
        Self::new(longitude.to_radians(), latitude.to_radians())
    }
}

/// Normalized, implicitly closed polygon boundary
///
/// Invariants: at least 3 points, no two consecutive points (including
/// last/first) within the normalization epsilon, non-negative signed area.
/// Longitudes are continuous and may leave [-180°, 180°] for rings that
/// cross the antimeridian.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryRing {
    points: Vec<GeoPoint>,
    /// Index of the input coordinate each point came from
    sources: Vec<usize>,
}

impl BoundaryRing {
    /// Normalize `[longitude, latitude]` pairs given in degrees
    ///
    /// `epsilon` is the coordinate distance (degrees) under which two points
    /// are considered equal.
    pub fn from_degrees(coords: &[[f64; 2]], epsilon: f64) -> Result<Self> {
        let mut kept: Vec<[f64; 2]> = Vec::with_capacity(coords.len());
        let mut sources = Vec::with_capacity(coords.len());

        for (index, &[lon, lat]) in coords.iter().enumerate() {
            if !lon.is_finite() || !lat.is_finite() {
                return Err(Error::invalid_geometry(format!(
                    "non-finite coordinate at index {}",
                    index
                )));
            }
            if lat.abs() > 90.0 {
                return Err(Error::invalid_geometry(format!(
                    "latitude {} out of range at index {}",
                    lat, index
                )));
            }

            // Keep longitudes continuous relative to the previous point
            let lon = match kept.last() {
                Some(prev) => prev[0] + wrap_degrees(lon - prev[0]),
                None => lon,
            };
            let point = [lon, lat];

            if let Some(prev) = kept.last() {
                if same_point(prev, &point, epsilon) {
                    continue;
                }
            }
            kept.push(point);
            sources.push(index);
        }

        // Drop the closing duplicate(s)
        while kept.len() > 1 && same_point(&kept[0], &kept[kept.len() - 1], epsilon) {
            kept.pop();
            sources.pop();
        }

        if kept.len() < 3 {
            return Err(Error::invalid_geometry(format!(
                "ring has {} distinct points, need at least 3",
                kept.len()
            )));
        }

        // Clockwise: reverse everything after the first point so the start
        // vertex stays put
        if signed_area(&kept) < 0.0 {
            kept[1..].reverse();
            sources[1..].reverse();
        }

        let points = kept
            .iter()
            .map(|&[lon, lat]| GeoPoint::from_degrees(lon, lat))
            .collect();

        Ok(Self { points, sources })
    }

    /// Normalize a flat `lon, lat, lon, lat, ...` sequence in degrees
    pub fn from_flat_degrees(flat: &[f64], epsilon: f64) -> Result<Self> {
        if flat.len() % 2 != 0 {
            return Err(Error::invalid_geometry(format!(
                "odd number of coordinates ({})",
                flat.len()
            )));
        }
        let coords: Vec<[f64; 2]> = flat.chunks_exact(2).map(|c| [c[0], c[1]]).collect();
        Self::from_degrees(&coords, epsilon)
    }

    /// Approximate a circular boundary
    ///
    /// `center` is `[longitude, latitude]` in degrees. One nautical mile is
    /// taken as one arc minute of latitude; the longitude radius is widened
    /// by 1 / cos(latitude).
    pub fn circle(center: [f64; 2], radius: f64, unit: DistanceUnit, segments: usize) -> Result<Self> {
        if segments < 3 {
            return Err(Error::invalid_geometry(format!(
                "circle needs at least 3 segments, got {}",
                segments
            )));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::invalid_geometry(format!("invalid circle radius {}", radius)));
        }

        let radius_lat = unit.to_nautical_miles(radius) / 60.0;
        let cos_lat = center[1].to_radians().cos();
        if cos_lat < 1e-9 {
            return Err(Error::invalid_geometry("circle centered on a pole"));
        }
        let radius_lon = radius_lat / cos_lat;

        let coords: Vec<[f64; 2]> = (0..segments)
            .map(|i| {
                let theta = std::f64::consts::TAU * (i as f64) / (segments as f64);
                [
                    center[0] + radius_lon * theta.cos(),
                    center[1] + radius_lat * theta.sin(),
                ]
            })
            .collect();

        Self::from_degrees(&coords, 0.0)
    }

    /// Rectangular boundary from a longitude/latitude extent in degrees
    pub fn from_extent(west: f64, south: f64, east: f64, north: f64) -> Result<Self> {
        Self::from_degrees(
            &[[west, south], [east, south], [east, north], [west, north]],
            0.0,
        )
    }

    /// Number of boundary points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed ring
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Boundary points in counter-clockwise order
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Input index of each boundary point
    pub fn sources(&self) -> &[usize] {
        &self.sources
    }

    /// Project every boundary point at a per-vertex height
    pub fn project<P, H>(&self, projection: &P, height_at: H) -> Vec<Point3<f64>>
    where
        P: FrameProjection + ?Sized,
        H: Fn(usize) -> f64,
    {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| projection.project(p.longitude, p.latitude, height_at(i)))
            .collect()
    }
}

/// Wrap a longitude difference into [-180, 180)
#[inline]
fn wrap_degrees(delta: f64) -> f64 {
    (delta + 180.0).rem_euclid(360.0) - 180.0
}

#[inline]
fn same_point(a: &[f64; 2], b: &[f64; 2], epsilon: f64) -> bool {
    (a[0] - b[0]).abs() <= epsilon && (a[1] - b[1]).abs() <= epsilon
}

/// Shoelace signed area; positive for counter-clockwise rings
fn signed_area(points: &[[f64; 2]]) -> f64 {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        area += p[0] * q[1] - q[0] * p[1];
    }
    area * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn degrees(ring: &BoundaryRing) -> Vec<[f64; 2]> {
        ring.points()
            .iter()
            .map(|p| [p.longitude.to_degrees(), p.latitude.to_degrees()])
            .collect()
    }

    #[test]
    fn test_strips_closing_point() {
        let ring = BoundaryRing::from_degrees(
            &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]],
            1e-9,
        )
        .unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.sources(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_open_ring_is_kept() {
        let ring =
            BoundaryRing::from_degrees(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]], 1e-9)
                .unwrap();
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_drops_near_duplicates() {
        let ring = BoundaryRing::from_degrees(
            &[[0.0, 0.0], [1.0, 0.0], [1.0 + 1e-12, 0.0], [1.0, 1.0], [0.0, 1e-12]],
            1e-9,
        )
        .unwrap();
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.sources(), &[0, 1, 3]);
    }

    #[test]
    fn test_clockwise_is_reversed_keeping_first_point() {
        let ring =
            BoundaryRing::from_degrees(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]], 1e-9)
                .unwrap();
        let pts = degrees(&ring);
        assert_relative_eq!(pts[0][0], 0.0);
        assert_relative_eq!(pts[1][0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(pts[1][1], 0.0, epsilon = 1e-12);
        assert_eq!(ring.sources(), &[0, 3, 2, 1]);
        assert!(signed_area(&pts) > 0.0);
    }

    #[test]
    fn test_two_distinct_points_is_invalid() {
        let err = BoundaryRing::from_degrees(&[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]], 1e-9)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry(_)));
    }

    #[test]
    fn test_rejects_bad_coordinates() {
        assert!(matches!(
            BoundaryRing::from_degrees(&[[0.0, 0.0], [f64::NAN, 0.0], [1.0, 1.0]], 1e-9),
            Err(Error::InvalidGeometry(_))
        ));
        assert!(matches!(
            BoundaryRing::from_degrees(&[[0.0, 0.0], [1.0, 91.0], [1.0, 1.0]], 1e-9),
            Err(Error::InvalidGeometry(_))
        ));
        assert!(matches!(
            BoundaryRing::from_flat_degrees(&[0.0, 0.0, 1.0], 1e-9),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_antimeridian_is_unwrapped() {
        let ring = BoundaryRing::from_degrees(
            &[[179.5, 0.0], [-179.5, 0.0], [-179.5, 1.0], [179.5, 1.0]],
            1e-9,
        )
        .unwrap();
        let pts = degrees(&ring);
        assert_relative_eq!(pts[1][0], 180.5, epsilon = 1e-9);
        assert_relative_eq!(pts[2][0], 180.5, epsilon = 1e-9);
        assert_relative_eq!(pts[3][0], 179.5, epsilon = 1e-9);
    }

    #[test]
    fn test_circle() {
        let ring = BoundaryRing::circle([19.0, 60.0], 6.0, DistanceUnit::NauticalMiles, 36).unwrap();
        assert_eq!(ring.len(), 36);

        let pts = degrees(&ring);
        // 6 NM = 0.1 degree of latitude, 0.2 degree of longitude at 60N
        assert_relative_eq!(pts[0][0], 19.2, epsilon = 1e-9);
        assert_relative_eq!(pts[9][1], 60.1, epsilon = 1e-9);
        assert!(signed_area(&pts) > 0.0);

        assert!(BoundaryRing::circle([0.0, 0.0], 1.0, DistanceUnit::Meters, 2).is_err());
        assert!(BoundaryRing::circle([0.0, 0.0], -1.0, DistanceUnit::Meters, 12).is_err());
    }

    #[test]
    fn test_extent() {
        let ring = BoundaryRing::from_extent(18.93, 47.52, 18.96, 47.53).unwrap();
        assert_eq!(ring.len(), 4);
        assert!(signed_area(&degrees(&ring)) > 0.0);
    }
}
