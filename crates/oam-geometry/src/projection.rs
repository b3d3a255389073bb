// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geographic projection adapters
//!
//! The tessellator never owns a global ellipsoid. Every entry point takes a
//! [`FrameProjection`] that maps (longitude, latitude, height) to a point in
//! the renderer's Cartesian frame.

use crate::{Point3, Vector3};

/// Geographic to Cartesian transform supplied by the host renderer
///
/// Angles are in radians, heights in meters. Implementations must be pure:
/// the same input always maps to the same point.
pub trait FrameProjection: Send + Sync {
    /// Project a geographic position into the output frame
    fn project(&self, longitude: f64, latitude: f64, height: f64) -> Point3<f64>;

    /// Unit "up" direction at a geographic position
    ///
    /// The default takes the difference between the point at 0 m and at
    /// 1 m, which is exact for any projection that is affine in height.
    fn up(&self, longitude: f64, latitude: f64) -> Vector3<f64> {
        let ground = self.project(longitude, latitude, 0.0);
        let raised = self.project(longitude, latitude, 1.0);
        let up = raised - ground;
        let len = up.norm();
        if len > 1e-12 {
            up / len
        } else {
            Vector3::new(0.0, 0.0, 1.0)
        }
    }
}

impl<F> FrameProjection for F
where
    F: Fn(f64, f64, f64) -> Point3<f64> + Send + Sync,
{
    #[inline]
    fn project(&self, longitude: f64, latitude: f64, height: f64) -> Point3<f64> {
        self(longitude, latitude, height)
    }
}

/// WGS84 semi-major axis (meters)
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 flattening
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// Oblate ellipsoid of revolution, Earth-centered Earth-fixed output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    semi_major: f64,
    semi_minor: f64,
    /// First eccentricity squared
    e2: f64,
}

impl Ellipsoid {
    /// The WGS84 ellipsoid
    pub const WGS84: Ellipsoid = Ellipsoid {
        semi_major: WGS84_SEMI_MAJOR_AXIS,
        semi_minor: WGS84_SEMI_MAJOR_AXIS * (1.0 - WGS84_FLATTENING),
        e2: WGS84_FLATTENING * (2.0 - WGS84_FLATTENING),
    };

    /// Create an ellipsoid from its semi-axes (meters)
    pub fn new(semi_major: f64, semi_minor: f64) -> Self {
        let e2 = 1.0 - (semi_minor * semi_minor) / (semi_major * semi_major);
        Self {
            semi_major,
            semi_minor,
            e2,
        }
    }

    /// Create a sphere
    pub fn sphere(radius: f64) -> Self {
        Self::new(radius, radius)
    }

    /// Semi-major (equatorial) axis in meters
    pub fn semi_major(&self) -> f64 {
        self.semi_major
    }

    /// Semi-minor (polar) axis in meters
    pub fn semi_minor(&self) -> f64 {
        self.semi_minor
    }

    /// Geodetic surface normal
    pub fn geodetic_surface_normal(&self, longitude: f64, latitude: f64) -> Vector3<f64> {
        let cos_lat = latitude.cos();
        Vector3::new(
            cos_lat * longitude.cos(),
            cos_lat * longitude.sin(),
            latitude.sin(),
        )
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

impl FrameProjection for Ellipsoid {
    fn project(&self, longitude: f64, latitude: f64, height: f64) -> Point3<f64> {
        let sin_lat = latitude.sin();
        let cos_lat = latitude.cos();
        let sin_lon = longitude.sin();
        let cos_lon = longitude.cos();

        // Prime vertical radius of curvature
        let n = self.semi_major / (1.0 - self.e2 * sin_lat * sin_lat).sqrt();

        Point3::new(
            (n + height) * cos_lat * cos_lon,
            (n + height) * cos_lat * sin_lon,
            (n * (1.0 - self.e2) + height) * sin_lat,
        )
    }

    fn up(&self, longitude: f64, latitude: f64) -> Vector3<f64> {
        self.geodetic_surface_normal(longitude, latitude)
    }
}

/// Identity projection: x = longitude, y = latitude, z = height
///
/// Angles come out in radians unless `degrees` is set. Useful for planar
/// checks where the curvature of the Earth would only add noise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlanarProjection {
    pub degrees: bool,
}

impl PlanarProjection {
    /// Projection emitting radians
    pub fn radians() -> Self {
        Self { degrees: false }
    }

    /// Projection emitting degrees
    pub fn degrees() -> Self {
        Self { degrees: true }
    }
}

impl FrameProjection for PlanarProjection {
    #[inline]
    fn project(&self, longitude: f64, latitude: f64, height: f64) -> Point3<f64> {
        if self.degrees {
            Point3::new(longitude.to_degrees(), latitude.to_degrees(), height)
        } else {
            Point3::new(longitude, latitude, height)
        }
    }

    fn up(&self, _longitude: f64, _latitude: f64) -> Vector3<f64> {
        Vector3::new(0.0, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_6};

    #[test]
    fn test_wgs84_equator_prime_meridian() {
        let p = Ellipsoid::WGS84.project(0.0, 0.0, 0.0);
        assert_relative_eq!(p.x, WGS84_SEMI_MAJOR_AXIS, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_wgs84_equator_90e() {
        let p = Ellipsoid::WGS84.project(FRAC_PI_2, 0.0, 0.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, WGS84_SEMI_MAJOR_AXIS, epsilon = 1e-6);
    }

    #[test]
    fn test_wgs84_pole_uses_semi_minor_axis() {
        let p = Ellipsoid::WGS84.project(0.0, FRAC_PI_2, 0.0);
        assert_relative_eq!(p.z, Ellipsoid::WGS84.semi_minor(), epsilon = 1e-6);
    }

    #[test]
    fn test_height_moves_along_up() {
        let ellipsoid = Ellipsoid::WGS84;
        let (lon, lat) = (-FRAC_PI_3, FRAC_PI_6);
        let low = ellipsoid.project(lon, lat, 0.0);
        let high = ellipsoid.project(lon, lat, 100.0);

        let delta = high - low;
        assert_relative_eq!(delta.norm(), 100.0, epsilon = 1e-6);
        assert_relative_eq!(delta.normalize().dot(&ellipsoid.up(lon, lat)), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_default_up_matches_surface_normal() {
        let ellipsoid = Ellipsoid::WGS84;
        let closure = move |lon: f64, lat: f64, h: f64| ellipsoid.project(lon, lat, h);
        let up = closure.up(0.3, 0.7);
        assert_relative_eq!(up.dot(&ellipsoid.up(0.3, 0.7)), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sphere() {
        let sphere = Ellipsoid::sphere(1000.0);
        let p = sphere.project(0.4, -0.2, 0.0);
        assert_relative_eq!(p.coords.norm(), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_planar_projection() {
        let p = PlanarProjection::degrees().project(1.0_f64.to_radians(), 2.0_f64.to_radians(), 3.0);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
        assert_eq!(p.z, 3.0);
    }
}
