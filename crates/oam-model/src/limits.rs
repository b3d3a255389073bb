// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertical limits and altitude unit conversion
//!
//! AIXM expresses airspace floors and ceilings as a value, a unit of
//! measure (`FT`, `FL`, `M`) and a datum reference (`SFC`, `MSL`, `STD`).
//! The tessellator only works in meters, so limits are converted here.

use crate::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Meters per international foot
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Feet per flight level
pub const FEET_PER_FLIGHT_LEVEL: f64 = 100.0;

/// Meters per nautical mile
pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

/// Unit of measure for a vertical limit
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum AltitudeUnit {
    #[serde(rename = "FT")]
    Feet,
    #[serde(rename = "FL")]
    FlightLevel,
    #[serde(rename = "M")]
    Meters,
}

impl AltitudeUnit {
    /// Scale factor from this unit to meters
    pub fn meters_per_unit(self) -> f64 {
        match self {
            AltitudeUnit::Feet => METERS_PER_FOOT,
            AltitudeUnit::FlightLevel => FEET_PER_FLIGHT_LEVEL * METERS_PER_FOOT,
            AltitudeUnit::Meters => 1.0,
        }
    }
}

impl FromStr for AltitudeUnit {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FT" => Ok(AltitudeUnit::Feet),
            "FL" => Ok(AltitudeUnit::FlightLevel),
            "M" => Ok(AltitudeUnit::Meters),
            other => Err(ModelError::unknown_unit(other)),
        }
    }
}

/// Unit of a horizontal distance, such as a circular boundary's radius
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[default]
    #[serde(rename = "NM")]
    NauticalMiles,
    #[serde(rename = "M")]
    Meters,
    #[serde(rename = "KM")]
    Kilometers,
}

impl DistanceUnit {
    /// Convert a distance in this unit to nautical miles
    pub fn to_nautical_miles(self, distance: f64) -> f64 {
        match self {
            DistanceUnit::NauticalMiles => distance,
            DistanceUnit::Meters => distance / METERS_PER_NAUTICAL_MILE,
            DistanceUnit::Kilometers => distance * 1000.0 / METERS_PER_NAUTICAL_MILE,
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NM" | "[NMI_I]" => Ok(DistanceUnit::NauticalMiles),
            "M" => Ok(DistanceUnit::Meters),
            "KM" => Ok(DistanceUnit::Kilometers),
            other => Err(ModelError::unknown_unit(other)),
        }
    }
}

/// Datum a vertical limit is measured from
///
/// `STD` (pressure altitude) is treated like `MSL`; the viewer has no
/// atmosphere model to do better.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AltitudeReference {
    /// Above ground level
    Sfc,
    /// Above mean sea level
    #[default]
    Msl,
    /// Standard pressure altitude
    Std,
    /// Above the WGS84 ellipsoid
    W84,
}

impl AltitudeReference {
    /// Whether terrain height must be added to limits with this reference
    pub fn is_ground_relative(self) -> bool {
        self == AltitudeReference::Sfc
    }
}

impl FromStr for AltitudeReference {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SFC" => Ok(AltitudeReference::Sfc),
            "MSL" => Ok(AltitudeReference::Msl),
            "STD" => Ok(AltitudeReference::Std),
            "W84" => Ok(AltitudeReference::W84),
            other => Err(ModelError::unknown_reference(other)),
        }
    }
}

impl fmt::Display for AltitudeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AltitudeReference::Sfc => "SFC",
            AltitudeReference::Msl => "MSL",
            AltitudeReference::Std => "STD",
            AltitudeReference::W84 => "W84",
        };
        f.write_str(s)
    }
}

/// Value part of a vertical limit
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum LimitValue {
    /// `GND`: the terrain surface
    Ground,
    /// `UNL`: no upper bound, drawn at the configured ceiling
    Unlimited,
    /// Numeric value in the limit's unit
    Value(f64),
}

/// An airspace floor or ceiling
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct VerticalLimit {
    pub value: LimitValue,
    pub unit: AltitudeUnit,
    pub reference: AltitudeReference,
}

impl VerticalLimit {
    /// Create a numeric limit
    pub fn new(value: f64, unit: AltitudeUnit, reference: AltitudeReference) -> Self {
        Self {
            value: LimitValue::Value(value),
            unit,
            reference,
        }
    }

    /// The ground surface
    pub fn ground() -> Self {
        Self {
            value: LimitValue::Ground,
            unit: AltitudeUnit::Feet,
            reference: AltitudeReference::Sfc,
        }
    }

    /// No upper bound
    pub fn unlimited() -> Self {
        Self {
            value: LimitValue::Unlimited,
            unit: AltitudeUnit::Feet,
            reference: AltitudeReference::Msl,
        }
    }

    /// Parse the three AIXM fields of a limit
    ///
    /// `value` may be numeric, `GND` or `UNL`. A `GND` value is always
    /// ground-relative regardless of the stated reference.
    pub fn parse(value: &str, uom: &str, reference: &str) -> Result<Self> {
        let unit: AltitudeUnit = uom.parse()?;
        let reference: AltitudeReference = reference.parse()?;

        let value = match value.trim().to_ascii_uppercase().as_str() {
            "GND" | "SFC" => return Ok(Self::ground()),
            "UNL" => LimitValue::Unlimited,
            text => {
                let v: f64 = text
                    .parse()
                    .map_err(|_| ModelError::invalid_limit(format!("'{}' is not a number", text)))?;
                if !v.is_finite() {
                    return Err(ModelError::invalid_limit(format!("'{}' is not finite", text)));
                }
                LimitValue::Value(v)
            }
        };

        Ok(Self {
            value,
            unit,
            reference,
        })
    }

    /// Convert to meters above the limit's datum
    ///
    /// `unlimited_ceiling` (meters) stands in for `UNL`.
    pub fn to_meters(&self, unlimited_ceiling: f64) -> f64 {
        match self.value {
            LimitValue::Ground => 0.0,
            LimitValue::Unlimited => unlimited_ceiling,
            LimitValue::Value(v) => v * self.unit.meters_per_unit(),
        }
    }

    /// Whether terrain height must be added to this limit
    pub fn is_ground_relative(&self) -> bool {
        self.value == LimitValue::Ground || self.reference.is_ground_relative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {a} ~= {b}");
    }

    #[test]
    fn test_feet_and_flight_levels() {
        let ft = VerticalLimit::parse("3500", "FT", "MSL").unwrap();
        assert_close(ft.to_meters(0.0), 1066.8);

        let fl = VerticalLimit::parse("95", "FL", "STD").unwrap();
        assert_close(fl.to_meters(0.0), 95.0 * 100.0 * 0.3048);

        let m = VerticalLimit::parse("250", "m", "w84").unwrap();
        assert_close(m.to_meters(0.0), 250.0);
        assert_eq!(m.reference, AltitudeReference::W84);
    }

    #[test]
    fn test_special_values() {
        let gnd = VerticalLimit::parse("GND", "FT", "MSL").unwrap();
        assert_eq!(gnd.to_meters(1.0e4), 0.0);
        assert!(gnd.is_ground_relative());

        let unl = VerticalLimit::parse("UNL", "FL", "STD").unwrap();
        assert_eq!(unl.to_meters(20_000.0), 20_000.0);
        assert!(!unl.is_ground_relative());
    }

    #[test]
    fn test_sfc_reference_is_ground_relative() {
        let limit = VerticalLimit::parse("1000", "FT", "SFC").unwrap();
        assert!(limit.is_ground_relative());
        assert_close(limit.to_meters(0.0), 304.8);
    }

    #[test]
    fn test_distance_units() {
        assert_close(DistanceUnit::Meters.to_nautical_miles(1852.0), 1.0);
        assert_close(DistanceUnit::Kilometers.to_nautical_miles(3.704), 2.0);
        assert_eq!("nm".parse::<DistanceUnit>().unwrap(), DistanceUnit::NauticalMiles);
        assert!("FT".parse::<DistanceUnit>().is_err());
    }

    #[test]
    fn test_rejects_bad_fields() {
        assert!(matches!(
            VerticalLimit::parse("12", "NM", "MSL"),
            Err(ModelError::UnknownUnit(_))
        ));
        assert!(matches!(
            VerticalLimit::parse("12", "FT", "AGL"),
            Err(ModelError::UnknownReference(_))
        ));
        assert!(matches!(
            VerticalLimit::parse("high", "FT", "MSL"),
            Err(ModelError::InvalidLimit(_))
        ));
        assert!(matches!(
            VerticalLimit::parse("inf", "FT", "MSL"),
            Err(ModelError::InvalidLimit(_))
        ));
    }
}
