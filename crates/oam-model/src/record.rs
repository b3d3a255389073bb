// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Airspace input record
//!
//! This is what the document parser hands to the tessellator: a boundary in
//! degrees and two altitudes already converted to meters.

use crate::{AltitudeReference, AirspaceType, Result, TessellationOptions, VerticalLimit};
use serde::{Deserialize, Serialize};

/// One airspace to tessellate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirspaceRecord {
    /// Airspace designator
    pub id: String,
    /// Boundary as `[longitude, latitude]` pairs in degrees
    ///
    /// The closing point may or may not repeat the first one.
    pub boundary: Vec<[f64; 2]>,
    /// Floor in meters above `lower_reference`
    pub lower_altitude_meters: f64,
    /// Ceiling in meters above `upper_reference`
    pub upper_altitude_meters: f64,
    /// AIXM classification, drives the display colour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airspace_type: Option<AirspaceType>,
    /// Datum of the floor
    #[serde(default)]
    pub lower_reference: AltitudeReference,
    /// Datum of the ceiling
    #[serde(default)]
    pub upper_reference: AltitudeReference,
    /// Sampled terrain height (meters) per boundary point
    ///
    /// Only used for limits referenced to the surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain_heights: Option<Vec<f64>>,
}

impl AirspaceRecord {
    /// Create a record with absolute (MSL) limits
    pub fn new(
        id: impl Into<String>,
        boundary: Vec<[f64; 2]>,
        lower_altitude_meters: f64,
        upper_altitude_meters: f64,
    ) -> Self {
        Self {
            id: id.into(),
            boundary,
            lower_altitude_meters,
            upper_altitude_meters,
            airspace_type: None,
            lower_reference: AltitudeReference::Msl,
            upper_reference: AltitudeReference::Msl,
            terrain_heights: None,
        }
    }

    /// Build a record from AIXM-style vertical limits
    pub fn from_limits(
        id: impl Into<String>,
        boundary: Vec<[f64; 2]>,
        lower: &VerticalLimit,
        upper: &VerticalLimit,
        options: &TessellationOptions,
    ) -> Self {
        let ceiling = options.unlimited_ceiling_meters;
        let mut record = Self::new(id, boundary, lower.to_meters(ceiling), upper.to_meters(ceiling));
        record.lower_reference = if lower.is_ground_relative() {
            AltitudeReference::Sfc
        } else {
            lower.reference
        };
        record.upper_reference = if upper.is_ground_relative() {
            AltitudeReference::Sfc
        } else {
            upper.reference
        };
        record
    }

    /// Set the airspace type
    pub fn with_type(mut self, airspace_type: AirspaceType) -> Self {
        self.airspace_type = Some(airspace_type);
        self
    }

    /// Attach sampled terrain heights, one per boundary point
    pub fn with_terrain_heights(mut self, heights: Vec<f64>) -> Self {
        self.terrain_heights = Some(heights);
        self
    }

    /// Whether any limit needs terrain heights
    pub fn needs_terrain(&self) -> bool {
        self.lower_reference.is_ground_relative() || self.upper_reference.is_ground_relative()
    }

    /// Display colour for this record
    pub fn color(&self) -> [f32; 4] {
        crate::get_default_color(self.airspace_type.as_ref())
    }

    /// Decode a single record from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a JSON array of records
    pub fn batch_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AltitudeUnit, ModelError};

    #[test]
    fn test_from_json_defaults() {
        let json = r#"{
            "id": "EDDM CTR",
            "boundary": [[11.5, 48.3], [11.9, 48.3], [11.9, 48.5], [11.5, 48.3]],
            "lowerAltitudeMeters": 0.0,
            "upperAltitudeMeters": 1066.8,
            "airspaceType": "CTR"
        }"#;

        let record = AirspaceRecord::from_json(json).unwrap();
        assert_eq!(record.id, "EDDM CTR");
        assert_eq!(record.boundary.len(), 4);
        assert_eq!(record.airspace_type, Some(AirspaceType::Ctr));
        assert_eq!(record.lower_reference, AltitudeReference::Msl);
        assert!(record.terrain_heights.is_none());
        assert!(!record.needs_terrain());
    }

    #[test]
    fn test_batch_from_json_rejects_garbage() {
        assert!(matches!(
            AirspaceRecord::batch_from_json("[{\"id\": 3}]"),
            Err(ModelError::Json(_))
        ));
    }

    #[test]
    fn test_from_limits() {
        let options = TessellationOptions::default();
        let lower = VerticalLimit::ground();
        let upper = VerticalLimit::new(45.0, AltitudeUnit::FlightLevel, AltitudeReference::Std);

        let record = AirspaceRecord::from_limits(
            "LHB1",
            vec![[19.0, 47.5], [19.1, 47.5], [19.1, 47.6]],
            &lower,
            &upper,
            &options,
        );

        assert_eq!(record.lower_altitude_meters, 0.0);
        assert!((record.upper_altitude_meters - 1371.6).abs() < 1e-9);
        assert_eq!(record.lower_reference, AltitudeReference::Sfc);
        assert_eq!(record.upper_reference, AltitudeReference::Std);
        assert!(record.needs_terrain());
    }

    #[test]
    fn test_json_round_trip_keeps_optional_fields() {
        let record = AirspaceRecord::new("P1", vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]], 0.0, 100.0)
            .with_type(AirspaceType::P)
            .with_terrain_heights(vec![10.0, 20.0, 30.0]);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"terrainHeights\""));
        assert_eq!(AirspaceRecord::from_json(&json).unwrap(), record);
    }
}
