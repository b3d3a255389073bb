// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parallel tessellation of many airspace records

use crate::{AirspaceTessellator, Error, FrameProjection, Result};
use oam_model::{AirspaceMeshData, AirspaceRecord};
use rayon::prelude::*;

/// A record that could not be tessellated
#[derive(Debug)]
pub struct BatchFailure {
    /// Position of the record in the input
    pub index: usize,
    pub id: String,
    pub error: Error,
}

/// Meshes for the records that succeeded plus the failures, both in input order
#[derive(Debug, Default)]
pub struct BatchOutput {
    pub meshes: Vec<AirspaceMeshData>,
    pub failures: Vec<BatchFailure>,
}

impl BatchOutput {
    /// True when every record produced a mesh
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl<P: FrameProjection> AirspaceTessellator<P> {
    /// Tessellate records in parallel
    ///
    /// A failing record is logged and reported in
    /// [`BatchOutput::failures`]; the rest of the batch goes on.
    pub fn tessellate_batch(&self, records: &[AirspaceRecord]) -> BatchOutput {
        let results: Vec<Result<AirspaceMeshData>> = records
            .par_iter()
            .map(|record| self.tessellate_record(record))
            .collect();

        let mut output = BatchOutput {
            meshes: Vec::with_capacity(results.len()),
            failures: Vec::new(),
        };

        for (index, (record, result)) in records.iter().zip(results).enumerate() {
            match result {
                Ok(mesh) => output.meshes.push(mesh),
                Err(error) => {
                    log::warn!("skipping airspace {}: {}", record.id, error);
                    output.failures.push(BatchFailure {
                        index,
                        id: record.id.clone(),
                        error,
                    });
                }
            }
        }

        log::debug!(
            "tessellated {} of {} airspaces",
            output.meshes.len(),
            records.len()
        );

        output
    }

    /// Decode a JSON array of records and tessellate them
    pub fn tessellate_batch_json(&self, json: &str) -> Result<BatchOutput> {
        let records = AirspaceRecord::batch_from_json(json)?;
        Ok(self.tessellate_batch(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(id: &str, lower: f64, upper: f64) -> AirspaceRecord {
        AirspaceRecord::new(
            id,
            vec![[10.0, 50.0], [10.1, 50.0], [10.1, 50.1], [10.0, 50.1], [10.0, 50.0]],
            lower,
            upper,
        )
    }

    #[test]
    fn test_batch_isolates_failures() {
        let records = vec![
            square("A", 0.0, 1000.0),
            AirspaceRecord::new("B", vec![[0.0, 0.0], [1.0, 1.0]], 0.0, 100.0),
            square("C", 500.0, 200.0),
            square("D", 1000.0, 2000.0),
        ];

        let output = AirspaceTessellator::wgs84().tessellate_batch(&records);

        assert!(!output.is_complete());
        let ids: Vec<_> = output.meshes.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "D"]);

        assert_eq!(output.failures.len(), 2);
        assert_eq!(output.failures[0].index, 1);
        assert!(matches!(output.failures[0].error, Error::InvalidGeometry(_)));
        assert_eq!(output.failures[1].id, "C");
        assert!(matches!(output.failures[1].error, Error::InvalidLimits { .. }));
    }

    #[test]
    fn test_batch_matches_sequential() {
        let tessellator = AirspaceTessellator::wgs84();
        let records: Vec<_> = (0..16)
            .map(|i| square(&format!("R{}", i), 0.0, 100.0 * (i + 1) as f64))
            .collect();

        let output = tessellator.tessellate_batch(&records);
        assert!(output.is_complete());
        for (record, mesh) in records.iter().zip(&output.meshes) {
            assert_eq!(&tessellator.tessellate_record(record).unwrap(), mesh);
        }
    }

    #[test]
    fn test_batch_json() {
        let json = r#"[
            {
                "id": "EDR 1",
                "boundary": [[10.0, 50.0], [10.1, 50.0], [10.1, 50.1], [10.0, 50.0]],
                "lowerAltitudeMeters": 0.0,
                "upperAltitudeMeters": 3048.0,
                "airspaceType": "R"
            }
        ]"#;

        let output = AirspaceTessellator::wgs84().tessellate_batch_json(json).unwrap();
        assert_eq!(output.meshes.len(), 1);
        assert_eq!(output.meshes[0].triangle_count(), 1 + 1 + 6);

        assert!(matches!(
            AirspaceTessellator::wgs84().tessellate_batch_json("{"),
            Err(Error::Model(_))
        ));
    }
}
