//! Synthetic shipment dataset generation.
//!
//! Identifiers are `SHP` + a random five-digit number + the sequence index
//! zero-padded to three digits (`SHP48213007`). Ids within one batch never
//! collide; across batches they are not guaranteed unique.

use std::time::{Duration, Instant};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::assignment::PrimeAssignment;
use crate::codec::{MatchMode, encode};
use crate::error::{Result, SfiError};
use crate::record::{Attributes, ShipmentRecord};

/// Inclusive range of the random identifier component.
pub const ID_RANDOM_RANGE: std::ops::RangeInclusive<u32> = 10_000..=99_999;

/// Outcome of a generation batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub requested: usize,
    pub records: Vec<ShipmentRecord>,
    /// Records that could not be encoded and were left out.
    pub failed: usize,
    pub duration: Duration,
}

impl GenerationReport {
    /// Number of records actually produced. Never exceeds `requested`.
    pub fn records_written(&self) -> usize {
        self.records.len()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}

/// Converts an externally supplied count into a batch size.
///
/// # Errors
///
/// Returns [`SfiError::Validation`] for zero or negative counts.
pub fn validate_count(count: i64) -> Result<usize> {
    if count <= 0 {
        return Err(SfiError::validation(format!(
            "invalid count {count}: must be a positive integer"
        )));
    }
    usize::try_from(count)
        .map_err(|_| SfiError::validation(format!("invalid count {count}: too large")))
}

/// Produces random shipment records using the codec.
#[derive(Debug, Clone, Copy)]
pub struct DatasetGenerator<'a> {
    assignment: &'a PrimeAssignment,
    mode: MatchMode,
}

impl<'a> DatasetGenerator<'a> {
    pub fn new(assignment: &'a PrimeAssignment, mode: MatchMode) -> Self {
        Self { assignment, mode }
    }

    /// Identifier for the record at `index`.
    pub fn shipment_id<R: Rng + ?Sized>(rng: &mut R, index: usize) -> String {
        format!("SHP{:05}{index:03}", rng.gen_range(ID_RANDOM_RANGE))
    }

    /// One uniformly chosen value per catalog group.
    pub fn random_attributes<R: Rng + ?Sized>(&self, rng: &mut R) -> Attributes {
        self.assignment
            .catalog()
            .groups()
            .iter()
            .filter_map(|g| g.values.choose(rng).map(|v| (g.name.clone(), v.clone())))
            .collect()
    }

    /// Generates `count` records.
    ///
    /// A record that fails to encode is logged and skipped; the batch
    /// carries on and the report reflects the shortfall.
    ///
    /// # Errors
    ///
    /// Returns [`SfiError::Validation`] for a zero count or one too large to
    /// hold in memory.
    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<GenerationReport> {
        self.generate_with(count, rng, |generator, rng| generator.random_attributes(rng))
    }

    /// Like [`generate`](Self::generate), with the per-record attribute draw
    /// supplied by the caller.
    pub(crate) fn generate_with<R, F>(
        &self,
        count: usize,
        rng: &mut R,
        mut draw: F,
    ) -> Result<GenerationReport>
    where
        R: Rng + ?Sized,
        F: FnMut(&Self, &mut R) -> Attributes,
    {
        if count == 0 {
            return Err(SfiError::validation(
                "invalid count 0: must be a positive integer",
            ));
        }

        let mut records: Vec<ShipmentRecord> = Vec::new();
        records.try_reserve(count).map_err(|e| {
            SfiError::validation(format!("invalid count {count}: too large to generate ({e})"))
        })?;

        tracing::info!(count, "starting shipment generation");
        let start = Instant::now();
        let mut failed = 0;

        for index in 0..count {
            let id = Self::shipment_id(rng, index);
            let details = draw(self, rng);
            match encode(self.assignment, &details, self.mode) {
                Ok(encoded) => records.push(ShipmentRecord::new(id, encoded.vector)),
                Err(e) => {
                    tracing::warn!(
                        index = index + 1,
                        error = %e,
                        "failed to encode shipment, skipping"
                    );
                    failed += 1;
                }
            }
        }

        let duration = start.elapsed();
        tracing::info!(
            generated = records.len(),
            failed,
            elapsed_ms = duration.as_millis() as u64,
            "shipment generation complete"
        );

        Ok(GenerationReport {
            requested: count,
            records,
            failed,
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use test_case::test_case;

    #[test_case(0; "zero")]
    #[test_case(-1; "minus one")]
    #[test_case(i64::MIN; "most negative")]
    fn invalid_counts_are_rejected(count: i64) {
        assert!(matches!(validate_count(count), Err(SfiError::Validation(_))));
    }

    #[test]
    fn positive_count_is_accepted() {
        assert_eq!(validate_count(100).unwrap(), 100);
    }

    #[test]
    fn generate_zero_is_rejected() {
        let assignment = PrimeAssignment::shipments().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let generator = DatasetGenerator::new(&assignment, MatchMode::Lenient);
        assert!(generator.generate(0, &mut rng).is_err());
    }

    #[test]
    fn oversized_count_is_an_error_not_a_panic() {
        let assignment = PrimeAssignment::shipments().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let generator = DatasetGenerator::new(&assignment, MatchMode::Lenient);

        let count = validate_count(i64::MAX).unwrap();
        let err = generator.generate(count, &mut rng).unwrap_err();
        assert!(matches!(err, SfiError::Validation(_)), "{err:?}");

        let err = generator.generate(usize::MAX, &mut rng).unwrap_err();
        assert!(matches!(err, SfiError::Validation(_)), "{err:?}");
    }

    #[test]
    fn unencodable_records_are_skipped_and_counted() {
        let assignment = PrimeAssignment::shipments().unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let generator = DatasetGenerator::new(&assignment, MatchMode::Strict);

        // Every third draw carries a value outside the catalog.
        let mut draws = 0;
        let report = generator
            .generate_with(9, &mut rng, |g, rng| {
                draws += 1;
                let mut attrs = g.random_attributes(rng);
                if draws % 3 == 0 {
                    attrs.insert("status".to_string(), "Lost".to_string());
                }
                attrs
            })
            .unwrap();

        assert_eq!(report.requested, 9);
        assert_eq!(report.failed, 3);
        assert_eq!(report.records_written(), 6);
        assert!(report.records.iter().all(|r| !r.id.ends_with("002")));
    }

    #[test]
    fn generates_exactly_the_requested_count() {
        let assignment = PrimeAssignment::shipments().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let report = DatasetGenerator::new(&assignment, MatchMode::Lenient)
            .generate(100, &mut rng)
            .unwrap();
        assert_eq!(report.requested, 100);
        assert_eq!(report.records_written(), 100);
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn every_record_has_one_value_per_group() {
        let assignment = PrimeAssignment::shipments().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let report = DatasetGenerator::new(&assignment, MatchMode::Strict)
            .generate(50, &mut rng)
            .unwrap();
        for record in &report.records {
            let decoded = decode(&assignment, &record.sfi_vector, MatchMode::Strict).unwrap();
            assert!(decoded.is_complete(), "{record:?}");
        }
    }

    #[test]
    fn identifiers_follow_the_scheme() {
        let assignment = PrimeAssignment::shipments().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let report = DatasetGenerator::new(&assignment, MatchMode::Lenient)
            .generate(12, &mut rng)
            .unwrap();
        let mut ids = HashSet::new();
        for (index, record) in report.records.iter().enumerate() {
            assert_eq!(record.id.len(), 11, "{}", record.id);
            assert!(record.id.starts_with("SHP"));
            assert!(record.id.ends_with(&format!("{index:03}")));
            let random: u32 = record.id[3..8].parse().unwrap();
            assert!(ID_RANDOM_RANGE.contains(&random));
            ids.insert(record.id.clone());
        }
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let assignment = PrimeAssignment::shipments().unwrap();
        let generator = DatasetGenerator::new(&assignment, MatchMode::Lenient);
        let a = generator.generate(20, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generator.generate(20, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a.records, b.records);
    }

    #[test]
    fn long_indices_keep_growing() {
        let mut rng = StdRng::seed_from_u64(5);
        let id = DatasetGenerator::shipment_id(&mut rng, 12_345);
        assert!(id.ends_with("12345"));
    }
}
