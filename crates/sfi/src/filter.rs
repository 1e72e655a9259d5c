//! Divisibility-based conjunctive filtering.
//!
//! A record carries every attribute in a set of criteria iff the product of
//! the criteria primes divides the record's vector. One modulus per record,
//! however many criteria there are.

use std::time::{Duration, Instant};

use crate::assignment::PrimeAssignment;
use crate::codec::{MatchMode, unknown_attribute};
use crate::error::{Result, SfiError, SfiWarning};
use crate::record::{Attributes, DatasetEntry, ShipmentRecord};
use crate::vector::SfiVector;

/// Query criteria: group → required value. Need not cover every group.
pub type FilterCriteria = Attributes;

/// Product of the primes of the criteria that were recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterVector {
    pub vector: SfiVector,
    /// Criteria left after dropping unknown pairs.
    pub criteria_used: FilterCriteria,
    pub warnings: Vec<SfiWarning>,
}

/// Builds the filter vector for `criteria`.
///
/// # Errors
///
/// - [`SfiError::NoValidCriteria`] when no criterion is recognized.
/// - [`SfiError::UnknownAttribute`] in strict mode for any unknown pair.
/// - [`SfiError::InternalInvariant`] if recognized criteria multiply to 1,
///   which a correctly built assignment cannot produce.
pub fn build_filter_vector(
    assignment: &PrimeAssignment,
    criteria: &FilterCriteria,
    mode: MatchMode,
) -> Result<FilterVector> {
    let mut vector = SfiVector::one();
    let mut criteria_used = FilterCriteria::new();
    let mut warnings = Vec::new();

    for (group, value) in criteria {
        match assignment.prime_for(group, value) {
            Some(prime) => {
                vector.mul_prime(prime);
                criteria_used.insert(group.clone(), value.clone());
            }
            None => {
                let warning = unknown_attribute(group, value, mode)?;
                tracing::warn!(%group, %value, "invalid filter criterion ignored");
                warnings.push(warning);
            }
        }
    }

    if criteria_used.is_empty() {
        return Err(SfiError::NoValidCriteria);
    }
    if vector.is_one() {
        tracing::error!(?criteria_used, "filter vector is 1 despite valid criteria");
        return Err(SfiError::InternalInvariant(
            "filter vector is 1 despite valid criteria".to_string(),
        ));
    }

    tracing::debug!(filter_vector = %vector, ?criteria_used, "filter vector built");

    Ok(FilterVector {
        vector,
        criteria_used,
        warnings,
    })
}

/// Returns the records whose vector is divisible by `filter`, in order.
pub fn filter_records<'a>(
    records: &'a [ShipmentRecord],
    filter: &SfiVector,
) -> Vec<&'a ShipmentRecord> {
    records
        .iter()
        .filter(|r| r.sfi_vector.is_divisible_by(filter))
        .collect()
}

/// Result of scanning a stored dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub total_checked: usize,
    pub matches: Vec<ShipmentRecord>,
    /// One [`SfiWarning::SkippedRecord`] per malformed entry.
    pub warnings: Vec<SfiWarning>,
}

/// Filters stored entries, skipping malformed ones with a warning.
///
/// Malformed entries still count towards `total_checked`.
pub fn scan_entries(entries: &[DatasetEntry], filter: &SfiVector) -> Scan {
    let mut matches = Vec::new();
    let mut warnings = Vec::new();

    for entry in entries {
        match entry {
            DatasetEntry::Valid(record) => {
                if record.sfi_vector.is_divisible_by(filter) {
                    matches.push(record.clone());
                }
            }
            DatasetEntry::Malformed { id, reason } => {
                tracing::warn!(
                    id = id.as_deref().unwrap_or("Unknown ID"),
                    %reason,
                    "skipping shipment with missing or invalid sfi_vector"
                );
                warnings.push(SfiWarning::SkippedRecord {
                    id: id.clone(),
                    reason: reason.clone(),
                });
            }
        }
    }

    Scan {
        total_checked: entries.len(),
        matches,
        warnings,
    }
}

/// Everything a caller needs to report a filter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub criteria_used: FilterCriteria,
    pub filter_vector: SfiVector,
    pub total_checked: usize,
    pub matches: Vec<ShipmentRecord>,
    /// Dropped criteria first, then skipped records.
    pub warnings: Vec<SfiWarning>,
    pub duration: Duration,
}

impl FilterOutcome {
    pub fn matches_found(&self) -> usize {
        self.matches.len()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}

/// Builds the filter vector for `criteria` and scans `entries` with it.
pub fn run_filter(
    assignment: &PrimeAssignment,
    criteria: &FilterCriteria,
    entries: &[DatasetEntry],
    mode: MatchMode,
) -> Result<FilterOutcome> {
    let start = Instant::now();
    let FilterVector {
        vector,
        criteria_used,
        mut warnings,
    } = build_filter_vector(assignment, criteria, mode)?;

    let scan = scan_entries(entries, &vector);
    warnings.extend(scan.warnings);
    let duration = start.elapsed();

    tracing::info!(
        matches = scan.matches.len(),
        total = scan.total_checked,
        filter_vector = %vector,
        elapsed_ms = duration.as_millis() as u64,
        "filtering complete"
    );

    Ok(FilterOutcome {
        criteria_used,
        filter_vector: vector,
        total_checked: scan.total_checked,
        matches: scan.matches,
        warnings,
        duration,
    })
}
