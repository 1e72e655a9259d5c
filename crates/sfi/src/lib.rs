//! # sfi: prime-product attribute codec for shipment records
//!
//! Every value of a fixed set of categorical attributes is assigned a
//! distinct prime. A record carrying one value per attribute group is
//! represented by the product of its primes, its *SFI vector*. A
//! conjunctive query ("origin=X and status=Y") becomes one divisibility
//! test per record.
//!
//! ## Components
//!
//! - [`first_primes`]: deterministic prime source
//! - [`AttributeCatalog`]: the ordered taxonomy
//! - [`PrimeAssignment`]: `(group, value)` ↔ prime bijection, built once
//! - [`encode`] / [`decode`]: the codec
//! - [`build_filter_vector`] / [`run_filter`]: the filter engine
//! - [`DatasetGenerator`]: synthetic records
//!
//! [`SfiEngine`] bundles a frozen assignment with a [`MatchMode`] and
//! exposes the operations a front end needs.
//!
//! ## Usage
//!
//! ```
//! use sfi::{Attributes, MatchMode, SfiEngine};
//!
//! let engine = SfiEngine::shipments()?;
//!
//! let mut shipment = Attributes::new();
//! shipment.insert("origin".into(), "Chicago".into());
//! shipment.insert("status".into(), "Delayed".into());
//! let encoded = engine.encode(&shipment)?;
//! assert_eq!(encoded.vector.to_string(), (5 * 61).to_string());
//!
//! let decoded = engine.decode(&encoded.vector)?;
//! assert_eq!(decoded.decoded["status"], "Delayed");
//! assert_eq!(decoded.decoded["carrier"], "Unknown");
//! # Ok::<(), sfi::SfiError>(())
//! ```
//!
//! Persistence and transport are not part of this crate: it works on
//! in-memory record slices and returns structured results.

mod assignment;
mod catalog;
mod codec;
mod error;
mod filter;
mod generator;
mod primes;
mod record;
mod vector;


use std::sync::Arc;

pub use assignment::{Attribute, GroupPrimes, PrimeAssignment, PrimeMap};
pub use catalog::{AttributeCatalog, AttributeGroup};
pub use codec::{Decoded, Encoded, MatchMode, UNKNOWN, decode, encode};
pub use error::{ErrorKind, Result, SfiError, SfiWarning};
pub use filter::{
    FilterCriteria, FilterOutcome, FilterVector, Scan, build_filter_vector, filter_records,
    run_filter, scan_entries,
};
pub use generator::{DatasetGenerator, GenerationReport, ID_RANDOM_RANGE, validate_count};
pub use primes::first_primes;
pub use record::{Attributes, DatasetEntry, ShipmentRecord};
pub use vector::SfiVector;

use rand::Rng;

/// Entry point for every SFI operation.
///
/// Holds the prime assignment (built once, never mutated) and the match
/// mode. Cloning is cheap and shares the assignment, so an engine can be
/// handed to as many callers or threads as needed without locking.
#[derive(Debug, Clone)]
pub struct SfiEngine {
    assignment: Arc<PrimeAssignment>,
    mode: MatchMode,
}

impl SfiEngine {
    /// Creates a lenient engine over `assignment`.
    pub fn new(assignment: PrimeAssignment) -> Self {
        Self::from_shared(Arc::new(assignment))
    }

    /// Creates a lenient engine sharing an existing assignment.
    pub fn from_shared(assignment: Arc<PrimeAssignment>) -> Self {
        Self {
            assignment,
            mode: MatchMode::default(),
        }
    }

    /// Builds the assignment for `catalog` and wraps it.
    pub fn for_catalog(catalog: AttributeCatalog) -> Result<Self> {
        Ok(Self::new(PrimeAssignment::build(catalog)?))
    }

    /// Engine over the built-in shipment catalog.
    pub fn shipments() -> Result<Self> {
        Self::for_catalog(AttributeCatalog::shipments())
    }

    /// Returns a copy of this engine using `mode`.
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn assignment(&self) -> &PrimeAssignment {
        &self.assignment
    }

    pub fn shared_assignment(&self) -> Arc<PrimeAssignment> {
        Arc::clone(&self.assignment)
    }

    /// The catalog and its forward assignment, for display.
    pub fn prime_map(&self) -> PrimeMap {
        self.assignment.prime_map()
    }

    pub fn encode(&self, attributes: &Attributes) -> Result<Encoded> {
        codec::encode(&self.assignment, attributes, self.mode)
    }

    pub fn decode(&self, vector: &SfiVector) -> Result<Decoded> {
        codec::decode(&self.assignment, vector, self.mode)
    }

    /// Parses `text` as a vector, then decodes it.
    ///
    /// # Errors
    ///
    /// [`SfiError::Validation`] if `text` is not a positive integer.
    pub fn decode_str(&self, text: &str) -> Result<Decoded> {
        self.decode(&text.parse()?)
    }

    pub fn build_filter(&self, criteria: &FilterCriteria) -> Result<FilterVector> {
        filter::build_filter_vector(&self.assignment, criteria, self.mode)
    }

    /// Selects the entries carrying every attribute in `criteria`.
    pub fn filter_records(
        &self,
        criteria: &FilterCriteria,
        entries: &[DatasetEntry],
    ) -> Result<FilterOutcome> {
        filter::run_filter(&self.assignment, criteria, entries, self.mode)
    }

    /// Generates `count` synthetic records. Persisting them is the caller's job.
    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<GenerationReport> {
        DatasetGenerator::new(&self.assignment, self.mode).generate(count, rng)
    }
}
