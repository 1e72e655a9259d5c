//! # sfi-bench: Performance benchmarks for SFI
//!
//! Shared fixtures for the criterion benches.
//!
//! ## Benchmarks
//!
//! - **codec**: encode and decode, for the shipment catalog and for wide
//!   catalogs whose vectors outgrow machine integers
//! - **filter**: filter-vector construction and full dataset scans
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p sfi-bench
//!
//! # Save baseline for comparison
//! cargo bench -p sfi-bench --bench filter -- --save-baseline main
//!
//! # Compare against baseline
//! cargo bench -p sfi-bench --bench filter -- --baseline main
//! ```

use rand::SeedableRng;
use rand::rngs::StdRng;
use sfi::{
    AttributeCatalog, AttributeGroup, Attributes, DatasetEntry, PrimeAssignment, Result,
    SfiEngine,
};
use sfi_store::{DatasetStore, MemoryStore};

/// Seed shared by every fixture so runs are comparable.
pub const SEED: u64 = 0x5F1;

/// A catalog of `groups` groups with `values` values each, named `g{i}`/`v{j}`.
pub fn wide_catalog(groups: usize, values: usize) -> Result<AttributeCatalog> {
    AttributeCatalog::new(
        (0..groups)
            .map(|g| AttributeGroup::new(format!("g{g}"), (0..values).map(|v| format!("v{v}"))))
            .collect(),
    )
}

/// One full attribute mapping: the last value of every group, so the
/// vector uses the largest primes.
pub fn full_attributes(assignment: &PrimeAssignment) -> Attributes {
    assignment
        .catalog()
        .groups()
        .iter()
        .filter_map(|group| {
            group
                .values
                .last()
                .map(|value| (group.name.clone(), value.clone()))
        })
        .collect()
}

/// A generated dataset of `count` records, passed through a [`MemoryStore`]
/// so benches scan exactly what a load returns.
pub fn seeded_dataset(engine: &SfiEngine, count: usize) -> Result<Vec<DatasetEntry>> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let report = engine.generate(count, &mut rng)?;
    let store = MemoryStore::new();
    store.save(&report.records)?;
    Ok(store.load()?)
}
