//! sfi-store: dataset persistence for `sfi`
//!
//! The core crate only ever sees an ordered slice of [`DatasetEntry`]. This
//! crate is the collaborator that gets records to and from storage.
//!
//! # On-disk format
//!
//! A JSON array of `{"id": "...", "sfi_vector": "..."}` objects. Vectors are
//! written as decimal strings so no precision is lost however many primes
//! they carry. Files holding native JSON integers are still readable as long
//! as each value fits in 64 bits.
//!
//! # Example
//!
//! ```no_run
//! use sfi_store::{DatasetStore, JsonFileStore};
//!
//! let store = JsonFileStore::new("shipments.json");
//! let entries = store.load()?;
//! println!("{} records", entries.len());
//! # Ok::<(), sfi_store::StoreError>(())
//! ```

use std::path::PathBuf;

use sfi::{DatasetEntry, SfiError, ShipmentRecord};
use thiserror::Error;

mod json;
mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage for a single dataset.
///
/// Implementations replace the whole dataset on [`save`](Self::save);
/// concurrent generate and filter calls against the same store must be
/// serialized by the caller.
pub trait DatasetStore {
    /// Returns every stored entry in order.
    ///
    /// Elements without a usable vector come back as
    /// [`DatasetEntry::Malformed`] rather than failing the load.
    fn load(&self) -> Result<Vec<DatasetEntry>>;

    /// Replaces the stored dataset with `records`.
    fn save(&self, records: &[ShipmentRecord]) -> Result<()>;

    /// Returns true if a dataset has been saved.
    fn exists(&self) -> bool;
}

/// Errors that can occur while reading or writing a dataset.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No dataset has been written yet.
    #[error("dataset {} not found; generate data first", path.display())]
    NotFound { path: PathBuf },

    /// Filesystem failure.
    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not a JSON array of records.
    #[error("invalid dataset in {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// Records could not be serialized.
    #[error("failed to serialize dataset: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<StoreError> for SfiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => SfiError::NotFound(err.to_string()),
            _ => SfiError::Persistence(err.to_string()),
        }
    }
}
