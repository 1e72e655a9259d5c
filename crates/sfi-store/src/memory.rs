//! In-process dataset store.

use std::sync::RwLock;

use sfi::{DatasetEntry, ShipmentRecord};

use crate::{DatasetStore, Result};

/// Keeps the dataset in memory. Starts empty and "not found".
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Option<Vec<DatasetEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with arbitrary entries, malformed ones included.
    pub fn with_entries(entries: Vec<DatasetEntry>) -> Self {
        Self {
            entries: RwLock::new(Some(entries)),
        }
    }
}

impl DatasetStore for MemoryStore {
    fn load(&self) -> Result<Vec<DatasetEntry>> {
        let guard = self.entries.read().unwrap_or_else(|e| e.into_inner());
        (*guard).clone().ok_or_else(|| crate::StoreError::NotFound {
            path: "<memory>".into(),
        })
    }

    fn save(&self, records: &[ShipmentRecord]) -> Result<()> {
        let mut guard = self.entries.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(records.iter().cloned().map(DatasetEntry::Valid).collect());
        Ok(())
    }

    fn exists(&self) -> bool {
        self.entries
            .read()
            .map(|g| g.is_some())
            .unwrap_or_else(|e| e.into_inner().is_some())
    }
}
