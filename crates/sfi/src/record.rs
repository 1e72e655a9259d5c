//! Shipment records and dataset entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::vector::SfiVector;

/// A mapping from attribute group to value.
///
/// One value per group: multi-valued attributes are not representable.
pub type Attributes = BTreeMap<String, String>;

/// A record produced by this system: an identifier and its encoded vector.
///
/// Serialized shape is `{"id": "...", "sfi_vector": "<decimal>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub id: String,
    pub sfi_vector: SfiVector,
}

impl ShipmentRecord {
    pub fn new(id: impl Into<String>, sfi_vector: SfiVector) -> Self {
        Self {
            id: id.into(),
            sfi_vector,
        }
    }
}

/// One element of a stored dataset as handed back by storage.
///
/// Storage does not reject an element whose vector is missing or unusable;
/// it reports it as [`DatasetEntry::Malformed`] and the filter skips it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetEntry {
    Valid(ShipmentRecord),
    Malformed { id: Option<String>, reason: String },
}

impl DatasetEntry {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Valid(record) => Some(&record.id),
            Self::Malformed { id, .. } => id.as_deref(),
        }
    }

    pub fn as_record(&self) -> Option<&ShipmentRecord> {
        match self {
            Self::Valid(record) => Some(record),
            Self::Malformed { .. } => None,
        }
    }
}

impl From<ShipmentRecord> for DatasetEntry {
    fn from(record: ShipmentRecord) -> Self {
        Self::Valid(record)
    }
}
