//! Bijection between `(group, value)` pairs and primes.
//!
//! Built once from a catalog and frozen. Share it behind an `Arc`; every
//! other operation reads it without locking.

use std::collections::{BTreeMap, HashMap};

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::catalog::AttributeCatalog;
use crate::error::{Result, SfiError};
use crate::primes::first_primes;

/// A single `(group, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Attribute {
    pub group: String,
    pub value: String,
}

/// Forward and reverse prime maps for one catalog.
///
/// The primes used are exactly the first `catalog.total_values()` primes,
/// handed out in canonical traversal order. Changing the catalog requires a
/// full rebuild; there is no incremental update.
#[derive(Debug, Clone)]
pub struct PrimeAssignment {
    catalog: AttributeCatalog,
    forward: HashMap<String, HashMap<String, u64>>,
    /// Keyed by prime, so iteration is ascending.
    reverse: BTreeMap<u64, Attribute>,
}

impl PrimeAssignment {
    /// Assigns a distinct prime to every pair in `catalog`.
    pub fn build(catalog: AttributeCatalog) -> Result<Self> {
        let total = catalog.total_values();
        let primes = first_primes(total)?;

        let mut forward: HashMap<String, HashMap<String, u64>> = HashMap::new();
        let mut reverse = BTreeMap::new();

        for ((group, value), prime) in catalog.pairs().zip(primes) {
            forward
                .entry(group.to_string())
                .or_default()
                .insert(value.to_string(), prime);
            let previous = reverse.insert(
                prime,
                Attribute {
                    group: group.to_string(),
                    value: value.to_string(),
                },
            );
            if previous.is_some() {
                return Err(SfiError::InternalInvariant(format!(
                    "prime {prime} assigned twice"
                )));
            }
        }

        if reverse.len() != total {
            return Err(SfiError::InternalInvariant(format!(
                "assigned {} primes for {total} catalog values",
                reverse.len()
            )));
        }

        tracing::debug!(
            groups = catalog.groups().len(),
            values = total,
            largest_prime = reverse.keys().next_back().copied(),
            "prime assignment built"
        );

        Ok(Self {
            catalog,
            forward,
            reverse,
        })
    }

    /// Assignment for the built-in shipment catalog.
    pub fn shipments() -> Result<Self> {
        Self::build(AttributeCatalog::shipments())
    }

    pub fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }

    /// Prime assigned to `group=value`, if both are known.
    pub fn prime_for(&self, group: &str, value: &str) -> Option<u64> {
        self.forward.get(group)?.get(value).copied()
    }

    /// Pair assigned to `prime`, if any.
    pub fn attribute_for(&self, prime: u64) -> Option<&Attribute> {
        self.reverse.get(&prime)
    }

    /// All assigned primes with their pairs, ascending by prime.
    pub fn by_prime(&self) -> impl Iterator<Item = (u64, &Attribute)> {
        self.reverse.iter().map(|(p, a)| (*p, a))
    }

    /// Number of assigned pairs.
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    /// Snapshot of the catalog and forward map for display.
    pub fn prime_map(&self) -> PrimeMap {
        let groups = self
            .catalog
            .groups()
            .iter()
            .map(|g| GroupPrimes {
                group: g.name.clone(),
                values: g
                    .values
                    .iter()
                    .filter_map(|v| self.prime_for(&g.name, v).map(|p| (v.clone(), p)))
                    .collect(),
            })
            .collect();
        PrimeMap { groups }
    }
}

/// One group's values and their primes, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPrimes {
    pub group: String,
    pub values: Vec<(String, u64)>,
}

/// The catalog plus its forward assignment, in catalog order.
///
/// Serializes as `{"attributes": {group: [values]}, "prime_map": {group:
/// {value: prime}}}` with keys in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeMap {
    pub groups: Vec<GroupPrimes>,
}

impl Serialize for PrimeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("attributes", &AttributesView(&self.groups))?;
        map.serialize_entry("prime_map", &ForwardView(&self.groups))?;
        map.end()
    }
}

struct AttributesView<'a>(&'a [GroupPrimes]);

impl Serialize for AttributesView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for g in self.0 {
            let values: Vec<&str> = g.values.iter().map(|(v, _)| v.as_str()).collect();
            map.serialize_entry(&g.group, &values)?;
        }
        map.end()
    }
}

struct ForwardView<'a>(&'a [GroupPrimes]);

impl Serialize for ForwardView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for g in self.0 {
            map.serialize_entry(&g.group, &GroupView(&g.values))?;
        }
        map.end()
    }
}

struct GroupView<'a>(&'a [(String, u64)]);

impl Serialize for GroupView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (value, prime) in self.0 {
            map.serialize_entry(value, prime)?;
        }
        map.end()
    }
}
