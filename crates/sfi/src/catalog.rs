//! The ordered attribute taxonomy.
//!
//! Traversal order is significant: primes are handed out in the order
//! groups are declared, then in the order values are declared within each
//! group. Changing the order changes every encoded vector.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SfiError};

/// A named category with its allowed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeGroup {
    pub name: String,
    pub values: Vec<String>,
}

impl AttributeGroup {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// Fixed, ordered set of attribute groups.
///
/// Serializes as an ordered list of groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeCatalog {
    groups: Vec<AttributeGroup>,
}

impl AttributeCatalog {
    /// Builds a catalog, validating its shape.
    ///
    /// # Errors
    ///
    /// Returns [`SfiError::Validation`] if there are no groups, a group name
    /// is empty or repeated, a group has no values, or a value repeats
    /// within its group.
    pub fn new(groups: Vec<AttributeGroup>) -> Result<Self> {
        if groups.is_empty() {
            return Err(SfiError::validation("catalog must declare at least one group"));
        }

        let mut names = HashSet::new();
        for group in &groups {
            if group.name.is_empty() {
                return Err(SfiError::validation("catalog group names must be non-empty"));
            }
            if !names.insert(group.name.as_str()) {
                return Err(SfiError::validation(format!(
                    "catalog group {:?} is declared more than once",
                    group.name
                )));
            }
            if group.values.is_empty() {
                return Err(SfiError::validation(format!(
                    "catalog group {:?} has no values",
                    group.name
                )));
            }
            let mut seen = HashSet::new();
            for value in &group.values {
                if !seen.insert(value.as_str()) {
                    return Err(SfiError::validation(format!(
                        "value {value:?} repeats in catalog group {:?}",
                        group.name
                    )));
                }
            }
        }

        Ok(Self { groups })
    }

    /// The built-in shipment taxonomy: 5 groups, 22 values.
    pub fn shipments() -> Self {
        Self {
            groups: vec![
                AttributeGroup::new(
                    "origin",
                    ["New York", "Los Angeles", "Chicago", "Houston", "Miami"],
                ),
                AttributeGroup::new(
                    "destination",
                    ["London", "Tokyo", "Paris", "Sydney", "Berlin"],
                ),
                AttributeGroup::new(
                    "carrier",
                    ["PrimeShip", "SwiftLog", "GlobalEx", "CargoFast"],
                ),
                AttributeGroup::new(
                    "status",
                    ["Pending", "In Transit", "Delivered", "Delayed", "Customs Hold"],
                ),
                AttributeGroup::new("priority", ["Standard", "Express", "Overnight"]),
            ],
        }
    }

    pub fn groups(&self) -> &[AttributeGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&AttributeGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    /// Sum of value counts over all groups.
    pub fn total_values(&self) -> usize {
        self.groups.iter().map(|g| g.values.len()).sum()
    }

    /// Iterates `(group, value)` pairs in canonical traversal order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.groups.iter().flat_map(|g| {
            g.values
                .iter()
                .map(move |v| (g.name.as_str(), v.as_str()))
        })
    }
}

impl Default for AttributeCatalog {
    fn default() -> Self {
        Self::shipments()
    }
}
