//! Property-based tests using proptest.
//!
//! Checks the codec and filter laws over arbitrary records and criteria.

use proptest::prelude::*;
use proptest::sample::Index;

use crate::{
    Attributes, DatasetEntry, FilterCriteria, MatchMode, PrimeAssignment, SfiEngine,
    ShipmentRecord, UNKNOWN, filter_records,
};

fn assignment() -> PrimeAssignment {
    PrimeAssignment::shipments().unwrap()
}

/// One value per group, chosen by index.
fn full_mapping(assignment: &PrimeAssignment, picks: &[Index]) -> Attributes {
    assignment
        .catalog()
        .groups()
        .iter()
        .zip(picks)
        .map(|(g, i)| (g.name.clone(), i.get(&g.values).clone()))
        .collect()
}

/// A value for some groups, none for others.
fn partial_mapping(assignment: &PrimeAssignment, picks: &[Option<Index>]) -> Attributes {
    assignment
        .catalog()
        .groups()
        .iter()
        .zip(picks)
        .filter_map(|(g, pick)| pick.as_ref().map(|i| (g.name.clone(), i.get(&g.values).clone())))
        .collect()
}

fn record_strategy() -> impl Strategy<Value = Vec<Index>> {
    prop::collection::vec(any::<Index>(), 5)
}

fn criteria_strategy() -> impl Strategy<Value = Vec<Option<Index>>> {
    prop::collection::vec(prop::option::of(any::<Index>()), 5)
}

proptest! {
    /// decode(encode(m)) == m for complete mappings
    #[test]
    fn round_trip(picks in record_strategy()) {
        let a = assignment();
        let mapping = full_mapping(&a, &picks);
        let encoded = crate::encode(&a, &mapping, MatchMode::Strict).unwrap();
        let decoded = crate::decode(&a, &encoded.vector, MatchMode::Strict).unwrap();
        prop_assert!(decoded.warning.is_none());
        prop_assert_eq!(decoded.decoded, mapping);
    }

    /// Partial mappings decode with the rest marked Unknown and no warning
    #[test]
    fn partial_decode(picks in criteria_strategy()) {
        let a = assignment();
        let mapping = partial_mapping(&a, &picks);
        let encoded = crate::encode(&a, &mapping, MatchMode::Strict).unwrap();
        let decoded = crate::decode(&a, &encoded.vector, MatchMode::Lenient).unwrap();

        prop_assert!(decoded.warning.is_none());
        for group in a.catalog().group_names() {
            match mapping.get(group) {
                Some(value) => prop_assert_eq!(&decoded.decoded[group], value),
                None => prop_assert_eq!(decoded.decoded[group].as_str(), UNKNOWN),
            }
        }
    }

    /// A record matches iff every criterion prime divides its vector
    #[test]
    fn divisibility_correctness(
        records in prop::collection::vec(record_strategy(), 0..40),
        picks in criteria_strategy(),
    ) {
        let engine = SfiEngine::shipments().unwrap();
        let a = engine.assignment();
        let criteria: FilterCriteria = partial_mapping(a, &picks);
        prop_assume!(!criteria.is_empty());

        let mappings: Vec<Attributes> = records.iter().map(|r| full_mapping(a, r)).collect();
        let shipments: Vec<ShipmentRecord> = mappings
            .iter()
            .enumerate()
            .map(|(i, m)| ShipmentRecord::new(format!("R{i}"), engine.encode(m).unwrap().vector))
            .collect();
        let entries: Vec<DatasetEntry> = shipments.iter().cloned().map(Into::into).collect();

        let outcome = engine.filter_records(&criteria, &entries).unwrap();
        let matched: Vec<&str> = outcome.matches.iter().map(|r| r.id.as_str()).collect();

        let expected: Vec<String> = mappings
            .iter()
            .enumerate()
            .filter(|(_, m)| criteria.iter().all(|(g, v)| m.get(g) == Some(v)))
            .map(|(i, _)| format!("R{i}"))
            .collect();

        prop_assert_eq!(matched, expected.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(outcome.total_checked, records.len());
    }

    /// Filtering a filter result again changes nothing
    #[test]
    fn filter_idempotence(
        records in prop::collection::vec(record_strategy(), 0..40),
        picks in criteria_strategy(),
    ) {
        let engine = SfiEngine::shipments().unwrap();
        let a = engine.assignment();
        let criteria = partial_mapping(a, &picks);
        prop_assume!(!criteria.is_empty());

        let shipments: Vec<ShipmentRecord> = records
            .iter()
            .enumerate()
            .map(|(i, r)| ShipmentRecord::new(format!("R{i}"), engine.encode(&full_mapping(a, r)).unwrap().vector))
            .collect();

        let filter = engine.build_filter(&criteria).unwrap().vector;
        let once: Vec<ShipmentRecord> = filter_records(&shipments, &filter).into_iter().cloned().collect();
        let twice: Vec<ShipmentRecord> = filter_records(&once, &filter).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }
}
