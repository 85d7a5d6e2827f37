//! Mapping algebra: merge precedence, inversion and key coercion.

use std::collections::{BTreeMap, BTreeSet};

use oda_model::{Code, CodeMapping, KeyCoercion, ModelError, merge};
use proptest::prelude::*;

fn int_mapping(entries: &BTreeMap<i64, String>) -> CodeMapping {
    entries
        .iter()
        .map(|(key, value)| (*key, value.as_str()))
        .collect()
}

#[test]
fn corrections_override_base_entries() {
    let base: CodeMapping = [(1, "A"), (2, "B")].into_iter().collect();
    let corrections: CodeMapping = [(2, "B2"), (3, "C")].into_iter().collect();

    let merged = merge(&base, &corrections);

    let expected: CodeMapping = [(1, "A"), (2, "B2"), (3, "C")].into_iter().collect();
    assert_eq!(merged, expected);
}

#[test]
fn merge_leaves_inputs_untouched() {
    let base: CodeMapping = [(1, "A")].into_iter().collect();
    let corrections: CodeMapping = [(1, "Z")].into_iter().collect();

    let _ = merge(&base, &corrections);

    assert_eq!(base.get(&Code::Int(1)), Some(&Code::from("A")));
    assert_eq!(corrections.get(&Code::Int(1)), Some(&Code::from("Z")));
}

#[test]
fn non_injective_price_mapping_cannot_be_inverted() {
    let prices: CodeMapping = [("A", "x"), ("B", "x")].into_iter().collect();
    assert!(matches!(
        prices.invert(),
        Err(ModelError::AmbiguousInversion { .. })
    ));
}

#[test]
fn price_mapping_inverts_to_target_keys() {
    let prices: CodeMapping = [("N", "USD_Nominal")].into_iter().collect();
    let inverted = prices.invert().unwrap();
    assert_eq!(
        inverted.get(&Code::from("USD_Nominal")),
        Some(&Code::from("N"))
    );
    assert_eq!(inverted.get(&Code::from("N")), None);
}

#[test]
fn integer_coercion_keeps_values() {
    let stored: CodeMapping = [("1", "DAC1"), ("2", "DAC2")].into_iter().collect();
    let coerced = stored.coerce_keys(KeyCoercion::Integer).unwrap();
    let expected: CodeMapping = [(1, "DAC1"), (2, "DAC2")].into_iter().collect();
    assert_eq!(coerced, expected);
}

#[test]
fn keep_coercion_is_identity() {
    let stored: CodeMapping = [("N", "USD_Nominal"), ("1", "x")].into_iter().collect();
    assert_eq!(stored.clone().coerce_keys(KeyCoercion::Keep).unwrap(), stored);
}

proptest! {
    #[test]
    fn merge_prefers_overrides(
        base in proptest::collection::btree_map(0i64..50, "[A-Z]{1,3}", 0..20),
        overrides in proptest::collection::btree_map(0i64..50, "[a-z]{1,3}", 0..20),
    ) {
        let merged = merge(&int_mapping(&base), &int_mapping(&overrides));

        for (key, value) in &overrides {
            prop_assert_eq!(merged.get(&Code::Int(*key)), Some(&Code::from(value.as_str())));
        }
        for (key, value) in base.iter().filter(|(key, _)| !overrides.contains_key(key)) {
            prop_assert_eq!(merged.get(&Code::Int(*key)), Some(&Code::from(value.as_str())));
        }
        let union: BTreeSet<i64> = base.keys().chain(overrides.keys()).copied().collect();
        prop_assert_eq!(merged.len(), union.len());
    }

    #[test]
    fn inverting_twice_restores_one_to_one_mappings(
        keys in proptest::collection::btree_set(0i64..1000, 0..30),
    ) {
        let mapping: CodeMapping = keys
            .iter()
            .map(|key| (*key, format!("T{key}")))
            .collect();

        let restored = mapping.invert().unwrap().invert().unwrap();
        prop_assert_eq!(restored, mapping);
    }
}
