//! 테이블 삭제와 붙여넣기 해석의 성질 테스트.
use std::collections::BTreeSet;

use h2o_props::codec::{decode, ParseError};
use h2o_props::steam::PropertySet;
use h2o_props::{RecordTable, StateRecord};
use proptest::prelude::*;

fn record(t_k: f64) -> StateRecord {
    StateRecord::new(
        PropertySet {
            pressure_mpa: 0.1,
            temperature_k: t_k,
            density: 1.0,
            enthalpy: 1.0,
            entropy: 1.0,
            quality: None,
            cp: None,
            thermal_conductivity: None,
            thermal_diffusivity: None,
            prandtl: None,
            speed_of_sound: None,
            kinematic_viscosity: None,
            dynamic_viscosity: None,
            expansion_coefficient: None,
            region: 1,
        },
        true,
    )
}

fn table_of(n: usize) -> RecordTable {
    let mut table = RecordTable::new();
    for i in 0..n {
        table.append(record(300.0 + i as f64));
    }
    table
}

fn temperatures(table: &RecordTable) -> Vec<f64> {
    table.iter().map(|(_, r)| r.temperature_k()).collect()
}

proptest! {
    #[test]
    fn removal_ignores_index_order(
        n in 0usize..15,
        indices in prop::collection::vec(0usize..20, 0..10),
    ) {
        let mut forward = table_of(n);
        let mut backward = table_of(n);
        let mut reversed = indices.clone();
        reversed.reverse();

        let a = forward.remove_at(indices.iter().copied());
        let b = backward.remove_at(reversed);
        prop_assert_eq!(a, b);
        prop_assert_eq!(temperatures(&forward), temperatures(&backward));

        let doomed: BTreeSet<usize> = indices.into_iter().filter(|i| *i < n).collect();
        prop_assert_eq!(a, doomed.len());
        let expected: Vec<f64> = (0..n)
            .filter(|i| !doomed.contains(i))
            .map(|i| 300.0 + i as f64)
            .collect();
        prop_assert_eq!(temperatures(&forward), expected);
    }

    #[test]
    fn ragged_rows_are_rejected(
        lens in prop::collection::vec(1usize..5, 2..6),
        value in 0.0f64..100.0,
    ) {
        prop_assume!(lens.iter().any(|l| *l != lens[0]));
        let text: String = lens
            .iter()
            .map(|len| vec![format!("{value}"); *len].join("\t") + "\n")
            .collect();
        let is_ragged = matches!(decode(&text), Err(ParseError::Ragged { .. }));
        prop_assert!(is_ragged);
    }

    #[test]
    fn decode_never_panics(text in ".{0,64}") {
        if let Ok(pairs) = decode(&text) {
            prop_assert!(!pairs.is_empty());
            prop_assert!(pairs.iter().all(|(a, b)| a.is_finite() && b.is_finite()));
        }
    }
}
