//! 계산 파이프라인 테스트. 리졸버는 입력을 그대로 되돌려주는 가짜를 쓴다.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use approx::assert_relative_eq;
use h2o_props::calculator::DEFAULT_STATE;
use h2o_props::steam::{
    CanonicalInputs, PropertyResolver, PropertySet, ResolvedState, ResolverError,
};
use h2o_props::{Calculator, InputScheme, PastePolicy, ResolutionError, TableEvent};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Outcome {
    Valid,
    Invalid,
    Unsupported,
    Rejected,
}

/// 호출 횟수를 세고, 정해진 결과를 돌려주는 리졸버.
struct FakeResolver {
    outcome: Outcome,
    calls: Cell<usize>,
}

impl FakeResolver {
    fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: Cell::new(0),
        }
    }
}

fn props_for(inputs: CanonicalInputs) -> PropertySet {
    let p = inputs.pressure_mpa().unwrap_or(1.0);
    let t = inputs.temperature_k().unwrap_or(400.0);
    PropertySet {
        pressure_mpa: p,
        temperature_k: t,
        density: 1000.0,
        enthalpy: 100.0 + t,
        entropy: 1.0,
        quality: inputs.quality(),
        cp: Some(4.18),
        thermal_conductivity: None,
        thermal_diffusivity: None,
        prandtl: None,
        speed_of_sound: Some(1500.0),
        kinematic_viscosity: None,
        dynamic_viscosity: None,
        expansion_coefficient: None,
        region: if inputs.quality().is_some() { 4 } else { 1 },
    }
}

impl PropertyResolver for FakeResolver {
    fn resolve(&self, inputs: CanonicalInputs) -> Result<ResolvedState, ResolverError> {
        self.calls.set(self.calls.get() + 1);
        match self.outcome {
            Outcome::Valid => Ok(ResolvedState {
                properties: props_for(inputs),
                valid: true,
            }),
            Outcome::Invalid => Ok(ResolvedState {
                properties: props_for(inputs),
                valid: false,
            }),
            Outcome::Unsupported => Err(ResolverError::UnsupportedRegion(format!("{inputs:?}"))),
            Outcome::Rejected => Err(ResolverError::InvalidInput(format!("{inputs:?}"))),
        }
    }
}

#[test]
fn successful_calculation_appends_canonical_state() {
    let mut calc = Calculator::new(FakeResolver::new(Outcome::Valid));
    let id = calc.attempt_resolve(1.0, 100.0).expect("resolve");

    assert_eq!(calc.table().len(), 1);
    assert_eq!(calc.table().position(id), Some(0));
    let rec = calc.table().record(0).unwrap();
    assert_relative_eq!(rec.pressure_mpa(), 0.1, epsilon = 1e-12);
    assert_relative_eq!(rec.temperature_k(), 373.15, epsilon = 1e-9);
}

#[test]
fn validation_failure_skips_resolver_and_table() {
    let mut calc = Calculator::with_scheme(
        FakeResolver::new(Outcome::Valid),
        InputScheme::PressureQuality,
    );
    let err = calc.attempt_resolve(1.0, 1.5).unwrap_err();

    assert!(matches!(err, ResolutionError::Validation(ref v) if v.value == 1.5));
    assert_eq!(calc.resolver().calls.get(), 0);
    assert!(calc.table().is_empty());
}

#[test]
fn resolver_errors_keep_their_category() {
    let mut unsupported = Calculator::new(FakeResolver::new(Outcome::Unsupported));
    let err = unsupported.attempt_resolve(1.0, 100.0).unwrap_err();
    assert!(matches!(
        err,
        ResolutionError::Resolver(ResolverError::UnsupportedRegion(_))
    ));
    assert!(unsupported.table().is_empty());

    let mut rejected = Calculator::new(FakeResolver::new(Outcome::Rejected));
    let err = rejected.attempt_resolve(1.0, 100.0).unwrap_err();
    assert!(matches!(
        err,
        ResolutionError::Resolver(ResolverError::InvalidInput(_))
    ));
    assert!(rejected.table().is_empty());
}

#[test]
fn invalid_state_is_never_stored() {
    let mut calc = Calculator::new(FakeResolver::new(Outcome::Invalid));
    let err = calc.attempt_resolve(1.0, 100.0).unwrap_err();
    assert!(matches!(
        err,
        ResolutionError::Resolver(ResolverError::InvalidInput(_))
    ));
    assert!(calc.table().is_empty());
}

#[test]
fn scheme_defaults_come_from_reference_state_then_last_record() {
    let mut calc = Calculator::new(FakeResolver::new(Outcome::Valid));

    // 빈 테이블: 0.1 MPa, 283 K
    let (p_bar, t_c) = calc
        .select_scheme(InputScheme::PressureTemperature)
        .unwrap();
    assert_relative_eq!(p_bar, 1.0, epsilon = 1e-12);
    assert_relative_eq!(t_c, 9.85, epsilon = 1e-9);
    assert_eq!(DEFAULT_STATE.pressure_mpa(), Some(0.1));
    assert_eq!(DEFAULT_STATE.temperature_k(), Some(283.0));

    calc.attempt_resolve(5.0, 150.0).unwrap();
    let (p_bar, h) = calc.select_scheme(InputScheme::PressureEnthalpy).unwrap();
    assert_eq!(calc.scheme(), InputScheme::PressureEnthalpy);
    assert_relative_eq!(p_bar, 5.0, epsilon = 1e-9);
    assert_relative_eq!(h, 100.0 + 423.15, epsilon = 1e-9);
}

#[test]
fn scheme_defaults_are_absent_when_reference_fails() {
    let mut calc = Calculator::new(FakeResolver::new(Outcome::Unsupported));
    assert_eq!(calc.select_scheme(InputScheme::TemperatureQuality), None);
    assert_eq!(calc.scheme(), InputScheme::TemperatureQuality);
}

#[test]
fn paste_replace_swaps_table_contents() {
    let mut calc = Calculator::new(FakeResolver::new(Outcome::Valid));
    calc.attempt_resolve(1.0, 20.0).unwrap();

    let report = calc
        .paste("10 50\n10 60\n10 70", PastePolicy::Replace)
        .unwrap();
    assert_eq!(report.pairs, 3);
    assert_eq!(report.appended.len(), 3);
    assert!(report.rejected.is_empty());
    assert_eq!(calc.table().len(), 3);
    assert_relative_eq!(
        calc.table().record(2).unwrap().temperature_k(),
        343.15,
        epsilon = 1e-9
    );
}

#[test]
fn paste_append_keeps_existing_rows_and_reports_rejects() {
    let mut calc = Calculator::with_scheme(
        FakeResolver::new(Outcome::Valid),
        InputScheme::PressureQuality,
    );
    calc.attempt_resolve(1.0, 0.5).unwrap();

    let report = calc
        .paste("1 0.2\n1 1.5\n1 0.8\n", PastePolicy::Append)
        .unwrap();
    assert_eq!(report.pairs, 3);
    assert_eq!(report.appended.len(), 2);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].0, 1);
    assert_eq!(calc.table().len(), 3);
}

#[test]
fn unparsable_paste_leaves_table_untouched() {
    let mut calc = Calculator::new(FakeResolver::new(Outcome::Valid));
    calc.attempt_resolve(1.0, 20.0).unwrap();
    let revision = calc.table().revision();

    for text in ["", "1 2 3\n4 5", "a b\n", "-1 5\n2 3", "1 2 3\n4 5 6\n7 8 9"] {
        assert!(calc.paste(text, PastePolicy::Replace).is_err(), "{text:?}");
    }
    assert_eq!(calc.table().len(), 1);
    assert_eq!(calc.table().revision(), revision);
}

#[test]
fn structural_changes_notify_subscribers_once_each() {
    let mut calc = Calculator::new(FakeResolver::new(Outcome::Valid));
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    calc.subscribe(move |e| sink.borrow_mut().push(e));

    calc.attempt_resolve(1.0, 20.0).unwrap();
    calc.attempt_resolve(2.0, 30.0).unwrap();
    let _ = calc.attempt_resolve(-1.0, 30.0);
    assert_eq!(calc.remove_at([1, 1, 7]), 1);
    calc.clear();
    calc.clear();

    let rows: Vec<usize> = events
        .borrow()
        .iter()
        .map(|TableEvent::Replaced { rows, .. }| *rows)
        .collect();
    assert_eq!(rows, vec![1, 2, 1, 0]);
}

#[test]
fn copy_selection_text_decodes_back_to_pairs() {
    let mut calc = Calculator::new(FakeResolver::new(Outcome::Valid));
    calc.paste("10 50\n20 60\n30 70", PastePolicy::Replace)
        .unwrap();

    // 열 0, 1 = P [MPa], T [K]
    let payload = calc.copy_selection([2, 0, 1, 0], [1, 0]);
    assert!(payload.html.starts_with("<!--StartFragment-->"));
    assert!(payload.html.contains("Pressure [MPa]"));

    let pairs = h2o_props::codec::decode(&payload.text).unwrap();
    assert_eq!(pairs.len(), 3);
    for (row, (p, t)) in pairs.into_iter().enumerate() {
        let rec = calc.table().record(row).unwrap();
        assert_relative_eq!(p, rec.pressure_mpa(), max_relative = 1e-5);
        assert_relative_eq!(t, rec.temperature_k(), max_relative = 1e-5);
    }
}
