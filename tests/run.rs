//! Integration tests for calculating and showing scenario results.
use float_cmp::assert_approx_eq;
use opdays::cli::{Assignment, run_calculator};
use opdays::parameters::Parameter;
use opdays::units::Money;
use std::path::PathBuf;
use std::str::FromStr;

/// Get the path to the scenario file for a bundled example
fn get_scenario_file(name: &str) -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "demos", name, "scenario.toml"]
        .iter()
        .collect()
}

/// Run the calculator and return the final state along with the output
fn run(name: Option<&str>, assignments: &[&str]) -> (opdays::store::CalculatorState, String) {
    let scenario_file = name.map(get_scenario_file);
    let assignments: Vec<_> = assignments
        .iter()
        .map(|s| Assignment::from_str(s).unwrap())
        .collect();
    let mut out = Vec::new();
    let state = run_calculator(scenario_file.as_deref(), &assignments, 30, &mut out).unwrap();

    (state, String::from_utf8(out).unwrap())
}

#[test]
fn test_run_reference_example() {
    let (state, out) = run(Some("strange_brewing"), &[]);

    assert_approx_eq!(
        Money,
        state.results().five_day.revenue,
        Money(56_070_000.0),
        epsilon = 1e-4
    );
    assert!(out.contains("  5 Days: $\u{a0}26.374.410\n"));
    assert!(out.contains("  6 Days: $\u{a0}26.818.290\n"));
    assert!(out.contains("  7 Days: $\u{a0}33.262.170\n"));
}

#[test]
fn test_run_defaults_match_reference_example() {
    let (defaults, _) = run(None, &[]);
    let (example, _) = run(Some("strange_brewing"), &[]);
    assert_eq!(defaults, example);
}

#[test]
fn test_run_seventh_day_staffed() {
    let (state, _) = run(Some("seventh_day_staffed"), &[]);
    let (reference, _) = run(Some("strange_brewing"), &[]);

    // Only the seven-day scenario carries the cost of the (three) new employees
    assert_eq!(state.results().five_day, reference.results().five_day);
    assert_approx_eq!(
        Money,
        reference.results().six_day.costs - state.results().six_day.costs,
        Money(3_000_000.0),
        epsilon = 1e-4
    );
    assert_approx_eq!(
        Money,
        state.results().seven_day.costs - reference.results().seven_day.costs,
        Money(4_500_000.0),
        epsilon = 1e-4
    );
}

#[test]
fn test_run_price_freeze() {
    let (state, _) = run(Some("price_freeze"), &[]);
    let results = state.results();

    // With no price increase, revenue is unchanged and COGS is applied at its base rate
    assert_approx_eq!(Money, results.five_day.revenue, Money(53_400_000.0), epsilon = 1e-4);
    assert_approx_eq!(
        Money,
        results.five_day.costs,
        Money(53_400_000.0 * (0.212 + 0.197 + 0.10) + 2_160_000.0),
        epsilon = 1e-3
    );
    assert_approx_eq!(
        Money,
        results.six_day.revenue,
        Money(53_400_000.0 + 4.0 * 1_200_000.0),
        epsilon = 1e-4
    );
}

#[test]
fn test_run_assignments_applied_in_order() {
    let (state, _) = run(
        Some("strange_brewing"),
        &["water_cost=1", "water_cost=2", "additional_days=2"],
    );
    assert_approx_eq!(f64, state.value(Parameter::WaterCost), 2.0);
    assert_eq!(state.parameters().additional_days, 2);
}

#[test]
fn test_run_invalid_assignment() {
    let assignments = [Assignment::from_str("additional_days=one").unwrap()];
    let mut out = Vec::new();
    let err = run_calculator(None, &assignments, 30, &mut out).unwrap_err();
    assert_eq!(err.to_string(), "Could not apply --set additional_days");
    assert!(out.is_empty());
}

#[test]
fn test_run_missing_file() {
    let mut out = Vec::new();
    let missing = get_scenario_file("no_such_example");
    let err = run_calculator(Some(&missing), &[], 30, &mut out).unwrap_err();
    assert_eq!(err.to_string(), "Failed to load scenario.");
}

#[test]
fn test_run_price_increase_singularity() {
    let (state, out) = run(None, &["price_increase=-100"]);
    assert!(!state.results().five_day.profit.is_finite());
    assert!(out.contains("5 Days: $\u{a0}NaN"));
}
