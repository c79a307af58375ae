use crate::aggregated::{Activated, Aggregated, FuzzyOutput};
use crate::defuzzifier::{integral, Defuzzifier, WeightedType};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::norm::{SNorm, TNorm};
use crate::settings::EngineSettings;
use crate::term::{Membership, Term};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

fn defuzzify(
    defuzzifier: Defuzzifier,
    aggregated: &Aggregated,
    terms: &[Term],
    minimum: f64,
    maximum: f64,
) -> (f64, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let fuzzy = FuzzyOutput::new("out", aggregated, terms);
    let value = defuzzifier.defuzzify(
        &fuzzy,
        minimum,
        maximum,
        &EngineSettings::default(),
        &mut diagnostics,
    );
    (value, diagnostics)
}

#[test]
fn test_centroid_of_symmetric_triangle() {
    let term = Term::triangle("t", 0.0, 5.0, 10.0);
    assert_close(integral::centroid(&term, 0.0, 10.0, 200), 5.0, 1e-9);
}

#[test]
fn test_bisector_of_symmetric_triangle() {
    let term = Term::triangle("t", 0.0, 5.0, 10.0);
    assert_close(integral::bisector(&term, 0.0, 10.0, 200), 5.0, 0.05);
}

#[test]
fn test_centroid_of_off_center_triangle() {
    let term = Term::triangle("t", 0.0, 0.0, 9.0);
    assert_close(integral::centroid(&term, 0.0, 9.0, 900), 3.0, 0.01);
}

#[test]
fn test_maximum_family_on_plateau() {
    let term = Term::trapezoid("t", 0.0, 4.0, 6.0, 10.0);
    assert_close(integral::smallest_of_maximum(&term, 0.0, 10.0, 100), 4.05, 1e-9);
    assert_close(integral::largest_of_maximum(&term, 0.0, 10.0, 100), 5.95, 1e-9);
    assert_close(integral::mean_of_maximum(&term, 0.0, 10.0, 100), 5.0, 1e-9);
}

#[test]
fn test_mean_of_maximum_uses_first_plateau() {
    let first = Term::rectangle("first", 1.0, 2.0);
    let second = Term::rectangle("second", 7.0, 8.0);
    let mut aggregated = Aggregated::new(Some(SNorm::Maximum));
    aggregated.push(Activated::new(0, 1.0, Some(TNorm::Minimum)));
    aggregated.push(Activated::new(1, 1.0, Some(TNorm::Minimum)));
    let terms = [first, second];
    let fuzzy = FuzzyOutput::new("out", &aggregated, &terms);
    assert_close(integral::mean_of_maximum(&fuzzy, 0.0, 10.0, 100), 1.5, 1e-9);
}

#[test]
fn test_unbounded_range_is_nan() {
    let term = Term::triangle("t", 0.0, 5.0, 10.0);
    assert!(integral::centroid(&term, f64::NEG_INFINITY, 10.0, 100).is_nan());
    assert!(integral::bisector(&term, 0.0, f64::NAN, 100).is_nan());
    assert!(integral::mean_of_maximum(&term, 0.0, f64::INFINITY, 100).is_nan());
}

#[test]
fn test_centroid_of_clipped_output() {
    let terms = [Term::triangle("t", 0.0, 5.0, 10.0)];
    let mut aggregated = Aggregated::new(Some(SNorm::Maximum));
    aggregated.push(Activated::new(0, 0.5, Some(TNorm::Minimum)));

    let fuzzy = FuzzyOutput::new("out", &aggregated, &terms);
    assert_eq!(fuzzy.membership(5.0), 0.5);
    assert_close(fuzzy.membership(1.0), 0.2, 1e-9);

    let (value, diagnostics) = defuzzify(Defuzzifier::centroid(), &aggregated, &terms, 0.0, 10.0);
    assert_close(value, 5.0, 1e-9);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_coarse_resolution_raises_accuracy_diagnostic() {
    let terms = [Term::triangle("t", 0.0, 50.0, 100.0)];
    let mut aggregated = Aggregated::new(Some(SNorm::Maximum));
    aggregated.push(Activated::new(0, 1.0, Some(TNorm::Minimum)));

    let (value, diagnostics) = defuzzify(
        Defuzzifier::Centroid { resolution: 10 },
        &aggregated,
        &terms,
        0.0,
        100.0,
    );
    assert_close(value, 50.0, 1e-9);
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        diagnostics.iter().next(),
        Some(Diagnostic::Accuracy { resolution: 10, .. })
    ));
}

#[test]
fn test_integral_without_implication_is_nan() {
    let terms = [Term::triangle("t", 0.0, 5.0, 10.0)];
    let mut aggregated = Aggregated::new(Some(SNorm::Maximum));
    aggregated.push(Activated::new(0, 1.0, None));
    let (value, _) = defuzzify(Defuzzifier::centroid(), &aggregated, &terms, 0.0, 10.0);
    assert!(value.is_nan());
}

fn constants() -> Vec<Term> {
    vec![Term::constant("low", 0.2), Term::constant("high", 0.8)]
}

#[test]
fn test_weighted_average_of_constants() {
    let terms = constants();
    let mut aggregated = Aggregated::new(None);
    aggregated.push(Activated::new(0, 0.5, None));
    aggregated.push(Activated::new(1, 0.5, None));
    let (value, _) = defuzzify(Defuzzifier::weighted_average(), &aggregated, &terms, 0.0, 1.0);
    assert_close(value, 0.5, 1e-12);
}

#[test]
fn test_weighted_average_and_sum_differ_by_normalisation() {
    let terms = constants();
    let mut aggregated = Aggregated::new(None);
    aggregated.push(Activated::new(0, 0.25, None));
    aggregated.push(Activated::new(1, 0.5, None));

    let (average, _) = defuzzify(Defuzzifier::weighted_average(), &aggregated, &terms, 0.0, 1.0);
    let (sum, _) = defuzzify(Defuzzifier::weighted_sum(), &aggregated, &terms, 0.0, 1.0);
    assert_close(sum, 0.45, 1e-12);
    assert_close(average, 0.6, 1e-12);
}

#[test]
fn test_weighted_with_aggregation_groups_by_term() {
    let terms = constants();
    let mut aggregated = Aggregated::new(Some(SNorm::Maximum));
    aggregated.push(Activated::new(1, 0.3, None));
    aggregated.push(Activated::new(1, 0.6, None));
    let (sum, _) = defuzzify(Defuzzifier::weighted_sum(), &aggregated, &terms, 0.0, 1.0);
    assert_close(sum, 0.48, 1e-12);

    aggregated.set_aggregation(None);
    let (unaggregated, _) = defuzzify(Defuzzifier::weighted_sum(), &aggregated, &terms, 0.0, 1.0);
    assert_close(unaggregated, 0.72, 1e-12);
}

#[test]
fn test_weighted_of_nothing_is_nan() {
    let terms = constants();
    let aggregated = Aggregated::new(None);
    let (average, _) = defuzzify(Defuzzifier::weighted_average(), &aggregated, &terms, 0.0, 1.0);
    let (sum, _) = defuzzify(Defuzzifier::weighted_sum(), &aggregated, &terms, 0.0, 1.0);
    assert!(average.is_nan());
    assert!(sum.is_nan());
}

#[test]
fn test_weighted_average_of_zero_weights_is_nan() {
    let terms = constants();
    let mut aggregated = Aggregated::new(None);
    aggregated.push(Activated::new(0, 0.0, None));
    let (average, _) = defuzzify(Defuzzifier::weighted_average(), &aggregated, &terms, 0.0, 1.0);
    assert!(average.is_nan());
}

#[test]
fn test_tsukamoto_inverts_monotonic_terms() {
    let terms = [Term::ramp("rising", 0.0, 10.0)];
    let mut aggregated = Aggregated::new(None);
    aggregated.push(Activated::new(0, 0.3, None));
    let (value, diagnostics) =
        defuzzify(Defuzzifier::weighted_average(), &aggregated, &terms, 0.0, 10.0);
    assert_close(value, 3.0, 1e-9);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_tsukamoto_fallback_reports_inaccuracy() {
    let terms = [Term::triangle("peak", 0.0, 5.0, 10.0)];
    let mut aggregated = Aggregated::new(None);
    aggregated.push(Activated::new(0, 0.5, None));
    let (value, diagnostics) = defuzzify(
        Defuzzifier::WeightedAverage {
            weighted: WeightedType::Tsukamoto,
        },
        &aggregated,
        &terms,
        0.0,
        10.0,
    );
    assert_close(value, 0.1, 1e-9);
    match diagnostics.iter().next() {
        Some(Diagnostic::Inaccuracy { term, expected, .. }) => {
            assert_eq!(term, "peak");
            assert_eq!(*expected, 0.5);
        }
        other => panic!("Expected inaccuracy diagnostic, got: {:?}", other),
    };
}

#[test]
fn test_forced_takagi_sugeno_evaluates_term() {
    let terms = [Term::ramp("rising", 0.0, 10.0)];
    let mut aggregated = Aggregated::new(None);
    aggregated.push(Activated::new(0, 0.5, None));
    let (value, _) = defuzzify(
        Defuzzifier::WeightedSum {
            weighted: WeightedType::TakagiSugeno,
        },
        &aggregated,
        &terms,
        0.0,
        10.0,
    );
    // ramp(0.5) = 0.05, weighted by 0.5
    assert_close(value, 0.025, 1e-12);
}

#[test]
fn test_display_and_classification() {
    assert_eq!(Defuzzifier::centroid().to_string(), "Centroid 200");
    assert_eq!(
        Defuzzifier::weighted_average().to_string(),
        "WeightedAverage Automatic"
    );
    assert!(Defuzzifier::bisector().is_integral());
    assert!(!Defuzzifier::weighted_sum().is_integral());
    assert_eq!(Defuzzifier::weighted_sum().resolution(), None);
}
