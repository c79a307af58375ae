use crate::term::{Membership, Shape, Term};
use crate::FuzzyError;
use std::collections::HashMap;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_triangle() {
    let term = Term::triangle("mid", 0.0, 5.0, 10.0);
    assert_eq!(term.membership(5.0), 1.0);
    assert_close(term.membership(2.5), 0.5);
    assert_close(term.membership(7.5), 0.5);
    assert_eq!(term.membership(10.0), 0.0);
    assert_eq!(term.membership(-1.0), 0.0);
}

#[test]
fn test_shoulder_triangle() {
    let term = Term::triangle("low", 0.0, 0.0, 5.0);
    assert_eq!(term.membership(0.0), 1.0);
    assert_close(term.membership(2.5), 0.5);
}

#[test]
fn test_trapezoid() {
    let term = Term::trapezoid("plateau", 0.0, 2.0, 8.0, 10.0);
    assert_close(term.membership(1.0), 0.5);
    assert_eq!(term.membership(5.0), 1.0);
    assert_close(term.membership(9.0), 0.5);
    assert_eq!(term.membership(11.0), 0.0);
}

#[test]
fn test_rectangle() {
    let term = Term::rectangle("band", 2.0, 4.0);
    assert_eq!(term.membership(2.0), 1.0);
    assert_eq!(term.membership(3.0), 1.0);
    assert_eq!(term.membership(5.0), 0.0);
}

#[test]
fn test_gaussian_and_bell() {
    let gaussian = Term::gaussian("g", 0.0, 1.0);
    assert_eq!(gaussian.membership(0.0), 1.0);
    assert_close(gaussian.membership(1.0), (-0.5f64).exp());

    let bell = Term::bell("b", 0.0, 2.0, 3.0);
    assert_eq!(bell.membership(0.0), 1.0);
    assert_close(bell.membership(2.0), 0.5);
}

#[test]
fn test_ramps() {
    let rising = Term::ramp("up", 0.0, 10.0);
    assert_close(rising.membership(5.0), 0.5);
    assert_eq!(rising.membership(-1.0), 0.0);
    assert_eq!(rising.membership(12.0), 1.0);

    let falling = Term::ramp("down", 10.0, 0.0);
    assert_close(falling.membership(2.5), 0.75);
    assert_eq!(falling.membership(12.0), 0.0);
}

#[test]
fn test_sigmoid() {
    let term = Term::sigmoid("s", 5.0, 2.0);
    assert_close(term.membership(5.0), 0.5);
    assert!(term.membership(10.0) > 0.99);
    assert!(term.membership(0.0) < 0.01);
}

#[test]
fn test_s_and_z_shapes() {
    let s = Term::s_shape("s", 0.0, 10.0);
    assert_close(s.membership(2.5), 0.125);
    assert_close(s.membership(5.0), 0.5);
    assert_close(s.membership(7.5), 0.875);
    assert_eq!(s.membership(10.0), 1.0);

    let z = Term::z_shape("z", 0.0, 10.0);
    assert_close(z.membership(2.5), 0.875);
    assert_eq!(z.membership(10.0), 0.0);
}

#[test]
fn test_discrete_interpolates_and_clamps() {
    let term = Term::discrete("d", vec![(0.0, 0.0), (5.0, 1.0), (10.0, 0.0)]).unwrap();
    assert_close(term.membership(2.5), 0.5);
    assert_eq!(term.membership(5.0), 1.0);
    assert_eq!(term.membership(-3.0), 0.0);
    assert_eq!(term.membership(12.0), 0.0);
}

#[test]
fn test_discrete_rejects_bad_points() {
    let unsorted = Term::discrete("d", vec![(5.0, 1.0), (0.0, 0.0)]);
    assert!(matches!(unsorted, Err(FuzzyError::Engine(_))));
    let empty = Term::discrete("d", Vec::new());
    assert!(matches!(empty, Err(FuzzyError::Engine(_))));
}

#[test]
fn test_height_scales_bounded_shapes_only() {
    let peak = Term::triangle("t", 0.0, 5.0, 10.0).with_height(0.5);
    assert_eq!(peak.membership(5.0), 0.5);

    let constant = Term::constant("c", 0.7).with_height(0.5);
    assert_eq!(constant.membership(123.0), 0.7);
}

#[test]
fn test_nan_in_nan_out() {
    let terms = vec![
        Term::triangle("t", 0.0, 1.0, 2.0),
        Term::gaussian("g", 0.0, 1.0),
        Term::constant("c", 0.3),
        Term::ramp("r", 0.0, 1.0),
    ];
    for term in &terms {
        assert!(term.membership(f64::NAN).is_nan(), "{}", term);
    }
}

#[test]
fn test_linear_uses_bound_inputs() {
    let mut term = Term::linear("lin", vec![2.0, 3.0, 1.0]);
    term.bind(&HashMap::new(), &[1.0, 2.0]);
    assert_eq!(term.membership(0.0), 9.0);

    let mut no_constant = Term::linear("lin", vec![2.0, 3.0]);
    no_constant.bind(&HashMap::new(), &[1.0, 2.0]);
    assert_eq!(no_constant.membership(0.0), 8.0);
}

#[test]
fn test_function_term() {
    let mut term = Term::function("f", "x / 10 + offset").unwrap();
    let mut values = HashMap::new();
    values.insert("offset".to_string(), 0.25);
    term.bind(&values, &[]);
    assert_close(term.membership(5.0), 0.75);
}

#[test]
fn test_function_term_missing_binding_is_nan() {
    let term = Term::function("f", "x * unknown").unwrap();
    assert!(term.membership(1.0).is_nan());
}

#[test]
fn test_function_term_rejects_bad_formula() {
    assert!(matches!(
        Term::function("f", "x +"),
        Err(FuzzyError::Syntax(_))
    ));
}

#[test]
fn test_classification() {
    assert!(Term::ramp("r", 0.0, 1.0).is_monotonic());
    assert!(Term::sigmoid("s", 0.0, 1.0).is_monotonic());
    assert!(!Term::triangle("t", 0.0, 1.0, 2.0).is_monotonic());
    assert!(Term::constant("c", 1.0).is_takagi_sugeno());
    assert!(Term::linear("l", vec![1.0]).is_takagi_sugeno());
    assert!(!Term::gaussian("g", 0.0, 1.0).is_takagi_sugeno());
}

#[test]
fn test_display() {
    assert_eq!(Term::triangle("low", 0.0, 1.0, 2.0).to_string(), "low Triangle");
    assert_eq!(
        Term::new("edge", Shape::Ramp { start: 0.0, end: 1.0 }).to_string(),
        "edge Ramp"
    );
}

#[test]
fn test_tsukamoto_ramp() {
    let term = Term::ramp("r", 0.0, 10.0);
    assert_close(term.tsukamoto(0.3, 0.0, 10.0).unwrap(), 3.0);
    let falling = Term::ramp("r", 10.0, 0.0);
    assert_close(falling.tsukamoto(0.3, 0.0, 10.0).unwrap(), 7.0);
}

#[test]
fn test_tsukamoto_sigmoid() {
    let term = Term::sigmoid("s", 5.0, 2.0);
    assert_close(term.tsukamoto(0.5, 0.0, 10.0).unwrap(), 5.0);
    assert_eq!(term.tsukamoto(1.0, 0.0, 10.0), Some(10.0));
    assert_eq!(term.tsukamoto(0.0, 0.0, 10.0), Some(0.0));
}

#[test]
fn test_tsukamoto_s_shape_picks_matching_root() {
    let term = Term::s_shape("s", 0.0, 10.0);
    assert_close(term.tsukamoto(0.125, 0.0, 10.0).unwrap(), 2.5);
    assert_close(term.tsukamoto(0.875, 0.0, 10.0).unwrap(), 7.5);

    let z = Term::z_shape("z", 0.0, 10.0);
    assert_close(z.tsukamoto(0.875, 0.0, 10.0).unwrap(), 2.5);
}

#[test]
fn test_tsukamoto_unavailable_for_non_monotonic() {
    let term = Term::triangle("t", 0.0, 5.0, 10.0);
    assert_eq!(term.tsukamoto(0.5, 0.0, 10.0), None);
}
