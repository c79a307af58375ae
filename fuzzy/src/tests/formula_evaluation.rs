use crate::formula::{evaluate, Formula, NoBindings};
use crate::FuzzyError;
use std::collections::HashMap;

fn eval(text: &str) -> f64 {
    evaluate(text, &NoBindings).unwrap()
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(eval("2 + 3 * 4"), 14.0);
    assert_eq!(eval("(2 + 3) * 4"), 20.0);
    assert_eq!(eval("10 - 4 - 3"), 3.0);
    assert_eq!(eval("100 / 10 / 5"), 2.0);
    assert_eq!(eval("10 % 4"), 2.0);
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(eval("2 ^ 3 ^ 2"), 512.0);
    assert_eq!(eval("(2 ^ 3) ^ 2"), 64.0);
}

#[test]
fn test_negation_binds_tighter_than_power() {
    assert_eq!(eval("-2 ^ 2"), 4.0);
    assert_eq!(eval("-(2 ^ 2)"), -4.0);
    assert_eq!(eval("2 ^ -1"), 0.5);
    assert_eq!(eval("~3"), -3.0);
}

#[test]
fn test_subtraction_of_negation() {
    assert_eq!(eval("2 - -3"), 5.0);
    assert_eq!(eval("--4"), 4.0);
}

#[test]
fn test_comparison_and_logic() {
    assert_eq!(eval("1 < 2"), 1.0);
    assert_eq!(eval("1 >= 2"), 0.0);
    assert_eq!(eval("1 < 2 and 3 > 4"), 0.0);
    assert_eq!(eval("1 < 2 or 3 > 4"), 1.0);
    assert_eq!(eval("1 < 2 && 2 == 2"), 1.0);
    assert_eq!(eval("0 || 0"), 0.0);
    assert_eq!(eval("!0"), 1.0);
    assert_eq!(eval("1 != 1"), 0.0);
}

#[test]
fn test_functions() {
    assert_eq!(eval("max(1, 2) + min(3, 4)"), 5.0);
    assert_eq!(eval("pow(2, 10)"), 1024.0);
    assert_eq!(eval("abs(-7)"), 7.0);
    assert_eq!(eval("sqrt(16)"), 4.0);
    assert_eq!(eval("fmod(7, 4)"), 3.0);
    assert_eq!(eval("sin(0)"), 0.0);
    assert_eq!(eval("gt(3, 2)"), 1.0);
    assert_eq!(eval("le(3, 2)"), 0.0);
    assert_eq!(eval("floor(2.7) + ceil(2.2)"), 5.0);
}

#[test]
fn test_constants() {
    assert_eq!(eval("pi"), std::f64::consts::PI);
    assert_eq!(eval("e"), std::f64::consts::E);
    assert_eq!(eval("inf"), f64::INFINITY);
    assert!(eval("nan").is_nan());
}

#[test]
fn test_scientific_notation() {
    assert_eq!(eval("1.5e3"), 1500.0);
    assert_eq!(eval("2E-2 * 100"), 2.0);
    assert_eq!(eval(".5 + .5"), 1.0);
}

#[test]
fn test_variable_bindings() {
    let bindings = [("x", 3.0), ("y", 4.0)];
    assert_eq!(evaluate("sqrt(x ^ 2 + y ^ 2)", &bindings).unwrap(), 5.0);

    let mut map = HashMap::new();
    map.insert("speed.max".to_string(), 10.0);
    assert_eq!(evaluate("speed.max / 2", &map).unwrap(), 5.0);
}

#[test]
fn test_function_name_used_as_variable() {
    let bindings = [("sin", 2.0)];
    assert_eq!(evaluate("sin + 1", &bindings).unwrap(), 3.0);
}

#[test]
fn test_missing_binding_names_variable() {
    let result = evaluate("x + y", &[("x", 1.0)]);
    match result {
        Err(FuzzyError::MissingBinding { name }) => assert_eq!(name, "y"),
        other => panic!("Expected missing binding error, got: {:?}", other),
    }
}

#[test]
fn test_missing_binding_message() {
    let error = evaluate("x * 2", &NoBindings).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Evaluation error: no binding for variable 'x'"
    );
}

#[test]
fn test_evaluation_is_repeatable() {
    let formula = Formula::parse("x ^ 2 + sin(x) * y").unwrap();
    let bindings = [("x", 0.7), ("y", -2.0)];
    let first = formula.evaluate(&bindings).unwrap();
    let second = formula.evaluate(&bindings).unwrap();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn test_variables_in_order_of_appearance() {
    let formula = Formula::parse("x + y * x + sin(z) - pi").unwrap();
    assert_eq!(formula.variables(), vec!["x", "y", "z"]);
}
