use fuzzy::*;

fn engine() -> Engine {
    let mut engine = Engine::new("messages");
    engine
        .add_input_variable(
            InputVariable::new("service", 0.0, 10.0)
                .with_term(Term::triangle("poor", 0.0, 0.0, 5.0))
                .with_term(Term::triangle("good", 0.0, 5.0, 10.0)),
        )
        .unwrap();
    engine
        .add_output_variable(
            OutputVariable::new("tip", 0.0, 30.0)
                .with_term(Term::triangle("cheap", 0.0, 5.0, 10.0))
                .with_defuzzifier(Defuzzifier::centroid()),
        )
        .unwrap();
    engine.add_rule_block(RuleBlock::new("rules")).unwrap();
    engine
}

fn rule_error(text: &str) -> FuzzyError {
    match engine().add_rule("rules", text) {
        Err(e) => e,
        Ok(()) => panic!("Expected '{}' to be rejected", text),
    }
}

#[test]
fn test_unknown_term_message() {
    let error = rule_error("if service is awful then tip is cheap");
    assert_eq!(
        error.to_string(),
        "Resolution error: Variable 'service' has no term or hedge named 'awful' \
         (suggestion: Terms of 'service': poor, good) at 1:15"
    );
}

#[test]
fn test_unknown_variable_message() {
    let error = rule_error("if service is poor then bonus is cheap");
    assert_eq!(
        error.to_string(),
        "Resolution error: Unknown variable 'bonus' \
         (suggestion: Known variables: service, tip) at 1:25"
    );
}

#[test]
fn test_missing_keyword_message() {
    let error = rule_error("service is poor then tip is cheap");
    match &error {
        FuzzyError::Syntax(details) => {
            assert_eq!(details.span.col, 1);
            assert!(details.message.starts_with("Unexpected input"));
        }
        other => panic!("Expected syntax error, got: {:?}", other),
    }
    assert!(error
        .to_string()
        .contains("Rules are written as: if <antecedent> then <consequent> [with <weight>]"));
}

#[test]
fn test_invalid_weight() {
    assert!(matches!(
        rule_error("if service is poor then tip is cheap with heavy"),
        FuzzyError::Syntax(_)
    ));
}

#[test]
fn test_not_ready_message() {
    let error = Engine::new("empty").is_ready().unwrap_err();
    assert_eq!(
        error.to_string(),
        "Engine not ready: Engine has no input variables; Engine has no output variables; \
         Engine has no rule blocks"
    );
}

#[test]
fn test_resource_limit_message() {
    let settings = EngineSettings {
        max_formula_bytes: 4,
        ..EngineSettings::default()
    };
    let error = Formula::parse_with("1 + 2 + 3", &settings).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Resource limit exceeded: max_formula_bytes (limit: 4 bytes, actual: 9 bytes). \
         Split the formula or rule into smaller pieces"
    );
}

#[test]
fn test_rule_length_limit() {
    let settings = EngineSettings {
        max_formula_bytes: 16,
        ..EngineSettings::default()
    };
    let mut engine = engine();
    engine.set_settings(settings);
    assert!(matches!(
        engine.add_rule("rules", "if service is poor then tip is cheap"),
        Err(FuzzyError::ResourceLimitExceeded { .. })
    ));
}

#[test]
fn test_missing_binding_message() {
    let error = formula::evaluate("speed * 2", &NoBindings).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Evaluation error: no binding for variable 'speed'"
    );
}

#[test]
fn test_errors_carry_no_details_without_source() {
    let error = Engine::new("empty").is_ready().unwrap_err();
    assert!(error.details().is_none());
    assert!(rule_error("if speed is poor then tip is cheap")
        .details()
        .is_some());
}
