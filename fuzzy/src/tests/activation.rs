use crate::activation::{Activation, Comparison};
use crate::defuzzifier::Defuzzifier;
use crate::engine::Engine;
use crate::rule_block::RuleBlock;
use crate::settings::{DisabledVariablePolicy, EngineSettings};
use crate::term::{Membership, Term};
use crate::variable::{InputVariable, OutputVariable};

/// Four rules whose antecedents evaluate to 0.2, 0.9, 0.5 and 0.7
fn engine(activation: Activation) -> Engine {
    let mut engine = Engine::new("activation");
    engine
        .add_input_variable(
            InputVariable::new("x", 0.0, 1.0)
                .with_term(Term::constant("t1", 0.2))
                .with_term(Term::constant("t2", 0.9))
                .with_term(Term::constant("t3", 0.5))
                .with_term(Term::constant("t4", 0.7)),
        )
        .unwrap();
    engine
        .add_output_variable(
            OutputVariable::new("y", 0.0, 1.0)
                .with_term(Term::triangle("o1", 0.0, 0.1, 0.2))
                .with_term(Term::triangle("o2", 0.2, 0.35, 0.5))
                .with_term(Term::triangle("o3", 0.5, 0.65, 0.8))
                .with_term(Term::triangle("o4", 0.8, 0.9, 1.0))
                .with_defuzzifier(Defuzzifier::centroid()),
        )
        .unwrap();
    engine
        .add_rule_block(RuleBlock::new("rules").with_activation(activation))
        .unwrap();
    for i in 1..=4 {
        engine
            .add_rule("rules", &format!("if x is t{} then y is o{}", i, i))
            .unwrap();
    }
    engine.set_input_value("x", 0.5).unwrap();
    engine
}

fn triggered(activation: Activation) -> Vec<bool> {
    let mut engine = engine(activation);
    engine.process().unwrap();
    engine.rule_blocks()[0]
        .rules()
        .iter()
        .map(|rule| rule.is_triggered())
        .collect()
}

#[test]
fn test_general_fires_every_rule() {
    assert_eq!(triggered(Activation::General), vec![true, true, true, true]);
}

#[test]
fn test_first_stops_after_n_rules_over_threshold() {
    let activation = Activation::First {
        rules: 2,
        threshold: 0.3,
    };
    assert_eq!(triggered(activation), vec![false, true, true, false]);
}

#[test]
fn test_first_leaves_unvisited_rules_inactive() {
    let mut engine = engine(Activation::First {
        rules: 1,
        threshold: 0.0,
    });
    engine.process().unwrap();
    let rules = engine.rule_blocks()[0].rules();
    assert!((rules[0].activation_degree() - 0.2).abs() < 1e-12);
    assert_eq!(rules[1].activation_degree(), 0.0);
}

#[test]
fn test_last_scans_from_the_end() {
    let activation = Activation::Last {
        rules: 1,
        threshold: 0.0,
    };
    assert_eq!(triggered(activation), vec![false, false, false, true]);
}

#[test]
fn test_threshold() {
    let activation = Activation::Threshold {
        comparison: Comparison::GreaterThan,
        value: 0.6,
    };
    assert_eq!(triggered(activation), vec![false, true, false, true]);

    let activation = Activation::Threshold {
        comparison: Comparison::LessThanOrEqual,
        value: 0.5,
    };
    assert_eq!(triggered(activation), vec![true, false, true, false]);
}

#[test]
fn test_highest() {
    assert_eq!(
        triggered(Activation::Highest { rules: 2 }),
        vec![false, true, false, true]
    );
}

#[test]
fn test_lowest() {
    assert_eq!(
        triggered(Activation::Lowest { rules: 2 }),
        vec![true, false, true, false]
    );
}

#[test]
fn test_proportional_normalises_degrees() {
    let mut engine = engine(Activation::Proportional);
    engine.process().unwrap();
    let rules = engine.rule_blocks()[0].rules();
    let total: f64 = rules.iter().map(|rule| rule.activation_degree()).sum();
    assert!((total - 1.0).abs() < 1e-12);
    assert!((rules[1].activation_degree() - 0.9 / 2.3).abs() < 1e-12);
    assert!(rules.iter().all(|rule| rule.is_triggered()));
}

#[test]
fn test_disabled_rules_are_skipped() {
    let mut engine = engine(Activation::General);
    engine.rule_block_mut("rules").unwrap().rules_mut()[1].set_enabled(false);
    engine.process().unwrap();
    let rules = engine.rule_blocks()[0].rules();
    assert!(!rules[1].is_triggered());
    assert_eq!(rules[1].activation_degree(), 0.0);
}

#[test]
fn test_disabled_block_contributes_nothing() {
    let mut engine = engine(Activation::General);
    engine.rule_block_mut("rules").unwrap().set_enabled(false);
    let report = engine.process().unwrap();
    assert!(report.outputs[0].activated.is_empty());
    assert!(report.value_of("y").unwrap().is_nan());
}

#[test]
fn test_mutually_exclusive_rules() {
    let mut engine = Engine::new("exclusive");
    engine
        .add_input_variable(
            InputVariable::new("x", 0.0, 10.0)
                .with_term(Term::triangle("A", 0.0, 2.0, 4.0))
                .with_term(Term::triangle("B", 6.0, 8.0, 10.0)),
        )
        .unwrap();
    engine
        .add_output_variable(
            OutputVariable::new("y", 0.0, 10.0)
                .with_term(Term::triangle("P", 0.0, 2.5, 5.0))
                .with_term(Term::triangle("Q", 5.0, 7.5, 10.0))
                .with_defuzzifier(Defuzzifier::centroid()),
        )
        .unwrap();
    engine.add_rule_block(RuleBlock::new("rules")).unwrap();
    engine.add_rule("rules", "if x is A then y is P").unwrap();
    engine.add_rule("rules", "if x is B then y is Q").unwrap();
    engine.set_input_value("x", 3.0).unwrap();
    let report = engine.process().unwrap();

    let output = engine.output_variable("y").unwrap();
    assert_eq!(output.aggregated().activated().len(), 1);
    let fuzzy = output.fuzzy_output();
    let p = Term::triangle("P", 0.0, 2.5, 5.0);
    for i in 0..=20 {
        let z = i as f64 * 0.5;
        assert_eq!(fuzzy.membership(z), p.membership(z).min(0.5), "at {}", z);
    }
    assert!((report.value_of("y").unwrap() - 2.5).abs() < 1e-9);
}

#[test]
fn test_suppressed_disabled_input() {
    let settings = EngineSettings {
        disabled_variables: DisabledVariablePolicy::Suppress,
        ..EngineSettings::default()
    };
    let mut engine = engine(Activation::General);
    engine.set_settings(settings);
    engine.input_variable_mut("x").unwrap().set_enabled(false);
    engine.process().unwrap();
    let rules = engine.rule_blocks()[0].rules();
    assert!(rules.iter().all(|rule| !rule.is_triggered()));
}

#[test]
fn test_disabled_input_still_evaluated_by_default() {
    let mut engine = engine(Activation::General);
    engine.input_variable_mut("x").unwrap().set_enabled(false);
    engine.process().unwrap();
    let rules = engine.rule_blocks()[0].rules();
    assert!(rules.iter().all(|rule| rule.is_triggered()));
}

#[test]
fn test_display() {
    assert_eq!(Activation::General.to_string(), "General");
    assert_eq!(
        Activation::First {
            rules: 1,
            threshold: 0.5
        }
        .to_string(),
        "First 1 0.5"
    );
    assert_eq!(
        Activation::Threshold {
            comparison: Comparison::GreaterThanOrEqual,
            value: 0.5
        }
        .to_string(),
        "Threshold >= 0.5"
    );
    assert_eq!(Activation::Highest { rules: 2 }.to_string(), "Highest 2");
}
