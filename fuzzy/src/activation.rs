//! Activation methods
//!
//! An activation method decides which rules of a block fire and in what
//! order. Every method runs the same evaluate-then-trigger step per rule;
//! they differ only in selection.

use crate::formula::format_scalar;
use crate::rule::Rule;
use crate::rule_block::Operators;
use crate::settings::DisabledVariablePolicy;
use crate::variable::{InputVariable, OutputVariable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    LessThan,
    LessThanOrEqual,
    Equal,
    NotEqual,
    GreaterThanOrEqual,
    GreaterThan,
}

impl Comparison {
    pub fn compare(self, a: f64, b: f64) -> bool {
        match self {
            Comparison::LessThan => a < b,
            Comparison::LessThanOrEqual => a <= b,
            Comparison::Equal => a == b,
            Comparison::NotEqual => a != b,
            Comparison::GreaterThanOrEqual => a >= b,
            Comparison::GreaterThan => a > b,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::LessThan => "<",
            Comparison::LessThanOrEqual => "<=",
            Comparison::Equal => "==",
            Comparison::NotEqual => "!=",
            Comparison::GreaterThanOrEqual => ">=",
            Comparison::GreaterThan => ">",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Activation {
    /// Every enabled rule in declared order
    #[default]
    General,
    /// The first `rules` rules whose degree reaches `threshold`, then stop
    First { rules: usize, threshold: f64 },
    /// As `First`, scanning from the last rule
    Last { rules: usize, threshold: f64 },
    /// Every rule whose degree compares true against `value`
    Threshold { comparison: Comparison, value: f64 },
    /// The `rules` rules with the highest positive degrees, strongest first
    Highest { rules: usize },
    /// The `rules` rules with the lowest positive degrees, weakest first
    Lowest { rules: usize },
    /// Every rule, with degrees divided by their sum
    Proportional,
}

impl Activation {
    pub fn name(&self) -> &'static str {
        match self {
            Activation::General => "General",
            Activation::First { .. } => "First",
            Activation::Last { .. } => "Last",
            Activation::Threshold { .. } => "Threshold",
            Activation::Highest { .. } => "Highest",
            Activation::Lowest { .. } => "Lowest",
            Activation::Proportional => "Proportional",
        }
    }

    pub(crate) fn activate(
        &self,
        rules: &mut [Rule],
        operators: &Operators,
        inputs: &[InputVariable],
        outputs: &mut [OutputVariable],
        policy: DisabledVariablePolicy,
    ) {
        for rule in rules.iter_mut() {
            rule.deactivate();
        }

        match *self {
            Activation::General => {
                for rule in rules.iter_mut().filter(|rule| rule.is_enabled()) {
                    operators.activate(rule, inputs, outputs, policy);
                    operators.trigger(rule, outputs, policy);
                }
            }
            Activation::First { rules: n, threshold } => {
                let enabled = rules.iter_mut().filter(|rule| rule.is_enabled());
                fire_first(enabled, n, threshold, operators, inputs, outputs, policy);
            }
            Activation::Last { rules: n, threshold } => {
                let enabled = rules.iter_mut().rev().filter(|rule| rule.is_enabled());
                fire_first(enabled, n, threshold, operators, inputs, outputs, policy);
            }
            Activation::Threshold { comparison, value } => {
                for rule in rules.iter_mut().filter(|rule| rule.is_enabled()) {
                    let degree = operators.activate(rule, inputs, outputs, policy);
                    if comparison.compare(degree, value) {
                        operators.trigger(rule, outputs, policy);
                    }
                }
            }
            Activation::Highest { rules: n } => {
                let ranked = rank(rules, operators, inputs, outputs, policy, |a, b| b.total_cmp(&a));
                for index in ranked.into_iter().take(n) {
                    operators.trigger(&mut rules[index], outputs, policy);
                }
            }
            Activation::Lowest { rules: n } => {
                let ranked = rank(rules, operators, inputs, outputs, policy, |a, b| a.total_cmp(&b));
                for index in ranked.into_iter().take(n) {
                    operators.trigger(&mut rules[index], outputs, policy);
                }
            }
            Activation::Proportional => {
                let mut sum = 0.0;
                for rule in rules.iter_mut().filter(|rule| rule.is_enabled()) {
                    sum += operators.activate(rule, inputs, outputs, policy);
                }
                for rule in rules.iter_mut().filter(|rule| rule.is_enabled()) {
                    if sum > 0.0 {
                        rule.set_activation_degree(rule.activation_degree() / sum);
                    }
                    operators.trigger(rule, outputs, policy);
                }
            }
        }
    }
}

fn fire_first<'r>(
    candidates: impl Iterator<Item = &'r mut Rule>,
    n: usize,
    threshold: f64,
    operators: &Operators,
    inputs: &[InputVariable],
    outputs: &mut [OutputVariable],
    policy: DisabledVariablePolicy,
) {
    let mut fired = 0;
    for rule in candidates {
        if fired >= n {
            break;
        }
        let degree = operators.activate(rule, inputs, outputs, policy);
        if degree > 0.0 && degree >= threshold {
            operators.trigger(rule, outputs, policy);
            fired += 1;
        }
    }
}

/// Activate every enabled rule, then order those with a positive degree
fn rank(
    rules: &mut [Rule],
    operators: &Operators,
    inputs: &[InputVariable],
    outputs: &[OutputVariable],
    policy: DisabledVariablePolicy,
    order: impl Fn(f64, f64) -> Ordering,
) -> Vec<usize> {
    let mut ranked = Vec::new();
    for (index, rule) in rules.iter_mut().enumerate() {
        if !rule.is_enabled() {
            continue;
        }
        if operators.activate(rule, inputs, outputs, policy) > 0.0 {
            ranked.push(index);
        }
    }
    ranked.sort_by(|&a, &b| order(rules[a].activation_degree(), rules[b].activation_degree()));
    ranked
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Activation::First { rules, threshold } | Activation::Last { rules, threshold } => {
                write!(f, "{} {} {}", self.name(), rules, format_scalar(threshold))
            }
            Activation::Threshold { comparison, value } => {
                write!(f, "{} {} {}", self.name(), comparison.symbol(), format_scalar(value))
            }
            Activation::Highest { rules } | Activation::Lowest { rules } => {
                write!(f, "{} {}", self.name(), rules)
            }
            Activation::General | Activation::Proportional => f.write_str(self.name()),
        }
    }
}
