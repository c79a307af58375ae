use crate::activation::Activation;
use crate::norm::{SNorm, TNorm};
use crate::rule::Rule;
use crate::settings::DisabledVariablePolicy;
use crate::variable::{InputVariable, OutputVariable};

/// Norms a rule block evaluates its rules with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operators {
    pub conjunction: TNorm,
    pub disjunction: SNorm,
    /// `None` for blocks whose outputs are only defuzzified by weight
    pub implication: Option<TNorm>,
}

impl Default for Operators {
    fn default() -> Self {
        Self {
            conjunction: TNorm::Minimum,
            disjunction: SNorm::Maximum,
            implication: Some(TNorm::Minimum),
        }
    }
}

impl Operators {
    pub(crate) fn activate(
        &self,
        rule: &mut Rule,
        inputs: &[InputVariable],
        outputs: &[OutputVariable],
        policy: DisabledVariablePolicy,
    ) -> f64 {
        rule.activate_with(self.conjunction, self.disjunction, inputs, outputs, policy)
    }

    pub(crate) fn trigger(
        &self,
        rule: &mut Rule,
        outputs: &mut [OutputVariable],
        policy: DisabledVariablePolicy,
    ) {
        rule.trigger(self.implication, outputs, policy);
    }
}

/// An ordered set of rules sharing norms and an activation method
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBlock {
    name: String,
    description: String,
    enabled: bool,
    operators: Operators,
    activation: Activation,
    rules: Vec<Rule>,
}

impl RuleBlock {
    /// Minimum / Maximum / Minimum implication, General activation
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            enabled: true,
            operators: Operators::default(),
            activation: Activation::General,
            rules: Vec::new(),
        }
    }

    pub fn with_conjunction(mut self, conjunction: TNorm) -> Self {
        self.operators.conjunction = conjunction;
        self
    }

    pub fn with_disjunction(mut self, disjunction: SNorm) -> Self {
        self.operators.disjunction = disjunction;
        self
    }

    pub fn with_implication(mut self, implication: Option<TNorm>) -> Self {
        self.operators.implication = implication;
        self
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn operators(&self) -> &Operators {
        &self.operators
    }

    pub fn operators_mut(&mut self) -> &mut Operators {
        &mut self.operators
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn set_activation(&mut self, activation: Activation) {
        self.activation = activation;
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut [Rule] {
        &mut self.rules
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Run the activation method over this block's rules
    pub fn activate(
        &mut self,
        inputs: &[InputVariable],
        outputs: &mut [OutputVariable],
        policy: DisabledVariablePolicy,
    ) {
        tracing::debug!(block = %self.name, activation = %self.activation, "activating rule block");
        self.activation
            .activate(&mut self.rules, &self.operators, inputs, outputs, policy);
    }

    pub(crate) fn deactivate(&mut self) {
        for rule in &mut self.rules {
            rule.deactivate();
        }
    }
}
