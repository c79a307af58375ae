//! Rules: `if <antecedent> then <consequent> [with <weight>]`
//!
//! A rule is compiled against the variables of one engine and keeps
//! handles into them. It must not be moved to an engine with different
//! variables.

mod compiler;
mod expression;

pub use compiler::Vocabulary;
pub use expression::{Antecedent, Connective, Consequent, Expression, Proposition, VariableRef};

use crate::norm::{SNorm, TNorm};
use crate::parser::{origin, split_rule};
use crate::settings::{DisabledVariablePolicy, EngineSettings};
use crate::variable::{InputVariable, OutputVariable};
use crate::FuzzyResult;
use compiler::{compile_clause, Role};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    text: String,
    antecedent: Antecedent,
    consequent: Consequent,
    weight: f64,
    enabled: bool,
    activation_degree: f64,
    triggered: bool,
}

impl Rule {
    /// Compile rule text, resolving every name against `vocabulary`
    pub fn compile(
        text: &str,
        vocabulary: &Vocabulary<'_>,
        settings: &EngineSettings,
    ) -> FuzzyResult<Self> {
        let parts = split_rule(text, settings)?;

        let expression = compile_clause(
            &parts.antecedent.text,
            parts.antecedent.span,
            &parts.source,
            Role::Antecedent,
            vocabulary,
            settings,
        )?;
        let conclusions = compile_clause(
            &parts.consequent.text,
            parts.consequent.span,
            &parts.source,
            Role::Consequent,
            vocabulary,
            settings,
        )?;

        Ok(Self {
            text: text.trim().to_string(),
            antecedent: Antecedent {
                text: parts.antecedent.text,
                expression,
            },
            consequent: Consequent {
                text: parts.consequent.text,
                conclusions: conclusions.propositions().into_iter().cloned().collect(),
            },
            weight: parts.weight.unwrap_or(1.0),
            enabled: true,
            activation_degree: 0.0,
            triggered: false,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn antecedent(&self) -> &Antecedent {
        &self.antecedent
    }

    pub fn consequent(&self) -> &Consequent {
        &self.consequent
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Weighted firing strength from the last activation
    pub fn activation_degree(&self) -> f64 {
        self.activation_degree
    }

    pub(crate) fn set_activation_degree(&mut self, degree: f64) {
        self.activation_degree = degree;
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub(crate) fn deactivate(&mut self) {
        self.activation_degree = 0.0;
        self.triggered = false;
    }

    /// Evaluate the antecedent and scale it by the weight
    pub fn activate_with(
        &mut self,
        conjunction: TNorm,
        disjunction: SNorm,
        inputs: &[InputVariable],
        outputs: &[OutputVariable],
        policy: DisabledVariablePolicy,
    ) -> f64 {
        self.activation_degree = self.weight
            * self
                .antecedent
                .activation_degree(conjunction, disjunction, inputs, outputs, policy);
        tracing::debug!(rule = %self.text, degree = self.activation_degree, "activated");
        self.activation_degree
    }

    /// Fire the consequent when the last activation was positive
    pub fn trigger(
        &mut self,
        implication: Option<TNorm>,
        outputs: &mut [OutputVariable],
        policy: DisabledVariablePolicy,
    ) {
        self.triggered = false;
        if self.enabled && self.activation_degree > 0.0 {
            self.consequent
                .modify(self.activation_degree, implication, outputs, policy);
            self.triggered = true;
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if {} then {}", self.antecedent, self.consequent)?;
        if self.weight != 1.0 {
            write!(f, " with {}", crate::formula::format_scalar(self.weight))?;
        }
        Ok(())
    }
}

impl Antecedent {
    /// Compile a standalone antecedent such as `service is poor or food is rancid`
    pub fn compile(
        text: &str,
        vocabulary: &Vocabulary<'_>,
        settings: &EngineSettings,
    ) -> FuzzyResult<Self> {
        let source: Arc<str> = Arc::from(text);
        let expression = compile_clause(
            text,
            origin(),
            &source,
            Role::Antecedent,
            vocabulary,
            settings,
        )?;
        Ok(Self {
            text: text.to_string(),
            expression,
        })
    }
}

impl Consequent {
    /// Compile a standalone consequent such as `tip is generous and mood is good`
    pub fn compile(
        text: &str,
        vocabulary: &Vocabulary<'_>,
        settings: &EngineSettings,
    ) -> FuzzyResult<Self> {
        let source: Arc<str> = Arc::from(text);
        let expression = compile_clause(
            text,
            origin(),
            &source,
            Role::Consequent,
            vocabulary,
            settings,
        )?;
        Ok(Self {
            text: text.to_string(),
            conclusions: expression.propositions().into_iter().cloned().collect(),
        })
    }
}
