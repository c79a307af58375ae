//! Linguistic variables
//!
//! `Variable` holds what inputs and outputs share: a name, a range and an
//! ordered set of terms. `InputVariable` adds the crisp value being
//! fuzzified; `OutputVariable` adds the aggregate of a pass, its
//! defuzzifier and the fallback policy for passes that yield no value.

use crate::aggregated::{Aggregated, FuzzyOutput};
use crate::defuzzifier::Defuzzifier;
use crate::diagnostics::Diagnostics;
use crate::formula::format_scalar;
use crate::norm::SNorm;
use crate::settings::EngineSettings;
use crate::term::{Membership, Term};
use crate::{FuzzyError, FuzzyResult};
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    description: String,
    minimum: f64,
    maximum: f64,
    enabled: bool,
    lock_value_in_range: bool,
    terms: Vec<Term>,
}

impl Variable {
    pub fn new(name: impl Into<String>, minimum: f64, maximum: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            minimum,
            maximum,
            enabled: true,
            lock_value_in_range: false,
            terms: Vec::new(),
        }
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

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn range(&self) -> f64 {
        self.maximum - self.minimum
    }

    pub fn set_range(&mut self, minimum: f64, maximum: f64) {
        self.minimum = minimum;
        self.maximum = maximum;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_locked_in_range(&self) -> bool {
        self.lock_value_in_range
    }

    pub fn set_lock_value_in_range(&mut self, lock: bool) {
        self.lock_value_in_range = lock;
    }

    /// Append a term; names are unique within a variable
    pub fn add_term(&mut self, term: Term) -> FuzzyResult<()> {
        if self.term_index(term.name()).is_some() {
            return Err(FuzzyError::Engine(format!(
                "Variable '{}' already has a term named '{}'",
                self.name,
                term.name()
            )));
        }
        self.terms.push(term);
        Ok(())
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub(crate) fn terms_mut(&mut self) -> &mut [Term] {
        &mut self.terms
    }

    pub fn term(&self, name: &str) -> Option<&Term> {
        self.terms.iter().find(|term| term.name() == name)
    }

    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.terms.iter().position(|term| term.name() == name)
    }

    /// The term `x` belongs to most, first declared on ties
    pub fn highest_membership(&self, x: f64) -> Option<(f64, &Term)> {
        let mut best: Option<(f64, &Term)> = None;
        for term in &self.terms {
            let mu = term.membership(x);
            if mu > best.map_or(0.0, |(degree, _)| degree) {
                best = Some((mu, term));
            }
        }
        best
    }

    /// `0.250/low + 0.750/high`
    pub fn fuzzify(&self, x: f64) -> String {
        render_fuzzy(
            self.terms
                .iter()
                .map(|term| (term.membership(x), term.name())),
        )
    }

    fn bound(&self, value: f64) -> f64 {
        if self.lock_value_in_range && !value.is_nan() {
            value.max(self.minimum).min(self.maximum)
        } else {
            value
        }
    }
}

fn render_fuzzy<'a>(degrees: impl Iterator<Item = (f64, &'a str)>) -> String {
    let mut out = String::new();
    for (i, (degree, name)) in degrees.enumerate() {
        if i == 0 {
            if degree.is_sign_negative() && !degree.is_nan() {
                out.push_str("- ");
            }
        } else if degree.is_sign_negative() && !degree.is_nan() {
            out.push_str(" - ");
        } else {
            out.push_str(" + ");
        }
        let magnitude = degree.abs();
        if magnitude.is_finite() {
            out.push_str(&format!("{:.3}/{}", magnitude, name));
        } else {
            out.push_str(&format!("{}/{}", format_scalar(magnitude), name));
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputVariable {
    variable: Variable,
    value: f64,
}

impl InputVariable {
    pub fn new(name: impl Into<String>, minimum: f64, maximum: f64) -> Self {
        Self {
            variable: Variable::new(name, minimum, maximum),
            value: f64::NAN,
        }
    }

    /// Builder form of `add_term`; replaces a term of the same name
    pub fn with_term(mut self, term: Term) -> Self {
        replace_or_push(&mut self.variable, term);
        self
    }

    /// Current value, NaN until set
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = self.variable.bound(value);
    }

    pub fn fuzzy_input_value(&self) -> String {
        self.variable.fuzzify(self.value)
    }
}

impl Deref for InputVariable {
    type Target = Variable;

    fn deref(&self) -> &Variable {
        &self.variable
    }
}

impl DerefMut for InputVariable {
    fn deref_mut(&mut self) -> &mut Variable {
        &mut self.variable
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputVariable {
    variable: Variable,
    fuzzy: Aggregated,
    defuzzifier: Option<Defuzzifier>,
    value: f64,
    previous_value: f64,
    default_value: f64,
    lock_previous_value: bool,
}

impl OutputVariable {
    /// Output aggregated with `Maximum` and without a defuzzifier
    pub fn new(name: impl Into<String>, minimum: f64, maximum: f64) -> Self {
        Self {
            variable: Variable::new(name, minimum, maximum),
            fuzzy: Aggregated::new(Some(SNorm::Maximum)),
            defuzzifier: None,
            value: f64::NAN,
            previous_value: f64::NAN,
            default_value: f64::NAN,
            lock_previous_value: false,
        }
    }

    /// Builder form of `add_term`; replaces a term of the same name
    pub fn with_term(mut self, term: Term) -> Self {
        replace_or_push(&mut self.variable, term);
        self
    }

    pub fn with_defuzzifier(mut self, defuzzifier: Defuzzifier) -> Self {
        self.defuzzifier = Some(defuzzifier);
        self
    }

    pub fn with_aggregation(mut self, aggregation: Option<SNorm>) -> Self {
        self.fuzzy.set_aggregation(aggregation);
        self
    }

    pub fn with_default_value(mut self, value: f64) -> Self {
        self.default_value = value;
        self
    }

    pub fn with_lock_previous_value(mut self, lock: bool) -> Self {
        self.lock_previous_value = lock;
        self
    }

    pub fn with_lock_value_in_range(mut self, lock: bool) -> Self {
        self.variable.set_lock_value_in_range(lock);
        self
    }

    pub fn defuzzifier(&self) -> Option<&Defuzzifier> {
        self.defuzzifier.as_ref()
    }

    pub fn set_defuzzifier(&mut self, defuzzifier: Option<Defuzzifier>) {
        self.defuzzifier = defuzzifier;
    }

    pub fn aggregated(&self) -> &Aggregated {
        &self.fuzzy
    }

    pub(crate) fn aggregated_mut(&mut self) -> &mut Aggregated {
        &mut self.fuzzy
    }

    pub fn fuzzy_output(&self) -> FuzzyOutput<'_> {
        FuzzyOutput::new(self.variable.name(), &self.fuzzy, self.variable.terms())
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = self.variable.bound(value);
    }

    pub fn previous_value(&self) -> f64 {
        self.previous_value
    }

    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    pub fn set_default_value(&mut self, value: f64) {
        self.default_value = value;
    }

    pub fn is_locked_to_previous_value(&self) -> bool {
        self.lock_previous_value
    }

    pub fn set_lock_previous_value(&mut self, lock: bool) {
        self.lock_previous_value = lock;
    }

    /// `0.500/low + 0.250/high` from the degrees accumulated so far
    pub fn fuzzy_output_value(&self) -> String {
        render_fuzzy(
            self.variable
                .terms()
                .iter()
                .enumerate()
                .map(|(i, term)| (self.fuzzy.activation_degree(i), term.name())),
        )
    }

    /// Turn the aggregate into the variable's value.
    ///
    /// An empty aggregate or a NaN result falls back to the previous valid
    /// value when locked to it, otherwise to the default value.
    pub fn defuzzify(
        &mut self,
        settings: &EngineSettings,
        diagnostics: &mut Diagnostics,
    ) -> FuzzyResult<()> {
        if !self.variable.is_enabled() {
            return Ok(());
        }
        if self.value.is_finite() {
            self.previous_value = self.value;
        }

        let defuzzifier = self.defuzzifier.as_ref().ok_or_else(|| {
            FuzzyError::Engine(format!(
                "Output variable '{}' has no defuzzifier",
                self.variable.name()
            ))
        })?;

        let mut result = f64::NAN;
        if !self.fuzzy.is_empty() {
            result = defuzzifier.defuzzify(
                &self.fuzzy_output(),
                self.variable.minimum(),
                self.variable.maximum(),
                settings,
                diagnostics,
            );
        }
        if result.is_nan() {
            result = if self.lock_previous_value && self.previous_value.is_finite() {
                self.previous_value
            } else {
                self.default_value
            };
        }

        tracing::debug!(variable = %self.variable.name(), value = result, "defuzzified");
        self.set_value(result);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.fuzzy.clear();
        self.value = f64::NAN;
        self.previous_value = f64::NAN;
    }
}

impl Deref for OutputVariable {
    type Target = Variable;

    fn deref(&self) -> &Variable {
        &self.variable
    }
}

impl DerefMut for OutputVariable {
    fn deref_mut(&mut self) -> &mut Variable {
        &mut self.variable
    }
}

fn replace_or_push(variable: &mut Variable, term: Term) {
    match variable.term_index(term.name()) {
        Some(index) => variable.terms[index] = term,
        None => variable.terms.push(term),
    }
}
