//! Compiled antecedents and consequents

use crate::aggregated::Activated;
use crate::ast::Span;
use crate::hedge::{apply_hedges, Hedge};
use crate::norm::{SNorm, TNorm};
use crate::parser::shunting_yard::Operator;
use crate::settings::DisabledVariablePolicy;
use crate::term::Membership;
use crate::variable::{InputVariable, OutputVariable};
use std::fmt;

/// Handle to a variable of the engine a rule was compiled against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableRef {
    Input(usize),
    Output(usize),
}

/// `<variable> is [hedge]* <term>`
#[derive(Debug, Clone, PartialEq)]
pub struct Proposition {
    pub(crate) variable: VariableRef,
    pub(crate) variable_name: String,
    pub(crate) hedges: Vec<Hedge>,
    /// `None` when the proposition ends in `any`
    pub(crate) term: Option<usize>,
    pub(crate) term_name: Option<String>,
    pub(crate) span: Span,
}

impl Proposition {
    pub fn variable(&self) -> VariableRef {
        self.variable
    }

    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    pub fn hedges(&self) -> &[Hedge] {
        &self.hedges
    }

    pub fn term(&self) -> Option<usize> {
        self.term
    }

    pub fn term_name(&self) -> Option<&str> {
        self.term_name.as_deref()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    fn degree(
        &self,
        inputs: &[InputVariable],
        outputs: &[OutputVariable],
        policy: DisabledVariablePolicy,
    ) -> f64 {
        let (enabled, mu) = match self.variable {
            VariableRef::Input(index) => match inputs.get(index) {
                Some(input) => (
                    input.is_enabled(),
                    self.term.map(|term| {
                        input
                            .terms()
                            .get(term)
                            .map_or(f64::NAN, |term| term.membership(input.value()))
                    }),
                ),
                None => return f64::NAN,
            },
            VariableRef::Output(index) => match outputs.get(index) {
                Some(output) => (
                    output.is_enabled(),
                    self.term
                        .map(|term| output.aggregated().activation_degree(term)),
                ),
                None => return f64::NAN,
            },
        };
        if !enabled && policy == DisabledVariablePolicy::Suppress {
            return 0.0;
        }
        apply_hedges(&self.hedges, mu.unwrap_or(1.0))
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is", self.variable_name)?;
        for hedge in &self.hedges {
            write!(f, " {}", hedge)?;
        }
        match &self.term_name {
            Some(term) => write!(f, " {}", term),
            None => write!(f, " any"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub fn keyword(self) -> &'static str {
        match self {
            Connective::And => "and",
            Connective::Or => "or",
        }
    }
}

impl Operator for Connective {
    fn precedence(&self) -> u8 {
        match self {
            Connective::And => 50,
            Connective::Or => 40,
        }
    }

    fn is_right_associative(&self) -> bool {
        false
    }

    fn arity(&self) -> usize {
        2
    }

    fn symbol(&self) -> &'static str {
        self.keyword()
    }
}

/// Propositions joined by `and`/`or`
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Proposition(Proposition),
    Operator {
        connective: Connective,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    pub(crate) fn degree(
        &self,
        conjunction: TNorm,
        disjunction: SNorm,
        inputs: &[InputVariable],
        outputs: &[OutputVariable],
        policy: DisabledVariablePolicy,
    ) -> f64 {
        match self {
            Expression::Proposition(proposition) => proposition.degree(inputs, outputs, policy),
            Expression::Operator {
                connective,
                left,
                right,
            } => {
                let a = left.degree(conjunction, disjunction, inputs, outputs, policy);
                let b = right.degree(conjunction, disjunction, inputs, outputs, policy);
                match connective {
                    Connective::And => conjunction.compute(a, b),
                    Connective::Or => disjunction.compute(a, b),
                }
            }
        }
    }

    /// Propositions left to right
    pub fn propositions(&self) -> Vec<&Proposition> {
        let mut found = Vec::new();
        self.collect(&mut found);
        found
    }

    fn collect<'a>(&'a self, found: &mut Vec<&'a Proposition>) {
        match self {
            Expression::Proposition(proposition) => found.push(proposition),
            Expression::Operator { left, right, .. } => {
                left.collect(found);
                right.collect(found);
            }
        }
    }

    fn precedence(&self) -> Option<u8> {
        match self {
            Expression::Proposition(_) => None,
            Expression::Operator { connective, .. } => Some(connective.precedence()),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Proposition(proposition) => write!(f, "{}", proposition),
            Expression::Operator {
                connective,
                left,
                right,
            } => {
                let own = connective.precedence();
                match left.precedence() {
                    Some(p) if p < own => write!(f, "({})", left)?,
                    _ => write!(f, "{}", left)?,
                }
                write!(f, " {} ", connective.keyword())?;
                match right.precedence() {
                    Some(p) if p <= own => write!(f, "({})", right),
                    _ => write!(f, "{}", right),
                }
            }
        }
    }
}

/// The `if` half of a rule
#[derive(Debug, Clone, PartialEq)]
pub struct Antecedent {
    pub(crate) text: String,
    pub(crate) expression: Expression,
}

impl Antecedent {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Firing strength for the current variable values
    pub fn activation_degree(
        &self,
        conjunction: TNorm,
        disjunction: SNorm,
        inputs: &[InputVariable],
        outputs: &[OutputVariable],
        policy: DisabledVariablePolicy,
    ) -> f64 {
        self.expression
            .degree(conjunction, disjunction, inputs, outputs, policy)
    }
}

impl fmt::Display for Antecedent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// The `then` half of a rule: independent conclusions on output variables
#[derive(Debug, Clone, PartialEq)]
pub struct Consequent {
    pub(crate) text: String,
    pub(crate) conclusions: Vec<Proposition>,
}

impl Consequent {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn conclusions(&self) -> &[Proposition] {
        &self.conclusions
    }

    /// Add one contribution per conclusion, each hedged on its own copy of `degree`
    pub fn modify(
        &self,
        degree: f64,
        implication: Option<TNorm>,
        outputs: &mut [OutputVariable],
        policy: DisabledVariablePolicy,
    ) {
        for conclusion in &self.conclusions {
            let (VariableRef::Output(index), Some(term)) = (conclusion.variable, conclusion.term)
            else {
                continue;
            };
            let Some(output) = outputs.get_mut(index) else {
                continue;
            };
            if !output.is_enabled() && policy == DisabledVariablePolicy::Suppress {
                continue;
            }
            let hedged = apply_hedges(&conclusion.hedges, degree);
            output
                .aggregated_mut()
                .push(Activated::new(term, hedged, implication));
        }
    }
}

impl fmt::Display for Consequent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, conclusion) in self.conclusions.iter().enumerate() {
            if i > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{}", conclusion)?;
        }
        Ok(())
    }
}
