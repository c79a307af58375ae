//! Rule contributions accumulated on an output variable
//!
//! An `Aggregated` only records which of its variable's terms were
//! activated and how strongly. Pairing it with the variable's terms gives
//! a `FuzzyOutput`, the fuzzy set a defuzzifier integrates.

use crate::norm::{SNorm, TNorm};
use crate::term::{Membership, Term};

/// One term fired by one rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Activated {
    /// Index of the term within its output variable
    pub term: usize,
    pub degree: f64,
    pub implication: Option<TNorm>,
}

impl Activated {
    pub fn new(term: usize, degree: f64, implication: Option<TNorm>) -> Self {
        Self {
            term,
            degree,
            implication,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregated {
    aggregation: Option<SNorm>,
    terms: Vec<Activated>,
}

impl Aggregated {
    pub fn new(aggregation: Option<SNorm>) -> Self {
        Self {
            aggregation,
            terms: Vec::new(),
        }
    }

    pub fn aggregation(&self) -> Option<SNorm> {
        self.aggregation
    }

    pub fn set_aggregation(&mut self, aggregation: Option<SNorm>) {
        self.aggregation = aggregation;
    }

    pub fn push(&mut self, activated: Activated) {
        self.terms.push(activated);
    }

    pub fn activated(&self) -> &[Activated] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    /// Combined degree of every contribution to `term`; unaggregated outputs sum them
    pub fn activation_degree(&self, term: usize) -> f64 {
        self.terms
            .iter()
            .filter(|activated| activated.term == term)
            .fold(0.0, |sum, activated| self.combine(sum, activated.degree))
    }

    fn combine(&self, a: f64, b: f64) -> f64 {
        match self.aggregation {
            Some(aggregation) => aggregation.compute(a, b),
            None => a + b,
        }
    }
}

/// An aggregate seen together with the terms it refers to
#[derive(Debug, Clone, Copy)]
pub struct FuzzyOutput<'a> {
    name: &'a str,
    aggregated: &'a Aggregated,
    terms: &'a [Term],
}

impl<'a> FuzzyOutput<'a> {
    pub fn new(name: &'a str, aggregated: &'a Aggregated, terms: &'a [Term]) -> Self {
        Self {
            name,
            aggregated,
            terms,
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn aggregated(&self) -> &'a Aggregated {
        self.aggregated
    }

    pub fn term(&self, index: usize) -> Option<&'a Term> {
        self.terms.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.aggregated.is_empty()
    }

    /// Every contribution carries an implication operator
    pub fn is_implied(&self) -> bool {
        self.aggregated
            .activated()
            .iter()
            .all(|activated| activated.implication.is_some())
    }
}

impl Membership for FuzzyOutput<'_> {
    fn membership(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        let mut mu = 0.0;
        for activated in self.aggregated.activated() {
            let Some(term) = self.terms.get(activated.term) else {
                continue;
            };
            let Some(implication) = activated.implication else {
                return f64::NAN;
            };
            let implied = implication.compute(activated.degree, term.membership(x));
            mu = self.aggregated.combine(mu, implied);
        }
        mu
    }
}
