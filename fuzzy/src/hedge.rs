//! Linguistic hedges
//!
//! A hedge modifies a membership degree before it takes part in a rule:
//! `very` squares it, `not` complements it, `any` ignores it entirely.

use crate::formula::{Formula, Layered, NoBindings};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Hedge {
    /// Always 1.0; written in place of a term
    Any,
    Extremely,
    Not,
    Seldom,
    Somewhat,
    Very,
    /// Formula over `x` registered on an engine under `name`
    Function { name: String, formula: Formula },
}

impl Hedge {
    pub fn from_name(name: &str) -> Option<Self> {
        let hedge = match name {
            "any" => Hedge::Any,
            "extremely" => Hedge::Extremely,
            "not" => Hedge::Not,
            "seldom" => Hedge::Seldom,
            "somewhat" => Hedge::Somewhat,
            "very" => Hedge::Very,
            _ => return None,
        };
        Some(hedge)
    }

    pub fn name(&self) -> &str {
        match self {
            Hedge::Any => "any",
            Hedge::Extremely => "extremely",
            Hedge::Not => "not",
            Hedge::Seldom => "seldom",
            Hedge::Somewhat => "somewhat",
            Hedge::Very => "very",
            Hedge::Function { name, .. } => name,
        }
    }

    pub fn hedge(&self, x: f64) -> f64 {
        match self {
            Hedge::Any => 1.0,
            Hedge::Extremely => {
                if x <= 0.5 {
                    2.0 * x * x
                } else {
                    1.0 - 2.0 * (1.0 - x) * (1.0 - x)
                }
            }
            Hedge::Not => 1.0 - x,
            Hedge::Seldom => {
                if x <= 0.5 {
                    (0.5 * x).sqrt()
                } else {
                    1.0 - (0.5 * (1.0 - x)).sqrt()
                }
            }
            Hedge::Somewhat => x.sqrt(),
            Hedge::Very => x * x,
            Hedge::Function { name, formula } => {
                let bindings = Layered {
                    name: "x",
                    value: x,
                    rest: &NoBindings,
                };
                formula.evaluate(&bindings).unwrap_or_else(|e| {
                    tracing::error!(hedge = %name, error = %e, "hedge formula failed");
                    f64::NAN
                })
            }
        }
    }

    /// `any` stands in for a term and ends a proposition
    pub fn is_terminal(&self) -> bool {
        matches!(self, Hedge::Any)
    }
}

impl fmt::Display for Hedge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Apply hedges written left to right; the one nearest the term applies first
pub(crate) fn apply_hedges(hedges: &[Hedge], degree: f64) -> f64 {
    hedges
        .iter()
        .rev()
        .fold(degree, |degree, hedge| hedge.hedge(degree))
}
