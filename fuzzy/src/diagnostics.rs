//! Non-fatal warnings raised while inferring
//!
//! Diagnostics never interrupt a pass. Each one is logged when it is
//! recorded and returned with the report of the pass that raised it.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Sample spacing of an integral defuzzifier is wider than one unit
    Accuracy {
        variable: String,
        range: f64,
        resolution: usize,
    },
    /// A Tsukamoto inversion did not reproduce its activation degree
    Inaccuracy {
        variable: String,
        term: String,
        expected: f64,
        obtained: f64,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Accuracy {
                variable,
                range,
                resolution,
            } => write!(
                f,
                "'{}': range {} is wider than resolution {}; results may be inaccurate",
                variable, range, resolution
            ),
            Diagnostic::Inaccuracy {
                variable,
                term,
                expected,
                obtained,
            } => write!(
                f,
                "'{}': term '{}' expected membership {} but obtained {}",
                variable, term, expected, obtained
            ),
        }
    }
}

/// Collects diagnostics for one inference pass
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
