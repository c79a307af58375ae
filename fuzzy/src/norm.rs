//! Triangular norms and conorms
//!
//! T-norms combine conjunctions and implications, S-norms combine
//! disjunctions and aggregate rule contributions.

use crate::FuzzyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TNorm {
    Minimum,
    AlgebraicProduct,
    BoundedDifference,
    DrasticProduct,
    EinsteinProduct,
    HamacherProduct,
    NilpotentMinimum,
}

impl TNorm {
    pub fn compute(self, a: f64, b: f64) -> f64 {
        match self {
            TNorm::Minimum => a.min(b),
            TNorm::AlgebraicProduct => a * b,
            TNorm::BoundedDifference => (a + b - 1.0).max(0.0),
            TNorm::DrasticProduct => {
                if a.max(b) == 1.0 {
                    a.min(b)
                } else {
                    0.0
                }
            }
            TNorm::EinsteinProduct => (a * b) / (2.0 - (a + b - a * b)),
            TNorm::HamacherProduct => {
                if a + b == 0.0 {
                    0.0
                } else {
                    (a * b) / (a + b - a * b)
                }
            }
            TNorm::NilpotentMinimum => {
                if a + b > 1.0 {
                    a.min(b)
                } else {
                    0.0
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TNorm::Minimum => "Minimum",
            TNorm::AlgebraicProduct => "AlgebraicProduct",
            TNorm::BoundedDifference => "BoundedDifference",
            TNorm::DrasticProduct => "DrasticProduct",
            TNorm::EinsteinProduct => "EinsteinProduct",
            TNorm::HamacherProduct => "HamacherProduct",
            TNorm::NilpotentMinimum => "NilpotentMinimum",
        }
    }

    pub const ALL: [TNorm; 7] = [
        TNorm::Minimum,
        TNorm::AlgebraicProduct,
        TNorm::BoundedDifference,
        TNorm::DrasticProduct,
        TNorm::EinsteinProduct,
        TNorm::HamacherProduct,
        TNorm::NilpotentMinimum,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SNorm {
    Maximum,
    AlgebraicSum,
    BoundedSum,
    DrasticSum,
    EinsteinSum,
    HamacherSum,
    NilpotentMaximum,
    NormalizedSum,
    UnboundedSum,
}

impl SNorm {
    pub fn compute(self, a: f64, b: f64) -> f64 {
        match self {
            SNorm::Maximum => a.max(b),
            SNorm::AlgebraicSum => a + b - a * b,
            SNorm::BoundedSum => (a + b).min(1.0),
            SNorm::DrasticSum => {
                if a.min(b) == 0.0 {
                    a.max(b)
                } else {
                    1.0
                }
            }
            SNorm::EinsteinSum => (a + b) / (1.0 + a * b),
            SNorm::HamacherSum => {
                if a * b == 1.0 {
                    1.0
                } else {
                    (a + b - 2.0 * a * b) / (1.0 - a * b)
                }
            }
            SNorm::NilpotentMaximum => {
                if a + b < 1.0 {
                    a.max(b)
                } else {
                    1.0
                }
            }
            SNorm::NormalizedSum => (a + b) / (a + b).max(1.0),
            SNorm::UnboundedSum => a + b,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SNorm::Maximum => "Maximum",
            SNorm::AlgebraicSum => "AlgebraicSum",
            SNorm::BoundedSum => "BoundedSum",
            SNorm::DrasticSum => "DrasticSum",
            SNorm::EinsteinSum => "EinsteinSum",
            SNorm::HamacherSum => "HamacherSum",
            SNorm::NilpotentMaximum => "NilpotentMaximum",
            SNorm::NormalizedSum => "NormalizedSum",
            SNorm::UnboundedSum => "UnboundedSum",
        }
    }

    pub const ALL: [SNorm; 9] = [
        SNorm::Maximum,
        SNorm::AlgebraicSum,
        SNorm::BoundedSum,
        SNorm::DrasticSum,
        SNorm::EinsteinSum,
        SNorm::HamacherSum,
        SNorm::NilpotentMaximum,
        SNorm::NormalizedSum,
        SNorm::UnboundedSum,
    ];
}

impl fmt::Display for TNorm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for SNorm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TNorm {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TNorm::ALL
            .into_iter()
            .find(|norm| norm.name() == s)
            .ok_or_else(|| FuzzyError::Engine(format!("Unknown T-norm '{}'", s)))
    }
}

impl FromStr for SNorm {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SNorm::ALL
            .into_iter()
            .find(|norm| norm.name() == s)
            .ok_or_else(|| FuzzyError::Engine(format!("Unknown S-norm '{}'", s)))
    }
}
