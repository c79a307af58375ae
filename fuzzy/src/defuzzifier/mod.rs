//! Defuzzifiers
//!
//! The integral family samples the aggregated fuzzy set over the output
//! range. The weighted family reads the activation degree of each fired
//! term directly and needs no sampling.

pub mod integral;
pub mod weighted;

use crate::aggregated::FuzzyOutput;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::settings::EngineSettings;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Samples taken by the integral defuzzifiers built without an explicit resolution
pub const DEFAULT_RESOLUTION: usize = 200;

/// How a weighted defuzzifier turns an activation degree into a crisp value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeightedType {
    /// Takagi-Sugeno for constant, linear and formula terms, Tsukamoto otherwise
    #[default]
    Automatic,
    /// `z = term.membership(w)`
    TakagiSugeno,
    /// `z` solves `term.membership(z) = w`
    Tsukamoto,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Defuzzifier {
    Centroid { resolution: usize },
    Bisector { resolution: usize },
    SmallestOfMaximum { resolution: usize },
    LargestOfMaximum { resolution: usize },
    MeanOfMaximum { resolution: usize },
    WeightedAverage { weighted: WeightedType },
    WeightedSum { weighted: WeightedType },
}

impl Defuzzifier {
    pub fn centroid() -> Self {
        Defuzzifier::Centroid {
            resolution: DEFAULT_RESOLUTION,
        }
    }

    pub fn bisector() -> Self {
        Defuzzifier::Bisector {
            resolution: DEFAULT_RESOLUTION,
        }
    }

    pub fn smallest_of_maximum() -> Self {
        Defuzzifier::SmallestOfMaximum {
            resolution: DEFAULT_RESOLUTION,
        }
    }

    pub fn largest_of_maximum() -> Self {
        Defuzzifier::LargestOfMaximum {
            resolution: DEFAULT_RESOLUTION,
        }
    }

    pub fn mean_of_maximum() -> Self {
        Defuzzifier::MeanOfMaximum {
            resolution: DEFAULT_RESOLUTION,
        }
    }

    pub fn weighted_average() -> Self {
        Defuzzifier::WeightedAverage {
            weighted: WeightedType::Automatic,
        }
    }

    pub fn weighted_sum() -> Self {
        Defuzzifier::WeightedSum {
            weighted: WeightedType::Automatic,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Defuzzifier::Centroid { .. } => "Centroid",
            Defuzzifier::Bisector { .. } => "Bisector",
            Defuzzifier::SmallestOfMaximum { .. } => "SmallestOfMaximum",
            Defuzzifier::LargestOfMaximum { .. } => "LargestOfMaximum",
            Defuzzifier::MeanOfMaximum { .. } => "MeanOfMaximum",
            Defuzzifier::WeightedAverage { .. } => "WeightedAverage",
            Defuzzifier::WeightedSum { .. } => "WeightedSum",
        }
    }

    pub fn resolution(&self) -> Option<usize> {
        match self {
            Defuzzifier::Centroid { resolution }
            | Defuzzifier::Bisector { resolution }
            | Defuzzifier::SmallestOfMaximum { resolution }
            | Defuzzifier::LargestOfMaximum { resolution }
            | Defuzzifier::MeanOfMaximum { resolution } => Some(*resolution),
            Defuzzifier::WeightedAverage { .. } | Defuzzifier::WeightedSum { .. } => None,
        }
    }

    pub fn is_integral(&self) -> bool {
        self.resolution().is_some()
    }

    /// Crisp value of `fuzzy` over `[minimum, maximum]`, NaN when nothing informs it
    pub fn defuzzify(
        &self,
        fuzzy: &FuzzyOutput<'_>,
        minimum: f64,
        maximum: f64,
        settings: &EngineSettings,
        diagnostics: &mut Diagnostics,
    ) -> f64 {
        if let Some(resolution) = self.resolution() {
            if maximum - minimum > resolution as f64 {
                diagnostics.push(Diagnostic::Accuracy {
                    variable: fuzzy.name().to_string(),
                    range: maximum - minimum,
                    resolution,
                });
            }
            if !fuzzy.is_implied() {
                tracing::error!(variable = %fuzzy.name(), "activated terms without an implication operator");
                return f64::NAN;
            }
        }

        match *self {
            Defuzzifier::Centroid { resolution } => {
                integral::centroid(fuzzy, minimum, maximum, resolution)
            }
            Defuzzifier::Bisector { resolution } => {
                integral::bisector(fuzzy, minimum, maximum, resolution)
            }
            Defuzzifier::SmallestOfMaximum { resolution } => {
                integral::smallest_of_maximum(fuzzy, minimum, maximum, resolution)
            }
            Defuzzifier::LargestOfMaximum { resolution } => {
                integral::largest_of_maximum(fuzzy, minimum, maximum, resolution)
            }
            Defuzzifier::MeanOfMaximum { resolution } => {
                integral::mean_of_maximum(fuzzy, minimum, maximum, resolution)
            }
            Defuzzifier::WeightedAverage { weighted } => weighted::weighted_average(
                fuzzy,
                weighted,
                minimum,
                maximum,
                settings,
                diagnostics,
            ),
            Defuzzifier::WeightedSum { weighted } => {
                weighted::weighted_sum(fuzzy, weighted, minimum, maximum, settings, diagnostics)
            }
        }
    }
}

impl fmt::Display for Defuzzifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Defuzzifier::WeightedAverage { weighted } | Defuzzifier::WeightedSum { weighted } => {
                write!(f, "{} {:?}", self.name(), weighted)
            }
            _ => match self.resolution() {
                Some(resolution) => write!(f, "{} {}", self.name(), resolution),
                None => f.write_str(self.name()),
            },
        }
    }
}
