use crate::{FuzzyError, FuzzyResult};
use serde::{Deserialize, Serialize};

/// How propositions over disabled variables take part in inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledVariablePolicy {
    /// Disabling only hides a variable from import/export; rules still read its value
    #[default]
    Evaluate,
    /// Propositions over a disabled variable evaluate to 0 and disabled outputs receive nothing
    Suppress,
}

/// Engine-wide configuration
///
/// The parser limits guard against runaway formula text while being
/// generous enough for any controller written by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Largest |w - f(z)| a Tsukamoto inversion may show before an inaccuracy warning
    pub tsukamoto_tolerance: f64,

    /// Maximum size of formula or rule text in bytes
    pub max_formula_bytes: usize,

    /// Maximum nesting depth of parentheses and function calls, and height of
    /// the operator tree a formula or rule clause builds
    pub max_expression_depth: usize,

    pub disabled_variables: DisabledVariablePolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tsukamoto_tolerance: 0.1,
            max_formula_bytes: 64 * 1024,
            max_expression_depth: 100,
            disabled_variables: DisabledVariablePolicy::Evaluate,
        }
    }
}

impl EngineSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> FuzzyResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FuzzyError::Engine(format!("Invalid engine settings: {}", e)))
    }
}
