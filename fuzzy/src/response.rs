use crate::diagnostics::Diagnostic;
use crate::{FuzzyError, FuzzyResult};
use serde::Serialize;

/// Trace of one inference pass
///
/// Values that could not be computed serialize as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceReport {
    pub engine: String,
    pub inputs: Vec<InputRecord>,
    pub outputs: Vec<OutputResult>,
    pub blocks: Vec<BlockTrace>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputRecord {
    pub name: String,
    pub value: f64,
    /// Membership of the value in each term, e.g. `0.250/low + 0.750/high`
    pub fuzzy: String,
}

/// Crisp value of an output variable and the terms that produced it
#[derive(Debug, Clone, Serialize)]
pub struct OutputResult {
    pub name: String,
    pub value: f64,
    pub fuzzy: String,
    pub activated: Vec<ActivatedRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivatedRecord {
    pub term: String,
    pub degree: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockTrace {
    pub name: String,
    pub activation: String,
    pub rules: Vec<RuleRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleRecord {
    pub rule: String,
    pub weight: f64,
    pub activation_degree: f64,
    pub triggered: bool,
}

impl InferenceReport {
    pub fn output(&self, name: &str) -> Option<&OutputResult> {
        self.outputs.iter().find(|output| output.name == name)
    }

    /// Crisp value computed for the output variable `name`
    pub fn value_of(&self, name: &str) -> Option<f64> {
        self.output(name).map(|output| output.value)
    }

    pub fn to_json(&self) -> FuzzyResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FuzzyError::Engine(format!("Failed to serialize report: {}", e)))
    }
}
