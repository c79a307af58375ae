use crate::diagnostics::Diagnostics;
use crate::formula::Formula;
use crate::hedge::Hedge;
use crate::norm::TNorm;
use crate::response::{
    ActivatedRecord, BlockTrace, InferenceReport, InputRecord, OutputResult, RuleRecord,
};
use crate::rule::{Rule, Vocabulary};
use crate::rule_block::RuleBlock;
use crate::settings::EngineSettings;
use crate::variable::{InputVariable, OutputVariable};
use crate::{FuzzyError, FuzzyResult};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

const RESERVED: [&str; 6] = ["if", "then", "with", "is", "and", "or"];

/// Controller family inferred from an engine's defuzzifiers, terms and norms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EngineType {
    Unknown,
    Mamdani,
    Larsen,
    TakagiSugeno,
    Tsukamoto,
    InverseTsukamoto,
    Hybrid,
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineType::Unknown => "Unknown",
            EngineType::Mamdani => "Mamdani",
            EngineType::Larsen => "Larsen",
            EngineType::TakagiSugeno => "Takagi-Sugeno",
            EngineType::Tsukamoto => "Tsukamoto",
            EngineType::InverseTsukamoto => "Inverse Tsukamoto",
            EngineType::Hybrid => "Hybrid",
        };
        f.write_str(name)
    }
}

/// The fuzzy inference engine.
///
/// Owns the variables, rule blocks and registered hedges of one
/// controller. Rules are compiled against the variables present when
/// they are added; variables can be added afterwards but not removed.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    name: String,
    description: String,
    inputs: Vec<InputVariable>,
    outputs: Vec<OutputVariable>,
    blocks: Vec<RuleBlock>,
    hedges: Vec<Hedge>,
    settings: EngineSettings,
}

impl Engine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create an engine with custom settings
    pub fn with_settings(name: impl Into<String>, settings: EngineSettings) -> Self {
        Self {
            name: name.into(),
            settings,
            ..Self::default()
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

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: EngineSettings) {
        self.settings = settings;
    }

    pub fn add_input_variable(&mut self, variable: InputVariable) -> FuzzyResult<()> {
        self.check_variable_name(variable.name())?;
        self.inputs.push(variable);
        Ok(())
    }

    pub fn add_output_variable(&mut self, variable: OutputVariable) -> FuzzyResult<()> {
        self.check_variable_name(variable.name())?;
        self.outputs.push(variable);
        Ok(())
    }

    pub fn input_variables(&self) -> &[InputVariable] {
        &self.inputs
    }

    pub fn output_variables(&self) -> &[OutputVariable] {
        &self.outputs
    }

    pub fn input_variable(&self, name: &str) -> Option<&InputVariable> {
        self.inputs.iter().find(|v| v.name() == name)
    }

    pub fn input_variable_mut(&mut self, name: &str) -> Option<&mut InputVariable> {
        self.inputs.iter_mut().find(|v| v.name() == name)
    }

    pub fn output_variable(&self, name: &str) -> Option<&OutputVariable> {
        self.outputs.iter().find(|v| v.name() == name)
    }

    pub fn output_variable_mut(&mut self, name: &str) -> Option<&mut OutputVariable> {
        self.outputs.iter_mut().find(|v| v.name() == name)
    }

    pub fn add_rule_block(&mut self, block: RuleBlock) -> FuzzyResult<()> {
        if self.rule_block(block.name()).is_some() {
            return Err(FuzzyError::Engine(format!(
                "Rule block '{}' already exists",
                block.name()
            )));
        }
        self.blocks.push(block);
        Ok(())
    }

    pub fn rule_blocks(&self) -> &[RuleBlock] {
        &self.blocks
    }

    pub fn rule_block(&self, name: &str) -> Option<&RuleBlock> {
        self.blocks.iter().find(|b| b.name() == name)
    }

    pub fn rule_block_mut(&mut self, name: &str) -> Option<&mut RuleBlock> {
        self.blocks.iter_mut().find(|b| b.name() == name)
    }

    /// Register a hedge computed by a formula over `x`
    pub fn register_hedge(&mut self, name: &str, formula: &str) -> FuzzyResult<()> {
        if !is_identifier(name) || RESERVED.contains(&name) {
            return Err(FuzzyError::Engine(format!(
                "'{}' cannot be used as a hedge name",
                name
            )));
        }
        if Hedge::from_name(name).is_some() || self.hedges.iter().any(|h| h.name() == name) {
            return Err(FuzzyError::Engine(format!("Hedge '{}' already exists", name)));
        }
        let formula = Formula::parse_with(formula, &self.settings)?;
        if let Some(other) = formula.variables().into_iter().find(|v| *v != "x") {
            return Err(FuzzyError::Engine(format!(
                "Hedge '{}' may only refer to 'x', found '{}'",
                name, other
            )));
        }
        self.hedges.push(Hedge::Function {
            name: name.to_string(),
            formula,
        });
        Ok(())
    }

    pub fn hedges(&self) -> &[Hedge] {
        &self.hedges
    }

    /// Names rules compiled by this engine may refer to
    pub fn vocabulary(&self) -> Vocabulary<'_> {
        Vocabulary {
            inputs: &self.inputs,
            outputs: &self.outputs,
            hedges: &self.hedges,
        }
    }

    /// Compile rule text against this engine's variables and hedges
    pub fn compile_rule(&self, text: &str) -> FuzzyResult<Rule> {
        Rule::compile(text, &self.vocabulary(), &self.settings)
    }

    /// Compile `text` and append it to the block named `block`
    pub fn add_rule(&mut self, block: &str, text: &str) -> FuzzyResult<()> {
        let rule = self.compile_rule(text)?;
        let target = self
            .rule_block_mut(block)
            .ok_or_else(|| FuzzyError::Engine(format!("Unknown rule block '{}'", block)))?;
        target.add_rule(rule);
        Ok(())
    }

    pub fn set_input_value(&mut self, name: &str, value: f64) -> FuzzyResult<()> {
        let variable = self
            .input_variable_mut(name)
            .ok_or_else(|| FuzzyError::Engine(format!("Unknown input variable '{}'", name)))?;
        variable.set_value(value);
        Ok(())
    }

    pub fn input_value(&self, name: &str) -> FuzzyResult<f64> {
        self.input_variable(name)
            .map(|v| v.value())
            .ok_or_else(|| FuzzyError::Engine(format!("Unknown input variable '{}'", name)))
    }

    pub fn output_value(&self, name: &str) -> FuzzyResult<f64> {
        self.output_variable(name)
            .map(|v| v.value())
            .ok_or_else(|| FuzzyError::Engine(format!("Unknown output variable '{}'", name)))
    }

    /// Run one inference pass over the current input values
    pub fn process(&mut self) -> FuzzyResult<InferenceReport> {
        let mut diagnostics = Diagnostics::new();

        for output in &mut self.outputs {
            output.aggregated_mut().clear();
        }
        self.refresh_bindings();

        let policy = self.settings.disabled_variables;
        for block in self.blocks.iter_mut().filter(|b| b.is_enabled()) {
            block.activate(&self.inputs, &mut self.outputs, policy);
        }

        for output in &mut self.outputs {
            output.defuzzify(&self.settings, &mut diagnostics)?;
        }

        Ok(self.report(diagnostics))
    }

    /// Forget inputs, outputs and rule activations, as before the first pass
    pub fn restart(&mut self) {
        for input in &mut self.inputs {
            input.set_value(f64::NAN);
        }
        for output in &mut self.outputs {
            output.clear();
        }
        for block in &mut self.blocks {
            block.deactivate();
        }
    }

    /// Check the engine can process; reports every problem found
    pub fn is_ready(&self) -> FuzzyResult<()> {
        let mut problems = Vec::new();

        if self.inputs.is_empty() {
            problems.push("Engine has no input variables".to_string());
        }
        for input in &self.inputs {
            if input.terms().is_empty() {
                problems.push(format!("Input variable '{}' has no terms", input.name()));
            }
        }

        if self.outputs.is_empty() {
            problems.push("Engine has no output variables".to_string());
        }
        let mut integral = false;
        for output in &self.outputs {
            if output.terms().is_empty() {
                problems.push(format!("Output variable '{}' has no terms", output.name()));
            }
            match output.defuzzifier() {
                None => problems.push(format!(
                    "Output variable '{}' has no defuzzifier",
                    output.name()
                )),
                Some(defuzzifier) if defuzzifier.is_integral() => {
                    integral = true;
                    if output.aggregated().aggregation().is_none() {
                        problems.push(format!(
                            "Output variable '{}' needs an aggregation operator for {}",
                            output.name(),
                            defuzzifier.name()
                        ));
                    }
                }
                Some(_) => {}
            }
        }

        if self.blocks.is_empty() {
            problems.push("Engine has no rule blocks".to_string());
        }
        for block in &self.blocks {
            if block.rules().is_empty() {
                problems.push(format!("Rule block '{}' has no rules", block.name()));
            }
            if integral && block.operators().implication.is_none() {
                problems.push(format!(
                    "Rule block '{}' needs an implication operator for integral defuzzifiers",
                    block.name()
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(FuzzyError::NotReady(problems))
        }
    }

    /// Classify the controller from its outputs
    pub fn infer_type(&self) -> EngineType {
        if self.outputs.is_empty() {
            return EngineType::Unknown;
        }
        let mut defuzzifiers = Vec::with_capacity(self.outputs.len());
        for output in &self.outputs {
            match output.defuzzifier() {
                Some(defuzzifier) => defuzzifiers.push(defuzzifier),
                None => return EngineType::Unknown,
            }
        }

        if defuzzifiers.iter().all(|d| d.is_integral()) {
            let larsen = !self.blocks.is_empty()
                && self
                    .blocks
                    .iter()
                    .all(|b| b.operators().implication == Some(TNorm::AlgebraicProduct));
            return if larsen {
                EngineType::Larsen
            } else {
                EngineType::Mamdani
            };
        }
        if defuzzifiers.iter().any(|d| d.is_integral()) {
            return EngineType::Hybrid;
        }

        let terms: Vec<_> = self.outputs.iter().flat_map(|o| o.terms()).collect();
        if terms.iter().all(|t| t.is_takagi_sugeno()) {
            EngineType::TakagiSugeno
        } else if terms.iter().all(|t| t.is_monotonic()) {
            EngineType::Tsukamoto
        } else if terms.iter().all(|t| !t.is_takagi_sugeno()) {
            EngineType::InverseTsukamoto
        } else {
            EngineType::Hybrid
        }
    }

    fn check_variable_name(&self, name: &str) -> FuzzyResult<()> {
        if !is_identifier(name) || RESERVED.contains(&name) {
            return Err(FuzzyError::Engine(format!(
                "'{}' cannot be used as a variable name",
                name
            )));
        }
        if self.input_variable(name).is_some() || self.output_variable(name).is_some() {
            return Err(FuzzyError::Engine(format!(
                "Variable '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    /// Feed current variable values to linear and formula terms
    fn refresh_bindings(&mut self) {
        let input_values: Vec<f64> = self.inputs.iter().map(|v| v.value()).collect();
        let mut values: HashMap<String, f64> = HashMap::new();
        for input in &self.inputs {
            values.insert(input.name().to_string(), input.value());
        }
        for output in &self.outputs {
            values.insert(output.name().to_string(), output.value());
        }

        for input in &mut self.inputs {
            for term in input.terms_mut() {
                term.bind(&values, &input_values);
            }
        }
        for output in &mut self.outputs {
            for term in output.terms_mut() {
                term.bind(&values, &input_values);
            }
        }
    }

    fn report(&self, diagnostics: Diagnostics) -> InferenceReport {
        InferenceReport {
            engine: self.name.clone(),
            inputs: self
                .inputs
                .iter()
                .map(|input| InputRecord {
                    name: input.name().to_string(),
                    value: input.value(),
                    fuzzy: input.fuzzy_input_value(),
                })
                .collect(),
            outputs: self
                .outputs
                .iter()
                .map(|output| OutputResult {
                    name: output.name().to_string(),
                    value: output.value(),
                    fuzzy: output.fuzzy_output_value(),
                    activated: output
                        .aggregated()
                        .activated()
                        .iter()
                        .filter_map(|activated| {
                            output.terms().get(activated.term).map(|term| ActivatedRecord {
                                term: term.name().to_string(),
                                degree: activated.degree,
                            })
                        })
                        .collect(),
                })
                .collect(),
            blocks: self
                .blocks
                .iter()
                .map(|block| BlockTrace {
                    name: block.name().to_string(),
                    activation: block.activation().to_string(),
                    rules: block
                        .rules()
                        .iter()
                        .map(|rule| RuleRecord {
                            rule: rule.text().to_string(),
                            weight: rule.weight(),
                            activation_degree: rule.activation_degree(),
                            triggered: rule.is_triggered(),
                        })
                        .collect(),
                })
                .collect(),
            diagnostics: diagnostics.into_vec(),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
