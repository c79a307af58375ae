use super::{check_length, origin, pest_error, FuzzyParser, Rule};
use crate::ast::Span;
use crate::error::FuzzyError;
use crate::settings::EngineSettings;
use pest::iterators::Pair;
use pest::Parser;
use std::sync::Arc;

const RULE_FORM: &str = "Rules are written as: if <antecedent> then <consequent> [with <weight>]";

/// A slice of rule text with its position in the rule
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub text: String,
    pub span: Span,
}

/// Rule text split at its keywords, clauses still uncompiled
#[derive(Debug, Clone, PartialEq)]
pub struct RuleParts {
    pub source: Arc<str>,
    pub antecedent: Clause,
    pub consequent: Clause,
    pub weight: Option<f64>,
}

/// Split `if <antecedent> then <consequent> [with <weight>]`
pub fn split_rule(text: &str, settings: &EngineSettings) -> Result<RuleParts, FuzzyError> {
    check_length(text, settings)?;
    let source: Arc<str> = Arc::from(text);
    let pairs = FuzzyParser::parse(Rule::rule_text, text)
        .map_err(|e| with_rule_form(pest_error(e, &source, origin())))?;

    let mut antecedent = None;
    let mut consequent = None;
    let mut weight = None;

    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::antecedent => antecedent = Some(clause(&pair)),
            Rule::consequent => consequent = Some(clause(&pair)),
            Rule::weight => {
                let span = Span::from_pest_span(pair.as_span());
                let value = pair.as_str().parse::<f64>().map_err(|e| {
                    FuzzyError::syntax(
                        format!("Invalid weight '{}': {}", pair.as_str(), e),
                        span,
                        Arc::clone(&source),
                    )
                })?;
                weight = Some(value);
            }
            _ => {}
        }
    }

    let antecedent = antecedent.ok_or_else(|| {
        FuzzyError::Engine("Grammar error: rule_text missing antecedent".to_string())
    })?;
    let consequent = consequent.ok_or_else(|| {
        FuzzyError::Engine("Grammar error: rule_text missing consequent".to_string())
    })?;

    Ok(RuleParts {
        source,
        antecedent,
        consequent,
        weight,
    })
}

fn clause(pair: &Pair<Rule>) -> Clause {
    Clause {
        text: pair.as_str().to_string(),
        span: Span::from_pest_span(pair.as_span()),
    }
}

fn with_rule_form(error: FuzzyError) -> FuzzyError {
    match error {
        FuzzyError::Syntax(mut details) => {
            details.suggestion = Some(RULE_FORM.to_string());
            FuzzyError::Syntax(details)
        }
        other => other,
    }
}
