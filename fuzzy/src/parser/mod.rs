use crate::ast::{Locator, Span};
use crate::error::FuzzyError;
use crate::settings::EngineSettings;
use pest::Parser;
use pest_derive::Parser;
use std::sync::Arc;

pub mod formula;
pub mod rules;
pub(crate) mod shunting_yard;

pub use formula::parse_formula;
pub use rules::{split_rule, RuleParts};

#[derive(Parser)]
#[grammar = "src/parser/fuzzy.pest"]
pub struct FuzzyParser;

/// Lexical class of a formula token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Identifier(String),
    Operator(String),
    Open,
    Close,
    Comma,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn is_identifier(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Identifier(identifier) if identifier == name)
    }
}

/// Split formula text into tokens.
///
/// Spans are relative to `text`; callers tokenizing a slice of a larger
/// source shift them with `Span::offset_by`.
pub fn tokenize(text: &str, source: &Arc<str>, base: Span) -> Result<Vec<Token>, FuzzyError> {
    let pairs = FuzzyParser::parse(Rule::formula, text)
        .map_err(|e| pest_error(e, source, base))?;

    let mut locator = Locator::new(text);
    let mut tokens = Vec::new();
    for pair in pairs.flatten() {
        let span = locator.span(pair.as_span()).offset_by(base);
        let kind = match pair.as_rule() {
            Rule::number => {
                let value = pair.as_str().parse::<f64>().map_err(|e| {
                    FuzzyError::syntax(
                        format!("Invalid number '{}': {}", pair.as_str(), e),
                        span,
                        Arc::clone(source),
                    )
                })?;
                TokenKind::Number(value)
            }
            Rule::identifier => TokenKind::Identifier(pair.as_str().to_string()),
            Rule::operator => TokenKind::Operator(pair.as_str().to_string()),
            Rule::open_paren => TokenKind::Open,
            Rule::close_paren => TokenKind::Close,
            Rule::comma => TokenKind::Comma,
            _ => continue,
        };
        tokens.push(Token { kind, span });
    }
    Ok(tokens)
}

/// Reject text above the configured size before handing it to the grammar
pub(crate) fn check_length(text: &str, settings: &EngineSettings) -> Result<(), FuzzyError> {
    if text.len() > settings.max_formula_bytes {
        return Err(FuzzyError::ResourceLimitExceeded {
            limit_name: "max_formula_bytes".to_string(),
            limit_value: format!("{} bytes", settings.max_formula_bytes),
            actual_value: format!("{} bytes", text.len()),
            suggestion: "Split the formula or rule into smaller pieces".to_string(),
        });
    }
    Ok(())
}

pub(crate) fn pest_error(e: pest::error::Error<Rule>, source: &Arc<str>, base: Span) -> FuzzyError {
    let (line, col) = match e.line_col {
        pest::error::LineColLocation::Pos((line, col)) => (line, col),
        pest::error::LineColLocation::Span((start_line, start_col), (_, _)) => {
            (start_line, start_col)
        }
    };
    let (start, end) = match e.location {
        pest::error::InputLocation::Pos(pos) => (pos, pos + 1),
        pest::error::InputLocation::Span((start, end)) => (start, end),
    };
    let span = Span {
        start,
        end,
        line,
        col,
    }
    .offset_by(base);

    FuzzyError::syntax(
        format!("Unexpected input: {}", e.variant.message()),
        span,
        Arc::clone(source),
    )
}

/// Span of the whole text, used as the base for top-level parses
pub(crate) fn origin() -> Span {
    Span {
        start: 0,
        end: 0,
        line: 1,
        col: 1,
    }
}
