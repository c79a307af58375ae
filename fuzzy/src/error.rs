use crate::ast::Span;
use std::sync::Arc;
use thiserror::Error;

/// Detailed error information with source location
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_text: Arc<str>,
    pub suggestion: Option<String>,
}

impl ErrorDetails {
    /// The token the span points at, or an empty string past the end of input
    pub fn offending_text(&self) -> &str {
        self.source_text
            .get(self.span.start..self.span.end)
            .unwrap_or("")
    }
}

fn located(details: &ErrorDetails) -> String {
    match &details.suggestion {
        Some(suggestion) => format!(
            "{} (suggestion: {}) at {}",
            details.message, suggestion, details.span
        ),
        None => format!("{} at {}", details.message, details.span),
    }
}

/// Error types for fuzzy formulas, rules and engines
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    /// Malformed formula or rule text
    #[error("Syntax error: {}", located(.0))]
    Syntax(Box<ErrorDetails>),

    /// Unknown variable, term or hedge name at compile time
    #[error("Resolution error: {}", located(.0))]
    Resolution(Box<ErrorDetails>),

    /// A formula was evaluated without a binding for one of its variables
    #[error("Evaluation error: no binding for variable '{name}'")]
    MissingBinding { name: String },

    /// Engine error without specific source location
    #[error("Engine error: {0}")]
    Engine(String),

    /// The engine is not ready to process inputs
    #[error("Engine not ready: {}", .0.join("; "))]
    NotReady(Vec<String>),

    #[error("Resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value}). {suggestion}")]
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },
}

impl FuzzyError {
    /// Create a syntax error with source information
    pub fn syntax(message: impl Into<String>, span: Span, source_text: Arc<str>) -> Self {
        Self::Syntax(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_text,
            suggestion: None,
        }))
    }

    /// Create a syntax error with suggestion
    pub fn syntax_with_suggestion(
        message: impl Into<String>,
        span: Span,
        source_text: Arc<str>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Syntax(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_text,
            suggestion: Some(suggestion.into()),
        }))
    }

    /// Create a resolution error with source information
    pub fn resolution(message: impl Into<String>, span: Span, source_text: Arc<str>) -> Self {
        Self::Resolution(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_text,
            suggestion: None,
        }))
    }

    /// Create a resolution error with suggestion
    pub fn resolution_with_suggestion(
        message: impl Into<String>,
        span: Span,
        source_text: Arc<str>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Resolution(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_text,
            suggestion: Some(suggestion.into()),
        }))
    }

    /// Source details for errors raised while compiling text
    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            FuzzyError::Syntax(details) | FuzzyError::Resolution(details) => Some(details),
            _ => None,
        }
    }
}
