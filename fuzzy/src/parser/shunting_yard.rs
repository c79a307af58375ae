//! Infix to postfix conversion shared by formulas and rule clauses
//!
//! Formulas feed arithmetic operators and function calls through here;
//! antecedents and consequents feed `and`/`or` connectives with
//! propositions as operands. Both get the same precedence climbing,
//! parenthesis matching and arity checks.

use crate::ast::Span;
use crate::error::FuzzyError;
use crate::settings::EngineSettings;
use std::sync::Arc;

/// An operator or function known to a grammar
pub(crate) trait Operator: Copy {
    fn precedence(&self) -> u8;
    fn is_right_associative(&self) -> bool;
    fn arity(&self) -> usize;
    fn symbol(&self) -> &'static str;

    /// The prefix reading of a binary operator found where an operand was expected
    fn as_prefix(&self) -> Option<Self> {
        None
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Symbol<O, L> {
    Operand(L),
    Operator(O),
    Function(O),
    Open,
    Close,
    Separator,
}

#[derive(Debug, Clone)]
pub(crate) enum Postfix<O, L> {
    Operand(L),
    Apply(O),
}

#[derive(Debug, Clone)]
pub(crate) struct Spanned<T> {
    pub item: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(item: T, span: Span) -> Self {
        Self { item, span }
    }
}

enum Pending<O> {
    Operator(O, Span),
    Function(O, Span),
    Open(Span),
}

struct Group {
    call: bool,
    arguments: usize,
}

/// Convert an infix symbol stream into postfix order.
///
/// Alternation of operands and operators is checked as symbols arrive so
/// that errors point at the token where the formula went wrong.
pub(crate) fn to_postfix<O: Operator, L>(
    symbols: Vec<Spanned<Symbol<O, L>>>,
    source: &Arc<str>,
    settings: &EngineSettings,
) -> Result<Vec<Spanned<Postfix<O, L>>>, FuzzyError> {
    let end_of_input = symbols
        .last()
        .map(|s| Span {
            start: s.span.end,
            end: s.span.end,
            line: s.span.line,
            col: s.span.col + (s.span.end - s.span.start),
        })
        .unwrap_or_default();

    if symbols.is_empty() {
        return Err(FuzzyError::syntax(
            "Empty expression",
            end_of_input,
            Arc::clone(source),
        ));
    }

    let mut output: Vec<Spanned<Postfix<O, L>>> = Vec::with_capacity(symbols.len());
    let mut stack: Vec<Pending<O>> = Vec::new();
    let mut groups: Vec<Group> = Vec::new();
    let mut expect_operand = true;
    let mut after_function = false;

    for Spanned { item, span } in symbols {
        if after_function && !matches!(item, Symbol::Open) {
            return Err(FuzzyError::syntax_with_suggestion(
                "Function name must be followed by '('",
                span,
                Arc::clone(source),
                "Write function calls as name(argument, ...)",
            ));
        }
        after_function = false;

        match item {
            Symbol::Operand(leaf) => {
                if !expect_operand {
                    return Err(FuzzyError::syntax(
                        format!("Unexpected operand '{}'", text_at(source, span)),
                        span,
                        Arc::clone(source),
                    ));
                }
                output.push(Spanned::new(Postfix::Operand(leaf), span));
                expect_operand = false;
            }
            Symbol::Operator(op) => {
                if expect_operand {
                    let prefix = if op.arity() == 1 {
                        Some(op)
                    } else {
                        op.as_prefix()
                    };
                    match prefix {
                        Some(prefix) => stack.push(Pending::Operator(prefix, span)),
                        None => {
                            return Err(FuzzyError::syntax(
                                format!("Operator '{}' is missing its left operand", op.symbol()),
                                span,
                                Arc::clone(source),
                            ))
                        }
                    }
                    continue;
                }
                if op.arity() == 1 {
                    return Err(FuzzyError::syntax(
                        format!("Unexpected prefix operator '{}'", op.symbol()),
                        span,
                        Arc::clone(source),
                    ));
                }
                while let Some(Pending::Operator(top, top_span)) = stack.last() {
                    let binds_tighter = top.precedence() > op.precedence()
                        || (top.precedence() == op.precedence() && !op.is_right_associative());
                    if !binds_tighter {
                        break;
                    }
                    output.push(Spanned::new(Postfix::Apply(*top), *top_span));
                    stack.pop();
                }
                stack.push(Pending::Operator(op, span));
                expect_operand = true;
            }
            Symbol::Function(function) => {
                if !expect_operand {
                    return Err(FuzzyError::syntax(
                        format!("Unexpected function '{}'", function.symbol()),
                        span,
                        Arc::clone(source),
                    ));
                }
                stack.push(Pending::Function(function, span));
                after_function = true;
            }
            Symbol::Open => {
                if !expect_operand {
                    return Err(FuzzyError::syntax(
                        "Unexpected '('",
                        span,
                        Arc::clone(source),
                    ));
                }
                let call = matches!(stack.last(), Some(Pending::Function(..)));
                stack.push(Pending::Open(span));
                groups.push(Group { call, arguments: 1 });
                if groups.len() > settings.max_expression_depth {
                    return Err(FuzzyError::ResourceLimitExceeded {
                        limit_name: "max_expression_depth".to_string(),
                        limit_value: settings.max_expression_depth.to_string(),
                        actual_value: groups.len().to_string(),
                        suggestion: "Simplify nested expressions to reduce depth".to_string(),
                    });
                }
            }
            Symbol::Separator => {
                if expect_operand {
                    return Err(FuzzyError::syntax(
                        "Missing argument before ','",
                        span,
                        Arc::clone(source),
                    ));
                }
                drain_to_open(&mut stack, &mut output);
                match groups.last_mut() {
                    Some(group) if group.call => group.arguments += 1,
                    _ => {
                        return Err(FuzzyError::syntax(
                            "',' outside of a function call",
                            span,
                            Arc::clone(source),
                        ))
                    }
                }
                expect_operand = true;
            }
            Symbol::Close => {
                if expect_operand {
                    return Err(FuzzyError::syntax(
                        "Missing operand before ')'",
                        span,
                        Arc::clone(source),
                    ));
                }
                drain_to_open(&mut stack, &mut output);
                if !matches!(stack.pop(), Some(Pending::Open(_))) {
                    return Err(FuzzyError::syntax(
                        "Unbalanced ')'",
                        span,
                        Arc::clone(source),
                    ));
                }
                let group = groups.pop().unwrap_or(Group {
                    call: false,
                    arguments: 1,
                });
                if group.call {
                    if let Some(Pending::Function(function, function_span)) = stack.pop() {
                        if group.arguments != function.arity() {
                            return Err(FuzzyError::syntax(
                                format!(
                                    "Function '{}' expects {} argument(s) but received {}",
                                    function.symbol(),
                                    function.arity(),
                                    group.arguments
                                ),
                                function_span.merge(span),
                                Arc::clone(source),
                            ));
                        }
                        output.push(Spanned::new(Postfix::Apply(function), function_span));
                    }
                }
                expect_operand = false;
            }
        }
    }

    if after_function || expect_operand {
        return Err(FuzzyError::syntax(
            "Unexpected end of expression",
            end_of_input,
            Arc::clone(source),
        ));
    }

    while let Some(pending) = stack.pop() {
        match pending {
            Pending::Operator(op, span) | Pending::Function(op, span) => {
                output.push(Spanned::new(Postfix::Apply(op), span))
            }
            Pending::Open(span) => {
                return Err(FuzzyError::syntax(
                    "Unbalanced '('",
                    span,
                    Arc::clone(source),
                ))
            }
        }
    }

    Ok(output)
}

fn drain_to_open<O: Operator, L>(
    stack: &mut Vec<Pending<O>>,
    output: &mut Vec<Spanned<Postfix<O, L>>>,
) {
    while let Some(Pending::Operator(op, span)) = stack.last() {
        output.push(Spanned::new(Postfix::Apply(*op), *span));
        stack.pop();
    }
}

/// Fold a postfix stream into a tree with a value stack.
///
/// Trees taller than `max_height` are rejected before they are built, so
/// evaluating, rendering and dropping a parsed tree stays within bounds.
pub(crate) fn build_tree<O: Operator, L, T>(
    postfix: Vec<Spanned<Postfix<O, L>>>,
    source: &Arc<str>,
    max_height: usize,
    mut leaf: impl FnMut(L, Span) -> Result<T, FuzzyError>,
    mut node: impl FnMut(O, Vec<T>) -> Result<T, FuzzyError>,
) -> Result<T, FuzzyError> {
    let mut values: Vec<(T, usize)> = Vec::new();
    let mut last_span = Span::default();

    for Spanned { item, span } in postfix {
        last_span = span;
        match item {
            Postfix::Operand(l) => values.push((leaf(l, span)?, 1)),
            Postfix::Apply(op) => {
                if values.len() < op.arity() {
                    return Err(FuzzyError::syntax(
                        format!(
                            "Operator '{}' expects {} operand(s) but found {}",
                            op.symbol(),
                            op.arity(),
                            values.len()
                        ),
                        span,
                        Arc::clone(source),
                    ));
                }
                let operands = values.split_off(values.len() - op.arity());
                let height = 1 + operands.iter().map(|(_, h)| *h).max().unwrap_or(0);
                if height > max_height {
                    return Err(FuzzyError::ResourceLimitExceeded {
                        limit_name: "max_expression_depth".to_string(),
                        limit_value: max_height.to_string(),
                        actual_value: format!("more than {}", max_height),
                        suggestion: "Split long operator chains into smaller formulas or rules"
                            .to_string(),
                    });
                }
                let operands = operands.into_iter().map(|(value, _)| value).collect();
                values.push((node(op, operands)?, height));
            }
        }
    }

    match (values.pop(), values.is_empty()) {
        (Some((root, _)), true) => Ok(root),
        (Some(_), false) => Err(FuzzyError::syntax(
            "Operands left without an operator",
            last_span,
            Arc::clone(source),
        )),
        (None, _) => Err(FuzzyError::syntax(
            "Empty expression",
            last_span,
            Arc::clone(source),
        )),
    }
}

fn text_at(source: &Arc<str>, span: Span) -> &str {
    source.get(span.start..span.end).unwrap_or("")
}
