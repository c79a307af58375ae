//! Rule clause compiler
//!
//! Clauses are tokenized with the formula tokenizer, grouped into
//! propositions, then ordered by the same shunting-yard as formulas with
//! `and`/`or` as the only operators. Every name is resolved here, once.

use super::expression::{Connective, Expression, Proposition, VariableRef};
use crate::ast::Span;
use crate::error::FuzzyError;
use crate::hedge::Hedge;
use crate::parser::shunting_yard::{build_tree, to_postfix, Spanned, Symbol};
use crate::parser::{check_length, tokenize, Token, TokenKind};
use crate::settings::EngineSettings;
use crate::variable::{InputVariable, OutputVariable, Variable};
use std::sync::Arc;

/// Names a rule may refer to
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary<'a> {
    pub inputs: &'a [InputVariable],
    pub outputs: &'a [OutputVariable],
    /// Hedges registered beside the builtin ones
    pub hedges: &'a [Hedge],
}

impl<'a> Vocabulary<'a> {
    fn variable(&self, name: &str) -> Option<(VariableRef, &'a Variable)> {
        let (inputs, outputs) = (self.inputs, self.outputs);
        if let Some(index) = inputs.iter().position(|v| v.name() == name) {
            return Some((VariableRef::Input(index), &*inputs[index]));
        }
        outputs
            .iter()
            .position(|v| v.name() == name)
            .map(|index| (VariableRef::Output(index), &*outputs[index]))
    }

    fn hedge(&self, name: &str) -> Option<Hedge> {
        Hedge::from_name(name).or_else(|| self.hedges.iter().find(|h| h.name() == name).cloned())
    }

    fn variable_names(&self) -> String {
        self.inputs
            .iter()
            .map(|v| v.name())
            .chain(self.outputs.iter().map(|v| v.name()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Antecedent,
    Consequent,
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Role::Antecedent => "antecedent",
            Role::Consequent => "consequent",
        }
    }
}

/// Compile one clause found at `base` within `source`
pub(crate) fn compile_clause(
    text: &str,
    base: Span,
    source: &Arc<str>,
    role: Role,
    vocabulary: &Vocabulary<'_>,
    settings: &EngineSettings,
) -> Result<Expression, FuzzyError> {
    check_length(text, settings)?;
    let tokens = tokenize(text, source, base)?;
    let symbols = symbolize(&tokens, source, role, vocabulary)?;
    let postfix = to_postfix(symbols, source, settings)?;

    build_tree(
        postfix,
        source,
        settings.max_expression_depth,
        |proposition, _span| Ok(Expression::Proposition(proposition)),
        |connective, mut operands| {
            let right = operands.pop().map(Box::new);
            let left = operands.pop().map(Box::new);
            match (left, right) {
                (Some(left), Some(right)) => Ok(Expression::Operator {
                    connective,
                    left,
                    right,
                }),
                _ => Err(FuzzyError::Engine(format!(
                    "Connective '{}' built without two operands",
                    connective.keyword()
                ))),
            }
        },
    )
}

fn symbolize(
    tokens: &[Token],
    source: &Arc<str>,
    role: Role,
    vocabulary: &Vocabulary<'_>,
) -> Result<Vec<Spanned<Symbol<Connective, Proposition>>>, FuzzyError> {
    let mut symbols = Vec::new();
    let mut after_operand = false;
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        let symbol = match &token.kind {
            TokenKind::Open => Symbol::Open,
            TokenKind::Close => Symbol::Close,
            TokenKind::Identifier(word) if word == "and" => Symbol::Operator(Connective::And),
            TokenKind::Identifier(word) if word == "or" => {
                if role == Role::Consequent {
                    return Err(FuzzyError::syntax_with_suggestion(
                        "Conclusions of a consequent can only be joined with 'and'",
                        token.span,
                        Arc::clone(source),
                        "Split the rule in two to conclude either one",
                    ));
                }
                Symbol::Operator(Connective::Or)
            }
            TokenKind::Identifier(word) => {
                if after_operand {
                    return Err(FuzzyError::syntax(
                        format!("Expected 'and' or 'or' before '{}'", word),
                        token.span,
                        Arc::clone(source),
                    ));
                }
                let (proposition, next) = read_proposition(tokens, i, source, role, vocabulary)?;
                let span = proposition.span;
                symbols.push(Spanned::new(Symbol::Operand(proposition), span));
                after_operand = true;
                i = next;
                continue;
            }
            _ => {
                return Err(FuzzyError::syntax(
                    format!(
                        "Unexpected '{}' in {}",
                        source.get(token.span.start..token.span.end).unwrap_or(""),
                        role.label()
                    ),
                    token.span,
                    Arc::clone(source),
                ))
            }
        };
        after_operand = matches!(symbol, Symbol::Close);
        symbols.push(Spanned::new(symbol, token.span));
        i += 1;
    }

    Ok(symbols)
}

/// Read `<variable> is [hedge]* <term>` starting at `start`
fn read_proposition(
    tokens: &[Token],
    start: usize,
    source: &Arc<str>,
    role: Role,
    vocabulary: &Vocabulary<'_>,
) -> Result<(Proposition, usize), FuzzyError> {
    let head = &tokens[start];
    let TokenKind::Identifier(name) = &head.kind else {
        return Err(FuzzyError::syntax(
            "Expected a variable name",
            head.span,
            Arc::clone(source),
        ));
    };

    let (variable, resolved) = vocabulary.variable(name).ok_or_else(|| {
        FuzzyError::resolution_with_suggestion(
            format!("Unknown variable '{}'", name),
            head.span,
            Arc::clone(source),
            format!("Known variables: {}", vocabulary.variable_names()),
        )
    })?;
    if role == Role::Consequent && matches!(variable, VariableRef::Input(_)) {
        return Err(FuzzyError::resolution(
            format!(
                "'{}' is an input variable; consequents conclude on output variables",
                name
            ),
            head.span,
            Arc::clone(source),
        ));
    }

    match tokens.get(start + 1) {
        Some(token) if token.is_identifier("is") => {}
        Some(token) => {
            return Err(FuzzyError::syntax(
                format!("Expected 'is' after variable '{}'", name),
                token.span,
                Arc::clone(source),
            ))
        }
        None => {
            return Err(FuzzyError::syntax(
                format!("Expected 'is' after variable '{}'", name),
                end_of(head.span),
                Arc::clone(source),
            ))
        }
    }

    let mut hedges = Vec::new();
    let mut last = tokens[start + 1].span;
    let mut i = start + 2;
    loop {
        let Some(token) = tokens.get(i) else {
            return Err(FuzzyError::syntax(
                format!("Missing term for variable '{}'", name),
                end_of(last),
                Arc::clone(source),
            ));
        };
        let word = match &token.kind {
            TokenKind::Identifier(word) if word != "and" && word != "or" => word,
            _ => {
                return Err(FuzzyError::syntax(
                    format!("Missing term for variable '{}'", name),
                    token.span,
                    Arc::clone(source),
                ))
            }
        };
        last = token.span;
        i += 1;

        if let Some(hedge) = vocabulary.hedge(word) {
            if !hedge.is_terminal() {
                hedges.push(hedge);
                continue;
            }
            if role == Role::Consequent {
                return Err(FuzzyError::syntax(
                    "'any' cannot appear in a consequent",
                    token.span,
                    Arc::clone(source),
                ));
            }
            let proposition = Proposition {
                variable,
                variable_name: name.clone(),
                hedges,
                term: None,
                term_name: None,
                span: head.span.merge(last),
            };
            return Ok((proposition, i));
        }

        let term = resolved.term_index(word).ok_or_else(|| {
            let known: Vec<&str> = resolved.terms().iter().map(|t| t.name()).collect();
            FuzzyError::resolution_with_suggestion(
                format!("Variable '{}' has no term or hedge named '{}'", name, word),
                token.span,
                Arc::clone(source),
                format!("Terms of '{}': {}", name, known.join(", ")),
            )
        })?;
        let proposition = Proposition {
            variable,
            variable_name: name.clone(),
            hedges,
            term: Some(term),
            term_name: Some(word.clone()),
            span: head.span.merge(last),
        };
        return Ok((proposition, i));
    }
}

fn end_of(span: Span) -> Span {
    Span {
        start: span.end,
        end: span.end,
        line: span.line,
        col: span.col + (span.end - span.start),
    }
}
