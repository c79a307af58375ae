use super::shunting_yard::{build_tree, to_postfix, Spanned, Symbol};
use super::{check_length, origin, tokenize, Token, TokenKind};
use crate::error::FuzzyError;
use crate::formula::builtins::{constant, BinaryOperator, Builtin, Element, UnaryOperator};
use crate::formula::Node;
use crate::settings::EngineSettings;
use std::sync::Arc;

/// Parse infix formula text into a tree
pub fn parse_formula(text: &str, settings: &EngineSettings) -> Result<Node, FuzzyError> {
    check_length(text, settings)?;
    let source: Arc<str> = Arc::from(text);
    let tokens = tokenize(text, &source, origin())?;
    let symbols = symbolize(&tokens, &source)?;
    let postfix = to_postfix(symbols, &source, settings)?;

    build_tree(
        postfix,
        &source,
        settings.max_expression_depth,
        |leaf, _span| Ok(leaf),
        |element, mut operands| match element {
            Element::Unary(op) => {
                let operand = operands.pop().map(Box::new).ok_or_else(|| {
                    FuzzyError::Engine(format!("Operator '{}' built without an operand", op.symbol()))
                })?;
                Ok(Node::Unary { op, operand })
            }
            Element::Binary(op) => {
                let right = operands.pop().map(Box::new);
                let left = operands.pop().map(Box::new);
                match (left, right) {
                    (Some(left), Some(right)) => Ok(Node::Binary { op, left, right }),
                    _ => Err(FuzzyError::Engine(format!(
                        "Operator '{}' built without two operands",
                        op.symbol()
                    ))),
                }
            }
            Element::Function(function) => Ok(Node::Call {
                function,
                args: operands,
            }),
        },
    )
}

fn symbolize(
    tokens: &[Token],
    source: &Arc<str>,
) -> Result<Vec<Spanned<Symbol<Element, Node>>>, FuzzyError> {
    let mut symbols = Vec::with_capacity(tokens.len());

    for (i, token) in tokens.iter().enumerate() {
        let symbol = match &token.kind {
            TokenKind::Number(value) => Symbol::Operand(Node::Constant { value: *value }),
            TokenKind::Identifier(name) => {
                let followed_by_open =
                    matches!(tokens.get(i + 1).map(|t| &t.kind), Some(TokenKind::Open));
                if let Some(op) = BinaryOperator::from_symbol(name) {
                    Symbol::Operator(Element::Binary(op))
                } else if let (Some(function), true) = (Builtin::from_name(name), followed_by_open)
                {
                    Symbol::Function(Element::Function(function))
                } else if let Some(value) = constant(name) {
                    Symbol::Operand(Node::Constant { value })
                } else {
                    Symbol::Operand(Node::Variable { name: name.clone() })
                }
            }
            TokenKind::Operator(text) => match text.as_str() {
                "~" => Symbol::Operator(Element::Unary(UnaryOperator::Negate)),
                "!" => Symbol::Operator(Element::Unary(UnaryOperator::Not)),
                other => match BinaryOperator::from_symbol(other) {
                    Some(op) => Symbol::Operator(Element::Binary(op)),
                    None => {
                        return Err(FuzzyError::syntax(
                            format!("Unknown operator '{}'", other),
                            token.span,
                            Arc::clone(source),
                        ))
                    }
                },
            },
            TokenKind::Open => Symbol::Open,
            TokenKind::Close => Symbol::Close,
            TokenKind::Comma => Symbol::Separator,
        };
        symbols.push(Spanned::new(symbol, token.span));
    }

    Ok(symbols)
}
