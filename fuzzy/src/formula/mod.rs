//! Formula engine
//!
//! Infix formulas compile into an owned operator tree that evaluates
//! against a set of variable bindings and renders back to infix, prefix
//! or postfix text. Formula-defined terms and hedges are built on it.

pub mod builtins;
mod render;

use crate::settings::EngineSettings;
use crate::{FuzzyError, FuzzyResult};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

pub use builtins::{BinaryOperator, Builtin, UnaryOperator};
pub use render::format_scalar;

/// A node of a compiled formula
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Constant { value: f64 },
    Variable { name: String },
    Unary {
        op: UnaryOperator,
        operand: Box<Node>,
    },
    Binary {
        op: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    Call { function: Builtin, args: Vec<Node> },
}

impl Node {
    pub fn evaluate<B: Bindings + ?Sized>(&self, bindings: &B) -> FuzzyResult<f64> {
        match self {
            Node::Constant { value } => Ok(*value),
            Node::Variable { name } => {
                bindings
                    .value_of(name)
                    .ok_or_else(|| FuzzyError::MissingBinding { name: name.clone() })
            }
            Node::Unary { op, operand } => Ok(op.apply(operand.evaluate(bindings)?)),
            Node::Binary { op, left, right } => {
                let a = left.evaluate(bindings)?;
                let b = right.evaluate(bindings)?;
                Ok(op.apply(a, b))
            }
            Node::Call { function, args } => match args.as_slice() {
                [a] => Ok(function.apply(&[a.evaluate(bindings)?])),
                [a, b] => Ok(function.apply(&[a.evaluate(bindings)?, b.evaluate(bindings)?])),
                _ => Err(FuzzyError::Engine(format!(
                    "Function '{}' called with {} arguments",
                    function.name(),
                    args.len()
                ))),
            },
        }
    }

    fn collect_variables<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Node::Constant { .. } => {}
            Node::Variable { name } => {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
            Node::Unary { operand, .. } => operand.collect_variables(names),
            Node::Binary { left, right, .. } => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
            Node::Call { args, .. } => {
                for arg in args {
                    arg.collect_variables(names);
                }
            }
        }
    }
}

/// A parsed formula together with the text it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Formula {
    text: String,
    root: Node,
}

impl Formula {
    /// Parse with the default parser limits
    pub fn parse(text: &str) -> FuzzyResult<Self> {
        Self::parse_with(text, &EngineSettings::default())
    }

    pub fn parse_with(text: &str, settings: &EngineSettings) -> FuzzyResult<Self> {
        let root = crate::parser::parse_formula(text, settings)?;
        Ok(Self {
            text: text.to_string(),
            root,
        })
    }

    pub fn from_node(root: Node) -> Self {
        let text = render::infix(&root);
        Self { text, root }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Evaluate against `bindings`; fails on the first variable without a binding
    pub fn evaluate<B: Bindings + ?Sized>(&self, bindings: &B) -> FuzzyResult<f64> {
        self.root.evaluate(bindings)
    }

    /// Names of referenced variables in order of first appearance
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.root.collect_variables(&mut names);
        names
    }

    /// Canonical infix text; parsing it yields an equivalent tree
    pub fn to_infix(&self) -> String {
        render::infix(&self.root)
    }

    pub fn to_prefix(&self) -> String {
        render::prefix(&self.root)
    }

    pub fn to_postfix(&self) -> String {
        render::postfix(&self.root)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_infix())
    }
}

/// Parse and evaluate `text` in one step
pub fn evaluate<B: Bindings + ?Sized>(text: &str, bindings: &B) -> FuzzyResult<f64> {
    Formula::parse(text)?.evaluate(bindings)
}

/// Source of variable values for formula evaluation
pub trait Bindings {
    fn value_of(&self, name: &str) -> Option<f64>;
}

impl<S: BuildHasher> Bindings for HashMap<String, f64, S> {
    fn value_of(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<S: BuildHasher> Bindings for HashMap<&str, f64, S> {
    fn value_of(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl Bindings for BTreeMap<String, f64> {
    fn value_of(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<K: AsRef<str>> Bindings for [(K, f64)] {
    fn value_of(&self, name: &str) -> Option<f64> {
        self.iter()
            .find(|(key, _)| key.as_ref() == name)
            .map(|(_, value)| *value)
    }
}

impl<K: AsRef<str>, const N: usize> Bindings for [(K, f64); N] {
    fn value_of(&self, name: &str) -> Option<f64> {
        self.as_slice().value_of(name)
    }
}

impl<B: Bindings + ?Sized> Bindings for &B {
    fn value_of(&self, name: &str) -> Option<f64> {
        (**self).value_of(name)
    }
}

/// Bindings with nothing bound
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBindings;

impl Bindings for NoBindings {
    fn value_of(&self, _name: &str) -> Option<f64> {
        None
    }
}

/// A single named value layered over other bindings
pub(crate) struct Layered<'a, B: ?Sized> {
    pub name: &'a str,
    pub value: f64,
    pub rest: &'a B,
}

impl<B: Bindings + ?Sized> Bindings for Layered<'_, B> {
    fn value_of(&self, name: &str) -> Option<f64> {
        if name == self.name {
            Some(self.value)
        } else {
            self.rest.value_of(name)
        }
    }
}
