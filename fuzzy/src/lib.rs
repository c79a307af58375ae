//! # Fuzzy Engine
//!
//! **Fuzzy logic controllers written as text rules**
//!
//! Controllers are made of linguistic variables, the terms that describe
//! them, and rules such as `if service is very good then tip is generous`.
//! Each inference pass fuzzifies the inputs, fires the rules, aggregates
//! their conclusions and defuzzifies every output into a crisp value.
//!
//! ## Quick Start
//!
//! ```rust
//! use fuzzy::{Defuzzifier, Engine, FuzzyResult, InputVariable, OutputVariable, RuleBlock, Term};
//!
//! fn main() -> FuzzyResult<()> {
//!     let mut engine = Engine::new("tipper");
//!
//!     engine.add_input_variable(
//!         InputVariable::new("service", 0.0, 10.0)
//!             .with_term(Term::triangle("poor", 0.0, 0.0, 5.0))
//!             .with_term(Term::triangle("good", 0.0, 5.0, 10.0))
//!             .with_term(Term::triangle("excellent", 5.0, 10.0, 10.0)),
//!     )?;
//!     engine.add_output_variable(
//!         OutputVariable::new("tip", 0.0, 30.0)
//!             .with_term(Term::triangle("cheap", 0.0, 5.0, 10.0))
//!             .with_term(Term::triangle("average", 10.0, 15.0, 20.0))
//!             .with_term(Term::triangle("generous", 20.0, 25.0, 30.0))
//!             .with_defuzzifier(Defuzzifier::centroid()),
//!     )?;
//!
//!     engine.add_rule_block(RuleBlock::new("rules"))?;
//!     engine.add_rule("rules", "if service is poor then tip is cheap")?;
//!     engine.add_rule("rules", "if service is good then tip is average")?;
//!     engine.add_rule("rules", "if service is excellent then tip is generous")?;
//!
//!     engine.set_input_value("service", 5.0)?;
//!     let report = engine.process()?;
//!     let tip = report.value_of("tip").unwrap_or(f64::NAN);
//!     assert!((tip - 15.0).abs() < 0.1);
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Formulas
//! Infix arithmetic over named values, with comparison and logical
//! operators and a fixed set of functions. Formulas define custom terms
//! and hedges and can be evaluated on their own with [`formula::evaluate`].
//!
//! ### Rules
//! `if <antecedent> then <consequent> [with <weight>]`. Propositions read
//! `<variable> is [hedge]* <term>` and are joined with `and` / `or`.
//! Every name is resolved when the rule is compiled.
//!
//! ### Activation and defuzzification
//! Rule blocks pick which rules fire through their [`Activation`] method;
//! output variables turn their aggregate into a value with a
//! [`Defuzzifier`].

pub mod activation;
pub mod aggregated;
pub mod ast;
pub mod defuzzifier;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod formula;
pub mod hedge;
pub mod norm;
pub mod parser;
pub mod response;
pub mod rule;
pub mod rule_block;
pub mod settings;
pub mod term;
pub mod variable;

pub use activation::{Activation, Comparison};
pub use aggregated::{Activated, Aggregated, FuzzyOutput};
pub use ast::Span;
pub use defuzzifier::{Defuzzifier, WeightedType, DEFAULT_RESOLUTION};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use engine::{Engine, EngineType};
pub use error::{ErrorDetails, FuzzyError};
pub use formula::{Bindings, Formula, NoBindings, Node};
pub use hedge::Hedge;
pub use norm::{SNorm, TNorm};
pub use response::{InferenceReport, OutputResult};
pub use rule::{Antecedent, Consequent, Rule, Vocabulary};
pub use rule_block::{Operators, RuleBlock};
pub use settings::{DisabledVariablePolicy, EngineSettings};
pub use term::{Membership, Shape, Term};
pub use variable::{InputVariable, OutputVariable, Variable};

/// Result type for fuzzy operations
pub type FuzzyResult<T> = Result<T, FuzzyError>;

#[cfg(test)]
mod tests;
