//! Fixed operator and function table of the formula language

use crate::parser::shunting_yard::Operator;
use serde::Serialize;

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOperator {
    Negate,
    Not,
}

impl UnaryOperator {
    pub fn apply(self, a: f64) -> f64 {
        match self {
            UnaryOperator::Negate => -a,
            UnaryOperator::Not => truth(a == 0.0),
        }
    }

    /// Symbol used when rendering infix text
    pub fn infix_symbol(self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::Not => "!",
        }
    }

    /// Symbol used in prefix and postfix text, where `-` would read as subtraction
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Negate => "~",
            UnaryOperator::Not => "!",
        }
    }
}

/// Infix binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    Power,
    Multiply,
    Divide,
    Modulo,
    Add,
    Subtract,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Equal,
    NotEqual,
    And,
    Or,
}

impl BinaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "^" => BinaryOperator::Power,
            "*" => BinaryOperator::Multiply,
            "/" => BinaryOperator::Divide,
            "%" => BinaryOperator::Modulo,
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Subtract,
            "<" => BinaryOperator::LessThan,
            "<=" => BinaryOperator::LessThanOrEqual,
            ">" => BinaryOperator::GreaterThan,
            ">=" => BinaryOperator::GreaterThanOrEqual,
            "==" => BinaryOperator::Equal,
            "!=" => BinaryOperator::NotEqual,
            "and" | "&&" => BinaryOperator::And,
            "or" | "||" => BinaryOperator::Or,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Power => "^",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Power => 90,
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => 80,
            BinaryOperator::Add | BinaryOperator::Subtract => 70,
            BinaryOperator::LessThan
            | BinaryOperator::LessThanOrEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanOrEqual
            | BinaryOperator::Equal
            | BinaryOperator::NotEqual => 60,
            BinaryOperator::And => 50,
            BinaryOperator::Or => 40,
        }
    }

    pub fn is_right_associative(self) -> bool {
        self == BinaryOperator::Power
    }

    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOperator::Power => a.powf(b),
            BinaryOperator::Multiply => a * b,
            BinaryOperator::Divide => a / b,
            BinaryOperator::Modulo => a % b,
            BinaryOperator::Add => a + b,
            BinaryOperator::Subtract => a - b,
            BinaryOperator::LessThan => truth(a < b),
            BinaryOperator::LessThanOrEqual => truth(a <= b),
            BinaryOperator::GreaterThan => truth(a > b),
            BinaryOperator::GreaterThanOrEqual => truth(a >= b),
            BinaryOperator::Equal => truth(a == b),
            BinaryOperator::NotEqual => truth(a != b),
            BinaryOperator::And => truth(a != 0.0 && b != 0.0),
            BinaryOperator::Or => truth(a != 0.0 || b != 0.0),
        }
    }
}

/// Named functions of arity one or two
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Builtin {
    Abs,
    Acos,
    Acosh,
    Asin,
    Asinh,
    Atan,
    Atanh,
    Ceil,
    Cos,
    Cosh,
    Exp,
    Expm1,
    Floor,
    Log,
    Log10,
    Log1p,
    Round,
    Sin,
    Sinh,
    Sqrt,
    Tan,
    Tanh,
    Min,
    Max,
    Pow,
    Atan2,
    Fmod,
    Eq,
    Neq,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        let function = match name {
            "abs" | "fabs" => Builtin::Abs,
            "acos" => Builtin::Acos,
            "acosh" => Builtin::Acosh,
            "asin" => Builtin::Asin,
            "asinh" => Builtin::Asinh,
            "atan" => Builtin::Atan,
            "atanh" => Builtin::Atanh,
            "ceil" => Builtin::Ceil,
            "cos" => Builtin::Cos,
            "cosh" => Builtin::Cosh,
            "exp" => Builtin::Exp,
            "expm1" => Builtin::Expm1,
            "floor" => Builtin::Floor,
            "log" => Builtin::Log,
            "log10" => Builtin::Log10,
            "log1p" => Builtin::Log1p,
            "round" => Builtin::Round,
            "sin" => Builtin::Sin,
            "sinh" => Builtin::Sinh,
            "sqrt" => Builtin::Sqrt,
            "tan" => Builtin::Tan,
            "tanh" => Builtin::Tanh,
            "min" => Builtin::Min,
            "max" => Builtin::Max,
            "pow" => Builtin::Pow,
            "atan2" => Builtin::Atan2,
            "fmod" => Builtin::Fmod,
            "eq" => Builtin::Eq,
            "neq" => Builtin::Neq,
            "gt" => Builtin::Gt,
            "ge" => Builtin::Ge,
            "lt" => Builtin::Lt,
            "le" => Builtin::Le,
            _ => return None,
        };
        Some(function)
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Abs => "abs",
            Builtin::Acos => "acos",
            Builtin::Acosh => "acosh",
            Builtin::Asin => "asin",
            Builtin::Asinh => "asinh",
            Builtin::Atan => "atan",
            Builtin::Atanh => "atanh",
            Builtin::Ceil => "ceil",
            Builtin::Cos => "cos",
            Builtin::Cosh => "cosh",
            Builtin::Exp => "exp",
            Builtin::Expm1 => "expm1",
            Builtin::Floor => "floor",
            Builtin::Log => "log",
            Builtin::Log10 => "log10",
            Builtin::Log1p => "log1p",
            Builtin::Round => "round",
            Builtin::Sin => "sin",
            Builtin::Sinh => "sinh",
            Builtin::Sqrt => "sqrt",
            Builtin::Tan => "tan",
            Builtin::Tanh => "tanh",
            Builtin::Min => "min",
            Builtin::Max => "max",
            Builtin::Pow => "pow",
            Builtin::Atan2 => "atan2",
            Builtin::Fmod => "fmod",
            Builtin::Eq => "eq",
            Builtin::Neq => "neq",
            Builtin::Gt => "gt",
            Builtin::Ge => "ge",
            Builtin::Lt => "lt",
            Builtin::Le => "le",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Builtin::Min
            | Builtin::Max
            | Builtin::Pow
            | Builtin::Atan2
            | Builtin::Fmod
            | Builtin::Eq
            | Builtin::Neq
            | Builtin::Gt
            | Builtin::Ge
            | Builtin::Lt
            | Builtin::Le => 2,
            _ => 1,
        }
    }

    /// Apply to already evaluated arguments; `args.len()` equals `arity()`
    pub fn apply(self, args: &[f64]) -> f64 {
        let a = args.first().copied().unwrap_or(f64::NAN);
        let b = args.get(1).copied().unwrap_or(f64::NAN);
        match self {
            Builtin::Abs => a.abs(),
            Builtin::Acos => a.acos(),
            Builtin::Acosh => a.acosh(),
            Builtin::Asin => a.asin(),
            Builtin::Asinh => a.asinh(),
            Builtin::Atan => a.atan(),
            Builtin::Atanh => a.atanh(),
            Builtin::Ceil => a.ceil(),
            Builtin::Cos => a.cos(),
            Builtin::Cosh => a.cosh(),
            Builtin::Exp => a.exp(),
            Builtin::Expm1 => a.exp_m1(),
            Builtin::Floor => a.floor(),
            Builtin::Log => a.ln(),
            Builtin::Log10 => a.log10(),
            Builtin::Log1p => a.ln_1p(),
            Builtin::Round => a.round(),
            Builtin::Sin => a.sin(),
            Builtin::Sinh => a.sinh(),
            Builtin::Sqrt => a.sqrt(),
            Builtin::Tan => a.tan(),
            Builtin::Tanh => a.tanh(),
            Builtin::Min => a.min(b),
            Builtin::Max => a.max(b),
            Builtin::Pow => a.powf(b),
            Builtin::Atan2 => a.atan2(b),
            Builtin::Fmod => a % b,
            Builtin::Eq => truth(a == b),
            Builtin::Neq => truth(a != b),
            Builtin::Gt => truth(a > b),
            Builtin::Ge => truth(a >= b),
            Builtin::Lt => truth(a < b),
            Builtin::Le => truth(a <= b),
        }
    }
}

/// Named constants recognised in place of variables
pub fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        "inf" => Some(f64::INFINITY),
        "nan" => Some(f64::NAN),
        _ => None,
    }
}

fn truth(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

/// Element of the formula grammar as seen by the shunting yard
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Element {
    Unary(UnaryOperator),
    Binary(BinaryOperator),
    Function(Builtin),
}

impl Operator for Element {
    fn precedence(&self) -> u8 {
        match self {
            Element::Unary(_) => 100,
            Element::Binary(op) => op.precedence(),
            Element::Function(_) => 110,
        }
    }

    fn is_right_associative(&self) -> bool {
        match self {
            Element::Unary(_) => true,
            Element::Binary(op) => op.is_right_associative(),
            Element::Function(_) => false,
        }
    }

    fn arity(&self) -> usize {
        match self {
            Element::Unary(_) => 1,
            Element::Binary(_) => 2,
            Element::Function(function) => function.arity(),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Element::Unary(op) => op.infix_symbol(),
            Element::Binary(op) => op.symbol(),
            Element::Function(function) => function.name(),
        }
    }

    fn as_prefix(&self) -> Option<Self> {
        match self {
            Element::Binary(BinaryOperator::Subtract) => {
                Some(Element::Unary(UnaryOperator::Negate))
            }
            _ => None,
        }
    }
}
