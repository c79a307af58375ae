//! Linguistic terms and their membership functions

use crate::formula::{Formula, Layered};
use crate::{FuzzyError, FuzzyResult};
use std::collections::HashMap;
use std::fmt;

/// Anything that maps a crisp value to a membership degree
pub trait Membership {
    fn membership(&self, x: f64) -> f64;
}

/// Shape of a membership function
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Triangle { a: f64, b: f64, c: f64 },
    Trapezoid { a: f64, b: f64, c: f64, d: f64 },
    Rectangle { start: f64, end: f64 },
    Gaussian { mean: f64, standard_deviation: f64 },
    Bell { center: f64, width: f64, slope: f64 },
    Ramp { start: f64, end: f64 },
    Sigmoid { inflection: f64, slope: f64 },
    SShape { start: f64, end: f64 },
    ZShape { start: f64, end: f64 },
    /// Points sorted by x, linearly interpolated
    Discrete { points: Vec<(f64, f64)> },
    Constant { value: f64 },
    /// `coefficients[i] * inputs[i]` summed, plus a trailing constant when present
    Linear {
        coefficients: Vec<f64>,
        inputs: Vec<f64>,
    },
    /// Formula over `x` and the engine's variables
    Function {
        formula: Formula,
        bindings: HashMap<String, f64>,
    },
}

impl Shape {
    fn evaluate(&self, x: f64) -> f64 {
        match self {
            Shape::Triangle { a, b, c } => {
                if x < *a || x > *c {
                    0.0
                } else if x == *b {
                    1.0
                } else if x < *b {
                    if *a == f64::NEG_INFINITY {
                        1.0
                    } else {
                        (x - a) / (b - a)
                    }
                } else if *c == f64::INFINITY {
                    1.0
                } else {
                    (c - x) / (c - b)
                }
            }
            Shape::Trapezoid { a, b, c, d } => {
                if x < *a || x > *d {
                    0.0
                } else if x < *b {
                    if *a == f64::NEG_INFINITY {
                        1.0
                    } else {
                        ((x - a) / (b - a)).min(1.0)
                    }
                } else if x <= *c {
                    1.0
                } else if x < *d {
                    if *d == f64::INFINITY {
                        1.0
                    } else {
                        (d - x) / (d - c)
                    }
                } else if *d == f64::INFINITY {
                    1.0
                } else {
                    0.0
                }
            }
            Shape::Rectangle { start, end } => {
                if *start <= x && x <= *end {
                    1.0
                } else {
                    0.0
                }
            }
            Shape::Gaussian {
                mean,
                standard_deviation,
            } => {
                let z = x - mean;
                (-(z * z) / (2.0 * standard_deviation * standard_deviation)).exp()
            }
            Shape::Bell {
                center,
                width,
                slope,
            } => 1.0 / (1.0 + ((x - center) / width).abs().powf(2.0 * slope)),
            Shape::Ramp { start, end } => {
                if start == end {
                    0.0
                } else if start < end {
                    if x <= *start {
                        0.0
                    } else if x >= *end {
                        1.0
                    } else {
                        (x - start) / (end - start)
                    }
                } else if x >= *start {
                    0.0
                } else if x <= *end {
                    1.0
                } else {
                    (start - x) / (start - end)
                }
            }
            Shape::Sigmoid { inflection, slope } => 1.0 / (1.0 + (-slope * (x - inflection)).exp()),
            Shape::SShape { start, end } => {
                let average = (start + end) / 2.0;
                let difference = end - start;
                if x <= *start {
                    0.0
                } else if x <= average {
                    2.0 * ((x - start) / difference).powi(2)
                } else if x < *end {
                    1.0 - 2.0 * ((x - end) / difference).powi(2)
                } else {
                    1.0
                }
            }
            Shape::ZShape { start, end } => {
                let average = (start + end) / 2.0;
                let difference = end - start;
                if x <= *start {
                    1.0
                } else if x <= average {
                    1.0 - 2.0 * ((x - start) / difference).powi(2)
                } else if x < *end {
                    2.0 * ((x - end) / difference).powi(2)
                } else {
                    0.0
                }
            }
            Shape::Discrete { points } => interpolate(points, x),
            Shape::Constant { value } => *value,
            Shape::Linear {
                coefficients,
                inputs,
            } => {
                let weighted: f64 = coefficients
                    .iter()
                    .zip(inputs.iter())
                    .map(|(c, v)| c * v)
                    .sum();
                match coefficients.get(inputs.len()) {
                    Some(constant) => weighted + constant,
                    None => weighted,
                }
            }
            Shape::Function { formula, bindings } => {
                let scope = Layered {
                    name: "x",
                    value: x,
                    rest: bindings,
                };
                formula.evaluate(&scope).unwrap_or_else(|e| {
                    tracing::error!(formula = %formula.text(), error = %e, "term formula failed");
                    f64::NAN
                })
            }
        }
    }

    /// Constant, linear and formula shapes produce values, not degrees
    fn is_bounded(&self) -> bool {
        !matches!(
            self,
            Shape::Constant { .. } | Shape::Linear { .. } | Shape::Function { .. }
        )
    }

    pub fn is_monotonic(&self) -> bool {
        matches!(
            self,
            Shape::Ramp { .. } | Shape::Sigmoid { .. } | Shape::SShape { .. } | Shape::ZShape { .. }
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Triangle { .. } => "Triangle",
            Shape::Trapezoid { .. } => "Trapezoid",
            Shape::Rectangle { .. } => "Rectangle",
            Shape::Gaussian { .. } => "Gaussian",
            Shape::Bell { .. } => "Bell",
            Shape::Ramp { .. } => "Ramp",
            Shape::Sigmoid { .. } => "Sigmoid",
            Shape::SShape { .. } => "SShape",
            Shape::ZShape { .. } => "ZShape",
            Shape::Discrete { .. } => "Discrete",
            Shape::Constant { .. } => "Constant",
            Shape::Linear { .. } => "Linear",
            Shape::Function { .. } => "Function",
        }
    }
}

fn interpolate(points: &[(f64, f64)], x: f64) -> f64 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return f64::NAN;
    };
    if x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }
    let upper = points.partition_point(|(px, _)| *px <= x);
    let (x0, y0) = points[upper - 1];
    let (x1, y1) = points[upper];
    if x1 == x0 {
        return y1;
    }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// A named membership function owned by a variable
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    name: String,
    shape: Shape,
    height: f64,
}

impl Term {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            height: 1.0,
        }
    }

    pub fn triangle(name: impl Into<String>, a: f64, b: f64, c: f64) -> Self {
        Self::new(name, Shape::Triangle { a, b, c })
    }

    pub fn trapezoid(name: impl Into<String>, a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::new(name, Shape::Trapezoid { a, b, c, d })
    }

    pub fn rectangle(name: impl Into<String>, start: f64, end: f64) -> Self {
        Self::new(name, Shape::Rectangle { start, end })
    }

    pub fn gaussian(name: impl Into<String>, mean: f64, standard_deviation: f64) -> Self {
        Self::new(
            name,
            Shape::Gaussian {
                mean,
                standard_deviation,
            },
        )
    }

    pub fn bell(name: impl Into<String>, center: f64, width: f64, slope: f64) -> Self {
        Self::new(
            name,
            Shape::Bell {
                center,
                width,
                slope,
            },
        )
    }

    pub fn ramp(name: impl Into<String>, start: f64, end: f64) -> Self {
        Self::new(name, Shape::Ramp { start, end })
    }

    pub fn sigmoid(name: impl Into<String>, inflection: f64, slope: f64) -> Self {
        Self::new(name, Shape::Sigmoid { inflection, slope })
    }

    pub fn s_shape(name: impl Into<String>, start: f64, end: f64) -> Self {
        Self::new(name, Shape::SShape { start, end })
    }

    pub fn z_shape(name: impl Into<String>, start: f64, end: f64) -> Self {
        Self::new(name, Shape::ZShape { start, end })
    }

    pub fn constant(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, Shape::Constant { value })
    }

    pub fn linear(name: impl Into<String>, coefficients: Vec<f64>) -> Self {
        Self::new(
            name,
            Shape::Linear {
                coefficients,
                inputs: Vec::new(),
            },
        )
    }

    /// Piecewise-linear term; points must be non-empty and sorted by x
    pub fn discrete(name: impl Into<String>, points: Vec<(f64, f64)>) -> FuzzyResult<Self> {
        let name = name.into();
        if points.is_empty() {
            return Err(FuzzyError::Engine(format!(
                "Discrete term '{}' needs at least one point",
                name
            )));
        }
        if points.windows(2).any(|pair| pair[0].0 > pair[1].0) {
            return Err(FuzzyError::Engine(format!(
                "Discrete term '{}' has points out of order",
                name
            )));
        }
        Ok(Self::new(name, Shape::Discrete { points }))
    }

    /// Formula-defined term; `x` is bound to the value being fuzzified
    pub fn function(name: impl Into<String>, formula: &str) -> FuzzyResult<Self> {
        Ok(Self::new(
            name,
            Shape::Function {
                formula: Formula::parse(formula)?,
                bindings: HashMap::new(),
            },
        ))
    }

    /// Scale the membership of bounded shapes by `height`
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn is_monotonic(&self) -> bool {
        self.shape.is_monotonic()
    }

    /// Constant, linear and formula terms yield crisp values rather than degrees
    pub fn is_takagi_sugeno(&self) -> bool {
        !self.shape.is_bounded()
    }

    /// Refresh the engine values seen by linear and formula shapes
    pub(crate) fn bind(&mut self, values: &HashMap<String, f64>, input_values: &[f64]) {
        match &mut self.shape {
            Shape::Linear { inputs, .. } => {
                inputs.clear();
                inputs.extend_from_slice(input_values);
            }
            Shape::Function { bindings, .. } => bindings.clone_from(values),
            _ => {}
        }
    }

    /// Solve `membership(z) = w` in closed form for monotonic shapes.
    ///
    /// Returns `None` for shapes without a registered inverse.
    pub fn tsukamoto(&self, w: f64, minimum: f64, maximum: f64) -> Option<f64> {
        let w = if self.shape.is_bounded() && self.height != 0.0 {
            w / self.height
        } else {
            w
        };
        let z = match &self.shape {
            Shape::Ramp { start, end } => start + w * (end - start),
            Shape::Sigmoid { inflection, slope } => {
                if w >= 1.0 {
                    if *slope >= 0.0 {
                        maximum
                    } else {
                        minimum
                    }
                } else if w <= 0.0 {
                    if *slope >= 0.0 {
                        minimum
                    } else {
                        maximum
                    }
                } else {
                    inflection + (1.0 / w - 1.0).ln() / -slope
                }
            }
            Shape::SShape { start, end } => {
                let difference = end - start;
                let rising = start + difference * (0.5 * w).sqrt();
                let settling = end - difference * (0.5 * (1.0 - w)).sqrt();
                self.closer_root(w, rising, settling)
            }
            Shape::ZShape { start, end } => {
                let difference = end - start;
                let falling = start + difference * (0.5 * (1.0 - w)).sqrt();
                let settling = end - difference * (0.5 * w).sqrt();
                self.closer_root(w, falling, settling)
            }
            _ => return None,
        };
        Some(z)
    }

    fn closer_root(&self, w: f64, a: f64, b: f64) -> f64 {
        if (w - self.shape.evaluate(a)).abs() < (w - self.shape.evaluate(b)).abs() {
            a
        } else {
            b
        }
    }
}

impl Membership for Term {
    fn membership(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        let mu = self.shape.evaluate(x);
        if self.shape.is_bounded() {
            self.height * mu
        } else {
            mu
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.shape.kind())
    }
}
