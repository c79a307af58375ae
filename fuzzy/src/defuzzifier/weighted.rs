//! Weighted defuzzifiers
//!
//! Every fired term contributes one point `z` weighted by its activation
//! degree `w`. Takagi-Sugeno terms produce `z` by evaluation, Tsukamoto
//! terms by inverting their membership function at `w`.

use super::WeightedType;
use crate::aggregated::FuzzyOutput;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::settings::EngineSettings;
use crate::term::{Membership, Term};

/// `Σ w·z / Σ w`
pub fn weighted_average(
    fuzzy: &FuzzyOutput<'_>,
    weighted: WeightedType,
    minimum: f64,
    maximum: f64,
    settings: &EngineSettings,
    diagnostics: &mut Diagnostics,
) -> f64 {
    let points = points(fuzzy, weighted, minimum, maximum, settings, diagnostics);
    if points.is_empty() {
        return f64::NAN;
    }
    let (sum, weights) = points
        .iter()
        .fold((0.0, 0.0), |(sum, weights), (w, z)| (sum + w * z, weights + w));
    sum / weights
}

/// `Σ w·z`
pub fn weighted_sum(
    fuzzy: &FuzzyOutput<'_>,
    weighted: WeightedType,
    minimum: f64,
    maximum: f64,
    settings: &EngineSettings,
    diagnostics: &mut Diagnostics,
) -> f64 {
    let points = points(fuzzy, weighted, minimum, maximum, settings, diagnostics);
    if points.is_empty() {
        return f64::NAN;
    }
    points.iter().map(|(w, z)| w * z).sum()
}

// With an aggregation operator, repeated activations of one term collapse
// into its aggregated degree; without one, each activation counts.
fn points(
    fuzzy: &FuzzyOutput<'_>,
    weighted: WeightedType,
    minimum: f64,
    maximum: f64,
    settings: &EngineSettings,
    diagnostics: &mut Diagnostics,
) -> Vec<(f64, f64)> {
    let aggregated = fuzzy.aggregated();
    let mut degrees: Vec<(usize, f64)> = Vec::new();
    if aggregated.aggregation().is_some() {
        for activated in aggregated.activated() {
            if degrees.iter().all(|(term, _)| *term != activated.term) {
                degrees.push((activated.term, aggregated.activation_degree(activated.term)));
            }
        }
    } else {
        degrees.extend(
            aggregated
                .activated()
                .iter()
                .map(|activated| (activated.term, activated.degree)),
        );
    }

    degrees
        .into_iter()
        .filter_map(|(index, w)| {
            let term = fuzzy.term(index)?;
            let z = crisp_value(
                fuzzy.name(),
                term,
                w,
                weighted,
                minimum,
                maximum,
                settings,
                diagnostics,
            );
            Some((w, z))
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn crisp_value(
    variable: &str,
    term: &Term,
    w: f64,
    weighted: WeightedType,
    minimum: f64,
    maximum: f64,
    settings: &EngineSettings,
    diagnostics: &mut Diagnostics,
) -> f64 {
    let tsukamoto = match weighted {
        WeightedType::Automatic => !term.is_takagi_sugeno(),
        WeightedType::TakagiSugeno => false,
        WeightedType::Tsukamoto => true,
    };
    if !tsukamoto {
        return term.membership(w);
    }

    let z = term
        .tsukamoto(w, minimum, maximum)
        .unwrap_or_else(|| term.membership(w));
    let obtained = term.membership(z);
    if (w - obtained).abs() > settings.tsukamoto_tolerance {
        diagnostics.push(Diagnostic::Inaccuracy {
            variable: variable.to_string(),
            term: term.name().to_string(),
            expected: w,
            obtained,
        });
    }
    z
}
