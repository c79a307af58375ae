// Formula engine tests
mod formula_evaluation;

mod terms;

// Inference tests
mod activation;
mod defuzzifier;
