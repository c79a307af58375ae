#![no_main]

use fuzzy::{Defuzzifier, Engine, InputVariable, OutputVariable, RuleBlock, Term};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut engine = Engine::new("fuzz");
        let _ = engine.add_input_variable(
            InputVariable::new("x", 0.0, 1.0)
                .with_term(Term::ramp("low", 1.0, 0.0))
                .with_term(Term::ramp("high", 0.0, 1.0)),
        );
        let _ = engine.add_output_variable(
            OutputVariable::new("z", 0.0, 1.0)
                .with_term(Term::triangle("small", 0.0, 0.0, 0.5))
                .with_term(Term::triangle("large", 0.5, 1.0, 1.0))
                .with_defuzzifier(Defuzzifier::centroid()),
        );
        let _ = engine.add_rule_block(RuleBlock::new("rules"));

        if engine.add_rule("rules", s).is_ok() {
            let _ = engine.set_input_value("x", 0.3);
            let _ = engine.process();
        }
    }
});
