#![no_main]

use fuzzy::Formula;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(formula) = Formula::parse(s) {
            let _ = formula.evaluate(&[("x", 0.5), ("y", -2.0)]);
            let rendered = formula.to_infix();
            let reparsed = Formula::parse(&rendered);
            assert!(reparsed.is_ok(), "rendering of '{}' did not parse: {}", s, rendered);
        }
    }
});
