#![no_main]

use fuzzy::Formula;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, u16)| {
    let (depth, length) = input;
    let depth = (depth as usize % 150) + 1;

    let mut text = String::from("1");
    for _ in 0..depth {
        text = format!("max({} + 1, 0)", text);
    }
    let _ = Formula::parse(&text);

    let length = length as usize % 20_000;
    let _ = Formula::parse(&format!("1{}", "+1".repeat(length)));
    let _ = Formula::parse(&format!("{}1", "-".repeat(length)));
    let _ = Formula::parse(&format!("2{}", "^2".repeat(length)));
});
