#![no_main]

use libfuzzer_sys::fuzz_target;

use disksched_core::{evaluate_all, Workload};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Parsing, validation and evaluation must never panic.
    let Ok(workload) = text.parse::<Workload>() else {
        return;
    };
    let _ = workload.validate();
    let _ = evaluate_all(&workload);
});
