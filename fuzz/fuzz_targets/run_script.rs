#![no_main]

use bfgen_core::{run, RunOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let data = if data.len() > 64 * 1024 {
        &data[..64 * 1024]
    } else {
        data
    };

    let Ok(script) = std::str::from_utf8(data) else {
        return;
    };

    let opts = RunOptions {
        max_steps: 100_000,
        ..RunOptions::default()
    };
    let _ = run(script, &opts);
});
