#![no_main]

use bfgen_core::{encode, encode_codes, verify, verify_codes, RunOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let data = if data.len() > 4 * 1024 {
        &data[..4 * 1024]
    } else {
        data
    };

    // Raw bytes: every value fits a byte cell.
    let codes: Vec<u32> = data.iter().copied().map(u32::from).collect();
    let script = encode_codes(codes.iter().copied());
    if let Err(err) = verify_codes(&codes, &script, &RunOptions::default()) {
        panic!("byte round trip failed: {err}\ncodes={codes:?}\nscript={script}");
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let script = encode(text);
        if let Err(err) = verify(text, &script, &RunOptions::default()) {
            panic!("text round trip failed: {err}\ninput={text:?}\nscript={script}");
        }
    }
});
