use bfgen_core::tape::{self, decode_code_points, decode_output};
use bfgen_core::{
    encode, encode_codes, join_args, verify, verify_codes, CellWidth, RunOptions,
};

fn round_trip(input: &str) {
    let script = encode(input);
    let out = tape::run(&script, &RunOptions::with_cell(CellWidth::U8))
        .unwrap_or_else(|e| panic!("run failed for {input:?}: {e}\nscript={script}"));
    let want: Vec<u32> = input.bytes().map(u32::from).collect();
    assert_eq!(out, want, "script={script}");
    assert_eq!(decode_output(&out), input);
}

fn code_points(input: &str) -> Vec<u32> {
    input.chars().map(u32::from).collect()
}

#[test]
fn hello_world_from_two_arguments() {
    let input = join_args(&["Hello,", "World!"]);
    assert_eq!(input, "Hello, World!");
    assert_eq!(input.chars().count(), 13);
    round_trip(&input);
}

#[test]
fn concrete_scenarios() {
    assert_eq!(encode("A"), "++++++[>++++++++++<-]>+++++.");
    assert_eq!(encode("AA"), "++++++[>++++++++++<-]>+++++..");
    assert_eq!(encode(""), "");
}

#[test]
fn repeats_nul_and_direction_changes() {
    for input in [
        "aa",
        "zzz",
        "\0",
        "\0\0x\0",
        "az za",
        "~ ~ ~",
        "line one\nline two\n",
        "\u{7f}\u{1}\u{7f}",
    ] {
        round_trip(input);
    }
}

#[test]
fn non_ascii_prints_exact_utf8_on_byte_cells() {
    for input in ["caf\u{e9}", "\u{263A}", "\u{ff}\u{1}\u{ff}", "\u{1F600}!"] {
        round_trip(input);
        verify(input, &encode(input), &RunOptions::default())
            .unwrap_or_else(|e| panic!("verify {input:?}: {e}"));
    }

    let out = tape::run(&encode("caf\u{e9}"), &RunOptions::default()).expect("run");
    assert_eq!(out, vec![99, 97, 102, 0xC3, 0xA9]);
    let out = tape::run(&encode("\u{263A}"), &RunOptions::default()).expect("run");
    assert_eq!(out, vec![0xE2, 0x98, 0xBA]);
}

#[test]
fn every_byte_after_every_anchor() {
    // Each transition from a handful of anchor codes to every byte value.
    for anchor in [0u32, 1, 9, 10, 65, 128, 254, 255] {
        let codes: Vec<u32> = (0u32..=255).flat_map(|c| [anchor, c]).collect();
        let script = encode_codes(codes.iter().copied());
        let out = tape::run(&script, &RunOptions::default()).expect("run");
        assert_eq!(out, codes, "anchor={anchor}");
    }
}

#[test]
fn code_points_need_wide_cells() {
    for (input, cell) in [
        ("\u{100}\u{263A} caf\u{e9}", CellWidth::U16),
        ("\u{1F600}!", CellWidth::U32),
    ] {
        let want = code_points(input);
        let script = encode_codes(want.iter().copied());
        let out = tape::run(&script, &RunOptions::with_cell(cell)).expect("run");
        assert_eq!(decode_code_points(&out), input);
    }
}

#[test]
fn byte_cells_cannot_hold_wide_code_points() {
    let want = code_points("\u{263A}");
    let script = encode_codes(want.iter().copied());
    let err = verify_codes(&want, &script, &RunOptions::with_cell(CellWidth::U8))
        .expect_err("byte cells should not reproduce U+263A");
    assert!(
        err.to_string().starts_with("output differs at position 0"),
        "{err}"
    );
}

#[test]
fn repeated_char_contributes_only_a_print() {
    let single = encode("xq");
    let doubled = encode("xqq");
    assert_eq!(doubled, format!("{single}."));
}
