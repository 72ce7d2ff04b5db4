//! `bfgen-report`: encode text, check it on the built-in interpreter and
//! print a JSON report. Kept apart from `bfgen`, whose arguments are all text.

use std::io::Write as _;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use bfgen_core::contracts::BFGEN_REPORT_SCHEMA_VERSION;
use bfgen_core::diagnostics::{self, Diagnostic};
use bfgen_core::{
    encode, encode_codes, join_args, verify, verify_codes, CellWidth, RunOptions, ScriptStats,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
enum Unit {
    /// One printed value per UTF-8 byte (what `bfgen` emits).
    #[default]
    Utf8,
    /// One printed value per Unicode scalar value; needs wide cells.
    CodePoint,
}

#[derive(Parser, Debug)]
#[command(name = "bfgen-report")]
#[command(about = "Encode text as Brainfuck and report on the result as JSON.", long_about = None)]
struct Cli {
    /// Cell width of the interpreter used for checking.
    #[arg(long, value_enum, default_value_t = CellWidth::U8)]
    cell_bits: CellWidth,
    /// What each printed value stands for.
    #[arg(long, value_enum, default_value_t = Unit::Utf8)]
    unit: Unit,
    /// Do not run the generated script.
    #[arg(long)]
    no_verify: bool,
    /// Text to encode. Words are joined with single spaces.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    text: Vec<String>,
}

#[derive(Debug, Serialize)]
struct BfgenReport {
    schema_version: &'static str,
    ok: bool,
    input: String,
    unit: Unit,
    cell_bits: u32,
    script: String,
    script_len: usize,
    stats: ScriptStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    verified: Option<bool>,
    diagnostics_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<Diagnostic>,
    exit_code: u8,
}

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn try_main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let report = build_report(&cli);
    let exit_code = report.exit_code;

    let out = serde_json::to_string(&report).context("serialize report")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{out}").context("write report")?;
    stdout.flush().context("flush stdout")?;

    Ok(ExitCode::from(exit_code))
}

fn build_report(cli: &Cli) -> BfgenReport {
    let input = join_args(&cli.text);
    let options = RunOptions::with_cell(cli.cell_bits);

    let (script, mut diagnostics, checked) = match cli.unit {
        Unit::Utf8 => {
            let script = encode(&input);
            let checked = (!cli.no_verify).then(|| verify(&input, &script, &options));
            (script, Vec::new(), checked)
        }
        Unit::CodePoint => {
            let codes: Vec<u32> = input.chars().map(u32::from).collect();
            let script = encode_codes(codes.iter().copied());
            let checked = (!cli.no_verify).then(|| verify_codes(&codes, &script, &options));
            let diags = diagnostics::cell_width_diagnostics(&input, cli.cell_bits);
            (script, diags, checked)
        }
    };

    let verified = checked.map(|res| match res {
        Ok(()) => true,
        Err(err) => {
            diagnostics.push(Diagnostic::from_verify_error(&err, cli.cell_bits));
            false
        }
    });

    let ok = !diagnostics.iter().any(Diagnostic::is_error);
    BfgenReport {
        schema_version: BFGEN_REPORT_SCHEMA_VERSION,
        ok,
        input,
        unit: cli.unit,
        cell_bits: cli.cell_bits.bits(),
        script_len: script.len(),
        stats: ScriptStats::of(&script),
        script,
        verified,
        diagnostics_count: diagnostics.len(),
        diagnostics,
        exit_code: if ok { 0 } else { 1 },
    }
}
