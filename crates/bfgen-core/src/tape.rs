//! Reference Brainfuck interpreter.
//!
//! The tape starts as a single zero cell and grows to the right on demand.
//! Cells wrap modulo `2^bits` for the configured [`CellWidth`].

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::instr::Instr;

pub const DEFAULT_MAX_STEPS: u64 = 10_000_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellWidth {
    #[default]
    #[serde(rename = "8")]
    U8,
    #[serde(rename = "16")]
    U16,
    #[serde(rename = "32")]
    U32,
}

impl CellWidth {
    pub fn as_str(self) -> &'static str {
        match self {
            CellWidth::U8 => "8",
            CellWidth::U16 => "16",
            CellWidth::U32 => "32",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "8" => Some(CellWidth::U8),
            "16" => Some(CellWidth::U16),
            "32" => Some(CellWidth::U32),
            _ => None,
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            CellWidth::U8 => 8,
            CellWidth::U16 => 16,
            CellWidth::U32 => 32,
        }
    }

    /// Largest value a cell can hold; also the wrap mask.
    pub fn max_value(self) -> u32 {
        match self {
            CellWidth::U8 => u8::MAX as u32,
            CellWidth::U16 => u16::MAX as u32,
            CellWidth::U32 => u32::MAX,
        }
    }

    fn wrap(self, v: u32) -> u32 {
        v & self.max_value()
    }
}

#[cfg(feature = "clap")]
impl clap::ValueEnum for CellWidth {
    fn value_variants<'a>() -> &'a [Self] {
        &[CellWidth::U8, CellWidth::U16, CellWidth::U32]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub cell: CellWidth,
    pub max_steps: u64,
    /// Values consumed by `,` in order. Once exhausted, `,` leaves the cell as is.
    pub input: Vec<u32>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            cell: CellWidth::default(),
            max_steps: DEFAULT_MAX_STEPS,
            input: Vec::new(),
        }
    }
}

impl RunOptions {
    pub fn with_cell(cell: CellWidth) -> Self {
        RunOptions {
            cell,
            ..RunOptions::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    UnmatchedOpen {
        offset: usize,
    },
    UnmatchedClose {
        offset: usize,
    },
    TapeUnderflow {
        step: u64,
    },
    StepLimit {
        max_steps: u64,
    },
    OutputMismatch {
        index: usize,
        expected: Option<u32>,
        actual: Option<u32>,
    },
}

impl std::error::Error for RunError {}

impl Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::UnmatchedOpen { offset } => write!(f, "unmatched '[' at byte {offset}"),
            RunError::UnmatchedClose { offset } => write!(f, "unmatched ']' at byte {offset}"),
            RunError::TapeUnderflow { step } => {
                write!(f, "moved left of cell 0 at step {step}")
            }
            RunError::StepLimit { max_steps } => {
                write!(f, "step limit exceeded (max_steps={max_steps})")
            }
            RunError::OutputMismatch {
                index,
                expected,
                actual,
            } => write!(
                f,
                "output differs at position {index}: expected {}, got {}",
                fmt_code(*expected),
                fmt_code(*actual)
            ),
        }
    }
}

fn fmt_code(code: Option<u32>) -> String {
    match code {
        Some(c) => format!("{c}"),
        None => "end of output".to_string(),
    }
}

/// A parsed script with bracket targets resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    ops: Vec<Instr>,
    // For brackets: index of the matching bracket. Unused for other ops.
    jumps: Vec<usize>,
}

pub fn parse(script: &str) -> Result<Program, RunError> {
    let mut ops = Vec::new();
    let mut jumps = Vec::new();
    let mut open: Vec<(usize, usize)> = Vec::new();

    for (offset, c) in script.char_indices() {
        let Some(instr) = Instr::from_char(c) else {
            continue;
        };
        let idx = ops.len();
        ops.push(instr);
        jumps.push(0);
        match instr {
            Instr::LoopOpen => open.push((idx, offset)),
            Instr::LoopClose => {
                let Some((start, _)) = open.pop() else {
                    return Err(RunError::UnmatchedClose { offset });
                };
                jumps[start] = idx;
                jumps[idx] = start;
            }
            _ => {}
        }
    }

    if let Some(&(_, offset)) = open.last() {
        return Err(RunError::UnmatchedOpen { offset });
    }

    Ok(Program { ops, jumps })
}

impl Program {
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn instrs(&self) -> &[Instr] {
        &self.ops
    }

    /// Executes the program and returns every value written by `.`.
    pub fn run(&self, options: &RunOptions) -> Result<Vec<u32>, RunError> {
        let cell = options.cell;
        let mut tape: Vec<u32> = vec![0];
        let mut ptr = 0usize;
        let mut pc = 0usize;
        let mut steps = 0u64;
        let mut input = options.input.iter().copied();
        let mut out = Vec::new();

        while pc < self.ops.len() {
            if steps >= options.max_steps {
                return Err(RunError::StepLimit {
                    max_steps: options.max_steps,
                });
            }
            steps += 1;

            match self.ops[pc] {
                Instr::Inc => tape[ptr] = cell.wrap(tape[ptr].wrapping_add(1)),
                Instr::Dec => tape[ptr] = cell.wrap(tape[ptr].wrapping_sub(1)),
                Instr::Right => {
                    ptr += 1;
                    if ptr == tape.len() {
                        tape.push(0);
                    }
                }
                Instr::Left => {
                    if ptr == 0 {
                        return Err(RunError::TapeUnderflow { step: steps });
                    }
                    ptr -= 1;
                }
                Instr::LoopOpen => {
                    if tape[ptr] == 0 {
                        pc = self.jumps[pc];
                    }
                }
                Instr::LoopClose => {
                    if tape[ptr] != 0 {
                        pc = self.jumps[pc];
                    }
                }
                Instr::Output => out.push(tape[ptr]),
                Instr::Input => {
                    if let Some(v) = input.next() {
                        tape[ptr] = cell.wrap(v);
                    }
                }
            }
            pc += 1;
        }

        Ok(out)
    }
}

pub fn run(script: &str, options: &RunOptions) -> Result<Vec<u32>, RunError> {
    parse(script)?.run(options)
}

/// Reads output values as bytes and decodes them as UTF-8. Values above 255
/// and invalid sequences become U+FFFD.
pub fn decode_output(codes: &[u32]) -> String {
    let mut out = String::new();
    let mut bytes = Vec::new();
    for &c in codes {
        match u8::try_from(c) {
            Ok(b) => bytes.push(b),
            Err(_) => {
                out.push_str(&String::from_utf8_lossy(&bytes));
                bytes.clear();
                out.push(char::REPLACEMENT_CHARACTER);
            }
        }
    }
    out.push_str(&String::from_utf8_lossy(&bytes));
    out
}

/// Reads output values as Unicode scalar values, the inverse of
/// `encode_codes(s.chars().map(u32::from))`. Invalid values become U+FFFD.
pub fn decode_code_points(codes: &[u32]) -> String {
    codes
        .iter()
        .map(|&c| char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Runs `script` and checks that it prints exactly the UTF-8 bytes of `input`.
pub fn verify(input: &str, script: &str, options: &RunOptions) -> Result<(), RunError> {
    let want: Vec<u32> = input.bytes().map(u32::from).collect();
    verify_codes(&want, script, options)
}

/// Runs `script` and checks that it prints exactly `want`.
pub fn verify_codes(want: &[u32], script: &str, options: &RunOptions) -> Result<(), RunError> {
    let got = run(script, options)?;
    if got == want {
        return Ok(());
    }
    let index = want
        .iter()
        .zip(&got)
        .position(|(w, g)| w != g)
        .unwrap_or_else(|| want.len().min(got.len()));
    Err(RunError::OutputMismatch {
        index,
        expected: want.get(index).copied(),
        actual: got.get(index).copied(),
    })
}
