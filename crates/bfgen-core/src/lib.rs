//! Text -> Brainfuck generator.
//!
//! `encode` turns a string into a script that prints it back; `tape` is a
//! small reference interpreter used to check that promise.

pub mod contracts;
pub mod diagnostics;
pub mod encode;
pub mod instr;
pub mod tape;

pub use encode::{encode, encode_codes, join_args, transition_cost, ScriptStats};
pub use tape::{run, verify, verify_codes, CellWidth, RunError, RunOptions};
