use serde::Serialize;

use crate::instr::Instr;

/// Units added to the secondary cell per turn of the multiply loop.
pub const MULTIPLIER: u32 = 10;

/// Length of `[>++++++++++<-]>`: brackets, two moves, the counter decrement
/// and `MULTIPLIER` steps on the secondary cell.
pub const LOOP_TEXT_LEN: usize = MULTIPLIER as usize + 6;

/// Joins command-line words with single spaces.
pub fn join_args<S: AsRef<str>>(args: &[S]) -> String {
    let words: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    words.join(" ")
}

/// Returns a Brainfuck script that prints the UTF-8 bytes of `input`.
///
/// Cell 0 is the loop counter and cell 1 holds the last printed byte. Each
/// byte costs `delta / 10` counter increments, one multiply loop and
/// `delta % 10` direct steps, where `delta` is the distance from the
/// previous byte. Every value stays in 0..=255, so 8-bit cells suffice.
///
/// A leading NUL byte is printed as `>.` rather than a bare `.`: the cursor
/// starts on the counter cell, and without the `>` the next `<` would move
/// left of cell 0.
pub fn encode(input: &str) -> String {
    encode_codes(input.bytes().map(u32::from))
}

/// Same as [`encode`] over raw codes, e.g. Unicode scalar values. Codes
/// above 255 need cells wider than a byte.
pub fn encode_codes<I>(codes: I) -> String
where
    I: IntoIterator<Item = u32>,
{
    let mut out = String::new();
    let mut current = 0u32;
    let mut codes = codes.into_iter().peekable();

    while let Some(code) = codes.next() {
        if code != current {
            emit_transition(&mut out, current, code);
        } else if out.ends_with(Instr::Left.as_char()) {
            // Still on the cell that already holds `code`: undo the move back.
            out.pop();
        } else if out.is_empty() {
            // Leading NUL: the cursor has not left the counter cell yet.
            out.push(Instr::Right.as_char());
        }

        out.push(Instr::Output.as_char());
        if codes.peek().is_some() {
            out.push(Instr::Left.as_char());
        }
        current = code;
    }

    out
}

fn emit_transition(out: &mut String, from: u32, to: u32) {
    let (delta, step) = if to > from {
        (to - from, Instr::Inc)
    } else {
        (from - to, Instr::Dec)
    };

    push_n(out, Instr::Inc, delta / MULTIPLIER);
    out.push(Instr::LoopOpen.as_char());
    out.push(Instr::Right.as_char());
    push_n(out, step, MULTIPLIER);
    out.push(Instr::Left.as_char());
    out.push(Instr::Dec.as_char());
    out.push(Instr::LoopClose.as_char());
    out.push(Instr::Right.as_char());
    push_n(out, step, delta % MULTIPLIER);
}

fn push_n(out: &mut String, instr: Instr, n: u32) {
    out.extend(std::iter::repeat(instr.as_char()).take(n as usize));
}

/// Number of tape instructions emitted to move the secondary cell from
/// `from` to `to`, excluding the print and the trailing move back.
pub fn transition_cost(from: u32, to: u32) -> usize {
    if from == to {
        return 0;
    }
    let delta = from.abs_diff(to);
    (delta / MULTIPLIER) as usize + LOOP_TEXT_LEN + (delta % MULTIPLIER) as usize
}

/// Instruction counts for a script; `loops` counts `[` and `comments`
/// counts every non-instruction char.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScriptStats {
    pub len: usize,
    pub inc: usize,
    pub dec: usize,
    pub right: usize,
    pub left: usize,
    pub loops: usize,
    pub outputs: usize,
    pub inputs: usize,
    pub comments: usize,
}

impl ScriptStats {
    pub fn of(script: &str) -> Self {
        let mut stats = ScriptStats::default();
        for c in script.chars() {
            stats.len += 1;
            match Instr::from_char(c) {
                Some(Instr::Inc) => stats.inc += 1,
                Some(Instr::Dec) => stats.dec += 1,
                Some(Instr::Right) => stats.right += 1,
                Some(Instr::Left) => stats.left += 1,
                Some(Instr::LoopOpen) => stats.loops += 1,
                Some(Instr::LoopClose) => {}
                Some(Instr::Output) => stats.outputs += 1,
                Some(Instr::Input) => stats.inputs += 1,
                None => stats.comments += 1,
            }
        }
        stats
    }
}
