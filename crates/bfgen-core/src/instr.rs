use serde::{Deserialize, Serialize};

/// One Brainfuck instruction. Any other character in a script is a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instr {
    Inc,
    Dec,
    Right,
    Left,
    LoopOpen,
    LoopClose,
    Output,
    Input,
}

impl Instr {
    pub const ALL: [Instr; 8] = [
        Instr::Inc,
        Instr::Dec,
        Instr::Right,
        Instr::Left,
        Instr::LoopOpen,
        Instr::LoopClose,
        Instr::Output,
        Instr::Input,
    ];

    pub fn as_char(self) -> char {
        match self {
            Instr::Inc => '+',
            Instr::Dec => '-',
            Instr::Right => '>',
            Instr::Left => '<',
            Instr::LoopOpen => '[',
            Instr::LoopClose => ']',
            Instr::Output => '.',
            Instr::Input => ',',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Instr::Inc),
            '-' => Some(Instr::Dec),
            '>' => Some(Instr::Right),
            '<' => Some(Instr::Left),
            '[' => Some(Instr::LoopOpen),
            ']' => Some(Instr::LoopClose),
            '.' => Some(Instr::Output),
            ',' => Some(Instr::Input),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_are_distinct_and_invertible() {
        let mut seen = std::collections::BTreeSet::new();
        for &i in &Instr::ALL {
            assert!(seen.insert(i.as_char()), "duplicate char for {i:?}");
            assert_eq!(Instr::from_char(i.as_char()), Some(i));
        }
    }

    #[test]
    fn other_chars_are_comments() {
        for c in ['a', ' ', '\n', '#', '0', '!'] {
            assert_eq!(Instr::from_char(c), None);
        }
    }
}
