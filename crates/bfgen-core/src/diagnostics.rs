use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;

use crate::tape::{CellWidth, RunError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticCode {
    BFG0101CharExceedsCell,
    BFG0201VerifyMismatch,
    BFG0202VerifyRunFailed,
}

impl DiagnosticCode {
    pub fn code_str(self) -> &'static str {
        match self {
            DiagnosticCode::BFG0101CharExceedsCell => "BFG0101",
            DiagnosticCode::BFG0201VerifyMismatch => "BFG0201",
            DiagnosticCode::BFG0202VerifyRunFailed => "BFG0202",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            DiagnosticCode::BFG0101CharExceedsCell => Severity::Warning,
            DiagnosticCode::BFG0201VerifyMismatch | DiagnosticCode::BFG0202VerifyRunFailed => {
                Severity::Error
            }
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            DiagnosticCode::BFG0101CharExceedsCell => "character code does not fit in a tape cell",
            DiagnosticCode::BFG0201VerifyMismatch => "generated script does not print the input",
            DiagnosticCode::BFG0202VerifyRunFailed => "generated script failed to run",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, Value>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: String) -> Self {
        Diagnostic {
            code: code.code_str().to_string(),
            severity: code.severity(),
            message,
            data: BTreeMap::new(),
        }
    }

    pub fn with_data(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Turns a failed verification into a diagnostic.
    pub fn from_verify_error(err: &RunError, cell: CellWidth) -> Self {
        let code = match err {
            RunError::OutputMismatch { .. } => DiagnosticCode::BFG0201VerifyMismatch,
            _ => DiagnosticCode::BFG0202VerifyRunFailed,
        };
        let d = Diagnostic::new(code, format!("{}: {err}", code.default_message()))
            .with_data("cell_bits", cell.bits());
        match err {
            RunError::OutputMismatch { index, .. } => d.with_data("index", *index),
            _ => d,
        }
    }
}

/// One warning per distinct character whose code exceeds `cell`, in order
/// of first appearance. Only meaningful when `input` is encoded by code
/// point; `encode` works on UTF-8 bytes, which always fit.
pub fn cell_width_diagnostics(input: &str, cell: CellWidth) -> Vec<Diagnostic> {
    let max = cell.max_value();
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for (index, ch) in input.chars().enumerate() {
        let code = u32::from(ch);
        if code <= max || !seen.insert(code) {
            continue;
        }
        let msg = format!(
            "{}: {ch:?} (U+{code:04X}) at char {index} exceeds the {}-bit cell maximum {max}",
            DiagnosticCode::BFG0101CharExceedsCell.default_message(),
            cell.bits()
        );
        out.push(
            Diagnostic::new(DiagnosticCode::BFG0101CharExceedsCell, msg)
                .with_data("char_index", index)
                .with_data("code", code)
                .with_data("cell_bits", cell.bits()),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_range_input_is_clean() {
        let all: String = (0u8..=255).map(char::from).collect();
        assert!(cell_width_diagnostics(&all, CellWidth::U8).is_empty());
    }

    #[test]
    fn wide_chars_warn_once_each() {
        let diags = cell_width_diagnostics("a\u{100}b\u{100}\u{263A}", CellWidth::U8);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].code, "BFG0101");
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].data.get("char_index"), Some(&Value::from(1)));
        assert_eq!(diags[0].data.get("code"), Some(&Value::from(256)));
        assert_eq!(diags[1].data.get("char_index"), Some(&Value::from(4)));
        assert!(diags[1].message.contains("U+263A"), "{}", diags[1].message);

        assert!(cell_width_diagnostics("a\u{100}b", CellWidth::U16).is_empty());
    }

    #[test]
    fn verify_errors_map_to_codes() {
        let mismatch = RunError::OutputMismatch {
            index: 3,
            expected: Some(1),
            actual: Some(2),
        };
        let d = Diagnostic::from_verify_error(&mismatch, CellWidth::U8);
        assert_eq!(d.code, "BFG0201");
        assert!(d.is_error());
        assert_eq!(d.data.get("index"), Some(&Value::from(3)));

        let d = Diagnostic::from_verify_error(&RunError::TapeUnderflow { step: 1 }, CellWidth::U8);
        assert_eq!(d.code, "BFG0202");
        assert!(!d.data.contains_key("index"));
    }

    #[test]
    fn serializes_lowercase_severity_and_skips_empty_data() {
        let d = Diagnostic::new(DiagnosticCode::BFG0201VerifyMismatch, "m".to_string());
        let v = serde_json::to_value(&d).expect("serialize diagnostic");
        assert_eq!(v["severity"], "error");
        assert!(v.get("data").is_none());
    }
}
