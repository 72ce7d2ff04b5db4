//! Version-pinned identifiers that appear in machine-readable output.

pub const BFGEN_REPORT_SCHEMA_VERSION: &str = "bfgen.report@0.1.0";
