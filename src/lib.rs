// File I/O boundary
pub mod file;

// Pattern/marker rules
pub mod rule;

// Annotation engine
pub mod annotate;

// Run report output
pub mod report;

// Re-exports
pub use file::{Document, FileError, checksum_of, is_rust_source, read_document, write_document};
pub use rule::{
    CompiledRule, ENUM_MARKER, ENUM_PATTERN, Rule, RuleError, STRUCT_MARKER, STRUCT_PATTERN,
    compile_rules, default_rules, load_rules,
};
pub use annotate::{
    AnnotateOutcome, AnnotatedFile, Insertion, PassOutcome, annotate_file, annotate_text,
    apply_rule,
};
pub use report::{InsertionJson, RuleCount, RunReport, generate_run_id};
