use crate::file::{Document, FileError, checksum_of, read_document, write_document};
use crate::rule::CompiledRule;
use std::path::Path;

/// A single marker line inserted by a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Name of the rule that produced this insertion
    pub rule: String,
    /// 1-indexed line the marker occupies, relative to that pass's input
    pub line: usize,
}

/// Result of running one rule over a document
#[derive(Debug, Clone)]
pub struct PassOutcome {
    /// Document text after the pass
    pub text: String,
    /// Insertions made by the pass, in document order
    pub insertions: Vec<Insertion>,
}

/// Result of running a full rule sequence over a document
#[derive(Debug, Clone)]
pub struct AnnotateOutcome {
    /// Document text after all passes
    pub text: String,
    /// Insertions from every pass, grouped by pass order
    pub insertions: Vec<Insertion>,
}

impl AnnotateOutcome {
    /// Number of insertions made by the named rule
    pub fn count_for(&self, rule_name: &str) -> usize {
        self.insertions.iter().filter(|i| i.rule == rule_name).count()
    }
}

/// Result of annotating a file on disk
#[derive(Debug, Clone)]
pub struct AnnotatedFile {
    /// Path that was read and overwritten
    pub path: String,
    /// Checksum of the document before transformation
    pub checksum_before: String,
    /// Checksum of the document as written back
    pub checksum_after: String,
    /// Insertions from every pass
    pub insertions: Vec<Insertion>,
}

/// Convert a byte offset to a 1-indexed line number
fn line_of(text: &str, byte_offset: usize) -> usize {
    text.as_bytes()[..byte_offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// Run one rule over the document as a single global substitution pass
///
/// Each match is replaced by the rule's marker, a newline, then the
/// original matched text, in leftmost non-overlapping order. The match
/// span covers only what the pattern consumes; the rest of the header
/// line is untouched.
pub fn apply_rule(text: &str, rule: &CompiledRule) -> PassOutcome {
    let insertions: Vec<Insertion> = rule
        .regex
        .find_iter(text)
        .map(|m| Insertion {
            rule: rule.name.clone(),
            line: line_of(text, m.start()),
        })
        .collect();

    let annotated = rule
        .regex
        .replace_all(text, |caps: &regex::Captures| {
            format!("{}\n{}", rule.marker, &caps[0])
        })
        .into_owned();

    PassOutcome {
        text: annotated,
        insertions,
    }
}

/// Run every rule over the document, each pass on the previous pass's output
///
/// Passes are independent and sequential: with the default rules the enum
/// pattern is evaluated against the document after struct markers have
/// already been inserted, so enum insertion lines reflect the struct-pass
/// output. Deliberately NOT idempotent: a second run stacks a second
/// marker above each header, matching the reference behavior.
pub fn annotate_text(text: &str, rules: &[CompiledRule]) -> AnnotateOutcome {
    let mut current = text.to_string();
    let mut insertions = Vec::new();

    for rule in rules {
        let pass = apply_rule(&current, rule);
        current = pass.text;
        insertions.extend(pass.insertions);
    }

    AnnotateOutcome {
        text: current,
        insertions,
    }
}

/// Annotate a file in place: read, transform, overwrite
///
/// The read handle is released before the transformation runs and the
/// write opens its own handle. A failure before the write leaves the file
/// unmodified; there is no backup and no atomic rename.
///
/// # Returns
/// * `Ok(AnnotatedFile)` - Insertions made plus before/after checksums
/// * `Err(FileError)` - Any read or write failure, propagated as-is
pub fn annotate_file<P: AsRef<Path>>(
    path: P,
    rules: &[CompiledRule],
) -> Result<AnnotatedFile, FileError> {
    let doc: Document = read_document(&path)?;

    let outcome = annotate_text(&doc.text, rules);

    write_document(&path, &outcome.text)?;

    Ok(AnnotatedFile {
        path: doc.path,
        checksum_before: doc.checksum,
        checksum_after: checksum_of(&outcome.text),
        insertions: outcome.insertions,
    })
}
