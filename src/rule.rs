use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default pattern for a top-level struct header line
pub const STRUCT_PATTERN: &str = r"(?m)^\s*(pub\s+)?struct\s+\w+";

/// Default pattern for a top-level enum header line
pub const ENUM_PATTERN: &str = r"(?m)^\s*(pub\s+)?enum\s+\w+";

/// Default marker inserted above struct headers
pub const STRUCT_MARKER: &str = "#[derive(derive_setters::Setters, Clone)]";

/// Default marker inserted above enum headers
pub const ENUM_MARKER: &str = "#[derive(Clone)]";

/// A pattern/marker pair as it appears in a rules file
///
/// `pattern` is a regular expression matched against the whole document in
/// multi-line mode; `marker` is the line inserted above each match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Short name used in reports (e.g. "struct", "enum")
    pub name: String,
    /// Regular expression for the header line
    pub pattern: String,
    /// Line to insert above each match (without trailing newline)
    pub marker: String,
}

/// A rule whose pattern has been compiled
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub regex: Regex,
    pub marker: String,
}

/// Error types for rule loading and compilation
#[derive(Debug)]
pub enum RuleError {
    /// Regular expression failed to compile
    BadPattern { name: String, error: String },
    /// Rules file could not be read
    Io(String),
    /// Rules file is not valid JSON of the expected shape
    Parse(String),
}

impl std::fmt::Display for RuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleError::BadPattern { name, error } => {
                write!(f, "Invalid pattern for rule '{}': {}", name, error)
            }
            RuleError::Io(e) => write!(f, "Failed to read rules file: {}", e),
            RuleError::Parse(e) => write!(f, "Failed to parse rules file: {}", e),
        }
    }
}

impl std::error::Error for RuleError {}

impl Rule {
    /// Compile this rule's pattern
    pub fn compile(&self) -> Result<CompiledRule, RuleError> {
        let regex = Regex::new(&self.pattern).map_err(|e| RuleError::BadPattern {
            name: self.name.clone(),
            error: e.to_string(),
        })?;

        Ok(CompiledRule {
            name: self.name.clone(),
            regex,
            marker: self.marker.clone(),
        })
    }
}

/// The built-in rule pair: struct pass first, then enum pass
///
/// These are the reference pattern/marker pairs. Order matters: the enum
/// pass runs on the output of the struct pass.
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule {
            name: "struct".to_string(),
            pattern: STRUCT_PATTERN.to_string(),
            marker: STRUCT_MARKER.to_string(),
        },
        Rule {
            name: "enum".to_string(),
            pattern: ENUM_PATTERN.to_string(),
            marker: ENUM_MARKER.to_string(),
        },
    ]
}

/// Compile a list of rules, failing on the first bad pattern
pub fn compile_rules(rules: &[Rule]) -> Result<Vec<CompiledRule>, RuleError> {
    rules.iter().map(|r| r.compile()).collect()
}

/// Load rules from a JSON file
///
/// The file holds a JSON array of `{"name", "pattern", "marker"}` objects,
/// applied as independent passes in array order.
pub fn load_rules<P: AsRef<Path>>(path: P) -> Result<Vec<Rule>, RuleError> {
    let json_str = fs::read_to_string(path.as_ref()).map_err(|e| RuleError::Io(e.to_string()))?;

    let rules: Vec<Rule> =
        serde_json::from_str(&json_str).map_err(|e| RuleError::Parse(e.to_string()))?;

    Ok(rules)
}
