use crate::annotate::AnnotatedFile;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One inserted marker, as it appears in the JSON report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsertionJson {
    /// Name of the rule that fired
    pub rule: String,
    /// 1-indexed line of the marker, relative to its pass's input
    pub line: usize,
}

/// Per-rule insertion count
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleCount {
    pub rule: String,
    pub count: usize,
}

/// Structured result of one annotation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Identifier for this run
    pub run_id: String,
    /// Whether the run completed and the file was written
    pub success: bool,
    /// Path that was updated (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Total markers inserted
    pub inserted_count: usize,
    /// Insertions broken down by rule
    pub rule_counts: Vec<RuleCount>,
    /// Every insertion in pass order
    pub insertions: Vec<InsertionJson>,
    /// Checksum of the document before transformation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum_before: Option<String>,
    /// Checksum of the document as written back
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum_after: Option<String>,
    /// Error description (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunReport {
    /// Build a success report from an annotated file
    pub fn success(run_id: String, annotated: &AnnotatedFile) -> Self {
        let insertions: Vec<InsertionJson> = annotated
            .insertions
            .iter()
            .map(|i| InsertionJson {
                rule: i.rule.clone(),
                line: i.line,
            })
            .collect();

        // One entry per distinct rule, in first-seen (pass) order
        let mut rule_counts: Vec<RuleCount> = Vec::new();
        for insertion in &insertions {
            match rule_counts.iter_mut().find(|c| c.rule == insertion.rule) {
                Some(entry) => entry.count += 1,
                None => rule_counts.push(RuleCount {
                    rule: insertion.rule.clone(),
                    count: 1,
                }),
            }
        }

        RunReport {
            run_id,
            success: true,
            path: Some(annotated.path.clone()),
            inserted_count: insertions.len(),
            rule_counts,
            insertions,
            checksum_before: Some(annotated.checksum_before.clone()),
            checksum_after: Some(annotated.checksum_after.clone()),
            error: None,
        }
    }

    /// Build a failure report carrying the error text
    pub fn failure(run_id: String, error: String) -> Self {
        RunReport {
            run_id,
            success: false,
            path: None,
            inserted_count: 0,
            rule_counts: Vec::new(),
            insertions: Vec::new(),
            checksum_before: None,
            checksum_after: None,
            error: Some(error),
        }
    }
}

/// Generate a fresh run identifier
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::Insertion;

    fn sample_annotated() -> AnnotatedFile {
        AnnotatedFile {
            path: "/tmp/model.rs".to_string(),
            checksum_before: "aaaa".to_string(),
            checksum_after: "bbbb".to_string(),
            insertions: vec![
                Insertion {
                    rule: "struct".to_string(),
                    line: 1,
                },
                Insertion {
                    rule: "struct".to_string(),
                    line: 7,
                },
                Insertion {
                    rule: "enum".to_string(),
                    line: 12,
                },
            ],
        }
    }

    #[test]
    fn test_success_report_counts() {
        let report = RunReport::success("run-1".to_string(), &sample_annotated());

        assert!(report.success);
        assert_eq!(report.path.as_deref(), Some("/tmp/model.rs"));
        assert_eq!(report.inserted_count, 3);
        assert_eq!(report.rule_counts.len(), 2);
        assert_eq!(report.rule_counts[0].rule, "struct");
        assert_eq!(report.rule_counts[0].count, 2);
        assert_eq!(report.rule_counts[1].rule, "enum");
        assert_eq!(report.rule_counts[1].count, 1);
        assert!(report.error.is_none());
    }

    #[test]
    fn test_failure_report() {
        let report = RunReport::failure("run-2".to_string(), "File not found: x.rs".to_string());

        assert!(!report.success);
        assert!(report.path.is_none());
        assert_eq!(report.inserted_count, 0);
        assert_eq!(report.error.as_deref(), Some("File not found: x.rs"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = RunReport::success("run-3".to_string(), &sample_annotated());
        let json = serde_json::to_string(&report).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["run_id"], "run-3");
        assert_eq!(value["success"], true);
        assert_eq!(value["inserted_count"], 3);
        assert_eq!(value["insertions"][2]["rule"], "enum");
        assert_eq!(value["insertions"][2]["line"], 12);
        // Absent fields are omitted, not null
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_generate_run_id_unique() {
        let a = generate_run_id();
        let b = generate_run_id();

        assert!(!a.is_empty());
        assert_ne!(a, b);
    }
}
