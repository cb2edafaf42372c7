//! Issue schema — the data model shared by all rule families.
//!
//! An issue is created per rule match and never mutated afterwards. Line
//! and column are 0-based everywhere inside the engine; the `+1` transform
//! happens only in the human-facing renderers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Severity classification for an issue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// All severities, most severe first. Drives report ordering.
    pub fn descending() -> [Severity; 4] {
        [
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low,
        ]
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// Issue categories, one per rule family plus performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Security,
    BestPractice,
    Memory,
    Performance,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Security => "security",
            Category::BestPractice => "best-practice",
            Category::Memory => "memory",
            Category::Performance => "performance",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported finding at a specific file/line/column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// File the issue was found in.
    pub file: PathBuf,
    /// 0-based line index.
    pub line: usize,
    /// 0-based byte column within the line.
    pub column: usize,
    /// Severity classification.
    pub severity: Severity,
    /// Issue category.
    pub category: Category,
    /// Identifier of the rule that produced this issue.
    pub rule_id: String,
    /// Human-readable description of the problem.
    pub message: String,
    /// Fixed advice string attached to the rule.
    pub recommendation: String,
    /// The matched source text, truncated.
    pub snippet: String,
    /// SHA-256 over (file, line, column, rule id) for literal-duplicate removal.
    pub content_hash: String,
}

impl Issue {
    /// Create a new issue with a computed content hash.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        file: impl Into<PathBuf>,
        line: usize,
        column: usize,
        severity: Severity,
        category: Category,
        rule_id: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        let file = file.into();
        let rule_id = rule_id.into();
        let content_hash = compute_content_hash(&file, line, column, &rule_id);
        Self {
            file,
            line,
            column,
            severity,
            category,
            rule_id,
            message: message.into(),
            recommendation: recommendation.into(),
            snippet: snippet.into(),
            content_hash,
        }
    }

    /// Re-stamp the issue with a different file path, recomputing the hash.
    /// Used when serving cached analysis for identical content.
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = file.into();
        self.content_hash = compute_content_hash(&self.file, self.line, self.column, &self.rule_id);
        self
    }
}

fn compute_content_hash(file: &std::path::Path, line: usize, column: usize, rule_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(file.to_string_lossy().as_bytes());
    hasher.update(b"|");
    hasher.update(line.to_le_bytes());
    hasher.update(column.to_le_bytes());
    hasher.update(b"|");
    hasher.update(rule_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Remove literal duplicates (same file, position, and rule), keeping first
/// occurrences. Overlapping matches from *different* rules are all kept.
pub fn dedup_issues(issues: Vec<Issue>) -> Vec<Issue> {
    let mut seen = std::collections::HashSet::new();
    issues
        .into_iter()
        .filter(|issue| seen.insert(issue.content_hash.clone()))
        .collect()
}

/// Aggregate result of one scan invocation (single file or whole workspace).
///
/// Built once per call and returned; nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Issues in deterministic order (file, line, column, rule id).
    pub issues: Vec<Issue>,
    /// Number of files whose text was evaluated.
    pub scanned_files: usize,
    /// Files skipped because they were unreadable or over the size limit.
    pub skipped_files: usize,
    /// When the scan started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the scan.
    pub duration_ms: u64,
}

impl ScanResult {
    /// Sort issues into the canonical deterministic order.
    pub fn sort(&mut self) {
        self.issues.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then(a.line.cmp(&b.line))
                .then(a.column.cmp(&b.column))
                .then(a.rule_id.cmp(&b.rule_id))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue_at(line: usize, column: usize, rule_id: &str) -> Issue {
        Issue::new(
            "src/app.js",
            line,
            column,
            Severity::High,
            Category::Security,
            rule_id,
            "message",
            "advice",
            "snippet",
        )
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn test_dedup_removes_literal_duplicates_only() {
        let issues = vec![
            issue_at(3, 0, "PAT-SEC-001"),
            issue_at(3, 0, "PAT-SEC-001"),
            issue_at(3, 0, "PAT-BP-002"),
        ];
        let unique = dedup_issues(issues);
        assert_eq!(unique.len(), 2, "same rule+position collapses, different rule survives");
    }

    #[test]
    fn test_with_file_recomputes_hash() {
        let issue = issue_at(1, 2, "PAT-SEC-001");
        let original_hash = issue.content_hash.clone();
        let moved = issue.with_file("other/place.js");
        assert_ne!(moved.content_hash, original_hash);
    }

    #[test]
    fn test_result_sort_is_canonical() {
        let mut result = ScanResult {
            issues: vec![issue_at(5, 0, "b"), issue_at(1, 4, "a"), issue_at(1, 0, "a")],
            scanned_files: 1,
            skipped_files: 0,
            started_at: Utc::now(),
            duration_ms: 0,
        };
        result.sort();
        assert_eq!(result.issues[0].line, 1);
        assert_eq!(result.issues[0].column, 0);
        assert_eq!(result.issues[2].line, 5);
    }
}
