//! Report pipeline — one aggregation step and three renderers (text,
//! Markdown, JSON) shared by every rule family.

pub mod json;
pub mod markdown;
pub mod text;

use crate::error::ReportError;
use crate::issue::{Issue, Severity};
use crate::rules::RuleFamily;
use std::collections::BTreeMap;
use std::path::Path;

/// Issues grouped for reporting. Maps are ordered so rendering is
/// deterministic regardless of how the issues were produced.
pub struct Aggregate<'a> {
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_file: BTreeMap<&'a Path, Vec<&'a Issue>>,
    pub total: usize,
}

impl<'a> Aggregate<'a> {
    pub fn from_issues(issues: &'a [Issue]) -> Self {
        let mut by_severity = BTreeMap::new();
        let mut by_file: BTreeMap<&Path, Vec<&Issue>> = BTreeMap::new();
        for issue in issues {
            *by_severity.entry(issue.severity).or_insert(0) += 1;
            by_file.entry(issue.file.as_path()).or_default().push(issue);
        }
        Self {
            by_severity,
            by_file,
            total: issues.len(),
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }

    /// Critical and high issues, in file order.
    pub fn high_impact(&self) -> Vec<&'a Issue> {
        self.by_file
            .values()
            .flatten()
            .copied()
            .filter(|issue| issue.severity >= Severity::High)
            .collect()
    }
}

/// Which family a rendered report speaks for. Drives the title of the
/// general-recommendations section and its canned advice bullets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFamily {
    Security,
    BestPractices,
    Memory,
    General,
}

impl ReportFamily {
    pub fn label(&self) -> &'static str {
        match self {
            ReportFamily::Security => "Security",
            ReportFamily::BestPractices => "Best Practices",
            ReportFamily::Memory => "Memory",
            ReportFamily::General => "General",
        }
    }

    /// Fixed advice shown at the end of a report regardless of findings.
    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            ReportFamily::Security => &[
                "Treat all external input as untrusted; validate at the boundary.",
                "Prefer parameterized APIs over string composition for queries and commands.",
                "Keep secrets in environment variables or a secrets manager, never in source.",
            ],
            ReportFamily::BestPractices => &[
                "Keep functions short and flat; extract helpers when nesting grows.",
                "Handle or propagate every error; never swallow exceptions silently.",
                "Remove debugging output before committing.",
            ],
            ReportFamily::Memory => &[
                "Pair every acquisition with a release on all exit paths.",
                "Clear timers and listeners when their owner is torn down.",
                "Avoid large up-front allocations; stream or grow lazily instead.",
            ],
            ReportFamily::General => &[
                "Review high-severity findings first; lower severities are advisory.",
                "Suppressed or skipped files reduce coverage; check the scan log.",
            ],
        }
    }
}

impl From<RuleFamily> for ReportFamily {
    fn from(family: RuleFamily) -> Self {
        match family {
            RuleFamily::Security => ReportFamily::Security,
            RuleFamily::BestPractices => ReportFamily::BestPractices,
            RuleFamily::Memory => ReportFamily::Memory,
        }
    }
}

/// Write rendered report contents to a file. Failures here never disturb
/// the in-memory issues the report was rendered from.
pub fn write_report(path: &Path, contents: &str) -> Result<(), ReportError> {
    std::fs::write(path, contents).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Category;

    fn issue(file: &str, line: usize, severity: Severity) -> Issue {
        Issue::new(
            file,
            line,
            0,
            severity,
            Category::Security,
            "PAT-TEST",
            "message",
            "advice",
            "snippet",
        )
    }

    #[test]
    fn test_aggregate_counts() {
        let issues = vec![
            issue("a.js", 0, Severity::High),
            issue("a.js", 3, Severity::Low),
            issue("b.js", 1, Severity::High),
        ];
        let aggregate = Aggregate::from_issues(&issues);
        assert_eq!(aggregate.total, 3);
        assert_eq!(aggregate.count(Severity::High), 2);
        assert_eq!(aggregate.count(Severity::Critical), 0);
        assert_eq!(aggregate.by_file.len(), 2);
        assert_eq!(aggregate.high_impact().len(), 2);
    }

    #[test]
    fn test_write_report_failure_keeps_issues() {
        let issues = vec![issue("a.js", 0, Severity::High)];
        let err = write_report(Path::new("/nonexistent/dir/report.md"), "contents");
        assert!(err.is_err());
        assert_eq!(issues.len(), 1);
    }
}
