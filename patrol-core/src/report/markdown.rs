//! Markdown report renderer.
//!
//! Section headers are fixed: `## Summary`, `## High Impact Issues`,
//! `## Findings by File`, `## General <Family> Recommendations`. Rendering
//! is a pure function of the aggregate, so repeated calls with the same
//! input are byte-identical. Line and column numbers switch to 1-based
//! here, at the human-facing boundary.

use super::{Aggregate, ReportFamily};
use crate::issue::Severity;

/// Render an aggregate as a Markdown document.
pub fn render(aggregate: &Aggregate<'_>, title: &str, family: ReportFamily) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {title}\n\n"));

    // Summary
    md.push_str("## Summary\n\n");
    if aggregate.total == 0 {
        md.push_str("No issues detected.\n\n");
    } else {
        md.push_str("| Severity | Count |\n");
        md.push_str("|----------|-------|\n");
        for severity in Severity::descending() {
            let count = aggregate.count(severity);
            if count > 0 {
                md.push_str(&format!("| {} | {count} |\n", severity_label(severity)));
            }
        }
        md.push_str(&format!("| **Total** | **{}** |\n\n", aggregate.total));
        md.push_str(&format!(
            "Issues found in {} file(s).\n\n",
            aggregate.by_file.len()
        ));
    }

    // High impact
    md.push_str("## High Impact Issues\n\n");
    let high_impact = aggregate.high_impact();
    if high_impact.is_empty() {
        md.push_str("None.\n\n");
    } else {
        for issue in high_impact {
            md.push_str(&format!(
                "- `{}:{}` **{}** {} ({})\n",
                issue.file.display(),
                issue.line + 1,
                severity_label(issue.severity),
                issue.message,
                issue.rule_id,
            ));
        }
        md.push('\n');
    }

    // Per-file findings
    md.push_str("## Findings by File\n\n");
    if aggregate.by_file.is_empty() {
        md.push_str("None.\n\n");
    } else {
        for (file, issues) in &aggregate.by_file {
            md.push_str(&format!("### {}\n\n", file.display()));
            md.push_str("| Line | Severity | Rule | Description |\n");
            md.push_str("|------|----------|------|-------------|\n");
            for issue in issues {
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    issue.line + 1,
                    severity_label(issue.severity),
                    issue.rule_id,
                    issue.message,
                ));
            }
            md.push('\n');
        }
    }

    // Canned advice
    match family {
        ReportFamily::General => md.push_str("## General Recommendations\n\n"),
        _ => md.push_str(&format!("## General {} Recommendations\n\n", family.label())),
    }
    for recommendation in family.recommendations() {
        md.push_str(&format!("- {recommendation}\n"));
    }

    md
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "Critical",
        Severity::High => "High",
        Severity::Medium => "Medium",
        Severity::Low => "Low",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{Category, Issue};

    fn sample_issues() -> Vec<Issue> {
        vec![
            Issue::new(
                "src/app.js",
                0,
                0,
                Severity::High,
                Category::Security,
                "PAT-SEC-001",
                "Dynamic code execution via eval()",
                "Avoid eval().",
                "eval(",
            ),
            Issue::new(
                "src/util.js",
                4,
                2,
                Severity::Low,
                Category::BestPractice,
                "PAT-BP-002",
                "console.log left in code",
                "Remove it.",
                "console.log(",
            ),
        ]
    }

    #[test]
    fn test_fixed_section_headers() {
        let issues = sample_issues();
        let aggregate = Aggregate::from_issues(&issues);
        let report = render(&aggregate, "Patrol Scan Report", ReportFamily::General);

        assert!(report.contains("## Summary"));
        assert!(report.contains("## High Impact Issues"));
        assert!(report.contains("## Findings by File"));
        assert!(report.contains("## General Recommendations"));
    }

    #[test]
    fn test_family_titles_recommendation_section() {
        let issues = sample_issues();
        let aggregate = Aggregate::from_issues(&issues);
        let report = render(&aggregate, "Memory Report", ReportFamily::Memory);
        assert!(report.contains("## General Memory Recommendations"));
    }

    #[test]
    fn test_lines_render_one_based() {
        let issues = sample_issues();
        let aggregate = Aggregate::from_issues(&issues);
        let report = render(&aggregate, "Report", ReportFamily::Security);
        assert!(
            report.contains("`src/app.js:1`"),
            "0-based line 0 renders as line 1"
        );
        assert!(report.contains("| 5 |"), "0-based line 4 renders as line 5");
    }

    #[test]
    fn test_idempotent_rendering() {
        let issues = sample_issues();
        let aggregate = Aggregate::from_issues(&issues);
        let first = render(&aggregate, "Report", ReportFamily::Security);
        let second = render(&aggregate, "Report", ReportFamily::Security);
        assert_eq!(first, second, "same aggregate renders byte-identically");
    }

    #[test]
    fn test_empty_report() {
        let issues = Vec::new();
        let aggregate = Aggregate::from_issues(&issues);
        let report = render(&aggregate, "Report", ReportFamily::General);
        assert!(report.contains("No issues detected."));
        assert!(report.contains("## General Recommendations"));
    }
}
