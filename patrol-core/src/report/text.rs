//! Console text renderer — one line per issue, 1-based positions.

use crate::issue::ScanResult;

/// Render a scan result as console text.
pub fn render(result: &ScanResult) -> String {
    let mut out = String::new();
    for issue in &result.issues {
        out.push_str(&format!(
            "{}:{}:{} [{}] {} {}\n",
            issue.file.display(),
            issue.line + 1,
            issue.column + 1,
            issue.severity,
            issue.rule_id,
            issue.message,
        ));
    }
    out.push_str(&format!(
        "{} issue(s) across {} file(s), {} skipped\n",
        result.issues.len(),
        result.scanned_files,
        result.skipped_files,
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{Category, Issue, Severity};
    use chrono::Utc;

    #[test]
    fn test_text_lines_are_one_based() {
        let result = ScanResult {
            issues: vec![Issue::new(
                "a.js",
                0,
                4,
                Severity::High,
                Category::Security,
                "PAT-SEC-001",
                "Dynamic code execution via eval()",
                "Avoid eval().",
                "eval(",
            )],
            scanned_files: 1,
            skipped_files: 0,
            started_at: Utc::now(),
            duration_ms: 3,
        };
        let text = render(&result);
        assert!(text.starts_with("a.js:1:5 [high] PAT-SEC-001"));
        assert!(text.contains("1 issue(s) across 1 file(s), 0 skipped"));
    }
}
