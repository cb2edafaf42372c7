//! Structured JSON renderer.
//!
//! Positions stay 0-based here; the `+1` transform is reserved for the
//! human-facing renderers.

use crate::error::ReportError;
use crate::issue::{Issue, ScanResult, Severity};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct JsonReport<'a> {
    scanned_files: usize,
    skipped_files: usize,
    duration_ms: u64,
    summary: BTreeMap<&'static str, usize>,
    issues: &'a [Issue],
}

/// Render a scan result as pretty-printed JSON.
pub fn render(result: &ScanResult) -> Result<String, ReportError> {
    let mut summary = BTreeMap::new();
    for severity in Severity::descending() {
        let count = result
            .issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count();
        if count > 0 {
            summary.insert(severity.as_str(), count);
        }
    }
    let report = JsonReport {
        scanned_files: result.scanned_files,
        skipped_files: result.skipped_files,
        duration_ms: result.duration_ms,
        summary,
        issues: &result.issues,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Category;
    use chrono::Utc;

    #[test]
    fn test_json_round_trips_positions_zero_based() {
        let result = ScanResult {
            issues: vec![Issue::new(
                "a.js",
                0,
                4,
                Severity::High,
                Category::Security,
                "PAT-SEC-001",
                "message",
                "advice",
                "eval(",
            )],
            scanned_files: 1,
            skipped_files: 0,
            started_at: Utc::now(),
            duration_ms: 1,
        };
        let text = render(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["issues"][0]["line"], 0);
        assert_eq!(value["summary"]["high"], 1);
        assert_eq!(value["scanned_files"], 1);
    }
}
