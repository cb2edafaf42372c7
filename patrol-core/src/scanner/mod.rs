//! Line/text scanner — applies a compiled rule set to file text.
//!
//! Pattern sources are compiled at the start of each scan invocation, so
//! no matcher state survives between scans. A rule whose pattern fails to
//! compile is dropped with a warning; the remaining rules still run, and
//! the scan never aborts for one bad rule.
//!
//! Matches inside string and comment literals are not filtered out for
//! regex rules; false positives there are an accepted limitation.

pub mod batch;
pub mod structure;

use crate::issue::{Issue, dedup_issues};
use crate::language::Language;
use crate::rules::{Rule, RuleCheck};
use regex::Regex;
use std::path::Path;

/// One position-free hit produced by the raw scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMatch {
    /// Index into the compiled rule slice.
    pub rule_index: usize,
    /// Byte offset of the match in the text.
    pub offset: usize,
    /// Byte length of the matched region.
    pub len: usize,
}

/// A rule with its pattern compiled for this scan invocation.
pub struct CompiledRule<'a> {
    pub rule: &'a Rule,
    check: CompiledCheck,
}

enum CompiledCheck {
    Pattern(Regex),
    MissingCounterpart { pattern: Regex, counterpart: Regex },
    MaxNestingDepth(usize),
    MaxFunctionLines { max_lines: usize, header: Option<Regex> },
}

/// Compile the applicable rules for one scan invocation. Invalid patterns
/// are dropped with a warning.
pub fn compile_rules<'a>(rules: &[&'a Rule], language: Language) -> Vec<CompiledRule<'a>> {
    let mut compiled = Vec::with_capacity(rules.len());
    for rule in rules {
        match compile_check(&rule.check, language) {
            Ok(check) => compiled.push(CompiledRule { rule, check }),
            Err(message) => {
                tracing::warn!(rule = %rule.id, %message, "dropping rule with invalid pattern");
            }
        }
    }
    compiled
}

fn compile_check(check: &RuleCheck, language: Language) -> Result<CompiledCheck, String> {
    match check {
        RuleCheck::Pattern(source) => Ok(CompiledCheck::Pattern(
            Regex::new(source).map_err(|e| e.to_string())?,
        )),
        RuleCheck::MissingCounterpart {
            pattern,
            counterpart,
        } => Ok(CompiledCheck::MissingCounterpart {
            pattern: Regex::new(pattern).map_err(|e| e.to_string())?,
            counterpart: Regex::new(counterpart).map_err(|e| e.to_string())?,
        }),
        RuleCheck::MaxNestingDepth(depth) => Ok(CompiledCheck::MaxNestingDepth(*depth)),
        RuleCheck::MaxFunctionLines(max_lines) => {
            let header = match function_header_pattern(language) {
                Some(source) => Some(Regex::new(source).map_err(|e| e.to_string())?),
                None => None,
            };
            Ok(CompiledCheck::MaxFunctionLines {
                max_lines: *max_lines,
                header,
            })
        }
    }
}

/// Header pattern used to locate function bodies for the length check.
/// Approximate by design; arrow functions and lambdas are not tracked.
fn function_header_pattern(language: Language) -> Option<&'static str> {
    match language {
        Language::JavaScript | Language::TypeScript => {
            Some(r"(?m)^[ \t]*(?:export[ \t]+)?(?:async[ \t]+)?function[ \t]+\w+[ \t]*\(")
        }
        Language::Java => Some(
            r"(?m)^[ \t]*(?:(?:public|private|protected|static|final|synchronized)[ \t]+)+[\w<>\[\], \t]+\b\w+[ \t]*\(",
        ),
        Language::C | Language::Cpp => Some(r"(?m)^[A-Za-z_][\w \t*&:<>,]*[ \t*]\w+[ \t]*\("),
        _ => None,
    }
}

/// Evaluate every compiled rule against the full text, yielding hits in
/// rule-table order, then text order. Overlapping hits from different
/// rules are all reported independently.
pub fn scan_text(text: &str, compiled: &[CompiledRule<'_>]) -> Vec<RawMatch> {
    let mut matches = Vec::new();
    for (rule_index, compiled_rule) in compiled.iter().enumerate() {
        match &compiled_rule.check {
            CompiledCheck::Pattern(regex) => {
                for m in regex.find_iter(text) {
                    matches.push(RawMatch {
                        rule_index,
                        offset: m.start(),
                        len: m.len(),
                    });
                }
            }
            CompiledCheck::MissingCounterpart {
                pattern,
                counterpart,
            } => {
                if !counterpart.is_match(text) {
                    for m in pattern.find_iter(text) {
                        matches.push(RawMatch {
                            rule_index,
                            offset: m.start(),
                            len: m.len(),
                        });
                    }
                }
            }
            CompiledCheck::MaxNestingDepth(max_depth) => {
                let scan = structure::max_nesting_depth(text);
                if scan.max_depth > *max_depth {
                    matches.push(RawMatch {
                        rule_index,
                        offset: scan.max_depth_offset,
                        len: 1,
                    });
                }
            }
            CompiledCheck::MaxFunctionLines { max_lines, header } => {
                if let Some(header) = header {
                    for span in structure::function_spans(text, header) {
                        if span.line_count > *max_lines {
                            matches.push(RawMatch {
                                rule_index,
                                offset: span.header_offset,
                                len: span.header_len,
                            });
                        }
                    }
                }
            }
        }
    }
    matches
}

/// Byte-offset to 0-based (line, column) mapping for one text.
pub struct LineIndex {
    line_starts: Vec<usize>,
    text_len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            text_len: text.len(),
        }
    }

    /// Map a byte offset to a 0-based (line, column) pair. Offsets past
    /// the end of the text clamp to the last position.
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text_len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insertion) => insertion - 1,
        };
        (line, offset - self.line_starts[line])
    }
}

/// Run a rule set against one file's text and build issues.
///
/// Literal duplicates (same rule, same position) are removed; overlapping
/// matches from different rules are kept.
pub fn run_rules(text: &str, path: &Path, language: Language, rules: &[&Rule]) -> Vec<Issue> {
    let compiled = compile_rules(rules, language);
    let raw = scan_text(text, &compiled);
    let index = LineIndex::new(text);

    let mut issues = Vec::with_capacity(raw.len());
    for m in raw {
        let (line, column) = index.position(m.offset);
        let rule = compiled[m.rule_index].rule;
        let snippet = text
            .get(m.offset..m.offset + m.len)
            .map(|s| truncate(s, 120))
            .unwrap_or_default();
        issues.push(Issue::new(
            path,
            line,
            column,
            rule.severity,
            rule.category,
            &rule.id,
            &rule.description,
            &rule.recommendation,
            snippet,
        ));
    }
    dedup_issues(issues)
}

/// Truncate to a character count, appending "..." when shortened.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{Category, Severity};
    use crate::rules::RuleCatalog;

    fn pattern_rule(id: &str, pattern: &str) -> Rule {
        Rule {
            id: id.into(),
            title: id.into(),
            description: format!("{id} matched"),
            severity: Severity::Medium,
            category: Category::BestPractice,
            recommendation: "fix it".into(),
            languages: Vec::new(),
            check: RuleCheck::Pattern(pattern.into()),
        }
    }

    #[test]
    fn test_line_index_positions() {
        let index = LineIndex::new("ab\ncde\nf");
        assert_eq!(index.position(0), (0, 0));
        assert_eq!(index.position(1), (0, 1));
        assert_eq!(index.position(3), (1, 0));
        assert_eq!(index.position(5), (1, 2));
        assert_eq!(index.position(7), (2, 0));
    }

    #[test]
    fn test_scan_text_reports_all_rule_hits() {
        let a = pattern_rule("A", r"foo");
        let b = pattern_rule("B", r"foo\(");
        let rules = vec![&a, &b];
        let compiled = compile_rules(&rules, Language::JavaScript);
        let matches = scan_text("foo();\nfoo\n", &compiled);
        // Rule A hits twice, rule B once; overlaps are all kept.
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn test_invalid_pattern_dropped_others_run() {
        let bad = pattern_rule("BAD", r"([unclosed");
        let good = pattern_rule("GOOD", r"foo");
        let rules = vec![&bad, &good];
        let compiled = compile_rules(&rules, Language::JavaScript);
        assert_eq!(compiled.len(), 1);
        let issues = run_rules("foo\n", Path::new("a.js"), Language::JavaScript, &rules);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule_id, "GOOD");
    }

    #[test]
    fn test_missing_counterpart_suppressed_when_present() {
        let catalog = RuleCatalog::builtin();
        let rules = catalog.rules_for_language(Language::JavaScript);

        let leaky = "setInterval(tick, 100);\n";
        let issues = run_rules(leaky, Path::new("a.js"), Language::JavaScript, &rules);
        assert!(issues.iter().any(|i| i.rule_id == "PAT-MEM-001"));

        let cleaned = "const id = setInterval(tick, 100);\nclearInterval(id);\n";
        let issues = run_rules(cleaned, Path::new("a.js"), Language::JavaScript, &rules);
        assert!(!issues.iter().any(|i| i.rule_id == "PAT-MEM-001"));
    }

    #[test]
    fn test_nesting_rule_fires_past_threshold() {
        let catalog = RuleCatalog::builtin();
        let rules = catalog.rules_for_language(Language::JavaScript);
        // Depth 5 exceeds the default threshold of 4.
        let text = "function f() { if (a) { if (b) { if (c) { if (d) { g(); } } } } }\n";
        let issues = run_rules(text, Path::new("deep.js"), Language::JavaScript, &rules);
        assert!(issues.iter().any(|i| i.rule_id == "PAT-BP-030"));
    }

    #[test]
    fn test_positions_are_zero_based() {
        let rule = pattern_rule("A", r"needle");
        let rules = vec![&rule];
        let issues = run_rules(
            "first line\nsecond needle\n",
            Path::new("a.js"),
            Language::JavaScript,
            &rules,
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 1);
        assert_eq!(issues[0].column, 7);
    }

    #[test]
    fn test_snippet_truncation() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 4), "abcd...");
    }
}
