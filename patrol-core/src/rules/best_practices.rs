//! Built-in best-practice rules — style smells, error-handling gaps, and
//! the structural checks (nesting depth, function length).

use super::{Rule, RuleCheck};
use crate::issue::{Category, Severity};
use crate::language::Language;

/// Nesting deeper than this is flagged.
pub const MAX_NESTING_DEPTH: usize = 4;

/// Function bodies longer than this many lines are flagged.
pub const MAX_FUNCTION_LINES: usize = 60;

/// The best-practices rule table, in evaluation order.
#[allow(clippy::vec_init_then_push)]
pub fn rules() -> Vec<Rule> {
    let mut rules = Vec::new();

    rules.push(Rule {
        id: "PAT-BP-001".into(),
        title: "var declaration".into(),
        description: "var is function-scoped and hoisted; block scoping is safer.".into(),
        severity: Severity::Low,
        category: Category::BestPractice,
        recommendation: "Use let or const.".into(),
        languages: vec![Language::JavaScript, Language::TypeScript],
        check: RuleCheck::Pattern(r"(?m)^\s*var\s+".into()),
    });

    rules.push(Rule {
        id: "PAT-BP-002".into(),
        title: "console.log left in code".into(),
        description: "console.log() in committed code is usually leftover debugging.".into(),
        severity: Severity::Low,
        category: Category::BestPractice,
        recommendation: "Remove the call or route it through a logger.".into(),
        languages: vec![Language::JavaScript, Language::TypeScript],
        check: RuleCheck::Pattern(r"console\.log\s*\(".into()),
    });

    rules.push(Rule {
        id: "PAT-BP-003".into(),
        title: "Loose equality".into(),
        description: "== coerces types before comparing.".into(),
        severity: Severity::Low,
        category: Category::BestPractice,
        recommendation: "Use === and !==.".into(),
        languages: vec![Language::JavaScript, Language::TypeScript],
        check: RuleCheck::Pattern(r"[^=!<>]==[^=]".into()),
    });

    rules.push(Rule {
        id: "PAT-BP-004".into(),
        title: "Empty catch block".into(),
        description: "An empty catch swallows the error without handling or logging it.".into(),
        severity: Severity::Medium,
        category: Category::BestPractice,
        recommendation: "Handle the error, log it, or rethrow.".into(),
        languages: vec![Language::JavaScript, Language::TypeScript, Language::Java],
        check: RuleCheck::Pattern(r"catch\s*(?:\([^)]*\)\s*)?\{\s*\}".into()),
    });

    rules.push(Rule {
        id: "PAT-BP-010".into(),
        title: "Mutable default argument".into(),
        description: "A mutable default argument is shared across calls and mutates in place."
            .into(),
        severity: Severity::Medium,
        category: Category::BestPractice,
        recommendation: "Default to None and create the container inside the function.".into(),
        languages: vec![Language::Python],
        check: RuleCheck::Pattern(
            r"def\s+\w+\s*\([^)]*=\s*(?:\[\]|\{\}|list\(\)|dict\(\)|set\(\))".into(),
        ),
    });

    rules.push(Rule {
        id: "PAT-BP-011".into(),
        title: "Bare except clause".into(),
        description: "except: catches everything, including KeyboardInterrupt and SystemExit."
            .into(),
        severity: Severity::Medium,
        category: Category::BestPractice,
        recommendation: "Catch a specific exception type.".into(),
        languages: vec![Language::Python],
        check: RuleCheck::Pattern(r"(?m)^\s*except\s*:".into()),
    });

    rules.push(Rule {
        id: "PAT-BP-012".into(),
        title: "Wildcard import".into(),
        description: "import * obscures where names come from and pollutes the namespace.".into(),
        severity: Severity::Low,
        category: Category::BestPractice,
        recommendation: "Import the names you use explicitly.".into(),
        languages: vec![Language::Python],
        check: RuleCheck::Pattern(r"(?m)^\s*from\s+\S+\s+import\s+\*".into()),
    });

    rules.push(Rule {
        id: "PAT-BP-020".into(),
        title: "printStackTrace usage".into(),
        description: "printStackTrace writes to stderr and bypasses the logging setup.".into(),
        severity: Severity::Low,
        category: Category::BestPractice,
        recommendation: "Log the exception through the application logger.".into(),
        languages: vec![Language::Java],
        check: RuleCheck::Pattern(r"\.printStackTrace\s*\(".into()),
    });

    rules.push(Rule {
        id: "PAT-BP-021".into(),
        title: "System.out/System.err print".into(),
        description: "Direct console printing bypasses the logging setup.".into(),
        severity: Severity::Low,
        category: Category::BestPractice,
        recommendation: "Use the application logger.".into(),
        languages: vec![Language::Java],
        check: RuleCheck::Pattern(r"System\.(?:out|err)\.print".into()),
    });

    // Structural checks; brace-delimited languages only. Python block
    // structure is indentation-based and is not approximated here.
    rules.push(Rule {
        id: "PAT-BP-030".into(),
        title: "Deeply nested code".into(),
        description: "Brace nesting exceeds the configured depth; the logic is hard to follow."
            .into(),
        severity: Severity::Medium,
        category: Category::BestPractice,
        recommendation: "Extract helper functions or use early returns to flatten the logic."
            .into(),
        languages: vec![
            Language::JavaScript,
            Language::TypeScript,
            Language::Java,
            Language::C,
            Language::Cpp,
        ],
        check: RuleCheck::MaxNestingDepth(MAX_NESTING_DEPTH),
    });

    rules.push(Rule {
        id: "PAT-BP-031".into(),
        title: "Long function".into(),
        description: "Function body exceeds the configured length.".into(),
        severity: Severity::Low,
        category: Category::BestPractice,
        recommendation: "Split the function into smaller, named steps.".into(),
        languages: vec![
            Language::JavaScript,
            Language::TypeScript,
            Language::Java,
            Language::C,
            Language::Cpp,
        ],
        check: RuleCheck::MaxFunctionLines(MAX_FUNCTION_LINES),
    });

    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_ids_unique() {
        let table = rules();
        let mut ids: Vec<&str> = table.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), table.len());
    }

    #[test]
    fn test_mutable_default_rule_is_python_medium() {
        let table = rules();
        let rule = table.iter().find(|r| r.id == "PAT-BP-010").unwrap();
        assert_eq!(rule.languages, vec![Language::Python]);
        assert_eq!(rule.severity, Severity::Medium);
    }

    #[test]
    fn test_structural_rules_skip_python() {
        let table = rules();
        for rule in table {
            if matches!(
                rule.check,
                RuleCheck::MaxNestingDepth(_) | RuleCheck::MaxFunctionLines(_)
            ) {
                assert!(
                    !rule.languages.contains(&Language::Python),
                    "structural rule {} must not apply to python",
                    rule.id
                );
            }
        }
    }
}
