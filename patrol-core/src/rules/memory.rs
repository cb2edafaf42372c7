//! Built-in memory and performance rules — acquire-without-release
//! heuristics and a few synchronous-I/O smells.
//!
//! The release side is checked at file granularity: a timer cleared in a
//! different file still counts as a leak here. Accepted imprecision.

use super::{Rule, RuleCheck};
use crate::issue::{Category, Severity};
use crate::language::Language;

/// The memory/performance rule table, in evaluation order.
#[allow(clippy::vec_init_then_push)]
pub fn rules() -> Vec<Rule> {
    let mut rules = Vec::new();

    rules.push(Rule {
        id: "PAT-MEM-001".into(),
        title: "setInterval without clearInterval".into(),
        description: "A repeating timer is started but never cleared in this file.".into(),
        severity: Severity::Medium,
        category: Category::Memory,
        recommendation: "Keep the interval id and call clearInterval during cleanup.".into(),
        languages: vec![Language::JavaScript, Language::TypeScript],
        check: RuleCheck::MissingCounterpart {
            pattern: r"\bsetInterval\s*\(".into(),
            counterpart: r"\bclearInterval\s*\(".into(),
        },
    });

    rules.push(Rule {
        id: "PAT-MEM-002".into(),
        title: "Event listener never removed".into(),
        description: "addEventListener has no matching removeEventListener in this file.".into(),
        severity: Severity::Low,
        category: Category::Memory,
        recommendation: "Remove the listener when the owner is torn down.".into(),
        languages: vec![Language::JavaScript, Language::TypeScript],
        check: RuleCheck::MissingCounterpart {
            pattern: r"\baddEventListener\s*\(".into(),
            counterpart: r"\bremoveEventListener\s*\(".into(),
        },
    });

    rules.push(Rule {
        id: "PAT-MEM-003".into(),
        title: "Synchronous filesystem call".into(),
        description: "readFileSync/writeFileSync block the event loop for the whole read.".into(),
        severity: Severity::Low,
        category: Category::Performance,
        recommendation: "Use the async fs API.".into(),
        languages: vec![Language::JavaScript, Language::TypeScript],
        check: RuleCheck::Pattern(r"\b(?:readFileSync|writeFileSync)\s*\(".into()),
    });

    rules.push(Rule {
        id: "PAT-MEM-004".into(),
        title: "Huge array preallocation".into(),
        description: "new Array(n) with a very large n allocates up front.".into(),
        severity: Severity::Medium,
        category: Category::Performance,
        recommendation: "Grow the array lazily or stream the data.".into(),
        languages: vec![Language::JavaScript, Language::TypeScript],
        check: RuleCheck::Pattern(r"new\s+Array\s*\(\s*\d{7,}".into()),
    });

    rules.push(Rule {
        id: "PAT-MEM-010".into(),
        title: "File handle without close".into(),
        description: "open() is called but neither close() nor a with-block appears in this file."
            .into(),
        severity: Severity::Medium,
        category: Category::Memory,
        recommendation: "Use `with open(...) as f:` so the handle closes on every path.".into(),
        languages: vec![Language::Python],
        check: RuleCheck::MissingCounterpart {
            pattern: r"\bopen\s*\(".into(),
            counterpart: r"\.close\s*\(|\bwith\s+open\s*\(".into(),
        },
    });

    rules.push(Rule {
        id: "PAT-MEM-020".into(),
        title: "malloc without free".into(),
        description: "malloc/calloc/realloc appears but free() is absent from this file.".into(),
        severity: Severity::High,
        category: Category::Memory,
        recommendation: "Free the allocation on every exit path, or document the owner.".into(),
        languages: vec![Language::C, Language::Cpp],
        check: RuleCheck::MissingCounterpart {
            pattern: r"\b(?:malloc|calloc|realloc)\s*\(".into(),
            counterpart: r"\bfree\s*\(".into(),
        },
    });

    rules.push(Rule {
        id: "PAT-MEM-021".into(),
        title: "new without delete".into(),
        description: "Raw new appears but delete is absent from this file.".into(),
        severity: Severity::Medium,
        category: Category::Memory,
        recommendation: "Prefer std::unique_ptr or std::vector over raw new.".into(),
        languages: vec![Language::Cpp],
        check: RuleCheck::MissingCounterpart {
            pattern: r"\bnew\s+\w+".into(),
            counterpart: r"\bdelete\b".into(),
        },
    });

    rules.push(Rule {
        id: "PAT-MEM-030".into(),
        title: "Stream opened without close".into(),
        description: "A stream or reader is constructed with no close() and no try-with-resources."
            .into(),
        severity: Severity::Medium,
        category: Category::Memory,
        recommendation: "Wrap the stream in try-with-resources.".into(),
        languages: vec![Language::Java],
        check: RuleCheck::MissingCounterpart {
            pattern: r"new\s+(?:FileInputStream|FileOutputStream|FileReader|FileWriter|BufferedReader|BufferedWriter)\b".into(),
            counterpart: r"\.close\s*\(|try\s*\(".into(),
        },
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
    fn test_categories_are_memory_or_performance() {
        for rule in rules() {
            assert!(
                matches!(rule.category, Category::Memory | Category::Performance),
                "rule {}",
                rule.id
            );
        }
    }
}
