//! Rule tables — per-language pattern-to-severity mappings.
//!
//! Rules are hardcoded per family at startup; the scope is "detect a few
//! well-known smells", not a general rule engine. A TOML file can
//! contribute extra regex rules on top of the built-in tables.

pub mod best_practices;
pub mod memory;
pub mod security;

use crate::error::ScanError;
use crate::issue::{Category, Severity};
use crate::language::Language;
use serde::{Deserialize, Serialize};

/// How a rule inspects text.
///
/// Pattern sources are kept as strings and compiled fresh per scan
/// invocation, so no match-position state can ever leak between scans.
#[derive(Debug, Clone)]
pub enum RuleCheck {
    /// Regex evaluated against the full file text.
    Pattern(String),
    /// Regex matches reported only when a counterpart pattern is absent
    /// from the file (acquire-without-release heuristics).
    MissingCounterpart { pattern: String, counterpart: String },
    /// Flag when brace nesting exceeds the given depth.
    MaxNestingDepth(usize),
    /// Flag function bodies longer than the given line count.
    MaxFunctionLines(usize),
}

/// A single named pattern-to-severity mapping.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Stable identifier, e.g. "PAT-SEC-001".
    pub id: String,
    /// Short title.
    pub title: String,
    /// What the match means.
    pub description: String,
    /// Severity attached to every match of this rule.
    pub severity: Severity,
    /// Issue category.
    pub category: Category,
    /// Fixed advice string.
    pub recommendation: String,
    /// Languages the rule applies to. Empty means all languages.
    pub languages: Vec<Language>,
    /// The check itself.
    pub check: RuleCheck,
}

impl Rule {
    /// A rule tagged for language L never fires for language M != L.
    pub fn applies_to(&self, language: Language) -> bool {
        self.languages.is_empty() || self.languages.contains(&language)
    }
}

/// Rule families mirroring the scanner groups the tool grew out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleFamily {
    Security,
    BestPractices,
    Memory,
}

impl RuleFamily {
    pub fn all() -> [RuleFamily; 3] {
        [
            RuleFamily::Security,
            RuleFamily::BestPractices,
            RuleFamily::Memory,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleFamily::Security => "security",
            RuleFamily::BestPractices => "best-practices",
            RuleFamily::Memory => "memory",
        }
    }
}

impl std::fmt::Display for RuleFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RuleFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "security" => Ok(RuleFamily::Security),
            "best-practices" | "best_practices" => Ok(RuleFamily::BestPractices),
            "memory" => Ok(RuleFamily::Memory),
            other => Err(format!("unknown rule family: {other}")),
        }
    }
}

/// The full ordered rule table for a scan.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    /// Catalog with every built-in family.
    pub fn builtin() -> Self {
        Self::with_families(&RuleFamily::all())
    }

    /// Catalog restricted to the given families, in table order.
    pub fn with_families(families: &[RuleFamily]) -> Self {
        let mut rules = Vec::new();
        for family in families {
            match family {
                RuleFamily::Security => rules.extend(security::rules()),
                RuleFamily::BestPractices => rules.extend(best_practices::rules()),
                RuleFamily::Memory => rules.extend(memory::rules()),
            }
        }
        Self { rules }
    }

    /// Catalog from an explicit rule list.
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Append a rule to the table.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// All rules in table order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The ordered subset applicable to a language. Unknown languages yield
    /// an empty list; no issues are found, which is not a failure.
    pub fn rules_for_language(&self, language: Language) -> Vec<&Rule> {
        if language == Language::Unknown {
            return Vec::new();
        }
        self.rules
            .iter()
            .filter(|r| r.applies_to(language))
            .collect()
    }

    /// Parse TOML custom rule definitions and append them to the table.
    ///
    /// Pattern validity is checked at scan time, not here: a rule whose
    /// regex fails to compile is dropped for that scan with a warning, and
    /// the remaining rules still run.
    pub fn extend_from_toml(&mut self, text: &str) -> Result<usize, ScanError> {
        let file: CustomRuleFile =
            toml::from_str(text).map_err(|e| ScanError::RuleFileParse(e.to_string()))?;
        let count = file.rule.len();
        for spec in file.rule {
            self.rules.push(spec.into_rule());
        }
        Ok(count)
    }
}

/// TOML schema for custom rule files.
///
/// ```toml
/// [[rule]]
/// id = "TEAM-001"
/// title = "Internal logger required"
/// description = "Use the team logger instead of console.log."
/// severity = "low"
/// recommendation = "Import log from lib/log."
/// languages = ["javascript", "typescript"]
/// pattern = "console\\.log"
/// ```
#[derive(Debug, Deserialize)]
struct CustomRuleFile {
    #[serde(default)]
    rule: Vec<CustomRuleSpec>,
}

#[derive(Debug, Deserialize)]
struct CustomRuleSpec {
    id: String,
    title: String,
    description: String,
    severity: Severity,
    recommendation: String,
    #[serde(default)]
    languages: Vec<Language>,
    pattern: String,
    #[serde(default = "default_custom_category")]
    category: Category,
}

fn default_custom_category() -> Category {
    Category::BestPractice
}

impl CustomRuleSpec {
    fn into_rule(self) -> Rule {
        Rule {
            id: self.id,
            title: self.title,
            description: self.description,
            severity: self.severity,
            category: self.category,
            recommendation: self.recommendation,
            languages: self.languages,
            check: RuleCheck::Pattern(self.pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_language_yields_empty_rule_set() {
        let catalog = RuleCatalog::builtin();
        assert!(catalog.rules_for_language(Language::Unknown).is_empty());
    }

    #[test]
    fn test_language_subsets_are_disjoint_where_tagged() {
        let catalog = RuleCatalog::builtin();
        let js: Vec<&str> = catalog
            .rules_for_language(Language::JavaScript)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        let py: Vec<&str> = catalog
            .rules_for_language(Language::Python)
            .iter()
            .map(|r| r.id.as_str())
            .collect();

        // Python-only rules never appear in the JavaScript subset and
        // vice versa; the untagged credential rule appears in both.
        assert!(!js.contains(&"PAT-BP-010"));
        assert!(!js.contains(&"PAT-SEC-011"));
        assert!(!py.contains(&"PAT-SEC-001"));
        assert!(js.contains(&"PAT-SEC-040"));
        assert!(py.contains(&"PAT-SEC-040"));
    }

    #[test]
    fn test_extend_from_toml() {
        let mut catalog = RuleCatalog::from_rules(Vec::new());
        let added = catalog
            .extend_from_toml(
                r#"
[[rule]]
id = "TEAM-001"
title = "No console.log"
description = "Use the team logger."
severity = "low"
recommendation = "Import log from lib/log."
languages = ["javascript"]
pattern = "console\\.log"
"#,
            )
            .unwrap();
        assert_eq!(added, 1);
        assert_eq!(catalog.rules().len(), 1);
        assert_eq!(catalog.rules()[0].severity, Severity::Low);
    }

    #[test]
    fn test_extend_from_toml_rejects_bad_file() {
        let mut catalog = RuleCatalog::builtin();
        assert!(catalog.extend_from_toml("not = [valid").is_err());
    }

    #[test]
    fn test_family_selection() {
        let security_only = RuleCatalog::with_families(&[RuleFamily::Security]);
        assert!(
            security_only
                .rules()
                .iter()
                .all(|r| r.category == Category::Security)
        );
    }
}
