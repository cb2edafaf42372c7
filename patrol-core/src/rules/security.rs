//! Built-in security rules — injection shapes, dynamic code execution,
//! unsafe deserialization, hardcoded credentials.

use super::{Rule, RuleCheck};
use crate::issue::{Category, Severity};
use crate::language::Language;

/// The security rule table, in evaluation order.
#[allow(clippy::vec_init_then_push)]
pub fn rules() -> Vec<Rule> {
    let mut rules = Vec::new();

    // Dynamic code execution
    rules.push(Rule {
        id: "PAT-SEC-001".into(),
        title: "Use of eval".into(),
        description: "Dynamic code execution via eval() runs arbitrary strings as code.".into(),
        severity: Severity::High,
        category: Category::Security,
        recommendation: "Avoid eval(). Use JSON.parse() for data and explicit dispatch for logic."
            .into(),
        languages: vec![Language::JavaScript, Language::TypeScript],
        check: RuleCheck::Pattern(r"\beval\s*\(".into()),
    });

    rules.push(Rule {
        id: "PAT-SEC-002".into(),
        title: "Function constructor".into(),
        description: "new Function() compiles strings to code, equivalent to eval.".into(),
        severity: Severity::High,
        category: Category::Security,
        recommendation: "Replace the Function constructor with a statically defined function."
            .into(),
        languages: vec![Language::JavaScript, Language::TypeScript],
        check: RuleCheck::Pattern(r"new\s+Function\s*\(".into()),
    });

    // DOM injection
    rules.push(Rule {
        id: "PAT-SEC-003".into(),
        title: "document.write usage".into(),
        description: "document.write() with dynamic content enables markup injection.".into(),
        severity: Severity::Medium,
        category: Category::Security,
        recommendation: "Build DOM nodes explicitly or assign textContent instead.".into(),
        languages: vec![Language::JavaScript, Language::TypeScript],
        check: RuleCheck::Pattern(r"document\.write(?:ln)?\s*\(".into()),
    });

    rules.push(Rule {
        id: "PAT-SEC-004".into(),
        title: "innerHTML assignment".into(),
        description: "Assigning to innerHTML renders unsanitized markup.".into(),
        severity: Severity::Medium,
        category: Category::Security,
        recommendation: "Use textContent, or sanitize the markup before assignment.".into(),
        languages: vec![Language::JavaScript, Language::TypeScript],
        check: RuleCheck::Pattern(r"\.(?:innerHTML|outerHTML)\s*=".into()),
    });

    // Command injection
    rules.push(Rule {
        id: "PAT-SEC-005".into(),
        title: "Shell command built from concatenation".into(),
        description: "Shell command assembled with string concatenation invites command injection."
            .into(),
        severity: Severity::High,
        category: Category::Security,
        recommendation: "Pass an argument array to the process API instead of a composed string."
            .into(),
        languages: vec![Language::JavaScript, Language::TypeScript],
        check: RuleCheck::Pattern(r"\b(?:exec|execSync)\s*\([^)]*\+".into()),
    });

    // SQL injection shapes
    rules.push(Rule {
        id: "PAT-SEC-006".into(),
        title: "SQL query built from string concatenation".into(),
        description: "SQL statement composed with + or template interpolation is injectable."
            .into(),
        severity: Severity::Critical,
        category: Category::Security,
        recommendation: "Use parameterized queries or prepared statements.".into(),
        languages: vec![Language::JavaScript, Language::TypeScript],
        check: RuleCheck::Pattern(
            r#"(?i)(?:query|execute)\s*\(\s*[`"'](?:SELECT|INSERT|UPDATE|DELETE|DROP)\b[^)]*(?:\+|\$\{)"#.into(),
        ),
    });

    rules.push(Rule {
        id: "PAT-SEC-010".into(),
        title: "Use of eval/exec".into(),
        description: "eval() and exec() execute arbitrary strings as Python code.".into(),
        severity: Severity::High,
        category: Category::Security,
        recommendation: "Use ast.literal_eval for data, or restructure to avoid dynamic code."
            .into(),
        languages: vec![Language::Python],
        check: RuleCheck::Pattern(r"\b(?:eval|exec)\s*\(".into()),
    });

    rules.push(Rule {
        id: "PAT-SEC-011".into(),
        title: "SQL query built with string formatting".into(),
        description: "execute() with an f-string, %, or .format() query is injectable.".into(),
        severity: Severity::Critical,
        category: Category::Security,
        recommendation: "Pass parameters separately: cursor.execute(sql, params).".into(),
        languages: vec![Language::Python],
        check: RuleCheck::Pattern(
            r#"(?i)(?:execute|executemany)\s*\(\s*(?:f["']|["'][^"']*["']\s*%|["'][^"']*["']\s*\.format\()"#.into(),
        ),
    });

    rules.push(Rule {
        id: "PAT-SEC-012".into(),
        title: "subprocess with shell=True".into(),
        description: "shell=True routes the command line through the shell, enabling injection."
            .into(),
        severity: Severity::High,
        category: Category::Security,
        recommendation: "Pass a list of arguments and drop shell=True.".into(),
        languages: vec![Language::Python],
        check: RuleCheck::Pattern(r"shell\s*=\s*True".into()),
    });

    rules.push(Rule {
        id: "PAT-SEC-013".into(),
        title: "Unsafe pickle deserialization".into(),
        description: "pickle on untrusted data can execute arbitrary code during load.".into(),
        severity: Severity::High,
        category: Category::Security,
        recommendation: "Use json or another data-only format for untrusted input.".into(),
        languages: vec![Language::Python],
        check: RuleCheck::Pattern(r"pickle\.(?:loads?|Unpickler)\b".into()),
    });

    rules.push(Rule {
        id: "PAT-SEC-014".into(),
        title: "Unsafe YAML loading".into(),
        description: "yaml.load() without SafeLoader can construct arbitrary objects.".into(),
        severity: Severity::Medium,
        category: Category::Security,
        recommendation: "Use yaml.safe_load().".into(),
        languages: vec![Language::Python],
        check: RuleCheck::Pattern(r"yaml\.load\s*\(".into()),
    });

    rules.push(Rule {
        id: "PAT-SEC-020".into(),
        title: "Runtime.exec usage".into(),
        description: "Runtime.getRuntime().exec() with composed input enables command injection."
            .into(),
        severity: Severity::High,
        category: Category::Security,
        recommendation: "Use ProcessBuilder with a fixed argument list.".into(),
        languages: vec![Language::Java],
        check: RuleCheck::Pattern(r"Runtime\.getRuntime\s*\(\s*\)\s*\.exec\s*\(".into()),
    });

    rules.push(Rule {
        id: "PAT-SEC-021".into(),
        title: "SQL statement built from concatenation".into(),
        description: "JDBC statement assembled with + is vulnerable to SQL injection.".into(),
        severity: Severity::Critical,
        category: Category::Security,
        recommendation: "Use PreparedStatement with bind parameters.".into(),
        languages: vec![Language::Java],
        check: RuleCheck::Pattern(
            r"(?i)(?:executeQuery|executeUpdate|prepareStatement)\s*\([^)]*\+".into(),
        ),
    });

    rules.push(Rule {
        id: "PAT-SEC-030".into(),
        title: "Use of gets".into(),
        description: "gets() has no bounds check and always permits buffer overflow.".into(),
        severity: Severity::Critical,
        category: Category::Security,
        recommendation: "Use fgets() with an explicit buffer size.".into(),
        languages: vec![Language::C, Language::Cpp],
        check: RuleCheck::Pattern(r"\bgets\s*\(".into()),
    });

    rules.push(Rule {
        id: "PAT-SEC-031".into(),
        title: "Unbounded string copy".into(),
        description: "strcpy/strcat/sprintf copy without length limits.".into(),
        severity: Severity::High,
        category: Category::Security,
        recommendation: "Use strncpy, strncat, or snprintf with explicit sizes.".into(),
        languages: vec![Language::C, Language::Cpp],
        check: RuleCheck::Pattern(r"\b(?:strcpy|strcat|sprintf)\s*\(".into()),
    });

    rules.push(Rule {
        id: "PAT-SEC-032".into(),
        title: "system() call".into(),
        description: "system() hands the argument to the shell; composed input is injectable."
            .into(),
        severity: Severity::High,
        category: Category::Security,
        recommendation: "Use exec-family functions with an argument vector.".into(),
        languages: vec![Language::C, Language::Cpp],
        check: RuleCheck::Pattern(r"\bsystem\s*\(".into()),
    });

    // Hardcoded credentials, any language
    rules.push(Rule {
        id: "PAT-SEC-040".into(),
        title: "Possible hardcoded credential".into(),
        description: "A password, secret, or API key appears to be hardcoded in source.".into(),
        severity: Severity::High,
        category: Category::Security,
        recommendation: "Move the value to an environment variable or a secrets manager.".into(),
        languages: Vec::new(),
        check: RuleCheck::Pattern(
            r#"(?i)(?:password|passwd|pwd|secret|api_?key)\s*[:=]\s*["'][^"']{8,}["']"#.into(),
        ),
    });

    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules_have_security_category() {
        for rule in rules() {
            assert_eq!(rule.category, Category::Security, "rule {}", rule.id);
        }
    }

    #[test]
    fn test_rule_ids_unique() {
        let table = rules();
        let mut ids: Vec<&str> = table.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), table.len());
    }

    #[test]
    fn test_eval_rule_mentions_eval() {
        let table = rules();
        let eval_rule = table.iter().find(|r| r.id == "PAT-SEC-001").unwrap();
        assert!(eval_rule.description.contains("eval"));
        assert_eq!(eval_rule.severity, Severity::High);
    }
}
