//! Language detection from file extensions and editor-style language ids.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Languages the rule tables know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Java,
    C,
    Cpp,
    Unknown,
}

impl Language {
    /// Detect language from a file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" => Language::JavaScript,
            "ts" | "tsx" | "mts" | "cts" => Language::TypeScript,
            "py" | "pyw" => Language::Python,
            "java" => Language::Java,
            "c" => Language::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hxx" | "h" => Language::Cpp,
            _ => Language::Unknown,
        }
    }

    /// Detect language from a file path.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    /// Resolve an editor-style language identifier ("javascriptreact",
    /// "cpp", ...). Unknown ids map to [`Language::Unknown`], which simply
    /// selects no rules.
    pub fn from_id(id: &str) -> Self {
        match id.to_lowercase().as_str() {
            "javascript" | "javascriptreact" | "js" => Language::JavaScript,
            "typescript" | "typescriptreact" | "ts" => Language::TypeScript,
            "python" | "py" => Language::Python,
            "java" => Language::Java,
            "c" => Language::C,
            "cpp" | "c++" | "cuda-cpp" => Language::Cpp,
            _ => Language::Unknown,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Unknown => "unknown",
        }
    }

    /// Whether the language delimits blocks with braces. Structural checks
    /// (nesting depth, function length) only apply to these.
    pub fn is_brace_delimited(&self) -> bool {
        matches!(
            self,
            Language::JavaScript
                | Language::TypeScript
                | Language::Java
                | Language::C
                | Language::Cpp
        )
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
