//! Scan configuration.

use crate::error::PatrolError;
use crate::issue::Severity;
use crate::rules::RuleFamily;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for scan operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Rule families to evaluate.
    pub families: Vec<RuleFamily>,
    /// Minimum severity to report; issues below this are suppressed.
    pub severity_threshold: Severity,
    /// Files larger than this are skipped (counted, logged).
    pub max_file_bytes: u64,
    /// TTL for the content-keyed analysis cache.
    pub cache_ttl_secs: u64,
    /// Honor .gitignore and hidden-file conventions during discovery.
    pub respect_gitignore: bool,
    /// Optional TOML file with extra rules.
    pub custom_rules_file: Option<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            families: RuleFamily::all().to_vec(),
            severity_threshold: Severity::Low,
            max_file_bytes: 1024 * 1024,
            cache_ttl_secs: 300,
            respect_gitignore: true,
            custom_rules_file: None,
        }
    }
}

/// Load a [`ScanConfig`] from a TOML file.
pub fn load_config(path: &Path) -> Result<ScanConfig, PatrolError> {
    let text = std::fs::read_to_string(path)?;
    toml::from_str(&text).map_err(|e| PatrolError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.families.len(), 3);
        assert_eq!(config.severity_threshold, Severity::Low);
        assert_eq!(config.cache_ttl_secs, 300);
        assert!(config.respect_gitignore);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ScanConfig = toml::from_str(
            r#"
severity_threshold = "high"
families = ["security"]
"#,
        )
        .unwrap();
        assert_eq!(config.severity_threshold, Severity::High);
        assert_eq!(config.families, vec![RuleFamily::Security]);
        assert_eq!(config.max_file_bytes, 1024 * 1024);
    }
}
