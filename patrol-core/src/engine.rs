//! Scan engine — ties the rule catalog, scanner, cache, and config
//! together behind one facade.

use crate::cache::{AnalysisCache, content_key};
use crate::config::ScanConfig;
use crate::error::{PatrolError, ScanError};
use crate::issue::{Issue, ScanResult};
use crate::language::Language;
use crate::rules::RuleCatalog;
use crate::scanner;
use crate::scanner::batch::{self, ProgressSink};
use chrono::Utc;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// One scan request: the data contract for a single file.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Full file text.
    pub source_text: String,
    /// Editor-style language id ("javascript", "python", ...). When it
    /// resolves to no known language, the file path's extension decides.
    pub language_id: String,
    /// Path the issues are attributed to.
    pub file_path: std::path::PathBuf,
}

/// The scan engine. Owns the rule catalog and the analysis cache; dropped
/// or shut down exactly once by its owner.
pub struct ScanEngine {
    catalog: RuleCatalog,
    config: ScanConfig,
    cache: AnalysisCache,
}

impl ScanEngine {
    /// Build an engine from configuration: built-in rule families plus any
    /// custom rules file.
    pub fn new(config: ScanConfig) -> Result<Self, PatrolError> {
        let mut catalog = RuleCatalog::with_families(&config.families);
        if let Some(path) = &config.custom_rules_file {
            let text = std::fs::read_to_string(path)?;
            let added = catalog.extend_from_toml(&text)?;
            tracing::debug!(added, file = %path.display(), "loaded custom rules");
        }
        Ok(Self::with_catalog(catalog, config))
    }

    /// Build an engine around an explicit catalog.
    pub fn with_catalog(catalog: RuleCatalog, config: ScanConfig) -> Self {
        let cache = AnalysisCache::new(Duration::from_secs(config.cache_ttl_secs));
        Self {
            catalog,
            config,
            cache,
        }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan a single file's text. Repeated scans of the same input produce
    /// an identical ordered issue sequence.
    pub fn scan_source(&self, request: &ScanRequest) -> ScanResult {
        let started_at = Utc::now();
        let start = Instant::now();

        let mut language = Language::from_id(&request.language_id);
        if language == Language::Unknown {
            language = Language::from_path(&request.file_path);
        }

        let issues = self.analyze(&request.source_text, &request.file_path, language);
        let mut result = ScanResult {
            issues,
            scanned_files: 1,
            skipped_files: 0,
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        result.sort();
        result
    }

    /// Scan every supported file under `root`, sequentially.
    ///
    /// Cancellation is checked between files; on cancellation the partial
    /// results accumulated so far are still returned. A file that cannot
    /// be read or is over the size limit is skipped and counted, never
    /// failing the batch.
    pub async fn scan_workspace(
        &self,
        root: &Path,
        token: &CancellationToken,
        progress: &dyn ProgressSink,
    ) -> Result<ScanResult, ScanError> {
        let started_at = Utc::now();
        let start = Instant::now();

        let files = batch::discover_files(root, self.config.respect_gitignore)?;
        let total = files.len();
        tracing::debug!(total, root = %root.display(), "workspace scan started");

        let mut issues = Vec::new();
        let mut scanned_files = 0usize;
        let mut skipped_files = 0usize;

        for (index, path) in files.iter().enumerate() {
            if token.is_cancelled() {
                tracing::info!(scanned_files, total, "scan cancelled, reporting partial results");
                progress.cancelled(scanned_files, total);
                break;
            }
            progress.file_started(path, index, total);
            match self.scan_file(path) {
                Ok(file_issues) => {
                    scanned_files += 1;
                    progress.file_finished(path, file_issues.len());
                    issues.extend(file_issues);
                }
                Err(e) => {
                    skipped_files += 1;
                    tracing::warn!(file = %path.display(), error = %e, "skipping file");
                }
            }
            // One cooperative yield per file keeps long batches from
            // monopolizing the task.
            tokio::task::yield_now().await;
        }

        let mut result = ScanResult {
            issues,
            scanned_files,
            skipped_files,
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        result.sort();
        Ok(result)
    }

    fn scan_file(&self, path: &Path) -> Result<Vec<Issue>, ScanError> {
        let metadata = std::fs::metadata(path)?;
        let limit = self.config.max_file_bytes;
        if metadata.len() > limit {
            return Err(ScanError::FileTooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit,
            });
        }
        let text = std::fs::read_to_string(path)?;
        Ok(self.analyze(&text, path, Language::from_path(path)))
    }

    fn analyze(&self, text: &str, path: &Path, language: Language) -> Vec<Issue> {
        let key = content_key(text);
        if let Some(cached) = self.cache.get(language, &key, path) {
            tracing::debug!(file = %path.display(), "analysis cache hit");
            return cached;
        }

        let rules = self.catalog.rules_for_language(language);
        let mut issues = scanner::run_rules(text, path, language, &rules);
        issues.retain(|issue| issue.severity >= self.config.severity_threshold);
        self.cache.insert(language, key, issues.clone());
        issues
    }

    /// Shut the engine down, releasing the analysis cache. Consuming
    /// `self` makes a second shutdown unrepresentable.
    pub fn shutdown(self) {
        self.cache.clear();
        tracing::debug!("scan engine shut down");
    }
}
