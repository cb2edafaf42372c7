//! Content-keyed analysis cache.
//!
//! Avoids recomputing analysis for unchanged content. Entries are keyed by
//! (language, content hash) rather than raw text so identical content in
//! two files shares one entry; cached issues are re-stamped with the
//! requesting path on hit. Entries expire after a fixed TTL and are
//! evicted lazily on access.

use crate::issue::Issue;
use crate::language::Language;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Hash file text into a cache key.
pub fn content_key(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

struct CacheEntry {
    issues: Vec<Issue>,
    inserted_at: Instant,
}

/// Time-boxed map of prior analysis results. Interior mutability keeps the
/// engine's scan methods `&self`; critical sections are short.
pub struct AnalysisCache {
    ttl: Duration,
    entries: Mutex<HashMap<(Language, String), CacheEntry>>,
}

impl AnalysisCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch cached issues for content, re-stamped with `path`. Expired
    /// entries are removed on access.
    pub fn get(&self, language: Language, key: &str, path: &Path) -> Option<Vec<Issue>> {
        let mut entries = self.entries.lock().expect("analysis cache lock");
        let cache_key = (language, key.to_string());
        if let Some(entry) = entries.get(&cache_key) {
            if entry.inserted_at.elapsed() < self.ttl {
                return Some(
                    entry
                        .issues
                        .iter()
                        .cloned()
                        .map(|issue| issue.with_file(path))
                        .collect(),
                );
            }
            entries.remove(&cache_key);
        }
        None
    }

    /// Store an analysis result.
    pub fn insert(&self, language: Language, key: String, issues: Vec<Issue>) {
        let mut entries = self.entries.lock().expect("analysis cache lock");
        entries.insert(
            (language, key),
            CacheEntry {
                issues,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Number of live entries (expired ones may still be counted until
    /// their next access).
    pub fn len(&self) -> usize {
        self.entries.lock().expect("analysis cache lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry. Called once from the engine's shutdown.
    pub fn clear(&self) {
        self.entries.lock().expect("analysis cache lock").clear();
    }
}
