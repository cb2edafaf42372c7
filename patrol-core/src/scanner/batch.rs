//! Workspace file discovery and scan progress seams.
//!
//! Batch scans iterate files sequentially; the engine checks cancellation
//! between files, never inside a single file's rule evaluation.

use crate::error::ScanError;
use crate::language::Language;
use std::path::{Path, PathBuf};

/// Progress notifications for a batch scan. All methods default to no-ops
/// so callers only implement what they display.
pub trait ProgressSink: Send + Sync {
    fn file_started(&self, _path: &Path, _index: usize, _total: usize) {}
    fn file_finished(&self, _path: &Path, _issue_count: usize) {}
    fn cancelled(&self, _scanned: usize, _total: usize) {}
}

/// Sink that reports nothing.
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// Collect the scannable files under a root, sorted for deterministic
/// iteration order. Individual walk errors are logged and skipped; only a
/// missing root is a hard error.
pub fn discover_files(root: &Path, respect_gitignore: bool) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("workspace root not found: {}", root.display()),
        )));
    }

    let mut files = Vec::new();
    let walker = ignore::WalkBuilder::new(root)
        .standard_filters(respect_gitignore)
        .build();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.into_path();
        if Language::from_path(&path) != Language::Unknown {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_filters_by_language_and_sorts() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("b.js"), "x\n").unwrap();
        std::fs::write(tmp.path().join("a.py"), "x\n").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "x\n").unwrap();

        let files = discover_files(tmp.path(), true).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.py", "b.js"]);
    }

    #[test]
    fn test_discover_missing_root_is_error() {
        assert!(discover_files(Path::new("/nonexistent/patrol-root"), true).is_err());
    }
}
