//! Header Applier Module
//!
//! Inserts or refreshes headers in files on disk. Files are processed one
//! after another; a failure on one file is recorded and the next file is
//! still processed.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ftheader::session::HeaderApplier;
//!
//! let applier = HeaderApplier::new(settings).dry_run(true);
//! let stats = applier.apply_files(&files, &ftheader_core::timestamp::now());
//! println!("Inserted {} headers", stats.inserted);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ftheader_core::{
    EditKind, HeaderSettings, SourceDocument, apply_edit, make_unified_diff, plan_header_edit,
};

/// Statistics from one run over a list of files
#[derive(Debug, Default, Clone)]
pub struct ApplyStats {
    /// Headers written into files that had none
    pub inserted: usize,
    /// Existing headers that were regenerated
    pub refreshed: usize,
    /// Files that could not be processed
    pub failed: usize,
    /// Files whose contents changed (or would change, in a dry run)
    pub modified_files: Vec<PathBuf>,
    /// Unified diffs collected during a dry run
    pub diffs: Vec<String>,
    /// Error messages for failed files
    pub errors: Vec<String>,
}

impl ApplyStats {
    /// Returns true if every file was processed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Result of processing a single file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub kind: EditKind,
    pub changed: bool,
    pub diff: Option<String>,
}

/// Applies header edits to files on disk.
pub struct HeaderApplier {
    settings: HeaderSettings,
    language_id: Option<String>,
    dry_run: bool,
}

impl HeaderApplier {
    pub fn new(settings: HeaderSettings) -> Self {
        Self {
            settings,
            language_id: None,
            dry_run: false,
        }
    }

    /// Treat every file as this language instead of inferring it from the name.
    pub fn with_language(mut self, language_id: Option<String>) -> Self {
        self.language_id = language_id;
        self
    }

    /// Compute diffs without writing anything.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn apply_files(&self, files: &[PathBuf], now: &str) -> ApplyStats {
        let mut stats = ApplyStats::default();

        for path in files {
            match self.apply_file(path, now) {
                Ok(outcome) => {
                    match outcome.kind {
                        EditKind::Insert => stats.inserted += 1,
                        EditKind::Refresh => stats.refreshed += 1,
                    }
                    if outcome.changed {
                        stats.modified_files.push(outcome.path);
                    }
                    stats.diffs.extend(outcome.diff);
                }
                Err(e) => {
                    log::warn!("Failed to process {}: {:#}", path.display(), e);
                    stats.failed += 1;
                    stats.errors.push(format!("{}: {:#}", path.display(), e));
                }
            }
        }

        stats
    }

    /// Insert or refresh the header of one file.
    pub fn apply_file(&self, path: &Path, now: &str) -> Result<FileOutcome> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let document = match &self.language_id {
            Some(language_id) => {
                SourceDocument::new(path.to_string_lossy(), language_id.as_str(), content)
            }
            None => SourceDocument::from_path(path, content),
        };

        let edit = plan_header_edit(&document, &self.settings, now);
        let updated = apply_edit(&document, &edit)
            .with_context(|| format!("Failed to apply header edit to {}", path.display()))?;
        let changed = updated != document.text();
        log::debug!(
            "{} ({}): {:?}, changed={}",
            path.display(),
            document.language_id(),
            edit.kind,
            changed
        );

        let diff = if self.dry_run && changed {
            Some(make_unified_diff(
                &path.to_string_lossy(),
                document.text(),
                &updated,
            ))
        } else {
            None
        };

        if !self.dry_run && changed {
            fs::write(path, &updated)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }

        Ok(FileOutcome {
            path: path.to_path_buf(),
            kind: edit.kind,
            changed,
            diff,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftheader_core::detect;
    use tempfile::TempDir;

    const NOW: &str = "2024/03/01 09:05:00";
    const LATER: &str = "2024/03/02 10:00:00";

    fn settings() -> HeaderSettings {
        HeaderSettings::new("ada", "ada@example.com")
    }

    #[test]
    fn test_inserts_then_refreshes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("main.c");
        fs::write(&path, "int main(void) { return 0; }\n").unwrap();

        let applier = HeaderApplier::new(settings());
        let stats = applier.apply_files(std::slice::from_ref(&path), NOW);
        assert_eq!(stats.inserted, 1);
        assert_eq!(stats.modified_files, vec![path.clone()]);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("/* ****"));
        assert!(written.ends_with("*/\n\nint main(void) { return 0; }\n"));

        let stats = applier.apply_files(std::slice::from_ref(&path), LATER);
        assert_eq!(stats.refreshed, 1);
        let refreshed = fs::read_to_string(&path).unwrap();
        let header = detect(&SourceDocument::from_path(&path, refreshed.as_str())).unwrap();
        assert_eq!(header.created_at.as_deref(), Some(NOW));
        assert!(refreshed.contains(&format!("Updated: {LATER} by ada")));
    }

    #[test]
    fn test_refresh_with_same_clock_leaves_file_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lib.rs");
        fs::write(&path, "").unwrap();

        let applier = HeaderApplier::new(settings());
        applier.apply_file(&path, NOW).unwrap();
        let outcome = applier.apply_file(&path, NOW).unwrap();
        assert_eq!(outcome.kind, EditKind::Refresh);
        assert!(!outcome.changed);
    }

    #[test]
    fn test_dry_run_collects_diff_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("script.py");
        fs::write(&path, "print('hi')\n").unwrap();

        let stats = HeaderApplier::new(settings())
            .dry_run(true)
            .apply_files(std::slice::from_ref(&path), NOW);
        assert_eq!(stats.inserted, 1);
        assert_eq!(stats.diffs.len(), 1);
        assert!(stats.diffs[0].contains("+# "));
        assert_eq!(fs::read_to_string(&path).unwrap(), "print('hi')\n");
    }

    #[test]
    fn test_language_override_selects_delimiters() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.unknownext");
        fs::write(&path, "").unwrap();

        HeaderApplier::new(settings())
            .with_language(Some("lua".to_string()))
            .apply_file(&path, NOW)
            .unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with("-- ****"));
    }

    #[test]
    fn test_failure_does_not_stop_the_batch() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.c");
        let present = temp_dir.path().join("present.c");
        fs::write(&present, "").unwrap();

        let stats = HeaderApplier::new(settings()).apply_files(&[missing, present.clone()], NOW);
        assert!(!stats.is_success());
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.inserted, 1);
        assert!(stats.errors[0].contains("missing.c"));
        assert!(fs::read_to_string(&present).unwrap().starts_with("/* "));
    }
}
