//! # File Collector
//!
//! Expands the paths given on the command line into the list of files to
//! process. Files named explicitly are always kept; directories are walked
//! with the `ignore` crate (gitignore-aware) and only files whose language
//! can be inferred from their name are kept.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ftheader_core::language_id_for_path;
use ignore::WalkBuilder;

/// Files selected for processing.
#[derive(Debug, Clone, Default)]
pub struct CollectedFiles {
    /// Files to process, sorted and deduplicated
    pub files: Vec<PathBuf>,
    /// Paths that did not exist
    pub missing: Vec<PathBuf>,
    /// Files under walked directories skipped for having no known language
    pub skipped_count: usize,
}

impl CollectedFiles {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Walks command-line paths into [`CollectedFiles`].
#[derive(Debug, Default)]
pub struct FileCollector {
    skip_dirs: Vec<String>,
}

impl FileCollector {
    pub fn new() -> Self {
        Self {
            skip_dirs: ["node_modules", "target", "__pycache__", ".venv", "venv", "build"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn collect(&self, paths: &[PathBuf]) -> CollectedFiles {
        let mut files = BTreeSet::new();
        let mut collected = CollectedFiles::default();

        for path in paths {
            if path.is_file() {
                files.insert(path.clone());
            } else if path.is_dir() {
                self.walk(path, &mut files, &mut collected.skipped_count);
            } else {
                log::debug!("Path does not exist: {}", path.display());
                collected.missing.push(path.clone());
            }
        }

        collected.files = files.into_iter().collect();
        collected
    }

    fn walk(&self, root: &Path, files: &mut BTreeSet<PathBuf>, skipped: &mut usize) {
        let skip_dirs = self.skip_dirs.clone();
        let walker = WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .ignore(true)
            .require_git(false)
            .add_custom_ignore_filename(".gitignore")
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                match entry.file_name().to_str() {
                    Some(name) if is_dir => !skip_dirs.iter().any(|skip| skip == name),
                    _ => true,
                }
            })
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            if language_id_for_path(entry.path()).is_some() {
                files.insert(entry.into_path());
            } else {
                *skipped += 1;
            }
        }
    }
}
