//! # Count Command
//!
//! Counts function definitions in C files and flags those above
//! [`FUNCTION_WARNING_THRESHOLD`].
//!
//! ## Usage
//!
//! ```bash
//! ftheader count src/
//! ftheader count --json src/parser.c
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use ftheader_core::functions::FUNCTION_WARNING_THRESHOLD;
use ftheader_core::language::{FALLBACK_LANGUAGE_ID, is_c_file, language_id_for_path};
use ftheader_core::{FunctionCount, SourceDocument};
use serde::Serialize;

use crate::errors::{display_error, display_validation_error, display_warning};
use crate::exit_codes::*;
use crate::session::FileCollector;

/// Arguments for the count command
#[derive(Debug)]
pub struct CountArgs {
    pub paths: Vec<PathBuf>,
    pub json: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountEntry {
    pub path: String,
    pub count: usize,
    pub over_limit: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct CountReport {
    pub files: Vec<CountEntry>,
    pub errors: Vec<String>,
}

impl CountReport {
    pub fn over_limit(&self) -> usize {
        self.files.iter().filter(|e| e.over_limit).count()
    }
}

/// Count the functions of every C file among `files`; other files are skipped
/// without being read. A file that cannot be read is recorded in `errors`.
pub fn count_files(files: &[PathBuf]) -> CountReport {
    let mut report = CountReport::default();
    for path in files {
        let language_id = language_id_for_path(path).unwrap_or(FALLBACK_LANGUAGE_ID);
        if !is_c_file(language_id, &path.to_string_lossy()) {
            log::debug!("Skipping non-C file {}", path.display());
            continue;
        }
        match count_file(path) {
            Ok(entry) => report.files.push(entry),
            Err(e) => {
                log::warn!("{:#}", e);
                report.errors.push(format!("{:#}", e));
            }
        }
    }
    report
}

fn count_file(path: &Path) -> Result<CountEntry> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let document = SourceDocument::from_path(path, content);
    let FunctionCount { count, over_limit } = FunctionCount::of(document.text());
    Ok(CountEntry {
        path: document.path().to_string(),
        count,
        over_limit,
    })
}

/// Execute the count command
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - No file exceeds the limit
/// * `Ok(EXIT_CHECK_FAILED)` - At least one file exceeds it
/// * `Ok(EXIT_INVALID_INPUT)` - A path does not exist
/// * `Ok(EXIT_ERROR)` - A file could not be read
pub fn execute(args: CountArgs) -> Result<i32> {
    let collected = FileCollector::new().collect(&args.paths);
    if let Some(missing) = collected.missing.first() {
        display_validation_error(&format!("no such file or directory: {}", missing.display()));
        return Ok(EXIT_INVALID_INPUT);
    }

    let report = count_files(&collected.files);
    let over_limit = report.over_limit();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if report.files.is_empty() && report.errors.is_empty() {
            display_warning("No C files found");
        }
        for entry in &report.files {
            let count = if entry.over_limit {
                entry.count.to_string().red().bold()
            } else {
                entry.count.to_string().green()
            };
            println!("{:>4}  {}", count, entry.path);
        }
        for error in &report.errors {
            display_error(error);
        }
        if !report.files.is_empty() {
            println!();
            println!(
                "{} of {} files exceed {} functions",
                over_limit,
                report.files.len(),
                FUNCTION_WARNING_THRESHOLD
            );
        }
    }

    if !report.errors.is_empty() {
        Ok(EXIT_ERROR)
    } else if over_limit > 0 {
        Ok(EXIT_CHECK_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}
