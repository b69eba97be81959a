//! # Check Command
//!
//! Reports which files carry a header and what their creation metadata
//! says. Exits with [`EXIT_CHECK_FAILED`] when any file lacks one, so it
//! can gate CI.
//!
//! ## Usage
//!
//! ```bash
//! ftheader check src/
//! ftheader check --json src/ include/
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use ftheader_core::{CommentStyle, SourceDocument, detect};
use serde::Serialize;

use crate::errors::display_validation_error;
use crate::exit_codes::*;
use crate::session::FileCollector;

/// Arguments for the check command
#[derive(Debug)]
pub struct CheckArgs {
    pub paths: Vec<PathBuf>,
    pub json: bool,
    pub verbose: bool,
}

/// Header status of one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub language_id: String,
    pub has_header: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    files: Vec<FileReport>,
    missing_headers: usize,
    errors: Vec<String>,
}

/// Inspect the header of a single file.
pub fn inspect(path: &Path) -> Result<FileReport> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let document = SourceDocument::from_path(path, content);
    let header = detect(&document);

    Ok(FileReport {
        path: path.display().to_string(),
        language_id: document.language_id().to_string(),
        has_header: header.is_some(),
        style: header
            .as_ref()
            .and_then(|h| CommentStyle::from_delimiters(h.delimiters))
            .map(|s| s.as_str()),
        created_at: header.as_ref().and_then(|h| h.created_at.clone()),
        created_by: header.and_then(|h| h.created_by),
    })
}

/// Execute the check command
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - Every file has a header
/// * `Ok(EXIT_CHECK_FAILED)` - At least one file has no header
/// * `Ok(EXIT_INVALID_INPUT)` - A path does not exist
/// * `Ok(EXIT_ERROR)` - A file could not be read
pub fn execute(args: CheckArgs) -> Result<i32> {
    let collected = FileCollector::new().collect(&args.paths);
    if let Some(missing) = collected.missing.first() {
        display_validation_error(&format!("no such file or directory: {}", missing.display()));
        return Ok(EXIT_INVALID_INPUT);
    }

    let mut report = CheckReport {
        files: Vec::with_capacity(collected.files.len()),
        missing_headers: 0,
        errors: Vec::new(),
    };
    for path in &collected.files {
        match inspect(path) {
            Ok(file) => {
                if !file.has_header {
                    report.missing_headers += 1;
                }
                report.files.push(file);
            }
            Err(e) => report.errors.push(format!("{:#}", e)),
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, args.verbose);
    }

    if !report.errors.is_empty() {
        Ok(EXIT_ERROR)
    } else if report.missing_headers > 0 {
        Ok(EXIT_CHECK_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn print_report(report: &CheckReport, verbose: bool) {
    for file in &report.files {
        if !file.has_header {
            println!("{} {} {}", "✗".red().bold(), file.path, "no header".red());
            continue;
        }
        if !verbose {
            continue;
        }
        match (&file.created_at, &file.created_by) {
            (Some(at), Some(by)) => println!(
                "{} {} {}",
                "✓".green(),
                file.path,
                format!("created {} by {}", at, by).dimmed()
            ),
            _ => println!(
                "{} {} {}",
                "⚠".yellow(),
                file.path,
                "header without creation metadata".yellow()
            ),
        }
    }
    for error in &report.errors {
        eprintln!("{} {}", "✗".red().bold(), error);
    }

    println!();
    println!(
        "{} files checked, {} without a header",
        report.files.len(),
        report.missing_headers
    );
}
