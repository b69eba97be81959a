//! # Insert Command
//!
//! Inserts a header into each file that lacks one and refreshes the header
//! of each file that has one.
//!
//! ## Usage
//!
//! ```bash
//! # Add or refresh headers across a project
//! ftheader insert src/
//!
//! # Preview the changes as unified diffs
//! ftheader insert --dry-run main.c
//! ```

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use ftheader_core::timestamp;

use crate::config::Config;
use crate::errors::{
    display_config_error, display_error, display_info, display_settings_error,
    display_validation_error, display_warning,
};
use crate::exit_codes::*;
use crate::session::{FileCollector, HeaderApplier};

/// Arguments for the insert command
#[derive(Debug)]
pub struct InsertArgs {
    pub paths: Vec<PathBuf>,
    /// Print diffs instead of writing files
    pub dry_run: bool,
    /// Language id forced on every file
    pub language: Option<String>,
    /// Total width overriding the configured one
    pub width: Option<i64>,
    pub verbose: bool,
}

/// Execute the insert command
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - Every file was processed
/// * `Ok(EXIT_CONFIG_ERROR)` - Identity or email missing
/// * `Ok(EXIT_INVALID_INPUT)` - A path does not exist
/// * `Ok(EXIT_ERROR)` - At least one file could not be processed
pub fn execute(args: InsertArgs) -> Result<i32> {
    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            display_config_error(&format!("{:#}", e));
            return Ok(EXIT_CONFIG_ERROR);
        }
    };

    let mut settings = config.header_settings();
    if let Some(width) = args.width {
        settings = settings.with_width(width);
    }
    if let Err(e) = settings.validate() {
        display_settings_error(&e);
        return Ok(EXIT_CONFIG_ERROR);
    }

    let collected = FileCollector::new().collect(&args.paths);
    if !collected.missing.is_empty() {
        let missing: Vec<_> = collected
            .missing
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        display_validation_error(&format!("no such file or directory: {}", missing.join(", ")));
        return Ok(EXIT_INVALID_INPUT);
    }
    if collected.is_empty() {
        display_warning("No files with a known language found");
        return Ok(EXIT_SUCCESS);
    }
    if args.verbose {
        display_info(&format!(
            "{} files ({} skipped)",
            collected.files.len(),
            collected.skipped_count
        ));
    }

    let applier = HeaderApplier::new(settings)
        .with_language(args.language)
        .dry_run(args.dry_run);
    let stats = applier.apply_files(&collected.files, &timestamp::now());

    for diff in &stats.diffs {
        print!("{}", diff);
    }
    if !args.dry_run {
        for path in &stats.modified_files {
            println!("  {} {}", "✓".green(), path.display());
        }
    }
    for error in &stats.errors {
        display_error(error);
    }

    println!();
    let verb = if args.dry_run { "Would update" } else { "Updated" };
    println!(
        "{} {} files: {} inserted, {} refreshed, {} failed",
        verb,
        stats.modified_files.len(),
        stats.inserted.to_string().green(),
        stats.refreshed.to_string().cyan(),
        stats.failed.to_string().red()
    );

    if stats.is_success() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_ERROR)
    }
}
