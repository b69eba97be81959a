//! # Error Handling
//!
//! User-facing error and status output for the ftheader CLI.

use colored::Colorize;
use ftheader_core::HeaderError;

/// Display a configuration error with a hint on how to fix it
///
/// # Arguments
///
/// * `message` - The error message to display
pub fn display_config_error(message: &str) {
    eprintln!("{} Configuration error: {}", "✗".red().bold(), message);
    eprintln!();
    eprintln!("{}", "Possible causes:".yellow());
    eprintln!("  • Identity or email has not been set");
    eprintln!("  • Configuration file is corrupted");
    eprintln!();
    eprintln!(
        "{} Run `ftheader config set --identity <name> --email <address>`.",
        "Tip:".cyan().bold()
    );
}

/// Display a settings validation failure from the core.
pub fn display_settings_error(error: &HeaderError) {
    display_config_error(&error.to_string());
}

/// Display a validation error for bad input
pub fn display_validation_error(message: &str) {
    eprintln!("{} Invalid input: {}", "✗".red().bold(), message);
    eprintln!();
    eprintln!(
        "{} Check the command options and try again.",
        "Tip:".cyan().bold()
    );
}

/// Display a generic error
pub fn display_error(message: &str) {
    eprintln!("{} Error: {}", "✗".red().bold(), message);
}

/// Display a warning
pub fn display_warning(message: &str) {
    eprintln!("{} Warning: {}", "⚠".yellow().bold(), message);
}

/// Display a success message
pub fn display_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Display an info message
pub fn display_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
