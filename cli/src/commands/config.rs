//! # Config Command
//!
//! Shows and edits the identity written into headers.
//!
//! ## Usage
//!
//! ```bash
//! # Show current configuration
//! ftheader config show
//!
//! # Set identity, email and width
//! ftheader config set --identity ada --email ada@example.com --width 80
//!
//! # Flip insertion on file creation (used by the LSP server)
//! ftheader config toggle-auto-insert
//! ```

use anyhow::Result;
use colored::Colorize;

use crate::config::{Config, EMAIL_ENV_VAR, IDENTITY_ENV_VAR, config_path};
use crate::errors::{display_config_error, display_success, display_validation_error};
use crate::exit_codes::*;

/// Arguments for the config set command
#[derive(Debug, Default)]
pub struct ConfigSetArgs {
    pub identity: Option<String>,
    pub email: Option<String>,
    pub width: Option<i64>,
}

impl ConfigSetArgs {
    fn is_empty(&self) -> bool {
        self.identity.is_none() && self.email.is_none() && self.width.is_none()
    }

    /// Copy the given values into `config`, trimmed.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(identity) = &self.identity {
            config.identity = identity.trim().to_string();
        }
        if let Some(email) = &self.email {
            config.email = email.trim().to_string();
        }
        if let Some(width) = self.width {
            config.header_width = Some(width);
        }
    }
}

fn load_config() -> Option<Config> {
    match Config::load_or_default() {
        Ok(config) => Some(config),
        Err(e) => {
            display_config_error(&format!("{:#}", e));
            None
        }
    }
}

/// Execute the config show command
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - Configuration displayed successfully
/// * `Ok(EXIT_CONFIG_ERROR)` - Configuration file could not be read
pub fn execute_show() -> Result<i32> {
    let Some(config) = load_config() else {
        return Ok(EXIT_CONFIG_ERROR);
    };
    let settings = config.header_settings();

    println!();
    println!("{}", "ftheader Configuration".bold().underline());
    println!();

    if let Ok(path) = config_path() {
        let state = if path.exists() { "" } else { " (not created yet)" };
        println!("  {} {}{}", "File:".dimmed(), path.display(), state.dimmed());
    }
    println!("  {} {}", "Identity:".dimmed(), display_value(&settings.identity, IDENTITY_ENV_VAR));
    println!("  {} {}", "Email:".dimmed(), display_value(&settings.email, EMAIL_ENV_VAR));
    match config.header_width {
        Some(width) => println!("  {} {}", "Width:".dimmed(), width),
        None => println!("  {} {}", "Width:".dimmed(), "language default".dimmed()),
    }
    println!(
        "  {} {}",
        "Auto-insert on create:".dimmed(),
        if config.auto_insert_on_create { "on".green() } else { "off".dimmed() }
    );
    println!();

    if let Err(e) = settings.validate() {
        println!("  {} {}", "→".cyan(), e);
        println!("    ftheader config set --identity <name> --email <address>");
        println!();
    }

    Ok(EXIT_SUCCESS)
}

fn display_value(value: &str, env_var: &str) -> String {
    let shown = if value.is_empty() {
        "not set".red().to_string()
    } else {
        value.to_string()
    };
    if std::env::var(env_var).is_ok() {
        format!("{} {}", shown, format!("(from {})", env_var).dimmed())
    } else {
        shown
    }
}

/// Execute the config set command
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - Configuration saved
/// * `Ok(EXIT_INVALID_INPUT)` - Nothing to set
/// * `Ok(EXIT_CONFIG_ERROR)` - Configuration could not be read or written
pub fn execute_set(args: ConfigSetArgs) -> Result<i32> {
    if args.is_empty() {
        display_validation_error("pass at least one of --identity, --email or --width");
        return Ok(EXIT_INVALID_INPUT);
    }
    let Some(mut config) = load_config() else {
        return Ok(EXIT_CONFIG_ERROR);
    };

    args.apply_to(&mut config);
    if let Err(e) = config.save() {
        display_config_error(&format!("{:#}", e));
        return Ok(EXIT_CONFIG_ERROR);
    }

    display_success("Configuration saved");
    Ok(EXIT_SUCCESS)
}

/// Execute the config toggle-auto-insert command
pub fn execute_toggle_auto_insert() -> Result<i32> {
    let Some(mut config) = load_config() else {
        return Ok(EXIT_CONFIG_ERROR);
    };

    let enabled = config.toggle_auto_insert();
    if let Err(e) = config.save() {
        display_config_error(&format!("{:#}", e));
        return Ok(EXIT_CONFIG_ERROR);
    }

    display_success(&format!(
        "Auto-insert on create is now {}",
        if enabled { "on" } else { "off" }
    ));
    Ok(EXIT_SUCCESS)
}
