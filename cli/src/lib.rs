//! # ftheader CLI Library
//!
//! Command-line and editor front end for the file header engine in
//! `ftheader-core`.
//!
//! ## Modules
//!
//! - [`commands`] - CLI command implementations, including the LSP server
//! - [`config`] - Configuration management
//! - [`errors`] - Error display
//! - [`exit_codes`] - Standard exit codes
//! - [`session`] - Batch processing of files on disk

pub mod commands;
pub mod config;
pub mod errors;
pub mod exit_codes;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use session::{FileCollector, HeaderApplier};
