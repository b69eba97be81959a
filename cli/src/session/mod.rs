//! # File Sessions
//!
//! Batch processing of files on disk for the CLI commands:
//!
//! 1. **File collection** - Expand paths, walking directories with gitignore rules
//! 2. **Header application** - Insert or refresh headers one file at a time
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ftheader::session::{FileCollector, HeaderApplier};
//!
//! let collected = FileCollector::new().collect(&paths);
//! let stats = HeaderApplier::new(settings).apply_files(&collected.files, &now);
//! ```

pub mod file_collector;
pub mod header_applier;

pub use file_collector::{CollectedFiles, FileCollector};
pub use header_applier::{ApplyStats, FileOutcome, HeaderApplier};
