//! # ftheader-core
//!
//! Rendering, detection and refresh of the eleven-line file header block,
//! independent of any editor or file system.
//!
//! - **Delimiters**: comment syntax per language, and sniffing it back from a line
//! - **Render**: fixed-width header lines from settings and timestamps
//! - **Detect**: find an existing header and plan its refresh
//! - **Insert**: plan a fresh header, or pick refresh over insert
//! - **Functions**: count C function definitions against the house limit
//!
//! Every operation is a pure function from a [`SourceDocument`] to a
//! [`HeaderEdit`]; callers apply the edit through their own write path.
//!
//! ## Example
//!
//! ```rust
//! use ftheader_core::{HeaderSettings, SourceDocument, apply_edit, plan_header_edit};
//!
//! let settings = HeaderSettings::new("ada", "ada@example.com");
//! let document = SourceDocument::new("src/main.c", "c", "int x;\n");
//! let edit = plan_header_edit(&document, &settings, "2024/03/01 09:05:00");
//! let updated = apply_edit(&document, &edit).unwrap();
//! assert!(updated.starts_with("/* ****"));
//! ```

pub mod constants;
pub mod delimiters;
pub mod detect;
pub mod error;
pub mod functions;
pub mod insert;
pub mod language;
pub mod render;
pub mod timestamp;
pub mod types;

pub use delimiters::{CommentDelimiters, CommentStyle, delimiters_for_language};
pub use detect::{ExistingHeader, build_update_edit, detect};
pub use error::HeaderError;
pub use functions::{FunctionCount, count_functions};
pub use insert::{build_insert_edit, plan_header_edit};
pub use language::language_id_for_path;
pub use render::{RenderRequest, render};
pub use types::{
    EditKind, HeaderEdit, HeaderSettings, Position, SourceDocument, TextRange, apply_edit,
    make_unified_diff,
};
