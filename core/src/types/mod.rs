pub mod document;
pub mod edit;
pub mod settings;

pub use document::SourceDocument;
pub use edit::{EditKind, HeaderEdit, Position, TextRange, apply_edit, make_unified_diff};
pub use settings::HeaderSettings;
