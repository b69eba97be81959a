// src/types/edit.rs
use serde::{Deserialize, Serialize};
use similar::TextDiff;

use super::document::SourceDocument;
use crate::error::HeaderError;

/// Zero-based line and UTF-16 column, matching editor protocol positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Half-open span `[start, end)` of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Empty range at `position`, used for insertions.
    pub const fn empty(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// What a [`HeaderEdit`] does to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    /// A fresh header is inserted.
    Insert,
    /// An existing header is rewritten in place.
    Refresh,
}

/// A single text replacement computed by the engine for the caller to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEdit {
    pub kind: EditKind,
    pub range: TextRange,
    pub new_text: String,
}

/// Apply `edit` to the document text and return the new contents.
///
/// Both ends of the range must resolve inside the document and the start
/// must not come after the end.
pub fn apply_edit(document: &SourceDocument, edit: &HeaderEdit) -> Result<String, HeaderError> {
    let start = resolve(document, edit.range.start)?;
    let end = resolve(document, edit.range.end)?;
    if start > end {
        return Err(HeaderError::PositionOutOfBounds {
            line: edit.range.end.line,
            character: edit.range.end.character,
        });
    }

    let mut text = document.text().to_string();
    text.replace_range(start..end, &edit.new_text);
    Ok(text)
}

fn resolve(document: &SourceDocument, position: Position) -> Result<usize, HeaderError> {
    document
        .offset_at(position)
        .ok_or(HeaderError::PositionOutOfBounds {
            line: position.line,
            character: position.character,
        })
}

/// Build a unified diff string between `before` and `after` using `similar` 2.7.
pub fn make_unified_diff(path: &str, before: &str, after: &str) -> String {
    TextDiff::from_lines(before, after)
        .unified_diff()
        .context_radius(3)
        .header(path, path)
        .to_string()
}

pub(crate) fn utf16_len(text: &str) -> u32 {
    text.chars().map(|ch| ch.len_utf16() as u32).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(content: &str) -> SourceDocument {
        SourceDocument::new("main.c", "c", content)
    }

    #[test]
    fn apply_edit_inserts_at_start() {
        let edit = HeaderEdit {
            kind: EditKind::Insert,
            range: TextRange::empty(Position::new(0, 0)),
            new_text: "head\n\n".to_string(),
        };
        assert_eq!(apply_edit(&doc("body"), &edit).unwrap(), "head\n\nbody");
    }

    #[test]
    fn apply_edit_replaces_across_lines() {
        let edit = HeaderEdit {
            kind: EditKind::Refresh,
            range: TextRange::new(Position::new(0, 1), Position::new(2, 1)),
            new_text: "X".to_string(),
        };
        assert_eq!(apply_edit(&doc("abc\ndef\nghi"), &edit).unwrap(), "aXhi");
    }

    #[test]
    fn apply_edit_rejects_positions_past_end() {
        let edit = HeaderEdit {
            kind: EditKind::Refresh,
            range: TextRange::new(Position::new(0, 0), Position::new(5, 0)),
            new_text: String::new(),
        };
        assert_eq!(
            apply_edit(&doc("one line"), &edit),
            Err(HeaderError::PositionOutOfBounds {
                line: 5,
                character: 0
            })
        );
    }

    #[test]
    fn apply_edit_rejects_inverted_range() {
        let edit = HeaderEdit {
            kind: EditKind::Refresh,
            range: TextRange::new(Position::new(1, 0), Position::new(0, 0)),
            new_text: String::new(),
        };
        assert!(apply_edit(&doc("a\nb"), &edit).is_err());
    }

    #[test]
    fn empty_range_is_empty() {
        assert!(TextRange::empty(Position::new(3, 2)).is_empty());
        assert!(!TextRange::new(Position::new(0, 0), Position::new(0, 1)).is_empty());
    }

    #[test]
    fn edit_kind_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&EditKind::Refresh).unwrap(), "\"refresh\"");
    }

    #[test]
    fn unified_diff_mentions_changed_lines() {
        let diff = make_unified_diff("main.c", "int x;\n", "/* hi */\nint x;\n");
        assert!(diff.contains("+/* hi */"));
        assert!(diff.contains("main.c"));
    }

    #[test]
    fn utf16_len_counts_surrogates() {
        assert_eq!(utf16_len("ab"), 2);
        assert_eq!(utf16_len("𝄞"), 2);
    }
}
