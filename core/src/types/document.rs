// src/types/document.rs
use std::path::Path;

use super::edit::{Position, utf16_len};
use crate::language::{FALLBACK_LANGUAGE_ID, language_id_for_path};

/// An in-memory text document with a line index.
///
/// Lines follow editor conventions: the count is the number of `\n`
/// terminators plus one (an empty document has one empty line), and the
/// text of a line never includes its terminator, `\r` included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    path: String,
    language_id: String,
    content: String,
    line_starts: Vec<usize>,
}

impl SourceDocument {
    pub fn new(
        path: impl Into<String>,
        language_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let line_starts = compute_line_starts(&content);
        Self {
            path: path.into(),
            language_id: language_id.into(),
            content,
            line_starts,
        }
    }

    /// Build a document for a file on disk, inferring the language id from
    /// its name.
    pub fn from_path(path: &Path, content: impl Into<String>) -> Self {
        let language_id = language_id_for_path(path).unwrap_or(FALLBACK_LANGUAGE_ID);
        Self::new(path.to_string_lossy(), language_id, content)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    /// The whole document text.
    pub fn text(&self) -> &str {
        &self.content
    }

    /// Base name of the document path, or the path itself when it has none.
    pub fn file_name(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.path)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of line `index` without its terminator.
    pub fn line(&self, index: usize) -> Option<&str> {
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .map(|next| next - 1)
            .unwrap_or(self.content.len());
        let line = &self.content[start..end];
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    /// Position just past the last character of line `index`.
    pub fn line_end(&self, index: usize) -> Option<Position> {
        let line = self.line(index)?;
        Some(Position::new(index as u32, utf16_len(line)))
    }

    /// Line terminator used by the document, `\n` unless it already uses `\r\n`.
    pub fn line_ending(&self) -> &'static str {
        if self.content.contains("\r\n") { "\r\n" } else { "\n" }
    }

    /// Byte offset of a position whose column counts UTF-16 code units.
    ///
    /// Returns `None` for lines past the end, columns past the end of the
    /// line, and columns that split a surrogate pair.
    pub fn offset_at(&self, position: Position) -> Option<usize> {
        let index = position.line as usize;
        let line = self.line(index)?;
        let line_start = self.line_starts[index];

        let mut units = 0u32;
        for (byte_idx, ch) in line.char_indices() {
            if units >= position.character {
                return (units == position.character).then_some(line_start + byte_idx);
            }
            units += ch.len_utf16() as u32;
        }
        (units == position.character).then_some(line_start + line.len())
    }
}

fn compute_line_starts(content: &str) -> Vec<usize> {
    let mut line_starts = vec![0];
    for (idx, ch) in content.char_indices() {
        if ch == '\n' {
            line_starts.push(idx + 1);
        }
    }
    line_starts
}
