//! Fresh header insertion and the insert-or-refresh decision.

use crate::delimiters::delimiters_for_language;
use crate::detect::{build_update_edit, scan_start_line};
use crate::render::{RenderRequest, header_width, render};
use crate::types::{EditKind, HeaderEdit, HeaderSettings, Position, SourceDocument, TextRange};

/// Plan the insertion of a new header.
///
/// The header goes at the scan start line, so a `#!` line stays first.
/// Exactly one blank line separates it from the text that follows; when
/// that text already starts with a blank line none is added.
pub fn build_insert_edit(
    document: &SourceDocument,
    settings: &HeaderSettings,
    now: &str,
) -> HeaderEdit {
    let start = scan_start_line(document);
    let eol = document.line_ending();
    let language_id = document.language_id();

    let header = render(&RenderRequest {
        file_name: document.file_name(),
        settings,
        created_at: now,
        updated_at: now,
        delimiters: delimiters_for_language(language_id),
        created_by: None,
        total_width: Some(header_width(settings, language_id)),
    })
    .join(eol);

    // A directive without a terminator: the header starts on a new line.
    let (position, prefix) = if start > 0 && document.line_count() <= start {
        let end_of_directive = document
            .line_end(start - 1)
            .unwrap_or(Position::new(0, 0));
        (end_of_directive, eol)
    } else {
        (Position::new(start as u32, 0), "")
    };

    let followed_by_text = document
        .line(start)
        .is_some_and(|line| !line.trim().is_empty());
    let trailing = if followed_by_text { [eol, eol].concat() } else { eol.to_string() };

    HeaderEdit {
        kind: EditKind::Insert,
        range: TextRange::empty(position),
        new_text: format!("{prefix}{header}{trailing}"),
    }
}

/// Refresh the header when one exists, insert one otherwise.
pub fn plan_header_edit(
    document: &SourceDocument,
    settings: &HeaderSettings,
    now: &str,
) -> HeaderEdit {
    build_update_edit(document, settings, now)
        .unwrap_or_else(|| build_insert_edit(document, settings, now))
}
