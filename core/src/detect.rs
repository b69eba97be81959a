//! # Header Detector
//!
//! Recognizes a previously inserted header at the top of a document and
//! plans the edit that refreshes it.
//!
//! A header is recognized purely by shape: a border line at the scan start,
//! another border line with the same delimiters ten lines below. The
//! `Created` line in between is parsed for the original timestamp and
//! author, which a refresh carries over. A header whose `Created` line does
//! not parse still counts as present; a refresh then records the current
//! time and identity instead.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{CREATED_LINE_INDEX, HEADER_LINE_COUNT};
use crate::delimiters::{CommentDelimiters, is_border_line, sniff_delimiters};
use crate::language::uses_interpreter_directive;
use crate::render::{RenderRequest, header_width, render};
use crate::types::{EditKind, HeaderEdit, HeaderSettings, Position, SourceDocument, TextRange};

static CREATED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Created:\s+(\d{4}/\d{2}/\d{2}\s+\d{2}:\d{2}:\d{2})\s+by\s+(\S+)")
        .expect("created line pattern is valid")
});

/// A header found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingHeader {
    /// Line of the first border.
    pub start_line: u32,
    /// From column 0 of the first border to the end of the last one.
    pub range: TextRange,
    pub created_at: Option<String>,
    pub created_by: Option<String>,
    pub delimiters: CommentDelimiters,
}

impl ExistingHeader {
    /// Line of the closing border.
    pub fn end_line(&self) -> u32 {
        self.range.end.line
    }
}

/// First line a header may occupy: past a `#!` line for scripting
/// languages, otherwise the top of the document.
pub fn scan_start_line(document: &SourceDocument) -> usize {
    let has_directive = document
        .line(0)
        .is_some_and(|first| first.starts_with("#!"));
    if has_directive && uses_interpreter_directive(document.language_id()) {
        1
    } else {
        0
    }
}

/// Look for a header at the scan start line.
pub fn detect(document: &SourceDocument) -> Option<ExistingHeader> {
    let start = scan_start_line(document);
    if document.line_count() < start + HEADER_LINE_COUNT {
        return None;
    }

    let first = document.line(start)?;
    let delimiters = sniff_delimiters(first)?;
    if !is_border_line(first, delimiters) {
        return None;
    }

    let last_index = start + HEADER_LINE_COUNT - 1;
    let last = document.line(last_index)?;
    if !is_border_line(last, delimiters) {
        return None;
    }

    let range = TextRange::new(
        Position::new(start as u32, 0),
        document.line_end(last_index)?,
    );

    let (created_at, created_by) = document
        .line(start + CREATED_LINE_INDEX)
        .and_then(parse_created_line)
        .map_or((None, None), |(at, by)| (Some(at), Some(by)));

    Some(ExistingHeader {
        start_line: start as u32,
        range,
        created_at,
        created_by,
        delimiters,
    })
}

/// Extract `(timestamp, author)` from a `Created:` line.
pub fn parse_created_line(line: &str) -> Option<(String, String)> {
    let captures = CREATED_RE.captures(line)?;
    Some((captures[1].to_string(), captures[2].to_string()))
}

/// Plan the edit that refreshes an existing header, or `None` when the
/// document has none.
///
/// The creation timestamp and author are kept when they parse, otherwise
/// `now` and the configured identity take their place. The header is
/// re-rendered at the width currently configured for the document. When
/// text follows the closing border directly, the range is widened to the
/// start of that line and the replacement ends with a blank separator line.
pub fn build_update_edit(
    document: &SourceDocument,
    settings: &HeaderSettings,
    now: &str,
) -> Option<HeaderEdit> {
    let header = detect(document)?;

    let created_at = header.created_at.as_deref().unwrap_or(now);
    let created_by = header
        .created_by
        .as_deref()
        .unwrap_or(settings.identity.as_str());

    let eol = document.line_ending();
    let mut new_text = render(&RenderRequest {
        file_name: document.file_name(),
        settings,
        created_at,
        updated_at: now,
        delimiters: header.delimiters,
        created_by: Some(created_by),
        total_width: Some(header_width(settings, document.language_id())),
    })
    .join(eol);

    let next_line = header.end_line() as usize + 1;
    let glued = document
        .line(next_line)
        .is_some_and(|line| !line.trim().is_empty());

    let range = if glued {
        new_text.push_str(eol);
        new_text.push_str(eol);
        TextRange::new(header.range.start, Position::new(next_line as u32, 0))
    } else {
        header.range
    };

    Some(HeaderEdit {
        kind: EditKind::Refresh,
        range,
        new_text,
    })
}
