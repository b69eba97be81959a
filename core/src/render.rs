//! # Header Renderer
//!
//! Turns a [`RenderRequest`] into the eleven lines of a header block.
//!
//! Every line has the same width: the delimiters plus an inner field of
//! `inner_width` characters. Content lines put a left-justified field and a
//! right-justified decorative suffix inside that field, truncating the
//! field (then the suffix) when they do not fit. Widths count Unicode
//! scalar values.

use crate::constants::{
    BY_SUFFIX, COLUMN_SUFFIX, CREATED_SUFFIX, DEFAULT_HEADER_WIDTH, FILE_SUFFIX,
    MAX_HEADER_WIDTH, MIN_HEADER_WIDTH, MIN_INNER_WIDTH, SPACER_SUFFIX, TITLE_SUFFIX,
    UPDATED_SUFFIX,
};
use crate::delimiters::CommentDelimiters;
use crate::language::default_header_width;
use crate::types::HeaderSettings;

/// Everything needed to render one header.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub file_name: &'a str,
    pub settings: &'a HeaderSettings,
    pub created_at: &'a str,
    pub updated_at: &'a str,
    pub delimiters: CommentDelimiters,
    /// Author recorded on the `Created` line; `settings.identity` when absent.
    pub created_by: Option<&'a str>,
    /// Total width, clamped to the allowed range; [`DEFAULT_HEADER_WIDTH`] when absent.
    pub total_width: Option<usize>,
}

/// Render the header as an ordered list of lines.
pub fn render(request: &RenderRequest<'_>) -> Vec<String> {
    let total_width = request
        .total_width
        .map(|width| width.clamp(MIN_HEADER_WIDTH, MAX_HEADER_WIDTH))
        .unwrap_or(DEFAULT_HEADER_WIDTH);
    let inner = inner_width(total_width, request.delimiters);
    let d = request.delimiters;

    let settings = request.settings;
    let created_by = request.created_by.unwrap_or(&settings.identity);

    vec![
        border_line(inner, d),
        blank_line(inner, d),
        content_line("", TITLE_SUFFIX, inner, d),
        content_line(&format!("  {}", request.file_name), FILE_SUFFIX, inner, d),
        content_line("", COLUMN_SUFFIX, inner, d),
        content_line(&format!("  By: {}", settings.signature()), BY_SUFFIX, inner, d),
        content_line("", SPACER_SUFFIX, inner, d),
        content_line(
            &format!("  Created: {} by {}", request.created_at, created_by),
            CREATED_SUFFIX,
            inner,
            d,
        ),
        content_line(
            &format!("  Updated: {} by {}", request.updated_at, settings.identity),
            UPDATED_SUFFIX,
            inner,
            d,
        ),
        blank_line(inner, d),
        border_line(inner, d),
    ]
}

/// Render the header joined with `\n`, without a trailing line break.
pub fn render_text(request: &RenderRequest<'_>) -> String {
    render(request).join("\n")
}

/// Clamp a configured width into `[MIN_HEADER_WIDTH, MAX_HEADER_WIDTH]`.
pub fn sanitize_width(value: i64) -> usize {
    value.clamp(MIN_HEADER_WIDTH as i64, MAX_HEADER_WIDTH as i64) as usize
}

/// Effective total width for a document: the configured width when set,
/// otherwise the language default.
pub fn header_width(settings: &HeaderSettings, language_id: &str) -> usize {
    settings
        .header_width
        .map(sanitize_width)
        .unwrap_or_else(|| default_header_width(language_id))
}

pub fn inner_width(total_width: usize, delimiters: CommentDelimiters) -> usize {
    total_width
        .saturating_sub(delimiters.overhead())
        .max(MIN_INNER_WIDTH)
}

fn content_line(left: &str, right: &str, inner: usize, d: CommentDelimiters) -> String {
    let right = truncate(right, inner.saturating_sub(1));
    let right_len = right.chars().count();
    let left = truncate(left, inner.saturating_sub(right_len));
    let padding = inner.saturating_sub(left.chars().count() + right_len);
    format!("{}{}{}{}{}", d.start, left, " ".repeat(padding), right, d.end)
}

fn border_line(inner: usize, d: CommentDelimiters) -> String {
    format!("{}{}{}", d.start, "*".repeat(inner), d.end)
}

fn blank_line(inner: usize, d: CommentDelimiters) -> String {
    format!("{}{}{}", d.start, " ".repeat(inner), d.end)
}

fn truncate(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delimiters::CommentStyle;

    fn settings() -> HeaderSettings {
        HeaderSettings::new("ada", "ada@example.com")
    }

    fn request<'a>(
        settings: &'a HeaderSettings,
        delimiters: CommentDelimiters,
        total_width: Option<usize>,
    ) -> RenderRequest<'a> {
        RenderRequest {
            file_name: "main.c",
            settings,
            created_at: "2024/03/01 09:05:00",
            updated_at: "2024/03/02 18:30:59",
            delimiters,
            created_by: None,
            total_width,
        }
    }

    fn widths(lines: &[String]) -> Vec<usize> {
        lines.iter().map(|line| line.chars().count()).collect()
    }

    #[test]
    fn renders_eleven_lines_of_default_width() {
        let s = settings();
        let lines = render(&request(&s, CommentStyle::Slashes.delimiters(), None));
        assert_eq!(lines.len(), 11);
        assert!(widths(&lines).iter().all(|w| *w == 80));
    }

    #[test]
    fn slashes_layout_at_eighty_columns() {
        let s = settings();
        let lines = render(&request(&s, CommentStyle::Slashes.delimiters(), Some(80)));

        assert_eq!(lines[0], format!("/* {} */", "*".repeat(74)));
        assert_eq!(lines[1], format!("/* {} */", " ".repeat(74)));
        assert_eq!(lines[2], format!("/* {}{} */", " ".repeat(74 - TITLE_SUFFIX.len()), TITLE_SUFFIX));
        assert!(lines[3].starts_with("/*   main.c "));
        assert!(lines[3].ends_with(&format!("{} */", FILE_SUFFIX)));
        assert!(lines[5].starts_with("/*   By: ada <ada@example.com> "));
        assert!(lines[7].starts_with("/*   Created: 2024/03/01 09:05:00 by ada "));
        assert!(lines[8].starts_with("/*   Updated: 2024/03/02 18:30:59 by ada "));
        assert!(lines[8].ends_with(&format!("{} */", UPDATED_SUFFIX)));
        assert_eq!(lines[9], lines[1]);
        assert_eq!(lines[10], lines[0]);
    }

    #[test]
    fn created_by_override_only_touches_created_line() {
        let s = settings();
        let mut req = request(&s, CommentStyle::Hashes.delimiters(), None);
        req.created_by = Some("bob");
        let lines = render(&req);
        assert!(lines[7].contains("Created: 2024/03/01 09:05:00 by bob "));
        assert!(lines[8].contains("Updated: 2024/03/02 18:30:59 by ada "));
        assert!(lines[5].contains("By: ada <ada@example.com>"));
    }

    #[test]
    fn width_invariant_holds_across_range() {
        let s = settings();
        for style in CommentStyle::ALL {
            for width in [MIN_HEADER_WIDTH, 79, 80, 100, MAX_HEADER_WIDTH] {
                let lines = render(&request(&s, style.delimiters(), Some(width)));
                assert!(
                    widths(&lines).iter().all(|w| *w == width),
                    "{} at {}",
                    style.as_str(),
                    width
                );
            }
        }
    }

    #[test]
    fn out_of_range_widths_are_clamped() {
        let s = settings();
        let d = CommentStyle::Slashes.delimiters();
        let narrow = render(&request(&s, d, Some(10)));
        assert!(widths(&narrow).iter().all(|w| *w == MIN_HEADER_WIDTH));
        let wide = render(&request(&s, d, Some(10_000)));
        assert!(widths(&wide).iter().all(|w| *w == MAX_HEADER_WIDTH));
        let huge = render(&request(&s, d, Some(usize::MAX)));
        assert!(widths(&huge).iter().all(|w| *w == MAX_HEADER_WIDTH));
    }

    #[test]
    fn long_fields_are_truncated_to_width() {
        let s = HeaderSettings::new("a".repeat(120), format!("{}@example.com", "b".repeat(60)));
        let name = format!("{}.c", "very_long_file_name_".repeat(8));
        let mut req = request(&s, CommentStyle::Slashes.delimiters(), Some(80));
        req.file_name = &name;
        let lines = render(&req);
        assert!(widths(&lines).iter().all(|w| *w == 80));
        // The field fills everything left of the suffix, with no padding.
        let field_width = 74 - BY_SUFFIX.len();
        let field = format!("  By: {}", "a".repeat(field_width - 6));
        assert_eq!(lines[5], format!("/* {}{} */", field, BY_SUFFIX));
    }

    #[test]
    fn multibyte_identity_keeps_width_in_chars() {
        let s = HeaderSettings::new("zoë", "zoë@exämple.com");
        let lines = render(&request(&s, CommentStyle::Dashes.delimiters(), Some(80)));
        assert!(widths(&lines).iter().all(|w| *w == 80));
        assert!(lines[5].contains("By: zoë <zoë@exämple.com>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let s = settings();
        let req = request(&s, CommentStyle::Percents.delimiters(), Some(90));
        assert_eq!(render_text(&req), render_text(&req));
        assert_eq!(render_text(&req).lines().count(), 11);
        assert!(!render_text(&req).ends_with('\n'));
    }

    #[test]
    fn sanitize_width_clamps() {
        assert_eq!(sanitize_width(-5), MIN_HEADER_WIDTH);
        assert_eq!(sanitize_width(69), MIN_HEADER_WIDTH);
        assert_eq!(sanitize_width(120), 120);
        assert_eq!(sanitize_width(161), MAX_HEADER_WIDTH);
    }

    #[test]
    fn header_width_prefers_configuration() {
        let s = settings();
        assert_eq!(header_width(&s, "python"), 79);
        assert_eq!(header_width(&s, "c"), 80);
        assert_eq!(header_width(&s.clone().with_width(120), "python"), 120);
        assert_eq!(header_width(&s.with_width(500), "c"), MAX_HEADER_WIDTH);
    }

    #[test]
    fn inner_width_has_floor() {
        let d = CommentStyle::Slashes.delimiters();
        assert_eq!(inner_width(80, d), 74);
        assert_eq!(inner_width(10, d), MIN_INNER_WIDTH);
    }

    #[test]
    fn content_line_suffix_leaves_one_column() {
        let d = CommentStyle::Slashes.delimiters();
        let line = content_line("", &"x".repeat(50), 20, d);
        assert_eq!(line, format!("/*  {} */", "x".repeat(19)));
    }
}
