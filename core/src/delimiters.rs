//! # Comment Delimiters
//!
//! The closed set of comment styles a header can be written in, the
//! language → style table, and the line-level checks detection relies on.
//!
//! Every header line is framed by the same pair of tokens, e.g. `/* ` and
//! ` */`. Styles are tried in declaration order when sniffing a line; the
//! first whose start token prefixes the line and whose end token suffixes it
//! wins.

use serde::Serialize;

/// Start and end tokens framing a single header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CommentDelimiters {
    pub start: &'static str,
    pub end: &'static str,
}

impl CommentDelimiters {
    /// Characters taken by both tokens on every line.
    pub fn overhead(&self) -> usize {
        self.start.chars().count() + self.end.chars().count()
    }

    /// Whether `line` is opened by the start token and closed by the end
    /// token without the two overlapping.
    pub fn frames(&self, line: &str) -> bool {
        line.len() >= self.start.len() + self.end.len()
            && line.starts_with(self.start)
            && line.ends_with(self.end)
    }
}

/// Supported comment styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStyle {
    Hashes,
    Slashes,
    Semicolons,
    Parens,
    Dashes,
    Percents,
}

impl CommentStyle {
    /// All styles, in sniffing order.
    pub const ALL: [CommentStyle; 6] = [
        CommentStyle::Hashes,
        CommentStyle::Slashes,
        CommentStyle::Semicolons,
        CommentStyle::Parens,
        CommentStyle::Dashes,
        CommentStyle::Percents,
    ];

    pub const fn delimiters(self) -> CommentDelimiters {
        let (start, end) = match self {
            CommentStyle::Hashes => ("# ", " #"),
            CommentStyle::Slashes => ("/* ", " */"),
            CommentStyle::Semicolons => (";; ", " ;;"),
            CommentStyle::Parens => ("(* ", " *)"),
            CommentStyle::Dashes => ("-- ", " --"),
            CommentStyle::Percents => ("%% ", " %%"),
        };
        CommentDelimiters { start, end }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommentStyle::Hashes => "hashes",
            CommentStyle::Slashes => "slashes",
            CommentStyle::Semicolons => "semicolons",
            CommentStyle::Parens => "parens",
            CommentStyle::Dashes => "dashes",
            CommentStyle::Percents => "percents",
        }
    }

    /// Style whose tokens are exactly `delimiters`.
    pub fn from_delimiters(delimiters: CommentDelimiters) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|style| style.delimiters() == delimiters)
    }
}

/// Style used for languages missing from the table.
pub const DEFAULT_STYLE: CommentStyle = CommentStyle::Slashes;

/// Comment style for an editor language id, case-insensitively.
///
/// Unregistered ids get [`DEFAULT_STYLE`].
pub fn style_for_language(language_id: &str) -> CommentStyle {
    use CommentStyle::*;

    match language_id.to_lowercase().as_str() {
        "c" | "cpp" | "css" | "go" | "groovy" | "jade" | "java" | "javascript"
        | "javascriptreact" | "less" | "objective-c" | "php" | "rust" | "scss" | "swift"
        | "typescript" | "typescriptreact" | "xsl" => Slashes,
        "coffeescript" | "dockerfile" | "makefile" | "perl" | "perl6" | "plaintext"
        | "powershell" | "python" | "r" | "ruby" | "shellscript" | "sql" | "yaml" => Hashes,
        "fsharp" | "ocaml" => Parens,
        "haskell" | "lua" => Dashes,
        "ini" => Semicolons,
        "latex" => Percents,
        _ => DEFAULT_STYLE,
    }
}

pub fn delimiters_for_language(language_id: &str) -> CommentDelimiters {
    style_for_language(language_id).delimiters()
}

/// Find the first known delimiter pair framing `line`.
pub fn sniff_delimiters(line: &str) -> Option<CommentDelimiters> {
    CommentStyle::ALL
        .into_iter()
        .map(CommentStyle::delimiters)
        .find(|delimiters| delimiters.frames(line))
}

/// True when `line` is `start` + one or more `*` + `end`.
pub fn is_border_line(line: &str, delimiters: CommentDelimiters) -> bool {
    if !delimiters.frames(line) {
        return false;
    }
    let inner = &line[delimiters.start.len()..line.len() - delimiters.end.len()];
    !inner.is_empty() && inner.bytes().all(|b| b == b'*')
}
