//! # Languages
//!
//! Editor language identifiers and the per-language facts the header
//! engine needs: which id a file on disk maps to, the default header
//! width, and whether the first line may be an interpreter directive.
//!
//! Ids follow the editor naming (`shellscript`, `objective-c`, …) so that
//! documents coming from an editor and files read from disk resolve to the
//! same comment style.

use std::path::Path;

use crate::constants::{DEFAULT_HEADER_WIDTH, NARROW_HEADER_WIDTH};

/// Language id given to files whose name matches nothing below.
pub const FALLBACK_LANGUAGE_ID: &str = "plaintext";

/// Languages whose scripts may start with `#!`.
const INTERPRETER_DIRECTIVE_LANGUAGES: &[&str] = &[
    "javascript",
    "lua",
    "perl",
    "perl6",
    "php",
    "python",
    "r",
    "ruby",
    "shellscript",
    "typescript",
];

/// Map a file path to an editor language id.
///
/// Well-known file names are checked before extensions. Returns `None`
/// when neither is recognized.
pub fn language_id_for_path(path: &Path) -> Option<&'static str> {
    let file_name = path.file_name()?.to_str()?;
    match file_name {
        "Makefile" | "makefile" | "GNUmakefile" => return Some("makefile"),
        "Dockerfile" | "Containerfile" => return Some("dockerfile"),
        _ => {}
    }
    if file_name.starts_with("Dockerfile.") {
        return Some("dockerfile");
    }

    let ext = path.extension()?.to_str()?.to_lowercase();
    let id = match ext.as_str() {
        "c" | "h" => "c",
        "cc" | "cpp" | "cxx" | "hh" | "hpp" | "hxx" => "cpp",
        "coffee" => "coffeescript",
        "css" => "css",
        "fs" | "fsi" | "fsx" => "fsharp",
        "go" => "go",
        "groovy" | "gradle" => "groovy",
        "hs" | "lhs" => "haskell",
        "ini" | "cfg" => "ini",
        "jade" | "pug" => "jade",
        "java" => "java",
        "js" | "mjs" | "cjs" => "javascript",
        "jsx" => "javascriptreact",
        "tex" | "sty" | "cls" => "latex",
        "less" => "less",
        "lua" => "lua",
        "mk" => "makefile",
        "m" => "objective-c",
        "ml" | "mli" => "ocaml",
        "pl" | "pm" => "perl",
        "p6" | "pm6" | "raku" => "perl6",
        "php" => "php",
        "txt" => "plaintext",
        "ps1" | "psm1" => "powershell",
        "py" | "pyw" => "python",
        "r" => "r",
        "rb" => "ruby",
        "rs" => "rust",
        "scss" => "scss",
        "sh" | "bash" | "zsh" => "shellscript",
        "sql" => "sql",
        "swift" => "swift",
        "ts" | "mts" | "cts" => "typescript",
        "tsx" => "typescriptreact",
        "xsl" | "xslt" => "xsl",
        "yaml" | "yml" => "yaml",
        _ => return None,
    };
    Some(id)
}

/// Total header width used for a language when none is configured.
pub fn default_header_width(language_id: &str) -> usize {
    match language_id.to_lowercase().as_str() {
        "python" => NARROW_HEADER_WIDTH,
        _ => DEFAULT_HEADER_WIDTH,
    }
}

/// Whether documents of this language may open with a `#!` line.
pub fn uses_interpreter_directive(language_id: &str) -> bool {
    let id = language_id.to_lowercase();
    INTERPRETER_DIRECTIVE_LANGUAGES.contains(&id.as_str())
}

/// Whether the C function counter applies to this document.
pub fn is_c_file(language_id: &str, path: &str) -> bool {
    if language_id == "c" {
        return true;
    }
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("c"))
}
