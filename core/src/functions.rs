//! # C Function Counter
//!
//! Heuristic count of function definitions in a C translation unit, used
//! to warn when a file holds more functions than the house style allows.
//!
//! Comments and literals are blanked out first. Every `{` at brace depth
//! zero then closes a candidate declaration, which counts as a function
//! definition when it looks like `<prefix> name(...) {`.

/// Files with more definitions than this get a warning.
pub const FUNCTION_WARNING_THRESHOLD: usize = 5;

const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch"];

/// Result of counting one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionCount {
    pub count: usize,
    pub over_limit: bool,
}

impl FunctionCount {
    pub fn of(content: &str) -> Self {
        let count = count_functions(content);
        Self {
            count,
            over_limit: count > FUNCTION_WARNING_THRESHOLD,
        }
    }

    /// Short status text, e.g. `Functions: 3`.
    pub fn label(&self) -> String {
        format!("Functions: {}", self.count)
    }
}

pub fn count_functions(content: &str) -> usize {
    let text: Vec<char> = strip_comments_and_strings(content).chars().collect();
    let mut count = 0;
    let mut depth = 0usize;
    let mut declaration_start = 0;

    for (index, ch) in text.iter().enumerate() {
        match ch {
            '{' => {
                if depth == 0 {
                    let candidate: String = text[declaration_start..=index].iter().collect();
                    if is_function_definition(&candidate) {
                        count += 1;
                    }
                    declaration_start = index + 1;
                }
                depth += 1;
            }
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    declaration_start = index + 1;
                }
            }
            ';' if depth == 0 => declaration_start = index + 1,
            _ => {}
        }
    }

    count
}

fn is_function_definition(candidate: &str) -> bool {
    let declaration = candidate.trim();
    if !declaration.ends_with('{') || declaration.starts_with("typedef") {
        return false;
    }

    let without_brace: Vec<char> = declaration[..declaration.len() - 1]
        .trim()
        .chars()
        .collect();
    if without_brace.last() != Some(&')') {
        return false;
    }

    let Some(open_paren) = find_matching_open_paren(&without_brace, without_brace.len() - 1)
    else {
        return false;
    };
    let Some(name_end) = skip_whitespace_backward(&without_brace, open_paren) else {
        return false;
    };

    let mut name_start = name_end + 1;
    while name_start > 0 && is_ident_char(without_brace[name_start - 1]) {
        name_start -= 1;
    }

    let name: String = without_brace[name_start..=name_end].iter().collect();
    if name.is_empty() || !is_ident_char(without_brace[name_end]) {
        return false;
    }
    if CONTROL_KEYWORDS.contains(&name.as_str()) {
        return false;
    }

    let prefix: String = without_brace[..name_start].iter().collect();
    let prefix = prefix.trim();
    !prefix.is_empty() && !prefix.contains('=')
}

fn find_matching_open_paren(text: &[char], close_index: usize) -> Option<usize> {
    let mut depth = 0i32;
    for index in (0..=close_index).rev() {
        match text[index] {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Index of the last non-whitespace char strictly before `before`.
fn skip_whitespace_backward(text: &[char], before: usize) -> Option<usize> {
    (0..before).rev().find(|&index| !text[index].is_whitespace())
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    LineComment,
    BlockComment,
    Str,
    Char,
}

/// Replace comments and string/char literals with spaces, keeping
/// newlines so positions stay meaningful.
pub fn strip_comments_and_strings(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let mut result = String::with_capacity(content.len());
    let mut state = ScanState::Code;
    let mut escaped = false;
    let mut index = 0;

    while index < chars.len() {
        let ch = chars[index];
        let next = chars.get(index + 1).copied();

        match state {
            ScanState::Code => match (ch, next) {
                ('/', Some('/')) => {
                    state = ScanState::LineComment;
                    result.push_str("  ");
                    index += 1;
                }
                ('/', Some('*')) => {
                    state = ScanState::BlockComment;
                    result.push_str("  ");
                    index += 1;
                }
                ('"', _) => {
                    state = ScanState::Str;
                    escaped = false;
                    result.push(' ');
                }
                ('\'', _) => {
                    state = ScanState::Char;
                    escaped = false;
                    result.push(' ');
                }
                _ => result.push(ch),
            },
            ScanState::LineComment => {
                if ch == '\n' {
                    state = ScanState::Code;
                    result.push('\n');
                } else {
                    result.push(' ');
                }
            }
            ScanState::BlockComment => {
                if ch == '*' && next == Some('/') {
                    state = ScanState::Code;
                    result.push_str("  ");
                    index += 1;
                } else if ch == '\n' {
                    result.push('\n');
                } else {
                    result.push(' ');
                }
            }
            ScanState::Str | ScanState::Char => {
                let quote = if state == ScanState::Str { '"' } else { '\'' };
                if !escaped && ch == quote {
                    state = ScanState::Code;
                }
                escaped = !escaped && ch == '\\';
                result.push(if ch == '\n' { '\n' } else { ' ' });
            }
        }
        index += 1;
    }

    result
}
