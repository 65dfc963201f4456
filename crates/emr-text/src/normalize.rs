//! Basic cleanup applied to every piece of generated text.

use std::sync::LazyLock;

use regex::Regex;

/// Three or more consecutive line breaks.
static BLANK_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("Invalid blank-line regex"));

const ZERO_WIDTH_SPACE: char = '\u{200b}';
const BYTE_ORDER_MARK: char = '\u{feff}';
const NO_BREAK_SPACE: char = '\u{00a0}';

/// Canonicalize raw note text.
///
/// - zero-width characters are removed and NBSP becomes a space
/// - literal `\n` and `/n` sequences become line breaks
/// - CR+LF and bare CR become LF
/// - every line is trimmed
/// - runs of blank lines collapse to a single blank line
/// - the whole result is trimmed
///
/// Character cleanup runs first so that `normalize(normalize(s)) == normalize(s)`
/// holds for every input.
///
/// # Example
/// ```
/// use emr_text::normalize;
///
/// assert_eq!(normalize("  a \\n\r\n\r\n\r\nb\u{a0} "), "a\n\nb");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let cleaned: String = raw
        .chars()
        .filter(|ch| *ch != ZERO_WIDTH_SPACE && *ch != BYTE_ORDER_MARK)
        .map(|ch| if ch == NO_BREAK_SPACE { ' ' } else { ch })
        .collect();
    let unescaped = cleaned.replace("\\n", "\n").replace("/n", "\n");
    let unified = unescaped.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed_lines = unified
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");
    BLANK_RUN_REGEX
        .replace_all(&trimmed_lines, "\n\n")
        .trim()
        .to_string()
}
