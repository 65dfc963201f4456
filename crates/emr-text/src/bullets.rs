//! Bullet reformatting.
//!
//! Generated notes mix bullet glyphs (`-`, `•`, `●`, ...) with run-on prose
//! where bullets appear mid-paragraph. Everything is rewritten to one
//! `- item.` line per bullet.
//!
//! Two strategies exist:
//!
//! - [`normalize_dash_bullets`]: line-oriented, for text whose items already
//!   sit on their own lines
//! - [`apply_bullet_newline`]: splits run-on prose at bullet glyphs that
//!   follow a sentence end or sit between single spaces
//!
//! [`reformat_bullets`] picks between them.

use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::normalize;

/// Characters recognized as list markers.
pub const BULLET_GLYPHS: [char; 11] = ['-', '–', '—', '•', '·', '∙', '◦', '*', '●', '○', '◉'];

/// Characters accepted as the end of an item.
pub const TERMINAL_PUNCTUATION: [char; 5] = ['.', '!', '?', '…', ')'];

/// A glyph at the start of a line plus any whitespace after it.
static LINE_START_GLYPH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[\-–—•·∙◦*●○◉]\s*").expect("Invalid line-start glyph regex")
});

const ITEM_BREAK: &str = "\n- ";

pub fn is_bullet_glyph(ch: char) -> bool {
    BULLET_GLYPHS.contains(&ch)
}

/// Strip one leading glyph and the whitespace after it.
///
/// Returns `None` when `line` does not start with a glyph.
pub fn strip_leading_glyph(line: &str) -> Option<&str> {
    let first = line.chars().next()?;
    if !is_bullet_glyph(first) {
        return None;
    }
    Some(line[first.len_utf8()..].trim_start())
}

/// Append a period unless the item already ends in terminal punctuation.
pub fn ensure_terminal_punctuation(item: &str) -> String {
    if item.ends_with(TERMINAL_PUNCTUATION) {
        item.to_string()
    } else {
        format!("{item}.")
    }
}

fn bullet_line(item: &str) -> String {
    format!("- {}", ensure_terminal_punctuation(item))
}

/// Rewrite text whose items are already one per line.
///
/// Every non-empty line loses its leading glyph (if any), gets terminal
/// punctuation and is prefixed with `- `. When no line survives and no glyph
/// was seen, the run-on strategy gets a chance; otherwise the result is empty.
///
/// ```
/// use emr_text::normalize_dash_bullets;
///
/// assert_eq!(normalize_dash_bullets("• fever\n* cough!"), "- fever.\n- cough!");
/// ```
pub fn normalize_dash_bullets(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let normalized = normalize(text);
    let mut out = Vec::new();
    let mut had_bullet = false;
    for line in normalized.split('\n').filter(|line| !line.trim().is_empty()) {
        let body = match strip_leading_glyph(line) {
            Some(rest) => {
                had_bullet = true;
                rest.trim()
            }
            None => line.trim(),
        };
        // A bare glyph line carries no item.
        if body.is_empty() {
            continue;
        }
        out.push(bullet_line(body));
    }
    if !out.is_empty() {
        return out.join("\n");
    }
    if !had_bullet {
        return apply_bullet_newline(text);
    }
    String::new()
}

/// Split run-on prose into bullet items.
///
/// A glyph becomes an item break when it follows the start of the text, a
/// line break or terminal punctuation (whitespace allowed in between) and is
/// followed by whitespace and more text, or when it sits between single
/// whitespace characters mid-line. Text before the first marker is not an
/// item. If no item is found the normalized text is returned unchanged.
///
/// ```
/// use emr_text::apply_bullet_newline;
///
/// assert_eq!(
///     apply_bullet_newline("- cough for 3 days. - no fever"),
///     "- cough for 3 days.\n- no fever."
/// );
/// assert_eq!(apply_bullet_newline("well-known plain text"), "well-known plain text");
/// ```
pub fn apply_bullet_newline(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let marked = mark_run_on_items(&normalize(text));
    let split = split_items(&marked);
    if split.items.is_empty() {
        return marked.trim().to_string();
    }
    split
        .items
        .iter()
        .map(|item| bullet_line(item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reformat any section body into `- item.` lines.
///
/// Text with line-initial glyphs goes through [`normalize_dash_bullets`].
/// Otherwise run-on bullet markers are split out (keeping any text before
/// the first marker as its own item), and plain prose becomes one item per
/// line. Returns an empty string only when no content survives.
pub fn reformat_bullets(text: &str) -> String {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return String::new();
    }
    let has_line_glyph = normalized
        .split('\n')
        .any(|line| line.starts_with(BULLET_GLYPHS));
    if has_line_glyph {
        return normalize_dash_bullets(text);
    }
    let marked = mark_run_on_items(&normalized);
    let split = split_items(&marked);
    if split.items.is_empty() {
        return normalize_dash_bullets(text);
    }
    split
        .lead
        .iter()
        .map(String::as_str)
        .chain(split.items.iter().map(String::as_str))
        .map(bullet_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Apply the three marker rewrites to normalized text.
fn mark_run_on_items(normalized: &str) -> String {
    let chars: Vec<char> = normalized.chars().collect();
    let after_sentence = break_after_sentence_ends(&chars);
    let chars: Vec<char> = after_sentence.chars().collect();
    let inline = break_inline_markers(&chars);
    LINE_START_GLYPH_REGEX
        .replace_all(&inline, "- ")
        .into_owned()
}

/// `\s*<glyph>\s+` followed by text, at text start, after `\n` or after
/// terminal punctuation, becomes `\n- `.
fn break_after_sentence_ends(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len() + 16);
    let mut idx = 0;
    while idx < chars.len() {
        if is_item_boundary(chars, idx)
            && let Some(end) = marker_end(chars, idx)
        {
            out.push_str(ITEM_BREAK);
            idx = end;
            continue;
        }
        out.push(chars[idx]);
        idx += 1;
    }
    out
}

fn is_item_boundary(chars: &[char], idx: usize) -> bool {
    if idx == 0 {
        return true;
    }
    let prev = chars[idx - 1];
    prev == '\n' || TERMINAL_PUNCTUATION.contains(&prev)
}

/// End of a `\s*<glyph>\s+` marker starting at `start`, provided text follows it.
fn marker_end(chars: &[char], start: usize) -> Option<usize> {
    let mut idx = start;
    while idx < chars.len() && chars[idx].is_whitespace() {
        idx += 1;
    }
    if idx >= chars.len() || !is_bullet_glyph(chars[idx]) {
        return None;
    }
    idx += 1;
    let gap_start = idx;
    while idx < chars.len() && chars[idx].is_whitespace() {
        idx += 1;
    }
    if idx == gap_start || idx >= chars.len() {
        return None;
    }
    Some(idx)
}

/// ` <glyph> ` (one whitespace character on each side) becomes `\n- `.
fn break_inline_markers(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len() + 16);
    let mut idx = 0;
    while idx < chars.len() {
        if idx + 2 < chars.len()
            && chars[idx].is_whitespace()
            && is_bullet_glyph(chars[idx + 1])
            && chars[idx + 2].is_whitespace()
        {
            out.push_str(ITEM_BREAK);
            idx += 3;
            continue;
        }
        out.push(chars[idx]);
        idx += 1;
    }
    out
}

#[derive(Debug, Default)]
struct SplitItems {
    /// Text before the first marker.
    lead: Option<String>,
    items: Vec<String>,
}

/// Collect items that start at a line-initial `-` and run until the next
/// `\n- ` or the end of the text.
fn split_items(marked: &str) -> SplitItems {
    let first_dash = if marked.starts_with('-') {
        Some(0)
    } else {
        marked.find("\n-").map(|pos| pos + 1)
    };
    let Some(mut dash) = first_dash else {
        return SplitItems::default();
    };

    let lead = marked[..dash].trim();
    let mut split = SplitItems {
        lead: (!lead.is_empty()).then(|| lead.to_string()),
        items: Vec::new(),
    };
    loop {
        let body_start = dash + 1;
        let body = marked[body_start..].trim_start();
        if body.is_empty() {
            break;
        }
        let content_start = marked.len() - body.len();
        let end = marked[content_start..]
            .find(ITEM_BREAK)
            .map_or(marked.len(), |pos| content_start + pos);
        let item = marked[content_start..end].trim();
        if !item.is_empty() {
            split.items.push(item.to_string());
        }
        if end >= marked.len() {
            break;
        }
        dash = end + 1;
    }
    split
}
