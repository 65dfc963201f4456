//! Review-of-systems formatting.
//!
//! The 계통문진 section is usually a list of `System: +` / `System: -` pairs
//! separated by commas or semicolons. Recognized pairs are emitted one per
//! line without a bullet prefix; anything else is treated as ordinary
//! bullet text.

use std::sync::LazyLock;

use regex::Regex;

use crate::bullets::{normalize_dash_bullets, strip_leading_glyph};
use crate::normalize::normalize;

/// Semicolons and CJK comma-like separators.
static SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[;，、]+").expect("Invalid ROS separator regex"));

static COMMA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("Invalid ROS comma regex"));

/// `<name>: <sign>` anchored at both ends of a fragment.
static SIGN_PAIR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z가-힣/\s]+?)\s*[:：]\s*([+-])$").expect("Invalid ROS pair regex")
});

static WHITESPACE_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Format review-of-systems content as `Name: sign` lines.
///
/// ```
/// use emr_text::format_review_of_systems;
///
/// assert_eq!(
///     format_review_of_systems("Cough: +, Fever: -; Headache: +"),
///     "Cough: +\nFever: -\nHeadache: +"
/// );
/// ```
pub fn format_review_of_systems(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let normalized = normalize(text);
    let separated = SEPARATOR_REGEX.replace_all(&normalized, "\n");
    let mut pairs = Vec::new();
    for line in separated
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
    {
        let line = strip_leading_glyph(line).unwrap_or(line).trim();
        for fragment in COMMA_REGEX.split(line) {
            if let Some(pair) = parse_sign_pair(fragment.trim()) {
                pairs.push(pair);
            }
        }
    }
    if pairs.is_empty() {
        return normalize_dash_bullets(text);
    }
    pairs.join("\n")
}

fn parse_sign_pair(fragment: &str) -> Option<String> {
    let caps = SIGN_PAIR_REGEX.captures(fragment)?;
    let name = WHITESPACE_RUN_REGEX.replace_all(&caps[1], " ");
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(format!("{name}: {}", &caps[2]))
}
