//! Consultation transcript formatting.

use std::sync::LazyLock;

use regex::Regex;

/// Speaker markers `참석자1` .. `참석자5`, optionally followed by a colon.
static SPEAKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(참석자[1-5])\s*[:：]?").expect("Invalid speaker regex"));

/// Start a new paragraph at every speaker marker, bold the speaker and turn
/// every line break into a Markdown hard break.
///
/// ```
/// use emr_text::format_dialogue;
///
/// assert_eq!(
///     format_dialogue("참석자1: 어디가 불편하세요? 참석자2 기침이요"),
///     "  \n  \n**참석자1**:  어디가 불편하세요?   \n  \n**참석자2**: 기침이요"
/// );
/// ```
pub fn format_dialogue(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    SPEAKER_REGEX
        .replace_all(text, "\n\n**${1}**: ")
        .replace('\n', "  \n")
}
