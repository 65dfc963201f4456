//! Compiled label table.
//!
//! A label line is a trimmed line consisting of exactly one recognized
//! token, optionally followed by whitespace and a half- or full-width colon.
//! Tokens are tried in table order and the first match wins.

use std::sync::LazyLock;

use emr_model::{ExcludedLabel, PrimaryLabel, SectionLabel, is_excluded_spelling};
use regex::Regex;
use tracing::{debug, warn};

static STANDARD_TABLE: LazyLock<LabelTable> = LazyLock::new(LabelTable::build_standard);

/// Built-in tokens, in matching order. Synonym spellings map onto the
/// canonical label.
const STANDARD_TOKENS: [(&str, SectionLabel); 10] = [
    ("주호소", SectionLabel::Primary(PrimaryLabel::ChiefComplaint)),
    ("현병력", SectionLabel::Primary(PrimaryLabel::PresentIllness)),
    ("과거력", SectionLabel::Primary(PrimaryLabel::PastHistory)),
    (
        r"개인력\s*및\s*사회력",
        SectionLabel::Primary(PrimaryLabel::PersonalSocialHistory),
    ),
    (
        "계통문진|통문진",
        SectionLabel::Primary(PrimaryLabel::ReviewOfSystems),
    ),
    ("신체검진", SectionLabel::Primary(PrimaryLabel::PhysicalExam)),
    ("진단명", SectionLabel::Excluded(ExcludedLabel::DiagnosisName)),
    ("진단", SectionLabel::Excluded(ExcludedLabel::Diagnosis)),
    (r"진료\s*계획", SectionLabel::Excluded(ExcludedLabel::CarePlan)),
    ("계획", SectionLabel::Excluded(ExcludedLabel::Plan)),
];

/// One token of the table and the label it stands for.
#[derive(Debug, Clone)]
pub struct LabelPattern {
    token: String,
    label: SectionLabel,
    regex: Regex,
}

impl LabelPattern {
    /// Compile `token` (a regex fragment) into a whole-line label pattern.
    pub fn new(token: &str, label: SectionLabel) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(r"^(?:{token})\s*[:：]?$"))?;
        Ok(Self {
            token: token.to_string(),
            label,
            regex,
        })
    }

    /// The regex fragment this pattern was built from.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn label(&self) -> &SectionLabel {
        &self.label
    }

    /// Whether an already-trimmed line is this label.
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

/// Ordered label patterns used by the section parser.
///
/// [`LabelTable::standard`] recognizes the six primary headings and the
/// excluded diagnosis/plan headings. Extra headings registered with
/// [`LabelTable::with_other_label`] are reported as other sections.
#[derive(Debug, Clone)]
pub struct LabelTable {
    patterns: Vec<LabelPattern>,
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::standard().clone()
    }
}

impl LabelTable {
    /// The shared built-in table.
    pub fn standard() -> &'static LabelTable {
        &STANDARD_TABLE
    }

    fn build_standard() -> Self {
        let patterns = STANDARD_TOKENS
            .into_iter()
            .map(|(token, label)| {
                LabelPattern::new(token, label).expect("Invalid built-in label regex")
            })
            .collect();
        Self { patterns }
    }

    /// Register an extra heading.
    ///
    /// The token is matched literally, except that any run of whitespace in
    /// it also matches zero or more whitespace characters. Its canonical
    /// spelling (words joined by single spaces) becomes the label text of
    /// the resulting other section. Built-in headings keep precedence.
    ///
    /// ```
    /// use emr_sections::LabelTable;
    ///
    /// let table = LabelTable::default().with_other_label("가족 력").unwrap();
    /// let label = table.match_line("가족력:").unwrap();
    /// assert_eq!(label.as_str(), "가족 력");
    /// ```
    pub fn with_other_label(mut self, token: &str) -> Result<Self, regex::Error> {
        let words: Vec<&str> = token
            .trim()
            .trim_end_matches([':', '：'])
            .split_whitespace()
            .collect();
        if words.is_empty() {
            warn!("ignoring empty extra label");
            return Ok(self);
        }
        let canonical = words.join(" ");
        if is_excluded_spelling(&canonical) {
            warn!(label = %canonical, "extra label is an excluded heading, ignoring");
            return Ok(self);
        }
        if self
            .patterns
            .iter()
            .any(|pattern| pattern.label.as_str() == canonical)
            || self.match_line(&canonical).is_some()
        {
            debug!(label = %canonical, "extra label already registered");
            return Ok(self);
        }
        let fragment = words
            .iter()
            .map(|word| regex::escape(word))
            .collect::<Vec<_>>()
            .join(r"\s*");
        self.patterns
            .push(LabelPattern::new(&fragment, SectionLabel::Other(canonical))?);
        Ok(self)
    }

    pub fn patterns(&self) -> &[LabelPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Label of `line` if the whole (trimmed) line is a recognized heading.
    pub fn match_line(&self, line: &str) -> Option<&SectionLabel> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        self.patterns
            .iter()
            .find(|pattern| pattern.is_match(line))
            .map(LabelPattern::label)
    }
}
