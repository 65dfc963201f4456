use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::labels::PrimaryLabel;

/// Content of a non-primary, non-excluded section, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherSection {
    pub label: String,
    pub content: String,
}

/// Structured result of sectioning one generated note.
///
/// Every [`PrimaryLabel`] is always present in `primary`; absent sections
/// hold an empty string. Excluded headings never appear in either part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedNote {
    primary: BTreeMap<PrimaryLabel, String>,
    others: Vec<OtherSection>,
}

impl Default for ParsedNote {
    fn default() -> Self {
        Self::empty()
    }
}

impl ParsedNote {
    /// A note with all six primary sections empty and no other sections.
    pub fn empty() -> Self {
        Self {
            primary: PrimaryLabel::ALL
                .into_iter()
                .map(|label| (label, String::new()))
                .collect(),
            others: Vec::new(),
        }
    }

    /// Build a note from whatever primary content was found; missing labels
    /// are filled with empty strings.
    pub fn from_parts(
        mut primary: BTreeMap<PrimaryLabel, String>,
        others: Vec<OtherSection>,
    ) -> Self {
        for label in PrimaryLabel::ALL {
            primary.entry(label).or_default();
        }
        Self { primary, others }
    }

    /// Content of a primary section (empty if the note had none).
    pub fn get(&self, label: PrimaryLabel) -> &str {
        self.primary.get(&label).map(String::as_str).unwrap_or("")
    }

    /// Primary sections in display order.
    pub fn primary(&self) -> impl Iterator<Item = (PrimaryLabel, &str)> {
        self.primary
            .iter()
            .map(|(label, content)| (*label, content.as_str()))
    }

    pub fn others(&self) -> &[OtherSection] {
        &self.others
    }

    /// Number of primary sections with content.
    pub fn filled_count(&self) -> usize {
        self.primary
            .values()
            .filter(|content| !content.is_empty())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0 && self.others.is_empty()
    }
}
