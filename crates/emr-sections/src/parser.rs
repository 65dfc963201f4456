//! Line-scanning section parser.

use std::collections::BTreeMap;

use emr_model::{OtherSection, ParsedNote, PrimaryLabel, SectionLabel};
use emr_text::normalize;
use tracing::debug;

use crate::table::LabelTable;

const PRESENT_ILLNESS: SectionLabel = SectionLabel::Primary(PrimaryLabel::PresentIllness);

/// Raw lines collected under one label, in encounter order.
#[derive(Debug)]
struct Bucket<'a> {
    label: SectionLabel,
    lines: Vec<&'a str>,
}

/// Split a generated note into sections using the built-in label table.
///
/// ```
/// use emr_model::PrimaryLabel;
/// use emr_sections::parse_sections;
///
/// let note = parse_sections("현병력\n기침 3일\n진단명\nURI");
/// assert_eq!(note.get(PrimaryLabel::PresentIllness), "기침 3일");
/// assert!(note.others().is_empty());
/// ```
pub fn parse_sections(raw: &str) -> ParsedNote {
    LabelTable::standard().parse(raw)
}

impl LabelTable {
    /// Split a generated note into sections.
    ///
    /// Lines after a label line belong to that label; repeated labels
    /// append. Lines before the first label are prepended to present
    /// illness. A note without any label is entirely present illness.
    /// Excluded sections are dropped and empty other sections are skipped.
    pub fn parse(&self, raw: &str) -> ParsedNote {
        let text = normalize(raw);
        if text.is_empty() {
            return ParsedNote::empty();
        }

        let mut prefix: Vec<&str> = Vec::new();
        let mut buckets: Vec<Bucket<'_>> = Vec::new();
        let mut current: Option<usize> = None;
        for line in text.split('\n') {
            if let Some(label) = self.match_line(line) {
                let index = match buckets.iter().position(|bucket| bucket.label == *label) {
                    Some(index) => index,
                    None => {
                        buckets.push(Bucket {
                            label: label.clone(),
                            lines: Vec::new(),
                        });
                        buckets.len() - 1
                    }
                };
                current = Some(index);
                continue;
            }
            match current {
                Some(index) => buckets[index].lines.push(line),
                None => prefix.push(line),
            }
        }

        if buckets.is_empty() {
            debug!("no section labels found, note treated as present illness");
            let primary = BTreeMap::from([(PrimaryLabel::PresentIllness, text.clone())]);
            return ParsedNote::from_parts(primary, Vec::new());
        }

        let prefix = normalize(&prefix.join("\n"));
        let mut primary = BTreeMap::new();
        let mut others = Vec::new();
        let mut excluded = 0usize;
        for bucket in &buckets {
            // The prefix is the first line of present illness, cleaned up together.
            let content = if bucket.label == PRESENT_ILLNESS && !prefix.is_empty() {
                let lines: Vec<&str> = std::iter::once(prefix.as_str())
                    .chain(bucket.lines.iter().copied())
                    .collect();
                normalize(&lines.join("\n"))
            } else {
                normalize(&bucket.lines.join("\n"))
            };
            match &bucket.label {
                SectionLabel::Primary(label) => {
                    primary.insert(*label, content);
                }
                SectionLabel::Excluded(_) => excluded += 1,
                SectionLabel::Other(label) => {
                    if !content.is_empty() {
                        others.push(OtherSection {
                            label: label.clone(),
                            content,
                        });
                    }
                }
            }
        }
        if !prefix.is_empty() && !primary.contains_key(&PrimaryLabel::PresentIllness) {
            primary.insert(PrimaryLabel::PresentIllness, prefix);
        }

        debug!(
            sections = buckets.len(),
            primary = primary.values().filter(|content| !content.is_empty()).count(),
            others = others.len(),
            excluded,
            "parsed note sections"
        );
        ParsedNote::from_parts(primary, others)
    }
}
