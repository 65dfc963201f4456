//! Section labels found in generated clinical notes.
//!
//! Notes are written with Korean section headings. Each heading maps onto one
//! of three groups:
//!
//! - **Primary**: the six sections always present in parser output
//! - **Excluded**: recognized headings whose content is dropped (diagnosis, plan)
//! - **Other**: any additional heading registered by the caller
//!
//! The `as_str` spelling is the canonical heading used for display and for
//! the export header. Serialized names are snake_case English keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six sections every parsed note carries.
///
/// Declaration order is display order; `Ord` follows it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryLabel {
    /// 주호소
    ChiefComplaint,
    /// 현병력
    PresentIllness,
    /// 과거력
    PastHistory,
    /// 개인력 및 사회력
    PersonalSocialHistory,
    /// 계통문진
    ReviewOfSystems,
    /// 신체검진
    PhysicalExam,
}

impl PrimaryLabel {
    /// All primary labels in display order.
    pub const ALL: [PrimaryLabel; 6] = [
        PrimaryLabel::ChiefComplaint,
        PrimaryLabel::PresentIllness,
        PrimaryLabel::PastHistory,
        PrimaryLabel::PersonalSocialHistory,
        PrimaryLabel::ReviewOfSystems,
        PrimaryLabel::PhysicalExam,
    ];

    /// Canonical heading as written in notes.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryLabel::ChiefComplaint => "주호소",
            PrimaryLabel::PresentIllness => "현병력",
            PrimaryLabel::PastHistory => "과거력",
            PrimaryLabel::PersonalSocialHistory => "개인력 및 사회력",
            PrimaryLabel::ReviewOfSystems => "계통문진",
            PrimaryLabel::PhysicalExam => "신체검진",
        }
    }

    /// English name, used in CLI tables.
    pub fn english_name(&self) -> &'static str {
        match self {
            PrimaryLabel::ChiefComplaint => "Chief complaint",
            PrimaryLabel::PresentIllness => "Present illness",
            PrimaryLabel::PastHistory => "Past history",
            PrimaryLabel::PersonalSocialHistory => "Personal and social history",
            PrimaryLabel::ReviewOfSystems => "Review of systems",
            PrimaryLabel::PhysicalExam => "Physical exam",
        }
    }

    /// Serialized key (`chief_complaint`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            PrimaryLabel::ChiefComplaint => "chief_complaint",
            PrimaryLabel::PresentIllness => "present_illness",
            PrimaryLabel::PastHistory => "past_history",
            PrimaryLabel::PersonalSocialHistory => "personal_social_history",
            PrimaryLabel::ReviewOfSystems => "review_of_systems",
            PrimaryLabel::PhysicalExam => "physical_exam",
        }
    }
}

impl fmt::Display for PrimaryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PrimaryLabel {
    type Err = String;

    /// Accepts the canonical heading or the serialized key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PrimaryLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == trimmed || label.key() == trimmed)
            .ok_or_else(|| format!("Unknown primary label: {s}"))
    }
}

/// Headings that are recognized but never reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcludedLabel {
    /// 진단명
    DiagnosisName,
    /// 진단
    Diagnosis,
    /// 진료 계획 (also written 진료계획)
    CarePlan,
    /// 계획
    Plan,
}

impl ExcludedLabel {
    pub const ALL: [ExcludedLabel; 4] = [
        ExcludedLabel::DiagnosisName,
        ExcludedLabel::Diagnosis,
        ExcludedLabel::CarePlan,
        ExcludedLabel::Plan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExcludedLabel::DiagnosisName => "진단명",
            ExcludedLabel::Diagnosis => "진단",
            ExcludedLabel::CarePlan => "진료 계획",
            ExcludedLabel::Plan => "계획",
        }
    }

    pub fn english_name(&self) -> &'static str {
        match self {
            ExcludedLabel::DiagnosisName => "Diagnosis name",
            ExcludedLabel::Diagnosis => "Diagnosis",
            ExcludedLabel::CarePlan => "Care plan",
            ExcludedLabel::Plan => "Plan",
        }
    }
}

impl fmt::Display for ExcludedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every spelling of an excluded heading, including variants that
/// canonicalize to one of [`ExcludedLabel`].
pub const EXCLUDED_SPELLINGS: &[&str] = &["진단명", "진단", "진료계획", "진료 계획", "계획"];

/// Returns true if `text` is any accepted spelling of an excluded heading.
///
/// Internal whitespace is ignored so `진료  계획` is also excluded.
pub fn is_excluded_spelling(text: &str) -> bool {
    let compact: String = text.chars().filter(|ch| !ch.is_whitespace()).collect();
    EXCLUDED_SPELLINGS
        .iter()
        .any(|spelling| spelling.replace(' ', "") == compact)
}

/// A recognized section heading after synonym canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum SectionLabel {
    Primary(PrimaryLabel),
    Excluded(ExcludedLabel),
    /// Caller-registered heading, stored with its canonical spelling.
    Other(String),
}

impl SectionLabel {
    pub fn as_str(&self) -> &str {
        match self {
            SectionLabel::Primary(label) => label.as_str(),
            SectionLabel::Excluded(label) => label.as_str(),
            SectionLabel::Other(text) => text,
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, SectionLabel::Primary(_))
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, SectionLabel::Excluded(_))
    }

    pub fn primary(&self) -> Option<PrimaryLabel> {
        match self {
            SectionLabel::Primary(label) => Some(*label),
            _ => None,
        }
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<PrimaryLabel> for SectionLabel {
    fn from(label: PrimaryLabel) -> Self {
        SectionLabel::Primary(label)
    }
}

impl From<ExcludedLabel> for SectionLabel {
    fn from(label: ExcludedLabel) -> Self {
        SectionLabel::Excluded(label)
    }
}
