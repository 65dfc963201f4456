//! Data model for sectioning generated clinical notes.
//!
//! Shared by the parser, the dataset loader, the exporter and the CLI.

pub mod annotation;
pub mod error;
pub mod labels;
pub mod note;
pub mod record;
pub mod session;

pub use annotation::{
    Annotation, EmrField, LIKERT_DEFAULT, LIKERT_ITEMS, LIKERT_MAX, LIKERT_MIN, LIKERT_RUBRIC,
    LikertRubric, LikertScores, Suitability,
};
pub use error::{ModelError, Result};
pub use labels::{
    EXCLUDED_SPELLINGS, ExcludedLabel, PrimaryLabel, SectionLabel, is_excluded_spelling,
};
pub use note::{OtherSection, ParsedNote};
pub use record::NoteRecord;
pub use session::{EvaluationSession, Progress};
