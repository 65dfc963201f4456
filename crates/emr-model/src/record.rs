use serde::{Deserialize, Serialize};

/// One row of an evaluation dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Zero-based position of the row in the source file (after skipping blank rows).
    pub row: usize,
    /// Value of the record identifier column.
    pub record_id: String,
    /// Consultation transcript.
    pub dialogue: String,
    /// Generated note, unparsed.
    pub generated: String,
    /// Visit date/time rendered as `YYYY-MM-DD HH:MM` when it could be parsed.
    pub visit_time: Option<String>,
}
