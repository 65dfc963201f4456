//! Error types for dataset ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading an evaluation dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Dataset file not found.
    #[error("dataset file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File uses an encoding that cannot be decoded.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// Malformed CSV content.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Malformed or unreadable Excel workbook.
    #[error("failed to read workbook {path}: {source}")]
    ExcelParse {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    /// No header row (every row is empty, or the workbook has no sheet).
    #[error("dataset is empty: {path}")]
    EmptyDataset { path: PathBuf },

    /// One or more required columns are absent.
    #[error(
        "missing required columns in {path}: {} (found: {})",
        .missing.join(", "),
        .found.join(", ")
    )]
    MissingColumns {
        path: PathBuf,
        missing: Vec<String>,
        found: Vec<String>,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
