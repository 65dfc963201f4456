//! Evaluation dataset ingestion.
//!
//! Datasets are CSV files or Excel workbooks with one generated note per
//! row. CSV files exported from Korean spreadsheet tools are often CP949
//! encoded, so decoding falls back to EUC-KR when the bytes are not UTF-8.

pub mod dataset;
pub mod encoding;
pub mod error;
pub mod visit_time;

pub use dataset::{
    DIALOGUE_COLUMN, Dataset, DatasetFormat, GENERATED_COLUMN, ID_COLUMN, REQUIRED_COLUMNS,
    VISIT_TIME_COLUMN, parse_dataset, parse_workbook, read_dataset,
};
pub use encoding::{SourceEncoding, decode_bytes, utf16_bom};
pub use error::{IngestError, Result};
pub use visit_time::{VISIT_TIME_FORMAT, format_visit_time};
