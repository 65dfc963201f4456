//! Dataset loading from CSV files and Excel workbooks.

use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx};
use csv::ReaderBuilder;
use emr_model::NoteRecord;
use tracing::{debug, info, warn};

use crate::encoding::{SourceEncoding, decode_bytes, utf16_bom};
use crate::error::{IngestError, Result};
use crate::visit_time::format_visit_time;

/// Record identifier column.
pub const ID_COLUMN: &str = "구분자";
/// Consultation transcript column.
pub const DIALOGUE_COLUMN: &str = "대화 스크립트";
/// Generated note column.
pub const GENERATED_COLUMN: &str = "생성결과";
/// Optional visit date/time column.
pub const VISIT_TIME_COLUMN: &str = "진료일시";

/// Columns every dataset must carry.
pub const REQUIRED_COLUMNS: [&str; 3] = [ID_COLUMN, DIALOGUE_COLUMN, GENERATED_COLUMN];

/// File formats a dataset can be loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    /// First worksheet of an `.xlsx`/`.xlsm` workbook.
    Xlsx,
}

impl DatasetFormat {
    /// Pick the format from the file extension; anything that is not a
    /// workbook is read as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("xlsx" | "xlsm") => DatasetFormat::Xlsx,
            _ => DatasetFormat::Csv,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetFormat::Csv => "CSV",
            DatasetFormat::Xlsx => "XLSX",
        }
    }
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A loaded evaluation dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub path: PathBuf,
    pub format: DatasetFormat,
    /// Text encoding of a CSV source; workbooks always report UTF-8.
    pub encoding: SourceEncoding,
    /// Normalized header names in file order.
    pub columns: Vec<String>,
    pub records: Vec<NoteRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_visit_time(&self) -> bool {
        self.columns.iter().any(|column| column == VISIT_TIME_COLUMN)
    }

    pub fn into_records(self) -> Vec<NoteRecord> {
        self.records
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Column positions resolved from the header row.
struct ColumnIndex {
    id: usize,
    dialogue: usize,
    generated: usize,
    visit_time: Option<usize>,
}

impl ColumnIndex {
    fn resolve(columns: &[String], path: &Path) -> Result<Self> {
        let position = |name: &str| columns.iter().position(|column| column == name);
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| position(**name).is_none())
            .map(|name| (*name).to_string())
            .collect();
        let (Some(id), Some(dialogue), Some(generated)) = (
            position(ID_COLUMN),
            position(DIALOGUE_COLUMN),
            position(GENERATED_COLUMN),
        ) else {
            return Err(IngestError::MissingColumns {
                path: path.to_path_buf(),
                missing,
                found: columns.to_vec(),
            });
        };
        Ok(Self {
            id,
            dialogue,
            generated,
            visit_time: position(VISIT_TIME_COLUMN),
        })
    }
}

/// Load an evaluation dataset.
///
/// `.xlsx`/`.xlsm` files are read as workbooks, everything else as CSV.
/// See [`parse_dataset`] for the row rules shared by both.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    match DatasetFormat::from_path(path) {
        DatasetFormat::Csv => parse_dataset(&bytes, path),
        DatasetFormat::Xlsx => parse_workbook(&bytes, path),
    }
}

/// Parse CSV dataset bytes; `path` is only used for reporting.
///
/// The first non-empty row is the header. Header names are trimmed and
/// inner whitespace is collapsed. Rows whose cells are all empty are
/// skipped and short rows are padded with empty cells.
pub fn parse_dataset(bytes: &[u8], path: &Path) -> Result<Dataset> {
    if let Some(encoding) = utf16_bom(bytes) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding,
        });
    }
    let (text, encoding) = decode_bytes(bytes);
    debug!(path = %path.display(), %encoding, "decoded dataset");

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let rows = reader.records().map(|record| {
        record
            .map(|record| record.iter().map(str::to_string).collect())
            .map_err(|source| IngestError::CsvParse {
                path: path.to_path_buf(),
                source,
            })
    });
    collect_dataset(rows, path, DatasetFormat::Csv, encoding)
}

/// Parse the first worksheet of an Excel workbook.
///
/// Cells are converted to text: numbers use their shortest display form
/// and date cells become `YYYY-MM-DD HH:MM:SS`. Row rules match
/// [`parse_dataset`].
pub fn parse_workbook(bytes: &[u8], path: &Path) -> Result<Dataset> {
    let excel_error = |source| IngestError::ExcelParse {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(excel_error)?;
    let Some(range) = workbook.worksheet_range_at(0) else {
        return Err(IngestError::EmptyDataset {
            path: path.to_path_buf(),
        });
    };
    let range = range.map_err(excel_error)?;
    debug!(path = %path.display(), rows = range.height(), "read worksheet");
    let rows = range
        .rows()
        .map(|row| Ok(row.iter().map(cell_text).collect::<Vec<_>>()));
    collect_dataset(rows, path, DatasetFormat::Xlsx, SourceEncoding::Utf8)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
        Data::DateTime(value) => value.as_datetime().map_or_else(
            || value.as_f64().to_string(),
            |datetime| datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        ),
        other => other.to_string(),
    }
}

/// Header detection and record building shared by every format.
fn collect_dataset<I>(
    mut rows: I,
    path: &Path,
    format: DatasetFormat,
    encoding: SourceEncoding,
) -> Result<Dataset>
where
    I: Iterator<Item = Result<Vec<String>>>,
{
    let columns: Vec<String> = loop {
        let Some(row) = rows.next() else {
            return Err(IngestError::EmptyDataset {
                path: path.to_path_buf(),
            });
        };
        let row = row?;
        if row.iter().all(|value| normalize_cell(value).is_empty()) {
            continue;
        }
        break row.iter().map(|value| normalize_header(value)).collect();
    };
    let index = ColumnIndex::resolve(&columns, path)?;

    let mut records = Vec::new();
    for row in rows {
        let row: Vec<String> = row?.iter().map(|value| normalize_cell(value)).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        let cell = |idx: usize| row.get(idx).cloned().unwrap_or_default();
        records.push(NoteRecord {
            row: records.len(),
            record_id: cell(index.id),
            dialogue: cell(index.dialogue),
            generated: cell(index.generated),
            visit_time: index
                .visit_time
                .and_then(|idx| row.get(idx))
                .and_then(|value| format_visit_time(value)),
        });
    }

    if records.is_empty() {
        warn!(path = %path.display(), "dataset has a header but no records");
    }
    info!(
        path = %path.display(),
        records = records.len(),
        %format,
        %encoding,
        "loaded dataset"
    );
    Ok(Dataset {
        path: path.to_path_buf(),
        format,
        encoding,
        columns,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Dataset> {
        parse_dataset(text.as_bytes(), Path::new("notes.csv"))
    }

    #[test]
    fn test_header_normalization() {
        assert_eq!(normalize_header("\u{feff} 대화   스크립트 "), "대화 스크립트");
        assert_eq!(normalize_cell("  A001 "), "A001");
    }

    #[test]
    fn test_basic_rows() {
        let dataset = parse(
            "구분자,대화 스크립트,생성결과\nA001,\"참석자1: 안녕하세요\",\"현병력\n기침\"\n,,\nA002,대화,노트\n",
        )
        .unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[0].record_id, "A001");
        assert_eq!(dataset.records[0].generated, "현병력\n기침");
        assert_eq!(dataset.records[1].row, 1);
        assert_eq!(dataset.records[1].visit_time, None);
        assert!(!dataset.has_visit_time());
    }

    #[test]
    fn test_columns_in_any_order_with_extras() {
        let dataset = parse(
            " 생성결과 ,비고,구분자,진료일시,대화 스크립트\n노트,x,B7,2024-01-02 08:15:00,대화\n",
        )
        .unwrap();
        let record = &dataset.records[0];
        assert_eq!(record.record_id, "B7");
        assert_eq!(record.generated, "노트");
        assert_eq!(record.dialogue, "대화");
        assert_eq!(record.visit_time.as_deref(), Some("2024-01-02 08:15"));
        assert!(dataset.has_visit_time());
    }

    #[test]
    fn test_short_rows_padded() {
        let dataset = parse("구분자,대화 스크립트,생성결과\nA001\n").unwrap();
        assert_eq!(dataset.records[0].dialogue, "");
        assert_eq!(dataset.records[0].generated, "");
    }

    #[test]
    fn test_missing_columns() {
        let err = parse("구분자,생성결과\nA001,노트\n").unwrap_err();
        match err {
            IngestError::MissingColumns { missing, found, .. } => {
                assert_eq!(missing, vec!["대화 스크립트".to_string()]);
                assert_eq!(found, vec!["구분자".to_string(), "생성결과".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse(""), Err(IngestError::EmptyDataset { .. })));
        assert!(matches!(parse("\n,,\n"), Err(IngestError::EmptyDataset { .. })));
    }

    #[test]
    fn test_utf16_rejected() {
        let err = parse_dataset(&[0xFF, 0xFE, 0x41, 0x00], Path::new("notes.csv")).unwrap_err();
        assert_eq!(err.to_string(), "unsupported encoding UTF-16 LE in notes.csv");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DatasetFormat::from_path(Path::new("notes.XLSX")), DatasetFormat::Xlsx);
        assert_eq!(DatasetFormat::from_path(Path::new("notes.xlsm")), DatasetFormat::Xlsx);
        assert_eq!(DatasetFormat::from_path(Path::new("notes.csv")), DatasetFormat::Csv);
        assert_eq!(DatasetFormat::from_path(Path::new("notes")), DatasetFormat::Csv);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::Float(1001.0)), "1001");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::String("현병력".to_string())), "현병력");
    }

    #[test]
    fn test_invalid_workbook() {
        let err = parse_workbook(b"not a zip", Path::new("notes.xlsx")).unwrap_err();
        assert!(matches!(err, IngestError::ExcelParse { .. }));
    }

    #[test]
    fn test_header_only() {
        let dataset = parse("구분자,대화 스크립트,생성결과\n").unwrap();
        assert!(dataset.is_empty());
    }
}
