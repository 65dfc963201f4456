//! Result table export.
//!
//! Only saved records are exported, in row order, each with a new sequential
//! identifier (`E001`, `E002`, ...).

use std::fs;
use std::io::Write;
use std::path::Path;

use emr_model::{EmrField, EvaluationSession, LIKERT_ITEMS};
use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::error::{OutputError, Result};

pub const NEW_ID_COLUMN: &str = "새_구분자";
pub const ORIGINAL_ID_COLUMN: &str = "원_구분자";
/// Worksheet name used for workbook exports.
pub const RESULTS_SHEET: &str = "results";

/// Export file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// `.xlsx` writes a workbook; every other extension writes CSV.
    pub fn from_path(path: &Path) -> Self {
        let is_xlsx = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
        if is_xlsx {
            ExportFormat::Xlsx
        } else {
            ExportFormat::Csv
        }
    }
}

/// Header of the export table.
pub fn export_columns() -> Vec<String> {
    let mut columns = vec![NEW_ID_COLUMN.to_string(), ORIGINAL_ID_COLUMN.to_string()];
    columns.extend((1..=LIKERT_ITEMS.len()).map(|item| format!("리커트_{item}_점수")));
    columns.extend(EmrField::ALL.iter().map(|field| field.as_str().to_string()));
    columns
}

/// Sequential identifier for the `n`th exported record (1-based).
pub fn new_record_id(n: usize) -> String {
    format!("E{n:03}")
}

/// One line of the export table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub new_id: String,
    pub original_id: String,
    pub likert: [u8; 5],
    /// Reference EMR text in [`EmrField::ALL`] order.
    pub emr: Vec<String>,
}

impl ExportRow {
    fn to_record(&self) -> Vec<String> {
        let mut record = Vec::with_capacity(2 + self.likert.len() + self.emr.len());
        record.push(self.new_id.clone());
        record.push(self.original_id.clone());
        record.extend(self.likert.iter().map(u8::to_string));
        record.extend(self.emr.iter().cloned());
        record
    }
}

/// Rows for every saved record, numbered in row order.
pub fn build_export_rows(session: &EvaluationSession) -> Vec<ExportRow> {
    session
        .records()
        .iter()
        .enumerate()
        .filter_map(|(row, record)| {
            let answer = session.answer(row).filter(|answer| answer.saved)?;
            Some((record, answer))
        })
        .enumerate()
        .map(|(n, (record, answer))| ExportRow {
            new_id: new_record_id(n + 1),
            original_id: record.record_id.clone(),
            likert: answer.likert.as_array(),
            emr: EmrField::ALL
                .iter()
                .map(|field| answer.emr_text(*field).to_string())
                .collect(),
        })
        .collect()
}

/// Fail unless every record has been saved.
pub fn ensure_complete(session: &EvaluationSession) -> Result<()> {
    if session.is_complete() {
        return Ok(());
    }
    let progress = session.progress();
    Err(OutputError::Incomplete {
        done: progress.done,
        total: progress.total,
    })
}

/// Write the export table; the header is written even when `rows` is empty.
///
/// `path` is only used for error reporting.
pub fn write_export<W: Write>(writer: W, rows: &[ExportRow], path: &Path) -> Result<()> {
    let csv_error = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(export_columns()).map_err(csv_error)?;
    for row in rows {
        writer.write_record(row.to_record()).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Write the export table to `path` as CSV, creating parent directories.
pub fn write_export_csv(path: &Path, rows: &[ExportRow]) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = fs::File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_export(file, rows, path)?;
    info!(path = %path.display(), rows = rows.len(), "wrote export");
    Ok(())
}

/// Write the export table to `path` as a single-sheet workbook.
///
/// Scores are written as numbers, everything else as text.
pub fn write_export_xlsx(path: &Path, rows: &[ExportRow]) -> Result<()> {
    let xlsx_error = |source| OutputError::Xlsx {
        path: path.to_path_buf(),
        source,
    };
    ensure_parent_dir(path)?;
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(RESULTS_SHEET).map_err(xlsx_error)?;
    for (col, name) in export_columns().iter().enumerate() {
        sheet
            .write_string(0, column_number(col), name)
            .map_err(xlsx_error)?;
    }
    for (n, row) in rows.iter().enumerate() {
        let line = u32::try_from(n + 1).unwrap_or(u32::MAX);
        sheet.write_string(line, 0, &row.new_id).map_err(xlsx_error)?;
        sheet
            .write_string(line, 1, &row.original_id)
            .map_err(xlsx_error)?;
        for (item, score) in row.likert.iter().enumerate() {
            sheet
                .write_number(line, column_number(2 + item), *score)
                .map_err(xlsx_error)?;
        }
        for (offset, text) in row.emr.iter().enumerate() {
            sheet
                .write_string(line, column_number(2 + row.likert.len() + offset), text)
                .map_err(xlsx_error)?;
        }
    }
    workbook.save(path).map_err(xlsx_error)?;
    info!(path = %path.display(), rows = rows.len(), "wrote export workbook");
    Ok(())
}

fn column_number(col: usize) -> u16 {
    u16::try_from(col).unwrap_or(u16::MAX)
}

/// Write the export table, picking CSV or workbook output from the extension.
pub fn write_export_file(path: &Path, rows: &[ExportRow]) -> Result<()> {
    match ExportFormat::from_path(path) {
        ExportFormat::Csv => write_export_csv(path, rows),
        ExportFormat::Xlsx => write_export_xlsx(path, rows),
    }
}
