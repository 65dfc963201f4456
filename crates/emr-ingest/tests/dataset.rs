//! Loading datasets from disk.

use std::io::Write;
use std::path::Path;

use emr_ingest::{DatasetFormat, IngestError, SourceEncoding, read_dataset};
use encoding_rs::EUC_KR;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use tempfile::NamedTempFile;

const SAMPLE: &str = "구분자,대화 스크립트,생성결과,진료일시\n\
A001,참석자1: 어디가 불편하세요? 참석자2: 기침이요,\"현병력\n3일 전부터 기침\",2024-05-01 10:20:00\n\
A002,참석자1: 다음 분,\"주호소\n두통\",nan\n";

fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn reads_utf8_with_bom() {
    let mut bytes = b"\xEF\xBB\xBF".to_vec();
    bytes.extend_from_slice(SAMPLE.as_bytes());
    let file = write_temp(&bytes);

    let dataset = read_dataset(file.path()).unwrap();
    assert_eq!(dataset.encoding, SourceEncoding::Utf8);
    assert_eq!(dataset.columns[0], "구분자");
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.records[0].generated, "현병력\n3일 전부터 기침");
    assert_eq!(dataset.records[0].visit_time.as_deref(), Some("2024-05-01 10:20"));
    assert_eq!(dataset.records[1].visit_time, None);
}

#[test]
fn reads_cp949_dataset() {
    let (bytes, _, _) = EUC_KR.encode(SAMPLE);
    let file = write_temp(&bytes);

    let dataset = read_dataset(file.path()).unwrap();
    assert_eq!(dataset.encoding, SourceEncoding::EucKr);
    assert_eq!(dataset.records[1].record_id, "A002");
    assert_eq!(dataset.records[1].generated, "주호소\n두통");
}

#[test]
fn reports_missing_file() {
    let err = read_dataset(Path::new("/nonexistent/dir/notes.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn reports_missing_columns() {
    let file = write_temp("id,note\n1,x\n".as_bytes());
    let err = read_dataset(file.path()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("구분자, 대화 스크립트, 생성결과"), "{message}");
    assert!(message.contains("found: id, note"), "{message}");
}

#[test]
fn reads_first_worksheet_of_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in ["구분자", "대화 스크립트", "생성결과", "진료일시"]
        .into_iter()
        .enumerate()
    {
        sheet.write_string(0, col as u16, name).unwrap();
    }
    sheet.write_number(1, 0, 1001).unwrap();
    sheet.write_string(1, 1, "참석자1: 어디가 불편하세요?").unwrap();
    sheet.write_string(1, 2, "현병력\n3일 전부터 기침").unwrap();
    let visit = ExcelDateTime::parse_from_str("2024-05-01 10:20:00").unwrap();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm");
    sheet
        .write_datetime_with_format(1, 3, &visit, &date_format)
        .unwrap();
    sheet.write_string(3, 0, "A002").unwrap();
    sheet.write_string(3, 2, "주호소\n두통").unwrap();
    workbook.save(&path).unwrap();

    let dataset = read_dataset(&path).unwrap();
    assert_eq!(dataset.format, DatasetFormat::Xlsx);
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.records[0].record_id, "1001");
    assert_eq!(dataset.records[0].generated, "현병력\n3일 전부터 기침");
    assert_eq!(dataset.records[0].visit_time.as_deref(), Some("2024-05-01 10:20"));
    assert_eq!(dataset.records[1].row, 1);
    assert_eq!(dataset.records[1].record_id, "A002");
    assert_eq!(dataset.records[1].dialogue, "");
    assert_eq!(dataset.records[1].visit_time, None);
}

#[test]
fn workbook_missing_columns_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "구분자").unwrap();
    sheet.write_string(1, 0, "A001").unwrap();
    workbook.save(&path).unwrap();

    let err = read_dataset(&path).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumns { .. }), "{err}");
}

#[test]
fn csv_extension_keeps_csv_reader() {
    let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    std::fs::write(file.path(), SAMPLE).unwrap();
    let dataset = read_dataset(file.path()).unwrap();
    assert_eq!(dataset.format, DatasetFormat::Csv);
    assert_eq!(dataset.len(), 2);
}
