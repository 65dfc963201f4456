//! Display and export of evaluated notes.

pub mod error;
pub mod export;
pub mod html;

pub use error::{OutputError, Result};
pub use export::{
    ExportFormat, ExportRow, NEW_ID_COLUMN, ORIGINAL_ID_COLUMN, RESULTS_SHEET, build_export_rows,
    ensure_complete, export_columns, new_record_id, write_export, write_export_csv,
    write_export_file, write_export_xlsx,
};
pub use html::{OTHER_SECTIONS_HEADING, render_note_html};
