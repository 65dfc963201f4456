//! Terminal output: note reports and summary tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use emr_model::{
    Annotation, EvaluationSession, LIKERT_ITEMS, LIKERT_MAX, LIKERT_MIN, LIKERT_RUBRIC, NoteRecord,
    ParsedNote, Progress, SectionLabel,
};
use emr_output::OTHER_SECTIONS_HEADING;
use emr_sections::LabelTable;
use emr_text::{format_dialogue, format_section, reformat_bullets};

/// Plain-text view of a parsed note with display formatting applied.
pub fn render_note_text(note: &ParsedNote) -> String {
    let mut blocks = Vec::new();
    for (label, content) in note.primary() {
        let body = if content.is_empty() {
            "(empty)".to_string()
        } else {
            format_section(label, content)
        };
        blocks.push(format!("[{label}]\n{body}"));
    }
    for section in note.others() {
        blocks.push(format!(
            "[{OTHER_SECTIONS_HEADING}: {}]\n{}",
            section.label,
            reformat_bullets(&section.content)
        ));
    }
    blocks.join("\n\n")
}

/// Detailed view of one record: identifiers, transcript and parsed note.
pub fn render_record_detail(
    record: &NoteRecord,
    session: &EvaluationSession,
    table: &LabelTable,
) -> String {
    let status = session
        .status_label(record.row)
        .unwrap_or_else(|| record.record_id.clone());
    let mut out = format!("Record {} of {}: {status}", record.row + 1, session.len());
    if let Some(visit_time) = &record.visit_time {
        out.push_str(&format!("\nVisit: {visit_time}"));
    }
    out.push_str("\n\n## Dialogue\n\n");
    out.push_str(&format_dialogue(&record.dialogue));
    out.push_str("\n\n## Generated note\n\n");
    out.push_str(&render_note_text(&table.parse(&record.generated)));
    out.push_str("\n\n## Evaluation\n\n");
    out.push_str(&render_rubric(session.answer(record.row)));
    out
}

/// Likert items with their scoring guide; the answer's scores, if any, are
/// marked with `>`.
pub fn render_rubric(answer: Option<&Annotation>) -> String {
    let mut blocks = Vec::new();
    if let Some(answer) = answer {
        blocks.push(format!("Suitable: {}", answer.suitable));
    }
    for (item, (name, rubric)) in LIKERT_ITEMS.iter().zip(&LIKERT_RUBRIC).enumerate() {
        let score = answer.and_then(|answer| answer.likert.get(item));
        let mut block = match score {
            Some(score) => format!("{}. {name} [{score}]", item + 1),
            None => format!("{}. {name}", item + 1),
        };
        block.push_str(&format!("\n   {}", rubric.criterion));
        for (points, level) in (LIKERT_MIN..=LIKERT_MAX).rev().zip(rubric.levels) {
            let marker = if score == Some(points) { '>' } else { ' ' };
            block.push_str(&format!("\n {marker} {points}점: {level}"));
        }
        blocks.push(block);
    }
    blocks.join("\n\n")
}

/// One-line progress report.
pub fn progress_line(progress: Progress) -> String {
    format!(
        "Saved {} / {} ({} remaining, {:.0}%)",
        progress.done,
        progress.total,
        progress.remaining(),
        progress.fraction() * 100.0
    )
}

/// Overview of every record in a session.
pub fn dataset_table(session: &EvaluationSession, labels: &LabelTable) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Record"),
        header_cell("Visit"),
        header_cell("Sections"),
        header_cell("Other"),
        header_cell("Dialogue chars"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for (row, record) in session.records().iter().enumerate() {
        let note = labels.parse(&record.generated);
        let status = session
            .status_label(row)
            .unwrap_or_else(|| record.record_id.clone());
        let record_cell = if session.is_saved(row) {
            Cell::new(status).fg(Color::Green)
        } else {
            Cell::new(status)
        };
        table.add_row(vec![
            Cell::new(row),
            record_cell,
            record
                .visit_time
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            count_cell(note.filled_count(), Color::Blue),
            count_cell(note.others().len(), Color::Yellow),
            Cell::new(record.dialogue.chars().count()),
        ]);
    }
    table
}

/// Every label the parser recognizes, in matching order.
pub fn labels_table(labels: &LabelTable) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Label"),
        header_cell("Kind"),
        header_cell("Name"),
        header_cell("Pattern"),
    ]);
    apply_table_style(&mut table);
    for pattern in labels.patterns() {
        let label = pattern.label();
        let (kind, name) = match label {
            SectionLabel::Primary(primary) => {
                (Cell::new("primary").fg(Color::Blue), primary.english_name())
            }
            SectionLabel::Excluded(excluded) => {
                (dim_cell("excluded"), excluded.english_name())
            }
            SectionLabel::Other(_) => (Cell::new("other").fg(Color::Yellow), "-"),
        };
        table.add_row(vec![
            Cell::new(label.as_str()).add_attribute(Attribute::Bold),
            kind,
            Cell::new(name),
            dim_cell(pattern.token()),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
