//! HTML view of a parsed note.

use emr_model::ParsedNote;
use emr_text::{escape_html, format_section, reformat_bullets, render_list};

/// Heading shown above the other sections.
pub const OTHER_SECTIONS_HEADING: &str = "기타";

fn label_div(label: &str) -> String {
    format!("<div class='gen-label'>{}</div>", escape_html(label))
}

/// Render a parsed note for display.
///
/// Every primary section gets a `gen-label` heading followed by either a
/// `gen-box` with the formatted content or an empty `gen-empty`
/// placeholder. Other sections, if any, share one box under a 기타 heading.
pub fn render_note_html(note: &ParsedNote) -> String {
    let mut html = String::new();
    for (label, content) in note.primary() {
        html.push_str(&label_div(label.as_str()));
        if content.is_empty() {
            html.push_str("<div class='gen-empty'></div>");
        } else {
            let body = render_list(&format_section(label, content));
            html.push_str(&format!("<div class='gen-box'>{body}</div>"));
        }
    }

    if !note.others().is_empty() {
        html.push_str(&label_div(OTHER_SECTIONS_HEADING));
        let chunks: Vec<String> = note
            .others()
            .iter()
            .map(|section| {
                format!(
                    "<div><b>{}</b></div>{}",
                    escape_html(&section.label),
                    render_list(&reformat_bullets(&section.content))
                )
            })
            .collect();
        html.push_str(&format!("<div class='gen-box'>{}</div>", chunks.join("<br>")));
    }
    html
}
