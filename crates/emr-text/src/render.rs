//! HTML rendering of formatted section text.

/// Escape the five HTML-sensitive characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Body of a `- item` line, or `None` for any other line.
fn bullet_item(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('-')?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim())
}

/// Render bulleted text as a list.
///
/// Lines of the form `- item` become `<li>` entries of a `<ul>`; other lines
/// are left out when at least one bullet line exists. Without bullet lines
/// the text is emitted line by line inside a `<div>`. Content is always
/// escaped.
///
/// ```
/// use emr_text::render_list;
///
/// assert_eq!(render_list("- a < b.\n- c."), "<ul><li>a &lt; b.</li><li>c.</li></ul>");
/// assert_eq!(render_list("Cough: +\nFever: -"), "<div>Cough: +<br>Fever: -</div>");
/// assert_eq!(render_list(""), "<div></div>");
/// ```
pub fn render_list(text: &str) -> String {
    if text.is_empty() {
        return "<div></div>".to_string();
    }
    let lines: Vec<&str> = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();
    let items: Vec<&str> = lines.iter().filter_map(|line| bullet_item(line)).collect();
    if !items.is_empty() {
        let body: String = items
            .iter()
            .map(|item| format!("<li>{}</li>", escape_html(item)))
            .collect();
        return format!("<ul>{body}</ul>");
    }
    let body = lines
        .iter()
        .map(|line| escape_html(line))
        .collect::<Vec<_>>()
        .join("<br>");
    format!("<div>{body}</div>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_five() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_non_bullet_lines_dropped_from_list() {
        assert_eq!(
            render_list("Heading\n- one.\n-two\n- three."),
            "<ul><li>one.</li><li>three.</li></ul>"
        );
    }

    #[test]
    fn test_blank_lines_skipped() {
        assert_eq!(render_list("a\n\n  \nb"), "<div>a<br>b</div>");
    }
}
