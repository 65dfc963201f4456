//! Visit date/time normalization.

use chrono::{NaiveDate, NaiveDateTime};

/// Rendering used for every parsed visit time.
pub const VISIT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

const DATETIME_FORMATS: [&str; 10] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d"];

/// Normalize a raw visit time cell.
///
/// Empty cells and `nan` placeholders yield `None`. Recognized date/time
/// values are rendered as `YYYY-MM-DD HH:MM` (dates alone at midnight);
/// anything else is kept as written.
pub fn format_visit_time(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return None;
    }
    if let Some(parsed) = parse_visit_time(value) {
        return Some(parsed.format(VISIT_TIME_FORMAT).to_string());
    }
    Some(value.to_string())
}

fn parse_visit_time(value: &str) -> Option<NaiveDateTime> {
    for fmt in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(parsed);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
