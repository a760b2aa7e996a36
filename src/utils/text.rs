use std::sync::LazyLock;

use regex::Regex;

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII digits only; the calendar itself is not checked
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is valid")
});

/// Whether the cell has the `YYYY-MM-DD` shape.
pub fn is_iso_date(cell: &str) -> bool {
    ISO_DATE.is_match(cell)
}

static NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("number pattern is valid")
});

/// Reads the longest leading number of a trimmed cell, keeping it only when
/// finite. Trailing text such as a currency suffix is ignored.
pub fn parse_finite(cell: &str) -> Option<f64> {
    let prefix = NUMBER_PREFIX.find(cell.trim())?;
    prefix
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Removes a leading UTF-8 byte-order mark.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{FEFF}').unwrap_or(text)
}
