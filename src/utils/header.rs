use crate::models::{FormatError, PriceField};

/// A required field and the header substrings that identify its column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnRule {
    pub field: PriceField,
    pub tokens: &'static [&'static str],
}

/// Resolution order of the required columns.
pub const COLUMN_RULES: [ColumnRule; 3] = [
    ColumnRule {
        field: PriceField::Date,
        tokens: &["date"],
    },
    ColumnRule {
        field: PriceField::Arabica,
        tokens: &["arabica"],
    },
    ColumnRule {
        field: PriceField::Robusta,
        tokens: &["robusta"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnResolution {
    Found(usize),
    Missing(PriceField),
}

/// Column indices of the required fields plus the header width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub date: usize,
    pub arabica: usize,
    pub robusta: usize,
    pub width: usize,
}

impl ColumnLayout {
    pub fn index_of(&self, field: PriceField) -> usize {
        match field {
            PriceField::Date => self.date,
            PriceField::Arabica => self.arabica,
            PriceField::Robusta => self.robusta,
        }
    }
}

/// Normalizes a header cell (trim, lower-case).
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Whether a normalized header cell contains any of the tokens.
pub fn matches_tokens(normalized: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| normalized.contains(token))
}

/// Finds the first column, left to right, that matches the rule.
pub fn resolve_column(headers: &[String], rule: &ColumnRule) -> ColumnResolution {
    headers
        .iter()
        .position(|name| matches_tokens(name, rule.tokens))
        .map_or(ColumnResolution::Missing(rule.field), ColumnResolution::Found)
}

/// Resolves every rule against the normalized headers.
///
/// All rules are evaluated before failing, so the error names every missing
/// field rather than just the first one.
pub fn resolve_columns(headers: &[String]) -> Result<ColumnLayout, FormatError> {
    let mut found = [0usize; COLUMN_RULES.len()];
    let mut missing = Vec::new();

    for (slot, rule) in found.iter_mut().zip(COLUMN_RULES.iter()) {
        match resolve_column(headers, rule) {
            ColumnResolution::Found(idx) => *slot = idx,
            ColumnResolution::Missing(field) => missing.push(field),
        }
    }

    if !missing.is_empty() {
        return Err(FormatError::MissingColumns(missing));
    }

    let [date, arabica, robusta] = found;
    Ok(ColumnLayout {
        date,
        arabica,
        robusta,
        width: headers.len(),
    })
}
