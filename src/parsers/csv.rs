use csv::{ReaderBuilder, StringRecord, Terminator};
use tracing::{debug, warn};

use crate::models::{
    FormatError, PriceData, PriceField, PriceReport, RowRejection, SkippedRow,
};
use crate::utils::header::{normalize_header, resolve_columns, ColumnLayout};
use crate::utils::text::{is_iso_date, parse_finite};

/// Parses CSV text into price records, skipping invalid rows.
///
/// # Arguments
/// * `text` - full contents of the uploaded file
///
/// # Returns
/// The valid rows in input order, or a `FormatError` when the file has no
/// data rows, lacks a required column, or no row survives validation.
pub fn parse_price_csv(text: &str) -> Result<Vec<PriceData>, FormatError> {
    parse_price_report(text).map(|report| report.records)
}

/// Same as [`parse_price_csv`], also returning the skipped rows.
///
/// # Arguments
/// * `text` - full contents of the uploaded file
///
/// # Returns
/// The valid rows plus every skipped row with its line number and reason
pub fn parse_price_report(text: &str) -> Result<PriceReport, FormatError> {
    if text.is_empty() {
        return Err(FormatError::Empty);
    }

    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    if trimmed.split('\n').count() < 2 {
        return Err(FormatError::MissingDataRows);
    }

    // Plain comma/newline splitting: quotes are ordinary characters and
    // short rows are reported instead of rejected by the reader.
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(trimmed.as_bytes());
    let mut rows = reader.records();

    let header = match rows.next() {
        Some(Ok(record)) => record,
        _ => return Err(FormatError::MissingDataRows),
    };
    let normalized: Vec<String> = header.iter().map(normalize_header).collect();
    let layout = resolve_columns(&normalized)?;
    debug!(?layout, "resolved price columns");

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (idx, row) in rows.enumerate() {
        let record = match row {
            Ok(record) => record,
            Err(err) => {
                warn!("Skipping unreadable data row: {err}");
                continue;
            }
        };
        // header is line 1
        let line = record
            .position()
            .map_or(idx + 2, |pos| pos.line() as usize);

        match read_row(&record, &layout) {
            Ok(price) => records.push(price),
            Err(reason) => {
                warn!(
                    "Skipping invalid data row {line}: {reason} ({})",
                    record.iter().collect::<Vec<_>>().join(",")
                );
                skipped.push(SkippedRow { line, reason });
            }
        }
    }

    if records.is_empty() {
        return Err(FormatError::NoValidRows);
    }

    debug!(
        parsed = records.len(),
        skipped = skipped.len(),
        "parsed price csv"
    );

    Ok(PriceReport { records, skipped })
}

fn read_row(record: &StringRecord, layout: &ColumnLayout) -> Result<PriceData, RowRejection> {
    if record.len() < layout.width {
        return Err(RowRejection::TooFewCells {
            found: record.len(),
            expected: layout.width,
        });
    }

    let cell = |field: PriceField| record.get(layout.index_of(field)).unwrap_or("").trim();

    let date = cell(PriceField::Date);
    if date.is_empty() {
        return Err(RowRejection::EmptyDate);
    }

    let arabica_price = read_price(PriceField::Arabica, cell(PriceField::Arabica))?;
    let robusta_price = read_price(PriceField::Robusta, cell(PriceField::Robusta))?;

    if !is_iso_date(date) {
        return Err(RowRejection::InvalidDate {
            value: date.to_string(),
        });
    }

    Ok(PriceData::new(date, arabica_price, robusta_price))
}

fn read_price(field: PriceField, value: &str) -> Result<f64, RowRejection> {
    parse_finite(value).ok_or_else(|| RowRejection::InvalidPrice {
        field,
        value: value.to_string(),
    })
}
