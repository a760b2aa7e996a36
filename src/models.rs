use serde::Serialize;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// One parsed row: a date paired with the arabica and robusta prices.
///
/// Built only by the CSV parser, so the date always has the `YYYY-MM-DD`
/// shape and both prices are finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceData {
    date: String,
    arabica_price: f64,
    robusta_price: f64,
}

impl PriceData {
    pub(crate) fn new(date: impl Into<String>, arabica_price: f64, robusta_price: f64) -> Self {
        Self {
            date: date.into(),
            arabica_price,
            robusta_price,
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn arabica_price(&self) -> f64 {
        self.arabica_price
    }

    pub fn robusta_price(&self) -> f64 {
        self.robusta_price
    }
}

/// Fields every price CSV must provide a column for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceField {
    Date,
    Arabica,
    Robusta,
}

impl PriceField {
    pub fn label(self) -> &'static str {
        match self {
            PriceField::Date => "Date",
            PriceField::Arabica => "Arabica",
            PriceField::Robusta => "Robusta",
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Structurally invalid or empty CSV content.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("File is empty.")]
    Empty,
    #[error("CSV file must have a header and at least one data row.")]
    MissingDataRows,
    #[error(
        "Invalid CSV format. Header must contain columns for 'Date', 'Arabica', and 'Robusta'. Missing: {}",
        join_labels(.0)
    )]
    MissingColumns(Vec<PriceField>),
    #[error("Could not parse any valid data rows from the CSV file.")]
    NoValidRows,
}

fn join_labels(fields: &[PriceField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The selected file could not be read.
#[derive(Debug, Error)]
#[error("Failed to read the file.")]
pub struct ReadError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Read(#[from] ReadError),
}

/// Why a data row was left out of the result.
#[derive(Debug, Clone, PartialEq)]
pub enum RowRejection {
    TooFewCells { found: usize, expected: usize },
    EmptyDate,
    InvalidPrice { field: PriceField, value: String },
    InvalidDate { value: String },
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowRejection::TooFewCells { found, expected } => {
                write!(f, "expected {expected} cells, found {found}")
            }
            RowRejection::EmptyDate => write!(f, "date is empty"),
            RowRejection::InvalidPrice { field, value } => {
                write!(f, "{} price {value:?} is not a number", field.label())
            }
            RowRejection::InvalidDate { value } => {
                write!(f, "date {value:?} is not in YYYY-MM-DD format")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based line number in the uploaded file.
    pub line: usize,
    pub reason: RowRejection,
}

/// Parsed records together with the rows that were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceReport {
    pub records: Vec<PriceData>,
    pub skipped: Vec<SkippedRow>,
}
