mod csv;

pub use self::csv::{parse_price_csv, parse_price_report};
