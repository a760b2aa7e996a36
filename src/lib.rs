pub mod logging;
pub mod models;
pub mod parsers;
pub mod storage;
pub mod uploader;
pub mod utils;

#[cfg(feature = "desktop")]
mod desktop;

#[cfg(feature = "desktop")]
pub use desktop::run;

pub use models::{FormatError, PriceData, PriceField, ReadError, UploadError};
pub use parsers::{parse_price_csv, parse_price_report};
pub use uploader::{FilePicker, Notice, Notifier, UploadOutcome, Uploader};
