mod input;
mod notice;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{error, info};

use crate::models::{PriceData, UploadError};
use crate::parsers::parse_price_csv;
use crate::storage::text_file::read_text_file;

pub use input::{FileInput, ResetGuard};
pub use notice::{Notice, NoticeKind, Notifier, SUCCESS_MESSAGE};

/// Extensions offered by the file dialog.
pub const CSV_EXTENSIONS: &[&str] = &["csv"];

/// Opens a file dialog restricted to CSV files.
#[async_trait]
pub trait FilePicker: Send + Sync {
    /// `None` when the dialog was dismissed.
    async fn pick_csv(&self) -> Option<PathBuf>;
}

#[derive(Debug)]
pub enum UploadOutcome {
    /// No file selected, or the selection did not change.
    Ignored,
    Loaded(usize),
    Failed(UploadError),
}

type DataCallback = Box<dyn Fn(Vec<PriceData>) + Send + Sync>;

/// The "Upload CSV" action: pick, read, parse, report.
pub struct Uploader<N> {
    input: FileInput,
    notifier: N,
    on_data_uploaded: DataCallback,
}

impl<N: Notifier> Uploader<N> {
    /// # Arguments
    /// * `on_data_uploaded` - receives the parsed records after a successful upload
    /// * `notifier` - shows success and failure notices to the user
    pub fn new<F>(on_data_uploaded: F, notifier: N) -> Self
    where
        F: Fn(Vec<PriceData>) + Send + Sync + 'static,
    {
        Self {
            input: FileInput::new(),
            notifier,
            on_data_uploaded: Box::new(on_data_uploaded),
        }
    }

    pub fn input(&self) -> &FileInput {
        &self.input
    }

    /// Opens the picker and processes whatever it returns.
    ///
    /// # Arguments
    /// * `picker` - file dialog restricted to CSV files
    ///
    /// # Returns
    /// What happened to the selection; failures are already reported
    pub async fn upload<P>(&self, picker: &P) -> UploadOutcome
    where
        P: FilePicker + ?Sized,
    {
        let selection = picker.pick_csv().await;
        self.handle_file_change(selection).await
    }

    /// Processes a picker result.
    ///
    /// Errors end here: they are logged and turned into a notice. The
    /// selection is cleared on every exit path once a file was taken.
    ///
    /// # Arguments
    /// * `selection` - chosen path, `None` when the dialog was dismissed
    ///
    /// # Returns
    /// `Ignored` when nothing changed, otherwise the load result
    pub async fn handle_file_change(&self, selection: Option<PathBuf>) -> UploadOutcome {
        let Some(path) = self.input.select(selection) else {
            return UploadOutcome::Ignored;
        };
        let _reset = self.input.reset_on_exit();

        match load_price_file(&path).await {
            Ok(records) => {
                let count = records.len();
                info!(path = %path.display(), rows = count, "price data uploaded");
                (self.on_data_uploaded)(records);
                self.notifier.notify(Notice::success());
                UploadOutcome::Loaded(count)
            }
            Err(err) => {
                match &err {
                    UploadError::Format(reason) => {
                        error!(path = %path.display(), "Failed to parse CSV: {reason}")
                    }
                    UploadError::Read(reason) => {
                        error!(path = %path.display(), "Failed to read file: {:?}", reason.source)
                    }
                }
                self.notifier.notify(Notice::failure(&err));
                UploadOutcome::Failed(err)
            }
        }
    }
}

/// Reads and parses one file.
///
/// # Arguments
/// * `path` - CSV file on disk
///
/// # Returns
/// The parsed price records, or the read or format failure
pub async fn load_price_file(path: &Path) -> Result<Vec<PriceData>, UploadError> {
    let text = read_text_file(path).await?;
    Ok(parse_price_csv(&text)?)
}
