use std::path::PathBuf;

use async_trait::async_trait;
use tauri::{AppHandle, Emitter, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use tokio::sync::oneshot;
use tracing::{error, warn};

use crate::logging::init_tracing;
use crate::models::PriceData;
use crate::uploader::{
    FilePicker, Notice, NoticeKind, Notifier, UploadOutcome, Uploader, CSV_EXTENSIONS,
};

/// Event carrying the parsed records to the page.
pub const PRICE_DATA_EVENT: &str = "price-data-uploaded";

type DesktopUploader = Uploader<DialogNotifier>;

struct DialogPicker {
    app: AppHandle,
}

#[async_trait]
impl FilePicker for DialogPicker {
    async fn pick_csv(&self) -> Option<PathBuf> {
        let (tx, rx) = oneshot::channel();
        self.app
            .dialog()
            .file()
            .add_filter("CSV", CSV_EXTENSIONS)
            .pick_file(move |file| {
                let _ = tx.send(file);
            });

        let file = rx.await.ok().flatten()?;
        match file.into_path() {
            Ok(path) => Some(path),
            Err(err) => {
                warn!("Selected file is not a local path: {err}");
                None
            }
        }
    }
}

struct DialogNotifier {
    app: AppHandle,
}

impl Notifier for DialogNotifier {
    fn notify(&self, notice: Notice) {
        let kind = match notice.kind {
            NoticeKind::Success => MessageDialogKind::Info,
            NoticeKind::Error => MessageDialogKind::Error,
        };
        self.app
            .dialog()
            .message(notice.message)
            .kind(kind)
            .title("Upload CSV")
            .show(|_| {});
    }
}

/// Lets the user pick a CSV file and sends the parsed prices to the page.
///
/// # Returns
/// `true` when price data was loaded
#[tauri::command]
async fn upload_csv(app: AppHandle) -> bool {
    let uploader = app.state::<DesktopUploader>();
    let picker = DialogPicker { app: app.clone() };

    matches!(uploader.upload(&picker).await, UploadOutcome::Loaded(_))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_tracing();

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let handle = app.handle().clone();
            let uploader: DesktopUploader = Uploader::new(
                move |records: Vec<PriceData>| {
                    if let Err(err) = handle.emit(PRICE_DATA_EVENT, &records) {
                        error!("Failed to send price data to the page: {err}");
                    }
                },
                DialogNotifier {
                    app: app.handle().clone(),
                },
            );
            app.manage(uploader);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![upload_csv])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
