use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use coffee_price_uploader_lib::logging::init_tracing;
use coffee_price_uploader_lib::models::{FormatError, PriceData, UploadError};
use coffee_price_uploader_lib::uploader::{
    FilePicker, Notice, NoticeKind, UploadOutcome, Uploader, SUCCESS_MESSAGE,
};

const VALID_CSV: &str = "Date,Arabica,Robusta\n\
                         2024-01-01,1.50,1.10\n\
                         2024-01-02,bad,1.20\n\
                         2024-01-03,1.60,1.30\n";

static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

fn write_temp_csv(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "price-upload-{}-{}.csv",
        std::process::id(),
        NEXT_FILE.fetch_add(1, Ordering::SeqCst)
    ));
    std::fs::write(&path, contents).expect("write temp csv");
    path
}

type Received = Arc<Mutex<Vec<Vec<PriceData>>>>;
type Notices = Arc<Mutex<Vec<Notice>>>;

fn recording_uploader() -> (
    Uploader<impl Fn(Notice) + Send + Sync>,
    Received,
    Notices,
) {
    init_tracing();

    let received: Received = Arc::default();
    let notices: Notices = Arc::default();

    let sink = Arc::clone(&received);
    let shown = Arc::clone(&notices);
    let uploader = Uploader::new(
        move |records: Vec<PriceData>| sink.lock().unwrap().push(records),
        move |notice: Notice| shown.lock().unwrap().push(notice),
    );

    (uploader, received, notices)
}

struct FixedPicker(Option<PathBuf>);

#[async_trait]
impl FilePicker for FixedPicker {
    async fn pick_csv(&self) -> Option<PathBuf> {
        self.0.clone()
    }
}

#[tokio::test]
async fn test_upload_forwards_records_and_notifies_success() {
    let (uploader, received, notices) = recording_uploader();
    let path = write_temp_csv(VALID_CSV);

    let outcome = uploader.handle_file_change(Some(path.clone())).await;

    assert!(matches!(outcome, UploadOutcome::Loaded(2)));
    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0][0].date(), "2024-01-01");
    assert_eq!(received[0][1].arabica_price(), 1.60);
    assert_eq!(received[0][1].robusta_price(), 1.30);
    assert_eq!(notices.lock().unwrap()[0].message, SUCCESS_MESSAGE);
    assert_eq!(uploader.input().value(), None);

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_same_file_is_processed_again_after_success() {
    let (uploader, received, _notices) = recording_uploader();
    let path = write_temp_csv(VALID_CSV);

    uploader.handle_file_change(Some(path.clone())).await;
    let outcome = uploader.handle_file_change(Some(path.clone())).await;

    assert!(matches!(outcome, UploadOutcome::Loaded(2)));
    assert_eq!(received.lock().unwrap().len(), 2);

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_same_file_is_processed_again_after_parse_failure() {
    let (uploader, received, notices) = recording_uploader();
    let path = write_temp_csv("Date,Price\n2024-01-01,1.5\n");

    let first = uploader.handle_file_change(Some(path.clone())).await;
    let second = uploader.handle_file_change(Some(path.clone())).await;

    for outcome in [first, second] {
        assert!(matches!(
            outcome,
            UploadOutcome::Failed(UploadError::Format(FormatError::MissingColumns(_)))
        ));
    }
    assert!(received.lock().unwrap().is_empty());

    let notices = notices.lock().unwrap();
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0].kind, NoticeKind::Error);
    assert!(notices[0].message.starts_with("Error: Invalid CSV format."));
    assert_eq!(uploader.input().value(), None);

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_empty_file_reports_empty() {
    let (uploader, _received, notices) = recording_uploader();
    let path = write_temp_csv("");

    let outcome = uploader.handle_file_change(Some(path.clone())).await;

    assert!(matches!(
        outcome,
        UploadOutcome::Failed(UploadError::Format(FormatError::Empty))
    ));
    assert_eq!(notices.lock().unwrap()[0].message, "Error: File is empty.");

    std::fs::remove_file(path).unwrap();
}

#[tokio::test]
async fn test_read_failure_notifies_and_resets() {
    let (uploader, received, notices) = recording_uploader();
    let path = std::env::temp_dir().join("price-upload-does-not-exist.csv");

    let outcome = uploader.handle_file_change(Some(path.clone())).await;

    assert!(matches!(outcome, UploadOutcome::Failed(UploadError::Read(_))));
    assert!(received.lock().unwrap().is_empty());
    assert_eq!(
        notices.lock().unwrap()[0],
        Notice {
            kind: NoticeKind::Error,
            message: "Failed to read the file.".to_string(),
        }
    );
    assert_eq!(uploader.input().value(), None);

    let again = uploader.handle_file_change(Some(path)).await;
    assert!(matches!(again, UploadOutcome::Failed(UploadError::Read(_))));
}

#[tokio::test]
async fn test_dismissed_dialog_is_a_no_op() {
    let (uploader, received, notices) = recording_uploader();

    let outcome = uploader.upload(&FixedPicker(None)).await;

    assert!(matches!(outcome, UploadOutcome::Ignored));
    assert!(received.lock().unwrap().is_empty());
    assert!(notices.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_through_picker() {
    let (uploader, received, _notices) = recording_uploader();
    let path = write_temp_csv(VALID_CSV);

    let outcome = uploader.upload(&FixedPicker(Some(path.clone()))).await;

    assert!(matches!(outcome, UploadOutcome::Loaded(2)));
    assert_eq!(received.lock().unwrap().len(), 1);

    std::fs::remove_file(path).unwrap();
}
