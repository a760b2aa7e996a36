use crate::models::UploadError;

pub const SUCCESS_MESSAGE: &str = "Custom price data loaded successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A message shown to the user after an upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success() -> Self {
        Self {
            kind: NoticeKind::Success,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn failure(err: &UploadError) -> Self {
        let message = match err {
            UploadError::Format(err) => format!("Error: {err}"),
            UploadError::Read(err) => err.to_string(),
        };
        Self {
            kind: NoticeKind::Error,
            message,
        }
    }
}

/// Sink for user-facing notices (message dialogs in the desktop shell).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl<F> Notifier for F
where
    F: Fn(Notice) + Send + Sync,
{
    fn notify(&self, notice: Notice) {
        self(notice)
    }
}
