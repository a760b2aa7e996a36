use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Selection state of the file control.
///
/// Behaves like an HTML file input: picking the path that is already
/// selected does not fire a change event, so the value has to be cleared
/// after every upload for the same file to be processed again.
#[derive(Debug, Default)]
pub struct FileInput {
    value: Mutex<Option<PathBuf>>,
}

impl FileInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a dialog result. Returns the path when it fires a change event.
    pub fn select(&self, selection: Option<PathBuf>) -> Option<PathBuf> {
        let path = selection?;
        let mut value = self.lock();
        if value.as_deref() == Some(path.as_path()) {
            return None;
        }
        *value = Some(path.clone());
        Some(path)
    }

    pub fn value(&self) -> Option<PathBuf> {
        self.lock().clone()
    }

    pub fn reset(&self) {
        *self.lock() = None;
    }

    /// Guard that clears the selection when dropped.
    pub fn reset_on_exit(&self) -> ResetGuard<'_> {
        ResetGuard { input: self }
    }

    fn lock(&self) -> MutexGuard<'_, Option<PathBuf>> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[must_use = "the selection is reset when the guard is dropped"]
pub struct ResetGuard<'a> {
    input: &'a FileInput,
}

impl Drop for ResetGuard<'_> {
    fn drop(&mut self) {
        self.input.reset();
    }
}
