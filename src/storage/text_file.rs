use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::models::ReadError;
use crate::utils::text::strip_bom;

/// Reads a whole file as text.
///
/// Invalid UTF-8 sequences are replaced and a leading byte-order mark is
/// dropped, so any readable file yields text for the parser to judge.
///
/// # Arguments
/// * `path` - file chosen in the dialog
///
/// # Returns
/// The decoded contents, or `ReadError` when the bytes cannot be read
pub async fn read_text_file(path: &Path) -> Result<String, ReadError> {
    let bytes = fs::read(path).await.map_err(|source| ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "read upload");

    let text = String::from_utf8_lossy(&bytes);
    Ok(strip_bom(&text).to_owned())
}
