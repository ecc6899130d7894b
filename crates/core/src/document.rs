// Reading documentation files at call time

use crate::error::{ContentError, ContentResult};
use std::path::Path;

/// Read a documentation file as UTF-8 text, verbatim.
///
/// Every call goes to disk; nothing is cached.
pub async fn read_document(path: &Path) -> ContentResult<String> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|_| ContentError::InvalidUtf8 {
        path: path.to_path_buf(),
    })
}
