//! Error types for content access.

use std::path::{Path, PathBuf};

/// Result type for content operations.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors raised while reading documentation content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The file could not be opened or read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid UTF-8 text.
    #[error("{} is not valid UTF-8", path.display())]
    InvalidUtf8 { path: PathBuf },
}

impl ContentError {
    /// Path of the document that failed.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::InvalidUtf8 { path } => path,
        }
    }

    /// Whether the failure is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
