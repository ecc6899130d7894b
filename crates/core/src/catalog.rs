// Discovery of documentation files in the content directory

use crate::naming;
use std::path::{Path, PathBuf};

/// File suffix that marks a documentation file.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// A markdown file discovered in the content directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    file_name: String,
    path: PathBuf,
    identifier: String,
    description: String,
}

impl ContentItem {
    /// Derive the item for `file_name` located in `dir`.
    ///
    /// Nothing is read from disk.
    pub fn new(dir: &Path, file_name: &str) -> Self {
        let identifier = naming::tool_identifier(file_name).to_string();
        let description = naming::description(&identifier);
        Self {
            file_name: file_name.to_string(),
            path: dir.join(file_name),
            identifier,
            description,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tool identifier, the file name without extension
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn topic(&self) -> String {
        naming::topic(&self.identifier)
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Result of scanning a content directory.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    dir: PathBuf,
    dir_found: bool,
    items: Vec<ContentItem>,
}

impl Catalog {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// False when the directory was missing, not a directory, or could not be
    /// listed. The catalog is then empty, same as for an empty directory.
    pub fn dir_found(&self) -> bool {
        self.dir_found
    }

    /// Items in file name order
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for Catalog {
    type Item = ContentItem;
    type IntoIter = std::vec::IntoIter<ContentItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

fn is_markdown_file(path: &Path, file_name: &str) -> bool {
    file_name.ends_with(MARKDOWN_EXTENSION) && path.is_file()
}

/// Scan the direct children of `dir` for markdown files.
///
/// A missing or unreadable directory yields an empty catalog rather than an
/// error. Entries are returned sorted by file name.
pub fn scan(dir: impl AsRef<Path>) -> Catalog {
    let dir = dir.as_ref();

    if !dir.is_dir() {
        tracing::warn!(
            dir = %dir.display(),
            "Content directory not found, no documentation tools will be available"
        );
        return Catalog {
            dir: dir.to_path_buf(),
            dir_found: false,
            items: Vec::new(),
        };
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Failed to list content directory");
            return Catalog {
                dir: dir.to_path_buf(),
                dir_found: false,
                items: Vec::new(),
            };
        }
    };

    let mut items = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            tracing::debug!(name = ?file_name, "Skipping non UTF-8 file name");
            continue;
        };

        if is_markdown_file(&entry.path(), file_name) {
            items.push(ContentItem::new(dir, file_name));
        }
    }

    items.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    tracing::debug!(dir = %dir.display(), count = items.len(), "Scanned content directory");

    Catalog {
        dir: dir.to_path_buf(),
        dir_found: true,
        items,
    }
}
