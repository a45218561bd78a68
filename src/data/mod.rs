//! Reference data on disk: the vocabulary files and the pipeline that
//! refreshes them.
//!
//! Directory layout:
//!
//! ```text
//! <data_dir>/
//!   ├── classes.json      ["Seal Clubber", …]
//!   ├── effects.json
//!   ├── …
//!   └── revision.json     1234
//! ```

pub mod update;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::ports::filesystem::FileSystem;
use crate::ports::vocabulary::{VocabularyFuture, VocabularySource};
use crate::tags::EntityKind;

/// Why a vocabulary file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The file exists but could not be read.
    #[error("failed to read {}: {reason}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error text.
        reason: String,
    },
    /// The file is not valid JSON.
    #[error("failed to parse {}: {reason}", path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error text.
        reason: String,
    },
    /// The JSON document is not an array.
    #[error("{kind} vocabulary is not a list")]
    NotAList {
        /// Kind whose data was malformed.
        kind: EntityKind,
    },
    /// An array element is not a string.
    #[error("{kind} vocabulary entry {index} is not a string")]
    NonStringEntry {
        /// Kind whose data was malformed.
        kind: EntityKind,
        /// Position of the offending element.
        index: usize,
    },
}

/// Path of the vocabulary file for `kind` under `root`.
#[must_use]
pub fn vocabulary_path(root: &Path, kind: EntityKind) -> PathBuf {
    root.join(format!("{}.json", kind.plural()))
}

/// Decodes a vocabulary document: a JSON array of strings.
///
/// # Errors
///
/// Returns an error if the text is not JSON, not an array, or holds a
/// non-string element.
pub fn parse_vocabulary(kind: EntityKind, path: &Path, text: &str) -> Result<Vec<String>, DataError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| DataError::Parse { path: path.to_path_buf(), reason: e.to_string() })?;
    let serde_json::Value::Array(entries) = value else {
        return Err(DataError::NotAList { kind });
    };
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            serde_json::Value::String(name) => Ok(name),
            _ => Err(DataError::NonStringEntry { kind, index }),
        })
        .collect()
}

/// Vocabulary source backed by `<plural>.json` files in one directory.
pub struct DataDirectory {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
}

impl DataDirectory {
    /// Creates a source reading from `root` through `fs`.
    #[must_use]
    pub fn new(fs: Arc<dyn FileSystem>, root: &Path) -> Self {
        Self { fs, root: root.to_path_buf() }
    }
}

impl VocabularySource for DataDirectory {
    fn fetch(&self, kind: EntityKind) -> VocabularyFuture<'_> {
        Box::pin(async move {
            let path = vocabulary_path(&self.root, kind);
            if !self.fs.exists(&path) {
                debug!(%kind, path = %path.display(), "no vocabulary file");
                return Ok(Vec::new());
            }
            let text = self
                .fs
                .read_to_string(&path)
                .map_err(|e| DataError::Read { path: path.clone(), reason: e.to_string() })?;
            parse_vocabulary(kind, &path, &text)
        })
    }
}
