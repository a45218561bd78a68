//! Filesystem port: source files, config, and vocabulary data.

use std::error::Error;
use std::path::Path;

/// Result type of fallible [`FileSystem`] calls.
pub type FsResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Disk access used by the checker and the data pipeline.
///
/// Shared between concurrent file analyses, so implementations must be
/// thread-safe. Tests substitute in-memory or replaying implementations.
pub trait FileSystem: Send + Sync {
    /// Reads a whole file as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or not UTF-8.
    fn read_to_string(&self, path: &Path) -> FsResult<String>;

    /// Replaces the file's contents, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parents cannot be written.
    fn write(&self, path: &Path, contents: &str) -> FsResult<()>;

    /// Returns `true` if anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Names of the entries directly inside `path`, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a readable directory.
    fn list_dir(&self, path: &Path) -> FsResult<Vec<String>>;
}
