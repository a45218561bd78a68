//! Live filesystem adapter using `std::fs`.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::ports::filesystem::{FileSystem, FsResult};

/// Real disk access. Writes are staged in a sibling temporary file and
/// renamed over the target.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        Ok(fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> FsResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut staging = path.as_os_str().to_owned();
        staging.push(".tagcheck-tmp");
        fs::write(&staging, contents)?;
        fs::rename(&staging, path)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> FsResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            let name = entry?.file_name();
            match name.into_string() {
                Ok(name) => names.push(name),
                Err(raw) => debug!(dir = %path.display(), name = ?raw, "skipping non-UTF-8 entry"),
            }
        }
        names.sort();
        Ok(names)
    }
}
