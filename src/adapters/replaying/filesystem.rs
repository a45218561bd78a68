//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::{FileSystem, FsResult};

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn flag(&self, method: &str) -> bool {
        let output = next_output(&self.replayer, "fs", method);
        output.as_bool().unwrap_or_else(|| panic!("fs::{method}: expected boolean output"))
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, _path: &Path) -> FsResult<String> {
        replay_result(next_output(&self.replayer, "fs", "read_to_string"), "fs::read_to_string")
    }

    fn write(&self, _path: &Path, _contents: &str) -> FsResult<()> {
        let output = next_output(&self.replayer, "fs", "write");
        if output.is_null() {
            return Ok(());
        }
        replay_result(output, "fs::write")
    }

    fn exists(&self, _path: &Path) -> bool {
        self.flag("exists")
    }

    fn is_dir(&self, _path: &Path) -> bool {
        self.flag("is_dir")
    }

    fn list_dir(&self, _path: &Path) -> FsResult<Vec<String>> {
        replay_result(next_output(&self.replayer, "fs", "list_dir"), "fs::list_dir")
    }
}
