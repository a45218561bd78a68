//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::replaying::{ReplayingEntityDataClient, ReplayingFileSystem};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::entity_data::EntityDataClient;
use crate::ports::filesystem::FileSystem;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying).
pub struct ServiceContext {
    /// Filesystem for source files and vocabulary data. Shared with the
    /// registry's vocabulary source.
    pub fs: Arc<dyn FileSystem>,
    /// Client for the remote entity-data service.
    pub entity_data: Box<dyn EntityDataClient>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(fs: Arc<dyn FileSystem>, entity_data: Box<dyn EntityDataClient>) -> Self {
        Self { fs, entity_data }
    }

    /// Creates a live context with real disk access and a client for the
    /// entity-data service at `endpoint` (the default endpoint when `None`).
    #[must_use]
    pub fn live(endpoint: Option<&str>) -> Self {
        use crate::adapters::live::entity_data::LiveEntityDataClient;
        use crate::adapters::live::filesystem::LiveFileSystem;

        let client = match endpoint {
            Some(url) => LiveEntityDataClient::with_endpoint(url),
            None => LiveEntityDataClient::new(),
        };
        Self { fs: Arc::new(LiveFileSystem), entity_data: Box::new(client) }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// Both ports are served by the same cassette; each keeps its own
    /// per-method cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: crate::cassette::format::Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;

        Ok(Self {
            fs: Arc::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette))),
            entity_data: Box::new(ReplayingEntityDataClient::new(Arc::new(Mutex::new(
                CassetteReplayer::new(&cassette),
            )))),
        })
    }
}
