//! Replaying adapter for the `EntityDataClient` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::entity_data::{EntityDataClient, EntityFuture, RevisionFuture};
use crate::tags::EntityKind;

/// Serves recorded entity-data responses from a cassette.
pub struct ReplayingEntityDataClient {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingEntityDataClient {
    /// Create a replaying client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl EntityDataClient for ReplayingEntityDataClient {
    fn last_revision(&self) -> RevisionFuture<'_> {
        let output = next_output(&self.replayer, "entity_data", "last_revision");
        Box::pin(async move { replay_result(output, "entity_data::last_revision") })
    }

    fn fetch_entities(&self, _kind: EntityKind) -> EntityFuture<'_> {
        let output = next_output(&self.replayer, "entity_data", "fetch_entities");
        Box::pin(async move { replay_result(output, "entity_data::fetch_entities") })
    }
}
