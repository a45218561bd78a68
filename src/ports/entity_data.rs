//! Entity-data port for the remote reference-data service.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::tags::EntityKind;

/// Boxed future returned by [`EntityDataClient::last_revision`].
pub type RevisionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<u64, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Boxed future returned by [`EntityDataClient::fetch_entities`].
pub type EntityFuture<'a> = Pin<
    Box<dyn Future<Output = Result<Vec<EntityRecord>, Box<dyn Error + Send + Sync>>> + Send + 'a>,
>;

/// One named entity as published by the data service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Numeric game identifier.
    pub id: i64,
    /// Display name, possibly entity-encoded.
    pub name: String,
    /// Whether another entity of the same kind shares this display name.
    #[serde(default)]
    pub ambiguous: bool,
}

impl EntityRecord {
    /// The vocabulary spelling: `[id]name` for ambiguous entities, `name` otherwise.
    #[must_use]
    pub fn vocabulary_name(&self) -> String {
        if self.ambiguous {
            format!("[{}]{}", self.id, self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Queries the remote entity-data service.
pub trait EntityDataClient: Send + Sync {
    /// Returns the latest published data revision.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn last_revision(&self) -> RevisionFuture<'_>;

    /// Returns every entity of `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    fn fetch_entities(&self, kind: EntityKind) -> EntityFuture<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_records_carry_their_id() {
        let record = EntityRecord { id: 1701, name: "Hip to the Jive".into(), ambiguous: true };
        assert_eq!(record.vocabulary_name(), "[1701]Hip to the Jive");
    }

    #[test]
    fn plain_records_use_bare_name() {
        let record = EntityRecord { id: 1, name: "Seal Clubber".into(), ambiguous: false };
        assert_eq!(record.vocabulary_name(), "Seal Clubber");
    }
}
