//! Lazily populated registries for every entity kind.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, warn};

use super::Registry;
use crate::ports::vocabulary::VocabularySource;
use crate::tags::EntityKind;

/// One registry slot per entity kind, shared by every analysis in a run.
///
/// Slots are filled on first request. Concurrent first requests for the same
/// kind wait on a single load. A slot given an explicit override is filled
/// up front and never consults the source.
pub struct RegistrySet {
    source: Arc<dyn VocabularySource>,
    slots: [OnceCell<Arc<Registry>>; 8],
}

impl RegistrySet {
    /// Creates an empty set that loads vocabularies from `source`.
    #[must_use]
    pub fn new(source: Arc<dyn VocabularySource>) -> Self {
        Self { source, slots: std::array::from_fn(|_| OnceCell::new()) }
    }

    /// Replaces the vocabulary for `kind`, discarding any loaded registry.
    pub fn override_vocabulary(&mut self, kind: EntityKind, vocabulary: &[String]) {
        debug!(%kind, entries = vocabulary.len(), "using override vocabulary");
        self.slots[kind.index()] = OnceCell::from(Arc::new(Registry::build(kind, vocabulary)));
    }

    /// Returns the registry for `kind`, loading it on first use.
    ///
    /// A vocabulary that cannot be loaded or decoded is replaced by an empty
    /// one, so the registry holds only the sentinel.
    pub async fn get(&self, kind: EntityKind) -> Arc<Registry> {
        self.slots[kind.index()]
            .get_or_init(|| async {
                let vocabulary = match self.source.fetch(kind).await {
                    Ok(names) => names,
                    Err(e) => {
                        warn!(%kind, error = %e, "falling back to an empty vocabulary");
                        Vec::new()
                    }
                };
                debug!(%kind, entries = vocabulary.len(), "vocabulary loaded");
                Arc::new(Registry::build(kind, &vocabulary))
            })
            .await
            .clone()
    }

    /// Returns `true` once `kind` has a registry, loaded or overridden.
    #[must_use]
    pub fn is_loaded(&self, kind: EntityKind) -> bool {
        self.slots[kind.index()].initialized()
    }
}
