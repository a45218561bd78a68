//! Vocabulary port: where registries get their raw name lists.

use std::future::Future;
use std::pin::Pin;

use crate::data::DataError;
use crate::tags::EntityKind;

/// Boxed future type alias used by [`VocabularySource`] to keep the trait dyn-compatible.
pub type VocabularyFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<String>, DataError>> + Send + 'a>>;

/// Supplies the raw (possibly entity-encoded) display names for a kind.
pub trait VocabularySource: Send + Sync {
    /// Fetches the vocabulary for `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the vocabulary cannot be read or is malformed.
    fn fetch(&self, kind: EntityKind) -> VocabularyFuture<'_>;
}
