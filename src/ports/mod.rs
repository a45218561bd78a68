//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the analysis core and an
//! external system (disk, vocabulary storage, the remote entity-data
//! service). Implementations live in `src/adapters/` and `src/data/`.

pub mod entity_data;
pub mod filesystem;
pub mod vocabulary;

pub use entity_data::{EntityDataClient, EntityFuture, EntityRecord, RevisionFuture};
pub use filesystem::FileSystem;
pub use vocabulary::{VocabularyFuture, VocabularySource};
