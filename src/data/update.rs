//! Refreshes the vocabulary files from the remote entity-data service.
//!
//! The local directory records the revision it was built from. A refresh is
//! skipped when that revision already satisfies the caller's request or
//! matches the service's latest revision.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::vocabulary_path;
use crate::context::ServiceContext;
use crate::tags::EntityKind;

/// What a refresh did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Local data already satisfied the requested revision.
    AlreadySatisfied {
        /// Revision found on disk.
        local: u64,
    },
    /// Local data already matches the service.
    UpToDate {
        /// Revision found on disk.
        local: u64,
        /// Latest revision reported by the service.
        remote: u64,
    },
    /// Vocabulary files were rewritten.
    Updated {
        /// Revision found on disk before the refresh.
        from: u64,
        /// Revision now recorded on disk.
        to: u64,
        /// Entries written per kind, in [`EntityKind::ALL`] order.
        counts: Vec<(EntityKind, usize)>,
    },
}

/// Path of the revision marker under `root`.
#[must_use]
pub fn revision_path(root: &Path) -> PathBuf {
    root.join("revision.json")
}

/// Reads the local revision; a missing or unreadable marker counts as 0.
#[must_use]
pub fn local_revision(ctx: &ServiceContext, root: &Path) -> u64 {
    let path = revision_path(root);
    if !ctx.fs.exists(&path) {
        return 0;
    }
    ctx.fs
        .read_to_string(&path)
        .ok()
        .and_then(|text| text.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

/// Refreshes the vocabulary files in `root` if they are stale.
///
/// When `requested` is given and the local revision is at least that value,
/// the service is not contacted at all. A requested revision of 0 counts as
/// no request.
///
/// # Errors
///
/// Returns an error string if the service cannot be queried or a file
/// cannot be written.
pub async fn since(
    ctx: &ServiceContext,
    root: &Path,
    requested: Option<u64>,
) -> Result<UpdateOutcome, String> {
    let local = local_revision(ctx, root);

    if let Some(requested) = requested.filter(|&r| r > 0) {
        if local >= requested {
            debug!(local, requested, "local data satisfies requested revision");
            return Ok(UpdateOutcome::AlreadySatisfied { local });
        }
    }

    let remote = ctx
        .entity_data
        .last_revision()
        .await
        .map_err(|e| format!("Failed to query remote revision: {e}"))?;
    if local >= remote {
        debug!(local, remote, "local data is current");
        return Ok(UpdateOutcome::UpToDate { local, remote });
    }

    info!(from = local, to = remote, "refreshing reference data");
    let mut counts = Vec::with_capacity(EntityKind::ALL.len());
    for kind in EntityKind::ALL {
        let records = ctx
            .entity_data
            .fetch_entities(kind)
            .await
            .map_err(|e| format!("Failed to fetch {}: {e}", kind.plural()))?;
        let names: Vec<String> = records.iter().map(|r| r.vocabulary_name()).collect();
        let json = serde_json::to_string(&names)
            .map_err(|e| format!("Failed to serialize {}: {e}", kind.plural()))?;
        let path = vocabulary_path(root, kind);
        ctx.fs
            .write(&path, &json)
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        debug!(%kind, entries = names.len(), "vocabulary written");
        counts.push((kind, names.len()));
    }

    let path = revision_path(root);
    ctx.fs
        .write(&path, &remote.to_string())
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;

    Ok(UpdateOutcome::Updated { from: local, to: remote, counts })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::data::tests::MemFs;
    use crate::ports::entity_data::{
        EntityDataClient, EntityFuture, EntityRecord, RevisionFuture,
    };

    /// Entity service double with a fixed revision and one record per kind.
    struct FakeService {
        revision: u64,
        revision_calls: AtomicUsize,
    }

    impl EntityDataClient for FakeService {
        fn last_revision(&self) -> RevisionFuture<'_> {
            self.revision_calls.fetch_add(1, Ordering::SeqCst);
            let revision = self.revision;
            Box::pin(async move { Ok(revision) })
        }

        fn fetch_entities(&self, kind: EntityKind) -> EntityFuture<'_> {
            Box::pin(async move {
                let records = if kind == EntityKind::Effect {
                    vec![
                        EntityRecord { id: 1701, name: "Hip to the Jive".into(), ambiguous: true },
                        EntityRecord { id: 1872, name: "Hip to the Jive".into(), ambiguous: true },
                        EntityRecord { id: 9, name: "Sugar Rush".into(), ambiguous: false },
                    ]
                } else {
                    vec![EntityRecord {
                        id: 1,
                        name: format!("first {}", kind.singular()),
                        ambiguous: false,
                    }]
                };
                Ok(records)
            })
        }
    }

    fn context(fs: Arc<MemFs>, revision: u64) -> (ServiceContext, Arc<FakeService>) {
        let service = Arc::new(FakeService { revision, revision_calls: AtomicUsize::new(0) });
        (ServiceContext::new(fs, Box::new(SharedService(service.clone()))), service)
    }

    struct SharedService(Arc<FakeService>);

    impl EntityDataClient for SharedService {
        fn last_revision(&self) -> RevisionFuture<'_> {
            self.0.last_revision()
        }

        fn fetch_entities(&self, kind: EntityKind) -> EntityFuture<'_> {
            self.0.fetch_entities(kind)
        }
    }

    #[tokio::test]
    async fn writes_every_kind_and_revision_when_stale() {
        let fs = Arc::new(MemFs::new());
        let (ctx, _) = context(fs.clone(), 42);

        let outcome = since(&ctx, Path::new("/data"), None).await.unwrap();

        match outcome {
            UpdateOutcome::Updated { from, to, counts } => {
                assert_eq!((from, to), (0, 42));
                assert_eq!(counts.len(), 8);
                assert!(counts.contains(&(EntityKind::Effect, 3)));
            }
            other => panic!("expected update, got {other:?}"),
        }
        assert_eq!(
            fs.get("/data/effects.json").unwrap(),
            r#"["[1701]Hip to the Jive","[1872]Hip to the Jive","Sugar Rush"]"#
        );
        assert_eq!(fs.get("/data/classes.json").unwrap(), r#"["first class"]"#);
        assert_eq!(fs.get("/data/revision.json").unwrap(), "42");
    }

    #[tokio::test]
    async fn skips_when_local_matches_remote() {
        let fs = Arc::new(MemFs::with(&[("/data/revision.json", "42")]));
        let (ctx, _) = context(fs.clone(), 42);

        let outcome = since(&ctx, Path::new("/data"), None).await.unwrap();

        assert_eq!(outcome, UpdateOutcome::UpToDate { local: 42, remote: 42 });
        assert!(fs.get("/data/items.json").is_none());
    }

    #[tokio::test]
    async fn satisfied_request_never_contacts_service() {
        let fs = Arc::new(MemFs::with(&[("/data/revision.json", "50\n")]));
        let (ctx, service) = context(fs, 99);

        let outcome = since(&ctx, Path::new("/data"), Some(45)).await.unwrap();

        assert_eq!(outcome, UpdateOutcome::AlreadySatisfied { local: 50 });
        assert_eq!(service.revision_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn zero_revision_request_still_queries_service() {
        let fs = Arc::new(MemFs::new());
        let (ctx, service) = context(fs.clone(), 7);

        let outcome = since(&ctx, Path::new("/data"), Some(0)).await.unwrap();

        assert_eq!(service.revision_calls.load(Ordering::SeqCst), 1);
        assert!(matches!(outcome, UpdateOutcome::Updated { .. }), "{outcome:?}");
        assert_eq!(fs.get("/data/revision.json").unwrap(), "7");
    }

    #[test]
    fn garbage_revision_marker_counts_as_zero() {
        let fs = Arc::new(MemFs::with(&[("/data/revision.json", "not a number")]));
        let (ctx, _) = context(fs, 1);
        assert_eq!(local_revision(&ctx, Path::new("/data")), 0);
    }
}
