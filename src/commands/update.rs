//! `tagcheck update-data` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::data::update::{since, UpdateOutcome};

/// Execute the `update-data` command.
///
/// # Errors
///
/// Returns an error string if the entity-data service cannot be queried or
/// the vocabulary files cannot be written.
pub async fn run(ctx: &ServiceContext, data_dir: &Path, revision: Option<u64>) -> Result<(), String> {
    let outcome = since(ctx, data_dir, revision).await?;
    for line in summary(&outcome) {
        println!("{line}");
    }
    Ok(())
}

fn summary(outcome: &UpdateOutcome) -> Vec<String> {
    match outcome {
        UpdateOutcome::AlreadySatisfied { local } => {
            vec![format!("Local data is at revision {local}; nothing to do.")]
        }
        UpdateOutcome::UpToDate { local, remote } => {
            vec![format!("Local data is up to date (revision {local}, remote {remote}).")]
        }
        UpdateOutcome::Updated { from, to, counts } => {
            let mut lines = vec![format!("Updated data from revision {from} to {to}.")];
            lines.extend(counts.iter().map(|(kind, count)| format!("  {:<10} {count}", kind.plural())));
            lines
        }
    }
}
