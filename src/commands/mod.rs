//! Command dispatch and handlers.

pub mod check;
pub mod update;

use std::env;
use std::path::Path;

use crate::cli::Command;
use crate::context::ServiceContext;

/// Environment variable naming a cassette to replay instead of touching
/// the disk or the network.
pub const REPLAY_ENV: &str = "TAGCHECK_REPLAY";

/// Dispatch a parsed command to its handler.
///
/// When `TAGCHECK_REPLAY` is set to a cassette path, every port interaction
/// is served from that cassette.
///
/// # Errors
///
/// Returns an error string if the context cannot be built or the selected
/// command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let ctx = if let Ok(path) = env::var(REPLAY_ENV) {
        ServiceContext::replaying(Path::new(&path))?
    } else {
        let endpoint = match command {
            Command::UpdateData { endpoint, .. } => endpoint.as_deref(),
            Command::Check { .. } => None,
        };
        ServiceContext::live(endpoint)
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    runtime.block_on(dispatch_with_context(command, &ctx))
}

/// Dispatch a command with the given service context.
async fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Check { paths, fix, config, data_dir, format } => {
            let args = check::CheckArgs {
                paths: paths.clone(),
                fix: *fix,
                config: config.clone(),
                data_dir: data_dir.clone(),
                format: *format,
            };
            check::run(ctx, &args).await
        }
        Command::UpdateData { data_dir, revision, .. } => update::run(ctx, data_dir, *revision).await,
    }
}
