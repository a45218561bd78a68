//! Replaying adapters that serve recorded interactions.
//!
//! Fallible calls are recorded as `{"Ok": value}` or `{"Err": "message"}`.

pub mod entity_data;
pub mod filesystem;

pub use entity_data::ReplayingEntityDataClient;
pub use filesystem::ReplayingFileSystem;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

/// Pops the next recorded output for `port::method`.
///
/// # Panics
///
/// Panics if the replayer lock is poisoned or the cassette has no matching
/// interaction left.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output
}

/// Decodes a recorded `Result` output.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("Err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("Ok").cloned().unwrap_or(output);
    serde_json::from_value(value).map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
