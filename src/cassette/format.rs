//! Cassette data structures for replaying port interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position in the recording.
    pub seq: u64,
    /// Port name (`"fs"` or `"entity_data"`).
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    #[serde(default)]
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hand_written_yaml() {
        let yaml = r#"
name: update-data
recorded_at: 2026-03-01T12:00:00Z
interactions:
  - seq: 0
    port: entity_data
    method: last_revision
    output: {Ok: 7}
  - seq: 1
    port: fs
    method: exists
    input: {path: /data/revision.json}
    output: false
"#;
        let cassette: Cassette = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].input, serde_json::Value::Null);
        assert_eq!(cassette.interactions[0].output, serde_json::json!({"Ok": 7}));
        assert_eq!(cassette.interactions[1].port, "fs");
    }
}
