//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Serves a cassette's interactions in recorded order, independently for
/// each port/method pair.
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Removes and returns the next interaction for `port::method`.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the pair,
    /// listing the pairs that still have interactions queued.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let key = (port.to_string(), method.to_string());
        if let Some(interaction) = self.queues.get_mut(&key).and_then(VecDeque::pop_front) {
            return interaction;
        }
        let mut remaining: Vec<String> = self
            .queues
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|((p, m), queue)| format!("{p}::{m} ({})", queue.len()))
            .collect();
        remaining.sort();
        panic!(
            "Cassette exhausted for port={port:?} method={method:?}. Remaining: [{}]",
            remaining.join(", ")
        );
    }

    /// Returns `true` once every interaction has been served.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.queues.values().all(VecDeque::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!({}), output }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { name: "test".into(), recorded_at: Utc::now(), interactions }
    }

    #[test]
    fn serves_each_pair_in_recorded_order() {
        let cassette = make_cassette(vec![
            interaction(0, "entity_data", "fetch_entities", json!({"Ok": []})),
            interaction(1, "fs", "write", json!(null)),
            interaction(2, "entity_data", "fetch_entities", json!({"Ok": [{"id": 1, "name": "x"}]})),
        ]);

        let mut replayer = CassetteReplayer::new(&cassette);

        assert_eq!(replayer.next_interaction("fs", "write").seq, 1);
        assert_eq!(replayer.next_interaction("entity_data", "fetch_entities").seq, 0);
        assert!(!replayer.is_drained());
        assert_eq!(replayer.next_interaction("entity_data", "fetch_entities").seq, 2);
        assert!(replayer.is_drained());
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted")]
    fn exhausted_pair_panics() {
        let cassette = make_cassette(vec![interaction(0, "fs", "exists", json!(true))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("fs", "exists");
        let _ = replayer.next_interaction("fs", "exists");
    }

    #[test]
    #[should_panic(expected = "Remaining: [fs::exists (1)]")]
    fn panic_lists_remaining_pairs() {
        let cassette = make_cassette(vec![interaction(0, "fs", "exists", json!(true))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("entity_data", "last_revision");
    }
}
