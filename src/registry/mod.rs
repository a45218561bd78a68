//! Reference registries of canonical entity names.
//!
//! A [`Registry`] is built once from a flat vocabulary and is read-only
//! afterwards. It answers two questions for the matcher: what is the
//! canonical spelling of a case-folded name, and which canonical names have
//! a given folded text as a prefix or suffix.

pub mod set;

use std::collections::HashMap;

use tracing::warn;

use crate::tags::EntityKind;

pub use set::RegistrySet;

/// Reserved vocabulary entry representing an absent entity.
pub const SENTINEL: &str = "none";

/// Shortest prefix/suffix registered in the disambiguation index.
pub const SUBSTRING_MIN_LENGTH: usize = 5;

/// Decodes HTML character entities (`&trade;`, `&#233;`, …) in `text`.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Two vocabulary entries that fold to the same lowercase key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// The shared case-folded key.
    pub folded: String,
    /// The earlier entry that is no longer reachable through the key.
    pub shadowed: String,
    /// The later entry the key now resolves to.
    pub winner: String,
}

/// Canonicalization map and disambiguation index for one entity kind.
#[derive(Debug, Clone)]
pub struct Registry {
    names: Vec<String>,
    canonical: HashMap<String, String>,
    index: HashMap<String, Vec<String>>,
    collisions: Vec<Collision>,
}

impl Registry {
    /// Builds a registry from raw vocabulary entries.
    ///
    /// Entries are entity-decoded, the sentinel is prepended, and the
    /// prefix/suffix index is built only for kinds that need it. When two
    /// entries fold to the same key the later one wins; each such shadowing
    /// is recorded and logged.
    #[must_use]
    pub fn build(kind: EntityKind, vocabulary: &[String]) -> Self {
        let names: Vec<String> = std::iter::once(SENTINEL.to_string())
            .chain(vocabulary.iter().map(|entry| decode_entities(entry)))
            .collect();

        let mut canonical: HashMap<String, String> = HashMap::with_capacity(names.len());
        let mut collisions = Vec::new();
        for name in &names {
            let folded = name.to_lowercase();
            if let Some(previous) = canonical.insert(folded.clone(), name.clone()) {
                if previous != *name {
                    warn!(%kind, %folded, shadowed = %previous, winner = %name, "vocabulary names collide when case-folded");
                    collisions.push(Collision { folded, shadowed: previous, winner: name.clone() });
                }
            }
        }

        let index = if kind.requires_disambiguation() {
            build_index(names.iter().skip(1))
        } else {
            HashMap::new()
        };

        Self { names, canonical, index, collisions }
    }

    /// All canonical names in load order, sentinel first.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of vocabulary entries, sentinel included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// A registry always holds at least the sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Folded keys that were shadowed during construction.
    #[must_use]
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Returns the canonical spelling of `text`, compared case-insensitively.
    #[must_use]
    pub fn canonical_of(&self, text: &str) -> Option<&str> {
        self.canonical.get(&text.to_lowercase()).map(String::as_str)
    }

    /// Returns every canonical name that has the whole folded `text` as a
    /// registered prefix or suffix, in vocabulary order.
    #[must_use]
    pub fn disambiguation_candidates(&self, text: &str) -> &[String] {
        self.index.get(&text.to_lowercase()).map_or(&[], Vec::as_slice)
    }
}

/// Maps every folded prefix and suffix of length `SUBSTRING_MIN_LENGTH` up
/// to `len - 1` characters to the names carrying it.
fn build_index<'a>(names: impl Iterator<Item = &'a String>) -> HashMap<String, Vec<String>> {
    let mut index: HashMap<String, Vec<String>> = HashMap::new();
    for name in names {
        let folded = name.to_lowercase();
        let boundaries: Vec<usize> =
            folded.char_indices().map(|(i, _)| i).chain(std::iter::once(folded.len())).collect();
        let char_count = boundaries.len() - 1;
        for length in SUBSTRING_MIN_LENGTH..char_count {
            let suffix = &folded[boundaries[char_count - length]..];
            let prefix = &folded[..boundaries[length]];
            for key in [suffix, prefix] {
                let holders = index.entry(key.to_string()).or_default();
                // Names are visited one at a time, so a repeat is always the last entry.
                if holders.last() != Some(name) {
                    holders.push(name.clone());
                }
            }
        }
    }
    index
}
