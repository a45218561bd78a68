//! Classifies one candidate value against a registry.

use crate::registry::{decode_entities, Registry};

/// How a value relates to the registry's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'r> {
    /// Nothing written; an empty list entry.
    Empty,
    /// Exactly a canonical name.
    Exact,
    /// A canonical name in the wrong letter case.
    WrongCapitalization {
        /// The canonical spelling.
        expected: &'r str,
    },
    /// A canonical name once HTML entities are decoded.
    EntityEncoded {
        /// The canonical spelling.
        expected: &'r str,
    },
    /// The whole value is a prefix or suffix of several names.
    Ambiguous {
        /// Every name carrying it, in vocabulary order.
        candidates: &'r [String],
    },
    /// The whole value is a prefix or suffix of exactly one name.
    SingleCandidate {
        /// That name.
        expected: &'r str,
    },
    /// None of the above.
    Unrecognized,
}

/// Classifies the logical (unescaped) text of one segment.
#[must_use]
pub fn classify<'r>(registry: &'r Registry, value: &str) -> Classification<'r> {
    if value.is_empty() {
        return Classification::Empty;
    }

    if let Some(canonical) = registry.canonical_of(value) {
        return if canonical == value {
            Classification::Exact
        } else {
            Classification::WrongCapitalization { expected: canonical }
        };
    }

    if let Some(canonical) = registry.canonical_of(&decode_entities(value)) {
        return Classification::EntityEncoded { expected: canonical };
    }

    match registry.disambiguation_candidates(value) {
        [] => Classification::Unrecognized,
        [only] => Classification::SingleCandidate { expected: only.as_str() },
        candidates => Classification::Ambiguous { candidates },
    }
}
