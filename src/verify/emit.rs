//! Turns a classification into at most one diagnostic.

use std::ops::Range;

use super::diagnostic::{Diagnostic, Fix, MessageId, Suggestion};
use super::matcher::Classification;
use crate::config::Options;
use crate::segment::escape_separators;

/// Where the classified value sits in the source.
#[derive(Debug, Clone)]
pub struct SegmentSite {
    /// Byte range of the segment's raw text.
    pub range: Range<usize>,
    /// Whether the owning tag is a list tag.
    pub in_list: bool,
}

impl SegmentSite {
    fn replace_with(&self, text: String) -> Fix {
        Fix { range: self.range.clone(), text }
    }

    /// Replacement text for a canonical name. Inside a list a comma in the
    /// name must stay escaped.
    fn canonical_text(&self, name: &str) -> String {
        if self.in_list {
            escape_separators(name)
        } else {
            name.to_string()
        }
    }
}

/// Builds the diagnostic for `classification`, or `None` when the value is
/// fine or the problem is suppressed by `options`.
///
/// `actual` is the segment's logical text, used in messages.
#[must_use]
pub fn diagnose(
    classification: &Classification<'_>,
    actual: &str,
    site: &SegmentSite,
    options: &Options,
) -> Option<Diagnostic> {
    let (message_id, message, fix, suggestions) = match *classification {
        Classification::Empty | Classification::Exact => return None,
        Classification::WrongCapitalization { expected } => {
            if options.ignore_capitalization {
                return None;
            }
            (
                MessageId::ShouldBeCapitalized,
                format!(r#"Enumerated value name "{actual}" should be capitalized "{expected}"."#),
                Some(site.replace_with(site.canonical_text(expected))),
                Vec::new(),
            )
        }
        Classification::EntityEncoded { expected } => {
            if options.ignore_entities {
                return None;
            }
            (
                MessageId::DecodeHtmlEntities,
                format!(r#"Enumerated value "{actual}" has HTML entities; should be "{expected}"."#),
                Some(site.replace_with(site.canonical_text(expected))),
                Vec::new(),
            )
        }
        Classification::Ambiguous { candidates } => (
            MessageId::AmbiguousValueName,
            format!(r#"Ambiguous value name "{actual}"."#),
            None,
            candidates
                .iter()
                .map(|candidate| Suggestion {
                    message_id: MessageId::ChangeValueTo,
                    message: format!(r#"Change enumerated value to "{candidate}""#),
                    fix: site.replace_with(escape_separators(candidate)),
                })
                .collect(),
        ),
        Classification::SingleCandidate { expected } => (
            MessageId::ValueShouldBe,
            format!(r#"Enumerated value "{actual}" should be "{expected}"."#),
            Some(site.replace_with(escape_separators(expected))),
            Vec::new(),
        ),
        Classification::Unrecognized => {
            if options.ignore_unrecognized {
                return None;
            }
            (
                MessageId::UnrecognizedValue,
                format!(r#"Unrecognized enumerated value name "{actual}"."#),
                None,
                Vec::new(),
            )
        }
    };

    Some(Diagnostic { message_id, message, range: site.range.clone(), fix, suggestions })
}
