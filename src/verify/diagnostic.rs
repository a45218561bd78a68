//! Reported problems and the fixes attached to them.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

/// Stable identifier for each kind of reported problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageId {
    /// Known name written with the wrong letter case.
    ShouldBeCapitalized,
    /// Known name written with HTML character entities.
    DecodeHtmlEntities,
    /// Prefix or suffix shared by several names.
    AmbiguousValueName,
    /// One suggestion for an ambiguous value.
    ChangeValueTo,
    /// Prefix or suffix of exactly one name.
    ValueShouldBe,
    /// Matches nothing.
    UnrecognizedValue,
    /// List literal not written with `", "` separators.
    InvalidSeparator,
}

impl MessageId {
    /// The identifier as printed in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MessageId::ShouldBeCapitalized => "shouldBeCapitalized",
            MessageId::DecodeHtmlEntities => "decodeHtmlEntities",
            MessageId::AmbiguousValueName => "ambiguousValueName",
            MessageId::ChangeValueTo => "changeValueTo",
            MessageId::ValueShouldBe => "valueShouldBe",
            MessageId::UnrecognizedValue => "unrecognizedValue",
            MessageId::InvalidSeparator => "invalidSeparator",
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replace the source text in `range` with `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    /// Byte range in the analyzed source.
    pub range: Range<usize>,
    /// Replacement text.
    pub text: String,
}

/// A named alternative fix the user may choose to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Always [`MessageId::ChangeValueTo`] today.
    pub message_id: MessageId,
    /// Human-readable description of the change.
    pub message: String,
    /// The change itself.
    pub fix: Fix,
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// What kind of problem this is.
    pub message_id: MessageId,
    /// Rendered message text.
    pub message: String,
    /// Byte range of the offending text in the analyzed source.
    pub range: Range<usize>,
    /// Fix applied automatically, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
    /// Alternatives offered instead of an automatic fix.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

/// Receives diagnostics as the engine produces them.
pub trait Reporter {
    /// Accepts one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
