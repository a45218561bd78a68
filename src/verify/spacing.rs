//! Reports chunks whose values are not separated canonically.

use super::diagnostic::{Diagnostic, Fix, MessageId};
use crate::segment::{join_canonical, RawSegment};
use crate::source::TemplateChunk;

/// Rebuilds the chunk from its segments joined by `", "` and reports one
/// diagnostic if that differs from what is written. The fix rewrites the
/// chunk's whole interior.
#[must_use]
pub fn check(chunk: &TemplateChunk, segments: &[RawSegment<'_>]) -> Option<Diagnostic> {
    let expected = join_canonical(segments);
    if expected == chunk.raw {
        return None;
    }
    Some(Diagnostic {
        message_id: MessageId::InvalidSeparator,
        message: "Enumerated value constants should be separated by a comma and space.".to_string(),
        range: chunk.range.clone(),
        fix: Some(Fix { range: chunk.range.clone(), text: expected }),
        suggestions: Vec::new(),
    })
}
