//! Splits the raw text of one literal chunk into candidate values.
//!
//! Offsets are byte offsets relative to the start of the chunk's raw text,
//! so the splitter can be exercised without any source or parser.

use std::borrow::Cow;

/// Separator written between list values in canonical form.
pub const CANONICAL_SEPARATOR: &str = ", ";

/// One candidate value, as written, with its position in the chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSegment<'a> {
    /// Text exactly as written, escapes included.
    pub raw: &'a str,
    /// Offset of the first byte of `raw` within the chunk.
    pub start: usize,
    /// Offset just past the last byte of `raw` within the chunk.
    pub end: usize,
}

impl RawSegment<'_> {
    /// The value used for lookups: escaped separators turned into commas.
    #[must_use]
    pub fn logical(&self) -> Cow<'_, str> {
        unescape(self.raw)
    }
}

/// Splits `raw` into segments.
///
/// The chunk is first trimmed of surrounding whitespace. Single-value chunks
/// yield exactly one segment. List chunks are split on commas not escaped by
/// a single backslash, with whitespace around each separator dropped. An
/// empty or all-whitespace chunk yields one empty segment.
#[must_use]
pub fn split(raw: &str, is_list: bool) -> Vec<RawSegment<'_>> {
    let lead = raw.len() - raw.trim_start().len();
    let body = raw[lead..].trim_end();

    if !is_list {
        return vec![RawSegment { raw: body, start: lead, end: lead + body.len() }];
    }

    let mut segments = Vec::new();
    let mut segment_start = 0;
    for (separator_start, separator_end) in separators(body) {
        segments.push(RawSegment {
            raw: &body[segment_start..separator_start],
            start: lead + segment_start,
            end: lead + separator_start,
        });
        segment_start = separator_end;
    }
    segments.push(RawSegment {
        raw: &body[segment_start..],
        start: lead + segment_start,
        end: lead + body.len(),
    });
    segments
}

/// Byte ranges of every separator in `body`, each spanning the comma and
/// the whitespace on both sides of it.
fn separators(body: &str) -> Vec<(usize, usize)> {
    let bytes = body.as_bytes();
    let mut found = Vec::new();
    let mut floor = 0;
    for (comma, _) in body.match_indices(',') {
        if is_escaped(bytes, comma) {
            continue;
        }
        let start = floor + body[floor..comma].trim_end().len();
        let after = &body[comma + 1..];
        let end = comma + 1 + (after.len() - after.trim_start().len());
        found.push((start, end));
        floor = end;
    }
    found
}

/// A comma is escaped by a backslash that is not itself escaped.
fn is_escaped(bytes: &[u8], comma: usize) -> bool {
    comma >= 1 && bytes[comma - 1] == b'\\' && !(comma >= 2 && bytes[comma - 2] == b'\\')
}

/// Replaces every escaped separator (`\,`) with a plain comma.
#[must_use]
pub fn unescape(raw: &str) -> Cow<'_, str> {
    if !raw.contains("\\,") {
        return Cow::Borrowed(raw);
    }
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut copied = 0;
    for (backslash, _) in raw.match_indices("\\,") {
        if backslash > 0 && bytes[backslash - 1] == b'\\' {
            continue;
        }
        out.push_str(&raw[copied..backslash]);
        out.push(',');
        copied = backslash + 2;
    }
    out.push_str(&raw[copied..]);
    Cow::Owned(out)
}

/// Escapes every comma in a canonical name so a list literal keeps it as
/// part of one value.
#[must_use]
pub fn escape_separators(name: &str) -> String {
    name.replace(',', "\\,")
}

/// Joins segments with the canonical separator.
#[must_use]
pub fn join_canonical(segments: &[RawSegment<'_>]) -> String {
    segments.iter().map(|s| s.raw).collect::<Vec<_>>().join(CANONICAL_SEPARATOR)
}
