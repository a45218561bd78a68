//! Source text and the tagged template literals found in it.

mod scanner;

use std::ops::Range;

pub use scanner::scan;

/// A 1-based line and column (column counted in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

/// Source text with a line index for offset → position mapping.
#[derive(Debug, Clone)]
pub struct SourceText {
    text: String,
    line_starts: Vec<usize>,
}

impl SourceText {
    /// Indexes `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    /// The full text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Maps a byte offset to a line and column. Offsets past the end clamp
    /// to the end of the text.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let column = self.text[self.line_starts[line]..offset].chars().count() + 1;
        Position { line: line + 1, column }
    }

    /// Finds every tagged template literal in the text.
    #[must_use]
    pub fn tagged_templates(&self) -> Vec<TaggedTemplate> {
        scan(&self.text)
    }
}

/// One literal-only piece of a template, between delimiters or
/// interpolations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateChunk {
    /// The chunk's text as written (escapes untouched).
    pub raw: String,
    /// Byte range of the chunk in the source, delimiters excluded.
    pub range: Range<usize>,
}

/// A template literal preceded by a tag expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedTemplate {
    /// Source text of the tag, e.g. `$items` or `obj.$item`.
    pub tag: String,
    /// Byte range of the whole expression, tag through closing backtick.
    pub range: Range<usize>,
    /// Literal chunks in order; one more than the interpolation count.
    pub chunks: Vec<TemplateChunk>,
    /// Number of `${…}` interpolations.
    pub expressions: usize,
}

impl TaggedTemplate {
    /// Returns `true` if any part of the value is computed at runtime.
    #[must_use]
    pub fn has_interpolation(&self) -> bool {
        self.expressions > 0
    }
}
