//! A small JavaScript/TypeScript lexer that finds tagged template literals.
//!
//! It understands just enough of the language to avoid false matches:
//! string literals, comments, regular-expression literals and nested
//! `${…}` interpolations. Everything else is skipped token by token.

use super::{TaggedTemplate, TemplateChunk};

/// Keywords after which a `/` starts a regular expression.
const REGEX_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case", "do",
    "else", "yield", "await",
];

/// Finds every tagged template literal in `src`, ordered by position.
///
/// Templates nested inside interpolations are reported as well.
#[must_use]
pub fn scan(src: &str) -> Vec<TaggedTemplate> {
    let mut scanner = Scanner::new(src);
    scanner.scan_code(false);
    let mut found = scanner.found;
    found.sort_by_key(|t| t.range.start);
    found
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    found: Vec<TaggedTemplate>,
    /// Identifier or member chain that ended the last significant token.
    tag: Option<(usize, usize)>,
    /// Start of the member chain when the last token was a `.` after one.
    chain: Option<usize>,
    regex_allowed: bool,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0, found: Vec::new(), tag: None, chain: None, regex_allowed: true }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_byte(&self, ahead: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + ahead).copied()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    /// The last token produced a value: `/` now means division.
    fn operand(&mut self) {
        self.tag = None;
        self.chain = None;
        self.regex_allowed = false;
    }

    /// The last token was an operator or opening punctuation.
    fn operator(&mut self) {
        self.tag = None;
        self.chain = None;
        self.regex_allowed = true;
    }

    /// Scans code until end of input, or until the `}` closing an
    /// interpolation when `nested`.
    fn scan_code(&mut self, nested: bool) {
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            match c {
                c if c.is_whitespace() => self.bump(),
                '/' => match self.peek_byte(1) {
                    Some(b'/') => self.skip_line_comment(),
                    Some(b'*') => self.skip_block_comment(),
                    _ if self.regex_allowed => {
                        self.skip_regex();
                        self.operand();
                    }
                    _ => {
                        self.bump();
                        self.operator();
                    }
                },
                '\'' | '"' => {
                    self.skip_string(c);
                    self.operand();
                }
                '`' => {
                    let tag = self.tag.take();
                    self.scan_template(tag);
                    self.operand();
                }
                '{' => {
                    depth += 1;
                    self.bump();
                    self.operator();
                }
                '}' => {
                    self.bump();
                    if nested && depth == 0 {
                        return;
                    }
                    depth = depth.saturating_sub(1);
                    self.operator();
                }
                ')' | ']' => {
                    self.bump();
                    self.operand();
                }
                '.' => {
                    self.bump();
                    self.extend_chain();
                }
                '?' if self.peek_byte(1) == Some(b'.')
                    && !self.peek_byte(2).is_some_and(|b| b.is_ascii_digit()) =>
                {
                    self.pos += 2;
                    self.extend_chain();
                }
                c if is_identifier_char(c) => self.read_identifier(),
                _ => {
                    self.bump();
                    self.operator();
                }
            }
        }
    }

    /// A member access (`.` or `?.`) continues the chain ending here.
    fn extend_chain(&mut self) {
        let chain = self.tag.take().map(|(start, _)| start);
        self.operator();
        self.chain = chain;
    }

    fn read_identifier(&mut self) {
        let start = self.pos;
        while self.peek().is_some_and(is_identifier_char) {
            self.bump();
        }
        let word = &self.src[start..self.pos];
        let chain_start = self.chain.take().unwrap_or(start);
        self.tag = Some((chain_start, self.pos));
        self.regex_allowed = REGEX_KEYWORDS.contains(&word);
    }

    fn scan_template(&mut self, tag: Option<(usize, usize)>) {
        self.pos += 1;
        let mut chunks = Vec::new();
        let mut expressions = 0;
        let mut chunk_start = self.pos;
        loop {
            let Some(c) = self.peek() else {
                chunks.push(self.chunk(chunk_start, self.pos));
                break;
            };
            match c {
                '\\' => {
                    self.bump();
                    self.bump();
                }
                '`' => {
                    chunks.push(self.chunk(chunk_start, self.pos));
                    self.bump();
                    break;
                }
                '$' if self.peek_byte(1) == Some(b'{') => {
                    chunks.push(self.chunk(chunk_start, self.pos));
                    self.pos += 2;
                    expressions += 1;
                    self.operator();
                    self.scan_code(true);
                    chunk_start = self.pos;
                }
                _ => self.bump(),
            }
        }

        if let Some((start, end)) = tag {
            let tag: String = self.src[start..end].split_whitespace().collect();
            self.found.push(TaggedTemplate { tag, range: start..self.pos, chunks, expressions });
        }
    }

    fn chunk(&self, start: usize, end: usize) -> TemplateChunk {
        TemplateChunk { raw: self.src[start..end].to_string(), range: start..end }
    }

    fn skip_string(&mut self, quote: char) {
        self.bump();
        while let Some(c) = self.peek() {
            match c {
                '\\' => {
                    self.bump();
                    self.bump();
                }
                '\n' => return,
                c if c == quote => {
                    self.bump();
                    return;
                }
                _ => self.bump(),
            }
        }
    }

    fn skip_regex(&mut self) {
        self.bump();
        let mut in_class = false;
        while let Some(c) = self.peek() {
            match c {
                '\\' => {
                    self.bump();
                    self.bump();
                }
                '\n' => return,
                '[' => {
                    in_class = true;
                    self.bump();
                }
                ']' => {
                    in_class = false;
                    self.bump();
                }
                '/' if !in_class => {
                    self.bump();
                    while self.peek().is_some_and(is_identifier_char) {
                        self.bump();
                    }
                    return;
                }
                _ => self.bump(),
            }
        }
    }

    fn skip_line_comment(&mut self) {
        self.pos = self.src[self.pos..].find('\n').map_or(self.src.len(), |i| self.pos + i);
    }

    fn skip_block_comment(&mut self) {
        self.pos = self.src[self.pos + 2..].find("*/").map_or(self.src.len(), |i| self.pos + 2 + i + 2);
    }
}

fn is_identifier_char(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphanumeric()
}
