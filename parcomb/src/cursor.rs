//! Input positions and spans.
//!
//! [`Input`] is a cheap, copyable view of the unconsumed suffix of the text
//! being parsed. Advancing an `Input` produces a new value pointing further
//! into the same borrowed source; the text itself is never copied, so a
//! failed alternative can simply keep using the `Input` it started from.

/// A half-open byte range of the source: `[start, end)`.
///
/// Every [`Symbol`](crate::Symbol) records the span of input it was matched
/// from.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Creates a new `Span`.
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of bytes covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Is this span empty (start == end)?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Pretty-print for diagnostics (human-readable).
    #[inline]
    pub fn display(&self) -> String {
        format!("span {} to {}", self.start, self.end)
    }
}

/// The unconsumed suffix of a source string, identified by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Input<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Input<'a> {
    /// Creates an input positioned at the start of `src`.
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Byte offset of this suffix within the full source.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The full source this input was created from.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.src
    }

    /// The unconsumed text.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Length of the unconsumed text in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.src.len() - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// The next character, if any.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Returns the input with the next character consumed, together with
    /// that character. `None` at end of input.
    pub fn advance(&self) -> Option<(char, Input<'a>)> {
        let c = self.peek()?;
        Some((
            c,
            Input {
                src: self.src,
                pos: self.pos + c.len_utf8(),
            },
        ))
    }

    /// Span from this position up to (excluding) `rest`'s position.
    #[inline]
    pub fn span_to(&self, rest: &Input<'a>) -> Span {
        Span::new(self.pos, rest.pos)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(src: &'a str) -> Self {
        Input::new(src)
    }
}
