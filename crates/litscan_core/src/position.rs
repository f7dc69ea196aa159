//! The cursor threaded through every decoding routine.

use crate::text::{TextPos, TextSpan};
use std::fmt;

/// A location in the source text together with the line it belongs to.
///
/// `Position` is `Copy` and passed by value: each decoding routine takes the
/// position it starts at and hands back the position it stopped at. Nothing
/// holds on to a shared, mutable cursor.
///
/// Invariant: `offset >= line_start`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Position {
    /// Byte offset into the source text.
    pub offset: usize,
    /// Byte offset at which the current line begins.
    pub line_start: usize,
    /// Line counter. Callers choose the base; the decoders only increment it.
    pub cur_line: u32,
}

impl Position {
    #[inline]
    pub fn new(offset: usize, line_start: usize, cur_line: u32) -> Self {
        debug_assert!(offset >= line_start);
        Self {
            offset,
            line_start,
            cur_line,
        }
    }

    /// The position at the very start of a text, on line 1.
    #[inline]
    pub fn start() -> Self {
        Self::new(0, 0, 1)
    }

    /// The same line, `bytes` further along.
    #[inline]
    pub fn advance(self, bytes: usize) -> Self {
        Self {
            offset: self.offset + bytes,
            ..self
        }
    }

    /// The same line, at an absolute offset.
    #[inline]
    pub fn at(self, offset: usize) -> Self {
        Self { offset, ..self }
    }

    /// Record a line break ending just before `offset`: the next line starts
    /// there and the line counter moves on by one.
    #[inline]
    pub fn new_line_at(self, offset: usize) -> Self {
        Self {
            offset,
            line_start: offset,
            cur_line: self.cur_line + 1,
        }
    }

    /// Zero-based byte column within the current line.
    #[inline]
    pub fn column(&self) -> usize {
        self.offset - self.line_start
    }

    /// The offset as a `TextPos`, clamped to `TextPos::MAX`.
    #[inline]
    pub fn text_pos(&self) -> TextPos {
        TextPos::try_from(self.offset).unwrap_or(TextPos::MAX)
    }

    /// The span from this position up to (but excluding) `end`.
    #[inline]
    pub fn span_to(&self, end: Position) -> TextSpan {
        TextSpan::from_bounds(self.text_pos(), end.text_pos())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}:{}",
            self.offset,
            self.cur_line,
            self.column()
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.cur_line, self.column() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_keeps_line() {
        let pos = Position::new(4, 2, 3).advance(5);
        assert_eq!(pos.offset, 9);
        assert_eq!(pos.line_start, 2);
        assert_eq!(pos.cur_line, 3);
        assert_eq!(pos.column(), 7);
    }

    #[test]
    fn test_new_line_at() {
        let pos = Position::start().advance(3).new_line_at(4);
        assert_eq!(pos, Position::new(4, 4, 2));
        assert_eq!(pos.column(), 0);
    }

    #[test]
    fn test_span_to() {
        let start = Position::new(2, 0, 1);
        let span = start.span_to(start.advance(4));
        assert_eq!(span, TextSpan::new(2, 4));
    }

    #[test]
    fn test_text_pos_clamps_large_offsets() {
        let pos = Position::new(usize::MAX, 0, 1);
        assert_eq!(pos.text_pos(), TextPos::MAX);
        assert_eq!(Position::new(7, 0, 1).text_pos(), 7);
    }

    #[test]
    fn test_display() {
        let pos = Position::new(12, 10, 2);
        assert_eq!(format!("{}", pos), "2:3");
        assert_eq!(format!("{:?}", pos), "12@2:2");
    }
}
