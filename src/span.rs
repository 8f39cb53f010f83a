use crate::{Error, Result};
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// `Position` represents a 1-based line and a 0-based column in a source document.
///
/// # Note
///
/// Columns count content units: Unicode scalar values for [TwineText](crate::TwineText)
/// and bytes for [TwineBytes](crate::TwineBytes).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The first unit of a document.
    pub const fn first() -> Self {
        Self { line: 1, column: 0 }
    }

    /// Position of the unit right after the one at `self`, if it is representable.
    #[inline]
    pub(crate) const fn advance(self, over_line_break: bool) -> Option<Self> {
        if over_line_break {
            match self.line.checked_add(1) {
                Some(line) => Some(Self::new(line, 0)),
                None => None,
            }
        } else {
            match self.column.checked_add(1) {
                Some(column) => Some(Self::new(self.line, column)),
                None => None,
            }
        }
    }

    /// Moves `columns` units to the right on the same line, saturating at `u32::MAX`.
    #[inline]
    pub(crate) fn shift(self, columns: usize) -> Self {
        Self::new(self.line, self.column.saturating_add(saturate(columns)))
    }
}

#[inline]
pub(crate) fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl Default for Position {
    fn default() -> Self {
        Self::first()
    }
}

impl From<(u32, u32)> for Position {
    fn from((line, column): (u32, u32)) -> Self {
        Self::new(line, column)
    }
}

/// An immutable descriptor of a contiguous range in a named source document.
///
/// Both endpoints are inclusive: `end` is the position of the last unit of the range.
///
/// A one-to-one span promises that every unit of the text it describes is exactly one unit
/// of the source, all on a single line. [Span::new] rejects one-to-one spans that cross a
/// line boundary.
///
/// Spans compare and order as the tuple returned by [Span::as_tuple].
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "de::RawSpan"))]
pub struct Span {
    uri: Arc<str>,
    one_to_one: bool,
    start: Position,
    end: Position,
}

impl Span {
    pub fn new<S>(
        uri: S,
        is_one_to_one: bool,
        start_line: u32,
        start_col: u32,
        end_line: u32,
        end_col: u32,
    ) -> Result<Self>
    where
        S: Into<Arc<str>>,
    {
        Self::from_positions(
            uri.into(),
            is_one_to_one,
            Position::new(start_line, start_col),
            Position::new(end_line, end_col),
        )
    }

    pub fn from_positions(
        uri: Arc<str>,
        is_one_to_one: bool,
        start: Position,
        end: Position,
    ) -> Result<Self> {
        if is_one_to_one && start.line != end.line {
            return Err(Error::invalid_span(start.line, end.line));
        }
        Ok(Self::new_unchecked(uri, is_one_to_one, start, end))
    }

    // callers derive `is_one_to_one` from the two lines
    #[inline]
    pub(crate) fn new_unchecked(
        uri: Arc<str>,
        is_one_to_one: bool,
        start: Position,
        end: Position,
    ) -> Self {
        debug_assert!(!is_one_to_one || start.line == end.line);
        Self {
            uri,
            one_to_one: is_one_to_one,
            start,
            end,
        }
    }

    /// Returns a copy of the span that no longer claims a one-to-one correspondence.
    #[must_use]
    pub fn not_one_to_one(&self) -> Self {
        Self {
            one_to_one: false,
            ..self.clone()
        }
    }

    /// Covers `self` followed by `next`, if `next` continues exactly where `self` stops.
    ///
    /// `ends_with_line_break` tells whether the last unit covered by `self` is a line break,
    /// which moves the following position to column 0 of the next line.
    pub(crate) fn cover(&self, next: &Span, ends_with_line_break: bool) -> Option<Span> {
        if self.uri != next.uri {
            return None;
        }
        let adjacent =
            next.start == self.end || self.end.advance(ends_with_line_break) == Some(next.start);
        if !adjacent {
            return None;
        }
        let one_to_one = self.one_to_one && next.one_to_one && self.start.line == next.end.line;
        Some(Self::new_unchecked(
            self.uri.clone(),
            one_to_one,
            self.start,
            next.end,
        ))
    }
}

impl Span {
    #[inline]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[inline]
    pub(crate) fn shared_uri(&self) -> &Arc<str> {
        &self.uri
    }

    #[inline]
    pub fn is_one_to_one(&self) -> bool {
        self.one_to_one
    }

    #[inline]
    pub fn start(&self) -> Position {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Position {
        self.end
    }

    #[inline]
    pub fn start_line(&self) -> u32 {
        self.start.line
    }

    #[inline]
    pub fn start_col(&self) -> u32 {
        self.start.column
    }

    #[inline]
    pub fn end_line(&self) -> u32 {
        self.end.line
    }

    #[inline]
    pub fn end_col(&self) -> u32 {
        self.end.column
    }

    /// `(uri, is_one_to_one, start_line, start_col, end_line, end_col)`
    pub fn as_tuple(&self) -> (&str, bool, u32, u32, u32, u32) {
        (
            &self.uri,
            self.one_to_one,
            self.start.line,
            self.start.column,
            self.end.line,
            self.end.column,
        )
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}-{}:{}",
            self.uri, self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

impl Debug for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)?;
        if !self.one_to_one {
            f.write_str(" (approx)")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod de {
    use super::{Position, Span};
    use crate::Error;
    use std::sync::Arc;

    #[derive(serde::Deserialize)]
    pub(super) struct RawSpan {
        uri: Arc<str>,
        one_to_one: bool,
        start: Position,
        end: Position,
    }

    impl TryFrom<RawSpan> for Span {
        type Error = Error;

        fn try_from(raw: RawSpan) -> Result<Self, Self::Error> {
            Span::from_positions(raw.uri, raw.one_to_one, raw.start, raw.end)
        }
    }
}
