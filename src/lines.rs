use crate::span::{saturate, Position, Span};
use crate::Unit;
use std::ops::Range;
use std::sync::Arc;

/// Line layout of a content buffer whose first unit sits at a known [Position].
///
/// A line break belongs to the line it ends: the position of a `'\n'` is on the same line as
/// the units before it, and only units strictly after it move to the next line.
#[derive(Debug, Clone)]
pub(crate) struct LineBreaks {
    start: Position,
    // offsets of line break units, increasing
    offsets: Vec<usize>,
}

impl LineBreaks {
    pub fn scan<U: Unit>(units: &[U], start: Position) -> Self {
        Self {
            start,
            offsets: U::line_breaks(units),
        }
    }

    /// Returns the position of the unit at `offset`.
    pub fn position(&self, offset: usize) -> Position {
        let before = self.offsets.partition_point(|&brk| brk < offset);
        match before.checked_sub(1).map(|idx| self.offsets[idx]) {
            None => self.start.shift(offset),
            Some(last_break) => Position::new(
                self.start.line.saturating_add(saturate(before)),
                saturate(offset - last_break - 1),
            ),
        }
    }

    /// Returns the span covering the units in `range`, or `None` if the range is empty.
    pub fn span(&self, uri: &Arc<str>, range: Range<usize>) -> Option<Span> {
        if range.end <= range.start {
            return None;
        }
        let first = self.position(range.start);
        let last = self.position(range.end - 1);
        Some(Span::new_unchecked(
            uri.clone(),
            first.line == last.line,
            first,
            last,
        ))
    }

    /// Offset ranges of the physical lines, each ending right after its line break.
    pub fn line_ranges(&self, len: usize) -> Vec<Range<usize>> {
        let mut ranges = Vec::with_capacity(self.offsets.len() + 1);
        let mut line_start = 0;
        for &brk in &self.offsets {
            ranges.push(line_start..brk + 1);
            line_start = brk + 1;
        }
        if line_start < len {
            ranges.push(line_start..len);
        }
        ranges
    }
}

#[cfg(test)]
mod tests {
    use super::LineBreaks;
    use crate::span::{Position, Span};
    use std::sync::Arc;

    fn spans(text: &str, start: (u32, u32), ranges: &[(usize, usize)]) -> Vec<Option<Span>> {
        let uri: Arc<str> = "t".into();
        let lines = LineBreaks::scan(text.as_bytes(), start.into());
        ranges
            .iter()
            .map(|&(from, to)| lines.span(&uri, from..to))
            .collect()
    }

    #[test]
    fn test_position() {
        let lines = LineBreaks::scan(b"abc\ndef\n\nghij\n\n", Position::first());
        assert_eq!(lines.position(0), Position::new(1, 0));
        // a line break stays on the line it ends
        assert_eq!(lines.position(3), Position::new(1, 3));
        assert_eq!(lines.position(4), Position::new(2, 0));
        assert_eq!(lines.position(8), Position::new(3, 0));
        assert_eq!(lines.position(14), Position::new(5, 0));
        assert_eq!(lines.position(14), lines.position(14));

        let shifted = LineBreaks::scan(b"abc\ndef", Position::new(3, 10));
        assert_eq!(shifted.position(2), Position::new(3, 12));
        assert_eq!(shifted.position(6), Position::new(4, 2));
    }

    #[test]
    fn test_position_saturates() {
        let lines = LineBreaks::scan(b"ab\ncd", Position::new(u32::MAX, u32::MAX - 1));
        assert_eq!(lines.position(1), Position::new(u32::MAX, u32::MAX));
        assert_eq!(lines.position(2), Position::new(u32::MAX, u32::MAX));
        assert_eq!(lines.position(4), Position::new(u32::MAX, 1));
    }

    #[test]
    fn test_span() {
        let result = spans("abc\ndef", (1, 0), &[(0, 7), (0, 3), (2, 6), (3, 3), (5, 2)]);
        assert_eq!(
            result,
            vec![
                Span::new("t", false, 1, 0, 2, 2).ok(),
                Span::new("t", true, 1, 0, 1, 2).ok(),
                Span::new("t", false, 1, 2, 2, 1).ok(),
                None,
                None,
            ]
        );

        assert_eq!(
            spans("\n", (1, 0), &[(0, 1)]),
            vec![Span::new("t", true, 1, 0, 1, 0).ok()]
        );
        assert_eq!(
            spans("\n\n", (1, 0), &[(0, 2)]),
            vec![Span::new("t", false, 1, 0, 2, 0).ok()]
        );
    }

    #[test]
    fn test_line_ranges() {
        let lines = LineBreaks::scan(b"abcdef\ng\n", Position::first());
        assert_eq!(lines.line_ranges(9), vec![0..7, 7..9]);
        let lines = LineBreaks::scan(b"abcdef\ng", Position::first());
        assert_eq!(lines.line_ranges(8), vec![0..7, 7..8]);
        let lines = LineBreaks::scan(b"abc", Position::first());
        assert_eq!(lines.line_ranges(3), vec![0..3]);
    }
}
