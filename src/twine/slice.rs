use super::{Repr, Twine};
use crate::span::Span;
use crate::unit::{Needle, Unit};
use crate::{Error, Result};
use std::ops::{Bound, Range, RangeBounds};

impl<U: Unit> Twine<U> {
    /// Returns the unit at `index` as a one-unit twine.
    ///
    /// Negative indices count from the end. The result carries the point span of that unit
    /// when this twine knows precisely where it came from.
    ///
    /// # Example
    /// ```
    /// # use twine::{Position, TwineText};
    /// let text = TwineText::from_source("abcdef", "foo:bar", Position::first());
    /// let b = text.get(1).unwrap();
    /// assert_eq!(b, "b");
    /// assert_eq!(b.span().unwrap().as_tuple(), ("foo:bar", true, 1, 1, 1, 1));
    /// assert!(text.get(6).is_err());
    /// ```
    pub fn get(&self, index: isize) -> Result<Self> {
        let len = self.len();
        let offset = if index < 0 {
            index + len as isize
        } else {
            index
        };
        if offset < 0 || offset as usize >= len {
            return Err(Error::index_out_of_range(index, len));
        }
        let offset = offset as usize;
        Ok(self.slice_range(offset..offset + 1))
    }

    /// Returns the sub-twine covering `range`.
    ///
    /// Negative bounds count from the end and out-of-range bounds are clamped, so slicing
    /// never fails; an empty result has no span.
    ///
    /// # Example
    /// ```
    /// # use twine::{Position, TwineText};
    /// let text = TwineText::from_source("abcdef\nghijkl", "test.txt", Position::first());
    /// assert_eq!(text.slice(..6).span().unwrap().as_tuple(), ("test.txt", true, 1, 0, 1, 5));
    /// assert_eq!(text.slice(-3..), "jkl");
    /// assert_eq!(text.slice(4..2).span(), None);
    /// ```
    pub fn slice<R>(&self, range: R) -> Self
    where
        R: RangeBounds<isize>,
    {
        let len = self.len() as isize;
        let resolve = |bound: isize| if bound < 0 { bound + len } else { bound };

        let start = match range.start_bound() {
            Bound::Included(&start) => resolve(start),
            Bound::Excluded(&start) => resolve(start).saturating_add(1),
            Bound::Unbounded => 0,
        }
        .clamp(0, len) as usize;
        let end = match range.end_bound() {
            Bound::Included(&end) => resolve(end).saturating_add(1),
            Bound::Excluded(&end) => resolve(end),
            Bound::Unbounded => len,
        }
        .clamp(0, len) as usize;

        self.slice_range(start..end)
    }

    /// Iterates over the units as one-unit twines, see [Twine::get].
    pub fn iter(&self) -> impl Iterator<Item = Self> + '_ {
        (0..self.len()).map(move |offset| self.slice_range(offset..offset + 1))
    }

    /// Returns where the unit at `offset` came from.
    pub fn span_at(&self, offset: usize) -> Option<Span> {
        if offset >= self.len() {
            return None;
        }
        self.slice_range(offset..offset + 1).span().cloned()
    }

    /// `range` must satisfy `range.start <= self.len()` and `range.end <= self.len()`.
    pub(crate) fn slice_range(&self, range: Range<usize>) -> Self {
        if range.start >= range.end {
            return Self::leaf(self.content.slice(range.start..range.start), None);
        }
        if range.start == 0 && range.end == self.len() {
            return self.clone();
        }

        match &self.repr {
            Repr::Leaf(span) => {
                let span = span
                    .as_ref()
                    .and_then(|span| self.leaf_span(span, range.clone()));
                Self::leaf(self.content.slice(range), span)
            }
            Repr::Composite(composite) => {
                let mut pieces = Vec::new();
                let mut offset = 0;
                for part in &composite.parts {
                    let end = offset + part.len();
                    if end > range.start {
                        let from = range.start.max(offset) - offset;
                        let to = range.end.min(end) - offset;
                        pieces.push(part.slice_range(from..to));
                    }
                    if end >= range.end {
                        break;
                    }
                    offset = end;
                }
                Self::concat_all(pieces)
            }
        }
    }

    fn leaf_span(&self, span: &Span, range: Range<usize>) -> Option<Span> {
        // an approximate span cannot be narrowed
        if !span.is_one_to_one() {
            return Some(span.clone());
        }
        // a one-to-one leaf sits on a single line, so only columns move
        let start = span.start();
        Some(Span::new_unchecked(
            span.shared_uri().clone(),
            true,
            start.shift(range.start),
            start.shift(range.end - 1),
        ))
    }
}

impl<U: Unit> Twine<U> {
    /// Splits at every occurrence of `delimiter`, scanning from the start.
    ///
    /// Every piece is a [slice](Twine::slice) of this twine, so empty pieces have no span.
    /// An empty delimiter never matches.
    ///
    /// # Example
    /// ```
    /// # use twine::{Position, TwineText};
    /// let text = TwineText::from_source("one two", "foo:bar", Position::first());
    /// let words = text.split(" ");
    /// assert_eq!(words, ["one", "two"]);
    /// assert_eq!(words[1].span().unwrap().as_tuple(), ("foo:bar", true, 1, 4, 1, 6));
    /// ```
    pub fn split<N>(&self, delimiter: N) -> Vec<Self>
    where
        N: Needle<U>,
    {
        let matches = self.match_ranges(&delimiter.to_units());
        self.pieces_between(&matches)
    }

    /// Splits at every occurrence of `delimiter`, scanning from the end.
    ///
    /// Yields the same pieces as [Twine::split] unless the delimiter can overlap itself.
    pub fn rsplit<N>(&self, delimiter: N) -> Vec<Self>
    where
        N: Needle<U>,
    {
        let matches = self.rmatch_ranges(&delimiter.to_units());
        self.pieces_between(&matches)
    }

    /// Leftmost-first, non-overlapping occurrences of `needle`.
    pub(crate) fn match_ranges(&self, needle: &[U]) -> Vec<Range<usize>> {
        let mut matches = Vec::new();
        if needle.is_empty() {
            return matches;
        }
        let content = self.content();
        let mut from = 0;
        while let Some(idx) = U::find(&content[from..], needle) {
            let start = from + idx;
            from = start + needle.len();
            matches.push(start..from);
        }
        matches
    }

    /// Rightmost-first, non-overlapping occurrences of `needle`, in increasing order.
    fn rmatch_ranges(&self, needle: &[U]) -> Vec<Range<usize>> {
        let mut matches = Vec::new();
        if needle.is_empty() {
            return matches;
        }
        let content = self.content();
        let mut to = content.len();
        while let Some(start) = U::rfind(&content[..to], needle) {
            matches.push(start..start + needle.len());
            to = start;
        }
        matches.reverse();
        matches
    }

    fn pieces_between(&self, matches: &[Range<usize>]) -> Vec<Self> {
        let mut pieces = Vec::with_capacity(matches.len() + 1);
        let mut cursor = 0;
        for m in matches {
            pieces.push(self.slice_range(cursor..m.start));
            cursor = m.end;
        }
        pieces.push(self.slice_range(cursor..self.len()));
        pieces
    }
}

#[cfg(test)]
mod tests {
    use crate::{Position, Span, TwineBytes, TwineText};

    #[test]
    fn test_slice_bounds() {
        let text = TwineText::from("abcdef");
        assert_eq!(text.slice(..), "abcdef");
        assert_eq!(text.slice(2..), "cdef");
        assert_eq!(text.slice(..-2), "abcd");
        assert_eq!(text.slice(-100..2), "ab");
        assert_eq!(text.slice(4..100), "ef");
        assert_eq!(text.slice(1..=2), "bc");
        assert_eq!(text.slice(..=-1), "abcdef");
        assert!(text.slice(5..1).is_empty());
        assert!(text.slice(..=-100).is_empty());
    }

    #[test]
    fn test_slice_approximate_leaf() {
        let approx = Span::new("u", false, 3, 1, 5, 2).unwrap();
        let text = TwineText::new("replaced", Some(approx.clone()));
        assert_eq!(text.slice(2..4).span(), Some(&approx));
        assert_eq!(text.get(0).unwrap().span(), Some(&approx));
        assert_eq!(text.slice(2..2).span(), None);
    }

    #[test]
    fn test_slice_composite_crosses_parts() {
        let text = TwineBytes::from_source(b"ab\ncd\nef", "u", Position::first());
        let middle = text.slice(1..7);
        assert_eq!(middle, "b\ncd\ne");
        assert_eq!(middle.span(), Span::new("u", false, 1, 1, 3, 0).ok().as_ref());
        assert_eq!(middle.parts(), ["b\n", "cd\n", "e"]);

        let within = text.slice(3..5);
        assert_eq!(within.parts().len(), 1);
        assert_eq!(within.span(), Span::new("u", true, 2, 0, 2, 1).ok().as_ref());
    }

    #[test]
    fn test_slice_one_to_one_leaf() {
        let text = TwineBytes::new(b"abc\n", Span::new("u", true, 4, 7, 4, 10).ok());
        assert_eq!(text.slice(1..3).span(), Span::new("u", true, 4, 8, 4, 9).ok().as_ref());
        assert_eq!(text.get(-1).unwrap().span(), Span::new("u", true, 4, 10, 4, 10).ok().as_ref());

        let long = "x".repeat(50_000);
        let line = TwineText::from_source(long.as_str(), "min.js", Position::first());
        let spans = line.iter().filter_map(|unit| unit.span().cloned()).collect::<Vec<_>>();
        assert_eq!(spans.len(), 50_000);
        assert_eq!(spans[49_999], Span::new("min.js", true, 1, 49_999, 1, 49_999).unwrap());
    }

    #[test]
    fn test_span_at() {
        let text = TwineText::from_source("ab\ncd", "u", (2, 4));
        assert_eq!(text.span_at(1), Span::new("u", true, 2, 5, 2, 5).ok());
        assert_eq!(text.span_at(3), Span::new("u", true, 3, 0, 3, 0).ok());
        assert_eq!(text.span_at(5), None);
        assert_eq!(TwineText::from("ab").span_at(0), None);
    }

    #[test]
    fn test_split_empty_delimiter() {
        let text = TwineText::from_source("abc", "u", Position::first());
        let pieces = text.split("");
        assert_eq!(pieces, ["abc"]);
        assert_eq!(pieces[0].span(), text.span());
    }

    #[test]
    fn test_rsplit_overlapping_delimiter() {
        let text = TwineText::from("aaa");
        assert_eq!(text.split("aa"), ["", "a"]);
        assert_eq!(text.rsplit("aa"), ["a", ""]);
    }
}
