use super::Twine;
use crate::content::Content;
use crate::source_map::{SourceMap, SourceMapEntry};
use crate::span::Span;
use crate::unit::{Needle, Unit};
use std::borrow::Borrow;
use std::iter::Sum;
use std::ops::Add;
use tracing::trace;

impl<U: Unit> Twine<U> {
    /// Returns `self` followed by `other`.
    ///
    /// The parts of both operands are flattened into the result, so concatenation is
    /// associative on parts as well as on content. When `other` continues exactly where
    /// `self` stops in the same document, the spans merge into one; otherwise the result has
    /// no span and its [source map](Twine::source_map) keeps the provenance of each part.
    /// An empty operand leaves the other one unchanged.
    ///
    /// # Example
    /// ```
    /// # use twine::{Span, TwineText};
    /// let foo = TwineText::new("foo ", Span::new("foo:bar", true, 1, 0, 1, 3).ok());
    /// let baz = TwineText::new("baz", Span::new("foo:bar", true, 1, 4, 1, 6).ok());
    /// let joined = &foo + &baz;
    /// assert_eq!(joined.span().unwrap().as_tuple(), ("foo:bar", true, 1, 0, 1, 6));
    /// assert_eq!(joined.parts(), [foo, baz]);
    /// ```
    pub fn concat(&self, other: &Self) -> Self {
        Self::concat_all(vec![self.clone(), other.clone()])
    }

    /// Concatenates `pieces`, merging their spans when they are contiguous.
    pub(crate) fn concat_all(pieces: Vec<Self>) -> Self {
        let pieces = pieces
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>();
        let span = Self::cover_all(&pieces);
        Self::assemble(pieces, span)
    }

    fn cover_all(pieces: &[Self]) -> Option<Span> {
        let (first, rest) = pieces.split_first()?;
        let mut covered = first.span()?.clone();
        let mut ends_with_line_break = first.ends_with_line_break();
        for piece in rest {
            covered = covered.cover(piece.span()?, ends_with_line_break)?;
            ends_with_line_break = piece.ends_with_line_break();
        }
        Some(covered)
    }

    /// Concatenates `pieces` under an enclosing `span` chosen by the caller.
    fn assemble(pieces: Vec<Self>, span: Option<Span>) -> Self {
        let mut pieces = pieces
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>();
        match pieces.len() {
            0 => Self::empty(),
            1 => match pieces.pop() {
                Some(piece) if piece.span() == span.as_ref() => piece,
                Some(piece) => piece.with_span(span),
                None => Self::empty(),
            },
            _ => {
                let (content, parts) = Self::flatten(&pieces);
                Self::composite(content, parts, span)
            }
        }
    }

    /// Concatenates non-empty `pieces` into a composite, even when there is only one piece,
    /// so that the source map always describes the spanned parts.
    fn assemble_mapped(pieces: Vec<Self>, span: Option<Span>) -> Self {
        let pieces = pieces
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>();
        if pieces.is_empty() {
            return Self::empty();
        }
        let (content, parts) = Self::flatten(&pieces);
        Self::composite(content, parts, span)
    }

    fn flatten(pieces: &[Self]) -> (Content<U>, Vec<Self>) {
        let content = match pieces {
            [only] => only.content.clone(),
            _ => Content::concat(pieces.iter().map(Self::content)),
        };
        let parts = pieces
            .iter()
            .flat_map(|p| p.parts().iter().cloned())
            .collect();
        (content, parts)
    }
}

impl<U: Unit> Twine<U> {
    /// Concatenates `items` with `self` between each pair of them.
    ///
    /// The [source map](Twine::source_map) of the result records where each item sits in the
    /// output and the span it came from; the delimiter never appears in it. An item without a
    /// span contributes the entries of its own source map instead. The result has a span only
    /// when a single item contributes content.
    ///
    /// # Example
    /// ```
    /// # use twine::{Position, TwineText};
    /// let words = TwineText::from_source("one two three", "foo:bar", Position::first()).split(" ");
    /// let joined = TwineText::from(", ").join(&words);
    /// assert_eq!(joined, "one, two, three");
    /// assert_eq!(joined.span(), None);
    /// assert_eq!(joined.source_map()[1].range, 5..8);
    /// ```
    pub fn join<I>(&self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<Self>,
    {
        let mut pieces = Vec::new();
        let mut entries = SourceMap::default();
        let (mut count, mut spanned) = (0usize, 0usize);
        let mut offset = 0;
        for item in items {
            let item = item.borrow();
            if count > 0 {
                pieces.push(self.clone());
                offset += self.len();
            }
            match item.span() {
                Some(span) if !item.is_empty() => {
                    let range = offset..offset + item.len();
                    entries.0.push(SourceMapEntry::new(range, span.clone()));
                    spanned += 1;
                }
                _ => entries.extend_shifted(item.source_map(), offset),
            }
            offset += item.len();
            pieces.push(item.clone());
            count += 1;
        }
        trace!(items = count, mapped = entries.len(), "joined twines");

        if count == 1 {
            return pieces.swap_remove(0);
        }
        let pieces = pieces
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>();
        let span = match pieces.as_slice() {
            [] => return Self::empty(),
            [only] if spanned == 1 => only.span().cloned(),
            _ => None,
        };
        let (content, parts) = Self::flatten(&pieces);
        Self::composite_mapped(content, parts, span, entries)
    }

    /// Replaces every non-overlapping occurrence of `old`, leftmost first, with `new`.
    ///
    /// Each inserted replacement points back at the region it replaced, with a span that is
    /// no longer one-to-one; the rest of the content keeps its own spans. The result's
    /// enclosing span is this twine's span, no longer one-to-one. If `old` does not occur, or
    /// is empty, the result keeps this twine's content and span.
    ///
    /// The result is always a composite, so for a twine with a span its
    /// [source map](Twine::source_map) covers the whole content.
    ///
    /// # Example
    /// ```
    /// # use twine::{Position, TwineText};
    /// let text = TwineText::from_source("one two three", "foo:bar", Position::first());
    /// let replaced = text.replace("two", "eleventy");
    /// assert_eq!(replaced.parts(), ["one ", "eleventy", " three"]);
    /// assert_eq!(replaced.span().unwrap().as_tuple(), ("foo:bar", false, 1, 0, 1, 12));
    /// assert!(replaced.source_map().covers(replaced.len()));
    /// ```
    pub fn replace<O, N>(&self, old: O, new: N) -> Self
    where
        O: Needle<U>,
        N: Needle<U>,
    {
        let matches = self.match_ranges(&old.to_units());
        if matches.is_empty() {
            return Self::assemble_mapped(vec![self.clone()], self.span().cloned());
        }

        let replacement = Content::from(new.to_units().into_owned());
        let mut pieces = Vec::with_capacity(matches.len() * 2 + 1);
        let mut cursor = 0;
        for m in &matches {
            pieces.push(self.slice_range(cursor..m.start));
            let replaced = self.slice_range(m.clone());
            let span = replaced.span().map(Span::not_one_to_one);
            pieces.push(Self::leaf(replacement.clone(), span));
            cursor = m.end;
        }
        pieces.push(self.slice_range(cursor..self.len()));

        trace!(matches = matches.len(), "replaced occurrences");
        Self::assemble_mapped(pieces, self.span().map(Span::not_one_to_one))
    }
}

impl<U: Unit> Add for Twine<U> {
    type Output = Twine<U>;

    fn add(self, rhs: Self) -> Self::Output {
        Self::concat_all(vec![self, rhs])
    }
}

impl<U: Unit> Add<&Twine<U>> for Twine<U> {
    type Output = Twine<U>;

    fn add(self, rhs: &Twine<U>) -> Self::Output {
        Self::concat_all(vec![self, rhs.clone()])
    }
}

impl<U: Unit> Add<&Twine<U>> for &Twine<U> {
    type Output = Twine<U>;

    fn add(self, rhs: &Twine<U>) -> Self::Output {
        self.concat(rhs)
    }
}

impl<U: Unit> Sum for Twine<U> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self::concat_all(iter.collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Position, SourceMapEntry, Span, TwineBytes, TwineText};

    #[test]
    fn test_concat_identity() {
        let text = TwineText::from_source("ab\ncd", "u", Position::first());
        let empty = TwineText::empty();
        for joined in [&text + &empty, &empty + &text] {
            assert_eq!(joined, text);
            assert_eq!(joined.span(), text.span());
            assert_eq!(joined.parts().len(), 2);
        }
    }

    #[test]
    fn test_concat_across_line_break() {
        let first = TwineBytes::new(b"ab\n", Span::new("u", true, 1, 0, 1, 2).ok());
        let second = TwineBytes::new(b"cd", Span::new("u", true, 2, 0, 2, 1).ok());
        let joined = first + &second;
        assert_eq!(joined.span(), Span::new("u", false, 1, 0, 2, 1).ok().as_ref());
        assert_eq!(joined.source_map().len(), 2);
    }

    #[test]
    fn test_concat_unrelated() {
        let first = TwineText::new("ab", Span::new("u", true, 1, 0, 1, 1).ok());
        let second = TwineText::new("cd", Span::new("v", true, 1, 2, 1, 3).ok());
        let joined = &first + &second;
        assert_eq!(joined.span(), None);
        let ranges = joined
            .source_map()
            .iter()
            .map(|entry| entry.range.clone())
            .collect::<Vec<_>>();
        assert_eq!(ranges, vec![0..2, 2..4]);
    }

    #[test]
    fn test_sum() {
        let text = TwineText::from_source("a b c", "u", Position::first());
        let pieces = text.split(" ");
        let glued: TwineText = pieces.into_iter().sum();
        assert_eq!(glued, "abc");
        assert_eq!(glued.span(), None);
        assert_eq!(glued.source_map().len(), 3);
    }

    #[test]
    fn test_join_spanned_delimiter() {
        let text = TwineText::from_source("a,b", "u", Position::first());
        let comma = text.slice(1..2);
        let joined = comma.join([text.slice(..1), text.slice(2..)]);
        assert_eq!(joined, "a,b");
        assert_eq!(joined.span(), None);
        assert_eq!(joined.parts(), ["a", ",", "b"]);
        assert_eq!(
            &**joined.source_map(),
            &[
                SourceMapEntry::new(0..1, Span::new("u", true, 1, 0, 1, 0).unwrap()),
                SourceMapEntry::new(2..3, Span::new("u", true, 1, 2, 1, 2).unwrap()),
            ]
        );
        assert_eq!(joined.source_map().find(1), None);
    }

    #[test]
    fn test_join_nested() {
        let text = TwineText::from_source("a b c", "u", Position::first());
        let inner = TwineText::from("-").join(text.split(" "));
        let outer = TwineText::from("|").join([TwineText::from("x"), inner.clone()]);
        assert_eq!(outer, "x|a-b-c");
        let ranges = outer
            .source_map()
            .iter()
            .map(|entry| entry.range.clone())
            .collect::<Vec<_>>();
        assert_eq!(ranges, vec![2..3, 4..5, 6..7]);

        let single = TwineText::from(", ").join([inner.clone()]);
        assert_eq!(single.source_map(), inner.source_map());
        let word = text.slice(..1);
        let alone = TwineText::from(", ").join([word.clone(), TwineText::empty()]);
        assert_eq!(alone, "a, ");
        assert_eq!(alone.span(), None);
        let only = TwineText::empty().join([TwineText::empty(), word.clone()]);
        assert_eq!(only.span(), word.span());
    }

    #[test]
    fn test_join_empty() {
        let joined = TwineText::from(", ").join(Vec::<TwineText>::new());
        assert!(joined.is_empty());
        assert_eq!(joined.span(), None);
    }

    #[test]
    fn test_replace_without_match() {
        let text = TwineText::from_source("abc", "u", Position::first());
        for same in [text.replace("x", "y"), text.replace("", "y")] {
            assert_eq!(same, "abc");
            assert_eq!(same.span(), text.span());
            assert!(same.source_map().covers(same.len()));
        }
    }

    #[test]
    fn test_replace_with_empty() {
        let text = TwineText::from_source("ab\ncdX", "u", Position::first());
        let removed = text.replace("X", "");
        assert_eq!(removed, "ab\ncd");
        assert_eq!(removed.span(), Span::new("u", false, 1, 0, 2, 2).ok().as_ref());
        assert!(removed.source_map().covers(removed.len()));
    }

    #[test]
    fn test_replace_every_occurrence() {
        let text = TwineText::from_source("a-b-c", "u", Position::first());
        let replaced = text.replace("-", "--");
        assert_eq!(replaced, "a--b--c");
        assert_eq!(replaced.parts(), ["a", "--", "b", "--", "c"]);
        let spans = replaced
            .source_map()
            .iter()
            .map(|entry| entry.span.as_tuple())
            .collect::<Vec<_>>();
        assert_eq!(
            spans,
            vec![
                ("u", true, 1, 0, 1, 0),
                ("u", false, 1, 1, 1, 1),
                ("u", true, 1, 2, 1, 2),
                ("u", false, 1, 3, 1, 3),
                ("u", true, 1, 4, 1, 4),
            ]
        );
    }
}
