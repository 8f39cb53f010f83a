mod compose;
mod slice;

use crate::content::Content;
use crate::lines::LineBreaks;
use crate::source_map::{SourceMap, EMPTY_SOURCE_MAP};
use crate::span::{Position, Span};
use crate::unit::Unit;
use std::fmt::{Debug, Display, Formatter, Write};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::trace;

/// Provenance-tracked text made of Unicode scalar values.
pub type TwineText = Twine<char>;

/// Provenance-tracked text made of bytes.
pub type TwineBytes = Twine<u8>;

/// `Twine` is an immutable sequence of units that remembers where in a source document each
/// unit came from.
///
/// # Representation
///
/// A twine is either a *leaf*, carrying at most one [Span] for all of its content, or a
/// *composite* of leaf [parts](Twine::parts). A composite may still report an enclosing span,
/// and records the spans of its parts in a [SourceMap] keyed by offsets into its own content.
///
/// # Methods
///
/// ## Construction
///
/// - [`Twine::new`] wraps content with an explicit span, or none.
/// - [`Twine::from_source`] and [`Twine::as_from`] derive spans from a starting [Position].
///
/// ## Algebra
///
/// Every operation returns a new twine and recomputes provenance:
/// - [`get`](Twine::get), [`slice`](Twine::slice), [`iter`](Twine::iter)
/// - [`split`](Twine::split), [`rsplit`](Twine::rsplit)
/// - [`concat`](Twine::concat) and `+`, [`join`](Twine::join)
/// - [`replace`](Twine::replace)
///
/// ## Equality
///
/// Twines compare, and hash, by content only, so `twine == "abc"` holds whatever the twine's
/// provenance is. Inspect [span](Twine::span) to compare provenance.
#[derive(Clone)]
pub struct Twine<U: Unit> {
    content: Content<U>,
    repr: Repr<U>,
}

#[derive(Clone)]
enum Repr<U: Unit> {
    Leaf(Option<Span>),
    Composite(Arc<Composite<U>>),
}

struct Composite<U: Unit> {
    // non-empty leaves, in order
    parts: Vec<Twine<U>>,
    span: Option<Span>,
    source_map: SourceMap,
}

impl<U: Unit> Twine<U> {
    /// Creates a leaf twine with an explicit span, or with no known provenance.
    pub fn new<C>(content: C, span: Option<Span>) -> Self
    where
        C: Into<Content<U>>,
    {
        Self::leaf(content.into(), span)
    }

    pub fn empty() -> Self {
        Self::leaf(Content::empty(), None)
    }

    /// Creates a twine whose first unit sits at `start` in the document `uri`.
    ///
    /// Content spread over several lines is kept as one part per line, so that later
    /// concatenations keep per-line precision. The twine itself still reports the single
    /// span enclosing all of its content.
    ///
    /// # Example
    /// ```
    /// # use twine::{Position, TwineText};
    /// let text = TwineText::from_source("abc\ndef", "test.txt", Position::first());
    /// let span = text.span().unwrap();
    /// assert_eq!(span.as_tuple(), ("test.txt", false, 1, 0, 2, 2));
    /// assert_eq!(text.parts().len(), 2);
    /// ```
    pub fn from_source<C, S, P>(content: C, uri: S, start: P) -> Self
    where
        C: Into<Content<U>>,
        S: Into<Arc<str>>,
        P: Into<Position>,
    {
        let content = content.into();
        let uri = uri.into();
        let lines = LineBreaks::scan(&content[..], start.into());

        match lines.span(&uri, 0..content.len()) {
            Some(span) if !span.is_one_to_one() => {
                let parts = lines
                    .line_ranges(content.len())
                    .into_iter()
                    .map(|range| {
                        let span = lines.span(&uri, range.clone());
                        Self::leaf(content.slice(range), span)
                    })
                    .collect::<Vec<_>>();
                trace!(uri = %uri, lines = parts.len(), "decomposed multi-line source");
                Self::composite(content, parts, Some(span))
            }
            span => Self::leaf(content, span),
        }
    }

    /// Re-roots this twine's content at `start` in the document `uri`.
    ///
    /// See [Twine::from_source].
    pub fn as_from<S, P>(&self, uri: S, start: P) -> Self
    where
        S: Into<Arc<str>>,
        P: Into<Position>,
    {
        Self::from_source(self.content.clone(), uri, start)
    }

    #[inline]
    pub(crate) fn leaf(content: Content<U>, span: Option<Span>) -> Self {
        Self {
            content,
            repr: Repr::Leaf(span),
        }
    }

    /// `parts` must be non-empty leaves whose contents concatenate to `content`.
    pub(crate) fn composite(content: Content<U>, parts: Vec<Self>, span: Option<Span>) -> Self {
        let source_map = SourceMap::from_regions(parts.iter().map(|p| (p.len(), p.span())));
        Self::composite_mapped(content, parts, span, source_map)
    }

    pub(crate) fn composite_mapped(
        content: Content<U>,
        parts: Vec<Self>,
        span: Option<Span>,
        source_map: SourceMap,
    ) -> Self {
        Self {
            content,
            repr: Repr::Composite(Arc::new(Composite {
                parts,
                span,
                source_map,
            })),
        }
    }

    pub(crate) fn with_span(self, span: Option<Span>) -> Self {
        match self.repr {
            Repr::Leaf(_) => Self::leaf(self.content, span),
            Repr::Composite(composite) => {
                Self::composite(self.content, composite.parts.clone(), span)
            }
        }
    }
}

impl<U: Unit> Twine<U> {
    #[inline]
    pub fn content(&self) -> &[U] {
        &self.content
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the span enclosing the whole content, if there is a single one.
    #[inline]
    pub fn span(&self) -> Option<&Span> {
        match &self.repr {
            Repr::Leaf(span) => span.as_ref(),
            Repr::Composite(composite) => composite.span.as_ref(),
        }
    }

    /// Returns the leaves this twine is made of.
    ///
    /// A leaf is its own single part.
    #[inline]
    pub fn parts(&self) -> &[Self] {
        match &self.repr {
            Repr::Leaf(_) => std::slice::from_ref(self),
            Repr::Composite(composite) => &composite.parts,
        }
    }

    /// Returns the provenance of the spanned parts of a composite twine.
    ///
    /// Leaves have an empty source map; their provenance is their [span](Twine::span).
    #[inline]
    pub fn source_map(&self) -> &SourceMap {
        match &self.repr {
            Repr::Leaf(_) => &EMPTY_SOURCE_MAP,
            Repr::Composite(composite) => &composite.source_map,
        }
    }

    #[inline]
    pub(crate) fn ends_with_line_break(&self) -> bool {
        self.content.last().is_some_and(|unit| unit.is_line_break())
    }
}

impl<U: Unit> Default for Twine<U> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<U: Unit> Debug for Twine<U> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.content, f)?;
        if let Some(span) = self.span() {
            write!(f, " @ {:?}", span)?;
        }
        if let Repr::Composite(composite) = &self.repr {
            f.write_char(' ')?;
            f.debug_list().entries(&composite.parts).finish()?;
        }
        Ok(())
    }
}

impl Display for TwineText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.content.iter().try_for_each(|&ch| f.write_char(ch))
    }
}

impl<U: Unit> PartialEq for Twine<U> {
    fn eq(&self, other: &Self) -> bool {
        self.content() == other.content()
    }
}

impl<U: Unit> Eq for Twine<U> {}

impl<U: Unit> Hash for Twine<U> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.content().hash(state)
    }
}

impl PartialEq<str> for TwineText {
    fn eq(&self, other: &str) -> bool {
        self.content().iter().copied().eq(other.chars())
    }
}

impl PartialEq<&str> for TwineText {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<str> for TwineBytes {
    fn eq(&self, other: &str) -> bool {
        self.content() == other.as_bytes()
    }
}

impl PartialEq<&str> for TwineBytes {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<[u8]> for TwineBytes {
    fn eq(&self, other: &[u8]) -> bool {
        self.content() == other
    }
}

impl PartialEq<&[u8]> for TwineBytes {
    fn eq(&self, other: &&[u8]) -> bool {
        self.content() == *other
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for TwineBytes {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.content() == other.as_slice()
    }
}

impl From<&str> for TwineText {
    fn from(s: &str) -> Self {
        Self::new(s, None)
    }
}

impl From<String> for TwineText {
    fn from(s: String) -> Self {
        Self::new(s, None)
    }
}

impl From<&[u8]> for TwineBytes {
    fn from(s: &[u8]) -> Self {
        Self::new(s, None)
    }
}

impl<const N: usize> From<&[u8; N]> for TwineBytes {
    fn from(s: &[u8; N]) -> Self {
        Self::new(s, None)
    }
}

impl From<Vec<u8>> for TwineBytes {
    fn from(s: Vec<u8>) -> Self {
        Self::new(s, None)
    }
}
