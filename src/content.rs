use crate::Unit;
use std::fmt::{Debug, Formatter};
use std::ops::{Deref, Range};
use std::sync::Arc;

/// `Content` is an immutable buffer of units.
///
/// Slicing shares the underlying allocation, so sub-ranges of a loaded document are never
/// copied until they are concatenated with something else.
#[derive(Clone)]
pub struct Content<U> {
    buf: Arc<[U]>,
    range: Range<usize>,
}

impl<U: Unit> Content<U> {
    pub fn empty() -> Self {
        Self::from(Vec::new())
    }

    /// Returns a view of `range`, which must lie within this content.
    #[inline]
    pub(crate) fn slice(&self, range: Range<usize>) -> Self {
        debug_assert!(range.start <= range.end && range.end <= self.len());
        Self {
            buf: self.buf.clone(),
            range: self.range.start + range.start..self.range.start + range.end,
        }
    }

    pub(crate) fn concat<'a, I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = &'a [U]>,
    {
        let mut vec = Vec::new();
        for piece in pieces {
            vec.extend_from_slice(piece);
        }
        vec.into()
    }
}

impl<U> Deref for Content<U> {
    type Target = [U];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.buf[self.range.clone()]
    }
}

impl<U: Unit> Debug for Content<U> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        U::fmt_units(self, f)
    }
}

impl<U> From<Vec<U>> for Content<U> {
    fn from(vec: Vec<U>) -> Self {
        let range = 0..vec.len();
        Self {
            buf: vec.into(),
            range,
        }
    }
}

impl From<&str> for Content<char> {
    fn from(s: &str) -> Self {
        s.chars().collect::<Vec<_>>().into()
    }
}

impl From<String> for Content<char> {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

impl From<&[char]> for Content<char> {
    fn from(s: &[char]) -> Self {
        s.to_vec().into()
    }
}

impl From<&[u8]> for Content<u8> {
    fn from(s: &[u8]) -> Self {
        s.to_vec().into()
    }
}

impl<const N: usize> From<&[u8; N]> for Content<u8> {
    fn from(s: &[u8; N]) -> Self {
        s.to_vec().into()
    }
}
