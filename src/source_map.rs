use crate::span::Span;
use std::ops::{Deref, Range};

/// Provenance of one region of a composite [Twine](crate::Twine).
///
/// `range` is a half-open offset range in the twine's own content.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceMapEntry {
    pub range: Range<usize>,
    pub span: Span,
}

impl SourceMapEntry {
    pub fn new(range: Range<usize>, span: Span) -> Self {
        Self { range, span }
    }
}

/// `SourceMap` is an ordered collection of [SourceMapEntry].
///
/// Entries never overlap and are sorted by their offset ranges.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SourceMap(pub(crate) Vec<SourceMapEntry>);

pub(crate) static EMPTY_SOURCE_MAP: SourceMap = SourceMap(Vec::new());

impl Deref for SourceMap {
    type Target = [SourceMapEntry];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl SourceMap {
    /// Builds the map of consecutive regions, skipping the ones without provenance.
    pub(crate) fn from_regions<'a, I>(regions: I) -> Self
    where
        I: IntoIterator<Item = (usize, Option<&'a Span>)>,
    {
        let mut entries = Vec::new();
        let mut offset = 0;
        for (len, span) in regions {
            if let Some(span) = span {
                entries.push(SourceMapEntry::new(offset..offset + len, span.clone()));
            }
            offset += len;
        }
        Self(entries)
    }

    /// Appends the entries of `other`, shifted right by `offset`.
    pub(crate) fn extend_shifted(&mut self, other: &SourceMap, offset: usize) {
        self.0.extend(other.iter().map(|entry| {
            SourceMapEntry::new(
                entry.range.start + offset..entry.range.end + offset,
                entry.span.clone(),
            )
        }));
    }

    /// Finds the entry whose range contains `offset`.
    pub fn find(&self, offset: usize) -> Option<&SourceMapEntry> {
        let idx = self.0.partition_point(|entry| entry.range.end <= offset);
        self.0
            .get(idx)
            .filter(|entry| entry.range.start <= offset)
    }

    /// Checks whether the entries cover `0..len` without gaps.
    pub fn covers(&self, len: usize) -> bool {
        let mut expected = 0;
        for entry in &self.0 {
            if entry.range.start != expected {
                return false;
            }
            expected = entry.range.end;
        }
        expected == len
    }
}
