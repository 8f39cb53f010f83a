use crate::Twine;
use std::borrow::Cow;
use std::fmt::{Formatter, Write};
use std::hash::Hash;

/// The element a [Twine](crate::Twine) is made of.
///
/// Implemented for `char` (Unicode scalar values) and `u8` (bytes). Both share one algebra;
/// only scanning and rendering differ.
pub trait Unit: Copy + Eq + Hash + Send + Sync + 'static {
    /// The unit that ends a line.
    const LINE_BREAK: Self;

    #[inline]
    fn is_line_break(self) -> bool {
        self == Self::LINE_BREAK
    }

    /// Offsets of every line break in `units`, in increasing order.
    fn line_breaks(units: &[Self]) -> Vec<usize> {
        units
            .iter()
            .enumerate()
            .filter(|(_, unit)| unit.is_line_break())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Offset of the first occurrence of a non-empty `needle`.
    fn find(haystack: &[Self], needle: &[Self]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    /// Offset of the last occurrence of a non-empty `needle`.
    fn rfind(haystack: &[Self], needle: &[Self]) -> Option<usize> {
        haystack.windows(needle.len()).rposition(|w| w == needle)
    }

    fn fmt_units(units: &[Self], f: &mut Formatter<'_>) -> std::fmt::Result;
}

impl Unit for char {
    const LINE_BREAK: Self = '\n';

    fn fmt_units(units: &[Self], f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_char('"')?;
        for ch in units {
            for escaped in ch.escape_debug() {
                f.write_char(escaped)?;
            }
        }
        f.write_char('"')
    }
}

impl Unit for u8 {
    const LINE_BREAK: Self = b'\n';

    fn line_breaks(units: &[Self]) -> Vec<usize> {
        memchr::memchr_iter(b'\n', units).collect()
    }

    fn find(haystack: &[Self], needle: &[Self]) -> Option<usize> {
        memchr::memmem::find(haystack, needle)
    }

    fn rfind(haystack: &[Self], needle: &[Self]) -> Option<usize> {
        memchr::memmem::rfind(haystack, needle)
    }

    fn fmt_units(units: &[Self], f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "b\"{}\"", units.escape_ascii())
    }
}

/// Anything that can be searched for inside a [Twine]: delimiters for
/// [split](Twine::split), patterns and replacements for [replace](Twine::replace).
pub trait Needle<U: Unit> {
    fn to_units(&self) -> Cow<'_, [U]>;
}

impl<U, N> Needle<U> for &N
where
    U: Unit,
    N: Needle<U> + ?Sized,
{
    fn to_units(&self) -> Cow<'_, [U]> {
        (**self).to_units()
    }
}

impl<U: Unit> Needle<U> for [U] {
    fn to_units(&self) -> Cow<'_, [U]> {
        Cow::Borrowed(self)
    }
}

impl<U: Unit, const N: usize> Needle<U> for [U; N] {
    fn to_units(&self) -> Cow<'_, [U]> {
        Cow::Borrowed(self)
    }
}

impl<U: Unit> Needle<U> for Vec<U> {
    fn to_units(&self) -> Cow<'_, [U]> {
        Cow::Borrowed(self)
    }
}

impl<U: Unit> Needle<U> for Twine<U> {
    fn to_units(&self) -> Cow<'_, [U]> {
        Cow::Borrowed(self.content())
    }
}

impl Needle<char> for str {
    fn to_units(&self) -> Cow<'_, [char]> {
        Cow::Owned(self.chars().collect())
    }
}

impl Needle<char> for String {
    fn to_units(&self) -> Cow<'_, [char]> {
        self.as_str().to_units()
    }
}

impl Needle<char> for char {
    fn to_units(&self) -> Cow<'_, [char]> {
        Cow::Owned(vec![*self])
    }
}

impl Needle<u8> for str {
    fn to_units(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl Needle<u8> for u8 {
    fn to_units(&self) -> Cow<'_, [u8]> {
        Cow::Owned(vec![*self])
    }
}
