//! # twine
//!
//! This crate provides provenance-tracked text: immutable text values that remember where in
//! an original source document each of their units came from, for use in parser diagnostics.
//!
//! ## Getting Started
//!
//! ```
//! use twine::{Position, TwineText};
//!
//! // Load a document, starting at line 1, column 0
//! let doc = TwineText::from_source("one two three", "example.txt", Position::first());
//!
//! // Every derived value still knows where it came from
//! let words = doc.split(" ");
//! let two = &words[1];
//! assert_eq!(two.span().unwrap().to_string(), "example.txt:1:4-1:6");
//!
//! // Replacements point back at the text they replaced
//! let replaced = doc.replace("two", "eleventy");
//! assert_eq!(replaced.source_map()[1].span.to_string(), "example.txt:1:4-1:6");
//! ```
//!
//! ## Overview
//!
//! ### `Span`
//!
//! [Span] describes a contiguous range of a named document by its first and last
//! [Position], both inclusive. Lines are 1-based and columns 0-based.
//!
//! ### `Twine`
//!
//! [Twine] is the provenance-tracked text. [TwineText] is made of Unicode scalar values and
//! [TwineBytes] of bytes; both share the same algebra: indexing, slicing, splitting, joining,
//! concatenation and replacement.
//!
//! ### `SourceMap`
//!
//! [SourceMap] records, for a twine assembled from several pieces, which offsets of its
//! content came from which [Span].
//!
//! ## Features
//!
//! - `serde`: Enables `Serialize` and `Deserialize` for [Position], [Span] and [SourceMapEntry].
//!

mod content;
mod error;
mod lines;
mod source_map;
mod span;
mod twine;
mod unit;

pub use content::Content;
pub use error::*;
pub use source_map::{SourceMap, SourceMapEntry};
pub use span::*;
pub use twine::*;
pub use unit::*;
