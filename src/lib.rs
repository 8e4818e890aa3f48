//! # colpack
//!
//! Lightweight column encodings with queries that run on the compressed form.
//!
//! ## Overview
//!
//! A column is an ordered sequence of values of one type (integers, floats,
//! timestamps, strings). `colpack` provides two encodings for it:
//!
//! 1. **Dictionary encoding**: a sorted, duplicate-free dictionary plus one
//!    integer code per row. Sortedness makes `min`/`max` free and turns range
//!    predicates into binary searches; sums are computed from code run
//!    lengths instead of decoded values.
//! 2. **Huffman encoding**: frequency-weighted prefix codes bit-packed into
//!    fixed-width blocks, with the min/max value of every block recorded so
//!    that range and equality queries only decode blocks that can match.
//!
//! [`CompressedColumn`] puts both behind one query surface.
//!
//! ## Quick Start
//!
//! ```rust
//! use colpack::{CompressedColumn, DictionaryColumn, Encoding, HuffmanColumn, Predicate, ValueRange};
//!
//! let column = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 1];
//!
//! // Dictionary encoding with 8-bit codes
//! let dict = DictionaryColumn::<i32, u8>::compress(&column).unwrap();
//! assert_eq!(dict.sum().unwrap(), 46);
//! assert_eq!(dict.search(|&v| v > 5).unwrap(), vec![6, 7, 8, 9]);
//!
//! // Huffman encoding with 64-bit blocks
//! let huff = HuffmanColumn::compress(&column).unwrap();
//! let range = ValueRange::between(3, 6).unwrap();
//! assert_eq!(huff.count_where_range(&range).unwrap(), 3);
//!
//! // Either encoding behind one surface
//! let any = CompressedColumn::<i32>::compress(&column, Encoding::huffman()).unwrap();
//! assert_eq!(any.count(&Predicate::Equal(1)).unwrap(), 2);
//! assert_eq!(any.max().unwrap(), 9);
//! ```
//!
//! ## Choosing an Encoding
//!
//! | | Dictionary | Huffman |
//! |---|---|---|
//! | Row size | fixed (8/16/32/64-bit code) | variable, frequent values shortest |
//! | `min` / `max` | first / last dictionary entry | fold over block bounds |
//! | Range filter | binary search, then scan codes | skip blocks by bounds, decode the rest |
//! | Random row access | direct | decode the containing block |
//!
//! Skewed columns compress better with Huffman; columns queried by many
//! range predicates favor the dictionary.
//!
//! Floats must be wrapped in [`Float64`] / [`Float32`] (`OrderedFloat`) to
//! get the total order both encodings rely on.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bitpack;
mod dictionary;
mod error;
mod huffman;
mod metadata;
mod predicate;
mod query;
mod tree;
pub mod value;

pub use bitpack::{Code, MAX_BLOCK_WIDTH};
pub use dictionary::{CodeWidth, CodeWord, DictionaryColumn, FilteredCodes, MatchingCodes};
pub use error::CodecError;
pub use huffman::{BlockBounds, HuffmanColumn, PackedBlock, ReverseTable, DEFAULT_BLOCK_WIDTH};
pub use metadata::ColumnMetadata;
pub use predicate::{Predicate, ValueRange};
pub use query::{CompressedColumn, Encoding, Strategy};
pub use value::{ColumnValue, Float32, Float64, Numeric, Timestamp};

/// Convenience type alias for Results with CodecError.
pub type Result<T> = std::result::Result<T, CodecError>;
