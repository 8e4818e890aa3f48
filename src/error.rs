//! Error types for column compression and query operations.

use thiserror::Error;

/// Errors that can occur while compressing, decompressing or querying a column.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    /// An aggregate was requested on a column with no rows.
    #[error("column is empty")]
    EmptyColumn,

    /// The dictionary holds more distinct values than the code width can address.
    #[error("{cardinality} distinct values do not fit in {width}-bit codes")]
    CodeOverflow {
        /// Number of distinct values in the column.
        cardinality: usize,
        /// Bit width of the chosen code type.
        width: u32,
    },

    /// The compressed data references values or bits that do not exist.
    #[error("corrupt compressed data: {0}")]
    CorruptData(String),

    /// A Huffman code is longer than a single block.
    #[error("code of {length} bits does not fit in a {block_width}-bit block")]
    CodeTooLong {
        /// Length of the offending code in bits.
        length: usize,
        /// Width of one packed block in bits.
        block_width: usize,
    },

    /// A range predicate has its lower bound above its upper bound.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A row position passed by the caller is past the end of the column.
    #[error("row index {index} out of range for column of {len} rows")]
    IndexOutOfRange {
        /// The requested row position.
        index: usize,
        /// Number of rows in the column.
        len: usize,
    },

    /// The block width is zero or exceeds the 64-bit block word.
    #[error("block width {0} must be between 1 and 64")]
    BlockWidthExceeded(usize),

    /// A write into a block would run past its end.
    #[error("buffer overflow: attempted to write {attempted} bits, only {available} available")]
    BufferOverflow {
        /// The number of bits that were attempted to be written.
        attempted: usize,
        /// The number of bits left in the block.
        available: usize,
    },
}
