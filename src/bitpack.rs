//! Bit packing of prefix codes into fixed-width blocks.
//!
//! This module provides [`Code`], a variable-length bit string, and a pair of
//! cursors for writing codes into and reading bits out of a single block.
//! Bits are laid out most-significant first: bit position 0 of a `width`-bit
//! block is bit `width - 1` of the underlying `u64`.

use std::fmt;

use crate::error::CodecError;

/// Maximum number of bits in one block.
pub const MAX_BLOCK_WIDTH: usize = 64;

/// A prefix code of up to 64 bits.
///
/// The code is stored right-aligned in `bits`; the first bit of the code is
/// bit `len - 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// The empty code.
    pub const EMPTY: Code = Code { bits: 0, len: 0 };

    /// Create a code from its right-aligned bits and length.
    ///
    /// Returns `None` when `len > 64` or `bits` has set bits above `len`.
    pub fn new(bits: u64, len: usize) -> Option<Code> {
        if len > MAX_BLOCK_WIDTH || (len < MAX_BLOCK_WIDTH && bits >> len != 0) {
            return None;
        }
        Some(Code {
            bits,
            len: len as u8,
        })
    }

    /// The code bits, right-aligned.
    #[inline]
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Number of bits in the code.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the code has no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// This code with `bit` appended, or `None` if it is already 64 bits long.
    #[inline]
    pub fn push(self, bit: bool) -> Option<Code> {
        if self.len() == MAX_BLOCK_WIDTH {
            return None;
        }
        Some(Code {
            bits: (self.bits << 1) | bit as u64,
            len: self.len + 1,
        })
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len()).rev() {
            f.write_str(if (self.bits >> i) & 1 == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Validate a block width.
pub(crate) fn check_width(width: usize) -> Result<(), CodecError> {
    if width == 0 || width > MAX_BLOCK_WIDTH {
        return Err(CodecError::BlockWidthExceeded(width));
    }
    Ok(())
}

/// Accumulates codes into one block at a time.
///
/// A code is never split: callers check [`BlockWriter::fits`] and call
/// [`BlockWriter::finish`] to start a new block when it does not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockWriter {
    word: u64,
    offset: usize,
    width: usize,
}

impl BlockWriter {
    /// Create a writer for blocks of `width` bits.
    pub fn new(width: usize) -> Result<Self, CodecError> {
        check_width(width)?;
        Ok(BlockWriter {
            word: 0,
            offset: 0,
            width,
        })
    }

    /// Whether a code of `len` bits still fits in the current block.
    #[inline]
    pub fn fits(&self, len: usize) -> bool {
        self.offset + len <= self.width
    }

    /// Append `code` after the bits already written.
    pub fn write(&mut self, code: Code) -> Result<(), CodecError> {
        if !self.fits(code.len()) {
            return Err(CodecError::BufferOverflow {
                attempted: code.len(),
                available: self.width - self.offset,
            });
        }
        let shift = self.width - self.offset - code.len();
        self.word |= code.bits() << shift;
        self.offset += code.len();
        Ok(())
    }

    /// Return the current block and start an empty one.
    #[inline]
    pub fn finish(&mut self) -> u64 {
        let word = self.word;
        self.word = 0;
        self.offset = 0;
        word
    }
}

/// Reads the bits of one block, most-significant first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockReader {
    word: u64,
    width: usize,
    position: usize,
}

impl BlockReader {
    /// Create a reader over the low `width` bits of `word`.
    pub fn new(word: u64, width: usize) -> Result<Self, CodecError> {
        check_width(width)?;
        Ok(BlockReader {
            word,
            width,
            position: 0,
        })
    }

    /// Number of bits read so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Read the next bit, or `None` at the end of the block.
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.position >= self.width {
            return None;
        }
        let bit = (self.word >> (self.width - 1 - self.position)) & 1 == 1;
        self.position += 1;
        Some(bit)
    }
}
