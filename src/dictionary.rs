//! Dictionary encoding.
//!
//! A column is split into a sorted, duplicate-free dictionary and one code
//! per row holding the position of that row's value in the dictionary.
//! Because the dictionary is sorted, `min`/`max` are its first and last
//! entries, and range predicates reduce to two binary searches that yield a
//! contiguous run of matching codes.
//!
//! Filtering comes in two shapes:
//! - [`DictionaryColumn::where_copy`] materializes the matching codes into a
//!   new vector ([`FilteredCodes`]), useful when several operations follow.
//! - [`DictionaryColumn::where_view`] returns only the matching row
//!   positions, which [`DictionaryColumn::partial_decompress`] turns into
//!   values.

use std::fmt::Debug;
use std::hash::Hash;
use std::mem::size_of;
use std::ops::Range;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::CodecError;
use crate::metadata::ColumnMetadata;
use crate::predicate::ValueRange;
use crate::value::{ColumnValue, Numeric};
use crate::Result;

/// An unsigned integer type used for dictionary codes.
pub trait CodeWord: Copy + Ord + Hash + Debug {
    /// Number of bits in the code.
    const BITS: u32;

    /// Convert a dictionary position to a code, if it fits.
    fn from_index(index: usize) -> Option<Self>;

    /// The dictionary position this code refers to.
    fn index(self) -> usize;
}

macro_rules! impl_code_word {
    ($($t:ty),*) => {
        $(
            impl CodeWord for $t {
                const BITS: u32 = <$t>::BITS;

                #[inline]
                fn from_index(index: usize) -> Option<Self> {
                    <$t>::try_from(index).ok()
                }

                #[inline]
                fn index(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_code_word!(u8, u16, u32, u64);

/// The code widths a dictionary column can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CodeWidth {
    /// `u8` codes, up to 2^8 distinct values.
    U8,
    /// `u16` codes, up to 2^16 distinct values.
    U16,
    /// `u32` codes, up to 2^32 distinct values.
    U32,
    /// `u64` codes.
    U64,
}

impl CodeWidth {
    /// The narrowest width that can address `cardinality` distinct values.
    ///
    /// The code type of a [`DictionaryColumn`] is fixed at compile time by
    /// `C`; this helps callers pick `C` for a column whose cardinality they
    /// know, and [`DictionaryColumn::narrowest_width`] reports it for an
    /// existing column.
    pub fn for_cardinality(cardinality: usize) -> CodeWidth {
        let cardinality = cardinality as u128;
        if cardinality <= 1 << 8 {
            CodeWidth::U8
        } else if cardinality <= 1 << 16 {
            CodeWidth::U16
        } else if cardinality <= 1 << 32 {
            CodeWidth::U32
        } else {
            CodeWidth::U64
        }
    }

    /// Number of bits per code.
    pub fn bits(self) -> u32 {
        match self {
            CodeWidth::U8 => u8::BITS,
            CodeWidth::U16 => u16::BITS,
            CodeWidth::U32 => u32::BITS,
            CodeWidth::U64 => u64::BITS,
        }
    }
}

/// The set of dictionary codes accepted by a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchingCodes {
    /// A contiguous run of codes, produced by binary search.
    Range(Range<usize>),
    /// One flag per dictionary entry, produced by a linear scan.
    Mask(Vec<bool>),
}

impl MatchingCodes {
    /// Whether `code` is in the set.
    #[inline]
    pub fn contains(&self, code: usize) -> bool {
        match self {
            MatchingCodes::Range(range) => range.contains(&code),
            MatchingCodes::Mask(mask) => mask.get(code).copied().unwrap_or(false),
        }
    }

    /// Whether no code matches.
    pub fn is_empty(&self) -> bool {
        match self {
            MatchingCodes::Range(range) => range.is_empty(),
            MatchingCodes::Mask(mask) => !mask.iter().any(|&m| m),
        }
    }
}

/// A dictionary-encoded column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryColumn<D, C = u32> {
    dictionary: Vec<D>,
    codes: Vec<C>,
}

impl<D: ColumnValue, C: CodeWord> DictionaryColumn<D, C> {
    /// Compress a column.
    ///
    /// Fails with [`CodecError::CodeOverflow`] when the column has more
    /// distinct values than `C` can address.
    ///
    /// # Example
    /// ```
    /// use colpack::DictionaryColumn;
    ///
    /// let column = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 1];
    /// let compressed = DictionaryColumn::<i32, u8>::compress(&column).unwrap();
    /// assert_eq!(compressed.sum().unwrap(), 46);
    /// assert_eq!(compressed.decompress().unwrap(), column);
    /// ```
    pub fn compress(column: &[D]) -> Result<Self> {
        let mut dictionary = column.to_vec();
        dictionary.sort_unstable();
        dictionary.dedup();

        let overflow = || CodecError::CodeOverflow {
            cardinality: dictionary.len(),
            width: C::BITS,
        };
        let mut lookup: FxHashMap<&D, C> = FxHashMap::default();
        lookup.reserve(dictionary.len());
        for (i, value) in dictionary.iter().enumerate() {
            lookup.insert(value, C::from_index(i).ok_or_else(overflow)?);
        }

        let codes = column
            .iter()
            .map(|value| {
                lookup.get(value).copied().ok_or_else(|| {
                    CodecError::CorruptData(format!("{value:?} missing from dictionary"))
                })
            })
            .collect::<Result<Vec<C>>>()?;

        debug!(
            rows = codes.len(),
            distinct = dictionary.len(),
            code_bits = C::BITS,
            narrowest_bits = CodeWidth::for_cardinality(dictionary.len()).bits(),
            "dictionary column compressed"
        );
        Ok(DictionaryColumn { dictionary, codes })
    }

    /// The narrowest code width that could hold this column's dictionary.
    pub fn narrowest_width(&self) -> CodeWidth {
        CodeWidth::for_cardinality(self.dictionary.len())
    }

    /// Rebuild a column from its dictionary and codes.
    ///
    /// The dictionary must be strictly ascending. Codes are checked by the
    /// operations that dereference them.
    pub fn from_parts(dictionary: Vec<D>, codes: Vec<C>) -> Result<Self> {
        if let Some(pos) = dictionary.windows(2).position(|w| w[0] >= w[1]) {
            return Err(CodecError::CorruptData(format!(
                "dictionary not strictly ascending at position {pos}"
            )));
        }
        Ok(DictionaryColumn { dictionary, codes })
    }

    /// The sorted distinct values.
    pub fn dictionary(&self) -> &[D] {
        &self.dictionary
    }

    /// One code per row.
    pub fn codes(&self) -> &[C] {
        &self.codes
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Decompress every row.
    pub fn decompress(&self) -> Result<Vec<D>> {
        decode(&self.dictionary, &self.codes)
    }

    /// Decompress only the rows at `indices`, in the given order.
    pub fn partial_decompress(&self, indices: &[usize]) -> Result<Vec<D>> {
        indices
            .iter()
            .map(|&index| {
                let code = self.codes.get(index).ok_or(CodecError::IndexOutOfRange {
                    index,
                    len: self.codes.len(),
                })?;
                lookup(&self.dictionary, *code).cloned()
            })
            .collect()
    }

    /// Dictionary positions whose value satisfies `predicate` (linear scan).
    pub fn positions_matching(&self, predicate: impl Fn(&D) -> bool) -> Vec<usize> {
        self.dictionary
            .iter()
            .enumerate()
            .filter_map(|(i, value)| predicate(value).then_some(i))
            .collect()
    }

    /// Dictionary positions inside `range`, found by binary search.
    pub fn positions_in_range(&self, range: &ValueRange<D>) -> Range<usize> {
        let lo = range
            .from()
            .map_or(0, |from| self.dictionary.partition_point(|v| v < from));
        let hi = range.to().map_or(self.dictionary.len(), |to| {
            self.dictionary.partition_point(|v| v < to)
        });
        lo..hi.max(lo)
    }

    /// Codes whose value satisfies `predicate` (linear scan).
    pub fn codes_matching(&self, predicate: impl Fn(&D) -> bool) -> MatchingCodes {
        MatchingCodes::Mask(self.dictionary.iter().map(predicate).collect())
    }

    /// Codes whose value lies in `range` (binary search).
    pub fn codes_in_range(&self, range: &ValueRange<D>) -> MatchingCodes {
        MatchingCodes::Range(self.positions_in_range(range))
    }

    /// The code of `value`, if present (binary search).
    pub fn codes_equal(&self, value: &D) -> MatchingCodes {
        match self.dictionary.binary_search(value) {
            Ok(pos) => MatchingCodes::Range(pos..pos + 1),
            Err(_) => MatchingCodes::Range(0..0),
        }
    }

    /// Copy the codes of every matching row, preserving row order.
    pub fn where_copy(&self, matching: &MatchingCodes) -> Result<FilteredCodes<'_, D, C>> {
        let mut codes = Vec::new();
        if !matching.is_empty() {
            for &code in &self.codes {
                if self.is_match(code, matching)? {
                    codes.push(code);
                }
            }
        }
        Ok(FilteredCodes {
            dictionary: &self.dictionary,
            codes,
        })
    }

    /// Positions of every matching row, in ascending order.
    pub fn where_view(&self, matching: &MatchingCodes) -> Result<Vec<usize>> {
        let mut rows = Vec::new();
        if !matching.is_empty() {
            for (row, &code) in self.codes.iter().enumerate() {
                if self.is_match(code, matching)? {
                    rows.push(row);
                }
            }
        }
        Ok(rows)
    }

    #[inline]
    fn is_match(&self, code: C, matching: &MatchingCodes) -> Result<bool> {
        let index = code.index();
        if index >= self.dictionary.len() {
            return Err(corrupt_code(index, self.dictionary.len()));
        }
        Ok(matching.contains(index))
    }

    /// Values of the rows satisfying `predicate`, in row order, via
    /// [`where_view`](Self::where_view) and partial decompression.
    pub fn search(&self, predicate: impl Fn(&D) -> bool) -> Result<Vec<D>> {
        let rows = self.where_view(&self.codes_matching(predicate))?;
        self.partial_decompress(&rows)
    }

    /// Values of the rows satisfying `predicate`, in row order, via
    /// [`where_copy`](Self::where_copy).
    pub fn search_copy(&self, predicate: impl Fn(&D) -> bool) -> Result<Vec<D>> {
        self.where_copy(&self.codes_matching(predicate))?
            .decompress()
    }

    /// Number of rows satisfying `predicate`.
    pub fn count_where(&self, predicate: impl Fn(&D) -> bool) -> Result<usize> {
        Ok(self.where_view(&self.codes_matching(predicate))?.len())
    }

    /// Number of rows whose value lies in `range`.
    pub fn count_where_range(&self, range: &ValueRange<D>) -> Result<usize> {
        Ok(self.where_view(&self.codes_in_range(range))?.len())
    }

    /// Smallest value.
    pub fn min(&self) -> Result<D> {
        if self.codes.is_empty() {
            return Err(CodecError::EmptyColumn);
        }
        self.dictionary.first().cloned().ok_or(CodecError::EmptyColumn)
    }

    /// Largest value.
    pub fn max(&self) -> Result<D> {
        if self.codes.is_empty() {
            return Err(CodecError::EmptyColumn);
        }
        self.dictionary.last().cloned().ok_or(CodecError::EmptyColumn)
    }

    /// Size accounting for this column.
    pub fn metadata(&self) -> ColumnMetadata {
        ColumnMetadata {
            rows: self.codes.len(),
            distinct: self.dictionary.len(),
            compressed_bytes: self.dictionary.len() * size_of::<D>()
                + self.codes.len() * size_of::<C>(),
            uncompressed_bytes: self.codes.len() * size_of::<D>(),
        }
    }
}

impl<D: Numeric, C: CodeWord> DictionaryColumn<D, C> {
    /// Sum of all rows, computed from code run lengths.
    pub fn sum(&self) -> Result<D::Sum> {
        sum_codes(&self.dictionary, &self.codes)
    }

    /// Mean of all rows.
    pub fn avg(&self) -> Result<f64> {
        if self.codes.is_empty() {
            return Err(CodecError::EmptyColumn);
        }
        if let [only] = self.dictionary.as_slice() {
            return Ok(only.as_f64());
        }
        Ok(D::sum_as_f64(self.sum()?) / self.codes.len() as f64)
    }

    /// Sum of the rows satisfying `predicate`.
    pub fn sum_where(&self, predicate: impl Fn(&D) -> bool) -> Result<D::Sum> {
        self.where_copy(&self.codes_matching(predicate))?.sum()
    }

    /// Sum of the rows whose value lies in `range`.
    pub fn sum_where_range(&self, range: &ValueRange<D>) -> Result<D::Sum> {
        self.where_copy(&self.codes_in_range(range))?.sum()
    }
}

/// Codes selected by [`DictionaryColumn::where_copy`], paired with the
/// dictionary they index into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredCodes<'a, D, C> {
    dictionary: &'a [D],
    codes: Vec<C>,
}

impl<'a, D: ColumnValue, C: CodeWord> FilteredCodes<'a, D, C> {
    /// The original, unfiltered dictionary.
    pub fn dictionary(&self) -> &'a [D] {
        self.dictionary
    }

    /// The selected codes, in row order.
    pub fn codes(&self) -> &[C] {
        &self.codes
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether no row was selected.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Values of the selected rows.
    pub fn decompress(&self) -> Result<Vec<D>> {
        decode(self.dictionary, &self.codes)
    }
}

impl<D: Numeric, C: CodeWord> FilteredCodes<'_, D, C> {
    /// Sum of the selected rows.
    pub fn sum(&self) -> Result<D::Sum> {
        sum_codes(self.dictionary, &self.codes)
    }
}

fn corrupt_code(code: usize, len: usize) -> CodecError {
    CodecError::CorruptData(format!("code {code} outside dictionary of {len} values"))
}

#[inline]
fn lookup<D, C: CodeWord>(dictionary: &[D], code: C) -> Result<&D> {
    dictionary
        .get(code.index())
        .ok_or_else(|| corrupt_code(code.index(), dictionary.len()))
}

fn decode<D: Clone, C: CodeWord>(dictionary: &[D], codes: &[C]) -> Result<Vec<D>> {
    codes
        .iter()
        .map(|&code| lookup(dictionary, code).cloned())
        .collect()
}

/// Sum `codes` by sorting them and multiplying each distinct code's value by
/// its run length, so the dictionary is consulted once per distinct code.
fn sum_codes<D: Numeric, C: CodeWord>(dictionary: &[D], codes: &[C]) -> Result<D::Sum> {
    if let [only] = dictionary {
        if let Some(bad) = codes.iter().find(|c| c.index() != 0) {
            return Err(corrupt_code(bad.index(), 1));
        }
        return Ok(only.times(codes.len()));
    }

    let mut sorted = codes.to_vec();
    sorted.sort_unstable();

    let mut sum = D::Sum::default();
    for run in sorted.chunk_by(|a, b| a == b) {
        sum = sum + lookup(dictionary, run[0])?.times(run.len());
    }
    Ok(sum)
}
