//! A uniform query surface over either encoding.
//!
//! [`CompressedColumn`] wraps a dictionary- or Huffman-encoded column and
//! routes each query to the algorithm that fits the predicate:
//!
//! | Predicate | Dictionary | Huffman |
//! |-----------|------------|---------|
//! | `Equal` | binary search for one code | skip blocks by bounds |
//! | `Range` | binary search for a code run | skip blocks by bounds |
//! | `Matching` | linear scan of the dictionary | decode every block |

use crate::dictionary::{CodeWord, DictionaryColumn, MatchingCodes};
use crate::huffman::{HuffmanColumn, DEFAULT_BLOCK_WIDTH};
use crate::metadata::ColumnMetadata;
use crate::predicate::Predicate;
use crate::value::{ColumnValue, Numeric};
use crate::Result;

/// Which codec to compress a column with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Sorted dictionary plus one code per row.
    #[default]
    Dictionary,
    /// Huffman codes packed into blocks of `block_width` bits.
    Huffman {
        /// Bits per block, 1 to 64.
        block_width: usize,
    },
}

impl Encoding {
    /// Huffman encoding with 64-bit blocks.
    pub fn huffman() -> Self {
        Encoding::Huffman {
            block_width: DEFAULT_BLOCK_WIDTH,
        }
    }
}

/// How a dictionary search materializes its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Copy matching codes, then decode them.
    Copy,
    /// Collect matching row positions, then partially decompress.
    #[default]
    View,
}

/// A column compressed with either codec.
#[derive(Debug, Clone)]
pub enum CompressedColumn<D, C = u32> {
    /// Dictionary-encoded column.
    Dictionary(DictionaryColumn<D, C>),
    /// Huffman-encoded column.
    Huffman(HuffmanColumn<D>),
}

impl<D: ColumnValue, C: CodeWord> CompressedColumn<D, C> {
    /// Compress `column` with the given encoding.
    ///
    /// # Example
    /// ```
    /// use colpack::{CompressedColumn, Encoding, Predicate, ValueRange};
    ///
    /// let column = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 1];
    /// let compressed = CompressedColumn::<i32, u8>::compress(&column, Encoding::huffman()).unwrap();
    /// let range = ValueRange::between(6, 10).unwrap();
    /// assert_eq!(compressed.search(&Predicate::Range(range)).unwrap(), vec![6, 7, 8, 9]);
    /// ```
    pub fn compress(column: &[D], encoding: Encoding) -> Result<Self> {
        match encoding {
            Encoding::Dictionary => Ok(Self::Dictionary(DictionaryColumn::compress(column)?)),
            Encoding::Huffman { block_width } => Ok(Self::Huffman(
                HuffmanColumn::compress_with_block_width(column, block_width)?,
            )),
        }
    }

    /// The encoding of this column.
    pub fn encoding(&self) -> Encoding {
        match self {
            Self::Dictionary(_) => Encoding::Dictionary,
            Self::Huffman(h) => Encoding::Huffman {
                block_width: h.block_width(),
            },
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Self::Dictionary(d) => d.len(),
            Self::Huffman(h) => h.len(),
        }
    }

    /// Whether the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decompress every row.
    pub fn decompress(&self) -> Result<Vec<D>> {
        match self {
            Self::Dictionary(d) => d.decompress(),
            Self::Huffman(h) => h.decompress(),
        }
    }

    /// Size accounting for this column.
    pub fn metadata(&self) -> ColumnMetadata {
        match self {
            Self::Dictionary(d) => d.metadata(),
            Self::Huffman(h) => h.metadata(),
        }
    }

    /// Number of rows satisfying `predicate`.
    pub fn count(&self, predicate: &Predicate<'_, D>) -> Result<usize> {
        match self {
            Self::Dictionary(d) => Ok(d.where_view(&matching_codes(d, predicate))?.len()),
            Self::Huffman(h) => match predicate {
                Predicate::Equal(value) => h.count_where_equal(value),
                _ => h.count_matching(predicate),
            },
        }
    }

    /// Values of the rows satisfying `predicate`, in row order.
    pub fn search(&self, predicate: &Predicate<'_, D>) -> Result<Vec<D>> {
        self.search_with(predicate, Strategy::default())
    }

    /// Like [`search`](Self::search), choosing how a dictionary column
    /// materializes its matches. Huffman columns ignore `strategy`.
    pub fn search_with(&self, predicate: &Predicate<'_, D>, strategy: Strategy) -> Result<Vec<D>> {
        match self {
            Self::Dictionary(d) => {
                let matching = matching_codes(d, predicate);
                match strategy {
                    Strategy::Copy => d.where_copy(&matching)?.decompress(),
                    Strategy::View => d.partial_decompress(&d.where_view(&matching)?),
                }
            }
            Self::Huffman(h) => h.values_matching(predicate),
        }
    }

    /// Smallest value.
    pub fn min(&self) -> Result<D> {
        match self {
            Self::Dictionary(d) => d.min(),
            Self::Huffman(h) => h.min(),
        }
    }

    /// Largest value.
    pub fn max(&self) -> Result<D> {
        match self {
            Self::Dictionary(d) => d.max(),
            Self::Huffman(h) => h.max(),
        }
    }
}

impl<D: Numeric, C: CodeWord> CompressedColumn<D, C> {
    /// Sum of all rows, or of the rows satisfying `predicate`.
    pub fn sum(&self, predicate: Option<&Predicate<'_, D>>) -> Result<D::Sum> {
        match (self, predicate) {
            (Self::Dictionary(d), None) => d.sum(),
            (Self::Dictionary(d), Some(p)) => d.where_copy(&matching_codes(d, p))?.sum(),
            (Self::Huffman(h), None) => h.sum(),
            (Self::Huffman(h), Some(p)) => h.sum_matching(p),
        }
    }

    /// Mean of all rows.
    pub fn avg(&self) -> Result<f64> {
        match self {
            Self::Dictionary(d) => d.avg(),
            Self::Huffman(h) => h.avg(),
        }
    }
}

fn matching_codes<D: ColumnValue, C: CodeWord>(
    column: &DictionaryColumn<D, C>,
    predicate: &Predicate<'_, D>,
) -> MatchingCodes {
    match predicate {
        Predicate::Equal(value) => column.codes_equal(value),
        Predicate::Range(range) => column.codes_in_range(range),
        Predicate::Matching(f) => column.codes_matching(f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use crate::predicate::ValueRange;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn both(column: &[i64]) -> [CompressedColumn<i64, u16>; 2] {
        [
            CompressedColumn::compress(column, Encoding::Dictionary).unwrap(),
            CompressedColumn::compress(column, Encoding::Huffman { block_width: 16 }).unwrap(),
        ]
    }

    #[test]
    fn test_encoding() {
        let [dict, huff] = both(&[3, 1, 2]);
        assert_eq!(dict.encoding(), Encoding::Dictionary);
        assert_eq!(huff.encoding(), Encoding::Huffman { block_width: 16 });
        assert_eq!(Encoding::default(), Encoding::Dictionary);
        assert_eq!(Encoding::huffman(), Encoding::Huffman { block_width: 64 });
    }

    #[test]
    fn test_aggregates_agree() {
        let column: Vec<i64> = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 1];
        for compressed in both(&column) {
            assert_eq!(compressed.len(), 10);
            assert_eq!(compressed.decompress().unwrap(), column);
            assert_eq!(compressed.sum(None).unwrap(), 46);
            assert_eq!(compressed.avg().unwrap(), 4.6);
            assert_eq!(compressed.min().unwrap(), 1);
            assert_eq!(compressed.max().unwrap(), 9);
            assert_eq!(compressed.count(&Predicate::Equal(1)).unwrap(), 2);
            let greater = |v: &i64| *v > 5;
            assert_eq!(
                compressed.sum(Some(&Predicate::Matching(&greater))).unwrap(),
                30
            );
            assert_eq!(
                compressed.search(&Predicate::Matching(&greater)).unwrap(),
                vec![6, 7, 8, 9]
            );
        }
    }

    #[test]
    fn test_strategies_agree() {
        let column: Vec<i64> = vec![5, 3, 9, 3, 0, 7, 5];
        let [dict, _] = both(&column);
        let range = Predicate::Range(ValueRange::between(3, 6).unwrap());
        let copied = dict.search_with(&range, Strategy::Copy).unwrap();
        let viewed = dict.search_with(&range, Strategy::View).unwrap();
        assert_eq!(copied, vec![5, 3, 3, 5]);
        assert_eq!(copied, viewed);
    }

    #[test]
    fn test_empty_dictionary_column() {
        let compressed =
            CompressedColumn::<i64, u8>::compress(&[], Encoding::Dictionary).unwrap();
        assert!(compressed.is_empty());
        assert_eq!(compressed.sum(None).unwrap(), 0);
        assert!(matches!(compressed.avg(), Err(CodecError::EmptyColumn)));
        assert!(matches!(compressed.min(), Err(CodecError::EmptyColumn)));
        assert_eq!(compressed.count(&Predicate::Equal(1)).unwrap(), 0);
    }

    #[test]
    fn test_empty_huffman_column() {
        let result = CompressedColumn::<i64>::compress(&[], Encoding::huffman());
        assert!(matches!(result, Err(CodecError::EmptyColumn)));
    }

    #[test]
    fn test_metadata_dispatch() {
        let column: Vec<i64> = (0..500).map(|i| i % 3).collect();
        let [dict, huff] = both(&column);
        assert_eq!(dict.metadata().rows, 500);
        assert_eq!(huff.metadata().rows, 500);
        assert_eq!(dict.metadata().distinct, 3);
        assert_eq!(huff.metadata().distinct, 3);
    }

    #[test]
    fn test_random_predicates_agree() {
        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..25 {
            let len = rng.gen_range(1..250);
            let column: Vec<i64> = (0..len).map(|_| rng.gen_range(-20..20)).collect();
            let from = rng.gen_range(-25..25);
            let to = rng.gen_range(from..30);
            let target = column[rng.gen_range(0..len)];
            let even = |v: &i64| v % 2 == 0;

            let predicates = [
                Predicate::Equal(target),
                Predicate::Range(ValueRange::between(from, to).unwrap()),
                Predicate::Range(ValueRange::at_least(from)),
                Predicate::Range(ValueRange::below(to)),
                Predicate::Matching(&even),
            ];

            for compressed in both(&column) {
                for predicate in &predicates {
                    let expected: Vec<i64> =
                        column.iter().copied().filter(|v| predicate.matches(v)).collect();
                    assert_eq!(compressed.count(predicate).unwrap(), expected.len());
                    assert_eq!(compressed.search(predicate).unwrap(), expected);
                    assert_eq!(
                        compressed.search_with(predicate, Strategy::Copy).unwrap(),
                        expected
                    );
                    assert_eq!(
                        compressed.sum(Some(predicate)).unwrap(),
                        expected.iter().map(|&v| v as i128).sum::<i128>()
                    );
                }
            }
        }
    }
}
