//! Huffman encoding into fixed-width blocks.
//!
//! Each distinct value gets a prefix-free code from a frequency-weighted
//! Huffman tree. Codes for successive rows are packed most-significant-bit
//! first into blocks of `block_width` bits; a code that would overflow the
//! current block starts a new one, so no code is ever split.
//!
//! Alongside every block the column keeps the smallest and largest value
//! packed into it. These bounds act as a per-block index: equality and range
//! queries skip every block whose bounds cannot match, and `min`/`max` are
//! answered from the bounds alone.

use std::mem::size_of;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::bitpack::{check_width, BlockReader, BlockWriter, Code};
use crate::error::CodecError;
use crate::metadata::ColumnMetadata;
use crate::predicate::{Predicate, ValueRange};
use crate::tree;
use crate::value::{ColumnValue, Numeric};
use crate::Result;

/// Block width used by [`HuffmanColumn::compress`].
pub const DEFAULT_BLOCK_WIDTH: usize = 64;

/// One packed block: the code bits and the number of rows they encode.
///
/// The codes occupy the high bits of the low `block_width` bits of `word`;
/// unused tail bits are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedBlock {
    word: u64,
    rows: u32,
}

impl PackedBlock {
    /// Create a block from its bits and row count.
    pub fn new(word: u64, rows: u32) -> Self {
        PackedBlock { word, rows }
    }

    /// The packed code bits.
    pub fn word(&self) -> u64 {
        self.word
    }

    /// Number of rows encoded in this block.
    pub fn rows(&self) -> usize {
        self.rows as usize
    }
}

/// Smallest and largest value packed into a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockBounds<D> {
    /// Smallest value in the block.
    pub min: D,
    /// Largest value in the block.
    pub max: D,
}

impl<D: ColumnValue> BlockBounds<D> {
    fn of(value: &D) -> Self {
        BlockBounds {
            min: value.clone(),
            max: value.clone(),
        }
    }

    fn include(&mut self, value: &D) {
        if *value < self.min {
            self.min = value.clone();
        } else if *value > self.max {
            self.max = value.clone();
        }
    }
}

/// Code-to-value lookup used for decoding.
#[derive(Debug, Clone)]
pub struct ReverseTable<D> {
    values: FxHashMap<Code, D>,
    max_len: usize,
}

impl<D: ColumnValue> ReverseTable<D> {
    /// Invert a value-to-code table.
    pub fn new(code_table: &FxHashMap<D, Code>) -> Self {
        let values: FxHashMap<Code, D> = code_table
            .iter()
            .map(|(value, code)| (*code, value.clone()))
            .collect();
        let max_len = values.keys().map(Code::len).max().unwrap_or(0);
        ReverseTable { values, max_len }
    }

    /// The value encoded by `code`, if any.
    pub fn get(&self, code: &Code) -> Option<&D> {
        self.values.get(code)
    }

    /// Decode the rows of one block, appending them to `out`.
    ///
    /// Bits are consumed most-significant first; whenever the bits read
    /// since the last match form a known code, its value is emitted.
    pub fn decode_block(
        &self,
        block: &PackedBlock,
        block_width: usize,
        out: &mut Vec<D>,
    ) -> Result<()> {
        let mut reader = BlockReader::new(block.word(), block_width)?;
        let mut pending = Code::EMPTY;
        let mut decoded = 0;

        while decoded < block.rows() {
            let bit = reader.read_bit().ok_or_else(|| {
                CodecError::CorruptData(format!(
                    "block ended after {decoded} of {} rows",
                    block.rows()
                ))
            })?;
            pending = pending.push(bit).ok_or_else(|| {
                CodecError::CorruptData("code longer than 64 bits".into())
            })?;

            if let Some(value) = self.values.get(&pending) {
                out.push(value.clone());
                decoded += 1;
                pending = Code::EMPTY;
            } else if pending.len() >= self.max_len {
                return Err(CodecError::CorruptData(format!(
                    "bits {pending} at offset {} match no code",
                    reader.position() - pending.len()
                )));
            }
        }

        Ok(())
    }
}

/// A Huffman-encoded column.
#[derive(Debug, Clone)]
pub struct HuffmanColumn<D> {
    code_table: FxHashMap<D, Code>,
    blocks: Vec<PackedBlock>,
    bounds: Vec<BlockBounds<D>>,
    block_width: usize,
    rows: usize,
}

impl<D: ColumnValue> HuffmanColumn<D> {
    /// Compress a column into 64-bit blocks.
    ///
    /// # Example
    /// ```
    /// use colpack::HuffmanColumn;
    ///
    /// let column = vec![1, 1, 1, 1, 2, 2, 2, 3, 3, 4, 5, 6];
    /// let compressed = HuffmanColumn::compress(&column).unwrap();
    /// assert_eq!(compressed.count_where_equal(&1).unwrap(), 4);
    /// assert_eq!(compressed.max().unwrap(), 6);
    /// assert_eq!(compressed.decompress().unwrap(), column);
    /// ```
    pub fn compress(column: &[D]) -> Result<Self> {
        Self::compress_with_block_width(column, DEFAULT_BLOCK_WIDTH)
    }

    /// Compress a column into blocks of `block_width` bits (1 to 64).
    ///
    /// Fails with [`CodecError::EmptyColumn`] for an empty column and
    /// [`CodecError::CodeTooLong`] when some code is wider than a block.
    pub fn compress_with_block_width(column: &[D], block_width: usize) -> Result<Self> {
        check_width(block_width)?;
        let root = tree::build(column).ok_or(CodecError::EmptyColumn)?;
        let code_table = tree::assign_codes(&root, block_width)?;
        drop(root);

        let mut writer = BlockWriter::new(block_width)?;
        let mut blocks = Vec::new();
        let mut bounds = Vec::new();
        let mut current: Option<BlockBounds<D>> = None;
        let mut block_rows = 0u32;

        for value in column {
            let code = *code_table.get(value).ok_or_else(|| {
                CodecError::CorruptData(format!("{value:?} missing from code table"))
            })?;

            if !writer.fits(code.len()) {
                if let Some(finished) = current.take() {
                    blocks.push(PackedBlock::new(writer.finish(), block_rows));
                    bounds.push(finished);
                    block_rows = 0;
                }
            }

            writer.write(code)?;
            block_rows += 1;
            current
                .get_or_insert_with(|| BlockBounds::of(value))
                .include(value);
        }

        if let Some(finished) = current {
            blocks.push(PackedBlock::new(writer.finish(), block_rows));
            bounds.push(finished);
        }

        debug!(
            rows = column.len(),
            distinct = code_table.len(),
            blocks = blocks.len(),
            block_width,
            "huffman column compressed"
        );
        Ok(HuffmanColumn {
            code_table,
            blocks,
            bounds,
            block_width,
            rows: column.len(),
        })
    }

    /// Rebuild a column from its parts.
    ///
    /// Checks that there is one bounds entry per block and that every code
    /// is non-empty and fits in a block.
    pub fn from_parts(
        code_table: FxHashMap<D, Code>,
        blocks: Vec<PackedBlock>,
        bounds: Vec<BlockBounds<D>>,
        block_width: usize,
    ) -> Result<Self> {
        check_width(block_width)?;
        if blocks.len() != bounds.len() {
            return Err(CodecError::CorruptData(format!(
                "{} blocks but {} bounds",
                blocks.len(),
                bounds.len()
            )));
        }
        if let Some((value, code)) = code_table
            .iter()
            .find(|(_, code)| code.is_empty() || code.len() > block_width)
        {
            return Err(CodecError::CorruptData(format!(
                "code of {} bits for {value:?} in {block_width}-bit blocks",
                code.len()
            )));
        }
        let rows = blocks.iter().map(PackedBlock::rows).sum();
        Ok(HuffmanColumn {
            code_table,
            blocks,
            bounds,
            block_width,
            rows,
        })
    }

    /// Value-to-code table.
    pub fn code_table(&self) -> &FxHashMap<D, Code> {
        &self.code_table
    }

    /// The code assigned to `value`, if it occurs in the column.
    pub fn code_for(&self, value: &D) -> Option<Code> {
        self.code_table.get(value).copied()
    }

    /// The packed blocks, in row order.
    pub fn blocks(&self) -> &[PackedBlock] {
        &self.blocks
    }

    /// Per-block value bounds, parallel to [`blocks`](Self::blocks).
    pub fn bounds(&self) -> &[BlockBounds<D>] {
        &self.bounds
    }

    /// Width of one block in bits.
    pub fn block_width(&self) -> usize {
        self.block_width
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Whether the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Build the code-to-value table used for decoding.
    pub fn reverse_table(&self) -> ReverseTable<D> {
        ReverseTable::new(&self.code_table)
    }

    /// Decompress every row.
    pub fn decompress(&self) -> Result<Vec<D>> {
        let table = self.reverse_table();
        let mut out = Vec::with_capacity(self.rows);
        for block in &self.blocks {
            table.decode_block(block, self.block_width, &mut out)?;
        }
        Ok(out)
    }

    /// Decompress the rows of block `index` only.
    pub fn decompress_block(&self, index: usize, table: &ReverseTable<D>) -> Result<Vec<D>> {
        let block = self.blocks.get(index).ok_or(CodecError::IndexOutOfRange {
            index,
            len: self.blocks.len(),
        })?;
        let mut out = Vec::with_capacity(block.rows());
        table.decode_block(block, self.block_width, &mut out)?;
        Ok(out)
    }

    /// Visit every row satisfying `predicate` with its row position,
    /// decoding only blocks whose bounds may match.
    fn scan(&self, predicate: &Predicate<'_, D>, mut visit: impl FnMut(usize, &D)) -> Result<()> {
        let table = self.reverse_table();
        let mut buffer = Vec::with_capacity(self.block_width);
        let mut first_row = 0;

        for (i, (block, bounds)) in self.blocks.iter().zip(&self.bounds).enumerate() {
            if predicate.may_match(&bounds.min, &bounds.max) {
                buffer.clear();
                table.decode_block(block, self.block_width, &mut buffer)?;
                for (offset, value) in buffer.iter().enumerate() {
                    if predicate.matches(value) {
                        visit(first_row + offset, value);
                    }
                }
            } else {
                trace!(block = i, "skipped by bounds");
            }
            first_row += block.rows();
        }

        Ok(())
    }

    /// Number of rows satisfying `predicate`.
    pub fn count_matching(&self, predicate: &Predicate<'_, D>) -> Result<usize> {
        let mut count = 0;
        self.scan(predicate, |_, _| count += 1)?;
        Ok(count)
    }

    /// Values of the rows satisfying `predicate`, in row order.
    pub fn values_matching(&self, predicate: &Predicate<'_, D>) -> Result<Vec<D>> {
        let mut values = Vec::new();
        self.scan(predicate, |_, value| values.push(value.clone()))?;
        Ok(values)
    }

    /// Positions of the rows satisfying `predicate`, ascending.
    pub fn indexes_matching(&self, predicate: &Predicate<'_, D>) -> Result<Vec<usize>> {
        let mut rows = Vec::new();
        self.scan(predicate, |row, _| rows.push(row))?;
        Ok(rows)
    }

    /// Number of rows equal to `value`.
    pub fn count_where_equal(&self, value: &D) -> Result<usize> {
        if !self.code_table.contains_key(value) {
            return Ok(0);
        }
        self.count_matching(&Predicate::Equal(value.clone()))
    }

    /// Number of rows in `range`.
    pub fn count_where_range(&self, range: &ValueRange<D>) -> Result<usize> {
        self.count_matching(&Predicate::Range(range.clone()))
    }

    /// Values of the rows in `range`, in row order.
    pub fn values_where_range(&self, range: &ValueRange<D>) -> Result<Vec<D>> {
        self.values_matching(&Predicate::Range(range.clone()))
    }

    /// Positions of the rows in `range`, ascending.
    pub fn indexes_where_range(&self, range: &ValueRange<D>) -> Result<Vec<usize>> {
        self.indexes_matching(&Predicate::Range(range.clone()))
    }

    /// Smallest value, from the block bounds.
    pub fn min(&self) -> Result<D> {
        self.bounds
            .iter()
            .map(|b| &b.min)
            .min()
            .cloned()
            .ok_or(CodecError::EmptyColumn)
    }

    /// Largest value, from the block bounds.
    pub fn max(&self) -> Result<D> {
        self.bounds
            .iter()
            .map(|b| &b.max)
            .max()
            .cloned()
            .ok_or(CodecError::EmptyColumn)
    }

    /// Size accounting for this column.
    pub fn metadata(&self) -> ColumnMetadata {
        let block_bytes = self.block_width.div_ceil(8) + size_of::<u32>();
        ColumnMetadata {
            rows: self.rows,
            distinct: self.code_table.len(),
            compressed_bytes: self.code_table.len() * (size_of::<D>() + size_of::<Code>())
                + self.blocks.len() * block_bytes
                + self.bounds.len() * 2 * size_of::<D>(),
            uncompressed_bytes: self.rows * size_of::<D>(),
        }
    }
}

impl<D: Numeric> HuffmanColumn<D> {
    /// Sum of the rows satisfying `predicate`.
    pub fn sum_matching(&self, predicate: &Predicate<'_, D>) -> Result<D::Sum> {
        let mut sum = D::Sum::default();
        self.scan(predicate, |_, value| sum = sum + value.times(1))?;
        Ok(sum)
    }

    /// Sum of the rows in `range`.
    pub fn sum_where_range(&self, range: &ValueRange<D>) -> Result<D::Sum> {
        self.sum_matching(&Predicate::Range(range.clone()))
    }

    /// Sum of all rows.
    pub fn sum(&self) -> Result<D::Sum> {
        self.sum_where_range(&ValueRange::all())
    }

    /// Mean of all rows.
    pub fn avg(&self) -> Result<f64> {
        if self.rows == 0 {
            return Err(CodecError::EmptyColumn);
        }
        Ok(D::sum_as_f64(self.sum()?) / self.rows as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sample_column() -> Vec<i32> {
        let mut column = vec![1, 1, 1, 1, 2, 2, 2, 3, 3, 4, 5, 6];
        column.extend(0..40);
        column
    }

    fn code(s: &str) -> Code {
        s.chars()
            .try_fold(Code::EMPTY, |c, ch| c.push(ch == '1'))
            .unwrap()
    }

    #[test]
    fn test_compress_decompress_roundtrip() {
        let column = sample_column();
        let compressed = HuffmanColumn::compress(&column).unwrap();
        assert_eq!(compressed.len(), column.len());
        assert_eq!(compressed.blocks().len(), compressed.bounds().len());
        assert_eq!(compressed.decompress().unwrap(), column);
    }

    #[test]
    fn test_count_where_equal() {
        let compressed = HuffmanColumn::compress(&sample_column()).unwrap();
        assert_eq!(compressed.count_where_equal(&1).unwrap(), 5);
        assert_eq!(compressed.count_where_equal(&39).unwrap(), 1);
        assert_eq!(compressed.count_where_equal(&100).unwrap(), 0);
    }

    #[test]
    fn test_count_where_range() {
        let compressed = HuffmanColumn::compress(&sample_column()).unwrap();
        let count = |from, to| {
            let range = ValueRange::new(from, to).unwrap();
            compressed.count_where_range(&range).unwrap()
        };
        assert_eq!(count(Some(3), Some(6)), 7);
        assert_eq!(count(Some(30), None), 10);
        assert_eq!(count(None, Some(2)), 6);
        assert_eq!(count(None, None), 52);
    }

    #[test]
    fn test_min_max() {
        let compressed = HuffmanColumn::compress(&sample_column()).unwrap();
        assert_eq!(compressed.min().unwrap(), 0);
        assert_eq!(compressed.max().unwrap(), 39);
    }

    #[test]
    fn test_sum_and_avg() {
        let compressed = HuffmanColumn::compress(&sample_column()).unwrap();
        let range = ValueRange::between(10, 11).unwrap();
        assert_eq!(compressed.sum_where_range(&range).unwrap(), 10);
        assert_eq!(compressed.sum_where_range(&ValueRange::all()).unwrap(), 811);
        assert_eq!(compressed.sum().unwrap(), 811);
        let avg = compressed.avg().unwrap();
        assert!(avg > 15.596 && avg < 15.597, "avg={avg}");
    }

    #[test]
    fn test_values_and_indexes_where_range() {
        let compressed = HuffmanColumn::compress(&sample_column()).unwrap();
        let range = ValueRange::between(30, 32).unwrap();
        assert_eq!(compressed.values_where_range(&range).unwrap(), vec![30, 31]);
        assert_eq!(compressed.indexes_where_range(&range).unwrap(), vec![42, 43]);
    }

    #[test]
    fn test_bounds_are_sound() {
        let column = sample_column();
        let compressed = HuffmanColumn::compress_with_block_width(&column, 16).unwrap();
        assert!(compressed.blocks().len() > 1);

        let table = compressed.reverse_table();
        let mut total = 0;
        for (i, bounds) in compressed.bounds().iter().enumerate() {
            let values = compressed.decompress_block(i, &table).unwrap();
            assert_eq!(values.len(), compressed.blocks()[i].rows());
            assert_eq!(values.iter().min(), Some(&bounds.min));
            assert_eq!(values.iter().max(), Some(&bounds.max));
            total += values.len();
        }
        assert_eq!(total, column.len());
        assert!(matches!(
            compressed.decompress_block(compressed.blocks().len(), &table),
            Err(CodecError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_codes_never_split() {
        let column = sample_column();
        let compressed = HuffmanColumn::compress_with_block_width(&column, 8).unwrap();
        let mut start = 0;
        for block in compressed.blocks() {
            let used: usize = column[start..start + block.rows()]
                .iter()
                .map(|v| compressed.code_for(v).unwrap().len())
                .sum();
            assert!(used <= 8);
            start += block.rows();
        }
        assert_eq!(start, column.len());
    }

    #[test]
    fn test_single_value_column() {
        let column = vec![7i64; 100];
        let compressed = HuffmanColumn::compress(&column).unwrap();
        assert_eq!(compressed.code_for(&7).unwrap().to_string(), "0");
        assert_eq!(compressed.blocks().len(), 2);
        assert_eq!(compressed.decompress().unwrap(), column);
        assert_eq!(compressed.sum().unwrap(), 700);
        assert_eq!(compressed.avg().unwrap(), 7.0);
    }

    #[test]
    fn test_one_bit_blocks() {
        let column = vec![true, false, false, true, true];
        let compressed = HuffmanColumn::compress_with_block_width(&column, 1).unwrap();
        assert_eq!(compressed.blocks().len(), 5);
        assert_eq!(compressed.decompress().unwrap(), column);
    }

    #[test]
    fn test_string_column() {
        let column: Vec<String> = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let compressed = HuffmanColumn::compress(&column).unwrap();
        assert_eq!(compressed.decompress().unwrap(), column);
        let greater = |v: &String| v.as_str() > "5";
        assert_eq!(
            compressed.values_matching(&Predicate::Matching(&greater)).unwrap(),
            vec!["6", "7", "8", "9"]
        );
    }

    #[test]
    fn test_empty_column() {
        let result = HuffmanColumn::<i32>::compress(&[]);
        assert!(matches!(result, Err(CodecError::EmptyColumn)));
    }

    #[test]
    fn test_code_too_long() {
        let column: Vec<i32> = (0..8).collect();
        let result = HuffmanColumn::compress_with_block_width(&column, 2);
        assert!(matches!(result, Err(CodecError::CodeTooLong { .. })));
    }

    #[test]
    fn test_invalid_block_width() {
        assert!(matches!(
            HuffmanColumn::compress_with_block_width(&[1, 2], 0),
            Err(CodecError::BlockWidthExceeded(0))
        ));
        assert!(matches!(
            HuffmanColumn::compress_with_block_width(&[1, 2], 128),
            Err(CodecError::BlockWidthExceeded(128))
        ));
    }

    #[test]
    fn test_from_parts_validation() {
        let mut table = FxHashMap::default();
        table.insert(1, code("0"));
        table.insert(2, code("10"));
        let bounds = vec![BlockBounds { min: 1, max: 2 }];

        let result = HuffmanColumn::from_parts(table.clone(), vec![], bounds.clone(), 8);
        assert!(matches!(result, Err(CodecError::CorruptData(_))));

        let block = PackedBlock::new(0, 1);
        let result = HuffmanColumn::from_parts(table.clone(), vec![block], bounds.clone(), 1);
        assert!(matches!(result, Err(CodecError::CorruptData(_))));

        // "0" "10" "0" -> 1, 2, 1
        let block = PackedBlock::new(0b0100_0000, 3);
        let column = HuffmanColumn::from_parts(table, vec![block], bounds, 8).unwrap();
        assert_eq!(column.decompress().unwrap(), vec![1, 2, 1]);
    }

    #[test]
    fn test_corrupt_blocks() {
        let mut table = FxHashMap::default();
        table.insert(1, code("0"));
        table.insert(2, code("10"));
        let bounds = vec![BlockBounds { min: 1, max: 2 }];

        // "11" matches no code.
        let bad_bits = PackedBlock::new(0b11, 1);
        let column =
            HuffmanColumn::from_parts(table.clone(), vec![bad_bits], bounds.clone(), 2).unwrap();
        assert!(matches!(column.decompress(), Err(CodecError::CorruptData(_))));

        // Claims more rows than the bits can hold.
        let short = PackedBlock::new(0b00, 3);
        let column = HuffmanColumn::from_parts(table, vec![short], bounds, 2).unwrap();
        assert!(matches!(column.decompress(), Err(CodecError::CorruptData(_))));
    }

    #[test]
    fn test_empty_range_skips_straddling_block() {
        let mut table = FxHashMap::default();
        table.insert(1, code("0"));
        table.insert(2, code("10"));
        let bounds = vec![BlockBounds { min: 0, max: 10 }];

        // Undecodable block: any query that decodes it fails.
        let bad_bits = PackedBlock::new(0b11, 1);
        let column = HuffmanColumn::from_parts(table, vec![bad_bits], bounds, 2).unwrap();

        let empty = ValueRange::between(4, 4).unwrap();
        assert_eq!(column.count_where_range(&empty).unwrap(), 0);
        assert!(column.values_where_range(&empty).unwrap().is_empty());

        let nonempty = ValueRange::between(4, 5).unwrap();
        assert!(matches!(
            column.count_where_range(&nonempty),
            Err(CodecError::CorruptData(_))
        ));
    }

    #[test]
    fn test_metadata() {
        let column: Vec<i64> = (0..1000).map(|i| i % 2).collect();
        let compressed = HuffmanColumn::compress(&column).unwrap();
        let metadata = compressed.metadata();
        assert_eq!(metadata.rows, 1000);
        assert_eq!(metadata.distinct, 2);
        assert_eq!(compressed.blocks().len(), 16);
        assert!(metadata.compression_ratio() < 0.1);
    }

    #[test]
    fn test_random_queries_match_naive() {
        let mut rng = StdRng::seed_from_u64(42);
        for width in [16, 23, 64] {
            for _ in 0..10 {
                let len = rng.gen_range(1..400);
                let column: Vec<i64> = (0..len)
                    .map(|_| rng.gen_range(0..12) * rng.gen_range(0..4))
                    .collect();
                let compressed = HuffmanColumn::compress_with_block_width(&column, width).unwrap();
                assert_eq!(compressed.decompress().unwrap(), column);
                assert_eq!(compressed.min().unwrap(), *column.iter().min().unwrap());
                assert_eq!(compressed.max().unwrap(), *column.iter().max().unwrap());

                let from = rng.gen_range(0..40);
                let to = rng.gen_range(from..50);
                let range = ValueRange::between(from, to).unwrap();
                let expected: Vec<(usize, i64)> = column
                    .iter()
                    .copied()
                    .enumerate()
                    .filter(|(_, v)| range.contains(v))
                    .collect();

                assert_eq!(compressed.count_where_range(&range).unwrap(), expected.len());
                assert_eq!(
                    compressed.indexes_where_range(&range).unwrap(),
                    expected.iter().map(|(i, _)| *i).collect::<Vec<_>>()
                );
                assert_eq!(
                    compressed.sum_where_range(&range).unwrap(),
                    expected.iter().map(|(_, v)| *v as i128).sum::<i128>()
                );

                let target = column[rng.gen_range(0..len)];
                assert_eq!(
                    compressed.count_where_equal(&target).unwrap(),
                    column.iter().filter(|&&v| v == target).count()
                );
            }
        }
    }
}
