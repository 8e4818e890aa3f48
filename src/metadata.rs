//! Size accounting for compressed columns.

/// Metadata about a compressed column.
///
/// Byte counts are computed from `size_of` of the stored types, not from
/// allocator measurements, so heap data owned by values (string contents)
/// is not included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetadata {
    /// Number of rows.
    pub rows: usize,
    /// Number of distinct values.
    pub distinct: usize,
    /// Size of the compressed representation in bytes.
    pub compressed_bytes: usize,
    /// Size of the same rows stored as a plain vector, in bytes.
    pub uncompressed_bytes: usize,
}

impl ColumnMetadata {
    /// Calculate the compression ratio (compressed size / original size).
    ///
    /// Returns 0 for an empty column.
    pub fn compression_ratio(&self) -> f64 {
        if self.uncompressed_bytes == 0 {
            return 0.0;
        }
        self.compressed_bytes as f64 / self.uncompressed_bytes as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_ratio() {
        let metadata = ColumnMetadata {
            rows: 100,
            distinct: 2,
            compressed_bytes: 200,
            uncompressed_bytes: 800,
        };
        assert_eq!(metadata.compression_ratio(), 0.25);
    }

    #[test]
    fn test_empty_ratio() {
        let metadata = ColumnMetadata {
            rows: 0,
            distinct: 0,
            compressed_bytes: 0,
            uncompressed_bytes: 0,
        };
        assert_eq!(metadata.compression_ratio(), 0.0);
    }
}
