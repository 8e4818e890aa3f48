//! Value types that can be stored in a compressed column.
//!
//! Both codecs need a total order (sorted dictionaries, block bounds) and
//! hashing (value lookups while encoding). Aggregates additionally need
//! arithmetic, which [`Numeric`] provides through a widened accumulator so
//! that summing a column never overflows the value type itself.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Add;

use ordered_float::OrderedFloat;

/// A value that can be stored in a compressed column.
///
/// Implemented for every totally ordered, hashable, cloneable type:
/// integers, `String`, [`Timestamp`] and the [`Float64`] / [`Float32`]
/// wrappers.
pub trait ColumnValue: Ord + Hash + Clone + Debug {}

impl<T: Ord + Hash + Clone + Debug> ColumnValue for T {}

/// 64-bit float with a total order, usable as a column value.
pub type Float64 = OrderedFloat<f64>;

/// 32-bit float with a total order, usable as a column value.
pub type Float32 = OrderedFloat<f32>;

/// Seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Seconds since the Unix epoch.
    pub fn seconds(self) -> i64 {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(seconds: i64) -> Self {
        Timestamp(seconds)
    }
}

/// A column value that supports sum and average.
pub trait Numeric: ColumnValue {
    /// Accumulator used for sums over this type.
    type Sum: Copy + Default + PartialEq + Debug + Add<Output = Self::Sum>;

    /// This value multiplied by `count`, widened to the accumulator type.
    fn times(&self, count: usize) -> Self::Sum;

    /// This value as an `f64`.
    fn as_f64(&self) -> f64;

    /// Convert an accumulated sum to `f64` (for averages).
    fn sum_as_f64(sum: Self::Sum) -> f64;
}

macro_rules! impl_numeric_int {
    ($sum:ty => $($t:ty),*) => {
        $(
            impl Numeric for $t {
                type Sum = $sum;

                #[inline]
                fn times(&self, count: usize) -> $sum {
                    *self as $sum * count as $sum
                }

                #[inline]
                fn as_f64(&self) -> f64 {
                    *self as f64
                }

                #[inline]
                fn sum_as_f64(sum: $sum) -> f64 {
                    sum as f64
                }
            }
        )*
    };
}

impl_numeric_int!(i128 => i8, i16, i32, i64, isize);
impl_numeric_int!(u128 => u8, u16, u32, u64, usize);

impl Numeric for Float64 {
    type Sum = f64;

    #[inline]
    fn times(&self, count: usize) -> f64 {
        self.0 * count as f64
    }

    #[inline]
    fn as_f64(&self) -> f64 {
        self.0
    }

    #[inline]
    fn sum_as_f64(sum: f64) -> f64 {
        sum
    }
}

impl Numeric for Float32 {
    type Sum = f64;

    #[inline]
    fn times(&self, count: usize) -> f64 {
        self.0 as f64 * count as f64
    }

    #[inline]
    fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    #[inline]
    fn sum_as_f64(sum: f64) -> f64 {
        sum
    }
}

impl Numeric for Timestamp {
    type Sum = i128;

    #[inline]
    fn times(&self, count: usize) -> i128 {
        self.0 as i128 * count as i128
    }

    #[inline]
    fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    #[inline]
    fn sum_as_f64(sum: i128) -> f64 {
        sum as f64
    }
}
