//! Predicates evaluated against compressed columns.
//!
//! A [`Predicate`] is either structured (equality, half-open range) or an
//! arbitrary closure. Structured predicates let the codecs avoid work: the
//! dictionary codec binary-searches its sorted values, and the Huffman codec
//! skips blocks whose bounds cannot contain a match. Closures always fall
//! back to a full scan.

use std::fmt;

use crate::error::CodecError;
use crate::value::ColumnValue;
use crate::Result;

/// A half-open value range `[from, to)` with optional ends.
///
/// A missing `from` is unbounded below and a missing `to` is unbounded above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRange<D> {
    from: Option<D>,
    to: Option<D>,
}

impl<D: ColumnValue> ValueRange<D> {
    /// Create a range, failing with [`CodecError::InvalidRange`] when both
    /// ends are given and `from > to`.
    ///
    /// `from == to` is allowed and matches nothing.
    pub fn new(from: Option<D>, to: Option<D>) -> Result<Self> {
        if let (Some(f), Some(t)) = (&from, &to) {
            if f > t {
                return Err(CodecError::InvalidRange(format!("{f:?} > {t:?}")));
            }
        }
        Ok(ValueRange { from, to })
    }

    /// The range `[from, to)`.
    pub fn between(from: D, to: D) -> Result<Self> {
        Self::new(Some(from), Some(to))
    }

    /// Every value `>= from`.
    pub fn at_least(from: D) -> Self {
        ValueRange {
            from: Some(from),
            to: None,
        }
    }

    /// Every value `< to`.
    pub fn below(to: D) -> Self {
        ValueRange {
            from: None,
            to: Some(to),
        }
    }

    /// Every value.
    pub fn all() -> Self {
        ValueRange {
            from: None,
            to: None,
        }
    }

    /// Inclusive lower end, if any.
    pub fn from(&self) -> Option<&D> {
        self.from.as_ref()
    }

    /// Exclusive upper end, if any.
    pub fn to(&self) -> Option<&D> {
        self.to.as_ref()
    }

    /// Whether `value` lies in `[from, to)`.
    #[inline]
    pub fn contains(&self, value: &D) -> bool {
        self.from.as_ref().map_or(true, |f| value >= f)
            && self.to.as_ref().map_or(true, |t| value < t)
    }

    /// Whether any value in `[min, max]` can lie in this range.
    ///
    /// An empty range (`from == to`) intersects nothing.
    #[inline]
    pub fn intersects(&self, min: &D, max: &D) -> bool {
        if let (Some(f), Some(t)) = (&self.from, &self.to) {
            if f >= t {
                return false;
            }
        }
        self.from.as_ref().map_or(true, |f| max >= f)
            && self.to.as_ref().map_or(true, |t| min < t)
    }
}

/// A filter over column values.
pub enum Predicate<'a, D> {
    /// Values equal to the given one.
    Equal(D),
    /// Values inside a half-open range.
    Range(ValueRange<D>),
    /// Values accepted by an arbitrary closure.
    Matching(&'a dyn Fn(&D) -> bool),
}

impl<'a, D: ColumnValue> Predicate<'a, D> {
    /// Whether `value` satisfies the predicate.
    #[inline]
    pub fn matches(&self, value: &D) -> bool {
        match self {
            Predicate::Equal(target) => value == target,
            Predicate::Range(range) => range.contains(value),
            Predicate::Matching(f) => f(value),
        }
    }

    /// Whether a block whose values lie in `[min, max]` may contain a match.
    ///
    /// Always true for closures.
    #[inline]
    pub fn may_match(&self, min: &D, max: &D) -> bool {
        match self {
            Predicate::Equal(target) => min <= target && target <= max,
            Predicate::Range(range) => range.intersects(min, max),
            Predicate::Matching(_) => true,
        }
    }
}

impl<D: fmt::Debug> fmt::Debug for Predicate<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Equal(v) => f.debug_tuple("Equal").field(v).finish(),
            Predicate::Range(r) => f.debug_tuple("Range").field(r).finish(),
            Predicate::Matching(_) => f.write_str("Matching(..)"),
        }
    }
}
