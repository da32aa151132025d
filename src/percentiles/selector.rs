//! Heap-based quartile selection
//!
//! Computes the 25th, 50th, and 75th percentiles of a batch using bounded
//! max-heap selection: only the smallest `k` elements are retained, where
//! `k - 1` is the highest sorted position the 75th percentile can touch.
//! For the fixed quartile targets this avoids sorting the full input.
//!
//! Percentile positions follow the linear-interpolation convention: the
//! value at fractional rank `f * (n - 1)` in ascending order, interpolated
//! between the two bracketing integer positions. This convention is the
//! contract; no nearest-rank or midpoint variant is used.

use super::Datum;
use crate::error::InvalidInputError;
use crate::math;
use core::cmp::Ordering;

#[cfg(feature = "std")]
use std::{collections::BinaryHeap, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{collections::BinaryHeap, vec::Vec};

/// The three quartiles of a batch
///
/// Produced by [`PercentileSelector::calculate`]. Order statistics and
/// linear interpolation are both monotone, so `p25 <= p50 <= p75` always
/// holds, and every field is a finite number.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quartiles {
    /// 25th percentile (lower quartile)
    pub p25: f64,
    /// 50th percentile (median)
    pub p50: f64,
    /// 75th percentile (upper quartile)
    pub p75: f64,
}

impl Quartiles {
    /// Median, an alias for `p50`
    pub fn median(&self) -> f64 {
        self.p50
    }

    /// Interquartile range: `p75 - p25`
    pub fn iqr(&self) -> f64 {
        self.p75 - self.p25
    }

    /// Midhinge: the mean of the lower and upper quartiles
    pub fn midhinge(&self) -> f64 {
        (self.p25 + self.p75) / 2.0
    }

    /// Bowley's trimean: the average of the median and the midhinge
    pub fn trimean(&self) -> f64 {
        (self.p25 + 2.0 * self.p50 + self.p75) / 4.0
    }
}

/// Quartile selector for batches with missing or invalid entries
///
/// The selector is stateless: each call cleans its input into a fresh
/// working copy and retains nothing afterwards, so a single instance can be
/// shared freely across threads and reused across calls.
///
/// # Algorithm
///
/// The highest sorted position any quartile touches is
/// `ceil(0.75 * (n - 1))`. One pass over the cleaned input feeds a bounded
/// max-heap that keeps the `k = ceil(0.75 * (n - 1)) + 1` smallest
/// elements; the retained prefix is then sorted and each quartile is
/// interpolated from its two bracketing order statistics. Heap extraction
/// order is *not* ascending, so the sort of the prefix is load-bearing for
/// correctness, not a nicety.
///
/// # Example
///
/// ```
/// use batchstats::percentiles::PercentileSelector;
///
/// let selector = PercentileSelector::new();
/// let q = selector
///     .calculate([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0])
///     .unwrap();
///
/// assert_eq!((q.p25, q.p50, q.p75), (3.25, 5.5, 7.75));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PercentileSelector;

impl PercentileSelector {
    /// Create a new selector
    pub fn new() -> Self {
        Self
    }

    /// Filter an input sequence down to its finite values
    ///
    /// Missing markers, NaN, and infinities are dropped; the relative order
    /// of surviving values is preserved. The caller's data is not modified.
    ///
    /// ```
    /// use batchstats::percentiles::PercentileSelector;
    ///
    /// let cleaned = PercentileSelector::new()
    ///     .clean([Some(1.0), None, Some(f64::NAN), Some(2.0)]);
    /// assert_eq!(cleaned, vec![1.0, 2.0]);
    /// ```
    pub fn clean<I>(&self, values: I) -> Vec<f64>
    where
        I: IntoIterator,
        I::Item: Into<Datum>,
    {
        values
            .into_iter()
            .filter_map(|item| item.into().finite())
            .collect()
    }

    /// Calculate the 25th, 50th, and 75th percentiles
    ///
    /// The input is cleaned first as in [`clean`](Self::clean), then the
    /// quartiles are selected from the surviving values. A single surviving
    /// value is its own p25, p50, and p75.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] when no finite values remain after
    /// cleaning, either because the input was empty or because every
    /// element was missing or non-finite.
    pub fn calculate<I>(&self, values: I) -> Result<Quartiles, InvalidInputError>
    where
        I: IntoIterator,
        I::Item: Into<Datum>,
    {
        let mut cleaned = Vec::new();
        let mut raw_len = 0usize;

        for item in values {
            raw_len += 1;
            if let Some(v) = item.into().finite() {
                cleaned.push(v);
            }
        }

        if cleaned.is_empty() {
            return Err(if raw_len == 0 {
                InvalidInputError::EmptyInput
            } else {
                InvalidInputError::AllFiltered
            });
        }

        Ok(quartiles_of(&cleaned))
    }
}

/// Quartiles of a non-empty slice of finite values
fn quartiles_of(cleaned: &[f64]) -> Quartiles {
    let n = cleaned.len();

    if n == 1 {
        let v = cleaned[0];
        return Quartiles {
            p25: v,
            p50: v,
            p75: v,
        };
    }

    let ranks = [0.25, 0.50, 0.75].map(|f| FractionalRank::new(f, n));

    // The largest index any rank touches bounds the selection size.
    let k = ranks[2].hi + 1;
    let prefix = smallest_k(cleaned, k);

    let [p25, p50, p75] = ranks.map(|r| r.interpolate(&prefix));
    Quartiles { p25, p50, p75 }
}

/// A percentile target resolved to bracketing sorted positions
///
/// For fraction `f` over `n` elements the fractional rank is
/// `r = f * (n - 1)`; `lo`/`hi` bracket it and `frac` is the interpolation
/// weight. Integral ranks degenerate to `lo == hi` with `frac == 0`.
#[derive(Clone, Copy, Debug)]
struct FractionalRank {
    lo: usize,
    hi: usize,
    frac: f64,
}

impl FractionalRank {
    fn new(fraction: f64, n: usize) -> Self {
        let r = fraction * (n - 1) as f64;
        let lo = math::floor(r) as usize;
        let hi = math::ceil(r) as usize;
        Self {
            lo,
            hi,
            frac: r - lo as f64,
        }
    }

    /// Linear interpolation between the bracketing order statistics
    fn interpolate(self, sorted: &[f64]) -> f64 {
        let lo = sorted[self.lo];
        if self.hi == self.lo {
            return lo;
        }
        lo + self.frac * (sorted[self.hi] - lo)
    }
}

/// `f64` wrapper ordered by `total_cmp` so it can live in a `BinaryHeap`
#[derive(Clone, Copy, Debug, PartialEq)]
struct OrdF64(f64);

impl Eq for OrdF64 {}

impl PartialOrd for OrdF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrdF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// The `k` smallest elements of `values`, ascending
///
/// Maintains a max-heap of the `k` smallest seen so far; the heap root is
/// the current selection's largest element and is evicted whenever a
/// smaller value arrives. When `k` covers the whole slice a plain full sort
/// is used instead.
fn smallest_k(values: &[f64], k: usize) -> Vec<f64> {
    debug_assert!(k >= 1 && k <= values.len());

    if k >= values.len() {
        let mut all = values.to_vec();
        all.sort_by(|a, b| a.total_cmp(b));
        return all;
    }

    let mut heap: BinaryHeap<OrdF64> = BinaryHeap::with_capacity(k);
    for &value in values {
        if heap.len() < k {
            heap.push(OrdF64(value));
        } else if let Some(&OrdF64(largest)) = heap.peek() {
            if value < largest {
                heap.pop();
                heap.push(OrdF64(value));
            }
        }
    }

    // The heap yields its contents in max-heap order, not ascending rank
    // order; indexing without this sort would interpolate between the
    // wrong order statistics.
    let mut prefix: Vec<f64> = heap.into_iter().map(|OrdF64(v)| v).collect();
    prefix.sort_by(|a, b| a.total_cmp(b));
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc<I>(values: I) -> Quartiles
    where
        I: IntoIterator,
        I::Item: Into<Datum>,
    {
        PercentileSelector::new().calculate(values).unwrap()
    }

    #[test]
    fn test_ten_elements() {
        let q = calc([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);

        // n=10: r25=2.25, r50=4.5, r75=6.75
        assert_eq!(q.p25, 3.25);
        assert_eq!(q.p50, 5.5);
        assert_eq!(q.p75, 7.75);
    }

    #[test]
    fn test_missing_and_nan_filtered() {
        let q = calc([
            Some(1.0),
            None,
            Some(2.0),
            Some(f64::NAN),
            Some(3.0),
            Some(4.0),
            Some(5.0),
        ]);

        // Cleaned to [1,2,3,4,5]: integral ranks 1.0, 2.0, 3.0
        assert_eq!((q.p25, q.p50, q.p75), (2.0, 3.0, 4.0));
    }

    #[test]
    fn test_infinity_filtered() {
        let q = calc([1.0, f64::INFINITY, 2.0, f64::NEG_INFINITY, 3.0, 4.0, 5.0]);
        assert_eq!((q.p25, q.p50, q.p75), (2.0, 3.0, 4.0));
    }

    #[test]
    fn test_single_element() {
        let q = calc([42.0]);
        assert_eq!((q.p25, q.p50, q.p75), (42.0, 42.0, 42.0));
    }

    #[test]
    fn test_two_elements() {
        let q = calc([1.0, 5.0]);

        // r25=0.25, r50=0.5, r75=0.75 over [1, 5]
        assert_eq!((q.p25, q.p50, q.p75), (2.0, 3.0, 4.0));
    }

    #[test]
    fn test_constant_values() {
        let q = calc([7.0; 9]);
        assert_eq!((q.p25, q.p50, q.p75), (7.0, 7.0, 7.0));
    }

    #[test]
    fn test_unsorted_input() {
        let shuffled = calc([9.0, 1.0, 5.0, 3.0, 7.0, 2.0, 8.0, 4.0, 6.0, 10.0]);
        let sorted = calc([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        assert_eq!(shuffled, sorted);
    }

    #[test]
    fn test_negative_values() {
        let q = calc([-5.0, -4.0, -3.0, -2.0, -1.0]);
        assert_eq!((q.p25, q.p50, q.p75), (-4.0, -3.0, -2.0));
    }

    #[test]
    fn test_duplicates() {
        let q = calc([1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0, 5.0, 5.0]);

        // Sorted: [1,1,2,2,3,3,4,4,5,5]; r25=2.25 -> 2.0, r50=4.5 -> 3.0,
        // r75=6.75 -> 4.0
        assert_eq!((q.p25, q.p50, q.p75), (2.0, 3.0, 4.0));
    }

    #[test]
    fn test_integer_input() {
        let q = calc([1, 2, 3, 4, 5]);
        assert_eq!((q.p25, q.p50, q.p75), (2.0, 3.0, 4.0));
    }

    #[test]
    fn test_empty_input_error() {
        let err = PercentileSelector::new()
            .calculate(core::iter::empty::<f64>())
            .unwrap_err();
        assert_eq!(err, InvalidInputError::EmptyInput);
    }

    #[test]
    fn test_all_filtered_error() {
        let err = PercentileSelector::new()
            .calculate([Datum::Missing, Datum::Value(f64::NAN)])
            .unwrap_err();
        assert_eq!(err, InvalidInputError::AllFiltered);
    }

    #[test]
    fn test_monotonicity() {
        for n in 1..=40usize {
            let values: Vec<f64> = (0..n).map(|i| ((i * 7919) % 101) as f64).collect();
            let q = calc(values.iter());
            assert!(
                q.p25 <= q.p50 && q.p50 <= q.p75,
                "quartiles not monotone for n={}: {:?}",
                n,
                q
            );
        }
    }

    #[test]
    fn test_calculate_equals_clean_then_calculate() {
        let selector = PercentileSelector::new();
        let raw = [Some(3.0), None, Some(1.0), Some(f64::NAN), Some(2.0), Some(5.0), Some(4.0)];

        let direct = selector.calculate(raw).unwrap();
        let cleaned = selector.clean(raw);
        let staged = selector.calculate(cleaned).unwrap();

        assert_eq!(direct, staged);
    }

    #[test]
    fn test_idempotent() {
        let selector = PercentileSelector::new();
        let values = [2.5, 8.1, -3.2, 0.0, 7.7, 4.4];

        let first = selector.calculate(values).unwrap();
        let second = selector.calculate(values).unwrap();

        // Bit-identical, not merely close
        assert_eq!(first, second);
    }

    #[test]
    fn test_clean_preserves_order() {
        let cleaned = PercentileSelector::new().clean([
            Some(3.0),
            None,
            Some(1.0),
            Some(f64::NAN),
            Some(2.0),
        ]);
        assert_eq!(cleaned, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_smallest_k_is_sorted_prefix() {
        let values = [9.0, 2.0, 7.0, 1.0, 8.0, 3.0, 6.0, 4.0, 5.0, 0.0];

        for k in 1..=values.len() {
            let prefix = smallest_k(&values, k);
            let expected: Vec<f64> = (0..k).map(|i| i as f64).collect();
            assert_eq!(prefix, expected, "wrong prefix for k={}", k);
        }
    }

    #[test]
    fn test_smallest_k_with_duplicates() {
        let values = [5.0, 1.0, 5.0, 1.0, 3.0];
        assert_eq!(smallest_k(&values, 3), vec![1.0, 1.0, 3.0]);
    }

    #[test]
    fn test_fractional_rank_integral_positions() {
        // n=5: all three ranks are integral
        let r = FractionalRank::new(0.25, 5);
        assert_eq!((r.lo, r.hi), (1, 1));
        assert_eq!(r.frac, 0.0);

        let r = FractionalRank::new(0.75, 5);
        assert_eq!((r.lo, r.hi), (3, 3));
    }

    #[test]
    fn test_derived_statistics() {
        let q = calc([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);

        assert_eq!(q.median(), 5.5);
        assert_eq!(q.iqr(), 4.5);
        assert_eq!(q.midhinge(), 5.5);
        assert_eq!(q.trimean(), 5.5);
    }

    #[test]
    fn test_extreme_magnitudes() {
        let q = calc([1e300, -1e300, 1e-300, 0.0, -1e-300]);

        assert_eq!(q.p50, 0.0);
        assert!(q.p25 <= q.p50 && q.p50 <= q.p75);
        assert!(q.p25.is_finite() && q.p75.is_finite());
    }
}
