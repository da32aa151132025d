//! Input boundary type for dirty numeric data
//!
//! Batch data often arrives with holes: absent measurements, NaN from
//! upstream arithmetic, infinities from overflow. [`Datum`] tags each
//! element so heterogeneous inputs can flow into the selector, which keeps
//! only finite values.

/// A single input element: a numeric value or a missing marker
///
/// NaN and infinite values are representable as `Value` but are rejected by
/// the finiteness predicate during cleaning, so the core algorithm only ever
/// sees finite numbers.
///
/// Plain numeric types and `Option`s of them convert via `From`, so callers
/// rarely construct `Datum` by hand:
///
/// ```
/// use batchstats::percentiles::Datum;
///
/// assert_eq!(Datum::from(1.5), Datum::Value(1.5));
/// assert_eq!(Datum::from(None::<f64>), Datum::Missing);
/// assert_eq!(Datum::from(Some(3)), Datum::Value(3.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Datum {
    /// A numeric observation
    Value(f64),
    /// No observation present
    Missing,
}

impl Datum {
    /// Return the contained value if it is a finite number
    ///
    /// `Missing`, NaN, and infinities all yield `None`.
    pub fn finite(self) -> Option<f64> {
        match self {
            Datum::Value(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }
}

impl From<f64> for Datum {
    fn from(v: f64) -> Self {
        Datum::Value(v)
    }
}

impl From<f32> for Datum {
    fn from(v: f32) -> Self {
        Datum::Value(v as f64)
    }
}

impl From<i32> for Datum {
    fn from(v: i32) -> Self {
        Datum::Value(v as f64)
    }
}

impl From<i64> for Datum {
    fn from(v: i64) -> Self {
        Datum::Value(v as f64)
    }
}

impl From<&f64> for Datum {
    fn from(v: &f64) -> Self {
        Datum::Value(*v)
    }
}

impl<T: Into<Datum>> From<Option<T>> for Datum {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(x) => x.into(),
            None => Datum::Missing,
        }
    }
}
