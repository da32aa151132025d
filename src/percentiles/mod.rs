//! Exact percentile computation over batch data
//!
//! This module computes the three quartiles (25th, 50th, and 75th
//! percentiles) of an in-memory collection. Unlike sketch-based estimators,
//! results are exact order statistics of the cleaned input.
//!
//! # Types
//!
//! - [`PercentileSelector`]: validates and cleans input, then selects the
//!   quartiles with a bounded max-heap instead of a full sort
//! - [`Quartiles`]: the resulting (p25, p50, p75) triple with derived
//!   robust statistics (IQR, midhinge, trimean)
//! - [`Datum`]: boundary type for inputs that may contain missing values
//!
//! # Example
//!
//! ```
//! use batchstats::percentiles::PercentileSelector;
//!
//! let selector = PercentileSelector::new();
//! let q = selector.calculate([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//!
//! assert_eq!(q.median(), 3.0);
//! assert_eq!(q.iqr(), 2.0);
//! ```

mod input;
mod selector;

pub use input::Datum;
pub use selector::{PercentileSelector, Quartiles};
