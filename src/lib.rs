//! # Batchstats
//!
//! Exact order statistics for in-memory batches.
//!
//! Batchstats computes the 25th, 50th, and 75th percentiles of a numeric
//! collection, tolerating missing entries and NaN values by filtering them
//! before computation. Selection uses a bounded max-heap that retains only
//! the smallest elements the quartile ranks can touch, avoiding a full sort
//! of the input.
//!
//! ## Features
//!
//! - **Exact results**: true order statistics, not sketch approximations
//! - **Dirty-data tolerant**: missing markers, NaN, and infinities are
//!   filtered at the boundary before the algorithm sees a value
//! - **Sub-full-sort selection**: one pass plus a sort of the retained
//!   prefix, `O(n log k)` with `k ≈ 0.75n`
//! - **Stateless**: the selector holds no fields and is trivially safe to
//!   share across threads
//!
//! ## Quick Start
//!
//! ```rust
//! use batchstats::prelude::*;
//!
//! let selector = PercentileSelector::new();
//! let q = selector
//!     .calculate([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0])
//!     .unwrap();
//!
//! assert_eq!(q.p25, 3.25);
//! assert_eq!(q.p50, 5.5);
//! assert_eq!(q.p75, 7.75);
//! ```
//!
//! ## Missing Data
//!
//! Inputs with holes flow through [`Datum`](percentiles::Datum); `Option`
//! and plain numeric items convert automatically:
//!
//! ```rust
//! use batchstats::prelude::*;
//!
//! let readings = vec![
//!     Some(1.0),
//!     None,
//!     Some(2.0),
//!     Some(f64::NAN),
//!     Some(3.0),
//!     Some(4.0),
//!     Some(5.0),
//! ];
//!
//! let q = PercentileSelector::new().calculate(readings).unwrap();
//! assert_eq!((q.p25, q.p50, q.p75), (2.0, 3.0, 4.0));
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support
//! - `serde`: Enable serialization of input and result types

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod error;
pub mod percentiles;

mod math;

pub mod prelude {
    pub use crate::error::InvalidInputError;
    pub use crate::percentiles::{Datum, PercentileSelector, Quartiles};
}

pub use error::InvalidInputError;
pub use percentiles::{Datum, PercentileSelector, Quartiles};
