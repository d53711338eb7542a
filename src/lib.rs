//! # Runmedian
//!
//! Fixed-capacity streaming statistics for Rust.
//!
//! Runmedian keeps the most recent samples of an `f32` stream in a bounded
//! circular buffer and reports the running median, lowest, highest and
//! average over them. Memory is fixed at construction and independent of
//! stream length, which makes it suitable for embedded and `no_std` targets.
//!
//! ## Features
//!
//! - **Running median**: exact median over the last `capacity` samples
//! - **Min / max / mean**: over the same window, computed on demand
//! - **Half-memory mode**: drop order-statistics support to skip the sort buffer
//! - **Never fails**: out-of-range capacities are clamped, missing results are NaN
//!
//! ## Quick Start
//!
//! ```rust
//! use runmedian::prelude::*;
//!
//! let mut window = RunningMedian::new(5);
//! for reading in [3.0, 1.0, 4.0, 1.0, 5.0] {
//!     window.add(reading);
//! }
//!
//! assert_eq!(window.median(), 3.0);
//! assert_eq!(window.lowest(), 1.0);
//! assert_eq!(window.highest(), 5.0);
//! assert!((window.average() - 2.8).abs() < 1e-6);
//! ```
//!
//! ## Unavailable Results
//!
//! Queries on an empty window, and order-statistic queries on an instance
//! built without them, return `f32::NAN`. The [`WindowStatistics`](traits::WindowStatistics)
//! trait adds `try_*` variants returning `Option<f32>`:
//!
//! ```rust
//! use runmedian::prelude::*;
//!
//! let mut window = RunningMedian::with_order_statistics(8, false);
//! window.add(2.0);
//!
//! assert_eq!(window.try_average(), Some(2.0));
//! assert_eq!(window.try_median(), None);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support
//! - `serde`: Enable serialization

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Core traits always available
pub mod traits;

pub mod window;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::window::{RunningMedian, Summary, MAX_CAPACITY, MIN_CAPACITY};
}

pub use window::{RunningMedian, Summary, MAX_CAPACITY, MIN_CAPACITY};
