//! Fixed-capacity sample windows
//!
//! This module provides aggregators that keep the most recent samples of a
//! stream in a bounded circular buffer and answer statistics over them.
//!
//! # Algorithms
//!
//! - [`RunningMedian`]: running median, lowest, highest and average over the
//!   last `capacity` samples
//!
//! # Example
//!
//! ```
//! use runmedian::window::RunningMedian;
//! use runmedian::traits::WindowStatistics;
//!
//! let mut window = RunningMedian::new(5);
//!
//! for value in [3.0, 1.0, 4.0, 1.0, 5.0] {
//!     window.add(value);
//! }
//!
//! assert_eq!(window.median(), 3.0);
//! assert_eq!(window.lowest(), 1.0);
//! assert_eq!(window.highest(), 5.0);
//!
//! window.clear();
//! assert_eq!(window.try_median(), None);
//! ```

mod running_median;

pub use running_median::{RunningMedian, Summary};

/// Smallest window an aggregator can be built with
pub const MIN_CAPACITY: usize = 1;

/// Largest window an aggregator can be built with
pub const MAX_CAPACITY: usize = 19;

/// Constrain a requested window size to `[MIN_CAPACITY, MAX_CAPACITY]`
///
/// Out-of-range requests are moved to the nearest bound, never rejected.
pub fn clamp_capacity(requested: usize) -> usize {
    requested.clamp(MIN_CAPACITY, MAX_CAPACITY)
}

/// Bytes of sample storage an aggregator of the given configuration holds
///
/// Dropping order-statistics support removes the scratch buffer, halving
/// the figure.
pub fn memory_for_capacity(capacity: usize, supports_order_statistics: bool) -> usize {
    let buffers = if supports_order_statistics { 2 } else { 1 };
    clamp_capacity(capacity) * core::mem::size_of::<f32>() * buffers
}
