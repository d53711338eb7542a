//! Running median over a fixed-capacity window
//!
//! Keeps the most recent `capacity` samples in a circular buffer and answers
//! median, lowest, highest and average queries over them. Order statistics
//! copy the window into a scratch buffer and selection-sort it on every
//! query; nothing is cached between calls.
//!
//! # Memory
//!
//! An aggregator built without order-statistics support never allocates the
//! scratch buffer, so it holds roughly half the memory. Its `median`,
//! `lowest` and `highest` queries always return the NaN sentinel.
//!
//! # Thread Safety
//!
//! `RunningMedian` is `Send` but **not `Sync`**: the scratch buffer sits in
//! a `RefCell` so queries can sort through `&self`. For shared access, wrap
//! it in `Arc<Mutex<_>>`.

use super::{clamp_capacity, memory_for_capacity};
use crate::traits::{MergeError, Sketch, WindowStatistics};
use core::cell::RefCell;

#[cfg(feature = "std")]
use std::{boxed::Box, vec};

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec};

#[cfg(all(feature = "serde", feature = "std"))]
use std::vec::Vec;

#[cfg(all(feature = "serde", not(feature = "std")))]
use alloc::vec::Vec;

// Helper macro for format! in both std and no_std
macro_rules! fmt {
    ($($arg:tt)*) => {{
        #[cfg(feature = "std")]
        { format!($($arg)*) }
        #[cfg(not(feature = "std"))]
        { alloc::format!($($arg)*) }
    }};
}

/// All window statistics computed from a single sort
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    /// Number of samples in the window
    pub count: usize,
    /// Arithmetic mean
    pub average: f32,
    /// Element at index `count / 2` of the sorted window
    pub median: f32,
    /// Smallest sample
    pub lowest: f32,
    /// Largest sample
    pub highest: f32,
}

/// Fixed-capacity running median, lowest, highest and average
///
/// Samples are written into a circular buffer; once it is full each new
/// sample overwrites the oldest. Capacity requests outside
/// `[MIN_CAPACITY, MAX_CAPACITY]` are clamped to the nearest bound.
///
/// Queries that cannot produce a value return `f32::NAN`:
/// - every query on an empty window
/// - `median`, `lowest` and `highest` on an aggregator built without
///   order-statistics support
///
/// The [`WindowStatistics`] trait offers `try_*` variants that return
/// `None` instead.
///
/// For an even number of samples the median is the upper of the two middle
/// elements, not their average.
///
/// # Example
///
/// ```
/// use runmedian::window::RunningMedian;
///
/// let mut window = RunningMedian::new(4);
///
/// window.add(2.0);
/// window.add(4.0);
///
/// assert_eq!(window.median(), 4.0);
/// assert_eq!(window.average(), 3.0);
/// ```
///
/// # Without order statistics
///
/// ```
/// use runmedian::window::RunningMedian;
///
/// let mut window = RunningMedian::with_order_statistics(8, false);
///
/// for value in [1.0, 2.0, 3.0] {
///     window.add(value);
/// }
///
/// assert_eq!(window.average(), 2.0);
/// assert!(window.median().is_nan());
/// ```
#[derive(Clone, Debug)]
pub struct RunningMedian {
    /// Samples in insertion order, never reordered
    samples: Box<[f32]>,
    /// Sort buffer for order statistics, absent when unsupported
    scratch: Option<RefCell<Box<[f32]>>>,
    /// Number of valid samples
    count: usize,
    /// Slot the next sample is written to
    write_index: usize,
}

impl Default for RunningMedian {
    fn default() -> Self {
        Self::new(super::MAX_CAPACITY)
    }
}

impl RunningMedian {
    /// Create an aggregator supporting every query
    ///
    /// # Arguments
    ///
    /// * `capacity` - Window size, clamped to `[MIN_CAPACITY, MAX_CAPACITY]`
    pub fn new(capacity: usize) -> Self {
        Self::with_order_statistics(capacity, true)
    }

    /// Create an aggregator, choosing whether order statistics are supported
    ///
    /// # Arguments
    ///
    /// * `capacity` - Window size, clamped to `[MIN_CAPACITY, MAX_CAPACITY]`
    /// * `supports_order_statistics` - Allocate the scratch buffer needed by
    ///   `median`, `lowest` and `highest`
    pub fn with_order_statistics(capacity: usize, supports_order_statistics: bool) -> Self {
        let capacity = clamp_capacity(capacity);
        let scratch = supports_order_statistics
            .then(|| RefCell::new(vec![0.0; capacity].into_boxed_slice()));

        Self {
            samples: vec![0.0; capacity].into_boxed_slice(),
            scratch,
            count: 0,
            write_index: 0,
        }
    }

    /// Forget all samples
    ///
    /// Both buffers keep their allocation and contents; old values become
    /// unreachable until overwritten.
    pub fn clear(&mut self) {
        self.count = 0;
        self.write_index = 0;
    }

    /// Add a sample, overwriting the oldest once the window is full
    pub fn add(&mut self, value: f32) {
        self.samples[self.write_index] = value;

        self.write_index += 1;
        if self.write_index >= self.samples.len() {
            self.write_index = 0;
        }

        if self.count < self.samples.len() {
            self.count += 1;
        }
    }

    /// Window size fixed at construction
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Number of samples currently in the window
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if the window holds no samples
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check if the window holds `capacity` samples
    pub fn is_full(&self) -> bool {
        self.count == self.samples.len()
    }

    /// Whether `median`, `lowest` and `highest` can produce values
    pub fn supports_order_statistics(&self) -> bool {
        self.scratch.is_some()
    }

    /// Iterate over the window from oldest to newest sample
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let capacity = self.samples.len();
        let start = if self.is_full() { self.write_index } else { 0 };
        (0..self.count).map(move |i| self.samples[(start + i) % capacity])
    }

    /// Arithmetic mean of the window, NaN when empty
    pub fn average(&self) -> f32 {
        if self.count == 0 {
            return f32::NAN;
        }

        let sum: f32 = self.window().iter().sum();
        sum / self.count as f32
    }

    /// Median of the window
    ///
    /// Returns the element at index `len / 2` of the sorted window, so an
    /// even-sized window yields its upper-middle sample. NaN when empty or
    /// when order statistics are unsupported.
    pub fn median(&self) -> f32 {
        self.with_sorted(|sorted| sorted[sorted.len() / 2])
            .unwrap_or(f32::NAN)
    }

    /// Smallest sample, NaN when empty or when order statistics are unsupported
    pub fn lowest(&self) -> f32 {
        self.with_sorted(|sorted| sorted[0]).unwrap_or(f32::NAN)
    }

    /// Largest sample, NaN when empty or when order statistics are unsupported
    pub fn highest(&self) -> f32 {
        self.with_sorted(|sorted| sorted[sorted.len() - 1])
            .unwrap_or(f32::NAN)
    }

    /// Compute every statistic with a single sort
    ///
    /// Returns `None` when the window is empty. Order-statistic fields are
    /// NaN when order statistics are unsupported.
    pub fn summary(&self) -> Option<Summary> {
        if self.count == 0 {
            return None;
        }

        let (median, lowest, highest) = self
            .with_sorted(|sorted| (sorted[sorted.len() / 2], sorted[0], sorted[sorted.len() - 1]))
            .unwrap_or((f32::NAN, f32::NAN, f32::NAN));

        Some(Summary {
            count: self.count,
            average: self.average(),
            median,
            lowest,
            highest,
        })
    }

    /// Valid samples in physical buffer order
    ///
    /// Until the buffer wraps, the valid samples occupy the leading slots;
    /// afterwards every slot is valid.
    fn window(&self) -> &[f32] {
        &self.samples[..self.count]
    }

    /// Copy the window into the scratch buffer, sort it, and inspect it
    ///
    /// Returns `None` without touching the scratch buffer when the window is
    /// empty or order statistics are unsupported.
    fn with_sorted<R>(&self, inspect: impl FnOnce(&[f32]) -> R) -> Option<R> {
        let scratch = self.scratch.as_ref()?;
        if self.count == 0 {
            return None;
        }

        let mut scratch = scratch.borrow_mut();
        let sorted = &mut scratch[..self.count];
        sorted.copy_from_slice(self.window());
        selection_sort(sorted);

        Some(inspect(sorted))
    }
}

/// Sort ascending by repeatedly swapping the minimum of the unsorted tail
/// into place
///
/// Comparison is a strict `<`: equal samples are never swapped, and a NaN
/// sample is never picked as a minimum.
fn selection_sort(values: &mut [f32]) {
    let n = values.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in (i + 1)..n {
            if values[j] < values[min] {
                min = j;
            }
        }
        if min != i {
            values.swap(i, min);
        }
    }
}

impl Sketch for RunningMedian {
    type Item = f32;

    fn update(&mut self, item: &Self::Item) {
        self.add(*item);
    }

    /// Replay `other`'s window, oldest first, as if those samples arrived
    /// after this aggregator's own
    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        if self.capacity() != other.capacity() {
            return Err(MergeError::IncompatibleConfig {
                expected: fmt!("capacity={}", self.capacity()),
                found: fmt!("capacity={}", other.capacity()),
            });
        }

        for value in other.iter() {
            self.add(value);
        }
        Ok(())
    }

    fn clear(&mut self) {
        RunningMedian::clear(self);
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + memory_for_capacity(self.capacity(), self.supports_order_statistics())
    }

    fn count(&self) -> u64 {
        self.count as u64
    }
}

impl WindowStatistics for RunningMedian {
    fn capacity(&self) -> usize {
        RunningMedian::capacity(self)
    }

    fn average(&self) -> f32 {
        RunningMedian::average(self)
    }

    fn median(&self) -> f32 {
        RunningMedian::median(self)
    }

    fn lowest(&self) -> f32 {
        RunningMedian::lowest(self)
    }

    fn highest(&self) -> f32 {
        RunningMedian::highest(self)
    }
}

impl Extend<f32> for RunningMedian {
    fn extend<I: IntoIterator<Item = f32>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl FromIterator<f32> for RunningMedian {
    /// Collect into a default-configured aggregator, keeping the last
    /// `MAX_CAPACITY` values
    fn from_iter<I: IntoIterator<Item = f32>>(iter: I) -> Self {
        let mut window = Self::default();
        window.extend(iter);
        window
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RunningMedian {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let samples: Vec<f32> = self.iter().collect();
        let mut state = serializer.serialize_struct("RunningMedian", 3)?;
        state.serialize_field("capacity", &self.capacity())?;
        state.serialize_field("supports_order_statistics", &self.supports_order_statistics())?;
        state.serialize_field("samples", &samples)?;
        state.end()
    }
}
