//! Core traits for windowed streaming statistics
//!
//! Aggregators implement the base [`Sketch`] trait, with [`WindowStatistics`]
//! layering the median / lowest / highest / average query surface on top.

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Error during aggregator merge operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Aggregators have incompatible configurations
    IncompatibleConfig {
        expected: String,
        found: String,
    },
}

impl core::fmt::Display for MergeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MergeError::IncompatibleConfig { expected, found } => {
                write!(f, "incompatible config: expected {}, found {}", expected, found)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MergeError {}

/// Core trait for all streaming aggregators
pub trait Sketch: Clone + Debug {
    /// The type of item this aggregator processes
    type Item: ?Sized;

    /// Add an item to the aggregator
    fn update(&mut self, item: &Self::Item);

    /// Merge another aggregator into this one
    ///
    /// Returns an error if the aggregators are incompatible
    fn merge(&mut self, other: &Self) -> Result<(), MergeError>;

    /// Reset to empty state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of items currently held
    fn count(&self) -> u64;

    /// Check if the aggregator is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Statistics over a bounded window of the most recent samples
///
/// The required methods follow a sentinel convention: when a result is not
/// available they return `f32::NAN` rather than failing. The `try_*` forms
/// map that sentinel to `None`.
pub trait WindowStatistics: Sketch {
    /// Maximum number of samples held in the window
    fn capacity(&self) -> usize;

    /// Arithmetic mean of the window, NaN when empty
    fn average(&self) -> f32;

    /// Middle element of the sorted window, NaN when empty or unsupported
    fn median(&self) -> f32;

    /// Smallest sample in the window, NaN when empty or unsupported
    fn lowest(&self) -> f32;

    /// Largest sample in the window, NaN when empty or unsupported
    fn highest(&self) -> f32;

    /// Mean of the window, or `None` when empty
    fn try_average(&self) -> Option<f32> {
        available(self.average())
    }

    /// Median of the window, or `None` when empty or unsupported
    fn try_median(&self) -> Option<f32> {
        available(self.median())
    }

    /// Minimum of the window, or `None` when empty or unsupported
    fn try_lowest(&self) -> Option<f32> {
        available(self.lowest())
    }

    /// Maximum of the window, or `None` when empty or unsupported
    fn try_highest(&self) -> Option<f32> {
        available(self.highest())
    }
}

#[inline]
fn available(value: f32) -> Option<f32> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}
