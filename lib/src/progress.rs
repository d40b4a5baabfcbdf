//! Progress accounting
//!
//! Row tasks report how far their pen moved; a single consumer sums the
//! deltas. Because the sum is order-independent, interleaving between rows
//! does not matter.

use crate::fixed::{Fixed, UNITS_PER_PX};

/// Receives pen advances from the scheduler's progress stream
pub trait ProgressSink {
    fn advance(&mut self, delta: Fixed);
}

impl<F: FnMut(Fixed)> ProgressSink for F {
    fn advance(&mut self, delta: Fixed) {
        self(delta)
    }
}

/// Running total of pen advance against the work of a whole image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTally {
    done: i64,
    total: i64,
}

impl ProgressTally {
    /// Total work is the image width, in 1/64 px, once per row
    pub fn new(width: u32, rows: usize) -> Self {
        Self {
            done: 0,
            total: width as i64 * UNITS_PER_PX as i64 * rows as i64,
        }
    }

    pub fn done(&self) -> i64 {
        self.done
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    /// Completion in percent; an empty image counts as complete
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.done as f64 * 100.0 / self.total as f64
    }
}

impl ProgressSink for ProgressTally {
    fn advance(&mut self, delta: Fixed) {
        self.done += delta.raw() as i64;
    }
}
