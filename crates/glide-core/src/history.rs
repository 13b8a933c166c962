#![forbid(unsafe_code)]

//! Bounded record of the samples seen during the current gesture.
//!
//! # Invariants
//!
//! 1. Never holds more than [`EventHistory::CAPACITY`] samples after a push.
//! 2. Overflow drops the oldest [`EventHistory::TRIM`] samples at once, so
//!    trimming runs once per `TRIM` pushes instead of on every push.
//! 3. Samples stay in arrival order.

use crate::geometry::Sample;

/// Ordered samples of the active gesture.
#[derive(Debug, Clone, Default)]
pub struct EventHistory {
    samples: Vec<Sample>,
}

impl EventHistory {
    /// Maximum retained samples.
    pub const CAPACITY: usize = 30;
    /// Samples dropped from the front when capacity is exceeded.
    pub const TRIM: usize = 15;

    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: Vec::with_capacity(Self::CAPACITY + 1),
        }
    }

    /// Forget every sample. Called at gesture start.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Append a sample, trimming the oldest batch on overflow.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
        if self.samples.len() > Self::CAPACITY {
            self.samples.drain(..Self::TRIM);
        }
    }

    /// Overwrite the timestamp of the newest sample.
    ///
    /// Release events carry no position, so the end time is folded into the
    /// last move sample before estimating velocity.
    pub fn stamp_last(&mut self, t: f64) {
        if let Some(last) = self.samples.last_mut() {
            last.t = t;
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Samples oldest first.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}
