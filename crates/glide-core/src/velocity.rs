#![forbid(unsafe_code)]

//! Release velocity from the tail of an [`EventHistory`].
//!
//! The estimate compares the newest sample with the oldest sample that is
//! still inside the look-back window. The second-to-last sample is always
//! used even when it falls outside the window, so any history with two
//! samples yields a speed.

use crate::geometry::{Axis, Sample};
use crate::history::EventHistory;

/// Computes per-axis speed in pixels per millisecond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityEstimator {
    window_ms: f64,
}

impl Default for VelocityEstimator {
    /// 100ms look-back window.
    fn default() -> Self {
        Self { window_ms: 100.0 }
    }
}

impl VelocityEstimator {
    #[must_use]
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms: window_ms.max(0.0),
        }
    }

    #[inline]
    #[must_use]
    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }

    /// The sample compared against the newest one, if there are two.
    #[must_use]
    pub fn comparison_sample<'a>(&self, history: &'a EventHistory) -> Option<&'a Sample> {
        let samples = history.samples();
        let (last, rest) = samples.split_last()?;
        let (mut comparison, older) = rest.split_last()?;
        for candidate in older.iter().rev() {
            if last.t - candidate.t > self.window_ms {
                break;
            }
            comparison = candidate;
        }
        Some(comparison)
    }

    /// Speed along `axis`, or `None` when the history holds fewer than two
    /// samples or the samples span no time.
    #[must_use]
    pub fn estimate(&self, history: &EventHistory, axis: Axis) -> Option<f64> {
        let last = history.last()?;
        let comparison = self.comparison_sample(history)?;
        let dt = last.t - comparison.t;
        if dt.is_nan() || dt <= 0.0 {
            return None;
        }
        let speed = (last.coord(axis) - comparison.coord(axis)) / dt;
        speed.is_finite().then_some(speed)
    }
}
