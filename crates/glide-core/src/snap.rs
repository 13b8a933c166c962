#![forbid(unsafe_code)]

//! Resting-position resolution: edges first, then the snap grid.
//!
//! # Invariants
//!
//! 1. The result always lies in `[scroll_end, 0]`.
//! 2. `resolve(resolve(p)) == resolve(p)`: the end edge itself and grid
//!    lines pulled back onto it are fixed points.
//! 3. Edge clamping takes precedence over grid rounding.

use crate::geometry::{Axis, round_half_up};
use crate::metrics::{Metrics, SnapGrid};

/// Maps raw positions to valid resting positions.
#[derive(Debug, Clone, Copy)]
pub struct SnapResolver<'a> {
    metrics: &'a Metrics,
    grid: &'a SnapGrid,
    snapping: bool,
}

impl<'a> SnapResolver<'a> {
    #[must_use]
    pub fn new(metrics: &'a Metrics, grid: &'a SnapGrid, snapping: bool) -> Self {
        Self {
            metrics,
            grid,
            snapping,
        }
    }

    #[inline]
    #[must_use]
    pub fn metrics(&self) -> &'a Metrics {
        self.metrics
    }

    #[inline]
    #[must_use]
    pub fn is_snapping(&self) -> bool {
        self.snapping
    }

    /// The grid interval in effect on `axis` when snapping.
    #[must_use]
    pub fn interval(&self, axis: Axis) -> Option<f64> {
        if !self.snapping {
            return None;
        }
        self.grid.interval(axis, self.metrics.container(axis))
    }

    /// Nearest valid resting position for `raw` on `axis`.
    #[must_use]
    pub fn resolve(&self, raw: f64, axis: Axis) -> f64 {
        let end = self.metrics.scroll_end(axis);
        if raw > 0.0 {
            return 0.0;
        }
        if raw <= end {
            return end;
        }
        match self.grid_line(raw, axis) {
            Some(snapped) => self.metrics.clamp(axis, snapped),
            None => raw,
        }
    }

    /// Nearest grid line to `raw`, ignoring edges. `None` when snapping is off.
    #[must_use]
    pub fn grid_line(&self, raw: f64, axis: Axis) -> Option<f64> {
        self.interval(axis)
            .map(|interval| round_half_up(raw / interval) * interval)
    }

    /// Residual between `raw` and the nearest grid line, ignoring edges.
    /// Zero when snapping is off.
    #[must_use]
    pub fn grid_residual(&self, raw: f64, axis: Axis) -> f64 {
        self.grid_line(raw, axis).map_or(0.0, |line| raw - line)
    }
}
