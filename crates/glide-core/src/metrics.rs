#![forbid(unsafe_code)]

//! Container/content extents, snap grid, and segment arithmetic.
//!
//! # Invariants
//!
//! 1. `scroll_end(axis) <= 0` for every axis; an axis whose content fits in
//!    its container has `scroll_end == 0` and no scrollable range.
//! 2. Extents are finite and non-negative; bad inputs are coerced to `0`.
//! 3. Grid intervals are either absent or finite and positive, so every
//!    division by an interval is guarded.

use crate::geometry::{Axis, AxisPair, round_half_up};

fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn sanitize_interval(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Extents of the viewport and the content it scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Metrics {
    container: AxisPair<f64>,
    content: AxisPair<f64>,
    raw_content: AxisPair<f64>,
    scroll_end: AxisPair<f64>,
}

impl Metrics {
    /// Metrics with content equal to the raw (unconformed) content extent.
    #[must_use]
    pub fn new(container: AxisPair<f64>, raw_content: AxisPair<f64>) -> Self {
        let container = container.map(sanitize_extent);
        let raw_content = raw_content.map(sanitize_extent);
        let mut metrics = Self {
            container,
            content: raw_content,
            raw_content,
            scroll_end: AxisPair::default(),
        };
        metrics.recompute_scroll_end();
        metrics
    }

    fn recompute_scroll_end(&mut self) {
        self.scroll_end =
            AxisPair::from_fn(|axis| (self.container[axis] - self.content[axis]).min(0.0));
    }

    /// Round the content extent on `axis` up to a whole number of grid
    /// intervals. Without a valid interval the raw extent is restored.
    pub fn conform_to_grid(&mut self, axis: Axis, interval: Option<f64>) {
        let raw = self.raw_content[axis];
        self.content[axis] = match interval.and_then(sanitize_interval) {
            Some(size) => (raw / size).ceil() * size,
            None => raw,
        };
        self.recompute_scroll_end();
    }

    #[inline]
    #[must_use]
    pub fn container(&self, axis: Axis) -> f64 {
        self.container[axis]
    }

    #[inline]
    #[must_use]
    pub fn content(&self, axis: Axis) -> f64 {
        self.content[axis]
    }

    #[inline]
    #[must_use]
    pub fn raw_content(&self, axis: Axis) -> f64 {
        self.raw_content[axis]
    }

    /// Minimum reachable position on `axis`.
    #[inline]
    #[must_use]
    pub fn scroll_end(&self, axis: Axis) -> f64 {
        self.scroll_end[axis]
    }

    #[must_use]
    pub fn container_extents(&self) -> AxisPair<f64> {
        self.container
    }

    #[must_use]
    pub fn raw_content_extents(&self) -> AxisPair<f64> {
        self.raw_content
    }

    /// Content overflows the container on `axis`.
    #[must_use]
    pub fn has_range(&self, axis: Axis) -> bool {
        self.content[axis] > self.container[axis]
    }

    /// Clamp `position` into `[scroll_end, 0]`.
    #[must_use]
    pub fn clamp(&self, axis: Axis, position: f64) -> f64 {
        position.clamp(self.scroll_end[axis], 0.0)
    }

    /// Number of grid segments on `axis`, or `None` for a degenerate interval.
    #[must_use]
    pub fn segment_count(&self, axis: Axis, interval: Option<f64>) -> Option<u32> {
        let interval = interval.and_then(sanitize_interval)?;
        Some(to_index((self.content[axis] / interval).ceil()))
    }

    /// Segment index containing `position` on `axis`.
    #[must_use]
    pub fn segment_at(&self, axis: Axis, position: f64, interval: Option<f64>) -> u32 {
        let Some(interval) = interval.and_then(sanitize_interval) else {
            return 0;
        };
        let last = (self.content[axis] / interval).ceil() - 1.0;
        let nearest = round_half_up(-position / interval);
        to_index(nearest.min(last))
    }
}

fn to_index(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value as u32
    }
}

/// One axis of the snap grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridAxis {
    interval: Option<f64>,
    user_specified: bool,
}

impl GridAxis {
    #[inline]
    #[must_use]
    pub fn interval(&self) -> Option<f64> {
        self.interval
    }

    #[inline]
    #[must_use]
    pub fn is_user_specified(&self) -> bool {
        self.user_specified
    }
}

/// Per-axis snap intervals. Axes without an explicit size follow the
/// container extent, so snapping pages one viewport at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SnapGrid {
    axes: AxisPair<GridAxis>,
}

impl SnapGrid {
    /// Grid with optional explicit sizes; invalid sizes count as unset.
    #[must_use]
    pub fn new(x: Option<f64>, y: Option<f64>) -> Self {
        let mut grid = Self::default();
        for (axis, size) in [(Axis::X, x), (Axis::Y, y)] {
            if let Some(size) = size.and_then(sanitize_interval) {
                grid.set_user_interval(axis, size);
            }
        }
        grid
    }

    /// Pin `axis` to an explicit interval. Returns `false` for a degenerate size.
    pub fn set_user_interval(&mut self, axis: Axis, size: f64) -> bool {
        match sanitize_interval(size) {
            Some(size) => {
                self.axes[axis] = GridAxis {
                    interval: Some(size),
                    user_specified: true,
                };
                true
            }
            None => false,
        }
    }

    /// Point every non-user axis at the container extent.
    pub fn follow_container(&mut self, container: AxisPair<f64>) {
        for axis in Axis::ALL {
            if !self.axes[axis].user_specified {
                self.axes[axis].interval = sanitize_interval(container[axis]);
            }
        }
    }

    #[must_use]
    pub fn axis(&self, axis: Axis) -> GridAxis {
        self.axes[axis]
    }

    /// Effective interval on `axis`, falling back to `container` when unset.
    #[must_use]
    pub fn interval(&self, axis: Axis, container: f64) -> Option<f64> {
        self.axes[axis]
            .interval
            .or_else(|| sanitize_interval(container))
    }
}
