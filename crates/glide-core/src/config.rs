#![forbid(unsafe_code)]

//! Scroller behavior as data.
//!
//! Every tunable of the scroller lives in [`ScrollerConfig`]. With the
//! `config` feature it can be loaded from TOML or JSON:
//!
//! ```toml
//! # glide.toml
//! snapping = true
//! paginated_snap = true
//! snap_size_y = 320.0
//! bouncing = false
//! ```
//!
//! ```rust,ignore
//! let config = ScrollerConfig::from_toml_file("glide.toml")?.validated()?;
//! ```
//!
//! # Defaults
//!
//! `ScrollerConfig::default()` is a two-axis, bouncing, non-snapping
//! scroller with the standard fling physics.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Axis, AxisPair};
use crate::planner::PlannerConfig;

/// Where content rests on an axis when it is first laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

impl Alignment {
    /// Resting position for this alignment given the axis' scroll end.
    #[must_use]
    pub fn position(self, scroll_end: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => (scroll_end / 2.0).floor(),
            Self::End => scroll_end,
        }
    }
}

// ---------------------------------------------------------------------------
// ScrollerConfig
// ---------------------------------------------------------------------------

/// Complete scroller configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ScrollerConfig {
    /// Allow horizontal scrolling. Default: true.
    pub scrolling_x: bool,
    /// Allow vertical scrolling. Default: true.
    pub scrolling_y: bool,
    /// Pointer travel (px) before a press becomes a scroll. Default: 1.
    pub scroll_boundary: f64,
    /// Rest only on grid lines. Default: false.
    pub snapping: bool,
    /// Horizontal grid interval; unset follows the container width.
    pub snap_size_x: Option<f64>,
    /// Vertical grid interval; unset follows the container height.
    pub snap_size_y: Option<f64>,
    /// Move at most one grid interval per fling. Default: false.
    pub paginated_snap: bool,
    /// Rubber-band past the edges. Default: true.
    pub bouncing: bool,
    /// Initial horizontal alignment. Default: start.
    pub base_alignment_x: Alignment,
    /// Initial vertical alignment. Default: start.
    pub base_alignment_y: Alignment,
    /// Upper bound on a paginated fling (ms). Default: 1000.
    pub max_fling_duration_ms: f64,
    /// Lower bound on a paginated fling that still has distance to cover (ms). Default: 16.
    pub min_paged_fling_duration_ms: f64,
    /// Apply drag positions on the host's frame tick instead of per move. Default: false.
    pub coalesce_frames: bool,
    /// Quiet time after the last wheel tick before the scroll ends (ms). Default: 300.
    pub wheel_debounce_ms: f64,
    /// Per-millisecond speed retention during a fling. Default: 0.998.
    pub friction: f64,
    /// Speed (px/ms) at which a fling stops. Default: 0.01.
    pub minimum_speed: f64,
    /// Duration of a corrective snap settle (ms). Default: 350.
    pub settle_duration_ms: f64,
    /// Duration of the return stroke after an edge overshoot (ms). Default: 350.
    pub bounce_duration_ms: f64,
    /// Look-back window for release velocity (ms). Default: 100.
    pub velocity_window_ms: f64,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            scrolling_x: true,
            scrolling_y: true,
            scroll_boundary: 1.0,
            snapping: false,
            snap_size_x: None,
            snap_size_y: None,
            paginated_snap: false,
            bouncing: true,
            base_alignment_x: Alignment::Start,
            base_alignment_y: Alignment::Start,
            max_fling_duration_ms: 1000.0,
            min_paged_fling_duration_ms: 16.0,
            coalesce_frames: false,
            wheel_debounce_ms: 300.0,
            friction: 0.998,
            minimum_speed: 0.01,
            settle_duration_ms: 350.0,
            bounce_duration_ms: 350.0,
            velocity_window_ms: 100.0,
        }
    }
}

impl ScrollerConfig {
    /// Whether `axis` is enabled for scrolling.
    #[must_use]
    pub fn scrolling(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.scrolling_x,
            Axis::Y => self.scrolling_y,
        }
    }

    /// Configured snap sizes.
    #[must_use]
    pub fn snap_sizes(&self) -> AxisPair<Option<f64>> {
        AxisPair::new(self.snap_size_x, self.snap_size_y)
    }

    /// Configured base alignments.
    #[must_use]
    pub fn base_alignments(&self) -> AxisPair<Alignment> {
        AxisPair::new(self.base_alignment_x, self.base_alignment_y)
    }

    /// Extract the fling/bounce parameters.
    #[must_use]
    pub fn to_planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            friction: self.friction,
            minimum_speed: self.minimum_speed,
            bouncing: self.bouncing,
            snapping: self.snapping,
            paginated: self.snapping && self.paginated_snap,
            max_fling_duration_ms: self.max_fling_duration_ms,
            min_paged_fling_duration_ms: self.min_paged_fling_duration_ms,
            settle_duration_ms: self.settle_duration_ms,
            bounce_duration_ms: self.bounce_duration_ms,
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load from disk, picking the format from the file extension
    /// (`.json` is JSON, anything else TOML).
    #[cfg(feature = "config")]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_toml_file(path)
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns every problem found; an empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.scroll_boundary.is_finite() || self.scroll_boundary < 0.0 {
            errors.push(format!(
                "scroll_boundary must be finite and >= 0, got {}",
                self.scroll_boundary
            ));
        }

        for (name, size) in [
            ("snap_size_x", self.snap_size_x),
            ("snap_size_y", self.snap_size_y),
        ] {
            if let Some(size) = size
                && (!size.is_finite() || size <= 0.0)
            {
                errors.push(format!("{name} must be finite and > 0, got {size}"));
            }
        }

        if self.friction <= 0.0 || self.friction >= 1.0 || self.friction.is_nan() {
            errors.push(format!("friction must be in (0, 1), got {}", self.friction));
        }

        if !self.minimum_speed.is_finite() || self.minimum_speed <= 0.0 {
            errors.push(format!(
                "minimum_speed must be finite and > 0, got {}",
                self.minimum_speed
            ));
        }

        for (name, value) in [
            ("max_fling_duration_ms", self.max_fling_duration_ms),
            ("min_paged_fling_duration_ms", self.min_paged_fling_duration_ms),
            ("wheel_debounce_ms", self.wheel_debounce_ms),
            ("settle_duration_ms", self.settle_duration_ms),
            ("bounce_duration_ms", self.bounce_duration_ms),
            ("velocity_window_ms", self.velocity_window_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be finite and >= 0, got {value}"));
            }
        }

        if self.min_paged_fling_duration_ms > self.max_fling_duration_ms {
            errors.push(format!(
                "min_paged_fling_duration_ms ({}) must not exceed max_fling_duration_ms ({})",
                self.min_paged_fling_duration_ms, self.max_fling_duration_ms
            ));
        }

        errors
    }

    /// `self` if it validates, otherwise every problem found.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading or validating a [`ScrollerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(toml::de::Error),

    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(serde_json::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
