#![forbid(unsafe_code)]

//! Wheel delta normalization.
//!
//! Wheel input arrives in one of three unit conventions. All are mapped to
//! pixels in the drag convention (positive moves content toward the end
//! edge's opposite, like dragging down/right):
//!
//! | Source                    | x                 | y                 |
//! |---------------------------|-------------------|-------------------|
//! | `Pixels { dx, dy }`       | `dx / 2`          | `dy / 2`          |
//! | `Legacy { delta }`        | `0`               | `delta / 2`       |
//! | `Lines { detail, .. }`    | `-10 * detail`    | or on y           |
//!
//! When vertical scrolling is disabled a purely vertical delta is moved onto
//! the horizontal axis so single-axis wheels still drive horizontal content.

/// Pixels per line for line-based wheel deltas.
const PIXELS_PER_LINE: f64 = -10.0;
/// Divisor applied to wheel-delta style values.
const WHEEL_DELTA_DIVISOR: f64 = 2.0;

/// Raw wheel input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    /// Two-axis wheel delta (positive scrolls toward the start).
    Pixels { dx: f64, dy: f64 },
    /// Single vertical wheel delta.
    Legacy { delta: f64 },
    /// Line counts (positive scrolls toward the end).
    Lines { detail: f64, horizontal: bool },
}

impl WheelDelta {
    /// Pixel movement `(x, y)` for this delta. Non-finite components are
    /// treated as zero.
    #[must_use]
    pub fn normalize(self, vertical_enabled: bool) -> (f64, f64) {
        let (mut x, mut y) = match self {
            Self::Pixels { dx, dy } => (dx / WHEEL_DELTA_DIVISOR, dy / WHEEL_DELTA_DIVISOR),
            Self::Legacy { delta } => (0.0, delta / WHEEL_DELTA_DIVISOR),
            Self::Lines {
                detail,
                horizontal: true,
            } => (detail * PIXELS_PER_LINE, 0.0),
            Self::Lines {
                detail,
                horizontal: false,
            } => (0.0, detail * PIXELS_PER_LINE),
        };
        if !x.is_finite() {
            x = 0.0;
        }
        if !y.is_finite() {
            y = 0.0;
        }
        if !vertical_enabled && x == 0.0 {
            (y, 0.0)
        } else {
            (x, y)
        }
    }
}
