#![forbid(unsafe_code)]

//! Rubber-band resistance for drags past a scroll bound.
//!
//! `dampen(d, E) = round(0.6 E (e - 1) / (e + 1))` with `e = exp(d / E)`,
//! i.e. `0.6 E tanh(d / 2E)`. The result is odd, monotonic and saturates at
//! `±0.6 E`.

/// Fraction of the container extent the band can stretch to.
const STRETCH_LIMIT: f64 = 0.6;

/// Maps distances beyond a bound to a compressed visual offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryElasticity {
    enabled: bool,
}

impl Default for BoundaryElasticity {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl BoundaryElasticity {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    #[inline]
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Compressed offset for `distance` past a bound on an axis whose
    /// container spans `extent` pixels. Zero when disabled or the extent is
    /// not positive.
    #[must_use]
    pub fn dampen(&self, distance: f64, extent: f64) -> f64 {
        if !self.enabled || extent.is_nan() || extent <= 0.0 || !distance.is_finite() {
            return 0.0;
        }
        let e = (distance / extent).exp();
        let damped = extent * STRETCH_LIMIT * (e - 1.0) / (e + 1.0);
        // exp overflows to inf for huge ratios; inf/inf is NaN.
        let damped = if damped.is_nan() {
            extent * STRETCH_LIMIT * distance.signum()
        } else {
            damped
        };
        crate::geometry::round_half_up(damped)
    }

    /// Visual position for a raw drag `target` on an axis spanning
    /// `[scroll_end, 0]`. In-bounds targets pass through.
    #[must_use]
    pub fn constrain(&self, target: f64, scroll_end: f64, extent: f64) -> f64 {
        if target > 0.0 {
            self.dampen(target, extent)
        } else if target < scroll_end {
            scroll_end + self.dampen(target - scroll_end, extent)
        } else {
            target
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_is_zero() {
        assert_eq!(BoundaryElasticity::default().dampen(0.0, 400.0), 0.0);
    }

    #[test]
    fn disabled_pins_to_bound() {
        let band = BoundaryElasticity::new(false);
        assert_eq!(band.dampen(120.0, 400.0), 0.0);
        assert_eq!(band.constrain(50.0, -700.0, 300.0), 0.0);
        assert_eq!(band.constrain(-800.0, -700.0, 300.0), -700.0);
    }

    #[test]
    fn known_value() {
        // 0.6 * 300 * tanh(0.5) = 83.2...
        assert_eq!(BoundaryElasticity::default().dampen(300.0, 300.0), 83.0);
        assert_eq!(BoundaryElasticity::default().dampen(-300.0, 300.0), -83.0);
    }

    #[test]
    fn saturates_at_limit() {
        let band = BoundaryElasticity::default();
        assert_eq!(band.dampen(1e6, 300.0), 180.0);
        assert_eq!(band.dampen(-1e6, 300.0), -180.0);
    }

    #[test]
    fn zero_extent_has_no_range() {
        assert_eq!(BoundaryElasticity::default().dampen(50.0, 0.0), 0.0);
    }

    #[test]
    fn constrain_both_edges() {
        let band = BoundaryElasticity::default();
        assert_eq!(band.constrain(-350.0, -700.0, 300.0), -350.0);
        let start = band.constrain(60.0, -700.0, 300.0);
        assert!(start > 0.0 && start < 60.0);
        let end = band.constrain(-760.0, -700.0, 300.0);
        assert!(end < -700.0 && end > -760.0);
    }
}
