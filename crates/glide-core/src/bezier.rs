#![forbid(unsafe_code)]

//! Unit cubic bezier curves used as easing functions.
//!
//! A [`CubicBezier`] has fixed endpoints `(0,0)` and `(1,1)` and two control
//! points, the same shape as a CSS `cubic-bezier()` timing function. The x
//! coordinate is normalized time and the y coordinate is normalized progress.
//!
//! # Invariants
//!
//! 1. Both coordinates of both control points lie in `[0, 1]`; construction
//!    fails otherwise, naming the offending parameter.
//! 2. Subdivision always yields curves that satisfy invariant 1 or fails.
//! 3. Curve inversion always terminates: at most 8 Newton steps followed by a
//!    bounded bisection.
//!
//! # Failure Modes
//!
//! - A non-finite or non-positive `epsilon` is rejected.
//! - On curves whose coordinate is not monotonic in `t`, inversion returns one
//!   of the valid parameters, not necessarily the smallest.

use std::fmt;

use crate::error::{BezierError, Result};

/// Newton steps attempted before falling back to bisection.
const NEWTON_ITERATIONS: usize = 8;
/// Derivative magnitude below which Newton is abandoned.
const NEWTON_MIN_SLOPE: f64 = 1e-6;
/// Bisection halves the interval at most this many times.
const BISECTION_ITERATIONS: usize = 64;
/// Tolerance used by [`CubicBezier::progress_at`].
const DEFAULT_EPSILON: f64 = 1e-6;
/// Float noise tolerated when renormalizing subdivided control points.
const NORMALIZE_SLACK: f64 = 1e-9;

/// A point on (or controlling) a unit curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

impl CurvePoint {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Polynomial coefficients for one coordinate: `((a t + b) t + c) t`.
#[derive(Debug, Clone, Copy)]
struct Coefficients {
    a: f64,
    b: f64,
    c: f64,
}

impl Coefficients {
    #[inline]
    fn new(p1: f64, p2: f64) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        Self { a, b, c }
    }

    #[inline]
    fn sample(self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    #[inline]
    fn slope(self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }

    /// Find `t` with `sample(t) ≈ target`.
    fn solve(self, target: f64, epsilon: f64) -> f64 {
        let mut t = target;
        for _ in 0..NEWTON_ITERATIONS {
            let err = self.sample(t) - target;
            if err.abs() < epsilon {
                return t;
            }
            let slope = self.slope(t);
            if slope.abs() < NEWTON_MIN_SLOPE {
                break;
            }
            t -= err / slope;
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        t = target;
        if t < lo {
            return lo;
        }
        if t > hi {
            return hi;
        }
        for _ in 0..BISECTION_ITERATIONS {
            let value = self.sample(t);
            if (value - target).abs() < epsilon {
                return t;
            }
            if target > value {
                lo = t;
            } else {
                hi = t;
            }
            t = (hi - lo) * 0.5 + lo;
            if lo >= hi {
                break;
            }
        }
        t
    }
}

/// A cubic bezier easing curve from `(0,0)` to `(1,1)`.
#[derive(Clone, Copy, PartialEq)]
pub struct CubicBezier {
    p1: CurvePoint,
    p2: CurvePoint,
}

impl CubicBezier {
    /// Identity curve.
    pub const LINEAR: Self = Self::from_unit_points(0.0, 0.0, 1.0, 1.0);
    pub const EASE: Self = Self::from_unit_points(0.25, 0.1, 0.25, 1.0);
    pub const EASE_IN: Self = Self::from_unit_points(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: Self = Self::from_unit_points(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: Self = Self::from_unit_points(0.42, 0.0, 0.58, 1.0);

    /// Full-length fling deceleration.
    pub const FLING: Self = Self::from_unit_points(0.1, 0.4, 0.3, 1.0);
    /// Return stroke after an overshoot or a snap residual.
    pub const BOUNCE: Self = Self::from_unit_points(0.7, 0.0, 0.9, 0.6);
    /// Continuation of a fling past a bound.
    pub const DECELERATE: Self = Self::from_unit_points(0.0, 0.5, 0.5, 1.0);

    /// Caller guarantees all four values are within `[0, 1]`.
    const fn from_unit_points(p1x: f64, p1y: f64, p2x: f64, p2y: f64) -> Self {
        Self {
            p1: CurvePoint::new(p1x, p1y),
            p2: CurvePoint::new(p2x, p2y),
        }
    }

    /// Create a curve from its two control points.
    ///
    /// # Errors
    ///
    /// [`BezierError::ControlPointOutOfRange`] when any coordinate is outside
    /// `[0, 1]` or not finite.
    pub fn new(p1x: f64, p1y: f64, p2x: f64, p2y: f64) -> Result<Self> {
        for (param, value) in [("p1x", p1x), ("p1y", p1y), ("p2x", p2x), ("p2y", p2y)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(BezierError::ControlPointOutOfRange { param, value });
            }
        }
        Ok(Self::from_unit_points(p1x, p1y, p2x, p2y))
    }

    /// The fling curve cut at 97% of its parameter range, so the tail does
    /// not crawl. This is the default easing for animated positions.
    #[must_use]
    pub fn truncated_fling() -> Self {
        Self::FLING
            .divide_at_t(0.97)
            .map_or(Self::FLING, |(left, _)| left)
    }

    #[inline]
    #[must_use]
    pub const fn p1(&self) -> CurvePoint {
        self.p1
    }

    #[inline]
    #[must_use]
    pub const fn p2(&self) -> CurvePoint {
        self.p2
    }

    /// Control points as `[p1x, p1y, p2x, p2y]`.
    #[must_use]
    pub const fn to_array(&self) -> [f64; 4] {
        [self.p1.x, self.p1.y, self.p2.x, self.p2.y]
    }

    #[inline]
    fn x_coefficients(&self) -> Coefficients {
        Coefficients::new(self.p1.x, self.p2.x)
    }

    #[inline]
    fn y_coefficients(&self) -> Coefficients {
        Coefficients::new(self.p1.y, self.p2.y)
    }

    /// Evaluate the curve at parameter `t`.
    ///
    /// # Errors
    ///
    /// [`BezierError::ParameterOutOfRange`] when `t` is outside `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Result<CurvePoint> {
        if t == 0.0 {
            return Ok(CurvePoint::new(0.0, 0.0));
        }
        if t == 1.0 {
            return Ok(CurvePoint::new(1.0, 1.0));
        }
        if !(0.0..=1.0).contains(&t) {
            return Err(BezierError::out_of_range("t", t));
        }
        Ok(CurvePoint::new(
            self.x_coefficients().sample(t),
            self.y_coefficients().sample(t),
        ))
    }

    /// Parameter `t` at which the curve's x coordinate reaches `x`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid `epsilon` or a non-finite `x`.
    pub fn t_for_x(&self, x: f64, epsilon: f64) -> Result<f64> {
        check_target("x", x, epsilon)?;
        Ok(self.x_coefficients().solve(x, epsilon))
    }

    /// Parameter `t` at which the curve's y coordinate reaches `y`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid `epsilon` or a non-finite `y`.
    pub fn t_for_y(&self, y: f64, epsilon: f64) -> Result<f64> {
        check_target("y", y, epsilon)?;
        Ok(self.y_coefficients().solve(y, epsilon))
    }

    /// Eased progress for normalized elapsed time `x` (clamped to `[0, 1]`).
    #[must_use]
    pub fn progress_at(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.0;
        }
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        let t = self.x_coefficients().solve(x, DEFAULT_EPSILON);
        self.y_coefficients().sample(t.clamp(0.0, 1.0))
    }

    /// Split the curve at parameter `t` into two renormalized curves.
    ///
    /// At `t = 0` the left half is [`CubicBezier::LINEAR`] and the right half a
    /// copy of `self`; at `t = 1` the reverse.
    ///
    /// # Errors
    ///
    /// [`BezierError::ParameterOutOfRange`] when `t` is outside `[0, 1]`, or
    /// [`BezierError::ControlPointOutOfRange`] when a half cannot be expressed
    /// as a unit curve (possible only for curves that are not monotonic in y).
    pub fn divide_at_t(&self, t: f64) -> Result<(Self, Self)> {
        if t == 0.0 {
            return Ok((Self::LINEAR, *self));
        }
        if t == 1.0 {
            return Ok((*self, Self::LINEAR));
        }
        if !(0.0..=1.0).contains(&t) {
            return Err(BezierError::out_of_range("t", t));
        }

        let lerp = |a: CurvePoint, b: CurvePoint| {
            CurvePoint::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
        };
        let origin = CurvePoint::new(0.0, 0.0);
        let end = CurvePoint::new(1.0, 1.0);

        let i0 = lerp(origin, self.p1);
        let i1 = lerp(self.p1, self.p2);
        let i2 = lerp(self.p2, end);
        let j0 = lerp(i0, i1);
        let j1 = lerp(i1, i2);
        let k = lerp(j0, j1);

        let left = Self::new(
            normalize(i0.x / k.x),
            normalize(i0.y / k.y),
            normalize(j0.x / k.x),
            normalize(j0.y / k.y),
        )?;
        let right = Self::new(
            normalize((j1.x - k.x) / (1.0 - k.x)),
            normalize((j1.y - k.y) / (1.0 - k.y)),
            normalize((i2.x - k.x) / (1.0 - k.x)),
            normalize((i2.y - k.y) / (1.0 - k.y)),
        )?;
        Ok((left, right))
    }

    /// Split where the curve's x coordinate reaches `x`.
    ///
    /// # Errors
    ///
    /// Fails when `x` is outside `[0, 1]` or `epsilon` is invalid.
    pub fn divide_at_x(&self, x: f64, epsilon: f64) -> Result<(Self, Self)> {
        if !(0.0..=1.0).contains(&x) {
            return Err(BezierError::out_of_range("x", x));
        }
        let t = self.t_for_x(x, epsilon)?;
        self.divide_at_t(t.clamp(0.0, 1.0))
    }

    /// Split where the curve's y coordinate reaches `y`.
    ///
    /// # Errors
    ///
    /// Fails when `y` is outside `[0, 1]` or `epsilon` is invalid.
    pub fn divide_at_y(&self, y: f64, epsilon: f64) -> Result<(Self, Self)> {
        if !(0.0..=1.0).contains(&y) {
            return Err(BezierError::out_of_range("y", y));
        }
        let t = self.t_for_y(y, epsilon)?;
        self.divide_at_t(t.clamp(0.0, 1.0))
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::LINEAR
    }
}

impl fmt::Debug for CubicBezier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CubicBezier")
            .field("p1", &(self.p1.x, self.p1.y))
            .field("p2", &(self.p2.x, self.p2.y))
            .finish()
    }
}

/// Renders as a CSS timing function, e.g. `cubic-bezier(0.1, 0.4, 0.3, 1)`.
impl fmt::Display for CubicBezier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cubic-bezier({}, {}, {}, {})",
            self.p1.x, self.p1.y, self.p2.x, self.p2.y
        )
    }
}

fn check_target(name: &'static str, target: f64, epsilon: f64) -> Result<()> {
    if !epsilon.is_finite() || epsilon <= 0.0 {
        return Err(BezierError::InvalidEpsilon(epsilon));
    }
    if !target.is_finite() {
        return Err(BezierError::out_of_range(name, target));
    }
    Ok(())
}

/// Snap values within float noise of the unit interval onto it.
fn normalize(value: f64) -> f64 {
    if value < 0.0 && value > -NORMALIZE_SLACK {
        0.0
    } else if value > 1.0 && value < 1.0 + NORMALIZE_SLACK {
        1.0
    } else {
        value
    }
}
