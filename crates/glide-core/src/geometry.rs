#![forbid(unsafe_code)]

//! Axis-indexed primitives shared by every scroll component.
//!
//! Positions follow the scroll-offset convention: `0` is the start-edge rest
//! position and reachable positions are `<= 0`. Pointer samples are in the
//! host's pixel space; a positive pointer delta moves content toward `0`.

use std::ops::{Index, IndexMut};

/// One of the two scroll axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Both axes in processing order.
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// Short lowercase name, used in log fields and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value stored once per axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisPair<T> {
    pub x: T,
    pub y: T,
}

impl<T> AxisPair<T> {
    /// Create a pair from explicit components.
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Apply `f` to both components.
    #[inline]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> AxisPair<U> {
        AxisPair {
            x: f(self.x),
            y: f(self.y),
        }
    }

    /// Build a pair by evaluating `f` for each axis.
    #[inline]
    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        Self {
            x: f(Axis::X),
            y: f(Axis::Y),
        }
    }
}

impl<T: Copy> AxisPair<T> {
    /// The same value on both axes.
    #[inline]
    pub const fn splat(value: T) -> Self {
        Self { x: value, y: value }
    }
}

impl<T> Index<Axis> for AxisPair<T> {
    type Output = T;

    #[inline]
    fn index(&self, axis: Axis) -> &T {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

impl<T> IndexMut<Axis> for AxisPair<T> {
    #[inline]
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

/// A timestamped pointer sample. Time is in milliseconds on the host clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

impl Sample {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, t }
    }

    /// The coordinate on `axis`.
    #[inline]
    #[must_use]
    pub const fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// Round half toward positive infinity, matching the rounding used for
/// pixel offsets and grid lines (`-1.5` rounds to `-1`).
#[inline]
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
