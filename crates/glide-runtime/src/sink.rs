#![forbid(unsafe_code)]

//! Where positions go.
//!
//! The scroller computes positions; a [`PositionSink`] renders them. A
//! non-zero duration asks the sink to animate from wherever the axis is now
//! to `position` along `easing`.

use glide_core::{Axis, CubicBezier};

/// Receiver of position instructions.
pub trait PositionSink {
    fn apply_position(&mut self, axis: Axis, position: f64, duration_ms: f64, easing: &CubicBezier);

    /// Position currently shown on `axis`, if the renderer can report it.
    ///
    /// When `None`, an interrupted animation is evaluated from its curve.
    fn current_position(&self, _axis: Axis) -> Option<f64> {
        None
    }
}

impl<S: PositionSink + ?Sized> PositionSink for Box<S> {
    fn apply_position(&mut self, axis: Axis, position: f64, duration_ms: f64, easing: &CubicBezier) {
        (**self).apply_position(axis, position, duration_ms, easing);
    }

    fn current_position(&self, axis: Axis) -> Option<f64> {
        (**self).current_position(axis)
    }
}

/// One recorded call to [`PositionSink::apply_position`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionInstruction {
    pub axis: Axis,
    pub position: f64,
    pub duration_ms: f64,
    pub easing: CubicBezier,
}

/// Sink that records every instruction.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    instructions: Vec<PositionInstruction>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn instructions(&self) -> &[PositionInstruction] {
        &self.instructions
    }

    /// Most recent instruction for `axis`.
    #[must_use]
    pub fn last(&self, axis: Axis) -> Option<&PositionInstruction> {
        self.instructions.iter().rev().find(|i| i.axis == axis)
    }

    /// Drain everything recorded so far.
    pub fn take(&mut self) -> Vec<PositionInstruction> {
        std::mem::take(&mut self.instructions)
    }
}

impl PositionSink for RecordingSink {
    fn apply_position(&mut self, axis: Axis, position: f64, duration_ms: f64, easing: &CubicBezier) {
        self.instructions.push(PositionInstruction {
            axis,
            position,
            duration_ms,
            easing: *easing,
        });
    }
}
