#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BezierError>;

/// Failures raised by curve construction and evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BezierError {
    #[error("control point {param} must lie in [0, 1] (got {value})")]
    ControlPointOutOfRange { param: &'static str, value: f64 },

    #[error("epsilon must be finite and greater than zero (got {0})")]
    InvalidEpsilon(f64),

    #[error("{name} must lie in [0, 1] (got {value})")]
    ParameterOutOfRange { name: &'static str, value: f64 },
}

impl BezierError {
    #[must_use]
    pub fn out_of_range(name: &'static str, value: f64) -> Self {
        Self::ParameterOutOfRange { name, value }
    }

    /// Name of the offending control point or parameter, if any.
    #[must_use]
    pub fn param(&self) -> Option<&'static str> {
        match self {
            Self::ControlPointOutOfRange { param, .. } => Some(param),
            Self::ParameterOutOfRange { name, .. } => Some(name),
            Self::InvalidEpsilon(_) => None,
        }
    }
}
