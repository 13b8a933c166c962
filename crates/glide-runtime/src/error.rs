#![forbid(unsafe_code)]

use glide_core::{Axis, ConfigError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrollerError>;

/// Errors from the scroller's control surface.
#[derive(Debug, Error)]
pub enum ScrollerError {
    #[error("`{property}` is read-only")]
    ReadOnly { property: &'static str },

    #[error("snap size on {axis} must be finite and > 0, got {value}")]
    InvalidSnapSize { axis: Axis, value: f64 },

    #[error("scroller has been destroyed")]
    Destroyed,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
