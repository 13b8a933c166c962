#![forbid(unsafe_code)]

//! Viewport and content extents supplied by the host's layout.

use glide_core::AxisPair;

/// Container (viewport) and raw content extents in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extents {
    pub container: AxisPair<f64>,
    pub content: AxisPair<f64>,
}

impl Extents {
    #[must_use]
    pub const fn new(container: AxisPair<f64>, content: AxisPair<f64>) -> Self {
        Self { container, content }
    }
}

/// Something that can measure the scroll container and its content.
pub trait LayoutSource {
    fn extents(&self) -> Extents;
}

impl LayoutSource for Extents {
    fn extents(&self) -> Extents {
        *self
    }
}

impl<L: LayoutSource + ?Sized> LayoutSource for &L {
    fn extents(&self) -> Extents {
        (**self).extents()
    }
}
