#![forbid(unsafe_code)]

//! Glide public facade crate.
//!
//! Re-exports the curve math and fling planner from `glide-core` and, with
//! the default `runtime` feature, the stateful scroller from
//! `glide-runtime`. Most hosts only need the [`prelude`].
//!
//! ```no_run
//! use glide::prelude::*;
//!
//! let extents = Extents::new(AxisPair::new(320.0, 480.0), AxisPair::new(320.0, 4000.0));
//! let mut scroller = Scroller::new(ScrollerConfig::default(), extents, RecordingSink::new())?;
//! scroller.on_start(0.0, 400.0, 0.0);
//! scroller.on_move(0.0, 250.0, 40.0);
//! scroller.on_end(48.0);
//! while let Some(due) = scroller.next_deadline() {
//!     scroller.tick(due);
//! }
//! # Ok::<(), glide::runtime::ScrollerError>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use glide_core::{
    Alignment, Axis, AxisPair, ConfigError, CubicBezier, EventHistory, Metrics, MotionKind,
    MotionPlan, MotionPlanner, PlannerConfig, Sample, ScrollerConfig, SnapGrid, SnapResolver,
    VelocityEstimator,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use glide_runtime::{
    Clock, Extents, LayoutSource, ManualClock, PositionSink, Property, RecordingSink,
    ScrollCoordinator, ScrollDuration, ScrollEvent, ScrollEventKind, ScrollState, Scroller,
    ScrollerBuilder, ScrollerError, SystemClock, WheelDelta,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{Alignment, Axis, AxisPair, CubicBezier, ScrollerConfig};

    #[cfg(feature = "runtime")]
    pub use crate::{
        Extents, PositionSink, RecordingSink, ScrollCoordinator, ScrollDuration, ScrollEvent,
        ScrollEventKind, ScrollState, Scroller, ScrollerBuilder, WheelDelta,
    };

    pub use crate::core;
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use glide_core as core;
#[cfg(feature = "runtime")]
pub use glide_runtime as runtime;
