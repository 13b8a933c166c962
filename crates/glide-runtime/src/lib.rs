#![forbid(unsafe_code)]

//! Runtime: the stateful half of Glide.
//!
//! # Role in Glide
//! `glide-runtime` turns pointer, wheel and timer input into calls on a
//! [`PositionSink`]. It owns the gesture state machine, the cancellable
//! task queue that sequences chained animations, the lifecycle event
//! registry, and the lock that keeps nested scrollers from moving together.
//!
//! # Driving a scroller
//! The host forwards pointer samples to [`Scroller::on_start`],
//! [`Scroller::on_move`] and [`Scroller::on_end`], wheel ticks to
//! [`Scroller::on_wheel`], and calls [`Scroller::tick`] from its timer or
//! frame loop so delayed animation steps and finalization run.
//!
//! Everything is single-threaded; shared handles use `Rc`.

pub mod clock;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod layout;
pub mod scheduler;
pub mod scroller;
pub mod sink;
pub mod wheel;

pub use clock::{Clock, ManualClock, SystemClock};
pub use coordinator::{InstanceId, ScrollCoordinator};
pub use error::{Result, ScrollerError};
pub use events::{
    Delivery, EventRegistry, ListenerId, ScrollEvent, ScrollEventKind, ScrollOffsets,
    SegmentIndices,
};
pub use layout::{Extents, LayoutSource};
pub use scheduler::{DueTask, Scheduler, TaskHandle};
pub use scroller::{Property, ScrollDuration, ScrollState, Scroller, ScrollerBuilder};
pub use sink::{PositionInstruction, PositionSink, RecordingSink};
pub use wheel::WheelDelta;
