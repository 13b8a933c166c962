#![forbid(unsafe_code)]

//! The gesture state machine and the scroller's control surface.
//!
//! # States
//!
//! ```text
//!            on_start                 threshold crossed
//!   Idle ─────────────▶ Tracking ─────────────────────▶ Scrolling
//!    ▲                     │  ▲                             │ on_end / wheel quiet
//!    │      on_end         │  │ on_start (interrupt)        ▼
//!    └─────────────────────┘  └──────────────────────── Animating
//!    ▲                                                      │
//!    └──────────────────── finalize ◀───────────────────────┘
//! ```
//!
//! Two positions are tracked per axis: the *base* position, committed when
//! motion finalizes, and the *applied* position, the last value handed to
//! the sink without animation. They are equal at rest.
//!
//! # Invariants
//!
//! 1. The shared lock is held from entering `Scrolling` (or starting an
//!    animation) until finalize.
//! 2. Every scheduled task belongs to the current motion; starting a
//!    gesture, changing dimensions, scrolling programmatically or
//!    destroying the scroller cancels them all first.
//! 3. `scrollend` fires exactly once per engaged motion, after `scroll`
//!    with the committed offsets.
//! 4. Interrupting an animation commits the position shown at that moment,
//!    truncated toward zero, before the new gesture reads it.
//!
//! # Failure Modes
//!
//! - **Lock held elsewhere at release**: the planned motion is applied
//!   instantly and the scroller finalizes.
//! - **Listener panic**: logged and skipped; see [`crate::events`].
//! - **Use after destroy**: gesture calls are ignored; control calls return
//!   [`ScrollerError::Destroyed`].

use std::fmt;

use glide_core::{
    Alignment, AnimationPlan, Axis, AxisPair, AxisState, BoundaryElasticity, CubicBezier, EventHistory,
    Metrics, MotionPlan, MotionPlanner, Sample, ScrollerConfig, SnapGrid, SnapResolver,
    VelocityEstimator, geometry::round_half_up,
};

use crate::clock::{Clock, SystemClock};
use crate::coordinator::{InstanceId, ScrollCoordinator};
use crate::error::{Result, ScrollerError};
use crate::events::{
    EventRegistry, ListenerId, ScrollEvent, ScrollEventKind, ScrollOffsets, SegmentIndices,
};
use crate::layout::{Extents, LayoutSource};
use crate::scheduler::{Scheduler, TaskHandle};
use crate::sink::PositionSink;
use crate::wheel::WheelDelta;

/// Programmatic scrolls animate `sqrt(distance)` times this many ms.
const AUTO_DURATION_MS_PER_SQRT_PX: f64 = 20.0;
/// Tolerance (px) for considering a position centered when dimensions change.
const CENTER_TOLERANCE: f64 = 5.0;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Lifecycle state of a [`Scroller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    /// No input owns the scroller and nothing is moving.
    Idle,
    /// Input is down but has not moved past the threshold.
    Tracking,
    /// Input is moving the content directly.
    Scrolling,
    /// Planned motion is running.
    Animating,
}

impl ScrollState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Tracking => "tracking",
            Self::Scrolling => "scrolling",
            Self::Animating => "animating",
        }
    }
}

/// How long a programmatic scroll takes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScrollDuration {
    /// Jump without animating.
    #[default]
    Instant,
    /// Animate for a fixed number of milliseconds.
    Fixed(f64),
    /// Animate for `sqrt(distance) * 20` ms.
    Auto,
}

impl ScrollDuration {
    /// Milliseconds for a move of `distance` px.
    #[must_use]
    pub fn resolve(self, distance: f64) -> f64 {
        let ms = match self {
            Self::Instant => 0.0,
            Self::Fixed(ms) => ms,
            Self::Auto => distance.abs().sqrt() * AUTO_DURATION_MS_PER_SQRT_PX,
        };
        if ms.is_finite() && ms > 0.0 { ms } else { 0.0 }
    }
}

/// Properties addressable through [`Scroller::set_property`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    ScrollLeft,
    ScrollTop,
    ScrollWidth,
    ScrollHeight,
    SegmentCount,
    CurrentSegment,
}

impl Property {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ScrollLeft => "scroll_left",
            Self::ScrollTop => "scroll_top",
            Self::ScrollWidth => "scroll_width",
            Self::ScrollHeight => "scroll_height",
            Self::SegmentCount => "segment_count",
            Self::CurrentSegment => "current_segment",
        }
    }
}

// ---------------------------------------------------------------------------
// Internal bookkeeping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputSource {
    Pointer,
    Wheel,
}

#[derive(Debug, Clone, Copy)]
enum Task {
    Apply(AnimationPlan),
    Finalize { positions: AxisPair<Option<f64>> },
    WheelEnd,
}

/// An animation handed to the sink, kept so it can be evaluated when
/// interrupted.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisTrack {
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
    easing: CubicBezier,
}

impl AxisTrack {
    fn position_at(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 || now_ms >= self.start_ms + self.duration_ms {
            return self.to;
        }
        if now_ms <= self.start_ms {
            return self.from;
        }
        let progress = self
            .easing
            .progress_at((now_ms - self.start_ms) / self.duration_ms);
        self.from + (self.to - self.from) * progress
    }
}

#[derive(Debug, Default)]
struct WheelState {
    total: AxisPair<f64>,
    debounce: Option<TaskHandle>,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and constructs a [`Scroller`].
pub struct ScrollerBuilder {
    config: ScrollerConfig,
    extents: Extents,
    coordinator: Option<ScrollCoordinator>,
    clock: Option<Box<dyn Clock>>,
}

impl ScrollerBuilder {
    #[must_use]
    pub fn new(config: ScrollerConfig) -> Self {
        Self {
            config,
            extents: Extents::default(),
            coordinator: None,
            clock: None,
        }
    }

    /// Initial container and content extents.
    #[must_use]
    pub fn extents(mut self, extents: Extents) -> Self {
        self.extents = extents;
        self
    }

    /// Share a scroll lock with other scrollers.
    #[must_use]
    pub fn coordinator(mut self, coordinator: &ScrollCoordinator) -> Self {
        self.coordinator = Some(coordinator.clone());
        self
    }

    /// Time source for calls that carry no timestamp.
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Validate the configuration and lay out the initial extents.
    pub fn build<S: PositionSink>(self, sink: S) -> Result<Scroller<S>> {
        let config = self.config.validated()?;
        let coordinator = self.coordinator.unwrap_or_default();
        let id = coordinator.register();
        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock::new()));

        let mut scroller = Scroller {
            planner: MotionPlanner::new(config.to_planner_config()),
            velocity: VelocityEstimator::new(config.velocity_window_ms),
            elasticity: BoundaryElasticity::new(config.bouncing),
            metrics: Metrics::default(),
            grid: SnapGrid::new(config.snap_size_x, config.snap_size_y),
            scrollable: AxisPair::default(),
            base: AxisPair::default(),
            applied: AxisPair::default(),
            frame_target: AxisPair::default(),
            tracks: AxisPair::default(),
            active_segment: AxisPair::default(),
            base_segment: AxisPair::default(),
            history: EventHistory::new(),
            gesture_start: Sample::new(0.0, 0.0, 0.0),
            state: ScrollState::Idle,
            input: None,
            wheel: WheelState::default(),
            engaged: false,
            has_been_scrolled: false,
            destroyed: false,
            tasks: Scheduler::new(),
            events: EventRegistry::new(),
            coordinator,
            id,
            clock,
            sink,
            config,
        };
        tracing::debug!(target: "glide.scroller", instance = %id, "created");
        scroller.update_dimensions(self.extents, false)?;
        Ok(scroller)
    }
}

// ---------------------------------------------------------------------------
// Scroller
// ---------------------------------------------------------------------------

/// Inertial scroller for one viewport.
pub struct Scroller<S: PositionSink> {
    config: ScrollerConfig,
    planner: MotionPlanner,
    velocity: VelocityEstimator,
    elasticity: BoundaryElasticity,
    metrics: Metrics,
    grid: SnapGrid,
    scrollable: AxisPair<bool>,
    base: AxisPair<f64>,
    applied: AxisPair<f64>,
    frame_target: AxisPair<f64>,
    tracks: AxisPair<Option<AxisTrack>>,
    active_segment: AxisPair<u32>,
    base_segment: AxisPair<u32>,
    history: EventHistory,
    gesture_start: Sample,
    state: ScrollState,
    input: Option<InputSource>,
    wheel: WheelState,
    /// Motion has started and `scrollend` is still owed.
    engaged: bool,
    has_been_scrolled: bool,
    destroyed: bool,
    tasks: Scheduler<Task>,
    events: EventRegistry,
    coordinator: ScrollCoordinator,
    id: InstanceId,
    clock: Box<dyn Clock>,
    sink: S,
}

impl<S: PositionSink> Scroller<S> {
    /// Scroller with its own lock and the system clock.
    pub fn new(config: ScrollerConfig, extents: Extents, sink: S) -> Result<Self> {
        ScrollerBuilder::new(config).extents(extents).build(sink)
    }

    // -- Gesture input ------------------------------------------------------

    /// A pointer went down at `(x, y)` at time `t`.
    ///
    /// Returns `false` when another input already owns the scroller.
    pub fn on_start(&mut self, x: f64, y: f64, t: f64) -> bool {
        if self.destroyed || self.input.is_some() {
            return false;
        }
        self.input = Some(InputSource::Pointer);
        self.start_gesture(x, y, t);
        true
    }

    /// The pointer moved. Returns whether the content moved.
    pub fn on_move(&mut self, x: f64, y: f64, t: f64) -> bool {
        if self.destroyed || self.input != Some(InputSource::Pointer) {
            return false;
        }
        self.update_gesture(x, y, t, false)
    }

    /// The pointer was released at time `t`.
    pub fn on_end(&mut self, t: f64) -> bool {
        if self.destroyed || self.input != Some(InputSource::Pointer) {
            return false;
        }
        self.input = None;
        self.end_gesture(t, InputSource::Pointer);
        true
    }

    /// A wheel tick at time `t`. Ticks accumulate into one synthetic drag
    /// that ends after `wheel_debounce_ms` of quiet.
    pub fn on_wheel(&mut self, delta: WheelDelta, t: f64) -> bool {
        if self.destroyed {
            return false;
        }
        match self.input {
            Some(InputSource::Pointer) => return false,
            Some(InputSource::Wheel) => {}
            None => {
                self.input = Some(InputSource::Wheel);
                self.wheel.total = AxisPair::default();
                self.start_gesture(0.0, 0.0, t);
            }
        }

        let (dx, dy) = delta.normalize(self.config.scrolling_y);
        self.wheel.total.x = round_half_up(self.wheel.total.x + dx);
        self.wheel.total.y = round_half_up(self.wheel.total.y + dy);
        tracing::trace!(
            target: "glide.wheel",
            instance = %self.id,
            dx,
            dy,
            total_x = self.wheel.total.x,
            total_y = self.wheel.total.y,
            "wheel tick"
        );
        let origin = self.gesture_start;
        self.update_gesture(
            origin.x + self.wheel.total.x,
            origin.y + self.wheel.total.y,
            t,
            false,
        );

        if let Some(handle) = self.wheel.debounce.take() {
            self.tasks.cancel(handle);
        }
        let due = t + self.config.wheel_debounce_ms;
        self.wheel.debounce = Some(self.tasks.schedule(due, Task::WheelEnd));
        true
    }

    /// Run every task due at or before `now_ms`. Returns how many ran.
    pub fn tick(&mut self, now_ms: f64) -> usize {
        if self.destroyed {
            return 0;
        }
        let mut ran = 0;
        while let Some(due) = self.tasks.pop_due(now_ms) {
            ran += 1;
            self.run_task(due.task, due.due_ms);
        }
        ran
    }

    /// [`tick`](Self::tick) at the clock's current time.
    pub fn tick_now(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.tick(now)
    }

    /// When the next task falls due, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<f64> {
        self.tasks.next_due()
    }

    /// Apply the latest drag position. Only meaningful with
    /// `coalesce_frames`; call it from the host's redraw tick.
    pub fn render_frame(&mut self) -> bool {
        if !self.config.coalesce_frames || self.state != ScrollState::Scrolling {
            return false;
        }
        self.flush_frame()
    }

    // -- Control surface ----------------------------------------------------

    /// Scroll to `scrollLeft`/`scrollTop`-style offsets. `None` leaves an
    /// axis where it is.
    pub fn scroll_to(
        &mut self,
        left: Option<f64>,
        top: Option<f64>,
        duration: ScrollDuration,
    ) -> Result<()> {
        self.ensure_alive()?;
        let now = self.clock.now_ms();
        self.has_been_scrolled = true;
        self.halt(now);

        let requested = AxisPair::new(left, top);
        let mut moves = Vec::with_capacity(2);
        {
            let resolver = SnapResolver::new(&self.metrics, &self.grid, self.config.snapping);
            for axis in Axis::ALL {
                if !self.config.scrolling(axis) {
                    continue;
                }
                let Some(offset) = requested[axis].filter(|v| v.is_finite()) else {
                    continue;
                };
                let target = resolver.resolve(-offset, axis);
                let ms = duration.resolve(self.base[axis] - target);
                moves.push((axis, target, ms));
            }
        }

        let mut longest = moves.iter().map(|m| m.2).fold(0.0, f64::max);
        if longest > 0.0 && !self.coordinator.try_acquire(self.id) {
            tracing::debug!(
                target: "glide.scroller",
                instance = %self.id,
                "lock unavailable, jumping"
            );
            longest = 0.0;
        }

        let easing = self.planner.fling_curve();
        let mut finals = AxisPair::new(None, None);
        for &(axis, target, ms) in &moves {
            let ms = if longest > 0.0 { ms } else { 0.0 };
            self.animate(axis, target, ms, easing, now);
            finals[axis] = Some(target);
        }
        tracing::debug!(
            target: "glide.scroller",
            instance = %self.id,
            duration_ms = longest,
            axes = moves.len(),
            "scroll to"
        );

        if longest > 0.0 {
            self.state = ScrollState::Animating;
            self.engaged = true;
            self.tasks
                .schedule(now + longest, Task::Finalize { positions: finals });
        } else {
            self.finalize();
        }
        Ok(())
    }

    /// Scroll relative to the committed offsets.
    pub fn scroll_by(&mut self, dx: f64, dy: f64, duration: ScrollDuration) -> Result<()> {
        self.ensure_alive()?;
        let now = self.clock.now_ms();
        self.halt(now);
        let left = dx + (0.0 - self.base.x);
        let top = dy + (0.0 - self.base.y);
        self.scroll_to(Some(left), Some(top), duration)
    }

    /// Pin the grid to explicit sizes, conform content to it, and settle
    /// onto it.
    pub fn set_snap_grid(&mut self, width: f64, height: f64) -> Result<()> {
        self.ensure_alive()?;
        for (axis, value) in [(Axis::X, width), (Axis::Y, height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScrollerError::InvalidSnapSize { axis, value });
            }
        }
        let now = self.clock.now_ms();
        self.halt(now);

        for (axis, size) in [(Axis::X, width), (Axis::Y, height)] {
            self.grid.set_user_interval(axis, size);
            self.metrics.conform_to_grid(axis, Some(size));
        }
        self.refresh_scrollable();
        tracing::debug!(
            target: "glide.scroller",
            instance = %self.id,
            width,
            height,
            "snap grid set"
        );

        if !self.snap_into_place(now) && self.engaged {
            self.finalize();
        }
        self.update_segments(true);
        Ok(())
    }

    /// Re-measure after the container or content changed.
    ///
    /// Positions aligned to the start, center or end stay aligned; the
    /// configured base alignment applies until the first scroll. Unless
    /// `ignore_snap`, the position then settles back into bounds and onto
    /// the grid.
    pub fn update_dimensions(&mut self, extents: Extents, ignore_snap: bool) -> Result<()> {
        self.ensure_alive()?;
        let now = self.clock.now_ms();
        self.halt(now);

        let previous = self.metrics;
        let start_alignment = AxisPair::from_fn(|axis| {
            let position = self.applied[axis];
            let end = previous.scroll_end(axis);
            if position == 0.0 {
                Some(Alignment::Start)
            } else if position <= end {
                Some(Alignment::End)
            } else if (position * 2.0 - end).abs() <= CENTER_TOLERANCE {
                Some(Alignment::Center)
            } else {
                None
            }
        });

        self.grid.follow_container(extents.container);
        let mut metrics = Metrics::new(extents.container, extents.content);
        if self.config.snapping {
            for axis in Axis::ALL {
                let interval = self.grid.interval(axis, metrics.container(axis));
                metrics.conform_to_grid(axis, interval);
            }
        }

        if metrics == previous {
            let settling = !ignore_snap && self.snap_into_place(now);
            if !settling && self.engaged {
                self.finalize();
            }
            return Ok(());
        }
        self.metrics = metrics;
        self.refresh_scrollable();
        tracing::debug!(
            target: "glide.scroller",
            instance = %self.id,
            container_x = metrics.container(Axis::X),
            container_y = metrics.container(Axis::Y),
            content_x = metrics.content(Axis::X),
            content_y = metrics.content(Axis::Y),
            "dimensions updated"
        );

        let alignments = self.config.base_alignments();
        for axis in Axis::ALL {
            if !self.config.scrolling(axis) {
                continue;
            }
            let alignment = alignments[axis];
            if metrics.has_range(axis)
                && self.has_been_scrolled
                && start_alignment[axis] != Some(alignment)
            {
                continue;
            }
            let target = alignment.position(metrics.scroll_end(axis));
            self.apply_instant(axis, target);
            self.base[axis] = target;
        }

        if !ignore_snap && self.snap_into_place(now) {
            self.update_segments(true);
        } else if self.engaged {
            self.finalize();
        }
        Ok(())
    }

    /// [`update_dimensions`](Self::update_dimensions) from a layout source.
    pub fn update_dimensions_from(
        &mut self,
        source: &impl LayoutSource,
        ignore_snap: bool,
    ) -> Result<()> {
        self.update_dimensions(source.extents(), ignore_snap)
    }

    /// Write a property. Only the scroll offsets are writable; they jump
    /// without animating.
    pub fn set_property(&mut self, property: Property, value: f64) -> Result<()> {
        self.ensure_alive()?;
        match property {
            Property::ScrollLeft => self.scroll_to(Some(value), None, ScrollDuration::Instant),
            Property::ScrollTop => self.scroll_to(None, Some(value), ScrollDuration::Instant),
            Property::ScrollWidth
            | Property::ScrollHeight
            | Property::SegmentCount
            | Property::CurrentSegment => {
                tracing::warn!(
                    target: "glide.scroller",
                    instance = %self.id,
                    property = property.name(),
                    value,
                    "rejected write to read-only property"
                );
                Err(ScrollerError::ReadOnly {
                    property: property.name(),
                })
            }
        }
    }

    /// Cancel everything, release the lock and drop all listeners.
    pub fn destroy(&mut self) -> Result<()> {
        self.ensure_alive()?;
        let cancelled = self.tasks.cancel_all();
        self.coordinator.release(self.id);
        self.events.clear();
        self.input = None;
        self.wheel = WheelState::default();
        self.tracks = AxisPair::default();
        self.engaged = false;
        self.state = ScrollState::Idle;
        self.destroyed = true;
        tracing::debug!(
            target: "glide.scroller",
            instance = %self.id,
            cancelled,
            "destroyed"
        );
        Ok(())
    }

    // -- Listeners ----------------------------------------------------------

    pub fn subscribe<F>(&mut self, kind: ScrollEventKind, listener: F) -> ListenerId
    where
        F: FnMut(&ScrollEvent) + 'static,
    {
        self.events.subscribe(kind, listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    // -- Accessors ----------------------------------------------------------

    /// Horizontal offset last applied (non-negative inside the bounds).
    #[must_use]
    pub fn scroll_left(&self) -> f64 {
        0.0 - self.applied.x
    }

    /// Vertical offset last applied (non-negative inside the bounds).
    #[must_use]
    pub fn scroll_top(&self) -> f64 {
        0.0 - self.applied.y
    }

    /// Content width, grid-conformed when snapping.
    #[must_use]
    pub fn scroll_width(&self) -> f64 {
        self.metrics.content(Axis::X)
    }

    /// Content height, grid-conformed when snapping.
    #[must_use]
    pub fn scroll_height(&self) -> f64 {
        self.metrics.content(Axis::Y)
    }

    /// Segments per axis; `None` unless snapping.
    #[must_use]
    pub fn segment_count(&self) -> Option<AxisPair<u32>> {
        if !self.config.snapping {
            return None;
        }
        Some(AxisPair::from_fn(|axis| {
            self.metrics
                .segment_count(axis, self.interval(axis))
                .unwrap_or(0)
        }))
    }

    /// Active segment, updated during motion.
    #[must_use]
    pub fn current_segment(&self) -> AxisPair<u32> {
        self.active_segment
    }

    /// Segment committed when motion last finalized.
    #[must_use]
    pub fn committed_segment(&self) -> AxisPair<u32> {
        self.base_segment
    }

    /// Position last applied on `axis` without animation.
    #[must_use]
    pub fn position(&self, axis: Axis) -> f64 {
        self.applied[axis]
    }

    /// Position committed when motion last finalized.
    #[must_use]
    pub fn base_position(&self, axis: Axis) -> f64 {
        self.base[axis]
    }

    /// Position shown on `axis` at `now_ms`, evaluating any running
    /// animation along its curve.
    #[must_use]
    pub fn position_at(&self, axis: Axis, now_ms: f64) -> f64 {
        self.tracks[axis].map_or(self.applied[axis], |track| track.position_at(now_ms))
    }

    #[must_use]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Content overflows the container on `axis` and scrolling is enabled.
    #[must_use]
    pub fn is_scrollable(&self, axis: Axis) -> bool {
        self.scrollable[axis]
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &ScrollerConfig {
        &self.config
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // -- Gesture internals --------------------------------------------------

    fn start_gesture(&mut self, x: f64, y: f64, t: f64) {
        let interrupting = self.state == ScrollState::Animating;
        if interrupting {
            self.interrupt(t);
        }
        self.gesture_start = Sample::new(x, y, t);
        self.frame_target = self.applied;
        self.history.clear();
        self.history.push(self.gesture_start);
        self.state = ScrollState::Tracking;
        tracing::debug!(
            target: "glide.scroller",
            instance = %self.id,
            x,
            y,
            t,
            interrupting,
            "gesture start"
        );
        if interrupting {
            self.update_gesture(x, y, t, true);
        }
    }

    fn update_gesture(&mut self, x: f64, y: f64, t: f64, interrupt: bool) -> bool {
        let gesture = AxisPair::new(x - self.gesture_start.x, y - self.gesture_start.y);
        let mut targets = AxisPair::from_fn(|axis| self.base[axis] + gesture[axis]);

        if self.state != ScrollState::Scrolling {
            if self.coordinator.is_held_by_other(self.id) {
                if self.engaged {
                    self.finalize();
                }
                return false;
            }

            let boundary = self.config.scroll_boundary;
            let below_threshold = Axis::ALL
                .into_iter()
                .all(|a| !self.scrollable[a] || gesture[a].abs() < boundary);
            if !(interrupt && self.config.snapping) && below_threshold {
                return false;
            }

            // Without bouncing, a drag that only pushes past edges is left
            // for an enclosing scroller to claim.
            let only_past_edges = Axis::ALL.into_iter().all(|a| {
                !self.scrollable[a]
                    || gesture[a] == 0.0
                    || targets[a] > 0.0
                    || targets[a] < self.metrics.scroll_end(a)
            });
            if !self.config.bouncing && !interrupt && only_past_edges {
                tracing::trace!(
                    target: "glide.scroller",
                    instance = %self.id,
                    "deferring to outer scroller"
                );
                return false;
            }

            if !self.coordinator.try_acquire(self.id) {
                return false;
            }
            self.has_been_scrolled = true;
            self.state = ScrollState::Scrolling;
            self.engaged = true;
            tracing::debug!(target: "glide.scroller", instance = %self.id, "scrolling");
            let offsets = offsets_of(self.base);
            self.emit(ScrollEvent::ScrollStart(offsets));
        }

        for axis in Axis::ALL {
            if !self.scrollable[axis] {
                targets[axis] = self.applied[axis];
                continue;
            }
            let target = self.elasticity.constrain(
                targets[axis],
                self.metrics.scroll_end(axis),
                self.metrics.container(axis),
            );
            targets[axis] = target;
            if self.config.coalesce_frames {
                self.frame_target[axis] = target;
            } else {
                self.apply_instant(axis, target);
            }
        }

        self.emit(ScrollEvent::Scroll(offsets_of(targets)));
        self.update_segments(false);
        self.history.push(Sample::new(x, y, t));
        tracing::trace!(
            target: "glide.scroller",
            instance = %self.id,
            x = targets.x,
            y = targets.y,
            t,
            "drag"
        );
        true
    }

    fn end_gesture(&mut self, t: f64, source: InputSource) {
        if self.state != ScrollState::Scrolling {
            if !self.snap_into_place(t) {
                if self.engaged {
                    self.finalize();
                } else {
                    self.state = ScrollState::Idle;
                }
            }
            return;
        }

        self.flush_frame();
        self.history.stamp_last(t);
        let plan = {
            let _span = tracing::debug_span!(
                target: "glide.scroller",
                "glide.scroller.release",
                instance = %self.id,
                t
            )
            .entered();
            self.plan_release(source)
        };
        if plan.is_empty() {
            self.finalize();
        } else {
            self.run_plan(&plan, t);
        }
    }

    fn plan_release(&self, source: InputSource) -> MotionPlan {
        let resolver = SnapResolver::new(&self.metrics, &self.grid, self.config.snapping);
        let states: Vec<AxisState> = Axis::ALL
            .into_iter()
            .filter(|&axis| self.scrollable[axis])
            .map(|axis| AxisState {
                axis,
                position: self.applied[axis],
                velocity: match source {
                    InputSource::Pointer => self.velocity.estimate(&self.history, axis),
                    InputSource::Wheel => None,
                },
                base_segment: self.base_segment[axis],
            })
            .collect();
        self.planner.plan_release(&states, &resolver)
    }

    /// Settle onto the nearest valid resting position. Returns whether any
    /// motion was started.
    fn snap_into_place(&mut self, now: f64) -> bool {
        let plan = {
            let resolver = SnapResolver::new(&self.metrics, &self.grid, self.config.snapping);
            let positions = Axis::ALL
                .into_iter()
                .filter(|&axis| self.config.scrolling(axis))
                .map(|axis| (axis, self.applied[axis]));
            self.planner.plan_settle(positions, &resolver)
        };
        if plan.is_empty() {
            return false;
        }
        self.run_plan(&plan, now);
        true
    }

    fn run_plan(&mut self, plan: &MotionPlan, now: f64) {
        let finals = AxisPair::from_fn(|axis| plan.final_position(axis));

        if !self.coordinator.try_acquire(self.id) {
            tracing::debug!(
                target: "glide.scroller",
                instance = %self.id,
                "lock unavailable, applying final positions"
            );
            self.commit(finals);
            self.finalize();
            return;
        }

        self.state = ScrollState::Animating;
        self.engaged = true;
        for p in plan.plans() {
            if p.delay_ms > 0.0 {
                self.tasks.schedule(now + p.delay_ms, Task::Apply(*p));
            } else {
                self.animate(p.axis, p.target, p.duration_ms, p.easing, now);
            }
        }

        let total = plan.duration_ms();
        tracing::debug!(
            target: "glide.scroller",
            instance = %self.id,
            kind = ?plan.kind,
            plans = plan.plans().count(),
            duration_ms = total,
            "animating"
        );
        if total > 0.0 {
            self.tasks
                .schedule(now + total, Task::Finalize { positions: finals });
        } else {
            self.commit(finals);
            self.finalize();
        }
    }

    fn run_task(&mut self, task: Task, due_ms: f64) {
        match task {
            Task::Apply(plan) => {
                self.animate(plan.axis, plan.target, plan.duration_ms, plan.easing, due_ms);
            }
            Task::Finalize { positions } => {
                self.commit(positions);
                self.finalize();
            }
            Task::WheelEnd => {
                self.wheel.debounce = None;
                if self.input == Some(InputSource::Wheel) {
                    self.input = None;
                    self.end_gesture(due_ms, InputSource::Wheel);
                }
            }
        }
    }

    /// Materialize the shown position into the base and cancel all tasks.
    fn interrupt(&mut self, now: f64) {
        for axis in Axis::ALL {
            if !self.scrollable[axis] {
                continue;
            }
            let shown = self
                .sink
                .current_position(axis)
                .unwrap_or_else(|| self.position_at(axis, now));
            let position = shown.trunc() + 0.0;
            self.base[axis] = position;
            self.apply_instant(axis, position);
        }
        let cancelled = self.tasks.cancel_all();
        self.wheel.debounce = None;
        self.update_segments(false);
        tracing::debug!(
            target: "glide.scroller",
            instance = %self.id,
            x = self.base.x,
            y = self.base.y,
            cancelled,
            "interrupted"
        );
    }

    /// Stop input and motion ahead of a programmatic change. The caller
    /// either starts new motion or finalizes.
    fn halt(&mut self, now: f64) {
        match self.state {
            ScrollState::Scrolling => {
                self.flush_frame();
                self.interrupt(now);
            }
            ScrollState::Animating => self.interrupt(now),
            ScrollState::Idle | ScrollState::Tracking => {}
        }
        if let Some(handle) = self.wheel.debounce.take() {
            self.tasks.cancel(handle);
        }
        self.input = None;
        self.wheel = WheelState::default();
        self.history.clear();
        self.state = ScrollState::Idle;
    }

    fn finalize(&mut self) {
        self.tasks.cancel_all();
        self.wheel.debounce = None;
        self.tracks = AxisPair::default();
        self.base = self.applied;
        self.engaged = false;
        self.state = if self.input.is_some() {
            ScrollState::Tracking
        } else {
            ScrollState::Idle
        };
        self.coordinator.release(self.id);
        tracing::debug!(
            target: "glide.scroller",
            instance = %self.id,
            x = self.base.x,
            y = self.base.y,
            "finalized"
        );

        let offsets = offsets_of(self.base);
        self.emit(ScrollEvent::Scroll(offsets));
        self.update_segments(true);
        self.emit(ScrollEvent::ScrollEnd(offsets));
    }

    fn update_segments(&mut self, finalized: bool) {
        if !self.config.snapping {
            return;
        }
        let next = AxisPair::from_fn(|axis| {
            if self.scrollable[axis] {
                self.metrics
                    .segment_at(axis, self.applied[axis], self.interval(axis))
            } else {
                0
            }
        });
        if next != self.active_segment {
            self.active_segment = next;
            self.emit(ScrollEvent::SegmentWillChange(indices_of(next)));
        }
        if finalized && next != self.base_segment {
            self.base_segment = next;
            self.emit(ScrollEvent::SegmentDidChange(indices_of(next)));
        }
    }

    // -- Position plumbing --------------------------------------------------

    fn apply_instant(&mut self, axis: Axis, position: f64) {
        let easing = self.planner.fling_curve();
        self.sink.apply_position(axis, position, 0.0, &easing);
        self.tracks[axis] = None;
        self.applied[axis] = position;
    }

    fn animate(&mut self, axis: Axis, position: f64, duration_ms: f64, easing: CubicBezier, now: f64) {
        if duration_ms <= 0.0 {
            self.apply_instant(axis, position);
            return;
        }
        let from = self.position_at(axis, now);
        self.sink.apply_position(axis, position, duration_ms, &easing);
        self.tracks[axis] = Some(AxisTrack {
            from,
            to: position,
            start_ms: now,
            duration_ms,
            easing,
        });
    }

    fn commit(&mut self, positions: AxisPair<Option<f64>>) {
        for axis in Axis::ALL {
            if let Some(position) = positions[axis] {
                self.tracks[axis] = None;
                self.applied[axis] = position;
            }
        }
    }

    fn flush_frame(&mut self) -> bool {
        if !self.config.coalesce_frames {
            return false;
        }
        let mut applied = false;
        for axis in Axis::ALL {
            if self.scrollable[axis] && self.frame_target[axis] != self.applied[axis] {
                self.apply_instant(axis, self.frame_target[axis]);
                applied = true;
            }
        }
        applied
    }

    fn refresh_scrollable(&mut self) {
        self.scrollable =
            AxisPair::from_fn(|axis| self.config.scrolling(axis) && self.metrics.has_range(axis));
    }

    fn interval(&self, axis: Axis) -> Option<f64> {
        self.grid.interval(axis, self.metrics.container(axis))
    }

    fn emit(&mut self, event: ScrollEvent) {
        self.events.emit(&event);
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.destroyed {
            Err(ScrollerError::Destroyed)
        } else {
            Ok(())
        }
    }
}

impl<S: PositionSink> Drop for Scroller<S> {
    fn drop(&mut self) {
        self.coordinator.release(self.id);
    }
}

impl<S: PositionSink> fmt::Debug for Scroller<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scroller")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("base", &self.base)
            .field("applied", &self.applied)
            .field("metrics", &self.metrics)
            .field("pending_tasks", &self.tasks.len())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

fn offsets_of(positions: AxisPair<f64>) -> ScrollOffsets {
    ScrollOffsets {
        scroll_left: 0.0 - positions.x,
        scroll_top: 0.0 - positions.y,
    }
}

fn indices_of(segments: AxisPair<u32>) -> SegmentIndices {
    SegmentIndices {
        segment_x: segments.x,
        segment_y: segments.y,
    }
}
