//! End-to-end gesture and control scenarios against a recording sink.

use std::cell::RefCell;
use std::rc::Rc;

use glide_core::{Alignment, Axis, AxisPair, CubicBezier, ScrollerConfig};
use glide_runtime::{
    Extents, ManualClock, RecordingSink, ScrollCoordinator, ScrollDuration, ScrollEvent,
    ScrollEventKind, ScrollState, Scroller, ScrollerBuilder, ScrollerError, WheelDelta,
};

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

type EventLog = Rc<RefCell<Vec<ScrollEvent>>>;

struct Harness {
    scroller: Scroller<RecordingSink>,
    clock: ManualClock,
    events: EventLog,
}

impl Harness {
    fn vertical(config: ScrollerConfig, content: f64) -> Self {
        Self::with_coordinator(config, content, &ScrollCoordinator::new())
    }

    fn with_coordinator(
        config: ScrollerConfig,
        content: f64,
        coordinator: &ScrollCoordinator,
    ) -> Self {
        let clock = ManualClock::new(0.0);
        let mut scroller = ScrollerBuilder::new(ScrollerConfig {
            scrolling_x: false,
            ..config
        })
        .extents(extents(content))
        .coordinator(coordinator)
        .clock(clock.clone())
        .build(RecordingSink::new())
        .expect("valid config");

        let events: EventLog = Rc::default();
        for kind in ScrollEventKind::ALL {
            let log = Rc::clone(&events);
            scroller.subscribe(kind, move |event| log.borrow_mut().push(*event));
        }
        Self {
            scroller,
            clock,
            events,
        }
    }

    fn count(&self, kind: ScrollEventKind) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.kind() == kind)
            .count()
    }

    fn last(&self, kind: ScrollEventKind) -> Option<ScrollEvent> {
        self.events
            .borrow()
            .iter()
            .rev()
            .find(|e| e.kind() == kind)
            .copied()
    }

    fn reset_log(&mut self) {
        self.events.borrow_mut().clear();
        self.scroller.sink_mut().take();
    }

    /// Run every pending task in deadline order, returning the deadlines
    /// relative to `origin`.
    fn drain(&mut self, origin: f64) -> Vec<f64> {
        let mut deadlines = Vec::new();
        while let Some(due) = self.scroller.next_deadline() {
            deadlines.push(due - origin);
            self.clock.set(due);
            self.scroller.tick(due);
        }
        deadlines
    }

    /// Drag 200px down in 15 even steps over 150ms, ending at `t0 + 150`.
    fn drag_down(&mut self, t0: f64) {
        assert!(self.scroller.on_start(0.0, 0.0, t0));
        for i in 1..=15 {
            let f = f64::from(i) / 15.0;
            self.scroller.on_move(0.0, 200.0 * f, t0 + 150.0 * f);
        }
    }
}

fn extents(content: f64) -> Extents {
    Extents::new(
        AxisPair::new(300.0, 300.0),
        AxisPair::new(content, content),
    )
}

fn paged() -> ScrollerConfig {
    ScrollerConfig {
        snapping: true,
        paginated_snap: true,
        ..ScrollerConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Release
// ---------------------------------------------------------------------------

#[test]
fn drag_release_overshoots_start_edge_and_bounces_back() {
    let mut h = Harness::vertical(ScrollerConfig::default(), 1000.0);
    h.scroller
        .scroll_to(None, Some(250.0), ScrollDuration::Instant)
        .unwrap();
    h.reset_log();

    h.drag_down(1000.0);
    assert_eq!(h.scroller.state(), ScrollState::Scrolling);
    assert_eq!(h.scroller.position(Axis::Y), -50.0);
    assert_eq!(h.count(ScrollEventKind::ScrollStart), 1);
    h.scroller.sink_mut().take();

    assert!(h.scroller.on_end(1150.0));
    assert_eq!(h.scroller.state(), ScrollState::Animating);

    let deadlines = h.drain(1150.0);
    // Carry into the overshoot, bounce back, finalize.
    assert_eq!(deadlines.len(), 3, "{deadlines:?}");
    let total = deadlines[2];
    assert!(total > 350.0 && total < 1000.0, "total {total}ms");
    assert!((deadlines[2] - deadlines[1] - 350.0).abs() < 1e-6);

    let moves = h.scroller.sink_mut().take();
    assert_eq!(moves.len(), 3, "{moves:?}");
    assert_eq!(moves[0].position, 77.0);
    assert!(moves[0].duration_ms > 0.0);
    assert_eq!(moves[1].position, 77.0);
    assert_eq!(moves[1].easing, CubicBezier::DECELERATE);
    assert_eq!(moves[2].position, 0.0);
    assert_eq!(moves[2].easing, CubicBezier::BOUNCE);
    assert_eq!(moves[2].duration_ms, 350.0);

    assert_eq!(h.scroller.state(), ScrollState::Idle);
    assert_eq!(h.scroller.position(Axis::Y), 0.0);
    assert_eq!(h.scroller.base_position(Axis::Y), 0.0);
    assert_eq!(h.count(ScrollEventKind::ScrollEnd), 1);
    let end = h.last(ScrollEventKind::ScrollEnd).and_then(|e| e.offsets());
    assert_eq!(end.map(|o| o.scroll_top), Some(0.0));
}

#[test]
fn slow_release_on_page_settles_back_to_page_edge() {
    let mut h = Harness::vertical(paged(), 1100.0);
    assert_eq!(h.scroller.scroll_height(), 1200.0);
    h.scroller
        .scroll_to(None, Some(600.0), ScrollDuration::Instant)
        .unwrap();
    assert_eq!(h.scroller.committed_segment().y, 2);
    h.reset_log();

    h.scroller.on_start(0.0, 0.0, 0.0);
    h.scroller.on_move(0.0, -10.0, 1000.0);
    h.scroller.on_move(0.0, -20.0, 6000.0);
    assert_eq!(h.scroller.position(Axis::Y), -620.0);
    h.scroller.on_end(6000.0);

    let settle = *h.scroller.sink().last(Axis::Y).unwrap();
    assert_eq!(settle.position, -600.0);
    assert_eq!(settle.duration_ms, 350.0);
    assert_eq!(h.drain(6000.0), vec![350.0]);

    assert_eq!(h.scroller.scroll_top(), 600.0);
    assert_eq!(h.scroller.committed_segment().y, 2);
    assert_eq!(h.count(ScrollEventKind::SegmentDidChange), 0);
    assert_eq!(h.count(ScrollEventKind::ScrollEnd), 1);
}

#[test]
fn fast_flick_on_page_advances_one_page() {
    let mut h = Harness::vertical(paged(), 1100.0);
    h.scroller
        .scroll_to(None, Some(600.0), ScrollDuration::Instant)
        .unwrap();
    h.reset_log();

    h.scroller.on_start(0.0, 0.0, 0.0);
    h.scroller.on_move(0.0, -20.0, 10.0);
    h.scroller.on_move(0.0, -40.0, 20.0);
    h.scroller.on_end(20.0);
    h.drain(20.0);

    assert_eq!(h.scroller.position(Axis::Y), -900.0);
    assert_eq!(h.scroller.current_segment().y, 3);
    assert_eq!(h.scroller.committed_segment().y, 3);
    assert_eq!(h.count(ScrollEventKind::SegmentDidChange), 1);
    let did = h
        .last(ScrollEventKind::SegmentDidChange)
        .and_then(|e| e.segments());
    assert_eq!(did.map(|s| s.segment_y), Some(3));
}

#[test]
fn hard_fling_rests_exactly_on_fractional_end() {
    let clock = ManualClock::new(0.0);
    let sizes = Extents::new(
        AxisPair::new(916.17, 916.17),
        AxisPair::new(1767.9, 1767.9),
    );
    let mut s = ScrollerBuilder::new(ScrollerConfig {
        scrolling_x: false,
        snapping: true,
        bouncing: false,
        ..ScrollerConfig::default()
    })
    .extents(sizes)
    .clock(clock.clone())
    .build(RecordingSink::new())
    .expect("valid config");
    let ends = Rc::new(RefCell::new(0u32));
    let seen = Rc::clone(&ends);
    s.subscribe(ScrollEventKind::ScrollEnd, move |_| *seen.borrow_mut() += 1);

    s.on_start(0.0, 0.0, 0.0);
    s.on_move(0.0, -30.0, 5.0);
    s.on_move(0.0, -60.0, 10.0);
    s.on_end(10.0);
    while let Some(due) = s.next_deadline() {
        clock.set(due);
        s.tick(due);
    }

    let end = s.metrics().scroll_end(Axis::Y);
    assert_eq!(s.position(Axis::Y), end);
    assert_eq!(s.base_position(Axis::Y), end);
    assert_eq!(*ends.borrow(), 1);

    // Nothing is out of place, so the same extents start no settle.
    s.sink_mut().take();
    s.update_dimensions(sizes, false).unwrap();
    assert_eq!(s.state(), ScrollState::Idle);
    assert!(s.sink().instructions().is_empty());
    assert_eq!(*ends.borrow(), 1);
}

#[test]
fn crossing_a_segment_mid_drag_announces_it_before_release() {
    let mut h = Harness::vertical(
        ScrollerConfig {
            snapping: true,
            ..ScrollerConfig::default()
        },
        1000.0,
    );
    h.scroller.on_start(0.0, 0.0, 0.0);
    for i in 1..=10 {
        let f = f64::from(i) / 10.0;
        h.scroller.on_move(0.0, -200.0 * f, 1000.0 * f);
    }
    assert_eq!(h.scroller.state(), ScrollState::Scrolling);
    assert_eq!(h.scroller.position(Axis::Y), -200.0);

    assert_eq!(h.count(ScrollEventKind::SegmentWillChange), 1);
    let will = h
        .last(ScrollEventKind::SegmentWillChange)
        .and_then(|e| e.segments());
    assert_eq!(will.map(|s| (s.segment_x, s.segment_y)), Some((0, 1)));
    assert_eq!(h.scroller.current_segment().y, 1);
    assert_eq!(h.scroller.committed_segment().y, 0);
    assert_eq!(h.count(ScrollEventKind::SegmentDidChange), 0);

    h.scroller.on_end(1000.0);
    h.drain(1000.0);
    assert_eq!(h.scroller.state(), ScrollState::Idle);
    assert_eq!(h.count(ScrollEventKind::SegmentDidChange), 1);
    let did = h
        .last(ScrollEventKind::SegmentDidChange)
        .and_then(|e| e.segments());
    assert_eq!(did.map(|s| s.segment_y), Some(h.scroller.current_segment().y));
    assert_eq!(h.scroller.committed_segment(), h.scroller.current_segment());
}

#[test]
fn pointer_down_mid_fling_freezes_truncated_position() {
    let mut h = Harness::vertical(ScrollerConfig::default(), 1000.0);
    h.scroller
        .scroll_to(None, Some(250.0), ScrollDuration::Instant)
        .unwrap();
    h.reset_log();
    h.drag_down(1000.0);
    h.scroller.on_end(1150.0);
    assert!(h.scroller.next_deadline().is_some());

    assert!(h.scroller.on_start(0.0, 0.0, 1250.0));
    assert_eq!(h.scroller.state(), ScrollState::Tracking);
    assert_eq!(h.scroller.next_deadline(), None);

    let frozen = h.scroller.base_position(Axis::Y);
    assert!((-50.0..=77.0).contains(&frozen), "{frozen}");
    assert_eq!(frozen, frozen.trunc());
    assert_eq!(h.scroller.position(Axis::Y), frozen);
    let shown = h.scroller.sink().last(Axis::Y).unwrap();
    assert_eq!((shown.position, shown.duration_ms), (frozen, 0.0));
    // Nothing left over from the fling runs later.
    assert_eq!(h.scroller.tick(1e9), 0);

    h.scroller.on_end(1260.0);
    h.drain(1260.0);
    let resting = h.scroller.position(Axis::Y);
    assert!((-700.0..=0.0).contains(&resting), "{resting}");
    assert_eq!(h.scroller.state(), ScrollState::Idle);
    // One motion from the drag to rest, interrupted or not.
    assert_eq!(h.count(ScrollEventKind::ScrollStart), 1);
    assert_eq!(h.count(ScrollEventKind::ScrollEnd), 1);
}

// ---------------------------------------------------------------------------
// Wheel
// ---------------------------------------------------------------------------

#[test]
fn wheel_ticks_settle_after_quiet_period() {
    let mut h = Harness::vertical(ScrollerConfig::default(), 1000.0);
    assert!(h.scroller.on_wheel(WheelDelta::Legacy { delta: -120.0 }, 0.0));
    assert_eq!(h.scroller.state(), ScrollState::Scrolling);
    assert_eq!(h.scroller.position(Axis::Y), -60.0);

    h.scroller.on_wheel(WheelDelta::Legacy { delta: -120.0 }, 50.0);
    assert_eq!(h.scroller.position(Axis::Y), -120.0);
    assert_eq!(h.scroller.next_deadline(), Some(350.0));

    assert_eq!(h.scroller.tick(349.0), 0);
    assert_eq!(h.scroller.state(), ScrollState::Scrolling);
    assert_eq!(h.scroller.tick(350.0), 1);
    assert_eq!(h.scroller.state(), ScrollState::Idle);
    assert_eq!(h.scroller.scroll_top(), 120.0);
    assert_eq!(h.count(ScrollEventKind::ScrollStart), 1);
    assert_eq!(h.count(ScrollEventKind::ScrollEnd), 1);
}

#[test]
fn wheel_on_snapping_scroller_settles_to_grid() {
    let mut h = Harness::vertical(
        ScrollerConfig {
            snapping: true,
            ..ScrollerConfig::default()
        },
        1200.0,
    );
    h.scroller
        .on_wheel(WheelDelta::Pixels { dx: 0.0, dy: -240.0 }, 0.0);
    assert_eq!(h.scroller.position(Axis::Y), -120.0);

    let deadlines = h.drain(0.0);
    assert_eq!(deadlines, vec![300.0, 650.0]);
    assert_eq!(h.scroller.position(Axis::Y), 0.0);
    assert_eq!(h.scroller.state(), ScrollState::Idle);
}

#[test]
fn vertical_wheel_drives_horizontal_only_scroller() {
    let mut scroller = ScrollerBuilder::new(ScrollerConfig {
        scrolling_y: false,
        ..ScrollerConfig::default()
    })
    .extents(extents(1000.0))
    .clock(ManualClock::new(0.0))
    .build(RecordingSink::new())
    .unwrap();

    scroller.on_wheel(WheelDelta::Legacy { delta: -200.0 }, 0.0);
    assert_eq!(scroller.position(Axis::X), -100.0);
    assert_eq!(scroller.position(Axis::Y), 0.0);
}

// ---------------------------------------------------------------------------
// Coordination
// ---------------------------------------------------------------------------

#[test]
fn nested_scroller_waits_for_lock() {
    let lock = ScrollCoordinator::new();
    let mut inner = Harness::with_coordinator(ScrollerConfig::default(), 1000.0, &lock);
    let mut outer = Harness::with_coordinator(ScrollerConfig::default(), 1000.0, &lock);

    inner.scroller.on_start(0.0, 0.0, 0.0);
    assert!(inner.scroller.on_move(0.0, -50.0, 10.0));
    assert_eq!(lock.holder(), Some(inner.scroller.id()));

    outer.scroller.on_start(0.0, 0.0, 0.0);
    assert!(!outer.scroller.on_move(0.0, -50.0, 10.0));
    assert_eq!(outer.scroller.state(), ScrollState::Tracking);
    assert_eq!(outer.scroller.position(Axis::Y), 0.0);

    // Held still, so the release has no velocity and nothing to settle.
    inner.scroller.on_move(0.0, -50.0, 500.0);
    inner.scroller.on_end(500.0);
    assert_eq!(inner.scroller.state(), ScrollState::Idle);
    assert_eq!(lock.holder(), None);

    assert!(outer.scroller.on_move(0.0, -60.0, 600.0));
    assert_eq!(lock.holder(), Some(outer.scroller.id()));
    assert_eq!(outer.scroller.position(Axis::Y), -60.0);
    assert_eq!(outer.count(ScrollEventKind::ScrollStart), 1);
}

#[test]
fn drag_past_edge_without_bouncing_is_left_for_outer_scroller() {
    let lock = ScrollCoordinator::new();
    let mut inner = Harness::with_coordinator(
        ScrollerConfig {
            bouncing: false,
            ..ScrollerConfig::default()
        },
        1000.0,
        &lock,
    );

    inner.scroller.on_start(0.0, 0.0, 0.0);
    assert!(!inner.scroller.on_move(0.0, 40.0, 10.0));
    assert_eq!(inner.scroller.state(), ScrollState::Tracking);
    assert_eq!(lock.holder(), None);

    assert!(inner.scroller.on_move(0.0, -40.0, 20.0));
    assert_eq!(inner.scroller.state(), ScrollState::Scrolling);
    assert_eq!(inner.scroller.position(Axis::Y), -40.0);
}

#[test]
fn programmatic_scroll_jumps_while_another_scroller_moves() {
    let lock = ScrollCoordinator::new();
    let mut a = Harness::with_coordinator(ScrollerConfig::default(), 1000.0, &lock);
    let mut b = Harness::with_coordinator(ScrollerConfig::default(), 1000.0, &lock);

    a.scroller.on_start(0.0, 0.0, 0.0);
    a.scroller.on_move(0.0, -30.0, 10.0);
    assert_eq!(lock.holder(), Some(a.scroller.id()));

    b.scroller
        .scroll_to(None, Some(400.0), ScrollDuration::Fixed(300.0))
        .unwrap();
    assert_eq!(b.scroller.position(Axis::Y), -400.0);
    assert_eq!(b.scroller.state(), ScrollState::Idle);
    assert_eq!(b.scroller.next_deadline(), None);
    assert_eq!(b.count(ScrollEventKind::ScrollEnd), 1);
    assert_eq!(lock.holder(), Some(a.scroller.id()));
}

#[test]
fn destroy_and_drop_release_the_lock() {
    let lock = ScrollCoordinator::new();
    let mut a = Harness::with_coordinator(ScrollerConfig::default(), 1000.0, &lock);
    a.scroller.on_start(0.0, 0.0, 0.0);
    a.scroller.on_move(0.0, -30.0, 10.0);
    a.scroller.destroy().unwrap();
    assert_eq!(lock.holder(), None);
    assert_eq!(a.count(ScrollEventKind::ScrollEnd), 0);

    {
        let mut b = Harness::with_coordinator(ScrollerConfig::default(), 1000.0, &lock);
        b.scroller.on_start(0.0, 0.0, 0.0);
        b.scroller.on_move(0.0, -30.0, 10.0);
        assert_eq!(lock.holder(), Some(b.scroller.id()));
    }
    assert_eq!(lock.holder(), None);
}

// ---------------------------------------------------------------------------
// Control surface
// ---------------------------------------------------------------------------

#[test]
fn auto_duration_scroll_animates_then_finalizes() {
    let mut h = Harness::vertical(ScrollerConfig::default(), 1000.0);
    h.scroller
        .scroll_to(None, Some(400.0), ScrollDuration::Auto)
        .unwrap();

    let step = *h.scroller.sink().last(Axis::Y).unwrap();
    assert_eq!(step.position, -400.0);
    assert_eq!(step.duration_ms, 400.0);
    assert_eq!(h.scroller.state(), ScrollState::Animating);
    assert_eq!(h.scroller.next_deadline(), Some(400.0));
    assert_eq!(h.count(ScrollEventKind::ScrollEnd), 0);

    h.clock.set(400.0);
    assert_eq!(h.scroller.tick_now(), 1);
    assert_eq!(h.scroller.scroll_top(), 400.0);
    assert_eq!(h.scroller.state(), ScrollState::Idle);
    assert_eq!(h.count(ScrollEventKind::ScrollEnd), 1);

    h.scroller.scroll_by(0.0, 100.0, ScrollDuration::Instant).unwrap();
    assert_eq!(h.scroller.scroll_top(), 500.0);
    // Offsets past the end clamp.
    h.scroller.scroll_by(0.0, 5000.0, ScrollDuration::Instant).unwrap();
    assert_eq!(h.scroller.scroll_top(), 700.0);
}

#[test]
fn end_alignment_follows_growing_content() {
    let mut h = Harness::vertical(
        ScrollerConfig {
            base_alignment_y: Alignment::End,
            ..ScrollerConfig::default()
        },
        1000.0,
    );
    assert_eq!(h.scroller.scroll_top(), 700.0);

    h.scroller.update_dimensions(extents(1500.0), false).unwrap();
    assert_eq!(h.scroller.scroll_top(), 1200.0);

    h.scroller
        .scroll_to(None, Some(1200.0), ScrollDuration::Instant)
        .unwrap();
    h.scroller.update_dimensions(extents(2000.0), false).unwrap();
    assert_eq!(h.scroller.scroll_top(), 1700.0);

    h.scroller
        .scroll_to(None, Some(100.0), ScrollDuration::Instant)
        .unwrap();
    h.scroller.update_dimensions(extents(2500.0), false).unwrap();
    assert_eq!(h.scroller.scroll_top(), 100.0);
}

#[test]
fn centered_position_stays_centered() {
    let mut h = Harness::vertical(
        ScrollerConfig {
            base_alignment_y: Alignment::Center,
            ..ScrollerConfig::default()
        },
        1000.0,
    );
    assert_eq!(h.scroller.scroll_top(), 350.0);

    h.scroller
        .scroll_to(None, Some(350.0), ScrollDuration::Instant)
        .unwrap();
    h.scroller.update_dimensions(extents(1300.0), false).unwrap();
    assert_eq!(h.scroller.scroll_top(), 500.0);
}

#[test]
fn shrinking_content_pulls_position_back_into_bounds() {
    let mut h = Harness::vertical(ScrollerConfig::default(), 1000.0);
    h.scroller
        .scroll_to(None, Some(600.0), ScrollDuration::Instant)
        .unwrap();
    h.reset_log();

    h.scroller.update_dimensions(extents(500.0), false).unwrap();
    let settle = *h.scroller.sink().last(Axis::Y).unwrap();
    assert_eq!((settle.position, settle.duration_ms), (-200.0, 350.0));
    h.drain(0.0);
    assert_eq!(h.scroller.scroll_top(), 200.0);
    assert_eq!(h.count(ScrollEventKind::ScrollEnd), 1);

    // The same extents again change nothing.
    h.reset_log();
    h.scroller.update_dimensions(extents(500.0), false).unwrap();
    assert!(h.scroller.sink().instructions().is_empty());
    assert_eq!(h.count(ScrollEventKind::ScrollEnd), 0);
}

#[test]
fn snap_grid_rejects_bad_sizes_and_conforms_content() {
    let mut h = Harness::vertical(
        ScrollerConfig {
            snapping: true,
            ..ScrollerConfig::default()
        },
        1000.0,
    );
    assert_eq!(h.scroller.scroll_height(), 1200.0);

    let err = h.scroller.set_snap_grid(0.0, 100.0).unwrap_err();
    assert!(matches!(err, ScrollerError::InvalidSnapSize { axis: Axis::X, value } if value == 0.0));
    let err = h.scroller.set_snap_grid(100.0, f64::NAN).unwrap_err();
    assert!(matches!(err, ScrollerError::InvalidSnapSize { axis: Axis::Y, .. }));

    h.scroller.set_snap_grid(100.0, 100.0).unwrap();
    assert_eq!(h.scroller.scroll_height(), 1000.0);
    assert_eq!(h.scroller.segment_count().map(|c| c.y), Some(10));

    h.scroller
        .scroll_to(None, Some(130.0), ScrollDuration::Instant)
        .unwrap();
    assert_eq!(h.scroller.scroll_top(), 100.0);

    h.scroller.set_snap_grid(250.0, 250.0).unwrap();
    assert_eq!(h.scroller.state(), ScrollState::Animating);
    h.drain(0.0);
    assert_eq!(h.scroller.scroll_top(), 0.0);
    assert_eq!(h.scroller.segment_count().map(|c| c.y), Some(4));
}

#[test]
fn coalesced_frames_apply_on_render() {
    let mut h = Harness::vertical(
        ScrollerConfig {
            coalesce_frames: true,
            ..ScrollerConfig::default()
        },
        1000.0,
    );
    h.scroller.on_start(0.0, 0.0, 0.0);
    assert!(h.scroller.on_move(0.0, -30.0, 10.0));
    assert_eq!(h.scroller.position(Axis::Y), 0.0);

    assert!(h.scroller.render_frame());
    assert_eq!(h.scroller.position(Axis::Y), -30.0);
    assert!(!h.scroller.render_frame());

    h.scroller.on_move(0.0, -45.0, 20.0);
    h.scroller.on_end(20.0);
    // Release flushes the pending frame before planning.
    let flushed = h
        .scroller
        .sink()
        .instructions()
        .iter()
        .any(|i| i.position == -45.0 && i.duration_ms == 0.0);
    assert!(flushed);
}
