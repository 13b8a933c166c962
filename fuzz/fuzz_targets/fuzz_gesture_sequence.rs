#![no_main]

use arbitrary::Arbitrary;
use glide_core::{Axis, AxisPair, ScrollerConfig};
use glide_runtime::{
    Extents, ManualClock, RecordingSink, ScrollCoordinator, ScrollDuration, ScrollState,
    ScrollerBuilder, WheelDelta,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Down { x: i16, y: i16 },
    Move { x: i16, y: i16 },
    Up,
    Wheel { dx: i16, dy: i16 },
    Frame,
    Wait(u16),
    ScrollTo { left: u16, top: u16, ms: u16 },
    Resize { width: u16, height: u16 },
    SnapGrid { width: u8, height: u8 },
}

#[derive(Debug, Arbitrary)]
struct Session {
    bouncing: bool,
    snapping: bool,
    paginated: bool,
    coalesce: bool,
    ops: Vec<(u8, Op)>,
}

fn extents(width: u16, height: u16) -> Extents {
    Extents::new(
        AxisPair::new(320.0, 240.0),
        AxisPair::new(f64::from(width), f64::from(height)),
    )
}

fuzz_target!(|session: Session| {
    let lock = ScrollCoordinator::new();
    let clock = ManualClock::new(0.0);
    let config = ScrollerConfig {
        bouncing: session.bouncing,
        snapping: session.snapping,
        paginated_snap: session.snapping && session.paginated,
        coalesce_frames: session.coalesce,
        ..ScrollerConfig::default()
    };
    let Ok(mut s) = ScrollerBuilder::new(config)
        .extents(extents(1200, 900))
        .coordinator(&lock)
        .clock(clock.clone())
        .build(RecordingSink::new())
    else {
        return;
    };

    let mut t = 0.0;
    for (dt, op) in session.ops.into_iter().take(256) {
        t += f64::from(dt);
        clock.set(t);
        s.tick(t);
        match op {
            Op::Down { x, y } => {
                s.on_start(f64::from(x), f64::from(y), t);
            }
            Op::Move { x, y } => {
                s.on_move(f64::from(x), f64::from(y), t);
            }
            Op::Up => {
                s.on_end(t);
            }
            Op::Wheel { dx, dy } => {
                let delta = WheelDelta::Pixels {
                    dx: f64::from(dx),
                    dy: f64::from(dy),
                };
                s.on_wheel(delta, t);
            }
            Op::Frame => {
                s.render_frame();
            }
            Op::Wait(ms) => t += f64::from(ms),
            Op::ScrollTo { left, top, ms } => {
                let duration = ScrollDuration::Fixed(f64::from(ms));
                s.scroll_to(Some(f64::from(left)), Some(f64::from(top)), duration)
                    .expect("alive");
            }
            Op::Resize { width, height } => {
                s.update_dimensions(extents(width, height), false)
                    .expect("alive");
            }
            Op::SnapGrid { width, height } => {
                let _ = s.set_snap_grid(f64::from(width), f64::from(height));
            }
        }
    }

    t += 1.0;
    s.on_end(t);
    t += 1e7;
    clock.set(t);
    s.tick(t);

    assert_eq!(s.state(), ScrollState::Idle);
    assert_eq!(s.next_deadline(), None);
    assert_eq!(lock.holder(), None);
    for axis in Axis::ALL {
        let position = s.position(axis);
        let end = s.metrics().scroll_end(axis);
        assert!(
            (end..=0.0).contains(&position),
            "{axis} position {position} outside [{end}, 0]"
        );
    }
});
