#![no_main]

use arbitrary::Arbitrary;
use glide_core::{
    Axis, AxisPair, AxisState, Metrics, MotionPlanner, PlannerConfig, SnapGrid, SnapResolver,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Release {
    container: u16,
    content: u16,
    interval: Option<u16>,
    position: f64,
    velocity: Option<f64>,
    base_segment: u8,
    bouncing: bool,
    snapping: bool,
    paginated: bool,
}

fuzz_target!(|r: Release| {
    let container = f64::from(r.container.max(1));
    let mut metrics = Metrics::new(
        AxisPair::new(container, container),
        AxisPair::new(f64::from(r.content), f64::from(r.content)),
    );
    let mut grid = SnapGrid::new(None, r.interval.map(f64::from));
    grid.follow_container(metrics.container_extents());
    if r.snapping {
        metrics.conform_to_grid(Axis::Y, grid.interval(Axis::Y, container));
    }
    let resolver = SnapResolver::new(&metrics, &grid, r.snapping);
    let planner = MotionPlanner::new(PlannerConfig {
        bouncing: r.bouncing,
        snapping: r.snapping,
        paginated: r.snapping && r.paginated,
        ..PlannerConfig::default()
    });

    let state = AxisState {
        axis: Axis::Y,
        position: r.position,
        velocity: r.velocity,
        base_segment: u32::from(r.base_segment),
    };
    let plan = planner.plan_release(&[state], &resolver);

    // Whatever comes out is finite and, for a finite start, rests in bounds.
    assert!(plan.duration_ms().is_finite());
    for step in plan.plans() {
        assert!(step.target.is_finite(), "{plan:?}");
        assert!(step.duration_ms >= 0.0 && step.delay_ms >= 0.0, "{plan:?}");
    }
    if r.position.is_finite() {
        if let Some(rest) = plan.final_position(Axis::Y) {
            let end = metrics.scroll_end(Axis::Y);
            assert!((end..=0.0).contains(&rest), "rest {rest} outside [{end}, 0]");
        }
    }
});
