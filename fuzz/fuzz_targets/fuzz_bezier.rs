#![no_main]

use glide_core::CubicBezier;
use libfuzzer_sys::fuzz_target;

/// Map an arbitrary float into `[0, 1]`, or reject it.
fn unit(v: f64) -> Option<f64> {
    v.is_finite().then(|| v.abs().fract())
}

fuzz_target!(|input: [f64; 6]| {
    let [p1x, p1y, p2x, p2y, at, eps] = input;
    let (Some(p1x), Some(p1y), Some(p2x), Some(p2y), Some(at)) =
        (unit(p1x), unit(p1y), unit(p2x), unit(p2y), unit(at))
    else {
        return;
    };
    let curve = CubicBezier::new(p1x, p1y, p2x, p2y).expect("unit control points");

    // Progress is defined everywhere and stays in the unit square for
    // curves whose control points do.
    let progress = curve.progress_at(at);
    assert!(progress.is_finite());
    assert!((-1e-9..=1.0 + 1e-9).contains(&progress), "progress {progress}");

    let point = curve.point_at(at).expect("t in range");
    assert!(point.x.is_finite() && point.y.is_finite());

    // Arbitrary epsilons either work or fail cleanly.
    let _ = curve.t_for_x(at, eps);
    let _ = curve.t_for_y(at, eps);

    // Splitting never panics; when it succeeds both halves are unit curves.
    if let Ok((left, right)) = curve.divide_at_t(at) {
        for half in [left, right] {
            for v in half.to_array() {
                assert!((0.0..=1.0).contains(&v), "{half:?}");
            }
        }
    }
    let _ = curve.divide_at_x(at, 1e-6);
    let _ = curve.divide_at_y(at, 1e-6);
});
