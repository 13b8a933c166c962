#![forbid(unsafe_code)]

//! Release planning: turn a release velocity into per-axis animation plans.
//!
//! # Model
//!
//! Speed decays by `friction` every millisecond until it drops below
//! `minimum_speed`, so a fling with speed `v` lasts
//! `ln(min / |v|) / ln(friction)` ms and covers the geometric sum
//! `v (1 - friction^(duration + 1)) / (1 - friction)` px.
//!
//! The raw fling target is then corrected by, in order: pagination (at most
//! one grid interval per release), grid residual (non-paginated snapping),
//! and the scroll bounds. The correction ("bounce distance") is folded into
//! the trajectory in one of three ways:
//!
//! - **Edge overshoot** (bouncing on, real fling): the fling curve is cut
//!   where the raw trajectory crosses the bound, the excess is compressed to
//!   an eighth (at most half the container), and a bounce stroke returns to
//!   the bound.
//! - **Reversal** (the corrected target lies behind the fling's direction):
//!   the fling is halved and a bounce of `sqrt(|residual|) * 50` ms follows
//!   near its tail.
//! - **Truncate or extend**: the fling is retargeted; when shorter, its curve
//!   is cut at the time the original would have covered the new distance.
//!
//! # Invariants
//!
//! 1. Every emitted plan has a finite target and a non-negative duration and
//!    delay.
//! 2. `AxisMotion::final_position` is where the axis rests once
//!    `settle_ms` has elapsed.
//! 3. An axis that would not move is omitted.

use crate::bezier::CubicBezier;
use crate::geometry::Axis;
use crate::snap::SnapResolver;

/// Overshoot past a bound is divided by this before being shown.
const OVERSHOOT_COMPRESSION: f64 = 8.0;
/// Share of the remaining fling time spent on the overshoot stroke.
const OVERSHOOT_TIME_DIVISOR: f64 = 6.0;
/// Reversal bounce duration per sqrt(px) of residual.
const REVERSAL_MS_PER_SQRT_PX: f64 = 50.0;
/// Point in a reversal fling at which the bounce starts.
const REVERSAL_BOUNCE_START: f64 = 0.97;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Physics and snapping parameters consumed by [`MotionPlanner`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Per-millisecond speed retention (default: 0.998).
    pub friction: f64,
    /// Speed (px/ms) below which motion stops (default: 0.01).
    pub minimum_speed: f64,
    /// Overshoot edges and bounce back (default: true).
    pub bouncing: bool,
    /// Rest on grid lines (default: false).
    pub snapping: bool,
    /// At most one grid interval per release; implies snapping (default: false).
    pub paginated: bool,
    /// Cap on a retargeted paginated fling (default: 1000ms).
    pub max_fling_duration_ms: f64,
    /// Floor on a retargeted paginated fling with distance left (default: 16ms).
    pub min_paged_fling_duration_ms: f64,
    /// Corrective settle duration (default: 350ms).
    pub settle_duration_ms: f64,
    /// Edge bounce duration (default: 350ms).
    pub bounce_duration_ms: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            friction: 0.998,
            minimum_speed: 0.01,
            bouncing: true,
            snapping: false,
            paginated: false,
            max_fling_duration_ms: 1000.0,
            min_paged_fling_duration_ms: 16.0,
            settle_duration_ms: 350.0,
            bounce_duration_ms: 350.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Plan types
// ---------------------------------------------------------------------------

/// One instruction for the renderer: animate `axis` to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationPlan {
    pub axis: Axis,
    pub target: f64,
    pub duration_ms: f64,
    pub easing: CubicBezier,
    /// Time after plan emission at which the animation starts.
    pub delay_ms: f64,
}

/// The plans for one axis and when that axis comes to rest.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisMotion {
    pub axis: Axis,
    /// In start order; the first plan always has zero delay.
    pub plans: Vec<AnimationPlan>,
    pub final_position: f64,
    pub settle_ms: f64,
}

/// Which path produced a [`MotionPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    /// Momentum from the release velocity.
    Fling,
    /// Corrective move onto the grid or back inside the bounds.
    Settle,
}

/// Planner output for a whole release.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionPlan {
    pub kind: MotionKind,
    pub axes: Vec<AxisMotion>,
}

impl MotionPlan {
    fn settle(axes: Vec<AxisMotion>) -> Self {
        Self {
            kind: MotionKind::Settle,
            axes,
        }
    }

    /// No axis needs to move; the gesture can finalize immediately.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Time until every axis is at rest.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.axes.iter().map(|m| m.settle_ms).fold(0.0, f64::max)
    }

    /// Resting position of `axis`, if it moves.
    #[must_use]
    pub fn final_position(&self, axis: Axis) -> Option<f64> {
        self.axes
            .iter()
            .find(|m| m.axis == axis)
            .map(|m| m.final_position)
    }

    /// Every plan across all axes.
    pub fn plans(&self) -> impl Iterator<Item = &AnimationPlan> {
        self.axes.iter().flat_map(|m| m.plans.iter())
    }
}

/// Per-axis input to release planning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisState {
    pub axis: Axis,
    /// Live position at release.
    pub position: f64,
    /// Release speed in px/ms; `None` when no fling is possible.
    pub velocity: Option<f64>,
    /// Committed segment, consulted by pagination.
    pub base_segment: u32,
}

/// Distance and duration of a friction-decayed fling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fling {
    pub duration_ms: f64,
    pub distance: f64,
}

// ---------------------------------------------------------------------------
// MotionPlanner
// ---------------------------------------------------------------------------

/// Computes fling, bounce and settle plans.
#[derive(Debug, Clone)]
pub struct MotionPlanner {
    config: PlannerConfig,
    fling_curve: CubicBezier,
}

impl Default for MotionPlanner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl MotionPlanner {
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            fling_curve: CubicBezier::truncated_fling(),
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Easing used for flings and settles.
    #[inline]
    #[must_use]
    pub fn fling_curve(&self) -> CubicBezier {
        self.fling_curve
    }

    /// Friction-decayed fling for `velocity`; zero below the minimum speed.
    #[must_use]
    pub fn fling(&self, velocity: f64) -> Fling {
        let PlannerConfig {
            friction,
            minimum_speed,
            ..
        } = self.config;
        if !velocity.is_finite() || velocity.abs() < minimum_speed {
            return Fling::default();
        }
        let duration_ms = (minimum_speed / velocity.abs()).ln() / friction.ln();
        let distance = velocity * (1.0 - friction.powf(duration_ms + 1.0)) / (1.0 - friction);
        if !duration_ms.is_finite() || !distance.is_finite() {
            return Fling::default();
        }
        Fling {
            duration_ms,
            distance,
        }
    }

    /// Plan a release: fling every eligible axis, or settle when none moves.
    #[must_use]
    pub fn plan_release(&self, states: &[AxisState], resolver: &SnapResolver<'_>) -> MotionPlan {
        let axes: Vec<AxisMotion> = states
            .iter()
            .filter_map(|state| self.plan_axis(state, resolver))
            .collect();
        if !axes.is_empty() {
            return MotionPlan {
                kind: MotionKind::Fling,
                axes,
            };
        }
        self.plan_settle(states.iter().map(|s| (s.axis, s.position)), resolver)
    }

    /// Move each off-grid or out-of-bounds axis to its resolved position.
    #[must_use]
    pub fn plan_settle(
        &self,
        positions: impl IntoIterator<Item = (Axis, f64)>,
        resolver: &SnapResolver<'_>,
    ) -> MotionPlan {
        let duration_ms = self.config.settle_duration_ms;
        let axes = positions
            .into_iter()
            .filter_map(|(axis, position)| {
                let target = resolver.resolve(position, axis);
                if target == position || !target.is_finite() {
                    return None;
                }
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    target: "glide.planner",
                    axis = %axis,
                    from = position,
                    to = target,
                    "settle"
                );
                Some(AxisMotion {
                    axis,
                    plans: vec![AnimationPlan {
                        axis,
                        target,
                        duration_ms,
                        easing: self.fling_curve,
                        delay_ms: 0.0,
                    }],
                    final_position: target,
                    settle_ms: duration_ms,
                })
            })
            .collect();
        MotionPlan::settle(axes)
    }

    /// Plan the fling for one axis, or `None` if it would not move.
    #[must_use]
    pub fn plan_axis(&self, state: &AxisState, resolver: &SnapResolver<'_>) -> Option<AxisMotion> {
        let axis = state.axis;
        let velocity = state.velocity?;
        let last = state.position;
        if !last.is_finite() {
            return None;
        }
        let metrics = resolver.metrics();
        let scroll_end = metrics.scroll_end(axis);
        let container = metrics.container(axis);

        let Fling {
            duration_ms: mut fling_duration,
            distance: mut fling_distance,
        } = self.fling(velocity);
        let mut fling_position = (last + fling_distance).floor();
        let mut curve = self.fling_curve;
        let mut bounce_distance = 0.0;
        let mut bounds_bounce = false;
        // Exact resting point when the fling is pulled back onto an edge or grid line.
        let mut rest = None;

        if let Some(interval) = resolver.interval(axis) {
            if self.config.paginated {
                let raw_segment = -last / interval;
                let start_segment = if f64::from(state.base_segment) < raw_segment {
                    raw_segment.floor()
                } else {
                    raw_segment.ceil()
                };
                let near_edge = -(start_segment - 1.0) * interval;
                let far_edge = -(start_segment + 1.0) * interval;

                if fling_position > near_edge {
                    bounce_distance = fling_position - near_edge;
                    rest = Some(near_edge);
                } else if fling_position < far_edge {
                    bounce_distance = fling_position - far_edge;
                    rest = Some(far_edge);
                } else if velocity.abs() > self.config.minimum_speed {
                    fling_position = if velocity < 0.0 {
                        (last / interval).floor() * interval
                    } else {
                        (last / interval).ceil() * interval
                    };
                    let remaining = fling_position - last;
                    fling_duration = (fling_duration * remaining / fling_distance)
                        .min(self.config.max_fling_duration_ms);
                    if remaining != 0.0 {
                        fling_duration = fling_duration.max(self.config.min_paged_fling_duration_ms);
                    }
                }
            } else if let Some(line) = resolver.grid_line(fling_position, axis) {
                bounce_distance = fling_position - line;
                rest = Some(line);
            }
        }

        if fling_position - bounce_distance > 0.0 {
            bounce_distance = fling_position;
            bounds_bounce = true;
            rest = Some(0.0);
        } else if fling_position - bounce_distance < scroll_end {
            bounce_distance = fling_position - scroll_end;
            bounds_bounce = true;
            rest = Some(scroll_end);
        }
        let rest = rest.unwrap_or(fling_position - bounce_distance);

        let mut plans = Vec::with_capacity(3);
        let mut bounce_target = rest;
        let mut bounce_duration = self.config.bounce_duration_ms;
        let mut bounce_delay = 0.0;

        if bounds_bounce && self.config.bouncing && fling_distance != 0.0 {
            fling_distance = fling_distance.floor();
            let beyond = if fling_position > 0.0 {
                fling_position - last.max(0.0)
            } else {
                fling_position - last.min(scroll_end)
            };
            let within = fling_distance - beyond;
            let epsilon = 1.0 / fling_duration.max(1.0);
            let crossing = time_fraction_at_progress(&curve, within / fling_distance, epsilon);

            let half_container = (container / 2.0).floor();
            let overshoot = (beyond / OVERSHOOT_COMPRESSION)
                .ceil()
                .clamp(-half_container, half_container);
            let overshoot_position = last + within + overshoot;
            bounce_target = if fling_position > 0.0 { 0.0 } else { scroll_end };

            if crossing == 0.0 {
                fling_duration /= OVERSHOOT_TIME_DIVISOR;
                bounce_delay = fling_duration;
            } else {
                bounce_delay =
                    (crossing + (1.0 - crossing) / OVERSHOOT_TIME_DIVISOR) * fling_duration;
                plans.push(AnimationPlan {
                    axis,
                    target: overshoot_position,
                    duration_ms: (1.0 - crossing) * fling_duration / OVERSHOOT_TIME_DIVISOR,
                    easing: CubicBezier::DECELERATE,
                    delay_ms: fling_duration * crossing,
                });
                if let Ok((head, _)) = curve.divide_at_x(bounce_delay / fling_duration, epsilon) {
                    curve = head;
                }
                fling_duration = bounce_delay;
            }
            fling_position = overshoot_position;
        } else if (fling_distance < 0.0 && bounce_distance < fling_distance)
            || (fling_distance > 0.0 && bounce_distance > fling_distance)
        {
            let half = (fling_distance / 2.0).floor();
            fling_position -= half;
            bounce_distance -= half;
            bounce_duration = bounce_distance.abs().sqrt() * REVERSAL_MS_PER_SQRT_PX;
            bounce_target = rest;
            fling_duration = self.config.bounce_duration_ms;
            bounce_delay = fling_duration * REVERSAL_BOUNCE_START;
        } else {
            fling_position = rest;
            if fling_distance == 0.0 {
                fling_duration = self.config.settle_duration_ms;
            } else if (fling_distance > 0.0 && bounce_distance > 0.0)
                || (fling_distance < 0.0 && bounce_distance < 0.0)
            {
                let epsilon = 1.0 / fling_duration.max(1.0);
                let covered = (fling_distance.abs() - bounce_distance.abs()) / fling_distance.abs();
                let cut = time_fraction_at_progress(&curve, covered, epsilon);
                if let Ok((head, _)) = curve.divide_at_x(cut, epsilon) {
                    curve = head;
                }
                fling_duration = (fling_duration * cut).round();
            }
            bounce_distance = 0.0;
            bounce_duration = 0.0;
        }

        if fling_position == last && bounce_distance == 0.0 {
            return None;
        }
        if !fling_position.is_finite() || !fling_duration.is_finite() {
            return None;
        }

        plans.insert(
            0,
            AnimationPlan {
                axis,
                target: fling_position,
                duration_ms: fling_duration.max(0.0),
                easing: curve,
                delay_ms: 0.0,
            },
        );

        let bounces = bounce_distance != 0.0;
        if bounces && bounce_duration > 0.0 {
            plans.push(AnimationPlan {
                axis,
                target: bounce_target,
                duration_ms: bounce_duration,
                easing: CubicBezier::BOUNCE,
                delay_ms: bounce_delay,
            });
        }

        let (final_position, settle_ms) = if bounces {
            (bounce_target, bounce_delay + bounce_duration)
        } else {
            (fling_position, fling_duration.max(0.0))
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "glide.planner",
            axis = %axis,
            velocity,
            from = last,
            to = final_position,
            settle_ms,
            plans = plans.len(),
            bounds_bounce,
            "fling planned"
        );

        Some(AxisMotion {
            axis,
            plans,
            final_position,
            settle_ms,
        })
    }
}

/// Normalized time at which `curve` reaches `progress`, clamped to `[0, 1]`.
fn time_fraction_at_progress(curve: &CubicBezier, progress: f64, epsilon: f64) -> f64 {
    let Ok(t) = curve.t_for_y(progress, epsilon) else {
        return 0.0;
    };
    curve
        .point_at(t.clamp(0.0, 1.0))
        .map_or(0.0, |p| p.x.clamp(0.0, 1.0))
}
