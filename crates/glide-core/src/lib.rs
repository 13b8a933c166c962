#![forbid(unsafe_code)]

//! Core: curve math, gesture sampling, and release planning for Glide.
//!
//! # Role in Glide
//! `glide-core` is the pure half of the scroller. It owns no clocks, timers
//! or listeners; every function maps inputs to outputs so the motion model
//! can be tested and fuzzed in isolation.
//!
//! # Primary responsibilities
//! - **CubicBezier**: easing curves with evaluation, inversion, subdivision.
//! - **EventHistory / VelocityEstimator**: release speed from recent samples.
//! - **BoundaryElasticity**: rubber-band compression past the edges.
//! - **SnapResolver**: resting positions on edges and grid lines.
//! - **MotionPlanner**: fling, bounce and settle plans for a release.
//!
//! # How it fits in the system
//! `glide-runtime` drives these pieces from pointer, wheel and timer events
//! and hands the resulting [`AnimationPlan`]s to a renderer.

pub mod bezier;
pub mod config;
pub mod elasticity;
pub mod error;
pub mod geometry;
pub mod history;
pub mod metrics;
pub mod planner;
pub mod snap;
pub mod velocity;

pub use bezier::{CubicBezier, CurvePoint};
pub use config::{Alignment, ConfigError, ScrollerConfig};
pub use elasticity::BoundaryElasticity;
pub use error::BezierError;
pub use geometry::{Axis, AxisPair, Sample};
pub use history::EventHistory;
pub use metrics::{GridAxis, Metrics, SnapGrid};
pub use planner::{
    AnimationPlan, AxisMotion, AxisState, Fling, MotionKind, MotionPlan, MotionPlanner,
    PlannerConfig,
};
pub use snap::SnapResolver;
pub use velocity::VelocityEstimator;
