#![forbid(unsafe_code)]

//! Listener fault isolation and the structured logs a gesture produces.
//!
//! Run:
//!   cargo test -p glide-runtime --test listener_isolation

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use glide_core::{AxisPair, ScrollerConfig};
use glide_runtime::{
    Extents, ManualClock, RecordingSink, ScrollEventKind, ScrollState, Scroller, ScrollerBuilder,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Capture layer
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    target: String,
    fields: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    message: String,
    fields: HashMap<String, String>,
    parent_span_name: Option<String>,
}

#[derive(Default)]
struct Captured {
    spans: Vec<CapturedSpan>,
    events: Vec<CapturedEvent>,
}

struct LogCapture(Arc<Mutex<Captured>>);

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for LogCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.0.lock().unwrap().spans.push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            target: attrs.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.get("message").cloned().unwrap_or_default();
        let parent_span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span| span.name().to_string());

        self.0.lock().unwrap().events.push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message,
            fields,
            parent_span_name,
        });
    }
}

fn with_captured_logs(f: impl FnOnce()) -> Captured {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(LogCapture(Arc::clone(&captured)));
    tracing::subscriber::with_default(subscriber, f);
    let mut guard = captured.lock().unwrap();
    std::mem::take(&mut *guard)
}

// ============================================================================
// Scenario
// ============================================================================

fn scroller() -> Scroller<RecordingSink> {
    ScrollerBuilder::new(ScrollerConfig {
        scrolling_x: false,
        ..ScrollerConfig::default()
    })
    .extents(Extents::new(
        AxisPair::new(300.0, 300.0),
        AxisPair::new(1000.0, 1000.0),
    ))
    .clock(ManualClock::new(0.0))
    .build(RecordingSink::new())
    .unwrap()
}

/// Flick down past the start edge and let the bounce finish.
fn flick_past_start(s: &mut Scroller<RecordingSink>) {
    s.on_start(0.0, 0.0, 0.0);
    s.on_move(0.0, 30.0, 10.0);
    s.on_move(0.0, 60.0, 20.0);
    s.on_end(20.0);
    s.tick(1e6);
}

#[test]
fn panicking_listener_does_not_starve_others() {
    let scrolls = Rc::new(Cell::new(0u32));
    let ends = Rc::new(Cell::new(0u32));

    let logs = with_captured_logs(|| {
        let mut s = scroller();
        s.subscribe(ScrollEventKind::Scroll, |_| panic!("listener exploded"));
        let seen = Rc::clone(&scrolls);
        s.subscribe(ScrollEventKind::Scroll, move |_| seen.set(seen.get() + 1));
        let seen = Rc::clone(&ends);
        s.subscribe(ScrollEventKind::ScrollEnd, move |_| seen.set(seen.get() + 1));

        flick_past_start(&mut s);
        assert_eq!(s.state(), ScrollState::Idle);
        assert_eq!(s.scroll_top(), 0.0);
    });

    // Two drag updates plus the committed position.
    assert_eq!(scrolls.get(), 3);
    assert_eq!(ends.get(), 1);

    let faults: Vec<_> = logs
        .events
        .iter()
        .filter(|e| e.message == "listener panicked")
        .collect();
    assert_eq!(faults.len(), 3);
    for fault in faults {
        assert_eq!(fault.level, tracing::Level::WARN);
        assert_eq!(fault.target, "glide.events");
        assert_eq!(fault.fields.get("event").map(String::as_str), Some("scroll"));
        assert_eq!(
            fault.fields.get("panic").map(String::as_str),
            Some("listener exploded")
        );
    }
}

#[test]
fn release_planning_logs_inside_release_span() {
    let logs = with_captured_logs(|| {
        let mut s = scroller();
        flick_past_start(&mut s);
    });

    let release = logs
        .spans
        .iter()
        .find(|s| s.name == "glide.scroller.release")
        .expect("release span");
    assert_eq!(release.target, "glide.scroller");
    assert_eq!(release.fields.get("t").map(String::as_str), Some("20"));
    assert!(release.fields.contains_key("instance"));

    let planned = logs
        .events
        .iter()
        .find(|e| e.message == "fling planned")
        .expect("fling planned");
    assert_eq!(planned.target, "glide.planner");
    assert_eq!(
        planned.parent_span_name.as_deref(),
        Some("glide.scroller.release")
    );
    assert_eq!(planned.fields.get("bounds_bounce").map(String::as_str), Some("true"));

    let finalized = logs
        .events
        .iter()
        .filter(|e| e.target == "glide.scroller" && e.message == "finalized")
        .count();
    assert_eq!(finalized, 1);
}

#[test]
fn read_only_write_is_logged_as_warning() {
    let logs = with_captured_logs(|| {
        let mut s = scroller();
        assert!(
            s.set_property(glide_runtime::Property::ScrollHeight, 10.0)
                .is_err()
        );
    });
    let warning = logs
        .events
        .iter()
        .find(|e| e.level == tracing::Level::WARN)
        .expect("warning");
    assert_eq!(warning.message, "rejected write to read-only property");
    assert_eq!(
        warning.fields.get("property").map(String::as_str),
        Some("scroll_height")
    );
}
