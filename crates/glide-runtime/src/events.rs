#![forbid(unsafe_code)]

//! Typed lifecycle notifications and their subscriber registry.
//!
//! Listeners subscribe to one [`ScrollEventKind`] and receive every event of
//! that kind in subscription order. Each call is isolated: a panicking
//! listener is caught, logged at `warn` under `glide.events`, and delivery
//! continues with the next listener.
//!
//! Listeners run while the scroller is mutably borrowed, so they observe
//! events through their payloads and cannot call back into the scroller.
//! Hosts that need to react share state through `Rc<RefCell<_>>` and act
//! after the call returns.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Closed set of lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollEventKind {
    /// A drag or wheel gesture began moving the content.
    ScrollStart,
    /// The committed position changed.
    Scroll,
    /// Motion finished and the position was committed.
    ScrollEnd,
    /// The active segment changed, possibly mid-gesture.
    SegmentWillChange,
    /// The committed segment changed after motion settled.
    SegmentDidChange,
}

impl ScrollEventKind {
    pub const ALL: [Self; 5] = [
        Self::ScrollStart,
        Self::Scroll,
        Self::ScrollEnd,
        Self::SegmentWillChange,
        Self::SegmentDidChange,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ScrollStart => "scrollstart",
            Self::Scroll => "scroll",
            Self::ScrollEnd => "scrollend",
            Self::SegmentWillChange => "segmentwillchange",
            Self::SegmentDidChange => "segmentdidchange",
        }
    }
}

impl fmt::Display for ScrollEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scroll offsets in `scrollLeft`/`scrollTop` convention (non-negative
/// inside the bounds).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffsets {
    pub scroll_left: f64,
    pub scroll_top: f64,
}

/// Segment indices on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SegmentIndices {
    pub segment_x: u32,
    pub segment_y: u32,
}

/// One notification with its payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollEvent {
    ScrollStart(ScrollOffsets),
    Scroll(ScrollOffsets),
    ScrollEnd(ScrollOffsets),
    SegmentWillChange(SegmentIndices),
    SegmentDidChange(SegmentIndices),
}

impl ScrollEvent {
    #[must_use]
    pub const fn kind(&self) -> ScrollEventKind {
        match self {
            Self::ScrollStart(_) => ScrollEventKind::ScrollStart,
            Self::Scroll(_) => ScrollEventKind::Scroll,
            Self::ScrollEnd(_) => ScrollEventKind::ScrollEnd,
            Self::SegmentWillChange(_) => ScrollEventKind::SegmentWillChange,
            Self::SegmentDidChange(_) => ScrollEventKind::SegmentDidChange,
        }
    }

    /// Offsets carried by scroll lifecycle events.
    #[must_use]
    pub const fn offsets(&self) -> Option<ScrollOffsets> {
        match self {
            Self::ScrollStart(o) | Self::Scroll(o) | Self::ScrollEnd(o) => Some(*o),
            Self::SegmentWillChange(_) | Self::SegmentDidChange(_) => None,
        }
    }

    /// Indices carried by segment events.
    #[must_use]
    pub const fn segments(&self) -> Option<SegmentIndices> {
        match self {
            Self::SegmentWillChange(s) | Self::SegmentDidChange(s) => Some(*s),
            Self::ScrollStart(_) | Self::Scroll(_) | Self::ScrollEnd(_) => None,
        }
    }
}

/// Handle returned by [`EventRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Outcome of one [`EventRegistry::emit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delivery {
    /// Listeners that returned normally.
    pub delivered: usize,
    /// Listeners that panicked.
    pub faulted: usize,
}

type Callback = Box<dyn FnMut(&ScrollEvent)>;

struct Listener {
    id: ListenerId,
    kind: ScrollEventKind,
    callback: Callback,
}

/// Subscribers keyed by event kind.
#[derive(Default)]
pub struct EventRegistry {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl EventRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: ScrollEventKind, callback: F) -> ListenerId
    where
        F: FnMut(&ScrollEvent) + 'static,
    {
        self.next_id = self.next_id.saturating_add(1);
        let id = ListenerId(self.next_id);
        self.listeners.push(Listener {
            id,
            kind,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove one listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        if let Some(idx) = self.listeners.iter().position(|l| l.id == id) {
            self.listeners.remove(idx);
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    #[must_use]
    pub fn listener_count(&self, kind: ScrollEventKind) -> usize {
        self.listeners.iter().filter(|l| l.kind == kind).count()
    }

    /// Deliver `event` to every listener of its kind.
    pub fn emit(&mut self, event: &ScrollEvent) -> Delivery {
        let kind = event.kind();
        let mut delivery = Delivery::default();
        for listener in self.listeners.iter_mut().filter(|l| l.kind == kind) {
            match catch_unwind(AssertUnwindSafe(|| (listener.callback)(event))) {
                Ok(()) => delivery.delivered += 1,
                Err(payload) => {
                    delivery.faulted += 1;
                    tracing::warn!(
                        target: "glide.events",
                        event = kind.as_str(),
                        listener = listener.id.0,
                        panic = %panic_message(payload.as_ref()),
                        "listener panicked"
                    );
                }
            }
        }
        tracing::trace!(
            target: "glide.events",
            event = kind.as_str(),
            delivered = delivery.delivered,
            faulted = delivery.faulted,
            "emitted"
        );
        delivery
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
