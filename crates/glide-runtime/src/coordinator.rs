#![forbid(unsafe_code)]

//! Shared scroll lock.
//!
//! At most one scroller among those sharing a [`ScrollCoordinator`] may be
//! scrolling or animating at a time, so nested scroll regions do not fight
//! over the same gesture. The coordinator is injected into each scroller
//! rather than living in a global.
//!
//! # Invariants
//!
//! 1. `holder()` is either `None` or a registered instance.
//! 2. Only the holder can release the lock.
//! 3. Acquiring a lock already held by the caller succeeds.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Identity of one scroller within a coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
struct LockState {
    holder: Cell<Option<InstanceId>>,
    next_id: Cell<u64>,
}

/// Cloneable handle to one shared lock. Clones refer to the same lock.
#[derive(Debug, Clone, Default)]
pub struct ScrollCoordinator {
    state: Rc<LockState>,
}

impl ScrollCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an identity for a new scroller.
    #[must_use]
    pub fn register(&self) -> InstanceId {
        let id = self.state.next_id.get().saturating_add(1);
        self.state.next_id.set(id);
        InstanceId(id)
    }

    /// Take the lock for `id`. Succeeds when free or already held by `id`.
    pub fn try_acquire(&self, id: InstanceId) -> bool {
        match self.state.holder.get() {
            Some(holder) if holder == id => true,
            Some(holder) => {
                tracing::debug!(
                    target: "glide.coordinator",
                    instance = %id,
                    holder = %holder,
                    "lock busy"
                );
                false
            }
            None => {
                self.state.holder.set(Some(id));
                tracing::debug!(target: "glide.coordinator", instance = %id, "lock acquired");
                true
            }
        }
    }

    /// Release the lock if `id` holds it. Returns whether it did.
    pub fn release(&self, id: InstanceId) -> bool {
        if self.state.holder.get() == Some(id) {
            self.state.holder.set(None);
            tracing::debug!(target: "glide.coordinator", instance = %id, "lock released");
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn holder(&self) -> Option<InstanceId> {
        self.state.holder.get()
    }

    /// Another instance currently holds the lock.
    #[must_use]
    pub fn is_held_by_other(&self, id: InstanceId) -> bool {
        self.state.holder.get().is_some_and(|holder| holder != id)
    }
}
