#![forbid(unsafe_code)]

//! Cancellable virtual-time task queue.
//!
//! Tasks are scheduled at an absolute due time and handed back by
//! [`Scheduler::pop_due`] once the host's clock passes it. Nothing runs on
//! its own: the owner drains due tasks from its tick handler.
//!
//! # Invariants
//!
//! 1. Due tasks pop in `(due_ms, schedule order)` order.
//! 2. A cancelled task never pops; its handle stays invalid forever.
//! 3. Handles are never reused within one scheduler.

/// Revocable reference to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

impl TaskHandle {
    #[inline]
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// A task whose due time has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct DueTask<T> {
    pub handle: TaskHandle,
    pub due_ms: f64,
    pub task: T,
}

#[derive(Debug)]
struct Entry<T> {
    handle: TaskHandle,
    due_ms: f64,
    task: T,
}

/// Pending tasks ordered by due time.
#[derive(Debug)]
pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to become due at `due_ms`. A non-finite due time is
    /// treated as immediately due.
    pub fn schedule(&mut self, due_ms: f64, task: T) -> TaskHandle {
        self.next_id = self.next_id.saturating_add(1);
        let handle = TaskHandle(self.next_id);
        let due_ms = if due_ms.is_finite() {
            due_ms
        } else {
            f64::NEG_INFINITY
        };
        self.entries.push(Entry {
            handle,
            due_ms,
            task,
        });
        handle
    }

    /// Revoke a pending task, returning it if it had not yet run.
    pub fn cancel(&mut self, handle: TaskHandle) -> Option<T> {
        let idx = self.entries.iter().position(|e| e.handle == handle)?;
        Some(self.entries.remove(idx).task)
    }

    /// Revoke every pending task. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    /// Remove and return the earliest task due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<DueTask<T>> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .total_cmp(&b.due_ms)
                    .then_with(|| a.handle.cmp(&b.handle))
            })
            .map(|(idx, _)| idx)?;
        let Entry {
            handle,
            due_ms,
            task,
        } = self.entries.remove(idx);
        Some(DueTask {
            handle,
            due_ms,
            task,
        })
    }

    /// Earliest pending due time.
    #[must_use]
    pub fn next_due(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|e| e.due_ms)
            .min_by(f64::total_cmp)
    }

    #[must_use]
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
