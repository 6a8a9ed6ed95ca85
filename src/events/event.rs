//! Runtime events emitted by the task group and the supervisor.
//!
//! The [`EventKind`] enum classifies event types:
//! - **Lifecycle events**: a member task started or reached a terminal state;
//! - **Group events**: the cancellation trigger fired, the group scope closed.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use nursery::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::TaskFailed)
//!     .with_task("work")
//!     .with_reason("boom");
//!
//! assert_eq!(ev.kind, EventKind::TaskFailed);
//! assert_eq!(ev.task.as_deref(), Some("work"));
//! assert_eq!(ev.reason.as_deref(), Some("boom"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Task lifecycle events ===
    /// A member task began running.
    ///
    /// Sets: `task`, `at`, `seq`.
    TaskStarted,

    /// A member task completed with a value.
    ///
    /// Sets: `task`, `at`, `seq`.
    TaskCompleted,

    /// A member task observed the trigger and exited as cancelled.
    ///
    /// Sets: `task`, `at`, `seq`.
    TaskCancelled,

    /// A member task failed; its error becomes a candidate for first-error
    /// propagation.
    ///
    /// Sets: `task`, `reason`, `at`, `seq`.
    TaskFailed,

    // === Group events ===
    /// The group's cancellation trigger fired (published at most once per group).
    ///
    /// Sets: `at`, `seq`.
    CancelRequested,

    /// Every member task reached a terminal state and the scope closed.
    ///
    /// Sets: `at`, `seq`.
    GroupClosed,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the task, if applicable.
    pub task: Option<Arc<str>>,
    /// Human-readable reason (error messages).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            reason: None,
        }
    }

    /// Attaches a task name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_is_monotonic() {
        let a = Event::now(EventKind::TaskStarted);
        let b = Event::now(EventKind::TaskCompleted);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn builder_sets_fields() {
        let ev = Event::now(EventKind::TaskFailed)
            .with_task("work")
            .with_reason("boom");
        assert_eq!(ev.task.as_deref(), Some("work"));
        assert_eq!(ev.reason.as_deref(), Some("boom"));
    }
}
