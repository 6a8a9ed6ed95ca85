//! Authoritative per-task lifecycle state.
//!
//! [`StateBoard`] records the [`TaskState`] of every member task. Unlike the
//! event bus, the board is updated synchronously by the group itself, so the
//! moment [`TaskGroup::join_all`](crate::TaskGroup::join_all) returns, every
//! recorded state is terminal and consistent — callers and tests never
//! observe a half-finished group.
//!
//! ## Rules
//! - Terminal states are **sticky**: once a task is `Completed`, `Failed`,
//!   or `Cancelled`, further updates for it are ignored.
//! - Reads are cheap snapshots; no async locking involved.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::tasks::TaskState;

/// Thread-safe tracker of member task states.
#[derive(Default)]
pub struct StateBoard {
    state: Mutex<HashMap<Arc<str>, TaskState>>,
}

impl StateBoard {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Arc<str>, TaskState>> {
        // A poisoned lock only means a writer panicked mid-update of a Copy
        // value; the map itself is still usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records a state transition; ignored once the task is terminal.
    pub(crate) fn record(&self, name: &Arc<str>, next: TaskState) {
        let mut map = self.lock();
        let entry = map.entry(Arc::clone(name)).or_insert(TaskState::Pending);
        if entry.is_terminal() {
            return;
        }
        *entry = next;
    }

    /// Returns the current state of a task, if it was ever registered.
    pub fn state_of(&self, name: &str) -> Option<TaskState> {
        self.lock().get(name).copied()
    }

    /// Returns a sorted snapshot of all task states.
    pub fn snapshot(&self) -> Vec<(String, TaskState)> {
        let map = self.lock();
        let mut all: Vec<(String, TaskState)> = map
            .iter()
            .map(|(name, state)| (name.to_string(), *state))
            .collect();
        all.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        all
    }

    /// True if every registered task has reached a terminal state.
    pub fn all_terminal(&self) -> bool {
        self.lock().values().all(|s| s.is_terminal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Arc<str> {
        Arc::from(s)
    }

    #[test]
    fn records_transitions() {
        let board = StateBoard::new();
        let work = name("work");
        board.record(&work, TaskState::Pending);
        assert_eq!(board.state_of("work"), Some(TaskState::Pending));
        board.record(&work, TaskState::Running);
        assert_eq!(board.state_of("work"), Some(TaskState::Running));
        board.record(&work, TaskState::Completed);
        assert_eq!(board.state_of("work"), Some(TaskState::Completed));
    }

    #[test]
    fn terminal_states_are_sticky() {
        let board = StateBoard::new();
        let spin = name("spin");
        board.record(&spin, TaskState::Cancelled);
        board.record(&spin, TaskState::Running);
        board.record(&spin, TaskState::Completed);
        assert_eq!(board.state_of("spin"), Some(TaskState::Cancelled));
    }

    #[test]
    fn all_terminal_reflects_every_member() {
        let board = StateBoard::new();
        board.record(&name("spin"), TaskState::Running);
        board.record(&name("work"), TaskState::Completed);
        assert!(!board.all_terminal());
        board.record(&name("spin"), TaskState::Cancelled);
        assert!(board.all_terminal());
    }
}
