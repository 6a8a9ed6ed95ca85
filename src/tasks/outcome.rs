//! Task lifecycle states and terminal outcomes.
//!
//! [`TaskState`] covers the full lifecycle; [`Outcome`] is the tagged result
//! of a terminal task — exactly one of value, error, or cancellation marker
//! holds.

use crate::error::TaskError;

/// Lifecycle state of a member task.
///
/// A task reaches exactly one terminal state and never re-enters `Running`
/// afterwards; the [`StateBoard`](crate::StateBoard) enforces stickiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Registered in the group, not yet polled.
    Pending,
    /// Currently executing.
    Running,
    /// Finished with a value.
    Completed,
    /// Finished with an error.
    Failed,
    /// Observed the fired trigger at a suspension point and exited.
    Cancelled,
}

impl TaskState {
    /// True for `Completed`, `Failed`, and `Cancelled`.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Cancelled
        )
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskState::Pending => "pending",
            TaskState::Running => "running",
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
            TaskState::Cancelled => "cancelled",
        }
    }
}

/// Terminal result of a member task.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    /// The task produced a value.
    Completed(T),
    /// The task failed with an error.
    Failed(TaskError),
    /// The task was cancelled by the group's trigger.
    Cancelled,
}

impl<T> Outcome<T> {
    /// The terminal [`TaskState`] this outcome corresponds to.
    pub fn state(&self) -> TaskState {
        match self {
            Outcome::Completed(_) => TaskState::Completed,
            Outcome::Failed(_) => TaskState::Failed,
            Outcome::Cancelled => TaskState::Cancelled,
        }
    }

    /// True if the task was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    /// Converts into a `Result`, mapping cancellation to
    /// [`TaskError::Canceled`].
    pub fn into_result(self) -> Result<T, TaskError> {
        match self {
            Outcome::Completed(value) => Ok(value),
            Outcome::Failed(err) => Err(err),
            Outcome::Cancelled => Err(TaskError::Canceled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!TaskState::Pending.is_terminal());
        assert!(!TaskState::Running.is_terminal());
        assert!(TaskState::Completed.is_terminal());
        assert!(TaskState::Failed.is_terminal());
        assert!(TaskState::Cancelled.is_terminal());
    }

    #[test]
    fn outcome_into_result() {
        assert_eq!(Outcome::Completed(42u64).into_result(), Ok(42));
        assert_eq!(
            Outcome::<u64>::Cancelled.into_result(),
            Err(TaskError::Canceled)
        );
        let err = TaskError::fail("boom");
        assert_eq!(
            Outcome::<u64>::Failed(err.clone()).into_result(),
            Err(err)
        );
    }
}
