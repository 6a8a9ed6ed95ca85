//! Error types used by the nursery runtime and tasks.
//!
//! A single enum, [`TaskError`], covers everything a member task can report.
//! Note that [`TaskError::Canceled`] is *not* a real failure: the group maps
//! it to the `Cancelled` outcome and never propagates it as the group error.
//!
//! The type is `Clone` on purpose: when a task fails, the same error is
//! recorded in that task's [`Outcome`](crate::Outcome) **and** kept by the
//! group as a candidate for first-error propagation.

use thiserror::Error;

/// Errors produced by task execution.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task execution failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Non-recoverable failure, e.g. a contained panic inside a member task.
    #[error("fatal error: {error}")]
    Fatal {
        /// The underlying error message.
        error: String,
    },

    /// Task observed the group's cancellation trigger at a suspension point.
    #[error("context cancelled")]
    Canceled,
}

impl TaskError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use nursery::TaskError;
    ///
    /// let err = TaskError::Fail { error: "boom".into() };
    /// assert_eq!(err.as_label(), "task_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Fatal { .. } => "task_fatal",
            TaskError::Canceled => "task_canceled",
        }
    }

    /// True if this error is the cooperative-cancellation marker.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, TaskError::Canceled)
    }

    /// Convenience constructor for [`TaskError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        TaskError::Fail {
            error: error.into(),
        }
    }

    /// Convenience constructor for [`TaskError::Fatal`].
    pub fn fatal(error: impl Into<String>) -> Self {
        TaskError::Fatal {
            error: error.into(),
        }
    }
}
