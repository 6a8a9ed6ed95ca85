//! Task abstraction.
//!
//! This module defines the [`Task`] trait (async, cancelable). The common
//! handle type is [`TaskRef`], an `Arc<dyn Task>` suitable for spawning into
//! a [`TaskGroup`](crate::TaskGroup).
//!
//! A task receives a [`CancellationToken`] — the group's cancellation
//! trigger — and should check it at its suspension points to stop
//! cooperatively when a sibling finishes or fails.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Shared reference to a task.
pub type TaskRef = Arc<dyn Task>;

/// Asynchronous, cancelable unit of concurrent work.
///
/// A `Task` has a stable [`name`](Task::name) and an async
/// [`run`](Task::run) method that receives the group's cancellation trigger.
/// Implementors should observe the trigger at suspension points (see
/// [`pause`](crate::pause)) and return [`TaskError::Canceled`] promptly once
/// it fires.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use nursery::{Task, TaskError};
/// use tokio_util::sync::CancellationToken;
///
/// struct Demo;
///
/// #[async_trait]
/// impl Task for Demo {
///     fn name(&self) -> &str {
///         "demo"
///     }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError> {
///         if ctx.is_cancelled() {
///             return Err(TaskError::Canceled);
///         }
///         // do work...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Executes the task until completion, failure, or cancellation.
    async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError>;
}
