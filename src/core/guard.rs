//! Completion guard: fire the group trigger the moment the work resolves.
//!
//! Without the guard, a decorative sibling only stops when the whole group
//! would otherwise exit; with it, the trigger fires as soon as the guarded
//! future produces a value **or** an error, so siblings stop at their very
//! next suspension point.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Runs `work`, firing `ctx` on every exit path.
///
/// The trigger is held in a [`DropGuard`](tokio_util::sync::DropGuard), so it
/// fires whether `work` returns a value, returns an error, or unwinds —
/// before the outcome propagates onward. Redundant fires (e.g. the group
/// already cancelled) are no-ops.
///
/// # Example
/// ```
/// use nursery::{cancel_on_exit, TaskError};
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let trigger = CancellationToken::new();
/// let res = cancel_on_exit(trigger.clone(), async { Ok::<_, TaskError>(42u64) }).await;
/// assert_eq!(res, Ok(42));
/// assert!(trigger.is_cancelled());
/// # }
/// ```
pub async fn cancel_on_exit<T, Fut>(ctx: CancellationToken, work: Fut) -> Result<T, TaskError>
where
    Fut: Future<Output = Result<T, TaskError>>,
{
    let _fire = ctx.drop_guard();
    work.await
}
