//! The timed-suspension primitive.
//!
//! [`pause`] is the one suspension point both stand-in tasks use: it suspends
//! the caller for a duration and doubles as a cancellation point. Cancellation
//! in this crate is strictly cooperative — a task that never calls `pause`
//! (or awaits the trigger some other way) runs to completion unaffected.

use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Suspends the calling task for `dur`, observing the cancellation trigger.
///
/// Returns `Ok(())` once the duration elapsed, or
/// [`TaskError::Canceled`] if the trigger fired first. A trigger that is
/// already fired wins immediately, without sleeping.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use nursery::{pause, TaskError};
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let ctx = CancellationToken::new();
/// ctx.cancel();
/// let res = pause(&ctx, Duration::from_secs(60)).await;
/// assert_eq!(res, Err(TaskError::Canceled));
/// # }
/// ```
pub async fn pause(ctx: &CancellationToken, dur: Duration) -> Result<(), TaskError> {
    // biased: the trigger is checked first, so a fired trigger beats even a
    // zero-duration sleep.
    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(TaskError::Canceled),
        _ = time::sleep(dur) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn elapses_without_cancellation() {
        let ctx = CancellationToken::new();
        assert_eq!(pause(&ctx, Duration::from_secs(3)).await, Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn fired_trigger_wins_immediately() {
        let ctx = CancellationToken::new();
        ctx.cancel();
        assert_eq!(
            pause(&ctx, Duration::from_secs(3600)).await,
            Err(TaskError::Canceled)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn fired_trigger_beats_a_zero_duration_sleep() {
        let ctx = CancellationToken::new();
        ctx.cancel();
        assert_eq!(
            pause(&ctx, Duration::ZERO).await,
            Err(TaskError::Canceled)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn observes_trigger_mid_sleep() {
        let ctx = CancellationToken::new();
        let fired = ctx.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(50)).await;
            fired.cancel();
        });
        assert_eq!(
            pause(&ctx, Duration::from_secs(3600)).await,
            Err(TaskError::Canceled)
        );
    }
}
