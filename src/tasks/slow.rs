//! SlowJob: the work stand-in.
//!
//! Pretends to wait a long time for I/O, then produces a value. The wait is a
//! single [`pause`], so a cancelled job yields `Err(Canceled)` and never a
//! value.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::TaskError;
use crate::tasks::pause::pause;

/// Work stand-in: suspends for a bounded duration, then yields a value.
#[derive(Clone, Copy, Debug)]
pub struct SlowJob {
    delay: Duration,
    value: u64,
}

impl SlowJob {
    /// Creates a job that waits `delay`, then produces `value`.
    pub fn new(delay: Duration, value: u64) -> Self {
        Self { delay, value }
    }

    /// Runs the job to completion or cancellation.
    pub async fn run(&self, ctx: CancellationToken) -> Result<u64, TaskError> {
        pause(&ctx, self.delay).await?;
        Ok(self.value)
    }
}

impl Default for SlowJob {
    /// Three seconds of pretend I/O, then the answer.
    fn default() -> Self {
        Self::new(Duration::from_secs(3), 42)
    }
}
