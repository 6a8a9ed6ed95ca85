//! Spinner: the decorative task.
//!
//! Renders an unbounded animation cycle (`| / - \`) next to a message,
//! suspending via [`pause`] between frames — that suspension is where the
//! spinner observes the group's cancellation trigger.
//!
//! ## Guaranteed cleanup
//! The last rendered frame is erased on **every** exit path — cancellation,
//! error, or (hypothetical) natural completion — exactly once. The render
//! loop lives in [`Spinner::animate`]; [`Task::run`] calls it, then performs
//! the erase unconditionally before returning the loop's result.
//!
//! Output goes through the [`Console`] collaborator so tests can capture
//! frames without touching stdout.

use std::borrow::Cow;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;
use crate::tasks::pause::pause;
use crate::tasks::task::Task;

/// Animation frames, cycled forever.
const FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Console-writing collaborator used by the spinner.
///
/// Return values are never consulted; rendering is best-effort.
pub trait Console: Send + Sync + 'static {
    /// Writes raw text, without a trailing newline.
    fn write(&self, text: &str);

    /// Forces buffered output to the device.
    fn flush(&self);
}

/// Production [`Console`] backed by stdout.
#[derive(Default)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn write(&self, text: &str) {
        let _ = io::stdout().lock().write_all(text.as_bytes());
    }

    fn flush(&self) {
        let _ = io::stdout().lock().flush();
    }
}

/// Decorative animation task.
pub struct Spinner {
    message: Cow<'static, str>,
    interval: Duration,
    console: Arc<dyn Console>,
}

impl Spinner {
    /// Creates a spinner rendering `message` every `interval` through `console`.
    pub fn new(
        message: impl Into<Cow<'static, str>>,
        interval: Duration,
        console: Arc<dyn Console>,
    ) -> Self {
        Self {
            message: message.into(),
            interval,
            console,
        }
    }

    /// Renders one frame and backspaces over it; returns the rendered width.
    fn render(&self, frame: char) -> usize {
        let status = format!("{frame} {}", self.message);
        self.console.write(&status);
        self.console.flush();
        self.console.write(&"\x08".repeat(status.len()));
        status.len()
    }

    /// Erases the last rendered frame (spaces, then backspaces).
    fn erase(&self, width: usize) {
        self.console.write(&" ".repeat(width));
        self.console.write(&"\x08".repeat(width));
        self.console.flush();
    }

    /// The unbounded render loop; exits only via cancellation or an error.
    async fn animate(
        &self,
        ctx: &CancellationToken,
        width: &mut usize,
    ) -> Result<(), TaskError> {
        for frame in FRAMES.iter().cycle() {
            *width = self.render(*frame);
            pause(ctx, self.interval).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Task for Spinner {
    fn name(&self) -> &str {
        "spin"
    }

    async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError> {
        let mut width = 0;
        let res = self.animate(&ctx, &mut width).await;
        // Unconditional finalization: runs whether the loop was cancelled,
        // errored, or (hypothetically) completed.
        self.erase(width);
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturedConsole {
        writes: Mutex<Vec<String>>,
    }

    impl Console for CapturedConsole {
        fn write(&self, text: &str) {
            self.writes
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(text.to_string());
        }

        fn flush(&self) {}
    }

    impl CapturedConsole {
        fn writes(&self) -> Vec<String> {
            self.writes
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone()
        }

        fn erase_count(&self) -> usize {
            self.writes()
                .iter()
                .filter(|w| !w.is_empty() && w.chars().all(|c| c == ' '))
                .count()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_spinner_erases_exactly_once() {
        let console = Arc::new(CapturedConsole::default());
        let spinner = Spinner::new(
            "thinking!",
            Duration::from_millis(100),
            Arc::clone(&console) as Arc<dyn Console>,
        );

        let ctx = CancellationToken::new();
        let fired = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(350)).await;
            fired.cancel();
        });

        let res = spinner.run(ctx).await;
        assert_eq!(res, Err(TaskError::Canceled));
        assert_eq!(console.erase_count(), 1);

        // First frame is the first cycle entry.
        let writes = console.writes();
        assert_eq!(writes[0], "| thinking!");
    }

    #[tokio::test(start_paused = true)]
    async fn pre_fired_trigger_still_erases() {
        let console = Arc::new(CapturedConsole::default());
        let spinner = Spinner::new(
            "thinking!",
            Duration::from_millis(100),
            Arc::clone(&console) as Arc<dyn Console>,
        );

        let ctx = CancellationToken::new();
        ctx.cancel();

        let res = spinner.run(ctx).await;
        assert_eq!(res, Err(TaskError::Canceled));
        assert_eq!(console.erase_count(), 1);
    }
}
