//! LogWriter — simple event printer.
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [started] task="spin"
//! [started] task="work"
//! [completed] task="work"
//! [cancel-requested]
//! [cancelled] task="spin"
//! [group-closed]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let task = e.task.as_deref().unwrap_or("?");
        match e.kind {
            EventKind::TaskStarted => {
                println!("[started] task={task:?}");
            }
            EventKind::TaskCompleted => {
                println!("[completed] task={task:?}");
            }
            EventKind::TaskCancelled => {
                println!("[cancelled] task={task:?}");
            }
            EventKind::TaskFailed => {
                println!(
                    "[failed] task={task:?} err={:?}",
                    e.reason.as_deref().unwrap_or("unknown")
                );
            }
            EventKind::CancelRequested => {
                println!("[cancel-requested]");
            }
            EventKind::GroupClosed => {
                println!("[group-closed]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
