//! # nursery
//!
//! A small structured-concurrency demo built on tokio: one supervisor, one
//! task group, all-or-nothing cancellation.
//!
//! A [`Supervisor`] spawns two concurrent siblings into a [`TaskGroup`] — a
//! decorative [`Spinner`] and a long-running [`SlowJob`] — and guarantees
//! that when the work finishes (successfully or with failure) the spinner is
//! proactively cancelled, and that no task outlives the group scope.
//!
//! ## Architecture
//! ```text
//!     caller
//!       │
//!       ▼
//! ┌───────────────────────────────────────────────────────┐
//! │ Supervisor                                            │
//! │  - Bus (broadcast events) ──► SubscriberSet fan-out   │
//! │  - StateBoard (authoritative task states)             │
//! └──────────────┬────────────────────────────────────────┘
//!                ▼
//! ┌───────────────────────────────────────────────────────┐
//! │ TaskGroup            one shared CancellationToken     │
//! │   ├─ "spin"  Spinner        (runs until cancelled)    │
//! │   └─ "work"  cancel_on_exit(SlowJob)                  │
//! │              └── fires the trigger the moment the     │
//! │                  work resolves, value or error        │
//! └───────────────────────────────────────────────────────┘
//!                │
//!                ▼
//!  join_all(): blocks until BOTH members are terminal,
//!  then propagates the first error by completion order
//! ```
//!
//! ## Semantics
//! - **Structured ownership**: the group scope never returns while a member
//!   is still running; partial results are never visible.
//! - **Cooperative cancellation**: the trigger is observed only at
//!   suspension points ([`pause`]); a task with no suspension point runs to
//!   completion unaffected. The trigger is single-fire and idempotent.
//! - **Symmetric failure**: an error in *either* sibling fires the trigger,
//!   is recorded as that task's [`Outcome`], and is re-raised from the group
//!   scope after all members terminated. Cancellation itself is never an
//!   error.
//! - **Guaranteed cleanup**: the spinner erases its last frame on every exit
//!   path.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use nursery::{Config, Supervisor};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cfg = Config::default();
//!     cfg.work_delay = Duration::from_millis(300);
//!
//!     let sup = Supervisor::new(cfg, Vec::new());
//!     let answer = sup.run().await?;
//!     assert_eq!(answer, 42);
//!     Ok(())
//! }
//! ```
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.

mod config;
mod core;
mod error;
mod events;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{cancel_on_exit, StateBoard, Supervisor, TaskGroup, TaskHandle};
pub use error::TaskError;
pub use events::{Bus, Event, EventKind};
pub use subscribers::{Subscribe, SubscriberSet};
pub use tasks::{
    pause, Console, Outcome, SlowJob, Spinner, StdoutConsole, Task, TaskFn, TaskRef, TaskState,
};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
