//! Task abstractions and the two stand-in tasks of the demo.
//!
//! - [`Task`] — trait for implementing async cancelable tasks
//! - [`TaskFn`] — function-backed task implementation
//! - [`TaskRef`] — shared reference to a task (`Arc<dyn Task>`)
//! - [`TaskState`] / [`Outcome`] — lifecycle states and terminal results
//! - [`pause`] — the timed-suspension primitive (a cancellation point)
//! - [`Spinner`] — decorative animation task with unconditional cleanup
//! - [`SlowJob`] — work stand-in that waits, then produces a value

mod outcome;
mod pause;
mod slow;
mod spinner;
mod task;
mod task_fn;

pub use outcome::{Outcome, TaskState};
pub use pause::pause;
pub use slow::SlowJob;
pub use spinner::{Console, Spinner, StdoutConsole};
pub use task::{Task, TaskRef};
pub use task_fn::TaskFn;
