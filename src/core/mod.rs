//! Runtime core: the task group, the completion guard, and the supervisor.
//!
//! - [`group`]: scope-bound owner of member tasks plus the shared
//!   cancellation trigger; joins all members and propagates the first error;
//! - [`guard`]: fires the trigger the moment the guarded future resolves;
//! - [`board`]: authoritative per-task state map;
//! - [`supervisor`]: wires the decorative task and the guarded work task
//!   into one group and surfaces the work outcome.

mod board;
mod group;
mod guard;
mod supervisor;

pub use board::StateBoard;
pub use group::{TaskGroup, TaskHandle};
pub use guard::cancel_on_exit;
pub use supervisor::Supervisor;
