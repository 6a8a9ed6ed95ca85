//! Lifecycle events and the broadcast bus that carries them.
//!
//! - [`Event`] / [`EventKind`]: what happened to which task, with a global
//!   monotonic sequence number for ordering.
//! - [`Bus`]: non-blocking broadcast channel shared by the task group and
//!   the supervisor's subscriber listener.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
