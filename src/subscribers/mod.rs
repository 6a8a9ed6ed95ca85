//! Subscriber API: hook into lifecycle events.
//!
//! - [`Subscribe`]: async trait implemented by event consumers.
//! - [`SubscriberSet`]: non-blocking fan-out with per-subscriber queues.
//! - [`LogWriter`] (feature `logging`): a simple event printer for demos.

mod set;
mod subscribe;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
