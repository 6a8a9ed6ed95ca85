//! The [`Subscribe`] trait: async consumer of runtime [`Event`]s.

use async_trait::async_trait;

use crate::events::Event;

/// Asynchronous consumer of lifecycle events.
///
/// Implementations are driven by a dedicated worker inside
/// [`SubscriberSet`](crate::SubscriberSet); a slow subscriber delays only its
/// own queue, never the task group.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use nursery::{Event, Subscribe};
///
/// struct Printer;
///
/// #[async_trait]
/// impl Subscribe for Printer {
///     async fn on_event(&self, ev: &Event) {
///         println!("{:?}", ev.kind);
///     }
///
///     fn name(&self) -> &'static str {
///         "printer"
///     }
/// }
/// ```
#[async_trait]
pub trait Subscribe: Send + Sync {
    /// Handles one event. Panics are caught by the worker and logged.
    async fn on_event(&self, ev: &Event);

    /// Stable subscriber name, used in overflow/panic diagnostics.
    fn name(&self) -> &'static str;

    /// Capacity of this subscriber's event queue (clamped to 1).
    fn queue_capacity(&self) -> usize {
        64
    }
}
