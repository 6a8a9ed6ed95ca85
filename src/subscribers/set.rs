//! SubscriberSet: non-blocking fan-out over multiple subscribers.
//!
//! [`SubscriberSet`] hands each [`Event`] to every subscriber through a
//! bounded per-subscriber queue, drained by a dedicated worker task. The
//! publishing side never waits on a subscriber.
//!
//! ## Guarantees
//! - `emit(&Event)` returns immediately.
//! - Per-subscriber FIFO (queue order).
//! - A panicking subscriber is isolated: its panic is caught by the worker
//!   and other subscribers keep receiving events.
//!
//! ## Non-guarantees
//! - No global ordering across different subscribers.
//! - A full queue means the event is dropped for that subscriber; there are
//!   no retries.
//!
//! Workers exit on their own once the set is dropped and the queues close.

use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc;

use crate::events::Event;

use super::Subscribe;

/// One subscriber's bounded queue, drained by its worker task.
struct Queue {
    subscriber: &'static str,
    tx: mpsc::Sender<Arc<Event>>,
}

impl Queue {
    /// Spawns the worker for `sub` and returns its queue handle.
    fn start(sub: Arc<dyn Subscribe>) -> Self {
        let subscriber = sub.name();
        let (tx, mut rx) = mpsc::channel::<Arc<Event>>(sub.queue_capacity().max(1));

        tokio::spawn(async move {
            while let Some(ev) = rx.recv().await {
                let handled = std::panic::AssertUnwindSafe(sub.on_event(ev.as_ref()))
                    .catch_unwind()
                    .await;
                if handled.is_err() {
                    eprintln!(
                        "[nursery] subscriber {:?} panicked while handling {:?}",
                        sub.name(),
                        ev.kind
                    );
                }
            }
        });

        Self { subscriber, tx }
    }

    /// Queues one event; on overflow or a gone worker the event is dropped.
    fn push(&self, ev: Arc<Event>) {
        if let Err(err) = self.tx.try_send(ev) {
            let (ev, why) = match err {
                mpsc::error::TrySendError::Full(ev) => (ev, "queue full"),
                mpsc::error::TrySendError::Closed(ev) => (ev, "worker gone"),
            };
            eprintln!(
                "[nursery] dropping {:?} for subscriber {:?}: {why}",
                ev.kind, self.subscriber
            );
        }
    }
}

/// Composite fan-out with per-subscriber bounded queues and worker tasks.
pub struct SubscriberSet {
    queues: Vec<Queue>,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker per subscriber.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        Self {
            queues: subs.into_iter().map(Queue::start).collect(),
        }
    }

    /// Fan-out one event to all subscribers (non-blocking).
    pub fn emit(&self, event: &Event) {
        let ev = Arc::new(event.clone());
        for queue in &self.queues {
            queue.push(Arc::clone(&ev));
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter {
        seen: AtomicUsize,
    }

    #[async_trait]
    impl Subscribe for Counter {
        async fn on_event(&self, _ev: &Event) {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }

        fn name(&self) -> &'static str {
            "counter"
        }
    }

    struct Grumpy;

    #[async_trait]
    impl Subscribe for Grumpy {
        async fn on_event(&self, _ev: &Event) {
            panic!("no events please");
        }

        fn name(&self) -> &'static str {
            "grumpy"
        }
    }

    /// Lets the worker tasks drain their queues.
    async fn drain() {
        for _ in 0..32 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn delivers_each_event_to_every_subscriber() {
        let a = Arc::new(Counter::default());
        let b = Arc::new(Counter::default());
        let set = SubscriberSet::new(vec![
            Arc::clone(&a) as Arc<dyn Subscribe>,
            Arc::clone(&b) as Arc<dyn Subscribe>,
        ]);

        for _ in 0..3 {
            set.emit(&Event::now(EventKind::GroupClosed));
        }
        drain().await;

        assert_eq!(a.seen.load(Ordering::SeqCst), 3);
        assert_eq!(b.seen.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn panicking_subscriber_does_not_poison_others() {
        let counter = Arc::new(Counter::default());
        let set = SubscriberSet::new(vec![
            Arc::new(Grumpy) as Arc<dyn Subscribe>,
            Arc::clone(&counter) as Arc<dyn Subscribe>,
        ]);

        set.emit(&Event::now(EventKind::TaskStarted).with_task("work"));
        set.emit(&Event::now(EventKind::GroupClosed));
        drain().await;

        assert_eq!(counter.seen.load(Ordering::SeqCst), 2);
    }
}
