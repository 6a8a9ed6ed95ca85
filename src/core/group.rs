//! TaskGroup: scope-bound owner of concurrently running tasks.
//!
//! A [`TaskGroup`] owns a set of member tasks (a [`JoinSet`]) plus one shared
//! cancellation trigger (a [`CancellationToken`]). The group's scope does not
//! return to its caller until **every** member has reached a terminal state.
//!
//! ## Key semantics
//! ```text
//! spawn(name, f)            member gets a clone of the trigger
//!     │
//!     ▼
//! join_all()
//!     ├─ member Completed   → record state, keep draining
//!     ├─ member Cancelled   → record state, keep draining (not an error)
//!     └─ member Failed      → fire trigger (siblings stop at their next
//!                             suspension point), remember FIRST error by
//!                             completion order, keep draining
//!     ▼
//! all members terminal      → Err(first error) or Ok(())
//! ```
//!
//! ## Rules
//! - The trigger is single-fire and idempotent; it never un-fires.
//! - Cancellation is cooperative: members observe the trigger only at
//!   suspension points such as [`pause`](crate::pause).
//! - Panics inside a member are contained and surfaced as
//!   [`TaskError::Fatal`]; they count as failures.
//! - A member's typed value travels through its [`TaskHandle`], never
//!   through the group.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::oneshot, task::JoinSet};
use tokio_util::sync::CancellationToken;

use crate::core::board::StateBoard;
use crate::error::TaskError;
use crate::events::{Bus, Event, EventKind};
use crate::tasks::{Outcome, TaskRef, TaskState};

/// What a member reports back to the group when it exits.
struct TaskExit {
    name: Arc<str>,
    state: TaskState,
    error: Option<TaskError>,
}

/// Handle to one spawned member; resolves to its [`Outcome`] after the
/// group joins.
pub struct TaskHandle<T> {
    name: Arc<str>,
    rx: oneshot::Receiver<Outcome<T>>,
}

impl<T> TaskHandle<T> {
    /// The member's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Consumes the handle and returns the member's terminal [`Outcome`].
    ///
    /// Intended to be awaited after
    /// [`TaskGroup::join_all`](TaskGroup::join_all); at that point the
    /// outcome is already resolved and this returns immediately.
    pub async fn outcome(self) -> Outcome<T> {
        match self.rx.await {
            Ok(outcome) => outcome,
            Err(_) => Outcome::Failed(TaskError::Fatal {
                error: format!("task '{}' dropped its result slot", self.name),
            }),
        }
    }
}

/// Scope-bound owner of member tasks and their shared cancellation trigger.
pub struct TaskGroup {
    token: CancellationToken,
    set: JoinSet<TaskExit>,
    bus: Bus,
    board: Arc<StateBoard>,
    cancel_announced: AtomicBool,
}

impl TaskGroup {
    /// Opens a new, empty group.
    pub fn new(bus: Bus, board: Arc<StateBoard>) -> Self {
        Self {
            token: CancellationToken::new(),
            set: JoinSet::new(),
            bus,
            board,
            cancel_announced: AtomicBool::new(false),
        }
    }

    /// Returns a clone of the group's cancellation trigger.
    pub fn cancel_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Fires the cancellation trigger.
    ///
    /// Idempotent: redundant fires are no-ops, and the trigger never
    /// un-fires for the life of the group. `CancelRequested` is published at
    /// most once per group, whether the fire comes from here or from a
    /// member-held clone of the trigger (the completion guard).
    pub fn cancel(&self) {
        self.announce_cancel();
        self.token.cancel();
    }

    /// Publishes `CancelRequested` exactly once per group.
    fn announce_cancel(&self) {
        if !self.cancel_announced.swap(true, Ordering::Relaxed) {
            self.bus.publish(Event::now(EventKind::CancelRequested));
        }
    }

    /// Spawns a member that produces a typed value.
    ///
    /// The member receives a clone of the group trigger and should observe it
    /// at its suspension points. Its `Err(TaskError::Canceled)` return maps
    /// to [`Outcome::Cancelled`]; any other error marks the member `Failed`
    /// and becomes a candidate for first-error propagation. A panic inside
    /// the member is contained and reported as [`TaskError::Fatal`].
    pub fn spawn<T, F, Fut>(&mut self, name: impl Into<Arc<str>>, f: F) -> TaskHandle<T>
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, TaskError>> + Send + 'static,
        T: Send + 'static,
    {
        let name: Arc<str> = name.into();
        let token = self.token.clone();
        let bus = self.bus.clone();
        let board = Arc::clone(&self.board);
        let (tx, rx) = oneshot::channel();

        self.board.record(&name, TaskState::Pending);

        let member = Arc::clone(&name);
        self.set.spawn(async move {
            board.record(&member, TaskState::Running);
            bus.publish(Event::now(EventKind::TaskStarted).with_task(Arc::clone(&member)));

            let res = match std::panic::AssertUnwindSafe(f(token)).catch_unwind().await {
                Ok(res) => res,
                Err(panic) => Err(TaskError::Fatal {
                    error: panic_message(panic),
                }),
            };

            let (outcome, error) = match res {
                Ok(value) => (Outcome::Completed(value), None),
                Err(TaskError::Canceled) => (Outcome::Cancelled, None),
                Err(err) => (Outcome::Failed(err.clone()), Some(err)),
            };

            let state = outcome.state();
            // Receiver may already be gone; the exit record still carries
            // everything the group needs.
            let _ = tx.send(outcome);
            TaskExit {
                name: member,
                state,
                error,
            }
        });

        TaskHandle { name, rx }
    }

    /// Spawns a trait-object member (no value beyond success/failure).
    pub fn spawn_member(&mut self, task: TaskRef) -> TaskHandle<()> {
        let name: Arc<str> = Arc::from(task.name());
        self.spawn(name, move |ctx| async move { task.run(ctx).await })
    }

    /// Waits until every member has reached a terminal state.
    ///
    /// A member's failure fires the trigger so its siblings stop at their
    /// next suspension point; draining continues until the set is empty.
    /// After all members terminated, exactly one error — the **first by
    /// completion order** — is returned; cancelled members never produce an
    /// error. Publishes one terminal lifecycle event per member and
    /// `GroupClosed` at the end.
    pub async fn join_all(mut self) -> Result<(), TaskError> {
        let mut first_error: Option<TaskError> = None;

        while let Some(joined) = self.set.join_next().await {
            let exit = match joined {
                Ok(exit) => exit,
                Err(join_err) => {
                    // Unreachable in practice: member panics are contained by
                    // catch_unwind before they reach the join set.
                    self.cancel();
                    if first_error.is_none() {
                        first_error = Some(TaskError::Fatal {
                            error: join_err.to_string(),
                        });
                    }
                    continue;
                }
            };

            self.board.record(&exit.name, exit.state);
            match exit.error {
                Some(err) => {
                    self.cancel();
                    self.bus.publish(
                        Event::now(EventKind::TaskFailed)
                            .with_task(Arc::clone(&exit.name))
                            .with_reason(err.to_string()),
                    );
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
                None => {
                    let kind = match exit.state {
                        TaskState::Cancelled => EventKind::TaskCancelled,
                        _ => EventKind::TaskCompleted,
                    };
                    self.bus
                        .publish(Event::now(kind).with_task(Arc::clone(&exit.name)));
                }
            }

            // The trigger may have been fired by a member-held clone (the
            // completion guard) rather than by cancel(); announce that too.
            if self.token.is_cancelled() {
                self.announce_cancel();
            }
        }

        self.bus.publish(Event::now(EventKind::GroupClosed));
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Best-effort extraction of a panic payload message.
fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("task panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("task panicked: {s}")
    } else {
        "task panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::guard::cancel_on_exit;
    use crate::tasks::pause;
    use std::time::Duration;

    fn group() -> (TaskGroup, Arc<StateBoard>) {
        let board = Arc::new(StateBoard::new());
        (TaskGroup::new(Bus::new(64), Arc::clone(&board)), board)
    }

    #[tokio::test(start_paused = true)]
    async fn members_join_with_their_outcomes() {
        let (mut group, board) = group();
        let fast = group.spawn("fast", |_ctx| async { Ok::<_, TaskError>(1u64) });
        let slow = group.spawn("slow", |ctx| async move {
            pause(&ctx, Duration::from_millis(500)).await?;
            Ok::<_, TaskError>(2u64)
        });

        assert!(group.join_all().await.is_ok());
        assert!(matches!(fast.outcome().await, Outcome::Completed(1)));
        assert!(matches!(slow.outcome().await, Outcome::Completed(2)));
        assert!(board.all_terminal());
    }

    #[tokio::test(start_paused = true)]
    async fn failure_cancels_siblings_and_propagates() {
        let (mut group, board) = group();
        group.spawn("bad", |_ctx| async {
            Err::<(), _>(TaskError::fail("boom"))
        });
        let slow = group.spawn("slow", |ctx| async move {
            pause(&ctx, Duration::from_secs(3600)).await?;
            Ok::<_, TaskError>(())
        });

        let err = group.join_all().await.unwrap_err();
        assert_eq!(err, TaskError::fail("boom"));
        assert!(slow.outcome().await.is_cancelled());
        assert_eq!(board.state_of("bad"), Some(TaskState::Failed));
        assert_eq!(board.state_of("slow"), Some(TaskState::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn first_error_by_completion_order_wins() {
        let (mut group, _board) = group();
        group.spawn("later", |_ctx| async {
            // No suspension point before the failure would make completion
            // order racy; the sleep keeps it deterministic.
            tokio::time::sleep(Duration::from_millis(200)).await;
            Err::<(), _>(TaskError::fail("second"))
        });
        group.spawn("sooner", |_ctx| async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Err::<(), _>(TaskError::fail("first"))
        });

        let err = group.join_all().await.unwrap_err();
        assert_eq!(err, TaskError::fail("first"));
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_is_idempotent() {
        let (mut group, board) = group();
        let member = group.spawn("member", |ctx| async move {
            pause(&ctx, Duration::from_secs(3600)).await?;
            Ok::<_, TaskError>(())
        });

        group.cancel();
        group.cancel();
        group.cancel();

        assert!(group.join_all().await.is_ok());
        assert!(member.outcome().await.is_cancelled());
        assert_eq!(board.state_of("member"), Some(TaskState::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn panic_is_contained_as_fatal() {
        let (mut group, board) = group();
        group.spawn("panicky", |_ctx| async {
            panic!("kaboom");
            #[allow(unreachable_code)]
            Ok::<(), TaskError>(())
        });

        let err = group.join_all().await.unwrap_err();
        assert_eq!(err, TaskError::fatal("task panicked: kaboom"));
        assert_eq!(board.state_of("panicky"), Some(TaskState::Failed));
    }

    #[tokio::test(start_paused = true)]
    async fn guard_fired_trigger_is_announced_on_the_bus() {
        let board = Arc::new(StateBoard::new());
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let mut group = TaskGroup::new(bus, board);

        group.spawn("idle", |ctx| async move {
            pause(&ctx, Duration::from_secs(3600)).await?;
            Ok::<_, TaskError>(())
        });
        let work = group.spawn("work", |ctx| {
            let fut = async { Ok::<_, TaskError>(7u64) };
            cancel_on_exit(ctx, fut)
        });

        assert!(group.join_all().await.is_ok());
        assert!(matches!(work.outcome().await, Outcome::Completed(7)));

        // The guard fired the trigger without going through cancel(); the
        // bus must still see exactly one CancelRequested.
        let mut cancels = 0;
        while let Ok(ev) = rx.try_recv() {
            if matches!(ev.kind, EventKind::CancelRequested) {
                cancels += 1;
            }
        }
        assert_eq!(cancels, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn redundant_fires_are_announced_once() {
        let board = Arc::new(StateBoard::new());
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let mut group = TaskGroup::new(bus, board);

        group.spawn("member", |ctx| async move {
            pause(&ctx, Duration::from_secs(60)).await?;
            Ok::<_, TaskError>(())
        });
        group.cancel();
        group.cancel();
        assert!(group.join_all().await.is_ok());

        let mut cancels = 0;
        while let Ok(ev) = rx.try_recv() {
            if matches!(ev.kind, EventKind::CancelRequested) {
                cancels += 1;
            }
        }
        assert_eq!(cancels, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_members_are_not_errors() {
        let (mut group, _board) = group();
        group.spawn("member", |ctx| async move {
            pause(&ctx, Duration::from_secs(60)).await?;
            Ok::<_, TaskError>(())
        });
        group.cancel();
        assert!(group.join_all().await.is_ok());
    }
}
