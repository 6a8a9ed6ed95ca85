//! Supervisor: one group, two siblings, one outcome.
//!
//! The [`Supervisor`] owns the event bus, a [`SubscriberSet`], a
//! [`StateBoard`], and the global [`Config`]. Its job is deliberately small:
//! open one [`TaskGroup`], spawn the decorative task and the
//! completion-guarded work task into it, block until both are terminal, then
//! return the work value or re-raise the group's first error.
//!
//! ## Control flow
//! ```text
//! caller ──► supervise(decorative, work)
//!              │
//!              ├─► TaskGroup::new()          one shared trigger
//!              ├─► spawn_member(decorative)  e.g. Spinner
//!              ├─► spawn(work_name,          work wrapped in
//!              │        cancel_on_exit)      the completion guard
//!              │
//!              ├─► join_all()                blocks until BOTH are terminal;
//!              │                             a failure fires the trigger and
//!              │                             is re-raised here
//!              └─► handle.outcome()          value / error / cancelled
//! ```
//!
//! Every path — success, work error, decorative error — ends with both tasks
//! terminal and the group scope closed before control returns to the caller.

use std::future::Future;
use std::sync::{Arc, Once};

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::board::StateBoard;
use crate::core::group::TaskGroup;
use crate::core::guard::cancel_on_exit;
use crate::error::TaskError;
use crate::events::Bus;
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::tasks::{SlowJob, Spinner, StdoutConsole, TaskRef};

/// Coordinates one task group: a decorative sibling and a guarded work task.
pub struct Supervisor {
    cfg: Config,
    bus: Bus,
    subs: Arc<SubscriberSet>,
    board: Arc<StateBoard>,
    listener: Once,
}

impl Supervisor {
    /// Creates a new supervisor with the given config and subscribers.
    pub fn new(cfg: Config, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(subscribers));
        Self {
            cfg,
            bus,
            subs,
            board: Arc::new(StateBoard::new()),
            listener: Once::new(),
        }
    }

    /// The authoritative per-task state map; consistent once a run returns.
    pub fn board(&self) -> Arc<StateBoard> {
        Arc::clone(&self.board)
    }

    /// The event bus; subscribe for lifecycle events of subsequent runs.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Zero-argument entry point: spinner plus slow job, both from [`Config`].
    ///
    /// Returns the work stand-in's value (`answer`) on success; any error in
    /// either task aborts the run and is returned here.
    pub async fn run(&self) -> Result<u64, TaskError> {
        let spinner = Spinner::new(
            self.cfg.message.clone(),
            self.cfg.spin_interval,
            Arc::new(StdoutConsole),
        );
        let job = SlowJob::new(self.cfg.work_delay, self.cfg.answer);
        self.supervise(Arc::new(spinner), "work", move |ctx| async move {
            job.run(ctx).await
        })
        .await
    }

    /// Supervises one decorative task alongside one guarded work task.
    ///
    /// Opens a [`TaskGroup`], spawns both members, and blocks until the
    /// group scope closes — which only happens once **both** members are
    /// terminal. The work task is wrapped in [`cancel_on_exit`], so its
    /// completion (or failure) fires the trigger and stops the decorative
    /// sibling promptly.
    ///
    /// Returns the work value, or the group's first error by completion
    /// order: a work error and a decorative error are treated symmetrically,
    /// and either cancels the other sibling.
    pub async fn supervise<T, W, Fut>(
        &self,
        decorative: TaskRef,
        work_name: &str,
        work: W,
    ) -> Result<T, TaskError>
    where
        W: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, TaskError>> + Send + 'static,
        T: Send + 'static,
    {
        self.subscriber_listener();

        let mut group = TaskGroup::new(self.bus.clone(), Arc::clone(&self.board));
        group.spawn_member(decorative);
        let handle = group.spawn(work_name, move |ctx| {
            let fut = work(ctx.clone());
            cancel_on_exit(ctx, fut)
        });

        let joined = group.join_all().await;
        let outcome = handle.outcome().await;
        joined?;
        outcome.into_result()
    }

    /// Subscribes to the bus and forwards events to the subscriber set
    /// (fire-and-forget).
    ///
    /// Spawned at most once per supervisor, on the first run; a reused
    /// supervisor keeps forwarding through the same listener instead of
    /// stacking a fresh one per run (which would deliver every event N
    /// times). The listener exits when the supervisor — and with it the bus
    /// sender — is dropped.
    fn subscriber_listener(&self) {
        if self.subs.is_empty() {
            return;
        }
        self.listener.call_once(|| {
            let mut rx = self.bus.subscribe();
            let subs = Arc::clone(&self.subs);
            tokio::spawn(async move {
                while let Ok(ev) = rx.recv().await {
                    subs.emit(&ev);
                }
            });
        });
    }
}
