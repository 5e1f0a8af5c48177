//! # Change watcher
//!
//! Detects store-side changes made by other writers and fans the refreshed
//! record set out to subscribers.
//!
//! One background task polls the storage collaborator on a fixed cadence:
//! "how many records were registered after the last check?". When the
//! answer is non-zero, it fetches the full current set once and invokes every
//! subscriber with it, in subscription order. A failing subscriber is logged
//! and skipped; it can never starve the remaining subscribers or kill the
//! poll loop. Ticks are strictly serialized: the task is single and missed
//! ticks are delayed, never stacked.
//!
//! Shutdown is cooperative. [`ChangeWatcher::stop`] signals a watch channel,
//! waits for the in-flight tick under a bounded grace period, and aborts the
//! task past it.

mod error;

pub use error::{WatcherError, WatcherErrorExt};

use chrono::{DateTime, Utc};
use densite_domain::Locality;
use densite_store::LocalityStore;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Default cadence between two poll ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
/// Default grace period `stop()` grants an in-flight tick.
pub const DEFAULT_STOP_GRACE: Duration = Duration::from_secs(10);

/// Callback invoked with the full current record set on detected change.
pub type UpdateCallback = Arc<dyn Fn(&[Locality]) -> anyhow::Result<()> + Send + Sync>;

/// Handle returned by [`ChangeWatcher::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: u64,
    callback: UpdateCallback,
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber").field("id", &self.id).finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct WatcherInner {
    store: Arc<dyn LocalityStore>,
    subscribers: Mutex<Vec<Subscriber>>,
    last_checked_at: Mutex<DateTime<Utc>>,
    next_id: AtomicU64,
}

#[derive(Debug)]
struct Runner {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Periodic store poller with subscriber fan-out.
#[derive(Debug)]
pub struct ChangeWatcher {
    inner: Arc<WatcherInner>,
    interval: Duration,
    stop_grace: Duration,
    runner: Mutex<Option<Runner>>,
}

impl ChangeWatcher {
    /// Creates a watcher over the given store with the default timing.
    ///
    /// `last_checked_at` starts at the moment of construction: records already
    /// present are not reported as changes.
    #[must_use]
    pub fn new(store: Arc<dyn LocalityStore>) -> Self {
        Self::with_timing(store, DEFAULT_INTERVAL, DEFAULT_STOP_GRACE)
    }

    /// Creates a watcher with an explicit poll interval and stop grace period.
    #[must_use]
    pub fn with_timing(store: Arc<dyn LocalityStore>, interval: Duration, stop_grace: Duration) -> Self {
        Self {
            inner: Arc::new(WatcherInner {
                store,
                subscribers: Mutex::new(Vec::new()),
                last_checked_at: Mutex::new(Utc::now()),
                next_id: AtomicU64::new(1),
            }),
            interval,
            stop_grace,
            runner: Mutex::new(None),
        }
    }

    /// Registers a callback invoked with the full record set on every
    /// detected change. Notifications arrive in subscription order.
    pub fn subscribe(
        &self,
        callback: impl Fn(&[Locality]) -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers.lock().push(Subscriber { id, callback: Arc::new(callback) });
        debug!(subscriber = id, "Subscriber registered");
        SubscriptionId(id)
    }

    /// Removes a subscriber. Safe to call while a notification is in flight:
    /// the notify loop works off a snapshot taken at its start.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.inner.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id.0);
        before != subscribers.len()
    }

    /// Starts the periodic poll task.
    ///
    /// # Errors
    /// Returns [`WatcherError::AlreadyRunning`] if the task is already live.
    /// Stop the watcher first to restart it.
    pub fn start(&self) -> Result<(), WatcherError> {
        let mut runner = self.runner.lock();
        if runner.as_ref().is_some_and(|r| !r.handle.is_finished()) {
            return Err(WatcherError::AlreadyRunning {
                message: "the polling task is already live".into(),
                context: None,
            });
        }

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let inner = Arc::clone(&self.inner);
        let interval = self.interval;

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = stop_rx.changed() => {
                        debug!("Change watcher stop signal received");
                        break;
                    }
                    _ = ticker.tick() => inner.tick(),
                }
            }
        });

        *runner = Some(Runner { stop_tx, handle });
        info!(interval = ?self.interval, "Change watcher started");
        Ok(())
    }

    /// Signals the poll task to stop and waits for it.
    ///
    /// Waits up to the configured grace period for the in-flight tick, then
    /// abandons the task and aborts it. The abort lands at the task's next
    /// await point: a tick blocked inside a synchronous store call or
    /// subscriber keeps its worker thread busy until that call returns, but
    /// `stop()` itself returns once the grace period elapses. Idempotent,
    /// and safe to call without a prior [`ChangeWatcher::start`].
    pub async fn stop(&self) {
        let runner = { self.runner.lock().take() };
        let Some(Runner { stop_tx, handle }) = runner else {
            return;
        };

        let _ = stop_tx.send(true);
        let abort = handle.abort_handle();
        match time::timeout(self.stop_grace, handle).await {
            Ok(_) => info!("Change watcher stopped"),
            Err(_) => {
                abort.abort();
                warn!(grace = ?self.stop_grace, "Change watcher did not stop in time; aborted");
            },
        }
    }

    /// Whether the poll task is currently live.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.runner.lock().as_ref().is_some_and(|r| !r.handle.is_finished())
    }

    /// Timestamp of the last completed change check.
    #[must_use]
    pub fn last_checked_at(&self) -> DateTime<Utc> {
        *self.inner.last_checked_at.lock()
    }
}

impl WatcherInner {
    /// One poll cycle: check, fetch-and-notify on change, advance the clock.
    ///
    /// The timestamp advances unconditionally, including after a failed store
    /// query; a change landing in that window is dropped and the next tick
    /// polls from the new stamp.
    fn tick(&self) {
        let since = *self.last_checked_at.lock();

        match self.store.count_changed_since(since) {
            Ok(0) => {},
            Ok(changed) => {
                debug!(changed, "Store-side changes detected");
                match self.store.fetch_all() {
                    Ok(localities) => self.notify(&localities),
                    Err(err) => warn!(error = %err, "Fetching changed records failed"),
                }
            },
            Err(err) => warn!(error = %err, "Change check failed; retrying next tick"),
        }

        *self.last_checked_at.lock() = Utc::now();
    }

    fn notify(&self, localities: &[Locality]) {
        // stable snapshot: (un)subscribing mid-notification affects the next
        // tick, not this one
        let snapshot: Vec<(u64, UpdateCallback)> =
            self.subscribers.lock().iter().map(|s| (s.id, Arc::clone(&s.callback))).collect();

        for (id, callback) in snapshot {
            if let Err(err) = callback(localities) {
                warn!(subscriber = id, error = %err, "Subscriber failed; skipping");
            }
        }
    }
}
