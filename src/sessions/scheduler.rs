//! Background cleanup schedule.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::sweep::sweep;
use super::traits::SessionStore;
use crate::clock::Clock;
use crate::error::{Error, Result};

/// Repeats the cleanup sweep at a fixed period on one background task.
///
/// At most one schedule exists at a time: `start` while a task is live is a
/// silent no-op. A failing sweep iteration is logged and dropped; the
/// schedule itself never dies with it.
pub struct CleanupScheduler {
    task: Mutex<Option<JoinHandle<()>>>,
}

impl CleanupScheduler {
    pub fn new() -> Self {
        Self {
            task: Mutex::new(None),
        }
    }

    /// Sweep every `period_millis`, evicting sessions idle longer than
    /// `timeout_millis`. The first sweep lands one full period after start.
    /// Must be called from within a tokio runtime.
    ///
    /// The already-running check comes before argument validation, so a
    /// redundant `start` never fails, whatever its arguments.
    pub fn start(
        &self,
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        period_millis: i64,
        timeout_millis: i64,
    ) -> Result<()> {
        let mut task = self.task.lock();
        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            debug!("cleanup already scheduled, ignoring start");
            return Ok(());
        }
        if period_millis <= 0 || timeout_millis <= 0 {
            return Err(Error::InvalidArgument(format!(
                "period_millis and timeout_millis must be > 0, got {period_millis} and {timeout_millis}"
            )));
        }

        let period = Duration::from_millis(period_millis as u64);
        let handle = tokio::spawn(async move {
            let start_at = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start_at, period);
            loop {
                ticker.tick().await;
                match sweep(store.as_ref(), clock.as_ref(), timeout_millis) {
                    Ok(removed) => {
                        if removed > 0 {
                            debug!(removed, "scheduled sweep evicted sessions");
                        }
                    }
                    Err(e) => warn!(error = %e, "scheduled sweep failed, keeping schedule"),
                }
            }
        });
        *task = Some(handle);
        info!(period_millis, timeout_millis, "cleanup schedule started");
        Ok(())
    }

    /// Cancel the schedule immediately. Best effort: an iteration already in
    /// flight may be cut mid-pass. A later `start` arms a fresh schedule.
    pub fn stop(&self) {
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
            debug!("cleanup schedule stopped");
        }
    }

    /// Whether a live schedule exists.
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for CleanupScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CleanupScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::sessions::in_memory::InMemorySessionStore;
    use crate::sessions::record::SessionRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn start_rejects_non_positive_args() {
        let scheduler = CleanupScheduler::new();
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(0));

        let result = scheduler.start(Arc::clone(&store), Arc::clone(&clock), 0, 1000);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        let result = scheduler.start(store, clock, 1000, -1);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        assert!(!scheduler.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn scheduled_sweeps_evict_stale_sessions() {
        let scheduler = CleanupScheduler::new();
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let clock = Arc::new(ManualClock::new(0));

        store.begin("user-a", 0);
        clock.set(10_000);

        scheduler
            .start(Arc::clone(&store), clock, 1000, 3000)
            .unwrap();
        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert!(store.get("user-a").is_none());
        scheduler.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn start_while_running_silently_ignores_arguments() {
        let scheduler = CleanupScheduler::new();
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(0));

        scheduler
            .start(Arc::clone(&store), Arc::clone(&clock), 1000, 1000)
            .unwrap();
        // Invalid arguments while running: no error, schedule untouched.
        scheduler.start(store, clock, -1, -1).unwrap();
        assert!(scheduler.is_running());
        scheduler.stop();
    }

    #[tokio::test]
    async fn stop_then_start_rearms() {
        let scheduler = CleanupScheduler::new();
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(0));

        scheduler
            .start(Arc::clone(&store), Arc::clone(&clock), 1000, 1000)
            .unwrap();
        assert!(scheduler.is_running());

        scheduler.stop();
        assert!(!scheduler.is_running());

        scheduler.start(store, clock, 1000, 1000).unwrap();
        assert!(scheduler.is_running());
        scheduler.stop();
    }

    /// Store stub counting snapshot calls, so a test can count sweeps.
    struct SweepCountingStore {
        inner: InMemorySessionStore,
        sweeps: AtomicUsize,
    }

    impl SessionStore for SweepCountingStore {
        fn begin(&self, user_id: &str, now_millis: i64) {
            self.inner.begin(user_id, now_millis);
        }
        fn terminate(&self, user_id: &str, now_millis: i64) {
            self.inner.terminate(user_id, now_millis);
        }
        fn touch(&self, user_id: &str, now_millis: i64) {
            self.inner.touch(user_id, now_millis);
        }
        fn get(&self, user_id: &str) -> Option<SessionRecord> {
            self.inner.get(user_id)
        }
        fn count(&self) -> usize {
            self.inner.count()
        }
        fn snapshot(&self) -> Vec<SessionRecord> {
            self.sweeps.fetch_add(1, Ordering::SeqCst);
            self.inner.snapshot()
        }
        fn replace_if_matches(&self, expected: &SessionRecord, next: SessionRecord) -> bool {
            self.inner.replace_if_matches(expected, next)
        }
        fn remove_if_matches(&self, expected: &SessionRecord) -> bool {
            self.inner.remove_if_matches(expected)
        }
        fn name(&self) -> &str {
            "sweep_counting"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_keeps_exactly_one_schedule() {
        let scheduler = CleanupScheduler::new();
        let store = Arc::new(SweepCountingStore {
            inner: InMemorySessionStore::new(),
            sweeps: AtomicUsize::new(0),
        });
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(0));

        let as_store: Arc<dyn SessionStore> = store.clone() as Arc<dyn SessionStore>;
        scheduler
            .start(Arc::clone(&as_store), Arc::clone(&clock), 1000, 1000)
            .unwrap();
        scheduler.start(as_store, clock, 1000, 1000).unwrap();

        // Three periods elapse: one schedule means exactly three sweeps.
        tokio::time::sleep(Duration::from_millis(3100)).await;
        assert_eq!(store.sweeps.load(Ordering::SeqCst), 3);
        scheduler.stop();
    }
}
