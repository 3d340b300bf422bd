//! Public facade composing store, clock and cleanup schedule.

use std::sync::Arc;

use tracing::{debug, info};

use super::in_memory::InMemorySessionStore;
use super::record::SessionRecord;
use super::scheduler::CleanupScheduler;
use super::sweep::sweep;
use super::traits::SessionStore;
use crate::clock::{Clock, SystemClock};
use crate::config::CleanupConfig;
use crate::error::{Error, Result};

/// Session lifecycle registry.
///
/// One instance per process is the expected shape: construct it at startup
/// and share it behind an `Arc`. All methods take `&self` and may be called
/// concurrently from any number of threads or tasks; each mutation is a
/// single atomic store operation.
pub struct SessionRegistry {
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    scheduler: CleanupScheduler,
}

impl SessionRegistry {
    /// Registry over the in-memory store and the system clock.
    pub fn new() -> Self {
        Self::with_parts(Arc::new(InMemorySessionStore::new()), Arc::new(SystemClock))
    }

    /// Registry over caller-supplied store and clock implementations.
    pub fn with_parts(store: Arc<dyn SessionStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            scheduler: CleanupScheduler::new(),
        }
    }

    /// Start a session for `user_id`, or re-begin an ended one. Re-begin
    /// keeps the original `created_at` and clears `ended_at`.
    pub fn begin(&self, user_id: &str) -> Result<()> {
        validate_user_id(user_id)?;
        self.store.begin(user_id, self.clock.now_millis());
        debug!(user_id, "session begun");
        Ok(())
    }

    /// Mark the session `Terminated`, whatever state it was in; an expired
    /// record not yet swept is flipped too. The record stays in the store
    /// until the next sweep. No-op for unknown ids.
    pub fn terminate(&self, user_id: &str) -> Result<()> {
        validate_user_id(user_id)?;
        self.store.terminate(user_id, self.clock.now_millis());
        debug!(user_id, "session terminated");
        Ok(())
    }

    /// Record activity on an `Active` session. No-op for unknown or already
    /// ended ids.
    pub fn touch(&self, user_id: &str) -> Result<()> {
        validate_user_id(user_id)?;
        self.store.touch(user_id, self.clock.now_millis());
        Ok(())
    }

    /// Current record for `user_id`, if one is stored.
    pub fn session_state(&self, user_id: &str) -> Result<Option<SessionRecord>> {
        validate_user_id(user_id)?;
        Ok(self.store.get(user_id))
    }

    /// Run one cleanup sweep now, evicting terminated records and records
    /// idle longer than `timeout_millis`. Returns how many were removed.
    pub fn cleanup_inactive_sessions(&self, timeout_millis: i64) -> Result<usize> {
        let removed = sweep(self.store.as_ref(), self.clock.as_ref(), timeout_millis)?;
        if removed > 0 {
            info!(removed, "manual cleanup removed sessions");
        }
        Ok(removed)
    }

    /// Number of records currently stored. Despite the name this is the
    /// literal store size: terminated and expired records the sweep has not
    /// yet collected are counted too.
    pub fn active_session_count(&self) -> usize {
        self.store.count()
    }

    /// Start the background sweep: every `period_millis`, evict sessions
    /// idle longer than `timeout_millis`. Silent no-op if already running.
    /// Must be called from within a tokio runtime.
    pub fn start_auto_cleanup(&self, period_millis: i64, timeout_millis: i64) -> Result<()> {
        self.scheduler.start(
            Arc::clone(&self.store),
            Arc::clone(&self.clock),
            period_millis,
            timeout_millis,
        )
    }

    /// Start the background sweep from a config value.
    pub fn start_auto_cleanup_with(&self, config: &CleanupConfig) -> Result<()> {
        self.start_auto_cleanup(config.sweep_period_millis, config.idle_timeout_millis)
    }

    /// Stop the background sweep, if running.
    pub fn stop_auto_cleanup(&self) {
        self.scheduler.stop();
    }

    /// Whether the background sweep is currently scheduled.
    pub fn auto_cleanup_running(&self) -> bool {
        self.scheduler.is_running()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_user_id(user_id: &str) -> Result<()> {
    if user_id.is_empty() {
        return Err(Error::InvalidArgument(
            "user_id must be non-empty".to_string(),
        ));
    }
    Ok(())
}
