//! Settable clock for deterministic tests.

use std::sync::atomic::{AtomicI64, Ordering};

use super::traits::Clock;

/// Stub clock whose time only moves when told to. Lets tests drive the
/// staleness math without sleeping.
pub struct ManualClock {
    now_millis: AtomicI64,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now_millis: AtomicI64::new(start_millis),
        }
    }

    /// Jump the clock to an absolute time.
    pub fn set(&self, millis: i64) {
        self.now_millis.store(millis, Ordering::SeqCst);
    }

    /// Move the clock forward by `millis`.
    pub fn advance(&self, millis: i64) {
        self.now_millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now_millis.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "manual"
    }
}
