//! System clock implementation.

use chrono::Utc;

use super::traits::Clock;

/// Wall clock backed by the system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn name(&self) -> &str {
        "system"
    }
}
