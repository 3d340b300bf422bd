//! Stale and terminated session eviction.

use tracing::debug;

use super::record::SessionStatus;
use super::traits::SessionStore;
use crate::clock::Clock;
use crate::error::{Error, Result};

/// Sweep the store once: drop every `Terminated` record and expire-then-drop
/// every record idle longer than `timeout_millis`. Returns how many records
/// were removed.
///
/// Expiry is two conditional commits (mark `Expired`, then remove), each of
/// which fails harmlessly if a concurrent writer got to the key first. A
/// record touched mid-sweep therefore survives this pass and is reconsidered
/// on the next one: eviction lands within one extra period, not exactly at
/// the timeout.
pub fn sweep(store: &dyn SessionStore, clock: &dyn Clock, timeout_millis: i64) -> Result<usize> {
    if timeout_millis <= 0 {
        return Err(Error::InvalidArgument(format!(
            "timeout_millis must be > 0, got {timeout_millis}"
        )));
    }

    let now = clock.now_millis();
    let mut removed = 0;

    for record in store.snapshot() {
        if record.status == SessionStatus::Terminated {
            if store.remove_if_matches(&record) {
                removed += 1;
            }
            continue;
        }

        let inactive_for = now - record.last_activity_at;
        if inactive_for > timeout_millis {
            let expired = record
                .clone()
                .with_status(SessionStatus::Expired)
                .with_ended_at(Some(now));
            if store.replace_if_matches(&record, expired.clone())
                && store.remove_if_matches(&expired)
            {
                removed += 1;
            }
        }
    }

    if removed > 0 {
        debug!(removed, "sweep evicted sessions");
    }
    Ok(removed)
}
