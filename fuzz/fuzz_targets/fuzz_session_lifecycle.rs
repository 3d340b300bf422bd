#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use vigil::{InMemorySessionStore, ManualClock, SessionRegistry, SessionStatus};

// Drive an arbitrary op sequence over a small user pool and check the record
// invariants after every step: timestamps stay ordered and `ended_at` is set
// exactly when the session has left `Active`.
fuzz_target!(|data: &[u8]| {
    let clock = Arc::new(ManualClock::new(0));
    let registry =
        SessionRegistry::with_parts(Arc::new(InMemorySessionStore::new()), clock.clone());

    for chunk in data.chunks(2) {
        let op = chunk[0] % 5;
        let user = format!("user-{}", chunk.get(1).copied().unwrap_or(0) % 4);
        clock.advance(i64::from(chunk[0] % 7));

        match op {
            0 => registry.begin(&user).unwrap(),
            1 => registry.touch(&user).unwrap(),
            2 => registry.terminate(&user).unwrap(),
            3 => {
                let _ = registry.cleanup_inactive_sessions(1).unwrap();
            }
            _ => {
                let _ = registry.active_session_count();
            }
        }

        if let Some(record) = registry.session_state(&user).unwrap() {
            assert!(record.created_at <= record.last_activity_at);
            assert_eq!(
                record.ended_at.is_none(),
                record.status == SessionStatus::Active
            );
        }
    }
});
