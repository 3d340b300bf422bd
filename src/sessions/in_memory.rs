//! In-memory session store implementation.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::record::{SessionRecord, SessionStatus};
use super::traits::SessionStore;

/// An in-memory session store backed by a sharded concurrent hash map.
///
/// Updates go through the map's entry API, so each one holds exactly one
/// shard lock for the duration of its read-modify-write. Keys on different
/// shards never contend, and same-key races resolve last-writer-wins.
pub struct InMemorySessionStore {
    sessions: DashMap<String, SessionRecord>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn begin(&self, user_id: &str, now_millis: i64) {
        match self.sessions.entry(user_id.to_string()) {
            Entry::Occupied(mut entry) => {
                let next = entry
                    .get()
                    .clone()
                    .with_status(SessionStatus::Active)
                    .with_last_activity(now_millis)
                    .with_ended_at(None);
                entry.insert(next);
            }
            Entry::Vacant(entry) => {
                entry.insert(SessionRecord::new(user_id, now_millis));
            }
        }
    }

    fn terminate(&self, user_id: &str, now_millis: i64) {
        if let Some(mut entry) = self.sessions.get_mut(user_id) {
            let next = entry
                .value()
                .clone()
                .with_status(SessionStatus::Terminated)
                .with_ended_at(Some(now_millis));
            *entry.value_mut() = next;
        }
    }

    fn touch(&self, user_id: &str, now_millis: i64) {
        if let Some(mut entry) = self.sessions.get_mut(user_id) {
            if entry.value().status == SessionStatus::Active {
                let next = entry.value().clone().with_last_activity(now_millis);
                *entry.value_mut() = next;
            }
        }
    }

    fn get(&self, user_id: &str) -> Option<SessionRecord> {
        self.sessions.get(user_id).map(|entry| entry.value().clone())
    }

    fn count(&self) -> usize {
        self.sessions.len()
    }

    fn snapshot(&self) -> Vec<SessionRecord> {
        self.sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    fn replace_if_matches(&self, expected: &SessionRecord, next: SessionRecord) -> bool {
        match self.sessions.entry(expected.user_id.clone()) {
            Entry::Occupied(mut entry) if entry.get() == expected => {
                entry.insert(next);
                true
            }
            _ => false,
        }
    }

    fn remove_if_matches(&self, expected: &SessionRecord) -> bool {
        self.sessions
            .remove_if(&expected.user_id, |_, current| current == expected)
            .is_some()
    }

    fn name(&self) -> &str {
        "in_memory"
    }
}
