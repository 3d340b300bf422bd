//! Immutable session record value model.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a tracked session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Session is live and accumulating activity.
    Active,
    /// Session was explicitly ended and is awaiting sweep.
    Terminated,
    /// Session went stale and was marked by the sweep, awaiting removal.
    Expired,
}

/// One user's session state.
///
/// A pure value: updates go through the consuming `with_*` constructors,
/// which copy every untouched field. Nothing is ever mutated in place, so a
/// reader always sees one internally consistent record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRecord {
    /// Identity key. Never changes after creation.
    pub user_id: String,
    pub status: SessionStatus,
    /// Epoch millis. Set once at first creation and preserved when an ended
    /// session is re-begun.
    pub created_at: i64,
    /// Epoch millis. Non-decreasing while `Active`, frozen afterwards.
    pub last_activity_at: i64,
    /// Epoch millis. `None` exactly while the session is `Active`.
    pub ended_at: Option<i64>,
}

impl SessionRecord {
    /// Fresh `Active` record for `user_id`, created at `now_millis`.
    pub fn new(user_id: impl Into<String>, now_millis: i64) -> Self {
        Self {
            user_id: user_id.into(),
            status: SessionStatus::Active,
            created_at: now_millis,
            last_activity_at: now_millis,
            ended_at: None,
        }
    }

    pub fn with_status(self, status: SessionStatus) -> Self {
        Self { status, ..self }
    }

    pub fn with_last_activity(self, at_millis: i64) -> Self {
        Self {
            last_activity_at: at_millis,
            ..self
        }
    }

    pub fn with_ended_at(self, ended_at: Option<i64>) -> Self {
        Self { ended_at, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_active_with_aligned_timestamps() {
        let record = SessionRecord::new("user-1", 1000);
        assert_eq!(record.status, SessionStatus::Active);
        assert_eq!(record.created_at, 1000);
        assert_eq!(record.last_activity_at, 1000);
        assert_eq!(record.ended_at, None);
    }

    #[test]
    fn with_status_copies_everything_else() {
        let record = SessionRecord::new("user-1", 1000);
        let terminated = record.clone().with_status(SessionStatus::Terminated);
        assert_eq!(terminated.status, SessionStatus::Terminated);
        assert_eq!(terminated.user_id, record.user_id);
        assert_eq!(terminated.created_at, record.created_at);
        assert_eq!(terminated.last_activity_at, record.last_activity_at);
        assert_eq!(terminated.ended_at, record.ended_at);
    }

    #[test]
    fn with_last_activity_copies_everything_else() {
        let record = SessionRecord::new("user-1", 1000);
        let touched = record.clone().with_last_activity(2000);
        assert_eq!(touched.last_activity_at, 2000);
        assert_eq!(touched.status, record.status);
        assert_eq!(touched.created_at, 1000);
        assert_eq!(touched.ended_at, None);
    }

    #[test]
    fn with_ended_at_sets_and_clears() {
        let record = SessionRecord::new("user-1", 1000);
        let ended = record.clone().with_ended_at(Some(5000));
        assert_eq!(ended.ended_at, Some(5000));
        let reopened = ended.with_ended_at(None);
        assert_eq!(reopened.ended_at, None);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&SessionStatus::Terminated).unwrap();
        assert_eq!(json, r#""terminated""#);
    }
}
