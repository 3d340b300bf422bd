//! Session store trait: the concurrency-safe mapping from user id to record.

use super::record::SessionRecord;

/// Concurrency-safe mapping from user id to session record.
///
/// Every mutating method is one atomic operation at one key: a caller never
/// observes or writes a torn record, and concurrent writers at the same key
/// resolve last-writer-wins. Implementations must not serialize unrelated
/// keys through a whole-map lock.
///
/// Timestamps are supplied by the caller so stores stay clock-free. All
/// methods are synchronous: each is a single map operation with nothing to
/// await.
pub trait SessionStore: Send + Sync {
    /// Create-or-update: an absent key gets a fresh `Active` record with
    /// `created_at = last_activity_at = now_millis`; a present key is
    /// re-begun in place (`Active` again, activity bumped, `ended_at`
    /// cleared) while `created_at` is preserved.
    fn begin(&self, user_id: &str, now_millis: i64);

    /// Update-if-present: mark the record `Terminated` with
    /// `ended_at = now_millis`, whatever its prior status. No-op for absent
    /// keys. Removal is the sweep's job, never this method's.
    fn terminate(&self, user_id: &str, now_millis: i64);

    /// Update-if-present: bump `last_activity_at`, but only while the record
    /// is still `Active`. No-op for absent, terminated or expired keys.
    fn touch(&self, user_id: &str, now_millis: i64);

    /// Current record for `user_id`, if any. No side effects.
    fn get(&self, user_id: &str) -> Option<SessionRecord>;

    /// Number of records currently stored, terminated and expired included.
    fn count(&self) -> usize;

    /// Point-in-time copy of every record, for the sweep to iterate. Weakly
    /// consistent: entries written during the scan may or may not appear.
    fn snapshot(&self) -> Vec<SessionRecord>;

    /// Conditional commit: replace the record at `expected.user_id` with
    /// `next` only if the stored value still equals `expected`. Returns
    /// whether the swap happened.
    fn replace_if_matches(&self, expected: &SessionRecord, next: SessionRecord) -> bool;

    /// Conditional remove under the same matching rule as
    /// [`replace_if_matches`](Self::replace_if_matches).
    fn remove_if_matches(&self, expected: &SessionRecord) -> bool;

    /// The name of this session store implementation.
    fn name(&self) -> &str;
}
