//! Clock trait supplying wall-clock time to the registry.

/// Source of wall-clock time in milliseconds since the Unix epoch.
///
/// Session records only ever need millisecond ordering, so the trait deals
/// in raw `i64` millis rather than full `DateTime` values.
pub trait Clock: Send + Sync {
    /// Current wall-clock time as milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;

    /// The name of this clock implementation.
    fn name(&self) -> &str;
}
