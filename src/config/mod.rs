//! Cleanup tuning knobs for the background sweep.

use serde::{Deserialize, Serialize};

/// Background cleanup configuration, all values in milliseconds.
///
/// Both values must be positive; the registry validates them when the
/// schedule is started.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// How often the background sweep runs.
    pub sweep_period_millis: i64,
    /// How long a session may sit idle before it counts as stale.
    pub idle_timeout_millis: i64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            sweep_period_millis: 60_000,
            idle_timeout_millis: 3_600_000,
        }
    }
}
