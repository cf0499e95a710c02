use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Knobs of the background syntax check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub debounce_ms: u64,
    pub analyzer_timeout_ms: u64,
    pub worker_threads: usize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            analyzer_timeout_ms: 2000,
            worker_threads: 2,
        }
    }
}

impl CheckConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn analyzer_timeout(&self) -> Duration {
        Duration::from_millis(self.analyzer_timeout_ms.max(1))
    }

    /// How long an unanswered check may hold back the next one.
    pub fn stall_after(&self) -> Duration {
        self.analyzer_timeout() + Duration::from_secs(1)
    }
}
