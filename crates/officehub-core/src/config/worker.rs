//! Periodic refresh scheduler configuration.

use serde::{Deserialize, Serialize};

/// Scheduler configuration for the timer trigger producer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the periodic refresh is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression (with seconds) for the dashboard refresh.
    #[serde(default = "default_refresh_cron")]
    pub refresh_cron: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            refresh_cron: default_refresh_cron(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_refresh_cron() -> String {
    "0 * * * * *".to_string()
}
