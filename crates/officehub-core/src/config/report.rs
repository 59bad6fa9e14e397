//! Leaderboard and listing configuration.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Report engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Time of day (`HH:MM`) at which the backend force-signs-out everyone.
    /// Visits ending exactly at this time are excluded from rankings.
    #[serde(default = "default_auto_signout")]
    pub auto_signout_time: String,
    /// Items per page for paginated listings.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Leaderboard length when the caller does not specify one.
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
    /// Upper bound for the visit-history `limit` argument.
    #[serde(default = "default_history_max")]
    pub history_max: usize,
}

impl ReportConfig {
    /// Parse [`Self::auto_signout_time`].
    pub fn auto_signout_time(&self) -> Result<NaiveTime, AppError> {
        NaiveTime::parse_from_str(&self.auto_signout_time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&self.auto_signout_time, "%H:%M:%S"))
            .map_err(|e| {
                AppError::configuration(format!(
                    "report.auto_signout_time '{}' is not HH:MM: {e}",
                    self.auto_signout_time
                ))
            })
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            auto_signout_time: default_auto_signout(),
            page_size: default_page_size(),
            default_top_n: default_top_n(),
            history_max: default_history_max(),
        }
    }
}

fn default_auto_signout() -> String {
    "04:00".to_string()
}

fn default_page_size() -> usize {
    10
}

fn default_top_n() -> usize {
    10
}

fn default_history_max() -> usize {
    25
}
