//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod backend;
pub mod chat;
pub mod dashboard;
pub mod logging;
pub mod report;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::backend::BackendConfig;
pub use self::chat::ChatConfig;
pub use self::dashboard::{CommunityConfig, DashboardConfig};
pub use self::logging::LoggingConfig;
pub use self::report::ReportConfig;
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Host-facing HTTP API settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Attendance backend connection settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Chat platform publishing settings.
    #[serde(default)]
    pub chat: ChatConfig,
    /// Dashboard surfaces and refresh policy.
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Periodic refresh scheduler settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Leaderboard and listing settings.
    #[serde(default)]
    pub report: ReportConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `base` (a path without extension, e.g. `config/default`) with an
    /// environment-specific overlay from the same directory and environment
    /// variables prefixed with `OFFICEHUB__`.
    pub fn load(base: &str, env: &str) -> Result<Self, AppError> {
        let dir = std::path::Path::new(base)
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| ".".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("OFFICEHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(AppError::configuration("backend.base_url must not be empty"));
        }
        if self.report.page_size == 0 {
            return Err(AppError::configuration("report.page_size must be at least 1"));
        }
        self.report.auto_signout_time()?;

        let mut seen = std::collections::HashSet::new();
        for community in &self.dashboard.communities {
            if !seen.insert(community.community_id) {
                return Err(AppError::configuration(format!(
                    "community {} is configured more than once",
                    community.community_id
                )));
            }
        }
        Ok(())
    }
}
