//! Chat platform publishing configuration.

use serde::{Deserialize, Serialize};

/// Settings for the REST publisher that creates and edits dashboard messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// REST API base, e.g. `https://discord.com/api/v10`.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Bot token used in the `Authorization: Bot <token>` header.
    #[serde(default)]
    pub bot_token: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            bot_token: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_api_base() -> String {
    "https://discord.com/api/v10".to_string()
}

fn default_timeout() -> u64 {
    10
}
