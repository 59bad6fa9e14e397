//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use crate::output;
use officehub_core::config::AppConfig;
use officehub_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => output::print_item(&masked(config)),
    }
    Ok(())
}

/// Copy of `config` with tokens replaced by `****`.
fn masked(config: &AppConfig) -> AppConfig {
    let mut config = config.clone();
    config.backend.api_key = config.backend.api_key.as_ref().map(|_| mask());
    config.server.api_token = config.server.api_token.as_ref().map(|_| mask());
    if !config.chat.bot_token.is_empty() {
        config.chat.bot_token = mask();
    }
    config
}

fn mask() -> String {
    "****".to_string()
}
