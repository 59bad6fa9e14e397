//! CLI command definitions and dispatch.

pub mod config;
pub mod history;
pub mod leaderboard;
pub mod members;
pub mod presence;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use officehub_backend::BackendClient;
use officehub_core::config::AppConfig;
use officehub_core::error::AppError;

/// OfficeHub: office presence administration
#[derive(Debug, Parser)]
#[command(name = "officehub", version, about, long_about = None)]
pub struct Cli {
    /// Path to the base configuration file, without extension
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded from the same directory
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Registered member management
    Members(members::MembersArgs),
    /// Sign a member in
    SignIn(presence::MemberArg),
    /// Sign a member out
    SignOut(presence::MemberArg),
    /// Sign everyone out
    SignOutAll(presence::ConfirmArg),
    /// Recent visits, newest first
    History(history::HistoryArgs),
    /// Raw badge scans
    Scans,
    /// Visit record maintenance
    Visits(history::VisitsArgs),
    /// Ranked attendance
    Leaderboard(leaderboard::LeaderboardArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(&self.config, &self.env)?;
        match &self.command {
            Commands::Members(args) => members::execute(args, &config, self.format).await,
            Commands::SignIn(args) => presence::sign_in(args, &config).await,
            Commands::SignOut(args) => presence::sign_out(args, &config).await,
            Commands::SignOutAll(args) => presence::sign_out_all(args, &config).await,
            Commands::History(args) => history::history(args, &config, self.format).await,
            Commands::Scans => history::scans(&config, self.format).await,
            Commands::Visits(args) => history::visits(args, &config).await,
            Commands::Leaderboard(args) => leaderboard::execute(args, &config, self.format).await,
            Commands::Config(args) => config::execute(args, &config),
        }
    }
}

/// Helper: load configuration from file and environment
pub fn load_config(base: &str, env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(base.trim_end_matches(".toml"), env)
}

/// Helper: create the backend client from config
pub fn backend_client(config: &AppConfig) -> Result<BackendClient, AppError> {
    Ok(BackendClient::new(&config.backend)?)
}

/// Display format for wall-clock times in tables.
pub(crate) const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
