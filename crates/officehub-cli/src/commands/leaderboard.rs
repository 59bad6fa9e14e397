//! Leaderboard command.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use officehub_core::config::AppConfig;
use officehub_core::error::AppError;
use officehub_report::{LeaderboardEntry, Metric, Period, ReportEngine};

/// Arguments for the leaderboard command
#[derive(Debug, Args)]
pub struct LeaderboardArgs {
    /// `hours` or `visits`
    #[arg(short, long, default_value = "hours")]
    pub metric: Metric,
    /// `week`, `month`, `semester` or `all`
    #[arg(short, long, default_value = "week")]
    pub period: Period,
    /// Number of members to show
    #[arg(short = 'n', long)]
    pub top: Option<usize>,
}

/// Leaderboard display row
#[derive(Debug, Serialize, Tabled)]
struct RankRow {
    /// Rank
    rank: usize,
    /// Name
    name: String,
    /// Hours
    hours: String,
    /// Visits
    visits: u32,
}

fn rows(entries: &[LeaderboardEntry]) -> Vec<RankRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| RankRow {
            rank: i + 1,
            name: e.display_name.clone(),
            hours: format!("{:.1}", e.hours()),
            visits: e.visits,
        })
        .collect()
}

/// Execute the leaderboard command
pub async fn execute(
    args: &LeaderboardArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let backend = Arc::new(super::backend_client(config)?);
    let reports = ReportEngine::new(backend, config.report.clone())?;
    let top_n = args.top.unwrap_or_else(|| reports.default_top_n());

    let entries = reports
        .build_leaderboard(args.metric, args.period, top_n)
        .await?;

    if format == OutputFormat::Table {
        println!("Leaderboard: {} ({})", args.metric, args.period.label());
    }
    output::print_list(&rows(&entries), format);
    Ok(())
}
