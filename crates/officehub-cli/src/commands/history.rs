//! Visit history, scan history and visit deletion.

use chrono::NaiveDateTime;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::TIME_FORMAT;
use crate::output::{self, OutputFormat};
use officehub_backend::{AttendanceBackend, ScanEvent, VisitRange, VisitRecord};
use officehub_core::config::AppConfig;
use officehub_core::error::AppError;
use officehub_core::types::timestamp;
use officehub_report::ReportEngine;

/// Arguments for the history command
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Number of visits to show
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,
}

/// Arguments for visit maintenance
#[derive(Debug, Args)]
pub struct VisitsArgs {
    /// Visits subcommand
    #[command(subcommand)]
    pub command: VisitsCommand,
}

/// Visit subcommands
#[derive(Debug, Subcommand)]
pub enum VisitsCommand {
    /// Delete visits checked in within `[since, until)`
    Delete {
        /// Inclusive start, e.g. 2025-03-01T00:00
        #[arg(long, value_parser = parse_time)]
        since: NaiveDateTime,
        /// Exclusive end
        #[arg(long, value_parser = parse_time)]
        until: NaiveDateTime,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn parse_time(raw: &str) -> Result<NaiveDateTime, String> {
    timestamp::parse_wall_clock(raw).ok_or_else(|| format!("invalid time '{raw}'"))
}

/// Visit display row
#[derive(Debug, Serialize, Tabled)]
struct VisitRow {
    /// Name
    name: String,
    /// Check-in
    check_in: String,
    /// Check-out
    check_out: String,
    /// Length
    duration: String,
}

impl From<&VisitRecord> for VisitRow {
    fn from(v: &VisitRecord) -> Self {
        Self {
            name: v.display_name.clone(),
            check_in: v.check_in.format(TIME_FORMAT).to_string(),
            check_out: v
                .check_out
                .map(|t| t.format(TIME_FORMAT).to_string())
                .unwrap_or_else(|| "in office".to_string()),
            duration: v
                .duration()
                .map(|d| format!("{}h {:02}m", d.num_hours(), d.num_minutes() % 60))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Scan display row
#[derive(Debug, Serialize, Tabled)]
struct ScanRow {
    /// UID
    uid: String,
    /// Name
    name: String,
    /// Time
    time: String,
}

impl From<&ScanEvent> for ScanRow {
    fn from(s: &ScanEvent) -> Self {
        Self {
            uid: s.uid.clone(),
            name: s.name.clone().unwrap_or_else(|| "Unregistered".to_string()),
            time: s
                .parsed_time()
                .map(|t| t.format(TIME_FORMAT).to_string())
                .or_else(|| s.time.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Show recent visits
pub async fn history(
    args: &HistoryArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let backend = std::sync::Arc::new(super::backend_client(config)?);
    let reports = ReportEngine::new(backend, config.report.clone())?;
    let visits = reports.recent_visits(args.limit).await?;
    let rows: Vec<VisitRow> = visits.iter().map(VisitRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}

/// Show raw scans
pub async fn scans(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let backend = super::backend_client(config)?;
    let scans = backend.scan_history().await?;
    let rows: Vec<ScanRow> = scans.iter().map(ScanRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}

/// Execute visit maintenance commands
pub async fn visits(args: &VisitsArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        VisitsCommand::Delete { since, until, yes } => {
            let range = VisitRange::new(*since, *until)?;
            let prompt = format!(
                "Delete all visits checked in between {} and {}?",
                since.format(TIME_FORMAT),
                until.format(TIME_FORMAT)
            );
            if !output::confirm(&prompt, *yes)? {
                return Ok(());
            }
            let backend = super::backend_client(config)?;
            let deleted = backend.delete_visits(&range).await?;
            output::print_success(&format!("Deleted {} visit records", deleted));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use officehub_core::types::MemberId;

    #[test]
    fn test_open_visit_row() {
        let check_in = parse_time("2025-03-10T09:00").unwrap();
        let row = VisitRow::from(&VisitRecord {
            identity: MemberId::from("1"),
            display_name: "Alice".to_string(),
            check_in,
            check_out: None,
        });
        assert_eq!(row.check_out, "in office");
        assert_eq!(row.duration, "-");
    }

    #[test]
    fn test_closed_visit_duration() {
        let row = VisitRow::from(&VisitRecord {
            identity: MemberId::from("1"),
            display_name: "Alice".to_string(),
            check_in: parse_time("2025-03-10T09:00").unwrap(),
            check_out: Some(parse_time("2025-03-10T11:05").unwrap()),
        });
        assert_eq!(row.duration, "2h 05m");
    }

    #[test]
    fn test_scan_row_keeps_unparsed_time() {
        let row = ScanRow::from(&ScanEvent {
            uid: "A1".to_string(),
            name: None,
            time: Some("sometime".to_string()),
        });
        assert_eq!(row.time, "sometime");
        assert_eq!(row.name, "Unregistered");
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert!(parse_time("soon").is_err());
    }
}
