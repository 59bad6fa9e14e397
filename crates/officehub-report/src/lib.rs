//! # officehub-report
//!
//! Aggregates visit history into ranked leaderboards and renders members,
//! visit history, scan history and leaderboards as paginated documents.

pub mod engine;
pub mod leaderboard;
pub mod listing;
pub mod render;

pub use engine::ReportEngine;
pub use leaderboard::{LeaderboardEntry, Metric, Period, is_auto_signout, rank};
pub use listing::ListingKey;
