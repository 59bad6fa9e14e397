//! Paginated documents for report listings.

use chrono::NaiveDateTime;

use officehub_backend::{Member, ScanEvent, VisitRecord};
use officehub_core::types::document::colors;
use officehub_core::types::{Control, ControlAction, ControlStyle, Document, PageResponse};

use crate::leaderboard::{LeaderboardEntry, Metric, Period};
use crate::listing::ListingKey;

/// Previous/next controls for a page. Edge buttons are disabled.
pub fn pager_controls<T>(key: ListingKey, page: &PageResponse<T>) -> Vec<Control> {
    vec![
        Control::new(
            ControlAction::PreviousPage,
            "◀ Previous",
            ControlStyle::Secondary,
            key.page_id(page.page.saturating_sub(1).max(1)),
        )
        .disabled_if(!page.has_previous),
        Control::new(
            ControlAction::NextPage,
            "Next ▶",
            ControlStyle::Secondary,
            key.page_id((page.page + 1).min(page.total_pages)),
        )
        .disabled_if(!page.has_next),
    ]
}

fn paged_document<T>(
    title: &str,
    color: u32,
    empty: &str,
    key: ListingKey,
    page: &PageResponse<T>,
    lines: Vec<String>,
) -> Document {
    let description = if lines.is_empty() {
        empty.to_string()
    } else {
        lines.join("\n")
    };
    let doc = Document::new(title, description, color).footer(format!(
        "Page {}/{} · {} total",
        page.page, page.total_pages, page.total_items
    ));
    pager_controls(key, page)
        .into_iter()
        .fold(doc, Document::control)
}

fn format_duration(seconds: i64) -> String {
    let minutes = seconds / 60;
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

fn format_time(time: NaiveDateTime) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}

/// Registered members.
pub fn members_document(page: &PageResponse<Member>) -> Document {
    let lines = page
        .items
        .iter()
        .map(|m| {
            let linked = if m.discord_id.is_some() { "linked" } else { "not linked" };
            format!("• **{}** (UID `{}`, {linked})", m.name, m.uid)
        })
        .collect();
    paged_document(
        "👥 Registered Members",
        colors::BLUE,
        "No members are registered.",
        ListingKey::Members,
        page,
        lines,
    )
}

/// Most recent visits.
pub fn history_document(limit: usize, page: &PageResponse<VisitRecord>) -> Document {
    let lines = page
        .items
        .iter()
        .map(|v| match (v.check_out, v.duration()) {
            (Some(out), Some(d)) => format!(
                "• **{}**: {} → {} ({})",
                v.display_name,
                format_time(v.check_in),
                out.format("%H:%M"),
                format_duration(d.num_seconds())
            ),
            _ => format!(
                "• **{}**: {} → still in office",
                v.display_name,
                format_time(v.check_in)
            ),
        })
        .collect();
    paged_document(
        "📜 Visit History",
        colors::BLUE,
        "No visits recorded.",
        ListingKey::History { limit },
        page,
        lines,
    )
}

/// Raw badge scans.
pub fn scans_document(page: &PageResponse<ScanEvent>) -> Document {
    let lines = page
        .items
        .iter()
        .map(|s| {
            let who = s.name.as_deref().unwrap_or("Unlinked card");
            let when = match (s.parsed_time(), s.time.as_deref()) {
                (Some(t), _) => format_time(t),
                (None, Some(raw)) => raw.to_string(),
                (None, None) => "unknown time".to_string(),
            };
            format!("• `{}` {who} at {when}", s.uid)
        })
        .collect();
    paged_document(
        "🔍 Scan History",
        colors::PURPLE,
        "No scans recorded.",
        ListingKey::Scans,
        page,
        lines,
    )
}

/// A leaderboard page. Ranks continue across pages.
pub fn leaderboard_document(
    metric: Metric,
    period: Period,
    top_n: usize,
    page: &PageResponse<LeaderboardEntry>,
) -> Document {
    let first_rank = page.first_index() + 1;
    let lines = page
        .items
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let score = match metric {
                Metric::Hours => format!("{:.1} h ({} visits)", e.hours(), e.visits),
                Metric::Visits => format!("{} visits ({:.1} h)", e.visits, e.hours()),
            };
            format!("**{}.** {}: {score}", first_rank + i, e.display_name)
        })
        .collect();
    let title = match metric {
        Metric::Hours => format!("🏆 Leaderboard: Hours ({})", period.label()),
        Metric::Visits => format!("🏆 Leaderboard: Visits ({})", period.label()),
    };
    paged_document(
        &title,
        colors::GOLD,
        "No completed visits in this period.",
        ListingKey::Leaderboard {
            metric,
            period,
            top_n,
        },
        page,
        lines,
    )
}
