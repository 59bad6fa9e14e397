//! Report engine: fetches from the backend and renders report documents.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime, NaiveTime};

use officehub_backend::{AttendanceBackend, BackendResult, VisitFilter, VisitRecord};
use officehub_core::config::ReportConfig;
use officehub_core::types::{Document, PageRequest, PageResponse};
use officehub_core::AppResult;

use crate::leaderboard::{LeaderboardEntry, Metric, Period, rank};
use crate::listing::ListingKey;
use crate::render;

/// Builds leaderboards and paginated listings.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    backend: Arc<dyn AttendanceBackend>,
    config: ReportConfig,
    cutoff: NaiveTime,
}

impl ReportEngine {
    /// Creates a report engine. Fails when the auto-signout time is invalid.
    pub fn new(backend: Arc<dyn AttendanceBackend>, config: ReportConfig) -> AppResult<Self> {
        let cutoff = config.auto_signout_time()?;
        Ok(Self {
            backend,
            config,
            cutoff,
        })
    }

    /// Leaderboard length used when none is requested.
    pub fn default_top_n(&self) -> usize {
        self.config.default_top_n
    }

    /// Rank members over `period` ending now.
    pub async fn build_leaderboard(
        &self,
        metric: Metric,
        period: Period,
        top_n: usize,
    ) -> BackendResult<Vec<LeaderboardEntry>> {
        self.build_leaderboard_at(metric, period, top_n, Local::now().naive_local())
            .await
    }

    /// Rank members over `period` ending at `now`.
    pub async fn build_leaderboard_at(
        &self,
        metric: Metric,
        period: Period,
        top_n: usize,
        now: NaiveDateTime,
    ) -> BackendResult<Vec<LeaderboardEntry>> {
        let visits = self.backend.list_visits(&period.window(now)).await?;
        let ranked = rank(&visits, metric, self.cutoff, top_n);
        tracing::debug!(
            metric = %metric,
            period = %period,
            visits = visits.len(),
            ranked = ranked.len(),
            "Built leaderboard"
        );
        Ok(ranked)
    }

    /// The most recent visits, newest first. `limit` is clamped to
    /// `1..=history_max`.
    pub async fn recent_visits(&self, limit: usize) -> BackendResult<Vec<VisitRecord>> {
        let limit = self.clamp_history_limit(limit);
        let mut visits = self.backend.list_visits(&VisitFilter::all()).await?;
        visits.sort_by(|a, b| b.check_in.cmp(&a.check_in));
        visits.truncate(limit);
        Ok(visits)
    }

    /// Clamp a history limit to the configured bounds.
    pub fn clamp_history_limit(&self, limit: usize) -> usize {
        limit.clamp(1, self.config.history_max.max(1))
    }

    fn page_request(&self, page: usize) -> PageRequest {
        PageRequest::new(page, self.config.page_size)
    }

    /// One page of a leaderboard.
    pub async fn leaderboard_page(
        &self,
        metric: Metric,
        period: Period,
        top_n: usize,
        page: usize,
    ) -> BackendResult<Document> {
        let ranked = self.build_leaderboard(metric, period, top_n).await?;
        let page = PageResponse::paginate(ranked, self.page_request(page));
        Ok(render::leaderboard_document(metric, period, top_n, &page))
    }

    /// One page of registered members.
    pub async fn members_page(&self, page: usize) -> BackendResult<Document> {
        let members = self.backend.list_members().await?;
        let page = PageResponse::paginate(members, self.page_request(page));
        Ok(render::members_document(&page))
    }

    /// One page of the most recent `limit` visits.
    pub async fn history_page(&self, limit: usize, page: usize) -> BackendResult<Document> {
        let limit = self.clamp_history_limit(limit);
        let visits = self.recent_visits(limit).await?;
        let page = PageResponse::paginate(visits, self.page_request(page));
        Ok(render::history_document(limit, &page))
    }

    /// One page of raw scans.
    pub async fn scans_page(&self, page: usize) -> BackendResult<Document> {
        let scans = self.backend.scan_history().await?;
        let page = PageResponse::paginate(scans, self.page_request(page));
        Ok(render::scans_document(&page))
    }

    /// Any page of any listing, as addressed by a pager control.
    pub async fn listing_page(&self, key: ListingKey, page: usize) -> BackendResult<Document> {
        match key {
            ListingKey::Members => self.members_page(page).await,
            ListingKey::History { limit } => self.history_page(limit, page).await,
            ListingKey::Scans => self.scans_page(page).await,
            ListingKey::Leaderboard {
                metric,
                period,
                top_n,
            } => self.leaderboard_page(metric, period, top_n, page).await,
        }
    }
}
