//! reqwest implementation of [`AttendanceBackend`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use officehub_core::config::BackendConfig;
use officehub_core::types::MemberId;

use crate::backend::AttendanceBackend;
use crate::error::{BackendError, BackendResult};
use crate::models::{
    DeleteVisitsWire, Member, NewMember, Occupant, OccupantWire, PresenceSnapshot, ScanEvent,
    VisitFilter, VisitRange, VisitRecord, VisitWire, WIRE_TIME_FORMAT,
};

/// Body for the per-member sign-in/out endpoints.
#[derive(Debug, Serialize)]
struct DiscordIdBody<'a> {
    discord_id: &'a str,
}

/// HTTP client for the attendance backend.
#[derive(Clone, Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl BackendClient {
    /// Build a client from configuration. Every request is bounded by
    /// `timeout_seconds`; a timeout surfaces as [`BackendError::Connectivity`].
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| BackendError::InvalidRequest(format!("failed to build client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Send once and map non-2xx answers to [`BackendError::Backend`].
    async fn send(&self, builder: RequestBuilder) -> BackendResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });
        tracing::warn!(status = status.as_u16(), %message, "Attendance backend returned an error");
        Err(BackendError::Backend {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> BackendResult<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        decode(response).await
    }

    /// Sign-in/out share one shape: a 404 means the identity is unknown.
    async fn toggle(&self, path: &str, member: &MemberId) -> BackendResult<()> {
        let builder = self.request(Method::POST, path).json(&DiscordIdBody {
            discord_id: member.as_str(),
        });
        match self.send(builder).await {
            Ok(_) => Ok(()),
            Err(BackendError::Backend {
                status: 404,
                message,
            }) => {
                tracing::info!(member = %member, %message, "Member not registered with backend");
                Err(BackendError::NotRegistered(member.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}

/// Decode a JSON body, treating `null` as an invalid response.
async fn decode<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
    let bytes = response.bytes().await?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| BackendError::InvalidResponse(format!("malformed JSON: {e}")))?;
    if value.is_null() {
        return Err(BackendError::InvalidResponse(
            "null response from server".to_string(),
        ));
    }
    serde_json::from_value(value)
        .map_err(|e| BackendError::InvalidResponse(format!("unexpected payload: {e}")))
}

/// Pull a human message out of a JSON error body, falling back to raw text.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["message", "error", "detail"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return Some(msg.to_string());
            }
        }
    }
    Some(trimmed.chars().take(200).collect())
}

#[async_trait]
impl AttendanceBackend for BackendClient {
    async fn fetch_presence(&self) -> PresenceSnapshot {
        match self.get_json::<Vec<OccupantWire>>("/current").await {
            Ok(wire) => {
                let occupants: Vec<Occupant> = wire.into_iter().map(Occupant::from).collect();
                tracing::debug!(count = occupants.len(), "Fetched current occupants");
                PresenceSnapshot::ok(occupants)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching current occupants");
                PresenceSnapshot::failed(e)
            }
        }
    }

    async fn sign_in(&self, member: &MemberId) -> BackendResult<()> {
        self.toggle("/sign-in-discord", member).await
    }

    async fn sign_out(&self, member: &MemberId) -> BackendResult<()> {
        self.toggle("/sign-out-discord", member).await
    }

    async fn sign_out_all(&self) -> BackendResult<()> {
        self.send(self.request(Method::POST, "/sign-out-all"))
            .await
            .map(|_| ())
    }

    async fn list_members(&self) -> BackendResult<Vec<Member>> {
        self.get_json("/members").await
    }

    async fn create_member(&self, member: &NewMember) -> BackendResult<()> {
        self.send(self.request(Method::POST, "/members").json(member))
            .await
            .map(|_| ())
    }

    async fn delete_member(&self, uid: &str) -> BackendResult<()> {
        if uid.is_empty() || uid.contains('/') {
            return Err(BackendError::InvalidRequest(format!("invalid uid '{uid}'")));
        }
        self.send(self.request(Method::DELETE, &format!("/members/{uid}")))
            .await
            .map(|_| ())
    }

    async fn list_visits(&self, filter: &VisitFilter) -> BackendResult<Vec<VisitRecord>> {
        let response = self
            .send(self.request(Method::GET, "/history").query(&filter.query()))
            .await?;
        let wire: Vec<VisitWire> = decode(response).await?;
        // The backend may ignore the window, so it is re-applied here.
        Ok(wire
            .into_iter()
            .map(VisitRecord::from)
            .filter(|v| filter.matches(v))
            .collect())
    }

    async fn delete_visits(&self, range: &VisitRange) -> BackendResult<u64> {
        let query = [
            ("since", range.since.format(WIRE_TIME_FORMAT).to_string()),
            ("until", range.until.format(WIRE_TIME_FORMAT).to_string()),
        ];
        let response = self
            .send(self.request(Method::DELETE, "/history").query(&query))
            .await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(0);
        }
        let body: DeleteVisitsWire = decode(response).await?;
        tracing::info!(deleted = body.deleted, "Deleted visit records");
        Ok(body.deleted)
    }

    async fn scan_history(&self) -> BackendResult<Vec<ScanEvent>> {
        self.get_json("/scan-history").await
    }
}
