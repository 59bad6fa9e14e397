//! # officehub-api
//!
//! HTTP API layer for OfficeHub built on Axum.
//!
//! Lets a host process (the chat gateway, an operator, a cron job) set up
//! dashboards, forward interactions, request refreshes and inspect the
//! surface registry.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{Services, build_app, build_services, wire};
pub use error::ApiError;
pub use state::AppState;
