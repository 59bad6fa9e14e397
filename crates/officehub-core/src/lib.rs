//! # officehub-core
//!
//! Core crate for OfficeHub. Contains configuration schemas, typed
//! identifiers, the capability model, pagination, wall-clock timestamp
//! parsing and the unified error system.
//!
//! This crate has **no** internal dependencies on other OfficeHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
