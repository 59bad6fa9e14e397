//! Fetch-render-publish cycles and the loop that serializes them.

pub mod engine;
pub mod runner;

pub use engine::{CycleReport, SurfaceOutcome, SyncEngine};
pub use runner::{SyncHandle, SyncRunner};
