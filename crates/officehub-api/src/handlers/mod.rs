//! Route handlers.

pub mod health;
pub mod interactions;
pub mod refresh;
pub mod surfaces;
