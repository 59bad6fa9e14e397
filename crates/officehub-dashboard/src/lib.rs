//! # officehub-dashboard
//!
//! Presence dashboard engine for OfficeHub. Provides:
//!
//! - Presence rendering into platform-neutral documents
//! - The surface registry (one dashboard per community)
//! - The sync engine: fetch once, render per surface, publish idempotently
//! - Trigger coalescing behind a single engine loop
//! - The interaction router (capability and cooldown checks, admin commands)
//! - A REST publisher for the chat platform

pub mod cooldown;
pub mod publisher;
pub mod registry;
pub mod render;
pub mod router;
pub mod sync;
pub mod trigger;

pub use cooldown::CooldownTracker;
pub use publisher::{PublishError, SurfacePublisher};
pub use registry::{SurfaceEntry, SurfaceRegistry};
pub use render::PresenceRenderer;
pub use router::InteractionRouter;
pub use sync::{CycleReport, SyncEngine, SyncHandle};
pub use trigger::{RefreshScope, RefreshTrigger, TriggerSource};
