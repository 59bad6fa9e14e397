//! Core type definitions used across the OfficeHub workspace.

pub mod capability;
pub mod document;
pub mod id;
pub mod pagination;
pub mod timestamp;

pub use capability::CapabilityMode;
pub use document::{Control, ControlAction, ControlStyle, Document, DocumentField};
pub use id::*;
pub use pagination::{PageRequest, PageResponse};
