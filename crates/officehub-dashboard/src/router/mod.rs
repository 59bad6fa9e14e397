//! Interaction routing: button presses and admin commands.

pub mod dispatch;
pub mod error;
pub mod interaction;

pub use dispatch::InteractionRouter;
pub use error::InteractionError;
pub use interaction::{AdminCommand, ButtonAction, Caller, Interaction, InteractionReply};
