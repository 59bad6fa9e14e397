//! Platform-neutral display documents.
//!
//! A [`Document`] is an embed-like block of text plus a set of interactive
//! controls. Renderers produce documents; publishers translate them to a chat
//! platform's wire format.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Accent colours shared by all renderers.
pub mod colors {
    /// Occupied / success.
    pub const GREEN: u32 = 0x2ECC71;
    /// Empty office.
    pub const GREY: u32 = 0x95A5A6;
    /// Backend failure.
    pub const RED: u32 = 0xE74C3C;
    /// Informational listings.
    pub const BLUE: u32 = 0x3498DB;
    /// Scan history.
    pub const PURPLE: u32 = 0x9B59B6;
    /// Leaderboards.
    pub const GOLD: u32 = 0xF1C40F;
}

/// A titled text field inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentField {
    /// Field heading.
    pub name: String,
    /// Field body.
    pub value: String,
    /// Whether the field may share a row with its neighbours.
    pub inline: bool,
}

/// What pressing a control does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    /// Sign the presser out.
    Leave,
    /// Refresh the surface the control lives on.
    Refresh,
    /// Show the previous page of a listing.
    PreviousPage,
    /// Show the next page of a listing.
    NextPage,
}

/// Visual weight of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlStyle {
    /// Highlighted.
    Primary,
    /// Neutral.
    Secondary,
    /// Destructive.
    Danger,
}

/// An interactive control (button).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Control {
    /// Action bound to the control.
    pub action: ControlAction,
    /// Visible label.
    pub label: String,
    /// Visual style.
    pub style: ControlStyle,
    /// Stable identifier echoed back by the platform when pressed.
    pub custom_id: String,
    /// Rendered but not pressable.
    pub disabled: bool,
}

impl Control {
    /// An enabled control.
    pub fn new(
        action: ControlAction,
        label: impl Into<String>,
        style: ControlStyle,
        custom_id: impl Into<String>,
    ) -> Self {
        Self {
            action,
            label: label.into(),
            style,
            custom_id: custom_id.into(),
            disabled: false,
        }
    }

    /// Same control, disabled when `disabled` is true.
    pub fn disabled_if(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// An embed-like displayable document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Heading.
    pub title: String,
    /// Body text under the heading.
    pub description: String,
    /// Accent colour (`0xRRGGBB`).
    pub color: u32,
    /// Ordered fields.
    pub fields: Vec<DocumentField>,
    /// Small print, e.g. last update time.
    pub footer: Option<String>,
    /// Interactive controls, in display order.
    pub controls: Vec<Control>,
}

impl Document {
    /// A document with a title, body and colour and nothing else.
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            fields: Vec::new(),
            footer: None,
            controls: Vec::new(),
        }
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(DocumentField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Set the footer.
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Append a control.
    pub fn control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    /// Hash of everything a reader would notice changing.
    ///
    /// The footer is excluded: it carries the refresh time, which changes on
    /// every fetch even when the occupants do not.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.title.hash(&mut hasher);
        self.description.hash(&mut hasher);
        self.color.hash(&mut hasher);
        self.fields.hash(&mut hasher);
        self.controls.hash(&mut hasher);
        hasher.finish()
    }
}
