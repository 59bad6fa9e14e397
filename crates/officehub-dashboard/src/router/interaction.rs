//! Interaction events and replies.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use officehub_core::types::{ChannelId, CommunityId, Document, MemberId};
use officehub_report::{ListingKey, Metric, Period};

use crate::render::custom_ids;

/// The person behind an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// Backend identity (chat user id).
    pub identity: MemberId,
    /// Name for log lines and replies.
    #[serde(default)]
    pub display_name: String,
    /// Whether the platform reports the caller as a community administrator.
    #[serde(default)]
    pub is_admin: bool,
}

impl Caller {
    /// Identity used when an operator acts through the HTTP API.
    pub fn operator() -> Self {
        Self {
            identity: MemberId::from("operator"),
            display_name: "operator".to_string(),
            is_admin: true,
        }
    }
}

/// A decoded button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Sign the presser out.
    Leave,
    /// Refresh the pressed surface.
    Refresh,
    /// Open another page of a listing.
    Page {
        /// Listing being paged.
        key: ListingKey,
        /// Requested page.
        page: usize,
    },
}

impl ButtonAction {
    /// Decode a control id. Unknown ids yield `None`.
    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        match custom_id {
            custom_ids::CONTROL_LEAVE => Some(Self::Leave),
            custom_ids::CONTROL_REFRESH | custom_ids::READ_ONLY_REFRESH => Some(Self::Refresh),
            other => ListingKey::parse_page_id(other).map(|(key, page)| Self::Page { key, page }),
        }
    }
}

/// An administrator command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AdminCommand {
    /// Create (or move) this community's dashboard into the invoking channel.
    Setup,
    /// Sign a member in (the caller when omitted).
    SignIn {
        #[serde(default)]
        member: Option<MemberId>,
    },
    /// Sign a member out (the caller when omitted).
    SignOut {
        #[serde(default)]
        member: Option<MemberId>,
    },
    /// Sign everyone out.
    SignOutAll,
    /// Register a member with the backend.
    AddMember {
        name: String,
        uid: String,
        member: MemberId,
    },
    /// Remove a member by backend UID.
    RemoveMember { uid: String },
    /// List registered members.
    ListMembers {
        #[serde(default = "first_page")]
        page: usize,
    },
    /// Most recent visits.
    History {
        #[serde(default)]
        limit: Option<usize>,
        #[serde(default = "first_page")]
        page: usize,
    },
    /// Raw badge scans.
    ScanHistory {
        #[serde(default = "first_page")]
        page: usize,
    },
    /// Ranked attendance.
    Leaderboard {
        metric: Metric,
        period: Period,
        #[serde(default)]
        top_n: Option<usize>,
        #[serde(default = "first_page")]
        page: usize,
    },
    /// Delete visits checked in inside `[since, until)`.
    DeleteVisits {
        since: NaiveDateTime,
        until: NaiveDateTime,
    },
    /// Refresh one community's dashboard, or all of them.
    Refresh {
        #[serde(default)]
        target: Option<CommunityId>,
    },
}

impl AdminCommand {
    /// Command name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::SignIn { .. } => "sign_in",
            Self::SignOut { .. } => "sign_out",
            Self::SignOutAll => "sign_out_all",
            Self::AddMember { .. } => "add_member",
            Self::RemoveMember { .. } => "remove_member",
            Self::ListMembers { .. } => "list_members",
            Self::History { .. } => "history",
            Self::ScanHistory { .. } => "scan_history",
            Self::Leaderboard { .. } => "leaderboard",
            Self::DeleteVisits { .. } => "delete_visits",
            Self::Refresh { .. } => "refresh",
        }
    }

    /// Whether the caller must be a community administrator.
    pub fn is_privileged(&self) -> bool {
        matches!(
            self,
            Self::Setup
                | Self::SignIn { .. }
                | Self::SignOutAll
                | Self::AddMember { .. }
                | Self::RemoveMember { .. }
                | Self::DeleteVisits { .. }
        )
    }

    /// Whether the command may be issued outside a control community.
    pub fn allowed_anywhere(&self) -> bool {
        matches!(self, Self::Setup)
    }
}

fn first_page() -> usize {
    1
}

/// An inbound interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Interaction {
    /// A control was pressed on a message in `community`.
    Button {
        community: CommunityId,
        custom_id: String,
        caller: Caller,
    },
    /// A command was issued in `channel` of `community`.
    Command {
        community: CommunityId,
        channel: ChannelId,
        caller: Caller,
        command: AdminCommand,
    },
}

impl Interaction {
    /// Community the interaction came from.
    pub fn community(&self) -> CommunityId {
        match self {
            Self::Button { community, .. } | Self::Command { community, .. } => *community,
        }
    }

    /// Who issued it.
    pub fn caller(&self) -> &Caller {
        match self {
            Self::Button { caller, .. } | Self::Command { caller, .. } => caller,
        }
    }
}

/// Reply shown to the caller only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionReply {
    /// Whether the interaction was executed.
    pub success: bool,
    /// Plain text, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Rich reply, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
}

impl InteractionReply {
    /// A successful text reply.
    pub fn message(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: Some(content.into()),
            document: None,
        }
    }

    /// A successful document reply.
    pub fn document(document: Document) -> Self {
        Self {
            success: true,
            content: None,
            document: Some(document),
        }
    }

    /// A rejection or failure.
    pub fn failure(content: impl Into<String>) -> Self {
        Self {
            success: false,
            content: Some(content.into()),
            document: None,
        }
    }
}
