//! Refresh triggers and the scopes they resolve to.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use officehub_core::types::{CommunityId, MemberId};

/// What caused a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSource {
    /// The periodic scheduler.
    Timer,
    /// A refresh button on a surface.
    ManualButton,
    /// An administrator command.
    AdminCommand,
    /// Presence changed through this process (sign-in/out).
    StateChange,
}

impl fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timer => write!(f, "timer"),
            Self::ManualButton => write!(f, "manual_button"),
            Self::AdminCommand => write!(f, "admin_command"),
            Self::StateChange => write!(f, "state_change"),
        }
    }
}

/// A request to refresh one or more surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTrigger {
    /// Origin of the request.
    pub source: TriggerSource,
    /// Who caused it, when a person did.
    pub identity: Option<MemberId>,
    /// Surface to refresh, when the request is targeted.
    pub target: Option<CommunityId>,
}

impl RefreshTrigger {
    /// Periodic refresh of every surface.
    pub fn timer() -> Self {
        Self {
            source: TriggerSource::Timer,
            identity: None,
            target: None,
        }
    }

    /// A refresh button press on `surface` by `identity`.
    pub fn manual(identity: MemberId, surface: CommunityId) -> Self {
        Self {
            source: TriggerSource::ManualButton,
            identity: Some(identity),
            target: Some(surface),
        }
    }

    /// Presence changed; every surface refreshes.
    pub fn state_change(identity: Option<MemberId>) -> Self {
        Self {
            source: TriggerSource::StateChange,
            identity,
            target: None,
        }
    }

    /// Admin-requested refresh, of `target` or of everything.
    pub fn admin(identity: Option<MemberId>, target: Option<CommunityId>) -> Self {
        Self {
            source: TriggerSource::AdminCommand,
            identity,
            target,
        }
    }

    /// Surfaces this trigger refreshes.
    pub fn scope(&self) -> RefreshScope {
        match (self.source, self.target) {
            (TriggerSource::Timer | TriggerSource::StateChange, _) => RefreshScope::All,
            (TriggerSource::ManualButton | TriggerSource::AdminCommand, Some(target)) => {
                RefreshScope::Surfaces(BTreeSet::from([target]))
            }
            // A manual press always names its surface; an untargeted one
            // refreshes nothing rather than everything.
            (TriggerSource::ManualButton, None) => RefreshScope::Surfaces(BTreeSet::new()),
            (TriggerSource::AdminCommand, None) => RefreshScope::All,
        }
    }
}

/// Set of surfaces a cycle covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshScope {
    /// Every registered surface.
    All,
    /// Only these communities' surfaces.
    Surfaces(BTreeSet<CommunityId>),
}

impl RefreshScope {
    /// Union of two scopes. `All` absorbs everything.
    pub fn merge(self, other: RefreshScope) -> RefreshScope {
        match (self, other) {
            (RefreshScope::All, _) | (_, RefreshScope::All) => RefreshScope::All,
            (RefreshScope::Surfaces(mut a), RefreshScope::Surfaces(b)) => {
                a.extend(b);
                RefreshScope::Surfaces(a)
            }
        }
    }

    /// Whether the scope covers `community`.
    pub fn includes(&self, community: CommunityId) -> bool {
        match self {
            RefreshScope::All => true,
            RefreshScope::Surfaces(set) => set.contains(&community),
        }
    }

    /// Whether the scope can match nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, RefreshScope::Surfaces(set) if set.is_empty())
    }
}

impl fmt::Display for RefreshScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshScope::All => write!(f, "all"),
            RefreshScope::Surfaces(set) => {
                let ids: Vec<String> = set.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", ids.join(","))
            }
        }
    }
}
