//! Newtype wrappers for chat-platform and backend identifiers.
//!
//! Using distinct types prevents accidentally passing a `ChannelId` where a
//! `CommunityId` is expected. Platform snowflakes are `u64`; member
//! identities and message handles are opaque strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around a `u64` snowflake.
macro_rules! define_snowflake {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Return the inner numeric value.
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(v: u64) -> Self {
                Self(v)
            }
        }
    };
}

/// Macro to define a newtype ID wrapper around an opaque string.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from anything string-like.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

define_snowflake!(
    /// Chat-platform community (guild) identifier.
    CommunityId
);

define_snowflake!(
    /// Chat-platform channel identifier.
    ChannelId
);

define_string_id!(
    /// Identity of a person as known to the attendance backend (the chat
    /// platform user id, as a string).
    MemberId
);

define_string_id!(
    /// Opaque handle of a published dashboard message.
    MessageHandle
);

/// Address of one dashboard surface: a channel inside a community.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SurfaceId {
    /// Owning community.
    pub community: CommunityId,
    /// Channel that hosts the dashboard message.
    pub channel: ChannelId,
}

impl SurfaceId {
    /// Create a surface address.
    pub fn new(community: impl Into<CommunityId>, channel: impl Into<ChannelId>) -> Self {
        Self {
            community: community.into(),
            channel: channel.into(),
        }
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.community, self.channel)
    }
}
