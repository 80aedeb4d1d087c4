//! Platform snowflake identifiers.
//!
//! Thin newtypes so a guild id can never be passed where a channel id is expected.

use serde::{Deserialize, Serialize};

/// Guild (server) identifier. One independent playback session exists per guild.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct GuildId(pub u64);

/// Text or voice channel identifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ChannelId(pub u64);

/// User or member identifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl ChannelId {
    /// Discord channel mention markup, e.g. `<#123>`.
    pub fn mention(&self) -> String {
        format!("<#{}>", self.0)
    }
}

impl UserId {
    /// Discord user mention markup, e.g. `<@123>`.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}
