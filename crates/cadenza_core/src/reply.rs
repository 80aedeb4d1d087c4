//! Acknowledgment state of an interaction.

use serde::{Deserialize, Serialize};

/// Where an interaction is in the platform's acknowledgment protocol.
///
/// Legal transitions are `Unacknowledged -> Deferred -> Replied` and
/// `Unacknowledged -> Replied`. `Replied` is terminal.
///
/// # Examples
///
/// ```
/// use cadenza_core::ReplyState;
///
/// assert!(ReplyState::Unacknowledged.can_acknowledge());
/// assert!(!ReplyState::Deferred.can_acknowledge());
/// assert!(ReplyState::Deferred.can_edit());
/// assert!(!ReplyState::Replied.can_edit());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum ReplyState {
    /// Nothing has been sent yet
    #[default]
    Unacknowledged,
    /// A deferral was sent; the final answer is still owed
    Deferred,
    /// The final answer was sent
    Replied,
}

impl ReplyState {
    /// Whether a first acknowledgment (defer or reply) is still allowed.
    pub fn can_acknowledge(self) -> bool {
        self == Self::Unacknowledged
    }

    /// Whether the deferred response may be edited into the final answer.
    pub fn can_edit(self) -> bool {
        self == Self::Deferred
    }
}
