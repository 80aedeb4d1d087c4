//! Capabilities the chat gateway lends to the command layer.

use async_trait::async_trait;
use cadenza_core::{ChannelId, CommandSpec, GuildId, RenderedMessage};
use cadenza_error::CadenzaResult;

/// Acknowledges a single inbound interaction.
///
/// Implementations talk to the platform only; the reply-state discipline is
/// enforced by the caller. A send failure surfaces as
/// [`DeliveryError`](cadenza_error::DeliveryError).
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Send the one and only immediate response.
    async fn reply(&self, message: &RenderedMessage, ephemeral: bool) -> CadenzaResult<()>;

    /// Acknowledge now and promise a response later.
    async fn defer(&self, ephemeral: bool) -> CadenzaResult<()>;

    /// Replace the deferred placeholder with the final response.
    async fn edit_reply(&self, message: &RenderedMessage) -> CadenzaResult<()>;
}

/// Posts messages to a text channel outside of any interaction.
#[async_trait]
pub trait ChannelMessenger: Send + Sync {
    /// Send `message` to `channel`.
    async fn send(&self, channel: ChannelId, message: &RenderedMessage) -> CadenzaResult<()>;
}

/// Where the command catalog is registered.
///
/// # Examples
///
/// ```
/// use cadenza_core::GuildId;
/// use cadenza_interface::RegistrationScope;
///
/// assert_eq!(RegistrationScope::from(None), RegistrationScope::Global);
/// assert_eq!(
///     RegistrationScope::from(Some(GuildId(9))),
///     RegistrationScope::Guild(GuildId(9))
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationScope {
    /// Every guild the application is installed in
    Global,
    /// A single deployment guild; updates propagate immediately
    Guild(GuildId),
}

impl From<Option<GuildId>> for RegistrationScope {
    fn from(guild: Option<GuildId>) -> Self {
        guild.map_or(Self::Global, Self::Guild)
    }
}

/// Submits command schemas to the remote platform.
#[async_trait]
pub trait CommandRegistrar: Send + Sync {
    /// Replace the registered command set in `scope` with `commands`.
    ///
    /// Returns the number of commands the platform accepted.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError`](cadenza_error::RegistrationError) on
    /// transport or validation failure.
    async fn register(
        &self,
        commands: &[CommandSpec],
        scope: RegistrationScope,
    ) -> CadenzaResult<usize>;
}
