//! Per-interaction state and the acknowledgment discipline.

use cadenza_core::{ChannelId, GuildId, ParamValue, RenderedMessage, ReplyState, UserId};
use cadenza_error::{
    ArgumentError, ArgumentErrorKind, CadenzaResult, InteractionError, InteractionErrorKind,
    PreconditionError, PreconditionErrorKind,
};
use cadenza_interface::InteractionResponder;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// The invoker's voice connection and what the bot may do there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceState {
    /// Voice channel the invoker is connected to
    pub channel: ChannelId,
    /// Whether the bot may join that channel
    pub bot_can_connect: bool,
    /// Whether the bot may transmit audio there
    pub bot_can_speak: bool,
}

impl VoiceState {
    /// A voice state where the bot holds both permissions.
    pub fn permitted(channel: ChannelId) -> Self {
        Self {
            channel,
            bot_can_connect: true,
            bot_can_speak: true,
        }
    }
}

/// One inbound slash command and its reply state.
///
/// The context owns the only handle to the interaction's responder and routes
/// every acknowledgment through [`ReplyState`], so a command can never be
/// answered twice. Reply methods take `&mut self`; transitions are sequential.
///
/// # Examples
///
/// ```ignore
/// let mut ctx = InteractionContext::new("volume", UserId(1), ChannelId(2), responder)
///     .with_guild(GuildId(3))
///     .with_option("level", 40_i64);
///
/// ctx.defer(false).await?;
/// ctx.respond(&message).await?;
/// assert_eq!(ctx.reply_state(), ReplyState::Replied);
/// ```
pub struct InteractionContext {
    command: String,
    user: UserId,
    guild: Option<GuildId>,
    channel: ChannelId,
    voice: Option<VoiceState>,
    options: HashMap<String, ParamValue>,
    state: ReplyState,
    responder: Arc<dyn InteractionResponder>,
}

impl fmt::Debug for InteractionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionContext")
            .field("command", &self.command)
            .field("user", &self.user)
            .field("guild", &self.guild)
            .field("channel", &self.channel)
            .field("voice", &self.voice)
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl InteractionContext {
    /// Context for `command` invoked by `user` in `channel`.
    pub fn new(
        command: impl Into<String>,
        user: UserId,
        channel: ChannelId,
        responder: Arc<dyn InteractionResponder>,
    ) -> Self {
        Self {
            command: command.into(),
            user,
            guild: None,
            channel,
            voice: None,
            options: HashMap::new(),
            state: ReplyState::default(),
            responder,
        }
    }

    /// Set the guild the command was invoked in.
    pub fn with_guild(mut self, guild: GuildId) -> Self {
        self.guild = Some(guild);
        self
    }

    /// Set the invoker's voice state.
    pub fn with_voice(mut self, voice: VoiceState) -> Self {
        self.voice = Some(voice);
        self
    }

    /// Add a parsed option value.
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Replace all option values.
    pub fn with_options(mut self, options: HashMap<String, ParamValue>) -> Self {
        self.options = options;
        self
    }

    /// Invoked command name.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Invoking member.
    pub fn user(&self) -> UserId {
        self.user
    }

    /// Guild, if the command was invoked in one.
    pub fn guild(&self) -> Option<GuildId> {
        self.guild
    }

    /// Text channel the command was invoked in.
    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    /// Invoker's voice state, if connected.
    pub fn voice(&self) -> Option<&VoiceState> {
        self.voice.as_ref()
    }

    /// Current acknowledgment state.
    pub fn reply_state(&self) -> ReplyState {
        self.state
    }

    /// The guild, or a guild-only precondition failure.
    #[track_caller]
    pub fn guild_id(&self) -> CadenzaResult<GuildId> {
        self.guild
            .ok_or_else(|| PreconditionError::new(PreconditionErrorKind::GuildOnly).into())
    }

    /// The invoker's voice channel, or a precondition failure.
    #[track_caller]
    pub fn voice_channel(&self) -> CadenzaResult<ChannelId> {
        self.voice
            .map(|voice| voice.channel)
            .ok_or_else(|| PreconditionError::new(PreconditionErrorKind::NotInVoiceChannel).into())
    }

    /// Raw option value.
    pub fn option(&self, name: &str) -> Option<&ParamValue> {
        self.options.get(name)
    }

    /// Optional string option.
    #[track_caller]
    pub fn optional_string(&self, name: &str) -> CadenzaResult<Option<String>> {
        match self.options.get(name) {
            None => Ok(None),
            Some(ParamValue::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(ArgumentError::invalid(
                name,
                format!("expected text, got {}", other.kind()),
            )
            .into()),
        }
    }

    /// Required string option.
    #[track_caller]
    pub fn string(&self, name: &str) -> CadenzaResult<String> {
        self.optional_string(name)?
            .ok_or_else(|| ArgumentError::new(ArgumentErrorKind::Missing(name.to_string())).into())
    }

    /// Optional integer option.
    #[track_caller]
    pub fn optional_integer(&self, name: &str) -> CadenzaResult<Option<i64>> {
        match self.options.get(name) {
            None => Ok(None),
            Some(ParamValue::Integer(value)) => Ok(Some(*value)),
            Some(other) => Err(ArgumentError::invalid(
                name,
                format!("expected a number, got {}", other.kind()),
            )
            .into()),
        }
    }

    /// Required integer option.
    #[track_caller]
    pub fn integer(&self, name: &str) -> CadenzaResult<i64> {
        self.optional_integer(name)?
            .ok_or_else(|| ArgumentError::new(ArgumentErrorKind::Missing(name.to_string())).into())
    }

    /// Send the immediate response.
    ///
    /// # Errors
    ///
    /// [`InteractionErrorKind::AlreadyAcknowledged`] if the interaction was
    /// already deferred or replied to; delivery failures from the responder.
    pub async fn reply(&mut self, message: &RenderedMessage, ephemeral: bool) -> CadenzaResult<()> {
        if !self.state.can_acknowledge() {
            return Err(InteractionError::new(InteractionErrorKind::AlreadyAcknowledged).into());
        }
        self.responder.reply(message, ephemeral).await?;
        self.state = ReplyState::Replied;
        debug!(command = %self.command, ephemeral, "Replied to interaction");
        Ok(())
    }

    /// Acknowledge now and answer later with [`edit_reply`](Self::edit_reply).
    pub async fn defer(&mut self, ephemeral: bool) -> CadenzaResult<()> {
        if !self.state.can_acknowledge() {
            return Err(InteractionError::new(InteractionErrorKind::AlreadyAcknowledged).into());
        }
        self.responder.defer(ephemeral).await?;
        self.state = ReplyState::Deferred;
        debug!(command = %self.command, ephemeral, "Deferred interaction");
        Ok(())
    }

    /// Replace the deferred placeholder with the final answer.
    pub async fn edit_reply(&mut self, message: &RenderedMessage) -> CadenzaResult<()> {
        if !self.state.can_edit() {
            let kind = match self.state {
                ReplyState::Replied => InteractionErrorKind::AlreadyAcknowledged,
                _ => InteractionErrorKind::NotDeferred,
            };
            return Err(InteractionError::new(kind).into());
        }
        self.responder.edit_reply(message).await?;
        self.state = ReplyState::Replied;
        debug!(command = %self.command, "Edited deferred reply");
        Ok(())
    }

    /// Send the final answer whichever way the current state allows.
    ///
    /// Edits a deferred reply, otherwise replies publicly.
    pub async fn respond(&mut self, message: &RenderedMessage) -> CadenzaResult<()> {
        match self.state {
            ReplyState::Deferred => self.edit_reply(message).await,
            _ => self.reply(message, false).await,
        }
    }
}
