//! Slash-command dispatch and playback event bridge for Cadenza.
//!
//! This crate is the Discord-facing half of the bot. It routes slash commands
//! to handlers that drive a [`cadenza_interface::PlaybackService`], and it
//! forwards playback events to the text channels that requested the music.
//!
//! # Command flow
//!
//! - [`Dispatcher`] - readiness gate, routing, panic isolation and failure replies
//! - [`CommandCatalog`] / [`Command`] - the seventeen commands and their schemas
//! - [`CommandInvocation`] - typed parameters parsed from an interaction
//! - [`CommandHandlers`] - one handler per command
//! - [`guard`] - voice-channel preconditions
//!
//! Every interaction is acknowledged exactly once; [`InteractionContext`]
//! tracks the reply state and rejects a second acknowledgment.
//!
//! # Startup and events
//!
//! - [`StartupSequence`] registers commands and opens the [`ReadinessGate`]
//! - [`EventBridge`] turns playback events into channel messages
//!
//! # Discord
//!
//! The Serenity adapters live behind the `discord` feature:
//! [`CadenzaBot`], [`CadenzaHandler`] and the responder, messenger and
//! registrar implementations.

#![warn(missing_docs)]

mod bridge;
mod catalog;
mod command;
mod dispatcher;
pub mod guard;
mod handlers;
mod interaction;
mod readiness;
mod render;

#[cfg(feature = "discord")]
mod discord;

pub use bridge::{BridgeOutcome, EventBridge};
pub use catalog::{Command, CommandCatalog};
pub use command::{CommandInvocation, DEFAULT_RELATED_COUNT};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use handlers::CommandHandlers;
pub use interaction::{InteractionContext, VoiceState};
pub use readiness::{ReadinessGate, ReadinessWatch, ServiceState, StartupSequence, readiness};
pub use render::{
    BRAND_COLOR, DESCRIPTION_LIMIT, ERROR_COLOR, LISTING_LIMIT, LYRICS_LIMIT, Listing,
    MessageSpec, NOTICE_COLOR, PROGRESS_CELLS, error_message, lyrics_body, now_playing_card,
    progress_bar, progress_card, render, track_line, truncate_chars,
};

#[cfg(feature = "discord")]
pub use discord::{
    CadenzaBot, CadenzaHandler, DiscordError, DiscordErrorKind,
    DiscordMessenger, DiscordRegistrar, DiscordResponder, DiscordResult, FIELD_COUNT_LIMIT,
    FIELD_NAME_LIMIT, FIELD_VALUE_LIMIT, FOOTER_LIMIT, TITLE_LIMIT, channel_id, guild_id,
    option_values, to_channel_id, to_command, to_embed, to_guild_id, user_id, validate_embed,
};
