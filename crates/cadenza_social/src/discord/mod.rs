//! Discord integration built on Serenity.
//!
//! - **client**: Serenity client setup and lifecycle
//! - **handler**: gateway events into the startup sequence and dispatcher
//! - **responder**, **messenger**, **registrar**: the command layer's seams over HTTP
//! - **conversions**: ids, embeds, command schemas and option values
//! - **error**: Discord-specific errors
//!
//! Available with the `discord` feature.

mod client;
mod conversions;
mod error;
mod handler;
mod messenger;
mod registrar;
mod responder;

pub use client::CadenzaBot;
pub use conversions::{
    FIELD_COUNT_LIMIT, FIELD_NAME_LIMIT, FIELD_VALUE_LIMIT, FOOTER_LIMIT,
    TITLE_LIMIT, channel_id, guild_id, option_values, to_channel_id, to_command, to_embed,
    to_guild_id, user_id, validate_embed,
};
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use handler::CadenzaHandler;
pub use messenger::DiscordMessenger;
pub use registrar::DiscordRegistrar;
pub use responder::DiscordResponder;
