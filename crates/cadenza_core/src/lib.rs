//! Core data types for the Cadenza music bot.
//!
//! This crate provides the plain data shared between the command layer, the
//! playback collaborator and the Discord adapters. Nothing here performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod ids;
mod lyrics;
mod message;
mod queue;
mod reply;
mod track;

pub use command::{CommandSpec, ParamValue, ParameterChoice, ParameterKind, ParameterSpec};
pub use ids::{ChannelId, GuildId, UserId};
pub use lyrics::Lyrics;
pub use message::{EmbedField, RenderedMessage};
pub use queue::{LoopMode, NowPlaying, QueueSnapshot};
pub use reply::ReplyState;
pub use track::{Track, TrackSource, format_duration};
