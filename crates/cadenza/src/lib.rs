//! Cadenza - a Discord music bot.
//!
//! Cadenza answers slash commands by driving a pluggable playback service and
//! mirrors that service's lifecycle events back into the channels that asked
//! for the music.
//!
//! # Architecture
//!
//! Cadenza is organized as a workspace with focused crates:
//!
//! - `cadenza_error` - Error types
//! - `cadenza_core` - Ids, tracks, queue snapshots, command schemas, messages
//! - `cadenza_interface` - The playback service and gateway seams
//! - `cadenza_playback` - In-memory playback service over a TOML track library
//! - `cadenza_social` - Command catalog, dispatcher, handlers, event bridge and
//!   the Serenity adapters
//!
//! This crate re-exports everything for convenience and adds the settings and
//! telemetry used by the `cadenza` binary.
//!
//! # Cargo Features
//!
//! - `observability` - OpenTelemetry span export to stdout

#![warn(missing_docs)]

mod settings;
mod telemetry;

pub use settings::BotSettings;
pub use telemetry::{
    DEFAULT_FILTER, TelemetryConfig, TelemetryGuard, init_telemetry, install_panic_hook,
};

pub use cadenza_core::*;
pub use cadenza_error::*;
pub use cadenza_interface::*;
pub use cadenza_playback::*;
pub use cadenza_social::*;
