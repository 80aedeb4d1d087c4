//! Trait definitions for the Cadenza music bot.
//!
//! This crate defines the seams between the command layer and everything it
//! does not own:
//! - [`PlaybackService`] - the playback collaborator (queue, audio, providers)
//! - [`InteractionResponder`] - acknowledging one inbound command
//! - [`ChannelMessenger`] - posting unsolicited messages to a text channel
//! - [`CommandRegistrar`] - submitting the command catalog to the platform
//!
//! Lifecycle events flow the other way through [`EventSubscription`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod events;
mod gateway;
mod playback;

pub use events::{EventPublisher, EventSubscription, PlaybackEvent};
pub use gateway::{ChannelMessenger, CommandRegistrar, InteractionResponder, RegistrationScope};
pub use playback::{EnqueueRequest, Enqueued, PlaybackService, Removal, TransportOutcome};
