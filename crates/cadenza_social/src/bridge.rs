//! Mirrors playback lifecycle events into text channels.

use crate::render::{MessageSpec, now_playing_card, render};
use cadenza_core::{ChannelId, RenderedMessage, Track};
use cadenza_interface::{ChannelMessenger, EventSubscription, PlaybackEvent};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// What the bridge did with one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum BridgeOutcome {
    /// A message was posted to a text channel
    Announced,
    /// The event was only logged
    Logged,
    /// The event was deliberately not announced
    Suppressed,
    /// An announcement was due but could not be delivered
    Undeliverable,
}

/// Subscribes to the playback collaborator and announces events.
#[derive(Clone)]
pub struct EventBridge {
    messenger: Arc<dyn ChannelMessenger>,
}

impl std::fmt::Debug for EventBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBridge").finish_non_exhaustive()
    }
}

impl EventBridge {
    /// Bridge posting through `messenger`.
    pub fn new(messenger: Arc<dyn ChannelMessenger>) -> Self {
        Self { messenger }
    }

    /// Consume events until the subscription closes.
    pub async fn run(self, mut subscription: EventSubscription) {
        info!("Playback event bridge started");
        while let Some(event) = subscription.recv().await {
            let name = event.name();
            let guild = event.guild();
            if let Err(panic) = AssertUnwindSafe(self.handle_event(event)).catch_unwind().await {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(event = name, %guild, %reason, "Playback event listener panicked");
            }
        }
        info!("Playback event bridge stopped");
    }

    /// Handle one event. Never fails; delivery problems are logged.
    #[instrument(skip(self, event), fields(event = event.name(), guild = %event.guild()))]
    pub async fn handle_event(&self, event: PlaybackEvent) -> BridgeOutcome {
        match event {
            PlaybackEvent::TrackStart { track, .. } => {
                let message = render(&now_playing_card(&track));
                self.announce(&track, &message).await
            }
            PlaybackEvent::TrackAdd {
                track, queue_len, ..
            } => {
                if *track.auto_added() || queue_len <= 1 {
                    debug!(queue_len, auto_added = *track.auto_added(), "Track add not announced");
                    return BridgeOutcome::Suppressed;
                }
                let message = render(
                    &MessageSpec::new("Added to queue")
                        .description(track.headline())
                        .field("Duration", track.duration_label(), true)
                        .field("Position", (queue_len - 1).to_string(), true)
                        .thumbnail(track.thumbnail().clone()),
                );
                self.announce(&track, &message).await
            }
            PlaybackEvent::TrackError { track, reason, .. } => {
                warn!(track = %track.headline(), %reason, "Track failed to play");
                let message = render(&MessageSpec::notice(
                    "Track skipped",
                    format!("Couldn't play **{}**: {}", track.headline(), reason),
                ));
                self.announce(&track, &message).await
            }
            PlaybackEvent::TrackEnd { track, .. } => {
                debug!(track = %track.headline(), "Track ended");
                BridgeOutcome::Logged
            }
            PlaybackEvent::QueueEnd { .. } => {
                info!("Queue finished");
                BridgeOutcome::Logged
            }
            PlaybackEvent::QueueClear { .. } => {
                info!("Queue cleared");
                BridgeOutcome::Logged
            }
            PlaybackEvent::PlayerError { reason, .. } => {
                error!(%reason, "Player error");
                BridgeOutcome::Logged
            }
            PlaybackEvent::Disconnect { .. } => {
                info!("Disconnected from voice");
                BridgeOutcome::Logged
            }
        }
    }

    async fn announce(&self, track: &Track, message: &RenderedMessage) -> BridgeOutcome {
        let Some(channel) = *track.text_channel() else {
            debug!(track = %track.headline(), "No text channel for track; logging only");
            return BridgeOutcome::Logged;
        };
        self.send(channel, message).await
    }

    async fn send(&self, channel: ChannelId, message: &RenderedMessage) -> BridgeOutcome {
        match self.messenger.send(channel, message).await {
            Ok(()) => BridgeOutcome::Announced,
            Err(e) => {
                error!(%channel, error = %e, "Failed to deliver playback announcement");
                BridgeOutcome::Undeliverable
            }
        }
    }
}
