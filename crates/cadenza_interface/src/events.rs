//! Playback lifecycle events and their delivery channel.

use cadenza_core::{GuildId, Track};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, warn};

/// Asynchronous notification of a playback state change.
///
/// Events for a given guild are delivered in emission order.
#[derive(Debug, Clone, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum PlaybackEvent {
    /// A track began playing.
    TrackStart {
        /// Guild
        guild: GuildId,
        /// Track that started
        track: Track,
    },
    /// A track was queued.
    TrackAdd {
        /// Guild
        guild: GuildId,
        /// Track that was added
        track: Track,
        /// Tracks in the session after the add, current track included
        queue_len: usize,
    },
    /// A track finished or was skipped.
    TrackEnd {
        /// Guild
        guild: GuildId,
        /// Track that ended
        track: Track,
    },
    /// The last queued track finished.
    QueueEnd {
        /// Guild
        guild: GuildId,
    },
    /// The queue was emptied by a stop.
    QueueClear {
        /// Guild
        guild: GuildId,
    },
    /// A track failed to play and was skipped.
    TrackError {
        /// Guild
        guild: GuildId,
        /// Track that failed
        track: Track,
        /// Reason reported by the player
        reason: String,
    },
    /// The player itself failed.
    PlayerError {
        /// Guild
        guild: GuildId,
        /// Reason reported by the player
        reason: String,
    },
    /// The voice connection closed.
    Disconnect {
        /// Guild
        guild: GuildId,
    },
}

impl PlaybackEvent {
    /// Guild the event belongs to.
    pub fn guild(&self) -> GuildId {
        match self {
            Self::TrackStart { guild, .. }
            | Self::TrackAdd { guild, .. }
            | Self::TrackEnd { guild, .. }
            | Self::QueueEnd { guild }
            | Self::QueueClear { guild }
            | Self::TrackError { guild, .. }
            | Self::PlayerError { guild, .. }
            | Self::Disconnect { guild } => *guild,
        }
    }

    /// Stable snake_case name of the event kind, for logs.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Sending half of the event channel, owned by a playback collaborator.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<PlaybackEvent>,
}

impl EventPublisher {
    /// Create a publisher that buffers up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Deliver `event` to every current subscriber.
    pub fn publish(&self, event: PlaybackEvent) {
        let name = event.name();
        if self.sender.send(event).is_err() {
            debug!(event = name, "No subscribers for playback event");
        }
    }

    /// Open a new subscription that sees events published from now on.
    pub fn subscribe(&self) -> EventSubscription {
        EventSubscription {
            receiver: self.sender.subscribe(),
        }
    }
}

/// Receiving half of the event channel.
///
/// Dropping the subscription unsubscribes.
#[derive(Debug)]
pub struct EventSubscription {
    receiver: broadcast::Receiver<PlaybackEvent>,
}

impl EventSubscription {
    /// Wait for the next event. `None` once the publisher is gone.
    ///
    /// A subscriber that falls behind the buffer loses the oldest events; the
    /// loss is logged and reception continues with the next available event.
    pub async fn recv(&mut self) -> Option<PlaybackEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Playback event subscriber lagged, events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Take the next buffered event without waiting.
    pub fn try_recv(&mut self) -> Option<PlaybackEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Playback event subscriber lagged, events dropped");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }
}
