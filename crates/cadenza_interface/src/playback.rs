//! The playback collaborator contract.

use crate::EventSubscription;
use async_trait::async_trait;
use cadenza_core::{
    ChannelId, GuildId, LoopMode, Lyrics, NowPlaying, QueueSnapshot, Track, TrackSource, UserId,
};
use cadenza_error::CadenzaResult;

/// A member's request to queue something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnqueueRequest {
    /// Guild whose queue receives the track
    pub guild: GuildId,
    /// Voice channel to join if not yet connected
    pub voice_channel: ChannelId,
    /// Text channel the request came from; used for announcements
    pub text_channel: ChannelId,
    /// Member who asked
    pub requester: UserId,
    /// Search text or URL
    pub query: String,
    /// Provider to search; `None` uses the default provider
    pub source: Option<TrackSource>,
}

/// Result of a successful enqueue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enqueued {
    /// The resolved track
    pub track: Track,
    /// Whether playback started with this track
    pub started: bool,
    /// 1-based position among upcoming tracks; 0 when `started`
    pub position: usize,
}

/// Result of removing a queue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// The removed track
    pub track: Track,
    /// Upcoming tracks left afterwards
    pub remaining: usize,
}

/// Outcome of a transport command (pause, resume, stop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum TransportOutcome {
    /// The player changed state
    Applied,
    /// The player was already in the requested state
    Unchanged,
    /// There is nothing playing to act on
    Idle,
}

/// The external component owning queues, audio transport and providers.
///
/// The collaborator serializes access to each guild's state internally; callers
/// may invoke it concurrently from any task. Every method that changes state also
/// emits the matching [`PlaybackEvent`](crate::PlaybackEvent) to subscribers.
///
/// Queue indices are 0-based. User-facing 1-based positions are converted by the
/// command layer.
#[async_trait]
pub trait PlaybackService: Send + Sync {
    /// One-time setup once the bot's own user id is known.
    async fn initialize(&self, bot_user: UserId) -> CadenzaResult<()>;

    /// Join `voice_channel`, announcing to `text_channel`.
    async fn connect(
        &self,
        guild: GuildId,
        voice_channel: ChannelId,
        text_channel: ChannelId,
    ) -> CadenzaResult<()>;

    /// Leave voice and drop the guild's session. Returns false if not connected.
    async fn disconnect(&self, guild: GuildId) -> CadenzaResult<bool>;

    /// Resolve the query and queue the first match. `None` when nothing matched.
    async fn enqueue(&self, request: EnqueueRequest) -> CadenzaResult<Option<Enqueued>>;

    /// Pause the current track.
    async fn pause(&self, guild: GuildId) -> CadenzaResult<TransportOutcome>;

    /// Resume a paused track.
    async fn resume(&self, guild: GuildId) -> CadenzaResult<TransportOutcome>;

    /// Skip the current track, returning it. `None` when nothing was playing.
    async fn skip(&self, guild: GuildId) -> CadenzaResult<Option<Track>>;

    /// Stop playback and clear the queue.
    async fn stop(&self, guild: GuildId) -> CadenzaResult<TransportOutcome>;

    /// Set the output volume (0-100).
    async fn set_volume(&self, guild: GuildId, level: u8) -> CadenzaResult<()>;

    /// Copy of the guild's queue.
    async fn queue_snapshot(&self, guild: GuildId) -> CadenzaResult<QueueSnapshot>;

    /// The current track and position, if anything is playing.
    async fn now_playing(&self, guild: GuildId) -> CadenzaResult<Option<NowPlaying>>;

    /// Change the repeat mode.
    async fn set_loop_mode(&self, guild: GuildId, mode: LoopMode) -> CadenzaResult<()>;

    /// Shuffle upcoming tracks, returning how many were reordered.
    async fn shuffle(&self, guild: GuildId) -> CadenzaResult<usize>;

    /// Search a provider without queueing anything.
    async fn search(
        &self,
        query: &str,
        source: Option<TrackSource>,
        limit: usize,
    ) -> CadenzaResult<Vec<Track>>;

    /// Look up lyrics. `None` when no lyrics are known.
    async fn fetch_lyrics(&self, query: &str) -> CadenzaResult<Option<Lyrics>>;

    /// Remove the upcoming track at 0-based `index`.
    async fn remove_at(&self, guild: GuildId, index: usize) -> CadenzaResult<Removal>;

    /// Queue up to `count` tracks related to the current one, marked auto-added.
    async fn add_related(&self, guild: GuildId, count: usize) -> CadenzaResult<Vec<Track>>;

    /// Move the upcoming track at `from` to `to` (both 0-based), returning it.
    async fn move_track(&self, guild: GuildId, from: usize, to: usize) -> CadenzaResult<Track>;

    /// Subscribe to lifecycle events. Dropping the subscription cancels it.
    fn subscribe(&self) -> EventSubscription;
}
