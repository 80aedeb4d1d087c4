//! `PlaybackService` implementation over in-memory sessions.

use crate::TrackLibrary;
use crate::session::{GuildSession, PlayingTrack};
use async_trait::async_trait;
use cadenza_core::{
    ChannelId, GuildId, LoopMode, Lyrics, NowPlaying, QueueSnapshot, Track, TrackSource, UserId,
};
use cadenza_error::{CadenzaResult, PlaybackError, PlaybackErrorKind};
use cadenza_interface::{
    EnqueueRequest, Enqueued, EventPublisher, EventSubscription, PlaybackEvent, PlaybackService,
    Removal, TransportOutcome,
};
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

const EVENT_BUFFER: usize = 256;

/// Queue-only playback collaborator.
///
/// Cloning is cheap and clones share state.
///
/// # Example
/// ```no_run
/// use cadenza_playback::{InMemoryPlayback, TrackLibrary};
///
/// let library = TrackLibrary::from_file("library.toml").unwrap();
/// let playback = InMemoryPlayback::new(library);
/// let events = playback.events();
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryPlayback {
    library: Arc<TrackLibrary>,
    sessions: Arc<RwLock<HashMap<GuildId, GuildSession>>>,
    bot_user: Arc<RwLock<Option<UserId>>>,
    events: EventPublisher,
}

impl InMemoryPlayback {
    /// Create a collaborator resolving queries against `library`.
    pub fn new(library: TrackLibrary) -> Self {
        Self {
            library: Arc::new(library),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            bot_user: Arc::new(RwLock::new(None)),
            events: EventPublisher::new(EVENT_BUFFER),
        }
    }

    /// Publisher used for lifecycle events.
    pub fn events(&self) -> &EventPublisher {
        &self.events
    }

    /// Number of guilds with a voice session.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Advance every guild whose current track has run out.
    ///
    /// Returns the number of guilds that advanced.
    pub async fn advance_finished(&self) -> usize {
        let mut events = Vec::new();
        let mut sessions = self.sessions.write().await;
        for (guild, session) in sessions.iter_mut() {
            let finished = session
                .current
                .as_ref()
                .is_some_and(|playing| playing.is_finished());
            if finished {
                Self::advance_session(*guild, session, true, &mut events);
            }
        }
        let advanced = events
            .iter()
            .filter(|event| matches!(event, PlaybackEvent::TrackEnd { .. }))
            .count();
        self.publish_all(events);
        advanced
    }

    /// Report a track that failed mid-playback and move on to the next one.
    ///
    /// Returns false if nothing was playing.
    #[instrument(skip(self, reason))]
    pub async fn fail_current(&self, guild: GuildId, reason: impl Into<String>) -> bool {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(&guild) else {
            return false;
        };
        let Some(playing) = session.current.take() else {
            return false;
        };
        let mut events = vec![PlaybackEvent::TrackError {
            guild,
            track: playing.track,
            reason: reason.into(),
        }];
        match session.upcoming.pop_front() {
            Some(track) => {
                session.current = Some(PlayingTrack::start(track.clone()));
                events.push(PlaybackEvent::TrackStart { guild, track });
            }
            None => events.push(PlaybackEvent::QueueEnd { guild }),
        }
        self.publish_all(events);
        true
    }

    fn advance_session(
        guild: GuildId,
        session: &mut GuildSession,
        natural: bool,
        events: &mut Vec<PlaybackEvent>,
    ) -> Option<Track> {
        let (ended, next) = session.advance(natural);
        if let Some(track) = &ended {
            events.push(PlaybackEvent::TrackEnd {
                guild,
                track: track.clone(),
            });
        }
        match next {
            Some(track) => events.push(PlaybackEvent::TrackStart { guild, track }),
            None => events.push(PlaybackEvent::QueueEnd { guild }),
        }
        ended
    }

    /// Callers hold the session write lock so a guild's events go out in the
    /// order its state changed.
    fn publish_all(&self, events: Vec<PlaybackEvent>) {
        for event in events {
            self.events.publish(event);
        }
    }

    fn not_connected() -> PlaybackError {
        PlaybackError::new(PlaybackErrorKind::NotConnected)
    }

    fn out_of_range(index: usize, len: usize) -> PlaybackError {
        PlaybackError::new(PlaybackErrorKind::PositionOutOfRange {
            position: index + 1,
            len,
        })
    }
}

#[async_trait]
impl PlaybackService for InMemoryPlayback {
    #[instrument(skip(self))]
    async fn initialize(&self, bot_user: UserId) -> CadenzaResult<()> {
        *self.bot_user.write().await = Some(bot_user);
        info!(library_size = self.library.len(), "In-memory playback initialized");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn connect(
        &self,
        guild: GuildId,
        voice_channel: ChannelId,
        text_channel: ChannelId,
    ) -> CadenzaResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(guild)
            .and_modify(|session| {
                session.voice_channel = voice_channel;
                session.text_channel = text_channel;
            })
            .or_insert_with(|| GuildSession::new(voice_channel, text_channel));
        debug!("Voice session ready");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn disconnect(&self, guild: GuildId) -> CadenzaResult<bool> {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(&guild).is_some();
        if removed {
            self.events.publish(PlaybackEvent::Disconnect { guild });
        }
        Ok(removed)
    }

    #[instrument(skip(self, request), fields(guild = %request.guild, query = %request.query))]
    async fn enqueue(&self, request: EnqueueRequest) -> CadenzaResult<Option<Enqueued>> {
        let Some(found) = self
            .library
            .search(&request.query, request.source, 1)
            .into_iter()
            .next()
        else {
            debug!("No library match");
            return Ok(None);
        };

        let track = found
            .with_requester(Some(request.requester))
            .with_text_channel(Some(request.text_channel))
            .with_auto_added(false);

        let mut events = Vec::new();
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(request.guild)
            .or_insert_with(|| GuildSession::new(request.voice_channel, request.text_channel));

        let enqueued = if session.current.is_none() {
            session.current = Some(PlayingTrack::start(track.clone()));
            events.push(PlaybackEvent::TrackAdd {
                guild: request.guild,
                track: track.clone(),
                queue_len: session.len(),
            });
            events.push(PlaybackEvent::TrackStart {
                guild: request.guild,
                track: track.clone(),
            });
            Enqueued {
                track,
                started: true,
                position: 0,
            }
        } else {
            session.upcoming.push_back(track.clone());
            events.push(PlaybackEvent::TrackAdd {
                guild: request.guild,
                track: track.clone(),
                queue_len: session.len(),
            });
            Enqueued {
                track,
                started: false,
                position: session.upcoming.len(),
            }
        };
        self.publish_all(events);
        Ok(Some(enqueued))
    }

    #[instrument(skip(self))]
    async fn pause(&self, guild: GuildId) -> CadenzaResult<TransportOutcome> {
        let mut sessions = self.sessions.write().await;
        let Some(playing) = sessions.get_mut(&guild).and_then(|s| s.current.as_mut()) else {
            return Ok(TransportOutcome::Idle);
        };
        if playing.is_paused() {
            return Ok(TransportOutcome::Unchanged);
        }
        playing.pause();
        Ok(TransportOutcome::Applied)
    }

    #[instrument(skip(self))]
    async fn resume(&self, guild: GuildId) -> CadenzaResult<TransportOutcome> {
        let mut sessions = self.sessions.write().await;
        let Some(playing) = sessions.get_mut(&guild).and_then(|s| s.current.as_mut()) else {
            return Ok(TransportOutcome::Idle);
        };
        if !playing.is_paused() {
            return Ok(TransportOutcome::Unchanged);
        }
        playing.resume();
        Ok(TransportOutcome::Applied)
    }

    #[instrument(skip(self))]
    async fn skip(&self, guild: GuildId) -> CadenzaResult<Option<Track>> {
        let mut events = Vec::new();
        let mut sessions = self.sessions.write().await;
        let skipped = match sessions.get_mut(&guild) {
            Some(session) if session.current.is_some() => {
                Self::advance_session(guild, session, false, &mut events)
            }
            _ => None,
        };
        self.publish_all(events);
        Ok(skipped)
    }

    #[instrument(skip(self))]
    async fn stop(&self, guild: GuildId) -> CadenzaResult<TransportOutcome> {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(&guild) else {
            return Ok(TransportOutcome::Idle);
        };
        if session.current.is_none() && session.upcoming.is_empty() {
            return Ok(TransportOutcome::Idle);
        }
        session.current = None;
        session.upcoming.clear();
        self.events.publish(PlaybackEvent::QueueClear { guild });
        Ok(TransportOutcome::Applied)
    }

    #[instrument(skip(self))]
    async fn set_volume(&self, guild: GuildId, level: u8) -> CadenzaResult<()> {
        if level > 100 {
            return Err(PlaybackError::new(PlaybackErrorKind::Rejected(format!(
                "Volume must be between 0 and 100, got {}",
                level
            )))
            .into());
        }
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&guild).ok_or_else(Self::not_connected)?;
        session.volume = level;
        Ok(())
    }

    async fn queue_snapshot(&self, guild: GuildId) -> CadenzaResult<QueueSnapshot> {
        Ok(self
            .sessions
            .read()
            .await
            .get(&guild)
            .map(GuildSession::snapshot)
            .unwrap_or_default())
    }

    async fn now_playing(&self, guild: GuildId) -> CadenzaResult<Option<NowPlaying>> {
        Ok(self
            .sessions
            .read()
            .await
            .get(&guild)
            .and_then(GuildSession::now_playing))
    }

    #[instrument(skip(self))]
    async fn set_loop_mode(&self, guild: GuildId, mode: LoopMode) -> CadenzaResult<()> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&guild).ok_or_else(Self::not_connected)?;
        session.loop_mode = mode;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn shuffle(&self, guild: GuildId) -> CadenzaResult<usize> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&guild).ok_or_else(Self::not_connected)?;
        let upcoming = session.upcoming.make_contiguous();
        if upcoming.len() > 1 {
            upcoming.shuffle(&mut rand::thread_rng());
        }
        Ok(upcoming.len())
    }

    async fn search(
        &self,
        query: &str,
        source: Option<TrackSource>,
        limit: usize,
    ) -> CadenzaResult<Vec<Track>> {
        Ok(self.library.search(query, source, limit))
    }

    async fn fetch_lyrics(&self, query: &str) -> CadenzaResult<Option<Lyrics>> {
        Ok(self.library.lyrics(query))
    }

    #[instrument(skip(self))]
    async fn remove_at(&self, guild: GuildId, index: usize) -> CadenzaResult<Removal> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&guild).ok_or_else(Self::not_connected)?;
        let len = session.upcoming.len();
        let track = session
            .upcoming
            .remove(index)
            .ok_or_else(|| Self::out_of_range(index, len))?;
        Ok(Removal {
            track,
            remaining: session.upcoming.len(),
        })
    }

    #[instrument(skip(self))]
    async fn add_related(&self, guild: GuildId, count: usize) -> CadenzaResult<Vec<Track>> {
        let bot_user = *self.bot_user.read().await;
        let mut events = Vec::new();
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&guild).ok_or_else(Self::not_connected)?;
        let seed = session
            .current
            .as_ref()
            .map(|playing| playing.track.clone())
            .ok_or_else(|| PlaybackError::new(PlaybackErrorKind::NothingPlaying))?;

        let text_channel = session.text_channel;
        let queued: Vec<Track> = session.upcoming.iter().cloned().collect();
        let related: Vec<Track> = self
            .library
            .related(&seed, &queued, count)
            .into_iter()
            .map(|track| {
                track
                    .with_requester(bot_user)
                    .with_text_channel(Some(text_channel))
                    .with_auto_added(true)
            })
            .collect();

        for track in &related {
            session.upcoming.push_back(track.clone());
            events.push(PlaybackEvent::TrackAdd {
                guild,
                track: track.clone(),
                queue_len: session.len(),
            });
        }
        self.publish_all(events);
        Ok(related)
    }

    #[instrument(skip(self))]
    async fn move_track(&self, guild: GuildId, from: usize, to: usize) -> CadenzaResult<Track> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&guild).ok_or_else(Self::not_connected)?;
        let len = session.upcoming.len();
        if from >= len {
            return Err(Self::out_of_range(from, len).into());
        }
        if to >= len {
            return Err(Self::out_of_range(to, len).into());
        }
        let track = session
            .upcoming
            .remove(from)
            .ok_or_else(|| Self::out_of_range(from, len))?;
        session.upcoming.insert(to, track.clone());
        Ok(track)
    }

    fn subscribe(&self) -> EventSubscription {
        self.events.subscribe()
    }
}
