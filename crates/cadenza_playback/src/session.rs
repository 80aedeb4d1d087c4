//! Per-guild player state.

use cadenza_core::{ChannelId, LoopMode, NowPlaying, QueueSnapshot, Track};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// The track under the playhead and its timing.
#[derive(Debug, Clone)]
pub(crate) struct PlayingTrack {
    pub(crate) track: Track,
    started_at: Instant,
    paused_at: Option<Instant>,
    paused_total: Duration,
}

impl PlayingTrack {
    pub(crate) fn start(track: Track) -> Self {
        Self {
            track,
            started_at: Instant::now(),
            paused_at: None,
            paused_total: Duration::ZERO,
        }
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub(crate) fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(Instant::now());
        }
    }

    pub(crate) fn resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += paused_at.elapsed();
        }
    }

    pub(crate) fn position_ms(&self) -> u64 {
        let now = self.paused_at.unwrap_or_else(Instant::now);
        let played = now
            .saturating_duration_since(self.started_at)
            .saturating_sub(self.paused_total);
        u64::try_from(played.as_millis()).unwrap_or(u64::MAX)
    }

    pub(crate) fn is_finished(&self) -> bool {
        match self.track.length_ms() {
            Some(length) => !self.is_paused() && self.position_ms() >= *length,
            None => false,
        }
    }
}

/// Voice session for one guild.
#[derive(Debug, Clone)]
pub(crate) struct GuildSession {
    pub(crate) voice_channel: ChannelId,
    pub(crate) text_channel: ChannelId,
    pub(crate) current: Option<PlayingTrack>,
    pub(crate) upcoming: VecDeque<Track>,
    pub(crate) volume: u8,
    pub(crate) loop_mode: LoopMode,
}

impl GuildSession {
    pub(crate) fn new(voice_channel: ChannelId, text_channel: ChannelId) -> Self {
        Self {
            voice_channel,
            text_channel,
            current: None,
            upcoming: VecDeque::new(),
            volume: 100,
            loop_mode: LoopMode::Off,
        }
    }

    /// Tracks in the session, current track included.
    pub(crate) fn len(&self) -> usize {
        self.upcoming.len() + usize::from(self.current.is_some())
    }

    pub(crate) fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            current: self.current.as_ref().map(|playing| playing.track.clone()),
            upcoming: self.upcoming.iter().cloned().collect(),
            loop_mode: self.loop_mode,
        }
    }

    pub(crate) fn now_playing(&self) -> Option<NowPlaying> {
        self.current.as_ref().map(|playing| {
            NowPlaying::new(
                playing.track.clone(),
                playing.position_ms(),
                playing.is_paused(),
            )
        })
    }

    /// End the current track and start the next one.
    ///
    /// `natural` is true when the track ran out rather than being skipped; only
    /// then does track-loop replay it. Returns the ended track and the new one.
    pub(crate) fn advance(&mut self, natural: bool) -> (Option<Track>, Option<Track>) {
        let ended = self.current.take().map(|playing| playing.track);

        if let Some(track) = &ended {
            match self.loop_mode {
                LoopMode::Track if natural => self.upcoming.push_front(track.clone()),
                LoopMode::Queue => self.upcoming.push_back(track.clone()),
                _ => {}
            }
        }

        let next = self.upcoming.pop_front();
        if let Some(track) = &next {
            self.current = Some(PlayingTrack::start(track.clone()));
        }
        (ended, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(titles: &[&str]) -> GuildSession {
        let mut session = GuildSession::new(ChannelId(1), ChannelId(2));
        for title in titles {
            session.upcoming.push_back(Track::new(*title, "artist", Some(1_000)));
        }
        session
    }

    #[test]
    fn advance_without_loop_drains_queue() {
        let mut session = session_with(&["a", "b"]);
        let (_, next) = session.advance(false);
        assert_eq!(next.unwrap().title(), "a");
        let (ended, next) = session.advance(false);
        assert_eq!(ended.unwrap().title(), "a");
        assert_eq!(next.unwrap().title(), "b");
        let (_, next) = session.advance(false);
        assert!(next.is_none());
        assert!(session.current.is_none());
    }

    #[test]
    fn track_loop_replays_only_on_natural_end() {
        let mut session = session_with(&["a", "b"]);
        session.loop_mode = LoopMode::Track;
        session.advance(false);

        let (_, next) = session.advance(true);
        assert_eq!(next.unwrap().title(), "a");

        let (_, next) = session.advance(false);
        assert_eq!(next.unwrap().title(), "b");
    }

    #[test]
    fn queue_loop_recycles_ended_tracks() {
        let mut session = session_with(&["a", "b"]);
        session.loop_mode = LoopMode::Queue;
        session.advance(false);
        session.advance(false);

        let titles: Vec<&str> = session.upcoming.iter().map(|t| t.title().as_str()).collect();
        assert_eq!(titles, vec!["a"]);
    }

    #[test]
    fn paused_track_does_not_finish() {
        let mut playing = PlayingTrack::start(Track::new("a", "b", Some(0)));
        assert!(playing.is_finished());
        playing.pause();
        assert!(!playing.is_finished());
        playing.resume();
        assert!(!playing.is_paused());
    }
}
