//! Queue state as seen by the command layer.

use crate::Track;
use serde::{Deserialize, Serialize};

/// Repeat behaviour of a guild's player.
///
/// The numeric index is the value of the `loop` command's `mode` option.
///
/// # Examples
///
/// ```
/// use cadenza_core::LoopMode;
///
/// assert_eq!(LoopMode::from_index(2), Some(LoopMode::Queue));
/// assert_eq!(LoopMode::from_index(3), None);
/// assert_eq!(LoopMode::Queue.label(), "Full queue");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Play through the queue once
    #[default]
    Off,
    /// Repeat the current track
    Track,
    /// Re-append finished tracks to the end of the queue
    Queue,
}

impl LoopMode {
    /// Parse the option value used by the `loop` command.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::Off),
            1 => Some(Self::Track),
            2 => Some(Self::Queue),
            _ => None,
        }
    }

    /// Option value used by the `loop` command.
    pub fn index(self) -> i64 {
        match self {
            Self::Off => 0,
            Self::Track => 1,
            Self::Queue => 2,
        }
    }

    /// Label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Track => "Current track",
            Self::Queue => "Full queue",
        }
    }
}

/// Point-in-time copy of a guild's queue.
///
/// `current` is never part of `upcoming`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Track being played, if any
    pub current: Option<Track>,
    /// Tracks waiting to play, in play order
    pub upcoming: Vec<Track>,
    /// Active repeat mode
    pub loop_mode: LoopMode,
}

impl QueueSnapshot {
    /// True when nothing is playing and nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.upcoming.is_empty()
    }

    /// Combined length of the upcoming tracks, ignoring live streams.
    pub fn upcoming_length_ms(&self) -> u64 {
        self.upcoming
            .iter()
            .filter_map(|track| *track.length_ms())
            .sum()
    }
}

/// The current track and how far into it the player is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct NowPlaying {
    /// Track being played
    track: Track,
    /// Playback position in milliseconds
    position_ms: u64,
    /// Whether the player is paused
    paused: bool,
}

impl NowPlaying {
    /// Create a now-playing report.
    pub fn new(track: Track, position_ms: u64, paused: bool) -> Self {
        Self {
            track,
            position_ms,
            paused,
        }
    }

    /// Progress through the track as a percentage in `[0, 100]`.
    ///
    /// Live streams report 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use cadenza_core::{NowPlaying, Track};
    ///
    /// let np = NowPlaying::new(Track::new("a", "b", Some(200_000)), 80_000, false);
    /// assert_eq!(np.progress_percent(), 40.0);
    /// ```
    pub fn progress_percent(&self) -> f64 {
        match self.track.length_ms() {
            Some(length) if *length > 0 => {
                (self.position_ms as f64 / *length as f64 * 100.0).clamp(0.0, 100.0)
            }
            _ => 0.0,
        }
    }
}
