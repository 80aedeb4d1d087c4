//! Track metadata.

use crate::{ChannelId, UserId};
use serde::{Deserialize, Serialize};

/// Streaming provider a track was resolved from.
///
/// The lowercase name doubles as the value of the `source` command option.
///
/// # Examples
///
/// ```
/// use cadenza_core::TrackSource;
/// use std::str::FromStr;
///
/// assert_eq!(TrackSource::from_str("soundcloud").unwrap(), TrackSource::SoundCloud);
/// assert_eq!(TrackSource::Spotify.as_ref(), "spotify");
/// assert_eq!(TrackSource::SoundCloud.label(), "SoundCloud");
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
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrackSource {
    /// Default search provider
    #[default]
    YouTube,
    /// Spotify catalog
    Spotify,
    /// SoundCloud catalog
    SoundCloud,
}

impl TrackSource {
    /// Human-readable provider name.
    pub fn label(self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::Spotify => "Spotify",
            Self::SoundCloud => "SoundCloud",
        }
    }
}

/// A playable track as reported by the playback collaborator.
///
/// `requester` and `text_channel` are filled in when a member queues the track;
/// library entries leave them empty. `auto_added` marks tracks queued by the bot
/// itself (related-track autoplay) so their queue notices can be suppressed.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct Track {
    /// Track title
    title: String,
    /// Performing artist
    artist: String,
    /// Length in milliseconds; `None` for live streams
    #[serde(default)]
    length_ms: Option<u64>,
    /// Artwork URL
    #[serde(default)]
    thumbnail: Option<String>,
    /// Provider the track came from
    #[serde(default)]
    source: TrackSource,
    /// Member who queued the track
    #[serde(default)]
    requester: Option<UserId>,
    /// Text channel the track was requested from
    #[serde(default)]
    text_channel: Option<ChannelId>,
    /// Queued automatically rather than by a member
    #[serde(default)]
    auto_added: bool,
}

impl Track {
    /// Create a track with the given metadata and no requester.
    ///
    /// # Examples
    ///
    /// ```
    /// use cadenza_core::Track;
    ///
    /// let track = Track::new("Clair de Lune", "Debussy", Some(303_000));
    /// assert_eq!(track.duration_label(), "5:03");
    /// assert!(!*track.auto_added());
    /// ```
    pub fn new(title: impl Into<String>, artist: impl Into<String>, length_ms: Option<u64>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            length_ms,
            thumbnail: None,
            source: TrackSource::default(),
            requester: None,
            text_channel: None,
            auto_added: false,
        }
    }

    /// Display string for the track length (`m:ss`, `h:mm:ss` or `LIVE`).
    pub fn duration_label(&self) -> String {
        match self.length_ms {
            Some(ms) => format_duration(ms),
            None => "LIVE".to_string(),
        }
    }

    /// One-line `Title - Artist` summary.
    pub fn headline(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }
}

/// Format milliseconds as `m:ss`, or `h:mm:ss` from one hour up.
///
/// # Examples
///
/// ```
/// use cadenza_core::format_duration;
///
/// assert_eq!(format_duration(0), "0:00");
/// assert_eq!(format_duration(65_000), "1:05");
/// assert_eq!(format_duration(3_723_000), "1:02:03");
/// ```
pub fn format_duration(ms: u64) -> String {
    let total_secs = ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
