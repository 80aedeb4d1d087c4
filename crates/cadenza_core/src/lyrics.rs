//! Lyrics returned by the playback collaborator.

use serde::{Deserialize, Serialize};

/// Song lyrics with an optional link to the full text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Lyrics {
    /// Song title
    title: String,
    /// Performing artist
    artist: String,
    /// Lyrics body
    text: String,
    /// Page with the complete lyrics
    #[serde(default)]
    url: Option<String>,
}

impl Lyrics {
    /// Create lyrics for a song.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        text: impl Into<String>,
        url: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            text: text.into(),
            url,
        }
    }
}
