//! TOML-backed track catalogue used to resolve queries.

use cadenza_core::{Lyrics, Track, TrackSource};
use cadenza_error::{CadenzaError, CadenzaResult, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// A library track plus the metadata only the library knows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    /// Track metadata
    #[serde(flatten)]
    pub track: Track,
    /// Free-form tags used to find related tracks
    #[serde(default)]
    pub tags: Vec<String>,
    /// Lyrics text
    #[serde(default)]
    pub lyrics: Option<String>,
    /// Link to the full lyrics
    #[serde(default)]
    pub lyrics_url: Option<String>,
}

impl LibraryEntry {
    fn is_same_song(&self, track: &Track) -> bool {
        same_song(&self.track, track)
    }

    fn haystack(&self) -> String {
        format!("{} {}", self.track.title(), self.track.artist()).to_lowercase()
    }
}

fn same_song(a: &Track, b: &Track) -> bool {
    a.title().eq_ignore_ascii_case(b.title()) && a.artist().eq_ignore_ascii_case(b.artist())
}

/// Searchable set of known tracks.
///
/// # Examples
///
/// ```
/// use cadenza_playback::TrackLibrary;
///
/// let library = TrackLibrary::from_toml_str(r#"
///     [[tracks]]
///     title = "Blue in Green"
///     artist = "Miles Davis"
///     length_ms = 337000
/// "#).unwrap();
///
/// assert_eq!(library.search("miles blue", None, 10).len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackLibrary {
    /// Entries in file order
    #[serde(default)]
    tracks: Vec<LibraryEntry>,
}

impl TrackLibrary {
    /// Build a library from entries.
    pub fn new(tracks: Vec<LibraryEntry>) -> Self {
        Self { tracks }
    }

    /// Load a library from a TOML file with a `[[tracks]]` array.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> CadenzaResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CadenzaError::from(ConfigError::new(format!(
                "Failed to read track library {}: {}",
                path.as_ref().display(),
                e
            )))
        })?;
        let library = Self::from_toml_str(&content)?;
        debug!(tracks = library.len(), "Loaded track library");
        Ok(library)
    }

    /// Parse a library from TOML text.
    pub fn from_toml_str(content: &str) -> CadenzaResult<Self> {
        toml::from_str(content).map_err(|e| {
            CadenzaError::from(ConfigError::new(format!(
                "Failed to parse track library: {}",
                e
            )))
        })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// True when the library has no entries.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracks whose title and artist contain every word of `query`, in file order.
    pub fn search(&self, query: &str, source: Option<TrackSource>, limit: usize) -> Vec<Track> {
        let query = query.to_lowercase();
        let terms: Vec<&str> = query.split_whitespace().collect();
        if terms.is_empty() {
            return Vec::new();
        }

        self.tracks
            .iter()
            .filter(|entry| source.is_none_or(|source| *entry.track.source() == source))
            .filter(|entry| {
                let haystack = entry.haystack();
                terms.iter().all(|term| haystack.contains(term))
            })
            .take(limit)
            .map(|entry| entry.track.clone())
            .collect()
    }

    /// Lyrics of the best match for `query` that has lyrics.
    pub fn lyrics(&self, query: &str) -> Option<Lyrics> {
        let query = query.to_lowercase();
        let terms: Vec<&str> = query.split_whitespace().collect();
        if terms.is_empty() {
            return None;
        }

        self.tracks
            .iter()
            .filter(|entry| entry.lyrics.is_some())
            .find(|entry| {
                let haystack = entry.haystack();
                terms.iter().all(|term| haystack.contains(term))
            })
            .and_then(|entry| {
                entry.lyrics.as_ref().map(|text| {
                    Lyrics::new(
                        entry.track.title().clone(),
                        entry.track.artist().clone(),
                        text.clone(),
                        entry.lyrics_url.clone(),
                    )
                })
            })
    }

    /// Up to `count` tracks sharing an artist or tags with `seed`, best match first.
    ///
    /// The seed itself and anything in `exclude` are never returned.
    pub fn related(&self, seed: &Track, exclude: &[Track], count: usize) -> Vec<Track> {
        let seed_tags: &[String] = self
            .tracks
            .iter()
            .find(|entry| entry.is_same_song(seed))
            .map(|entry| entry.tags.as_slice())
            .unwrap_or(&[]);

        let mut scored: Vec<(usize, &LibraryEntry)> = self
            .tracks
            .iter()
            .filter(|entry| !entry.is_same_song(seed))
            .filter(|entry| !exclude.iter().any(|track| entry.is_same_song(track)))
            .map(|entry| {
                let artist_score = if entry.track.artist().eq_ignore_ascii_case(seed.artist()) {
                    2
                } else {
                    0
                };
                let tag_score = entry
                    .tags
                    .iter()
                    .filter(|tag| seed_tags.iter().any(|seed_tag| seed_tag.eq_ignore_ascii_case(tag)))
                    .count();
                (artist_score + tag_score, entry)
            })
            .filter(|(score, _)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(count)
            .map(|(_, entry)| entry.track.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> TrackLibrary {
        TrackLibrary::from_toml_str(
            r#"
            [[tracks]]
            title = "So What"
            artist = "Miles Davis"
            length_ms = 562000
            tags = ["jazz", "modal"]
            lyrics = "instrumental"

            [[tracks]]
            title = "Freddie Freeloader"
            artist = "Miles Davis"
            length_ms = 589000
            tags = ["jazz"]

            [[tracks]]
            title = "Impressions"
            artist = "John Coltrane"
            source = "spotify"
            length_ms = 868000
            tags = ["jazz", "modal"]

            [[tracks]]
            title = "Windowlicker"
            artist = "Aphex Twin"
            source = "soundcloud"
            length_ms = 366000
            tags = ["idm"]
            "#,
        )
        .unwrap()
    }

    #[test]
    fn search_requires_every_term() {
        let library = library();
        assert_eq!(library.search("miles", None, 10).len(), 2);
        assert_eq!(library.search("miles so", None, 10).len(), 1);
        assert!(library.search("   ", None, 10).is_empty());
    }

    #[test]
    fn search_filters_by_source_and_limit() {
        let library = library();
        let spotify = library.search("impressions", Some(TrackSource::Spotify), 10);
        assert_eq!(spotify.len(), 1);
        assert!(library.search("impressions", Some(TrackSource::SoundCloud), 10).is_empty());
        assert_eq!(library.search("miles", None, 1).len(), 1);
    }

    #[test]
    fn related_prefers_same_artist_then_tags() {
        let library = library();
        let seed = library.search("so what", None, 1).remove(0);

        let related = library.related(&seed, &[], 5);
        let titles: Vec<&str> = related.iter().map(|t| t.title().as_str()).collect();
        assert_eq!(titles, vec!["Freddie Freeloader", "Impressions"]);
    }

    #[test]
    fn related_skips_excluded_tracks() {
        let library = library();
        let seed = library.search("so what", None, 1).remove(0);
        let queued = library.search("freddie", None, 1);

        let related = library.related(&seed, &queued, 5);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].title(), "Impressions");
    }

    #[test]
    fn lyrics_only_from_entries_with_text() {
        let library = library();
        assert!(library.lyrics("so what").is_some());
        assert!(library.lyrics("freddie").is_none());
    }
}
