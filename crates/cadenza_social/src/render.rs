//! Result rendering: the only place user-facing messages are formatted.

use cadenza_core::{EmbedField, NowPlaying, RenderedMessage, Track};

/// Default embed color.
pub const BRAND_COLOR: u32 = 0x1DB954;
/// Color of failures.
pub const ERROR_COLOR: u32 = 0xED4245;
/// Color of degenerate outcomes (nothing to do, nothing found).
pub const NOTICE_COLOR: u32 = 0xFEE75C;

/// Character limit for `queue` and `search` listings.
pub const LISTING_LIMIT: usize = 3500;
/// Character limit for lyrics text.
pub const LYRICS_LIMIT: usize = 4000;
/// Maximum length of a rendered description.
pub const DESCRIPTION_LIMIT: usize = 4096;
/// Cells in a progress bar.
pub const PROGRESS_CELLS: usize = 15;

const FILLED_CELL: char = '▰';
const EMPTY_CELL: char = '▱';

/// Description of a message before rendering.
///
/// # Examples
///
/// ```
/// use cadenza_social::{BRAND_COLOR, MessageSpec, render};
///
/// let message = render(&MessageSpec::new("Paused").description("Playback paused"));
/// assert_eq!(message.color, BRAND_COLOR);
/// assert!(message.footer.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageSpec {
    title: String,
    description: Option<String>,
    color: Option<u32>,
    fields: Vec<EmbedField>,
    thumbnail: Option<String>,
    footer: Option<String>,
}

impl MessageSpec {
    /// A message with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// A failure message in the shared error style.
    pub fn error(description: impl Into<String>) -> Self {
        Self::new("Error")
            .description(description)
            .color(ERROR_COLOR)
    }

    /// A degenerate-outcome message.
    pub fn notice(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title).description(description).color(NOTICE_COLOR)
    }

    /// Set the body text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Override the brand color.
    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Set the thumbnail when one is known.
    pub fn thumbnail(mut self, thumbnail: Option<impl Into<String>>) -> Self {
        self.thumbnail = thumbnail.map(Into::into);
        self
    }

    /// Set the footer.
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

/// Render a message description. Pure.
pub fn render(spec: &MessageSpec) -> RenderedMessage {
    RenderedMessage {
        title: spec.title.clone(),
        description: spec.description.clone().unwrap_or_default(),
        color: spec.color.unwrap_or(BRAND_COLOR),
        fields: spec.fields.clone(),
        thumbnail: spec.thumbnail.clone(),
        footer: spec.footer.clone(),
    }
}

/// Error message shown to the invoker.
pub fn error_message(text: impl Into<String>) -> RenderedMessage {
    render(&MessageSpec::error(text))
}

/// A fixed-width progress bar for `percent` (0-100).
///
/// # Examples
///
/// ```
/// use cadenza_social::progress_bar;
///
/// assert_eq!(progress_bar(40.0), "▰▰▰▰▰▰▱▱▱▱▱▱▱▱▱");
/// ```
pub fn progress_bar(percent: f64) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled = ((ratio * PROGRESS_CELLS as f64).round() as usize).min(PROGRESS_CELLS);
    let mut bar = String::with_capacity(PROGRESS_CELLS * FILLED_CELL.len_utf8());
    bar.extend(std::iter::repeat_n(FILLED_CELL, filled));
    bar.extend(std::iter::repeat_n(EMPTY_CELL, PROGRESS_CELLS - filled));
    bar
}

/// Lines joined until `limit` characters, with a `+N more` suffix for the rest.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct Listing {
    text: String,
    shown: usize,
    hidden: usize,
}

impl Listing {
    /// Build a listing from `lines`, keeping whole lines within `limit` characters.
    ///
    /// The suffix is not counted against the limit.
    pub fn new(lines: &[String], limit: usize) -> Self {
        let mut text = String::new();
        let mut used = 0;
        let mut shown = 0;
        for line in lines {
            let cost = line.chars().count() + usize::from(shown > 0);
            if used + cost > limit {
                break;
            }
            if shown > 0 {
                text.push('\n');
            }
            text.push_str(line);
            used += cost;
            shown += 1;
        }

        let hidden = lines.len() - shown;
        if hidden > 0 {
            text.push_str(&format!("\n+{} more", hidden));
        }
        Self {
            text,
            shown,
            hidden,
        }
    }

    /// Consume the listing, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Truncate `text` to `limit` characters. Returns the text and whether it was cut.
pub fn truncate_chars(text: &str, limit: usize) -> (String, bool) {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => (format!("{}…", &text[..cut]), true),
        None => (text.to_string(), false),
    }
}

/// Lyrics cut to fit one description, followed by the full-lyrics link when
/// there is one. The flag reports whether the text was cut.
///
/// Links too long to share the description with the lyrics are dropped.
pub fn lyrics_body(text: &str, url: Option<&str>) -> (String, bool) {
    let link = url
        .map(|url| format!("\n\n[View full lyrics]({})", url))
        .filter(|link| link.chars().count() < DESCRIPTION_LIMIT / 2);
    let reserved = link.as_ref().map_or(0, |link| link.chars().count());
    // A cut adds one character for the ellipsis.
    let limit = LYRICS_LIMIT.min(DESCRIPTION_LIMIT - reserved - 1);
    let (mut body, truncated) = truncate_chars(text, limit);
    if let Some(link) = link {
        body.push_str(&link);
    }
    (body, truncated)
}

/// `Title - Artist (3:20)` line used in listings.
pub fn track_line(position: usize, track: &Track) -> String {
    format!(
        "`{}.` {} ({})",
        position,
        track.headline(),
        track.duration_label()
    )
}

/// Announcement for a track that started playing.
pub fn now_playing_card(track: &Track) -> MessageSpec {
    let mut spec = MessageSpec::new("Now playing")
        .description(track.headline())
        .field("Duration", track.duration_label(), true)
        .field("Source", track.source().label(), true)
        .thumbnail(track.thumbnail().clone());
    if let Some(requester) = track.requester() {
        spec = spec.field("Requested by", requester.mention(), true);
    }
    spec
}

/// Current track with its progress bar.
pub fn progress_card(now: &NowPlaying) -> MessageSpec {
    let track = now.track();
    let position = cadenza_core::format_duration(*now.position_ms());
    let bar = progress_bar(now.progress_percent());
    let title = if *now.paused() {
        "Now playing (paused)"
    } else {
        "Now playing"
    };
    let mut spec = MessageSpec::new(title)
        .description(format!(
            "{}\n\n{} `{} / {}`",
            track.headline(),
            bar,
            position,
            track.duration_label()
        ))
        .field("Source", track.source().label(), true)
        .thumbnail(track.thumbnail().clone());
    if let Some(requester) = track.requester() {
        spec = spec.field("Requested by", requester.mention(), true);
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lyrics_body_keeps_room_for_the_link() {
        let url = format!("https://lyrics.example/{}", "a".repeat(120));
        let (body, truncated) = lyrics_body(&"la ".repeat(3000), Some(&url));
        assert!(truncated);
        assert!(body.chars().count() <= DESCRIPTION_LIMIT);
        assert!(body.ends_with(&format!("[View full lyrics]({})", url)));

        let (short, truncated) = lyrics_body("instrumental", None);
        assert!(!truncated);
        assert_eq!(short, "instrumental");
    }

    #[test]
    fn progress_bar_rounds_to_nearest_cell() {
        let bar = progress_bar(40.0);
        assert_eq!(bar.chars().filter(|c| *c == FILLED_CELL).count(), 6);
        assert_eq!(bar.chars().filter(|c| *c == EMPTY_CELL).count(), 9);
        assert_eq!(bar.chars().take(6).collect::<String>(), "▰".repeat(6));
    }

    #[test]
    fn progress_bar_clamps() {
        assert_eq!(progress_bar(-5.0), "▱".repeat(PROGRESS_CELLS));
        assert_eq!(progress_bar(250.0), "▰".repeat(PROGRESS_CELLS));
    }

    #[test]
    fn listing_counts_hidden_lines() {
        let lines: Vec<String> = (1..=50).map(|i| format!("{:0>99}", i)).collect();
        let listing = Listing::new(&lines, LISTING_LIMIT);
        assert_eq!(*listing.shown(), 35);
        assert_eq!(*listing.hidden(), 15);
        assert!(listing.text().ends_with("\n+15 more"));
    }

    #[test]
    fn short_listing_has_no_suffix() {
        let lines = vec!["a".to_string(), "b".to_string()];
        let listing = Listing::new(&lines, LISTING_LIMIT);
        assert_eq!(listing.into_text(), "a\nb");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let (text, cut) = truncate_chars("ééééé", 3);
        assert!(cut);
        assert_eq!(text, "ééé…");
        assert_eq!(truncate_chars("short", 10), ("short".to_string(), false));
    }

    #[test]
    fn render_defaults_to_brand_color() {
        let message = render(&MessageSpec::new("Hi").field("a", "b", true));
        assert_eq!(message.color, BRAND_COLOR);
        assert_eq!(message.description, "");
        assert_eq!(message.fields.len(), 1);
        assert!(message.thumbnail.is_none());
    }
}
