//! Search and lyrics.

use super::CommandHandlers;
use crate::InteractionContext;
use crate::render::{LISTING_LIMIT, Listing, MessageSpec, lyrics_body, render, track_line};
use cadenza_core::TrackSource;
use cadenza_error::CadenzaResult;
use tracing::debug;

/// Maximum results shown by `search`.
const SEARCH_LIMIT: usize = 10;

impl CommandHandlers {
    pub(super) async fn search(
        &self,
        ctx: &mut InteractionContext,
        query: String,
        source: Option<TrackSource>,
    ) -> CadenzaResult<()> {
        ctx.defer(false).await?;
        let results = self.playback.search(&query, source, SEARCH_LIMIT).await?;
        if results.is_empty() {
            let message = MessageSpec::notice("No results", format!("Nothing found for **{}**", query));
            return ctx.respond(&render(&message)).await;
        }

        let lines: Vec<String> = results
            .iter()
            .enumerate()
            .map(|(index, track)| format!("{} · {}", track_line(index + 1, track), track.source().label()))
            .collect();
        let message = MessageSpec::new(format!("Results for \"{}\"", query))
            .description(Listing::new(&lines, LISTING_LIMIT).into_text())
            .footer("Use /play to queue one of these");
        ctx.respond(&render(&message)).await
    }

    pub(super) async fn lyrics(
        &self,
        ctx: &mut InteractionContext,
        query: Option<String>,
    ) -> CadenzaResult<()> {
        ctx.defer(false).await?;
        let query = match query {
            Some(query) => query,
            None => {
                let guild = ctx.guild_id()?;
                match self.playback.now_playing(guild).await? {
                    Some(now) => format!("{} {}", now.track().title(), now.track().artist()),
                    None => {
                        let message = MessageSpec::notice(
                            "Lyrics",
                            "Nothing is playing; give a song to look up",
                        );
                        return ctx.respond(&render(&message)).await;
                    }
                }
            }
        };

        let Some(lyrics) = self.playback.fetch_lyrics(&query).await? else {
            let message =
                MessageSpec::notice("No lyrics", format!("No lyrics found for **{}**", query));
            return ctx.respond(&render(&message)).await;
        };

        let (text, truncated) = lyrics_body(lyrics.text(), lyrics.url().as_deref());
        debug!(truncated, "Lyrics found");
        let message = MessageSpec::new(format!("{} - {}", lyrics.title(), lyrics.artist()))
            .description(text);
        ctx.respond(&render(&message)).await
    }
}
