//! Queue inspection and editing commands.

use super::transport::nothing_playing;
use super::{CommandHandlers, bounded, queue_index};
use crate::InteractionContext;
use crate::render::{LISTING_LIMIT, Listing, MessageSpec, progress_card, render, track_line};
use cadenza_core::{LoopMode, format_duration};
use cadenza_error::{ArgumentError, CadenzaResult};

impl CommandHandlers {
    pub(super) async fn queue(&self, ctx: &mut InteractionContext) -> CadenzaResult<()> {
        let guild = ctx.guild_id()?;
        let snapshot = self.playback.queue_snapshot(guild).await?;
        if snapshot.is_empty() {
            let message = MessageSpec::notice("Queue", "The queue is empty");
            return ctx.respond(&render(&message)).await;
        }

        let lines: Vec<String> = snapshot
            .upcoming
            .iter()
            .enumerate()
            .map(|(index, track)| track_line(index + 1, track))
            .collect();
        let body = if lines.is_empty() {
            "Nothing else queued".to_string()
        } else {
            Listing::new(&lines, LISTING_LIMIT).into_text()
        };

        let mut message = MessageSpec::new("Queue").description(body);
        if let Some(current) = &snapshot.current {
            message = message.field("Now playing", current.headline(), false);
        }
        let message = message.footer(format!(
            "{} upcoming · {} · Loop: {}",
            snapshot.upcoming.len(),
            format_duration(snapshot.upcoming_length_ms()),
            snapshot.loop_mode.label()
        ));
        ctx.respond(&render(&message)).await
    }

    pub(super) async fn now_playing(&self, ctx: &mut InteractionContext) -> CadenzaResult<()> {
        let guild = ctx.guild_id()?;
        let message = match self.playback.now_playing(guild).await? {
            Some(now) => progress_card(&now),
            None => nothing_playing(),
        };
        ctx.respond(&render(&message)).await
    }

    pub(super) async fn set_loop(&self, ctx: &mut InteractionContext, mode: i64) -> CadenzaResult<()> {
        let guild = ctx.guild_id()?;
        let mode = LoopMode::from_index(mode)
            .ok_or_else(|| ArgumentError::invalid("mode", "must be 0, 1 or 2"))?;
        self.playback.set_loop_mode(guild, mode).await?;
        let message =
            MessageSpec::new("Loop").description(format!("Loop mode: **{}**", mode.label()));
        ctx.respond(&render(&message)).await
    }

    pub(super) async fn shuffle(&self, ctx: &mut InteractionContext) -> CadenzaResult<()> {
        let guild = ctx.guild_id()?;
        let shuffled = self.playback.shuffle(guild).await?;
        let message = if shuffled < 2 {
            MessageSpec::notice("Shuffle", "Not enough tracks in the queue to shuffle")
        } else {
            MessageSpec::new("Shuffled").description(format!("Shuffled {} tracks", shuffled))
        };
        ctx.respond(&render(&message)).await
    }

    pub(super) async fn remove(&self, ctx: &mut InteractionContext, position: i64) -> CadenzaResult<()> {
        let guild = ctx.guild_id()?;
        let index = queue_index("position", position)?;
        let removal = self.playback.remove_at(guild, index).await?;
        let message = MessageSpec::new("Removed")
            .description(removal.track.headline())
            .footer(format!("{} tracks left in the queue", removal.remaining));
        ctx.respond(&render(&message)).await
    }

    pub(super) async fn related(&self, ctx: &mut InteractionContext, count: i64) -> CadenzaResult<()> {
        let guild = ctx.guild_id()?;
        let count = bounded("count", count, 1, 5)?;
        let count = usize::try_from(count).unwrap_or(1);
        ctx.defer(false).await?;

        let added = self.playback.add_related(guild, count).await?;
        let message = if added.is_empty() {
            MessageSpec::notice("Related", "No related tracks found")
        } else {
            let lines: Vec<String> = added
                .iter()
                .enumerate()
                .map(|(index, track)| track_line(index + 1, track))
                .collect();
            MessageSpec::new(format!("Added {} related tracks", added.len()))
                .description(Listing::new(&lines, LISTING_LIMIT).into_text())
        };
        ctx.respond(&render(&message)).await
    }

    pub(super) async fn move_track(
        &self,
        ctx: &mut InteractionContext,
        from: i64,
        to: i64,
    ) -> CadenzaResult<()> {
        let guild = ctx.guild_id()?;
        let from_index = queue_index("from", from)?;
        let to_index = queue_index("to", to)?;
        let track = self.playback.move_track(guild, from_index, to_index).await?;
        let message = MessageSpec::new("Moved")
            .description(format!("**{}** moved to position {}", track.headline(), to));
        ctx.respond(&render(&message)).await
    }
}
