//! Voice session and transport commands.

use super::{CommandHandlers, bounded};
use crate::InteractionContext;
use crate::render::{MessageSpec, now_playing_card, render};
use cadenza_core::TrackSource;
use cadenza_error::CadenzaResult;
use cadenza_interface::{EnqueueRequest, TransportOutcome};
use tracing::debug;

impl CommandHandlers {
    pub(super) async fn play(
        &self,
        ctx: &mut InteractionContext,
        query: String,
        source: Option<TrackSource>,
    ) -> CadenzaResult<()> {
        let guild = ctx.guild_id()?;
        let voice_channel = ctx.voice_channel()?;
        ctx.defer(false).await?;

        let request = EnqueueRequest {
            guild,
            voice_channel,
            text_channel: ctx.channel(),
            requester: ctx.user(),
            query: query.clone(),
            source,
        };
        let message = match self.playback.enqueue(request).await? {
            None => MessageSpec::notice("No results", format!("Nothing found for **{}**", query)),
            Some(enqueued) if enqueued.started => now_playing_card(&enqueued.track),
            Some(enqueued) => MessageSpec::new("Added to queue")
                .description(enqueued.track.headline())
                .field("Duration", enqueued.track.duration_label(), true)
                .field("Position", enqueued.position.to_string(), true)
                .thumbnail(enqueued.track.thumbnail().clone()),
        };
        ctx.respond(&render(&message)).await
    }

    pub(super) async fn pause(&self, ctx: &mut InteractionContext) -> CadenzaResult<()> {
        let guild = ctx.guild_id()?;
        let message = match self.playback.pause(guild).await? {
            TransportOutcome::Applied => MessageSpec::new("Paused").description("Playback paused"),
            TransportOutcome::Unchanged => {
                MessageSpec::notice("Already paused", "Playback is already paused")
            }
            TransportOutcome::Idle => nothing_playing(),
        };
        ctx.respond(&render(&message)).await
    }

    pub(super) async fn resume(&self, ctx: &mut InteractionContext) -> CadenzaResult<()> {
        let guild = ctx.guild_id()?;
        let message = match self.playback.resume(guild).await? {
            TransportOutcome::Applied => {
                MessageSpec::new("Resumed").description("Playback resumed")
            }
            TransportOutcome::Unchanged => {
                MessageSpec::notice("Already playing", "Playback is not paused")
            }
            TransportOutcome::Idle => nothing_playing(),
        };
        ctx.respond(&render(&message)).await
    }

    pub(super) async fn skip(&self, ctx: &mut InteractionContext) -> CadenzaResult<()> {
        let guild = ctx.guild_id()?;
        let message = match self.playback.skip(guild).await? {
            Some(track) => MessageSpec::new("Skipped").description(track.headline()),
            None => nothing_playing(),
        };
        ctx.respond(&render(&message)).await
    }

    pub(super) async fn stop(&self, ctx: &mut InteractionContext) -> CadenzaResult<()> {
        let guild = ctx.guild_id()?;
        let message = match self.playback.stop(guild).await? {
            TransportOutcome::Applied | TransportOutcome::Unchanged => {
                MessageSpec::new("Stopped").description("Playback stopped and the queue cleared")
            }
            TransportOutcome::Idle => nothing_playing(),
        };
        ctx.respond(&render(&message)).await
    }

    pub(super) async fn volume(&self, ctx: &mut InteractionContext, level: i64) -> CadenzaResult<()> {
        let guild = ctx.guild_id()?;
        let level = bounded("level", level, 0, 100)?;
        // Range checked above.
        let level = u8::try_from(level).unwrap_or(100);
        self.playback.set_volume(guild, level).await?;
        debug!(level, "Volume changed");
        let message = MessageSpec::new("Volume").description(format!("Volume set to **{}%**", level));
        ctx.respond(&render(&message)).await
    }

    pub(super) async fn join(&self, ctx: &mut InteractionContext) -> CadenzaResult<()> {
        let guild = ctx.guild_id()?;
        let voice_channel = ctx.voice_channel()?;
        self.playback
            .connect(guild, voice_channel, ctx.channel())
            .await?;
        let message = MessageSpec::new("Joined")
            .description(format!("Connected to {}", voice_channel.mention()));
        ctx.respond(&render(&message)).await
    }

    pub(super) async fn leave(&self, ctx: &mut InteractionContext) -> CadenzaResult<()> {
        let guild = ctx.guild_id()?;
        let message = if self.playback.disconnect(guild).await? {
            MessageSpec::new("Disconnected").description("Left the voice channel")
        } else {
            MessageSpec::notice("Not connected", "I'm not in a voice channel")
        };
        ctx.respond(&render(&message)).await
    }
}

pub(super) fn nothing_playing() -> MessageSpec {
    MessageSpec::notice("Nothing playing", "Nothing is playing right now")
}
