//! Per-command handlers.
//!
//! Each handler checks the voice guard where its command requires one, reads
//! its typed parameters, performs one collaborator operation and answers with a
//! rendered message. Degenerate outcomes are answered in the notice color;
//! failures are returned to the dispatcher.

mod discovery;
mod queue;
mod transport;

use crate::{CommandInvocation, InteractionContext, guard};
use cadenza_error::{ArgumentError, CadenzaResult};
use cadenza_interface::PlaybackService;
use std::sync::Arc;
use tracing::instrument;

/// Runs command invocations against the playback collaborator.
#[derive(Clone)]
pub struct CommandHandlers {
    playback: Arc<dyn PlaybackService>,
}

impl std::fmt::Debug for CommandHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandHandlers").finish_non_exhaustive()
    }
}

impl CommandHandlers {
    /// Handlers backed by `playback`.
    pub fn new(playback: Arc<dyn PlaybackService>) -> Self {
        Self { playback }
    }

    /// Run one invocation to completion.
    ///
    /// # Errors
    ///
    /// Argument, precondition and playback failures; the caller renders them.
    #[instrument(skip(self, ctx, invocation), fields(command = %invocation.command(), user = %ctx.user()))]
    pub async fn handle(
        &self,
        ctx: &mut InteractionContext,
        invocation: CommandInvocation,
    ) -> CadenzaResult<()> {
        if invocation.command().requires_voice() && !guard::check(ctx).await {
            return Ok(());
        }

        match invocation {
            CommandInvocation::Play { query, source } => self.play(ctx, query, source).await,
            CommandInvocation::Pause => self.pause(ctx).await,
            CommandInvocation::Resume => self.resume(ctx).await,
            CommandInvocation::Skip => self.skip(ctx).await,
            CommandInvocation::Stop => self.stop(ctx).await,
            CommandInvocation::Volume { level } => self.volume(ctx, level).await,
            CommandInvocation::Queue => self.queue(ctx).await,
            CommandInvocation::NowPlaying => self.now_playing(ctx).await,
            CommandInvocation::Loop { mode } => self.set_loop(ctx, mode).await,
            CommandInvocation::Shuffle => self.shuffle(ctx).await,
            CommandInvocation::Search { query, source } => self.search(ctx, query, source).await,
            CommandInvocation::Remove { position } => self.remove(ctx, position).await,
            CommandInvocation::Lyrics { query } => self.lyrics(ctx, query).await,
            CommandInvocation::Join => self.join(ctx).await,
            CommandInvocation::Leave => self.leave(ctx).await,
            CommandInvocation::Related { count } => self.related(ctx, count).await,
            CommandInvocation::Move { from, to } => self.move_track(ctx, from, to).await,
        }
    }
}

/// Convert a 1-based user position to a 0-based index.
#[track_caller]
fn queue_index(name: &str, position: i64) -> CadenzaResult<usize> {
    if position < 1 {
        return Err(ArgumentError::invalid(name, "positions start at 1").into());
    }
    usize::try_from(position - 1)
        .map_err(|_| ArgumentError::invalid(name, "position is too large").into())
}

/// Check `value` lies in `min..=max`.
#[track_caller]
fn bounded(name: &str, value: i64, min: i64, max: i64) -> CadenzaResult<i64> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ArgumentError::invalid(name, format!("must be between {} and {}", min, max)).into())
    }
}
