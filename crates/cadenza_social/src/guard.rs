//! Voice-channel precondition guard.

use crate::{InteractionContext, error_message};
use cadenza_error::{PreconditionError, PreconditionErrorKind};
use tracing::{debug, warn};

/// Why `ctx` may not drive a voice session, if it may not.
pub fn evaluate(ctx: &InteractionContext) -> Option<PreconditionErrorKind> {
    match ctx.voice() {
        None => Some(PreconditionErrorKind::NotInVoiceChannel),
        Some(voice) if !(voice.bot_can_connect && voice.bot_can_speak) => {
            Some(PreconditionErrorKind::MissingVoicePermissions)
        }
        Some(_) => None,
    }
}

/// Check the voice precondition.
///
/// On failure sends one ephemeral error reply and returns false. Returns true
/// with no side effect otherwise.
pub async fn check(ctx: &mut InteractionContext) -> bool {
    let Some(kind) = evaluate(ctx) else {
        return true;
    };
    let error = PreconditionError::new(kind);
    debug!(command = ctx.command(), %error, "Voice precondition failed");
    if let Err(e) = ctx.reply(&error_message(kind.to_string()), true).await {
        warn!(command = ctx.command(), error = %e, "Failed to send precondition reply");
    }
    false
}
