//! Voice-channel preconditions.

mod common;

use cadenza_error::PreconditionErrorKind;
use cadenza_social::{InteractionContext, VoiceState, guard};
use cadenza_core::ReplyState;
use common::*;

fn in_voice(connect: bool, speak: bool) -> VoiceState {
    VoiceState {
        channel: VOICE,
        bot_can_connect: connect,
        bot_can_speak: speak,
    }
}

#[test]
fn evaluate_checks_presence_then_permissions() {
    let responder = RecordingResponder::new();
    let base = || InteractionContext::new("play", MEMBER, TEXT, responder.clone()).with_guild(GUILD);

    assert_eq!(
        guard::evaluate(&base()),
        Some(PreconditionErrorKind::NotInVoiceChannel)
    );
    assert_eq!(
        guard::evaluate(&base().with_voice(in_voice(false, true))),
        Some(PreconditionErrorKind::MissingVoicePermissions)
    );
    assert_eq!(
        guard::evaluate(&base().with_voice(in_voice(true, false))),
        Some(PreconditionErrorKind::MissingVoicePermissions)
    );
    assert_eq!(guard::evaluate(&base().with_voice(in_voice(true, true))), None);
}

#[tokio::test]
async fn passing_check_has_no_side_effect() {
    let responder = RecordingResponder::new();
    let mut ctx = context("pause", responder.clone());

    assert!(guard::check(&mut ctx).await);
    assert!(responder.sent().is_empty());
    assert_eq!(ctx.reply_state(), ReplyState::Unacknowledged);
}

#[tokio::test]
async fn failing_check_replies_once_ephemerally() {
    let responder = RecordingResponder::new();
    let mut ctx = InteractionContext::new("pause", MEMBER, TEXT, responder.clone()).with_guild(GUILD);

    assert!(!guard::check(&mut ctx).await);
    assert_eq!(ctx.reply_state(), ReplyState::Replied);
    let sent = responder.sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(
        &sent[0],
        Sent::Reply { message, ephemeral: true }
            if message.description == "You need to be in a voice channel to use this command"
    ));
}
