//! Dispatch, readiness and the single-acknowledgment rule.

mod common;

use cadenza_core::{ReplyState, UserId};
use cadenza_interface::PlaybackService;
use cadenza_social::{
    Command, DispatchOutcome, ERROR_COLOR, InteractionContext, NOTICE_COLOR, VoiceState, readiness,
};
use common::*;
use strum::IntoEnumIterator;

#[tokio::test]
async fn every_command_is_refused_until_ready() {
    let (_gate, watch) = readiness();
    let dispatcher = dispatcher_with(playback(), watch);

    for command in Command::iter() {
        let responder = RecordingResponder::new();
        let mut ctx = context(command.name(), responder.clone()).with_option("query", "naima");

        let outcome = dispatcher.dispatch(&mut ctx).await;

        assert_eq!(outcome, DispatchOutcome::NotReady, "{command}");
        let sent = responder.sent();
        assert_eq!(sent.len(), 1, "{command} sent {sent:?}");
        match &sent[0] {
            Sent::Reply { message, ephemeral } => {
                assert!(*ephemeral);
                assert_eq!(message.title, "Not ready");
                assert_eq!(message.color, NOTICE_COLOR);
            }
            other => panic!("expected ephemeral reply, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn commands_flow_once_the_gate_opens() {
    let (gate, watch) = readiness();
    let dispatcher = dispatcher_with(playback(), watch);

    let responder = RecordingResponder::new();
    let mut ctx = context("queue", responder.clone());
    assert_eq!(dispatcher.dispatch(&mut ctx).await, DispatchOutcome::NotReady);

    gate.mark_ready();

    let responder = RecordingResponder::new();
    let mut ctx = context("queue", responder.clone());
    assert_eq!(dispatcher.dispatch(&mut ctx).await, DispatchOutcome::Completed);
    assert_eq!(responder.last_message().title, "Queue");
}

#[tokio::test]
async fn unknown_command_is_ignored() {
    let dispatcher = ready_dispatcher(playback());
    let responder = RecordingResponder::new();
    let mut ctx = context("dance", responder.clone());

    assert_eq!(dispatcher.dispatch(&mut ctx).await, DispatchOutcome::Unknown);
    assert!(responder.sent().is_empty());
    assert_eq!(ctx.reply_state(), ReplyState::Unacknowledged);
}

#[tokio::test]
async fn deferred_command_is_answered_by_edit() {
    let dispatcher = ready_dispatcher(playback());
    let responder = RecordingResponder::new();
    let mut ctx = context("play", responder.clone()).with_option("query", "naima");

    assert_eq!(dispatcher.dispatch(&mut ctx).await, DispatchOutcome::Completed);

    let sent = responder.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], Sent::Defer { ephemeral: false });
    assert!(matches!(&sent[1], Sent::Edit { message } if message.title == "Now playing"));
    assert_eq!(responder.acknowledgments(), 1);
    assert_eq!(ctx.reply_state(), ReplyState::Replied);
}

#[tokio::test]
async fn failure_after_defer_edits_the_placeholder() {
    let playback = playback();
    playback.connect(GUILD, VOICE, TEXT).await.unwrap();
    let dispatcher = ready_dispatcher(playback);
    let responder = RecordingResponder::new();
    let mut ctx = context("related", responder.clone()).with_option("count", 2_i64);

    assert_eq!(dispatcher.dispatch(&mut ctx).await, DispatchOutcome::Failed);

    let sent = responder.sent();
    assert_eq!(sent.len(), 2, "{sent:?}");
    assert_eq!(sent[0], Sent::Defer { ephemeral: false });
    match &sent[1] {
        Sent::Edit { message } => {
            assert_eq!(message.color, ERROR_COLOR);
            assert_eq!(message.description, "Nothing is playing right now");
        }
        other => panic!("expected edit, got {other:?}"),
    }
    assert_eq!(responder.acknowledgments(), 1);
}

#[tokio::test]
async fn failure_before_acknowledgment_replies_ephemerally() {
    let dispatcher = ready_dispatcher(playback());
    let responder = RecordingResponder::new();
    let mut ctx = context("volume", responder.clone()).with_option("level", 150_i64);

    assert_eq!(dispatcher.dispatch(&mut ctx).await, DispatchOutcome::Failed);

    let sent = responder.sent();
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        Sent::Reply { message, ephemeral } => {
            assert!(*ephemeral);
            assert_eq!(message.color, ERROR_COLOR);
            assert_eq!(
                message.description,
                "Invalid value for 'level': must be between 0 and 100"
            );
        }
        other => panic!("expected reply, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_required_option_is_reported() {
    let dispatcher = ready_dispatcher(playback());
    let responder = RecordingResponder::new();
    let mut ctx = context("play", responder.clone());

    assert_eq!(dispatcher.dispatch(&mut ctx).await, DispatchOutcome::Failed);
    assert_eq!(
        responder.last_message().description,
        "Missing required option 'query'"
    );
    assert_eq!(responder.acknowledgments(), 1);
}

#[tokio::test]
async fn commands_outside_a_guild_are_refused() {
    let dispatcher = ready_dispatcher(playback());
    let responder = RecordingResponder::new();
    let mut ctx = InteractionContext::new("queue", MEMBER, TEXT, responder.clone());

    assert_eq!(dispatcher.dispatch(&mut ctx).await, DispatchOutcome::Failed);
    assert_eq!(
        responder.last_message().description,
        "This command can only be used inside a server"
    );
}

#[tokio::test]
async fn handler_panic_is_contained_and_reported() {
    let dispatcher = ready_dispatcher(playback());
    let responder = RecordingResponder::panicking();
    let mut ctx = context("play", responder.clone()).with_option("query", "naima");

    assert_eq!(dispatcher.dispatch(&mut ctx).await, DispatchOutcome::Failed);

    let sent = responder.sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(
        &sent[0],
        Sent::Reply { message, ephemeral: true }
            if message.description == "Something went wrong while running this command"
    ));

    // The dispatcher keeps serving after a panic.
    let responder = RecordingResponder::new();
    let mut ctx = context("queue", responder.clone());
    assert_eq!(dispatcher.dispatch(&mut ctx).await, DispatchOutcome::Completed);
}

#[tokio::test]
async fn failed_delivery_leaves_interaction_unacknowledged() {
    let dispatcher = ready_dispatcher(playback());
    let responder = RecordingResponder::failing();
    let mut ctx = context("pause", responder.clone());

    assert_eq!(dispatcher.dispatch(&mut ctx).await, DispatchOutcome::Failed);
    assert!(responder.sent().is_empty());
    assert_eq!(ctx.reply_state(), ReplyState::Unacknowledged);
}

#[tokio::test]
async fn guard_failure_is_the_only_reply() {
    let dispatcher = ready_dispatcher(playback());
    let responder = RecordingResponder::new();
    let mut ctx = InteractionContext::new("skip", UserId(7), TEXT, responder.clone())
        .with_guild(GUILD)
        .with_voice(VoiceState {
            channel: VOICE,
            bot_can_connect: true,
            bot_can_speak: false,
        });

    assert_eq!(dispatcher.dispatch(&mut ctx).await, DispatchOutcome::Completed);
    let sent = responder.sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(
        &sent[0],
        Sent::Reply { message, ephemeral: true }
            if message.description == "I need permission to connect and speak in your voice channel"
    ));
}

#[tokio::test]
async fn deferral_matches_catalog() {
    let playback = playback();
    queue_titles(&playback, &["so what", "naima"]).await;
    let dispatcher = ready_dispatcher(playback);

    for command in Command::iter().filter(|c| !matches!(c, Command::Stop | Command::Leave)) {
        let responder = RecordingResponder::new();
        let mut ctx = context(command.name(), responder.clone())
            .with_option("query", "miles")
            .with_option("level", 50_i64)
            .with_option("mode", 0_i64)
            .with_option("position", 1_i64)
            .with_option("count", 1_i64)
            .with_option("from", 1_i64)
            .with_option("to", 1_i64);

        dispatcher.dispatch(&mut ctx).await;

        let deferred = matches!(responder.sent().first(), Some(Sent::Defer { .. }));
        assert_eq!(deferred, command.defers(), "{command}");
        assert_eq!(responder.acknowledgments(), 1, "{command}");
    }
}
