//! Behaviour of the in-memory playback collaborator.

use cadenza_core::{ChannelId, GuildId, LoopMode, UserId};
use cadenza_error::{CadenzaErrorKind, PlaybackErrorKind};
use cadenza_interface::{EnqueueRequest, PlaybackEvent, PlaybackService, TransportOutcome};
use cadenza_playback::{InMemoryPlayback, TrackLibrary};
use std::io::Write;

const GUILD: GuildId = GuildId(10);
const VOICE: ChannelId = ChannelId(20);
const TEXT: ChannelId = ChannelId(30);
const MEMBER: UserId = UserId(40);

const LIBRARY: &str = r#"
[[tracks]]
title = "One"
artist = "Alpha"
length_ms = 60000
tags = ["jazz"]
lyrics = "first line"

[[tracks]]
title = "Two"
artist = "Alpha"
length_ms = 60000
tags = ["jazz"]

[[tracks]]
title = "Three"
artist = "Beta"
length_ms = 60000
tags = ["jazz"]

[[tracks]]
title = "Four"
artist = "Gamma"
length_ms = 60000

[[tracks]]
title = "Five"
artist = "Delta"
length_ms = 60000

[[tracks]]
title = "Instant"
artist = "Zero"
length_ms = 0
"#;

fn playback() -> InMemoryPlayback {
    InMemoryPlayback::new(TrackLibrary::from_toml_str(LIBRARY).unwrap())
}

fn request(query: &str) -> EnqueueRequest {
    EnqueueRequest {
        guild: GUILD,
        voice_channel: VOICE,
        text_channel: TEXT,
        requester: MEMBER,
        query: query.to_string(),
        source: None,
    }
}

async fn queue_all(playback: &InMemoryPlayback, titles: &[&str]) {
    for title in titles {
        playback.enqueue(request(title)).await.unwrap().unwrap();
    }
}

fn upcoming_titles(snapshot: &cadenza_core::QueueSnapshot) -> Vec<String> {
    snapshot.upcoming.iter().map(|t| t.title().clone()).collect()
}

fn playback_kind(err: &cadenza_error::CadenzaError) -> PlaybackErrorKind {
    match err.kind() {
        CadenzaErrorKind::Playback(e) => e.kind().clone(),
        other => panic!("expected playback error, got {other}"),
    }
}

#[tokio::test]
async fn first_enqueue_starts_playback() {
    let playback = playback();
    let mut events = playback.subscribe();

    let enqueued = playback.enqueue(request("one")).await.unwrap().unwrap();
    assert!(enqueued.started);
    assert_eq!(enqueued.position, 0);
    assert_eq!(*enqueued.track.requester(), Some(MEMBER));
    assert_eq!(*enqueued.track.text_channel(), Some(TEXT));

    match events.recv().await.unwrap() {
        PlaybackEvent::TrackAdd { queue_len, .. } => assert_eq!(queue_len, 1),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(matches!(
        events.recv().await.unwrap(),
        PlaybackEvent::TrackStart { .. }
    ));
}

#[tokio::test]
async fn later_enqueues_report_queue_position() {
    let playback = playback();
    queue_all(&playback, &["one", "two"]).await;
    let mut events = playback.subscribe();

    let enqueued = playback.enqueue(request("three")).await.unwrap().unwrap();
    assert!(!enqueued.started);
    assert_eq!(enqueued.position, 2);

    match events.try_recv().unwrap() {
        PlaybackEvent::TrackAdd { queue_len, track, .. } => {
            assert_eq!(queue_len, 3);
            assert_eq!(track.title(), "Three");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn unmatched_query_queues_nothing() {
    let playback = playback();
    assert!(playback.enqueue(request("nonexistent")).await.unwrap().is_none());
    assert_eq!(playback.session_count().await, 0);
}

#[tokio::test]
async fn move_third_to_first() {
    let playback = playback();
    queue_all(&playback, &["instant", "one", "two", "three", "four", "five"]).await;

    let moved = playback.move_track(GUILD, 2, 0).await.unwrap();
    assert_eq!(moved.title(), "Three");

    let snapshot = playback.queue_snapshot(GUILD).await.unwrap();
    assert_eq!(
        upcoming_titles(&snapshot),
        vec!["Three", "One", "Two", "Four", "Five"]
    );
}

#[tokio::test]
async fn move_out_of_range_reports_one_based_position() {
    let playback = playback();
    queue_all(&playback, &["one", "two", "three"]).await;

    let err = playback.move_track(GUILD, 0, 5).await.unwrap_err();
    assert_eq!(
        playback_kind(&err),
        PlaybackErrorKind::PositionOutOfRange { position: 6, len: 2 }
    );
}

#[tokio::test]
async fn removing_only_upcoming_track_empties_queue() {
    let playback = playback();
    queue_all(&playback, &["one", "two"]).await;

    let removal = playback.remove_at(GUILD, 0).await.unwrap();
    assert_eq!(removal.track.title(), "Two");
    assert_eq!(removal.remaining, 0);

    let snapshot = playback.queue_snapshot(GUILD).await.unwrap();
    assert!(snapshot.upcoming.is_empty());
    assert!(snapshot.current.is_some());
}

#[tokio::test]
async fn remove_out_of_range_fails() {
    let playback = playback();
    queue_all(&playback, &["one"]).await;

    let err = playback.remove_at(GUILD, 0).await.unwrap_err();
    assert_eq!(
        playback_kind(&err),
        PlaybackErrorKind::PositionOutOfRange { position: 1, len: 0 }
    );
}

#[tokio::test]
async fn pause_and_resume_report_transitions() {
    let playback = playback();
    assert_eq!(playback.pause(GUILD).await.unwrap(), TransportOutcome::Idle);

    queue_all(&playback, &["one"]).await;
    assert_eq!(playback.resume(GUILD).await.unwrap(), TransportOutcome::Unchanged);
    assert_eq!(playback.pause(GUILD).await.unwrap(), TransportOutcome::Applied);
    assert_eq!(playback.pause(GUILD).await.unwrap(), TransportOutcome::Unchanged);
    assert!(*playback.now_playing(GUILD).await.unwrap().unwrap().paused());
    assert_eq!(playback.resume(GUILD).await.unwrap(), TransportOutcome::Applied);
}

#[tokio::test]
async fn skip_emits_end_then_start() {
    let playback = playback();
    queue_all(&playback, &["one", "two"]).await;
    let mut events = playback.subscribe();

    let skipped = playback.skip(GUILD).await.unwrap().unwrap();
    assert_eq!(skipped.title(), "One");

    assert!(matches!(events.try_recv(), Some(PlaybackEvent::TrackEnd { .. })));
    match events.try_recv() {
        Some(PlaybackEvent::TrackStart { track, .. }) => assert_eq!(track.title(), "Two"),
        other => panic!("unexpected event {other:?}"),
    }

    playback.skip(GUILD).await.unwrap();
    assert!(matches!(events.try_recv(), Some(PlaybackEvent::TrackEnd { .. })));
    assert!(matches!(events.try_recv(), Some(PlaybackEvent::QueueEnd { .. })));
    assert!(playback.skip(GUILD).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_play_and_skip_publish_in_state_order() {
    let playback = playback();
    let mut events = playback.subscribe();

    let mut tasks = Vec::new();
    for round in 0..20 {
        let enqueuer = playback.clone();
        tasks.push(tokio::spawn(async move {
            let title = ["one", "two", "three"][round % 3];
            enqueuer.enqueue(request(title)).await.unwrap();
        }));
        let skipper = playback.clone();
        tasks.push(tokio::spawn(async move {
            skipper.skip(GUILD).await.unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let mut current: Option<String> = None;
    while let Some(event) = events.try_recv() {
        match event {
            PlaybackEvent::TrackStart { track, .. } => {
                assert_eq!(current, None, "{} started over a live track", track.title());
                current = Some(track.title().clone());
            }
            PlaybackEvent::TrackEnd { track, .. } => {
                assert_eq!(current.as_ref(), Some(track.title()), "ended a track that never started");
                current = None;
            }
            PlaybackEvent::QueueEnd { .. } => assert_eq!(current, None),
            _ => {}
        }
    }
    let playing = playback.now_playing(GUILD).await.unwrap();
    assert_eq!(current, playing.map(|now| now.track().title().clone()));
}

#[tokio::test]
async fn stop_clears_queue_once() {
    let playback = playback();
    queue_all(&playback, &["one", "two"]).await;
    let mut events = playback.subscribe();

    assert_eq!(playback.stop(GUILD).await.unwrap(), TransportOutcome::Applied);
    assert!(matches!(events.try_recv(), Some(PlaybackEvent::QueueClear { .. })));
    assert!(playback.queue_snapshot(GUILD).await.unwrap().is_empty());
    assert_eq!(playback.stop(GUILD).await.unwrap(), TransportOutcome::Idle);
}

#[tokio::test]
async fn finished_track_loops_under_track_mode() {
    let playback = playback();
    queue_all(&playback, &["instant", "one"]).await;
    playback.set_loop_mode(GUILD, LoopMode::Track).await.unwrap();

    assert_eq!(playback.advance_finished().await, 1);
    let snapshot = playback.queue_snapshot(GUILD).await.unwrap();
    assert_eq!(snapshot.current.as_ref().unwrap().title(), "Instant");
    assert_eq!(upcoming_titles(&snapshot), vec!["One"]);
}

#[tokio::test]
async fn finished_track_advances_without_loop() {
    let playback = playback();
    queue_all(&playback, &["instant", "one"]).await;
    let mut events = playback.subscribe();

    assert_eq!(playback.advance_finished().await, 1);
    assert!(matches!(events.try_recv(), Some(PlaybackEvent::TrackEnd { .. })));
    assert!(matches!(events.try_recv(), Some(PlaybackEvent::TrackStart { .. })));

    assert_eq!(playback.advance_finished().await, 0);
}

#[tokio::test]
async fn settings_require_a_session() {
    let playback = playback();
    let err = playback.set_volume(GUILD, 50).await.unwrap_err();
    assert_eq!(playback_kind(&err), PlaybackErrorKind::NotConnected);

    playback.connect(GUILD, VOICE, TEXT).await.unwrap();
    playback.set_volume(GUILD, 50).await.unwrap();
    let err = playback.set_volume(GUILD, 150).await.unwrap_err();
    assert!(matches!(playback_kind(&err), PlaybackErrorKind::Rejected(_)));
}

#[tokio::test]
async fn shuffle_keeps_every_track() {
    let playback = playback();
    queue_all(&playback, &["one", "two", "three", "four", "five"]).await;

    assert_eq!(playback.shuffle(GUILD).await.unwrap(), 4);
    let mut titles = upcoming_titles(&playback.queue_snapshot(GUILD).await.unwrap());
    titles.sort();
    assert_eq!(titles, vec!["Five", "Four", "Three", "Two"]);
}

#[tokio::test]
async fn related_tracks_are_marked_auto_added() {
    let playback = playback();
    playback.initialize(UserId(99)).await.unwrap();
    queue_all(&playback, &["one"]).await;

    let added = playback.add_related(GUILD, 2).await.unwrap();
    assert_eq!(added.len(), 2);
    assert_eq!(added[0].title(), "Two");
    assert!(added.iter().all(|t| *t.auto_added()));
    assert!(added.iter().all(|t| *t.requester() == Some(UserId(99))));
}

#[tokio::test]
async fn related_needs_current_track() {
    let playback = playback();
    playback.connect(GUILD, VOICE, TEXT).await.unwrap();
    let err = playback.add_related(GUILD, 3).await.unwrap_err();
    assert_eq!(playback_kind(&err), PlaybackErrorKind::NothingPlaying);
}

#[tokio::test]
async fn disconnect_drops_session() {
    let playback = playback();
    queue_all(&playback, &["one"]).await;
    let mut events = playback.subscribe();

    assert!(playback.disconnect(GUILD).await.unwrap());
    assert!(matches!(events.try_recv(), Some(PlaybackEvent::Disconnect { .. })));
    assert!(!playback.disconnect(GUILD).await.unwrap());
}

#[tokio::test]
async fn failed_track_moves_on() {
    let playback = playback();
    queue_all(&playback, &["one", "two"]).await;
    let mut events = playback.subscribe();

    assert!(playback.fail_current(GUILD, "decoder gave up").await);
    match events.try_recv() {
        Some(PlaybackEvent::TrackError { reason, .. }) => assert_eq!(reason, "decoder gave up"),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(matches!(events.try_recv(), Some(PlaybackEvent::TrackStart { .. })));
}

#[test]
fn library_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(LIBRARY.as_bytes()).unwrap();
    let library = TrackLibrary::from_file(file.path()).unwrap();
    assert_eq!(library.len(), 6);
    assert_eq!(library.lyrics("one").unwrap().text(), "first line");
}
