//! Shared fixtures for the command-layer tests.
//!
//! Recording implementations of the gateway seams and an in-memory playback
//! collaborator seeded with a small library.

#![allow(dead_code)]

use async_trait::async_trait;
use cadenza_core::{ChannelId, CommandSpec, GuildId, RenderedMessage, UserId};
use cadenza_error::{CadenzaResult, DeliveryError, RegistrationError};
use cadenza_interface::{
    ChannelMessenger, CommandRegistrar, EnqueueRequest, InteractionResponder, PlaybackService,
    RegistrationScope,
};
use cadenza_playback::{InMemoryPlayback, TrackLibrary};
use cadenza_social::{
    CommandHandlers, Dispatcher, InteractionContext, ReadinessWatch, VoiceState, readiness,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const GUILD: GuildId = GuildId(100);
pub const TEXT: ChannelId = ChannelId(200);
pub const VOICE: ChannelId = ChannelId(300);
pub const MEMBER: UserId = UserId(400);
pub const BOT: UserId = UserId(500);

pub const LIBRARY: &str = r#"
[[tracks]]
title = "Blue in Green"
artist = "Miles Davis"
length_ms = 337000
tags = ["jazz"]
lyrics = "instrumental"
lyrics_url = "https://lyrics.example/blue-in-green"

[[tracks]]
title = "So What"
artist = "Miles Davis"
length_ms = 562000
tags = ["jazz"]

[[tracks]]
title = "Naima"
artist = "John Coltrane"
length_ms = 261000
tags = ["jazz"]

[[tracks]]
title = "Take Five"
artist = "Dave Brubeck"
length_ms = 324000
tags = ["jazz"]

[[tracks]]
title = "Clair de Lune"
artist = "Claude Debussy"
length_ms = 300000
"#;

/// One call made on a [`RecordingResponder`].
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Reply {
        message: RenderedMessage,
        ephemeral: bool,
    },
    Defer {
        ephemeral: bool,
    },
    Edit {
        message: RenderedMessage,
    },
}

impl Sent {
    /// The message carried by a reply or edit.
    pub fn message(&self) -> Option<&RenderedMessage> {
        match self {
            Sent::Reply { message, .. } | Sent::Edit { message } => Some(message),
            Sent::Defer { .. } => None,
        }
    }
}

/// Responder that records every call and optionally fails or panics.
#[derive(Debug, Default)]
pub struct RecordingResponder {
    sent: Mutex<Vec<Sent>>,
    fail_replies: bool,
    panic_on_defer: bool,
}

impl RecordingResponder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A responder whose replies and edits fail to deliver.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail_replies: true,
            ..Self::default()
        })
    }

    /// A responder that panics when asked to defer.
    pub fn panicking() -> Arc<Self> {
        Arc::new(Self {
            panic_on_defer: true,
            ..Self::default()
        })
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Replies and deferrals, the calls that acknowledge an interaction.
    pub fn acknowledgments(&self) -> usize {
        self.sent()
            .iter()
            .filter(|sent| !matches!(sent, Sent::Edit { .. }))
            .count()
    }

    /// The last message shown to the invoker.
    pub fn last_message(&self) -> RenderedMessage {
        self.sent()
            .iter()
            .rev()
            .find_map(|sent| sent.message().cloned())
            .expect("no message was sent")
    }
}

#[async_trait]
impl InteractionResponder for RecordingResponder {
    async fn reply(&self, message: &RenderedMessage, ephemeral: bool) -> CadenzaResult<()> {
        if self.fail_replies {
            return Err(DeliveryError::send("interaction token expired").into());
        }
        self.sent.lock().unwrap().push(Sent::Reply {
            message: message.clone(),
            ephemeral,
        });
        Ok(())
    }

    async fn defer(&self, ephemeral: bool) -> CadenzaResult<()> {
        if self.panic_on_defer {
            panic!("responder exploded");
        }
        self.sent.lock().unwrap().push(Sent::Defer { ephemeral });
        Ok(())
    }

    async fn edit_reply(&self, message: &RenderedMessage) -> CadenzaResult<()> {
        if self.fail_replies {
            return Err(DeliveryError::send("interaction token expired").into());
        }
        self.sent.lock().unwrap().push(Sent::Edit {
            message: message.clone(),
        });
        Ok(())
    }
}

/// Messenger that records deliveries, or refuses them all.
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<(ChannelId, RenderedMessage)>>,
    fail: bool,
    panic_next: AtomicBool,
}

impl RecordingMessenger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    /// Panics on the first send, then records normally.
    pub fn panicking_once() -> Arc<Self> {
        Arc::new(Self {
            panic_next: AtomicBool::new(true),
            ..Self::default()
        })
    }

    pub fn sent(&self) -> Vec<(ChannelId, RenderedMessage)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelMessenger for RecordingMessenger {
    async fn send(&self, channel: ChannelId, message: &RenderedMessage) -> CadenzaResult<()> {
        if self.panic_next.swap(false, Ordering::SeqCst) {
            panic!("gateway client dropped mid-send");
        }
        if self.fail {
            return Err(DeliveryError::send("missing access").into());
        }
        self.sent.lock().unwrap().push((channel, message.clone()));
        Ok(())
    }
}

/// Registrar that plays back scripted results, accepting everything once the
/// script runs out.
#[derive(Debug, Default)]
pub struct ScriptedRegistrar {
    failures: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<(usize, RegistrationScope)>>,
}

impl ScriptedRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next call with `message`.
    pub fn then_fail(self, message: &str) -> Self {
        self.failures.lock().unwrap().push_back(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(usize, RegistrationScope)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRegistrar for ScriptedRegistrar {
    async fn register(
        &self,
        commands: &[CommandSpec],
        scope: RegistrationScope,
    ) -> CadenzaResult<usize> {
        self.calls.lock().unwrap().push((commands.len(), scope));
        match self.failures.lock().unwrap().pop_front() {
            Some(message) => Err(RegistrationError::new(message).into()),
            None => Ok(commands.len()),
        }
    }
}

pub fn playback() -> Arc<InMemoryPlayback> {
    Arc::new(InMemoryPlayback::new(
        TrackLibrary::from_toml_str(LIBRARY).unwrap(),
    ))
}

/// A dispatcher whose gate is already open.
pub fn ready_dispatcher(playback: Arc<InMemoryPlayback>) -> Dispatcher {
    let (gate, watch) = readiness();
    gate.mark_ready();
    dispatcher_with(playback, watch)
}

pub fn dispatcher_with(playback: Arc<InMemoryPlayback>, watch: ReadinessWatch) -> Dispatcher {
    Dispatcher::new(CommandHandlers::new(playback), watch)
}

/// A guild command from a member sitting in [`VOICE`] with full permissions.
pub fn context(command: &str, responder: Arc<RecordingResponder>) -> InteractionContext {
    InteractionContext::new(command, MEMBER, TEXT, responder)
        .with_guild(GUILD)
        .with_voice(VoiceState::permitted(VOICE))
}

/// Queue `titles` in order; the first starts playing.
pub async fn queue_titles(playback: &InMemoryPlayback, titles: &[&str]) {
    for title in titles {
        playback
            .enqueue(EnqueueRequest {
                guild: GUILD,
                voice_channel: VOICE,
                text_channel: TEXT,
                requester: MEMBER,
                query: title.to_string(),
                source: None,
            })
            .await
            .unwrap()
            .unwrap();
    }
}
