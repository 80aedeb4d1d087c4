//! The slash-command catalog.

use cadenza_core::{CommandSpec, ParameterSpec, TrackSource};
use cadenza_error::CadenzaResult;
use cadenza_interface::{CommandRegistrar, RegistrationScope};
use strum::IntoEnumIterator;
use tracing::{info, instrument};

/// Every command the bot answers to.
///
/// # Examples
///
/// ```
/// use cadenza_social::Command;
/// use std::str::FromStr;
///
/// assert_eq!(Command::from_str("nowplaying").unwrap(), Command::NowPlaying);
/// assert_eq!(Command::Move.name(), "move");
/// assert!(Command::from_str("dance").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::IntoStaticStr,
    strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Command {
    /// Queue a track, joining voice if needed
    Play,
    /// Pause playback
    Pause,
    /// Resume playback
    Resume,
    /// Skip the current track
    Skip,
    /// Stop playback and clear the queue
    Stop,
    /// Set the volume
    Volume,
    /// Show the queue
    Queue,
    /// Show the current track and its progress
    NowPlaying,
    /// Set the repeat mode
    Loop,
    /// Shuffle upcoming tracks
    Shuffle,
    /// Search without queueing
    Search,
    /// Remove a queued track
    Remove,
    /// Show lyrics
    Lyrics,
    /// Join the invoker's voice channel
    Join,
    /// Leave voice
    Leave,
    /// Queue tracks related to the current one
    Related,
    /// Reorder a queued track
    Move,
}

fn source_parameter() -> ParameterSpec {
    [TrackSource::Spotify, TrackSource::SoundCloud]
        .into_iter()
        .fold(
            ParameterSpec::string("source", "Where to search (defaults to YouTube)"),
            |spec, source| {
                let value: &str = source.as_ref();
                spec.choice(source.label(), value)
            },
        )
}

impl Command {
    /// Name registered with the platform.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Whether the invoker must share a usable voice channel with the bot.
    pub fn requires_voice(self) -> bool {
        matches!(
            self,
            Self::Play
                | Self::Pause
                | Self::Resume
                | Self::Skip
                | Self::Stop
                | Self::Volume
                | Self::Shuffle
                | Self::Join
        )
    }

    /// Whether the handler does network work and acknowledges with a deferral.
    pub fn defers(self) -> bool {
        matches!(
            self,
            Self::Play | Self::Search | Self::Lyrics | Self::Related
        )
    }

    /// Schema registered with the platform.
    pub fn spec(self) -> CommandSpec {
        let spec = CommandSpec::new(self.name(), self.description());
        match self {
            Self::Play => spec
                .parameter(
                    ParameterSpec::string("query", "Song name or URL").required(),
                )
                .parameter(source_parameter()),
            Self::Volume => spec.parameter(
                ParameterSpec::integer("level", "Volume from 0 to 100")
                    .required()
                    .min(0)
                    .max(100),
            ),
            Self::Loop => spec.parameter(
                ParameterSpec::integer("mode", "Repeat mode")
                    .required()
                    .choice("Off", 0_i64)
                    .choice("Current track", 1_i64)
                    .choice("Full queue", 2_i64),
            ),
            Self::Search => spec
                .parameter(ParameterSpec::string("query", "What to look for").required())
                .parameter(source_parameter()),
            Self::Remove => spec.parameter(
                ParameterSpec::integer("position", "Queue position to remove")
                    .required()
                    .min(1),
            ),
            Self::Lyrics => spec.parameter(ParameterSpec::string(
                "query",
                "Song to look up (defaults to the current track)",
            )),
            Self::Related => spec.parameter(
                ParameterSpec::integer("count", "How many tracks to add (default 3)")
                    .min(1)
                    .max(5),
            ),
            Self::Move => spec
                .parameter(
                    ParameterSpec::integer("from", "Current queue position")
                        .required()
                        .min(1),
                )
                .parameter(
                    ParameterSpec::integer("to", "New queue position")
                        .required()
                        .min(1),
                ),
            Self::Pause
            | Self::Resume
            | Self::Skip
            | Self::Stop
            | Self::Queue
            | Self::NowPlaying
            | Self::Shuffle
            | Self::Join
            | Self::Leave => spec,
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Play => "Play a song or add it to the queue",
            Self::Pause => "Pause the current track",
            Self::Resume => "Resume the paused track",
            Self::Skip => "Skip the current track",
            Self::Stop => "Stop playback and clear the queue",
            Self::Volume => "Set the playback volume",
            Self::Queue => "Show the queue",
            Self::NowPlaying => "Show the current track",
            Self::Loop => "Set the repeat mode",
            Self::Shuffle => "Shuffle the queue",
            Self::Search => "Search for songs without queueing them",
            Self::Remove => "Remove a song from the queue",
            Self::Lyrics => "Show lyrics for a song",
            Self::Join => "Join your voice channel",
            Self::Leave => "Leave the voice channel",
            Self::Related => "Add songs related to the current track",
            Self::Move => "Move a song to another queue position",
        }
    }
}

/// The full, static command list.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct CommandCatalog {
    specs: Vec<CommandSpec>,
}

impl Default for CommandCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandCatalog {
    /// Catalog with one spec per [`Command`].
    pub fn new() -> Self {
        Self {
            specs: Command::iter().map(Command::spec).collect(),
        }
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Submit every spec to the platform.
    ///
    /// # Errors
    ///
    /// Propagates the registrar's [`RegistrationError`](cadenza_error::RegistrationError);
    /// the caller logs it and carries on.
    #[instrument(skip(self, registrar), fields(commands = self.specs.len()))]
    pub async fn register(
        &self,
        registrar: &dyn CommandRegistrar,
        scope: RegistrationScope,
    ) -> CadenzaResult<usize> {
        let accepted = registrar.register(&self.specs, scope).await?;
        info!(accepted, ?scope, "Registered slash commands");
        Ok(accepted)
    }
}
