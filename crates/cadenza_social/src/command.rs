//! Typed command invocations.

use crate::{Command, InteractionContext};
use cadenza_core::TrackSource;
use cadenza_error::{ArgumentError, CadenzaResult};
use std::str::FromStr;

/// Default number of tracks queued by `related`.
pub const DEFAULT_RELATED_COUNT: i64 = 3;

/// A command together with its parsed parameters.
///
/// Integer options are kept as received; handlers re-check their ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandInvocation {
    /// `play query [source]`
    Play {
        /// Search text or URL
        query: String,
        /// Provider override
        source: Option<TrackSource>,
    },
    /// `pause`
    Pause,
    /// `resume`
    Resume,
    /// `skip`
    Skip,
    /// `stop`
    Stop,
    /// `volume level`
    Volume {
        /// Requested level
        level: i64,
    },
    /// `queue`
    Queue,
    /// `nowplaying`
    NowPlaying,
    /// `loop mode`
    Loop {
        /// Loop mode index
        mode: i64,
    },
    /// `shuffle`
    Shuffle,
    /// `search query [source]`
    Search {
        /// Search text
        query: String,
        /// Provider override
        source: Option<TrackSource>,
    },
    /// `remove position`
    Remove {
        /// 1-based queue position
        position: i64,
    },
    /// `lyrics [query]`
    Lyrics {
        /// Song to look up; the current track when absent
        query: Option<String>,
    },
    /// `join`
    Join,
    /// `leave`
    Leave,
    /// `related [count]`
    Related {
        /// Tracks to add
        count: i64,
    },
    /// `move from to`
    Move {
        /// 1-based source position
        from: i64,
        /// 1-based destination position
        to: i64,
    },
}

fn source_option(ctx: &InteractionContext) -> CadenzaResult<Option<TrackSource>> {
    ctx.optional_string("source")?
        .map(|value| {
            TrackSource::from_str(&value)
                .map_err(|_| ArgumentError::invalid("source", format!("unknown source '{}'", value)).into())
        })
        .transpose()
}

impl CommandInvocation {
    /// Read `command`'s parameters from the context.
    ///
    /// # Errors
    ///
    /// [`ArgumentError`] when a required option is missing or has the wrong type.
    pub fn parse(command: Command, ctx: &InteractionContext) -> CadenzaResult<Self> {
        let invocation = match command {
            Command::Play => Self::Play {
                query: ctx.string("query")?,
                source: source_option(ctx)?,
            },
            Command::Pause => Self::Pause,
            Command::Resume => Self::Resume,
            Command::Skip => Self::Skip,
            Command::Stop => Self::Stop,
            Command::Volume => Self::Volume {
                level: ctx.integer("level")?,
            },
            Command::Queue => Self::Queue,
            Command::NowPlaying => Self::NowPlaying,
            Command::Loop => Self::Loop {
                mode: ctx.integer("mode")?,
            },
            Command::Shuffle => Self::Shuffle,
            Command::Search => Self::Search {
                query: ctx.string("query")?,
                source: source_option(ctx)?,
            },
            Command::Remove => Self::Remove {
                position: ctx.integer("position")?,
            },
            Command::Lyrics => Self::Lyrics {
                query: ctx
                    .optional_string("query")?
                    .filter(|query| !query.trim().is_empty()),
            },
            Command::Join => Self::Join,
            Command::Leave => Self::Leave,
            Command::Related => Self::Related {
                count: ctx
                    .optional_integer("count")?
                    .unwrap_or(DEFAULT_RELATED_COUNT),
            },
            Command::Move => Self::Move {
                from: ctx.integer("from")?,
                to: ctx.integer("to")?,
            },
        };
        Ok(invocation)
    }

    /// The catalog entry this invocation belongs to.
    pub fn command(&self) -> Command {
        match self {
            Self::Play { .. } => Command::Play,
            Self::Pause => Command::Pause,
            Self::Resume => Command::Resume,
            Self::Skip => Command::Skip,
            Self::Stop => Command::Stop,
            Self::Volume { .. } => Command::Volume,
            Self::Queue => Command::Queue,
            Self::NowPlaying => Command::NowPlaying,
            Self::Loop { .. } => Command::Loop,
            Self::Shuffle => Command::Shuffle,
            Self::Search { .. } => Command::Search,
            Self::Remove { .. } => Command::Remove,
            Self::Lyrics { .. } => Command::Lyrics,
            Self::Join => Command::Join,
            Self::Leave => Command::Leave,
            Self::Related { .. } => Command::Related,
            Self::Move { .. } => Command::Move,
        }
    }
}
