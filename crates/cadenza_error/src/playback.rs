//! Errors reported by the playback collaborator.

/// Reasons the playback collaborator rejects an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PlaybackErrorKind {
    /// No voice session exists for the guild.
    #[display("I'm not connected to a voice channel")]
    NotConnected,

    /// The operation needs a current track and there is none.
    #[display("Nothing is playing right now")]
    NothingPlaying,

    /// A 1-based queue position does not exist.
    #[display("There is no track at position {position} (queue has {len})")]
    PositionOutOfRange {
        /// Requested position, 1-based
        position: usize,
        /// Queue length at the time of the request
        len: usize,
    },

    /// The collaborator refused the request and reported why.
    #[display("{_0}")]
    Rejected(String),

    /// The collaborator or one of its providers is unreachable.
    #[display("Playback service unavailable: {_0}")]
    Unavailable(String),
}

/// Playback error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Playback Error: {} at line {} in {}", kind, line, file)]
pub struct PlaybackError {
    kind: PlaybackErrorKind,
    line: u32,
    file: &'static str,
}

impl PlaybackError {
    /// Create a new playback error with caller location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use cadenza_error::{PlaybackError, PlaybackErrorKind};
    ///
    /// let err = PlaybackError::new(PlaybackErrorKind::PositionOutOfRange { position: 9, len: 3 });
    /// assert!(err.kind().to_string().contains("position 9"));
    /// ```
    #[track_caller]
    pub fn new(kind: PlaybackErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PlaybackErrorKind {
        &self.kind
    }
}
