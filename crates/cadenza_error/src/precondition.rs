//! Voice precondition errors.

/// Conditions a command needs before it may touch a voice session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PreconditionErrorKind {
    /// The invoking member is not connected to any voice channel.
    #[display("You need to be in a voice channel to use this command")]
    NotInVoiceChannel,

    /// The bot cannot connect to or speak in the member's voice channel.
    #[display("I need permission to connect and speak in your voice channel")]
    MissingVoicePermissions,

    /// The command was invoked outside of a server.
    #[display("This command can only be used inside a server")]
    GuildOnly,
}

/// Precondition error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Precondition Error: {} at line {} in {}", kind, line, file)]
pub struct PreconditionError {
    kind: PreconditionErrorKind,
    line: u32,
    file: &'static str,
}

impl PreconditionError {
    /// Create a new precondition error with caller location tracking.
    #[track_caller]
    pub fn new(kind: PreconditionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> PreconditionErrorKind {
        self.kind
    }
}
