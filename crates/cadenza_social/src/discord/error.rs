//! Discord-specific error types.
//!
//! Gateway lifecycle failures stay Discord errors; failures inside the command
//! layer's seams are converted into the shared error taxonomy by the adapters.

use derive_getters::Getters;

/// Discord error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// Serenity API error (HTTP, gateway, rate limit).
    #[display("Serenity API error: {_0}")]
    SerenityError(String),

    /// Connection to the Discord gateway failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// Bot token is empty or malformed.
    #[display("Invalid or expired bot token")]
    InvalidToken,

    /// An embed exceeds a Discord size limit.
    #[display("Embed limit exceeded: {_0}")]
    EmbedLimit(String),
}

/// Discord error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    kind: DiscordErrorKind,
    line: u32,
    file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;

impl From<serenity::Error> for DiscordError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        DiscordError::new(DiscordErrorKind::SerenityError(err.to_string()))
    }
}
