//! Top-level error wrapper types.

use crate::{
    ArgumentError, ConfigError, DeliveryError, InteractionError, PlaybackError,
    PreconditionError, RegistrationError,
};

/// Every error condition a Cadenza crate can raise.
///
/// # Examples
///
/// ```
/// use cadenza_error::{CadenzaError, ConfigError};
///
/// let err: CadenzaError = ConfigError::new("Missing token").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CadenzaErrorKind {
    /// Voice precondition not met
    #[from(PreconditionError)]
    Precondition(PreconditionError),
    /// Playback collaborator rejected the operation
    #[from(PlaybackError)]
    Playback(PlaybackError),
    /// Command catalog registration failed
    #[from(RegistrationError)]
    Registration(RegistrationError),
    /// Message could not be rendered or sent
    #[from(DeliveryError)]
    Delivery(DeliveryError),
    /// Reply-state protocol violated
    #[from(InteractionError)]
    Interaction(InteractionError),
    /// Invalid or missing command argument
    #[from(ArgumentError)]
    Argument(ArgumentError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Cadenza error with kind discrimination.
///
/// # Examples
///
/// ```
/// use cadenza_error::{CadenzaErrorKind, CadenzaResult, PreconditionError, PreconditionErrorKind};
///
/// fn join() -> CadenzaResult<()> {
///     Err(PreconditionError::new(PreconditionErrorKind::NotInVoiceChannel))?
/// }
///
/// let err = join().unwrap_err();
/// assert!(matches!(err.kind(), CadenzaErrorKind::Precondition(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Cadenza Error: {}", _0)]
pub struct CadenzaError(Box<CadenzaErrorKind>);

impl CadenzaError {
    /// Create a new error from a kind.
    pub fn new(kind: CadenzaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CadenzaErrorKind {
        &self.0
    }

    /// Text suitable for an end user: the condition only, no source location.
    ///
    /// Internal failures (delivery, protocol, configuration, registration) are
    /// collapsed into a generic sentence so implementation details stay in the logs.
    pub fn user_message(&self) -> String {
        match self.kind() {
            CadenzaErrorKind::Precondition(e) => e.kind().to_string(),
            CadenzaErrorKind::Playback(e) => e.kind().to_string(),
            CadenzaErrorKind::Argument(e) => e.kind().to_string(),
            CadenzaErrorKind::Registration(_)
            | CadenzaErrorKind::Delivery(_)
            | CadenzaErrorKind::Interaction(_)
            | CadenzaErrorKind::Config(_) => {
                "Something went wrong while running this command".to_string()
            }
        }
    }
}

// Generic From implementation for any type that converts to CadenzaErrorKind
impl<T> From<T> for CadenzaError
where
    T: Into<CadenzaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Cadenza operations.
pub type CadenzaResult<T> = std::result::Result<T, CadenzaError>;
