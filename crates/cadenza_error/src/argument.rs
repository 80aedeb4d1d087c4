//! Command argument errors.

/// Problems with the typed parameters of an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ArgumentErrorKind {
    /// A required parameter was not supplied.
    #[display("Missing required option '{_0}'")]
    Missing(String),

    /// A parameter was supplied with the wrong type or an out-of-range value.
    #[display("Invalid value for '{name}': {reason}")]
    Invalid {
        /// Parameter name
        name: String,
        /// Why the value was rejected
        reason: String,
    },
}

/// Argument error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Argument Error: {} at line {} in {}", kind, line, file)]
pub struct ArgumentError {
    kind: ArgumentErrorKind,
    line: u32,
    file: &'static str,
}

impl ArgumentError {
    /// Create a new argument error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ArgumentErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for [`ArgumentErrorKind::Invalid`].
    #[track_caller]
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ArgumentErrorKind::Invalid {
            name: name.into(),
            reason: reason.into(),
        })
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ArgumentErrorKind {
        &self.kind
    }
}
