//! Command registration error types.

/// Failure to submit the command catalog to the platform.
///
/// Registration failures are logged at startup and never shown to users.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Registration Error: {} at line {} in {}", message, line, file)]
pub struct RegistrationError {
    /// Transport or validation failure reported by the platform
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl RegistrationError {
    /// Create a new RegistrationError at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
