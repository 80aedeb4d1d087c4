//! Message delivery errors.

/// Transport-level failures to deliver a rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DeliveryErrorKind {
    /// The message could not be converted into the platform's format.
    #[display("Render failed: {_0}")]
    Render(String),

    /// The platform rejected or dropped the message.
    #[display("Send failed: {_0}")]
    Send(String),
}

/// Delivery error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Delivery Error: {} at line {} in {}", kind, line, file)]
pub struct DeliveryError {
    kind: DeliveryErrorKind,
    line: u32,
    file: &'static str,
}

impl DeliveryError {
    /// Create a new delivery error with caller location tracking.
    #[track_caller]
    pub fn new(kind: DeliveryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for [`DeliveryErrorKind::Send`].
    #[track_caller]
    pub fn send(message: impl Into<String>) -> Self {
        Self::new(DeliveryErrorKind::Send(message.into()))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DeliveryErrorKind {
        &self.kind
    }
}
