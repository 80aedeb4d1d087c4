//! Acknowledgment protocol violations.

/// Illegal transitions of an interaction's reply state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum InteractionErrorKind {
    /// The interaction was already deferred or replied to.
    #[display("Interaction has already been acknowledged")]
    AlreadyAcknowledged,

    /// `edit_reply` was called without a prior deferral.
    #[display("Interaction has not been deferred")]
    NotDeferred,
}

/// Interaction protocol error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Interaction Error: {} at line {} in {}", kind, line, file)]
pub struct InteractionError {
    kind: InteractionErrorKind,
    line: u32,
    file: &'static str,
}

impl InteractionError {
    /// Create a new interaction error with caller location tracking.
    #[track_caller]
    pub fn new(kind: InteractionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> InteractionErrorKind {
        self.kind
    }
}
