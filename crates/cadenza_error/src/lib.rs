//! Error types for the Cadenza music bot.
//!
//! This crate provides the error types shared by every Cadenza crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Location information is for logs only. Text shown to Discord users comes from
//! [`CadenzaError::user_message`], which never includes file or line.
//!
//! # Examples
//!
//! ```
//! use cadenza_error::{CadenzaResult, PlaybackError, PlaybackErrorKind};
//!
//! fn skip() -> CadenzaResult<()> {
//!     Err(PlaybackError::new(PlaybackErrorKind::NothingPlaying))?
//! }
//!
//! let err = skip().unwrap_err();
//! assert_eq!(err.user_message(), "Nothing is playing right now");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod argument;
mod config;
mod delivery;
mod error;
mod interaction;
mod playback;
mod precondition;
mod registration;

pub use argument::{ArgumentError, ArgumentErrorKind};
pub use config::ConfigError;
pub use delivery::{DeliveryError, DeliveryErrorKind};
pub use error::{CadenzaError, CadenzaErrorKind, CadenzaResult};
pub use interaction::{InteractionError, InteractionErrorKind};
pub use playback::{PlaybackError, PlaybackErrorKind};
pub use precondition::{PreconditionError, PreconditionErrorKind};
pub use registration::RegistrationError;
