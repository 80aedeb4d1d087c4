//! In-memory reference playback collaborator.
//!
//! [`InMemoryPlayback`] implements [`PlaybackService`](cadenza_interface::PlaybackService)
//! without any audio: it keeps per-guild queues, resolves queries against a
//! [`TrackLibrary`] loaded from TOML, and emits the same lifecycle events a real
//! player would. It backs dry runs of the bot and the command-layer tests.
//!
//! Track positions follow wall-clock time. Finished tracks advance when
//! [`InMemoryPlayback::advance_finished`] runs, which the binary schedules on an
//! interval.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod library;
mod session;

pub use engine::InMemoryPlayback;
pub use library::{LibraryEntry, TrackLibrary};
