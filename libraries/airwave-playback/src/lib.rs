//! Airwave - Playback Core
//!
//! The single source of truth for "what is on air" in an Airwave station.
//!
//! This crate provides:
//! - `Track`: immutable playable item (location, display text, requester)
//! - `Catalog`: static name -> location lookup loaded from a songs file
//! - `TrackRequest`: normalizes loose command input into a `Track`
//! - `PlaybackState`: now-playing slot plus FIFO queue, with the
//!   enqueue-or-start / advance / reset transitions
//!
//! # Architecture
//!
//! `airwave-playback` is synchronous and transport-agnostic:
//! - No async runtime
//! - No knowledge of HTTP or WebSocket
//! - Serialization of state onto the wire is left to the server
//!
//! The server wraps one `PlaybackState` behind a lock and broadcasts after
//! every transition.
//!
//! # Example
//!
//! ```rust
//! use airwave_playback::{Catalog, Enqueued, PlaybackEvent, PlaybackState, TrackRequest};
//!
//! let catalog = Catalog::empty();
//! let mut state = PlaybackState::new();
//!
//! let request = TrackRequest {
//!     location: Some("http://radio.local/intro.mp3".to_string()),
//!     text: Some("Intro".to_string()),
//!     ..Default::default()
//! };
//! let track = request.build(&catalog).unwrap();
//!
//! assert!(matches!(state.enqueue_or_start(track), Enqueued::Started(_)));
//! assert!(state.track_ended("http://radio.local/other.mp3").is_none());
//! assert!(matches!(
//!     state.track_ended("http://radio.local/intro.mp3"),
//!     Some(PlaybackEvent::Stop)
//! ));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
pub mod catalog;
mod error;
mod events;
mod state;
pub mod types;

// Public exports
pub use builder::{looks_absolute, TrackRequest};
pub use catalog::{normalize_name, Catalog, CatalogEntry};
pub use error::{BuildError, CatalogError};
pub use events::{Enqueued, PlaybackEvent};
pub use state::PlaybackState;
pub use types::{Track, TrackLabel, DEFAULT_DISPLAY_TEXT, UNKNOWN_REQUESTER};
