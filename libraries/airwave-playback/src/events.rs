//! Playback Events
//!
//! Every transition of [`crate::PlaybackState`] reports what happened, so the
//! caller can log it and decide what to broadcast.

use crate::types::Track;

/// Outcome of advancing, skipping, stopping or ending a track
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// A track became now-playing
    Play(Track),

    /// Nothing is playing any more
    Stop,
}

impl PlaybackEvent {
    /// Short name used in logs and HTTP replies
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackEvent::Play(_) => "play",
            PlaybackEvent::Stop => "stop",
        }
    }
}

/// Outcome of adding a track
///
/// Adding work always leaves a track on air, so there is no stop case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enqueued {
    /// The station was idle and the track started immediately
    Started(Track),

    /// The track was appended behind the current one
    Queued {
        /// The appended track
        track: Track,
        /// 1-based position in the queue after appending
        position: usize,
    },
}

impl Enqueued {
    /// Short name used in logs and HTTP replies: "play" or "queued"
    pub fn name(&self) -> &'static str {
        match self {
            Enqueued::Started(_) => "play",
            Enqueued::Queued { .. } => "queued",
        }
    }

    /// The track that was added
    pub fn track(&self) -> &Track {
        match self {
            Enqueued::Started(track) | Enqueued::Queued { track, .. } => track,
        }
    }

    /// Take the added track
    pub fn into_track(self) -> Track {
        match self {
            Enqueued::Started(track) | Enqueued::Queued { track, .. } => track,
        }
    }
}
