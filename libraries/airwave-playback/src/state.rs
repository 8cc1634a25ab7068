//! Now-playing state machine
//!
//! ```text
//! Now Playing: Track A
//! ─────────────────────
//! Queue (FIFO):
//!   - Track B
//!   - Track C
//! ```
//!
//! Invariant after every transition: `now_playing` is `None` exactly when the
//! queue is empty. The head of the queue is promoted as soon as the slot frees.

use crate::events::{Enqueued, PlaybackEvent};
use crate::types::{Track, TrackLabel};
use std::collections::VecDeque;

/// Current track plus the tracks waiting behind it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    now_playing: Option<Track>,
    queue: VecDeque<Track>,
}

impl PlaybackState {
    /// Create an idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Track currently on air
    pub fn now_playing(&self) -> Option<&Track> {
        self.now_playing.as_ref()
    }

    /// Tracks waiting, in playback order
    pub fn queue(&self) -> impl ExactSizeIterator<Item = &Track> {
        self.queue.iter()
    }

    /// Number of tracks waiting
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Check if nothing is playing
    pub fn is_idle(&self) -> bool {
        self.now_playing.is_none()
    }

    /// Start the track if idle, otherwise append it to the queue
    pub fn enqueue_or_start(&mut self, track: Track) -> Enqueued {
        if self.now_playing.is_none() {
            self.now_playing = Some(track.clone());
            return Enqueued::Started(track);
        }

        self.queue.push_back(track.clone());
        Enqueued::Queued {
            track,
            position: self.queue.len(),
        }
    }

    /// Promote the head of the queue, or go idle if there is none
    pub fn advance(&mut self) -> PlaybackEvent {
        match self.queue.pop_front() {
            Some(next) => {
                self.now_playing = Some(next.clone());
                PlaybackEvent::Play(next)
            }
            None => {
                self.now_playing = None;
                PlaybackEvent::Stop
            }
        }
    }

    /// End the current track early
    ///
    /// Drains one track; the rest of the queue is kept.
    pub fn skip(&mut self) -> PlaybackEvent {
        self.advance()
    }

    /// Clear the current track and the whole queue
    pub fn reset(&mut self) -> PlaybackEvent {
        self.now_playing = None;
        self.queue.clear();
        PlaybackEvent::Stop
    }

    /// Handle a listener reporting that `location` finished
    ///
    /// Advances only if `location` is exactly the current track's location.
    /// Every listener reports the same end, so all but the first report are
    /// stale by the time they arrive and return `None`.
    pub fn track_ended(&mut self, location: &str) -> Option<PlaybackEvent> {
        let current = self.now_playing.as_ref()?;
        if current.location() != location {
            return None;
        }
        Some(self.advance())
    }

    /// Label of the current track, if any
    pub fn now_playing_label(&self) -> Option<TrackLabel> {
        self.now_playing.as_ref().map(Track::label)
    }

    /// Labels of the queued tracks, in order
    pub fn queue_labels(&self) -> Vec<TrackLabel> {
        self.queue.iter().map(Track::label).collect()
    }

    /// Human-readable listing of the current track and the queue
    pub fn queue_lines(&self) -> Vec<String> {
        let Some(current) = &self.now_playing else {
            return vec!["Nothing is playing.".to_string()];
        };

        let mut lines = vec![format!(
            "Now playing: {} (requested by {})",
            current.display_text(),
            current.requested_by()
        )];

        if self.queue.is_empty() {
            lines.push("Queue is empty.".to_string());
        } else {
            lines.push("Up next:".to_string());
            lines.extend(self.queue.iter().enumerate().map(|(i, track)| {
                format!(
                    "{}. {} (requested by {})",
                    i + 1,
                    track.display_text(),
                    track.requested_by()
                )
            }));
        }

        lines
    }
}
