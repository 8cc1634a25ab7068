//! WebSocket wire protocol
//!
//! Every frame is a JSON object tagged by `action`.
//!
//! Inbound (producers and listeners):
//! ```json
//! {"action": "play", "queryName": "cradles", "requester": "dj", "credential": "..."}
//! {"action": "ended", "location": "http://radio.local/cradles.mp3"}
//! ```
//!
//! Outbound (to every listener):
//! ```json
//! {"action": "play", "location": "...", "text": "Cradles", "requester": "dj"}
//! {"action": "queue", "nowPlaying": {"text": "Cradles", "requester": "dj"}, "queue": []}
//! ```

use airwave_playback::{PlaybackState, TrackLabel, TrackRequest};
use serde::{Deserialize, Serialize};

/// Message received from a connected client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ClientMessage {
    Play {
        #[serde(flatten)]
        request: TrackRequest,
        #[serde(default)]
        credential: Option<String>,
    },
    Stop {
        #[serde(default)]
        credential: Option<String>,
    },
    Skip {
        #[serde(default)]
        credential: Option<String>,
    },
    /// Read-only; a credential may be sent but is not checked
    QueueList {
        #[serde(default)]
        credential: Option<String>,
    },
    Ended {
        location: String,
    },
}

/// Message pushed to connected clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ServerMessage {
    /// A track is on air
    Play {
        location: String,
        text: String,
        requester: String,
    },
    /// Nothing is on air
    Stop {
        location: Option<String>,
        text: Option<String>,
        requester: Option<String>,
    },
    /// Full queue snapshot
    Queue {
        #[serde(rename = "nowPlaying")]
        now_playing: Option<TrackLabel>,
        queue: Vec<TrackLabel>,
    },
    Error {
        text: String,
    },
    /// Human-readable queue listing, sent only to the asking client
    QueueList {
        lines: Vec<String>,
    },
}

impl ServerMessage {
    /// Flat "state changed" message for the current state
    pub fn state(playback: &PlaybackState) -> Self {
        match playback.now_playing() {
            Some(track) => ServerMessage::Play {
                location: track.location().to_string(),
                text: track.display_text().to_string(),
                requester: track.requested_by().to_string(),
            },
            None => ServerMessage::Stop {
                location: None,
                text: None,
                requester: None,
            },
        }
    }

    /// Queue snapshot for the current state
    pub fn queue(playback: &PlaybackState) -> Self {
        ServerMessage::Queue {
            now_playing: playback.now_playing_label(),
            queue: playback.queue_labels(),
        }
    }

    /// The pair sent after every transition and on connect
    pub fn sync(playback: &PlaybackState) -> [Self; 2] {
        [Self::state(playback), Self::queue(playback)]
    }

    pub fn error(text: impl Into<String>) -> Self {
        ServerMessage::Error { text: text.into() }
    }
}
