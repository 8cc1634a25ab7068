//! Core value types shared by the state machine and the wire protocol

use serde::{Deserialize, Serialize};

/// Display text used when a request carries no usable label
pub const DEFAULT_DISPLAY_TEXT: &str = "Now playing";

/// Requester recorded when a command does not name one
pub const UNKNOWN_REQUESTER: &str = "unknown";

/// One playable item
///
/// Tracks are immutable once built; the location is an opaque string
/// (usually a URL) that is passed through to listeners untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    location: String,
    #[serde(rename = "text")]
    display_text: String,
    #[serde(rename = "requester")]
    requested_by: String,
}

impl Track {
    /// Create a track; a blank requester falls back to [`UNKNOWN_REQUESTER`]
    pub fn new(
        location: impl Into<String>,
        display_text: impl Into<String>,
        requested_by: Option<&str>,
    ) -> Self {
        let requested_by = requested_by
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(UNKNOWN_REQUESTER)
            .to_string();

        Self {
            location: location.into(),
            display_text: display_text.into(),
            requested_by,
        }
    }

    /// Opaque playable reference
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Label shown to listeners
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Who asked for this track
    pub fn requested_by(&self) -> &str {
        &self.requested_by
    }

    /// Label shown in queue snapshots (no location)
    pub fn label(&self) -> TrackLabel {
        TrackLabel {
            text: self.display_text.clone(),
            requester: self.requested_by.clone(),
        }
    }
}

/// Human-facing part of a track, as listed in queue snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackLabel {
    /// Display text
    pub text: String,
    /// Requester label
    pub requester: String,
}
