/// Station: the single owner of playback state
///
/// Every command runs as read -> mutate -> broadcast under one lock, so no
/// listener ever sees a half-applied transition and no two commands
/// interleave. Broadcasting only pushes onto per-connection mailboxes, so the
/// lock is never held across network I/O.
use crate::{
    error::CommandError,
    protocol::ServerMessage,
    services::{
        auth::AccessPolicy,
        sessions::{Mailbox, SessionId, SessionRegistry},
    },
};
use airwave_playback::{Catalog, Enqueued, PlaybackEvent, PlaybackState, TrackRequest};
use tokio::sync::Mutex;

/// Transport a command arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// One-shot HTTP request; failures go back to the caller only
    Request,
    /// Persistent connection; unresolved plays are broadcast to everyone
    Socket,
}

#[derive(Debug, Default)]
struct OnAir {
    playback: PlaybackState,
    sessions: SessionRegistry,
}

impl OnAir {
    fn broadcast_state(&mut self) -> usize {
        let messages = ServerMessage::sync(&self.playback);
        self.sessions.broadcast(&messages)
    }
}

#[derive(Debug)]
pub struct Station {
    catalog: Catalog,
    access: AccessPolicy,
    on_air: Mutex<OnAir>,
}

impl Station {
    pub fn new(catalog: Catalog, access: AccessPolicy) -> Self {
        Self {
            catalog,
            access,
            on_air: Mutex::new(OnAir::default()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn access(&self) -> &AccessPolicy {
        &self.access
    }

    fn authorize(&self, credential: Option<&str>, command: &str) -> Result<(), CommandError> {
        if self.access.permits(credential) {
            Ok(())
        } else {
            tracing::warn!("Rejected unauthorized {} command", command);
            Err(CommandError::Unauthorized)
        }
    }

    /// Start `request` now, or queue it behind the current track
    pub async fn play(
        &self,
        request: &TrackRequest,
        credential: Option<&str>,
        origin: Origin,
    ) -> Result<Enqueued, CommandError> {
        self.authorize(credential, "play")?;

        let track = match request.build(&self.catalog) {
            Ok(track) => track,
            Err(e) => {
                tracing::info!("Unresolved play request: {}", e);
                if origin == Origin::Socket {
                    self.on_air
                        .lock()
                        .await
                        .sessions
                        .broadcast(&[ServerMessage::error(e.to_string())]);
                }
                return Err(e.into());
            }
        };

        let mut on_air = self.on_air.lock().await;
        let outcome = on_air.playback.enqueue_or_start(track);
        match &outcome {
            Enqueued::Started(track) => tracing::info!(
                "Now playing {:?} ({}) for {}",
                track.display_text(),
                track.location(),
                track.requested_by()
            ),
            Enqueued::Queued { track, position } => tracing::info!(
                "Queued {:?} at position {} for {}",
                track.display_text(),
                position,
                track.requested_by()
            ),
        }
        on_air.broadcast_state();

        Ok(outcome)
    }

    /// Clear the current track and the queue
    pub async fn stop(&self, credential: Option<&str>) -> Result<PlaybackEvent, CommandError> {
        self.authorize(credential, "stop")?;

        let mut on_air = self.on_air.lock().await;
        let event = on_air.playback.reset();
        tracing::info!("Playback stopped");
        on_air.broadcast_state();

        Ok(event)
    }

    /// End the current track early and move to the next one
    pub async fn skip(&self, credential: Option<&str>) -> Result<PlaybackEvent, CommandError> {
        self.authorize(credential, "skip")?;

        let mut on_air = self.on_air.lock().await;
        let event = on_air.playback.skip();
        tracing::info!("Skipped, now {}", event.name());
        on_air.broadcast_state();

        Ok(event)
    }

    /// A listener reports that `location` finished playing
    ///
    /// Only the first report for the current track advances; the rest are
    /// stale and ignored without a broadcast.
    pub async fn track_ended(&self, location: &str) -> Option<PlaybackEvent> {
        let mut on_air = self.on_air.lock().await;
        let Some(event) = on_air.playback.track_ended(location) else {
            tracing::debug!("Ignoring stale end signal for {}", location);
            return None;
        };

        tracing::info!("Track {} ended, now {}", location, event.name());
        on_air.broadcast_state();
        Some(event)
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> PlaybackState {
        self.on_air.lock().await.playback.clone()
    }

    /// Human-readable queue listing
    pub async fn queue_lines(&self) -> Vec<String> {
        self.on_air.lock().await.playback.queue_lines()
    }

    /// Register a listener and replay the current state to it
    pub async fn connect(&self, mailbox: Mailbox) -> SessionId {
        let mut on_air = self.on_air.lock().await;
        let id = on_air.sessions.register(mailbox);
        for message in ServerMessage::sync(&on_air.playback) {
            on_air.sessions.send_to(&id, message);
        }
        tracing::debug!("Session {} connected ({} live)", id, on_air.sessions.len());
        id
    }

    /// Send `message` to one listener only
    pub async fn reply(&self, id: &SessionId, message: ServerMessage) {
        if !self.on_air.lock().await.sessions.send_to(id, message) {
            tracing::debug!("Reply to session {} dropped", id);
        }
    }

    /// Forget a listener; safe to call more than once
    pub async fn disconnect(&self, id: &SessionId) {
        let mut on_air = self.on_air.lock().await;
        if on_air.sessions.unregister(id) {
            tracing::debug!("Session {} disconnected ({} live)", id, on_air.sessions.len());
        }
    }

    /// Number of live listener connections
    pub async fn listener_count(&self) -> usize {
        self.on_air.lock().await.sessions.len()
    }
}
