/// Live listener connections
///
/// Each connection owns a bounded outbound mailbox drained by its socket
/// writer. Delivery never waits on a listener: a send fails when the writer
/// has gone away or has fallen `MAILBOX_CAPACITY` messages behind, and such a
/// session is dropped from the registry on the spot.
use crate::protocol::ServerMessage;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

/// Messages a connection may have pending before it is dropped
pub const MAILBOX_CAPACITY: usize = 256;

/// Outbound queue of one connection
pub type Mailbox = mpsc::Sender<ServerMessage>;

/// Create a mailbox and the receiver its writer drains
pub fn mailbox() -> (Mailbox, mpsc::Receiver<ServerMessage>) {
    mpsc::channel(MAILBOX_CAPACITY)
}

fn drop_reason<T>(error: &TrySendError<T>) -> &'static str {
    match error {
        TrySendError::Full(_) => "mailbox full",
        TrySendError::Closed(_) => "closed",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unordered set of live connections
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Mailbox>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection and return its id
    pub fn register(&mut self, mailbox: Mailbox) -> SessionId {
        let id = SessionId::new();
        self.sessions.insert(id, mailbox);
        id
    }

    /// Remove a connection; returns false if it was already gone
    pub fn unregister(&mut self, id: &SessionId) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Send to one connection, dropping it if its writer is gone or stalled
    pub fn send_to(&mut self, id: &SessionId, message: ServerMessage) -> bool {
        let Some(mailbox) = self.sessions.get(id) else {
            return false;
        };
        let Err(e) = mailbox.try_send(message) else {
            return true;
        };
        tracing::debug!("Dropping session {} ({})", id, drop_reason(&e));
        self.sessions.remove(id);
        false
    }

    /// Send `messages` to every connection
    ///
    /// Returns the number of connections that received them. Dead or stalled
    /// connections are removed; they never stop delivery to the rest.
    pub fn broadcast(&mut self, messages: &[ServerMessage]) -> usize {
        self.sessions.retain(|id, mailbox| {
            match messages.iter().try_for_each(|m| mailbox.try_send(m.clone())) {
                Ok(()) => true,
                Err(e) => {
                    tracing::debug!("Dropping session {} ({})", id, drop_reason(&e));
                    false
                }
            }
        });
        self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
