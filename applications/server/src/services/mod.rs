/// Business logic services
pub mod auth;
pub mod sessions;
pub mod station;

pub use auth::AccessPolicy;
pub use sessions::{mailbox, Mailbox, SessionId, SessionRegistry, MAILBOX_CAPACITY};
pub use station::{Origin, Station};
