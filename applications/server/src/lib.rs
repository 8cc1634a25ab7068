//! Airwave Server Library
//!
//! Shared now-playing coordinator: producers send play/stop/skip commands over
//! HTTP or WebSocket, and every connected listener receives state changes.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod protocol;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{CommandError, Result, ServerError};
pub use services::{AccessPolicy, Station};
pub use state::AppState;
