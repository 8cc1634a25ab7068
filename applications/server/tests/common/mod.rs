//! Common test utilities and fixtures
#![allow(dead_code)]

use airwave_playback::{Catalog, CatalogEntry};
use airwave_server::{AccessPolicy, AppState, Station};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Test station credentials and catalog names
pub mod fixtures {
    pub const SECRET: &str = "hunter2";
    pub const CRADLES_LOCATION: &str = "http://radio.local/cradles.mp3";
}

/// Catalog with a single "cradles" entry
pub fn test_catalog() -> Catalog {
    Catalog::from_entries([(
        "cradles",
        CatalogEntry {
            location: fixtures::CRADLES_LOCATION.to_string(),
            title: Some("Cradles".to_string()),
        },
    )])
}

/// Station with the test catalog, optionally protected by `fixtures::SECRET`
pub fn create_test_station(protected: bool) -> Arc<Station> {
    let access = if protected {
        AccessPolicy::new(Some(fixtures::SECRET))
    } else {
        AccessPolicy::open()
    };
    Arc::new(Station::new(test_catalog(), access))
}

pub fn create_test_state(protected: bool) -> AppState {
    AppState::new(create_test_station(protected))
}

/// Drain everything currently waiting in a listener mailbox as JSON
pub fn drain_json<T: serde::Serialize>(rx: &mut mpsc::Receiver<T>) -> Vec<Value> {
    let mut messages = Vec::new();
    while let Ok(message) = rx.try_recv() {
        messages.push(serde_json::to_value(message).unwrap());
    }
    messages
}
