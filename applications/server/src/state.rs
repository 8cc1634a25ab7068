/// Shared application state
use crate::services::Station;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub station: Arc<Station>,
}

impl AppState {
    pub fn new(station: Arc<Station>) -> Self {
        Self { station }
    }
}
