//! Error types for catalog loading and track building

use thiserror::Error;

/// Songs file could not be loaded
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File missing or unreadable
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// File is not a JSON object of entries
    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Command input could not be turned into a track
///
/// The two cases are reported differently to callers: a request that carried
/// nothing usable is invalid input, while a name the catalog does not know is
/// a lookup miss.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// No location and no name were supplied
    #[error("invalid input")]
    NoInput,

    /// The name was not found in the catalog
    #[error("entry not found: {0}")]
    NotFound(String),
}
