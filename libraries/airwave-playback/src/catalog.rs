//! Static song catalog
//!
//! Maps a human-entered name to a canonical location and title. The catalog
//! is loaded once from a JSON songs file:
//!
//! ```json
//! {
//!   "cradles": { "location": "http://radio.local/cradles.mp3", "title": "Cradles" },
//!   "intro":   { "url": "http://radio.local/intro.mp3" }
//! }
//! ```
//!
//! Lookups are exact matches on the trimmed, lowercased name.

use crate::error::CatalogError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Canonical location and title for one catalog name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    /// Playable location
    #[serde(alias = "url")]
    pub location: String,
    /// Display title, if the songs file gives one
    #[serde(default)]
    pub title: Option<String>,
}

/// Read-only name -> entry table
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

/// Normalize a name for lookup: trim surrounding whitespace and lowercase
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Catalog {
    /// Catalog with no entries; every lookup misses
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from raw `(name, entry)` pairs
    ///
    /// Names are normalized. Blank titles are dropped so that lookups fall
    /// back to the request's own text.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, CatalogEntry)>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(name, mut entry)| {
                entry.title = entry
                    .title
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty());
                (normalize_name(name.as_ref()), entry)
            })
            .collect();

        Self { entries }
    }

    /// Parse a songs file body
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: HashMap<String, CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(raw))
    }

    /// Load a songs file, failing on a missing or malformed file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load a songs file, degrading to an empty catalog on any error
    ///
    /// Logs a single warning when the file cannot be used.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(catalog) => {
                tracing::info!("Loaded {} catalog entries from {:?}", catalog.len(), path);
                catalog
            }
            Err(e) => {
                tracing::warn!("Catalog unavailable at {:?}, continuing empty: {}", path, e);
                Self::empty()
            }
        }
    }

    /// Look up a name (normalized before matching)
    pub fn resolve(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(&normalize_name(name))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries sorted by normalized name
    pub fn sorted_entries(&self) -> Vec<(&str, &CatalogEntry)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
