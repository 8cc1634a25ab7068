//! Track building
//!
//! Turns loose command input into a [`Track`]. Resolution order, first match
//! wins:
//! 1. `location` that is an absolute URL (`scheme://...`): used as-is
//! 2. `queryName`, or a bare non-URL `location`: looked up in the catalog
//! 3. anything else is invalid input

use crate::catalog::Catalog;
use crate::error::BuildError;
use crate::types::{Track, DEFAULT_DISPLAY_TEXT};
use serde::Deserialize;
use url::Url;

/// Raw play request as it arrives from a producer
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    /// Absolute URL, or a bare catalog name
    #[serde(default)]
    pub location: Option<String>,
    /// Catalog name
    #[serde(default)]
    pub query_name: Option<String>,
    /// Display text override
    #[serde(default)]
    pub text: Option<String>,
    /// Requester label
    #[serde(default)]
    pub requester: Option<String>,
}

/// Check whether a location is an absolute, hierarchical URL
///
/// `http://x/y.mp3` qualifies; `cradles`, `my song` and `mailto:dj` do not.
pub fn looks_absolute(location: &str) -> bool {
    let location = location.trim();
    if location.is_empty() {
        return false;
    }
    Url::parse(location).is_ok_and(|url| !url.cannot_be_a_base())
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl TrackRequest {
    /// Resolve this request against the catalog
    pub fn build(&self, catalog: &Catalog) -> Result<Track, BuildError> {
        let location = non_blank(self.location.as_ref());
        let text = non_blank(self.text.as_ref());
        let requester = self.requester.as_deref();

        if let Some(location) = location.filter(|l| looks_absolute(l)) {
            return Ok(Track::new(
                location,
                text.unwrap_or(DEFAULT_DISPLAY_TEXT),
                requester,
            ));
        }

        let name = non_blank(self.query_name.as_ref())
            .or(location)
            .ok_or(BuildError::NoInput)?;

        let entry = catalog
            .resolve(name)
            .ok_or_else(|| BuildError::NotFound(name.to_string()))?;

        let display_text = entry
            .title
            .as_deref()
            .or(text)
            .unwrap_or(DEFAULT_DISPLAY_TEXT);

        Ok(Track::new(entry.location.clone(), display_text, requester))
    }
}
