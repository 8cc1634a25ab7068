/// Producer credential extraction
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{header, request::Parts},
};
use serde::Deserialize;
use std::convert::Infallible;

/// Credential presented with an HTTP request, if any
///
/// Taken from `Authorization: Bearer <secret>` first, then from a
/// `credential` query parameter. Blank values count as absent. Checking it
/// is up to the station.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential(pub Option<String>);

impl Credential {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// This credential, or `fallback` when none was presented
    pub fn or(self, fallback: Option<String>) -> Self {
        Self(self.0.or(fallback))
    }
}

#[derive(Debug, Deserialize)]
struct CredentialQuery {
    credential: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for Credential
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let from_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(String::from);

        let from_query = || {
            Query::<CredentialQuery>::try_from_uri(&parts.uri)
                .ok()
                .and_then(|Query(q)| q.credential)
                .filter(|c| !c.trim().is_empty())
        };

        Ok(Self(from_header.or_else(from_query)))
    }
}
