//! Query resolver first, REST fallback second
//!
//! The two paths run in strict sequence. The fallback is only awaited after
//! the resolver has answered with an error list or with data that does not
//! decode as an artist list.

use std::fmt;

use crate::error::{Error, Result};
use crate::model::Artist;
use crate::query::{QueryRequest, QueryResponse, Resolver};
use crate::source::ArtistSource;

/// Which path produced the record set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Resolver,
    Fallback,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Resolver => f.write_str("query resolver"),
            Origin::Fallback => f.write_str("REST fallback"),
        }
    }
}

/// Result of a load attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The record set was replaced
    Loaded { origin: Origin, count: usize },
    /// Both paths failed; the previous record set is kept
    Failed { reason: String },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Fetch the artist list, falling back to `source` when the resolver fails
pub async fn fetch_artists<S: ArtistSource>(
    resolver: &Resolver,
    request: QueryRequest,
    source: &S,
) -> Result<(Vec<Artist>, Origin)> {
    let response = resolver.execute(request).await;
    match decode(response) {
        Ok(artists) => return Ok((artists, Origin::Resolver)),
        Err(err) => {
            tracing::warn!(
                error = %err,
                fallback = %source.describe(),
                "Query resolver failed, using REST fallback"
            );
        }
    }

    let artists = source.fetch_artists().await?;
    Ok((artists, Origin::Fallback))
}

fn decode(response: QueryResponse) -> Result<Vec<Artist>> {
    if let Some(message) = response.error_message() {
        return Err(Error::QueryFailed { message });
    }
    Ok(serde_json::from_value(response.data)?)
}
