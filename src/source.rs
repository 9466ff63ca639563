//! REST fallback sources
//!
//! The loader turns to an [`ArtistSource`] when the query resolver fails.
//! [`HttpSource`] calls `GET /api/artists` on a running server;
//! [`LocalSource`] produces the same payload in-process.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::http::ApiState;
use crate::model::Artist;

/// Where the fallback artist list comes from
pub trait ArtistSource: Send + Sync {
    /// Human-readable location for logs and errors
    fn describe(&self) -> String;

    fn fetch_artists(&self) -> impl Future<Output = Result<Vec<Artist>>> + Send;
}

/// `GET {base_url}/api/artists` over HTTP
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self) -> String {
        format!("{}/api/artists", self.base_url)
    }
}

impl ArtistSource for HttpSource {
    fn describe(&self) -> String {
        self.url()
    }

    async fn fetch_artists(&self) -> Result<Vec<Artist>> {
        let url = self.url();
        let failed = |err: reqwest::Error| Error::SourceFailed {
            url: url.clone(),
            message: err.to_string(),
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(failed)?
            .error_for_status()
            .map_err(failed)?;

        response.json::<Vec<Artist>>().await.map_err(failed)
    }
}

/// The `/api/artists` payload without a network hop
#[derive(Debug, Clone)]
pub struct LocalSource {
    state: Arc<ApiState>,
}

impl LocalSource {
    pub fn new(state: ApiState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }
}

impl ArtistSource for LocalSource {
    fn describe(&self) -> String {
        "in-process /api/artists".to_string()
    }

    async fn fetch_artists(&self) -> Result<Vec<Artist>> {
        Ok(self.state.payload().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    #[test]
    fn test_http_source_url() {
        let source = HttpSource::new("http://localhost:4000/");
        assert_eq!(source.url(), "http://localhost:4000/api/artists");
        assert_eq!(source.describe(), source.url());
    }

    #[tokio::test]
    async fn test_local_source() {
        let source = LocalSource::new(ApiState::new(fixtures::artists(), Duration::ZERO));
        let artists = source.fetch_artists().await.unwrap();
        assert_eq!(artists.len(), 10);
    }

    #[tokio::test]
    async fn test_http_source_unreachable() {
        // Port 9 (discard) is not served on test hosts
        let source = HttpSource::new("http://127.0.0.1:9");
        let err = source.fetch_artists().await.unwrap_err();
        assert!(matches!(err, Error::SourceFailed { .. }));
        assert!(err.is_recoverable());
    }
}
