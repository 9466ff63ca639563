//! REST routes

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::model::Artist;

/// Shared state of the artist routes
#[derive(Debug, Clone)]
pub struct ApiState {
    artists: Arc<[Artist]>,
    latency: Duration,
}

impl ApiState {
    pub fn new(artists: impl Into<Arc<[Artist]>>, latency: Duration) -> Self {
        Self {
            artists: artists.into(),
            latency,
        }
    }

    /// The full artist list, after the simulated latency
    pub async fn payload(&self) -> Vec<Artist> {
        tokio::time::sleep(self.latency).await;
        self.artists.to_vec()
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Routes mounted under `/api`
pub fn api_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/artists", get(list_artists))
        .with_state(state)
}

pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn list_artists(State(state): State<Arc<ApiState>>) -> Json<Vec<Artist>> {
    let artists = state.payload().await;
    tracing::debug!(count = artists.len(), "Serving artist list");
    Json(artists)
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    };
    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    #[tokio::test(start_paused = true)]
    async fn test_payload_waits_out_latency() {
        let state = ApiState::new(fixtures::artists(), Duration::from_millis(300));
        let start = tokio::time::Instant::now();

        let artists = state.payload().await;

        assert_eq!(artists, fixtures::artists());
        assert!(start.elapsed() >= Duration::from_millis(300));
    }
}
