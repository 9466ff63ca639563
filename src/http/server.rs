//! # HTTP Server
//!
//! Serves the artist list that the loader falls back to when the query
//! resolver fails.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes::{api_routes, health_routes, ApiState};
use crate::config::{Config, ServerConfig};
use crate::model::fixtures;

pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Serve the built-in artist set with the configured latency
    pub fn new(config: &Config) -> Self {
        let state = ApiState::new(fixtures::artists(), config.latency.rest());
        Self::with_state(config.server.clone(), state)
    }

    pub fn with_state(config: ServerConfig, state: ApiState) -> Self {
        let router = Self::build_router(&config, Arc::new(state));
        Self { config, router }
    }

    fn build_router(config: &ServerConfig, state: Arc<ApiState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .nest("/api", api_routes(state))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid address '{}': {}", self.config.socket_addr(), err),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "Stagebook HTTP server listening");
        tracing::info!("Artist list: http://{}/api/artists", addr);

        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(&Config::default());
        assert_eq!(server.socket_addr(), "0.0.0.0:4000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let state = ApiState::new(Vec::new(), std::time::Duration::ZERO);
        let server = HttpServer::with_state(ServerConfig::with_port(8080), state);
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_start_rejects_bad_address() {
        let config = ServerConfig {
            host: "not a host".into(),
            ..Default::default()
        };
        let state = ApiState::new(Vec::new(), std::time::Duration::ZERO);
        let err = HttpServer::with_state(config, state).start().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
