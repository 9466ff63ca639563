//! HTTP surface: `GET /api/artists` and `GET /health`

mod routes;
mod server;

pub use routes::{api_routes, health_routes, ApiState};
pub use server::HttpServer;
