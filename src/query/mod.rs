//! Query resolver for the artist catalog
//!
//! Answers StageQL documents against a fixed in-memory artist set.

pub mod documents;
mod projection;
mod request;
mod resolver;

pub use projection::project;
pub use request::{QueryError, QueryRequest, QueryResponse};
pub use resolver::{Classification, Resolver, ResolverError, DEFAULT_LATENCY};
