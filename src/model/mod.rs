//! Catalog data model

pub mod artist;
pub mod fixtures;
pub mod submission;

pub use artist::{session_id, Artist, Category, Language, PriceRange, SESSION_PREFIX};
pub use submission::Submission;
