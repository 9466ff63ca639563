//! Filter engine for the artist listing
//!
//! Narrows the record set by category, location substring and price
//! overlap, derives the facets that populate the filter controls, and runs
//! recomputation in the background so input handling never waits on it.

pub mod config;
mod engine;
pub mod facets;
pub mod live;

pub use config::{CategoryFilter, FilterConfig, FilterPatch, PriceSpan, DEFAULT_PRICE_SPAN};
pub use engine::{apply, matches, Predicate};
pub use facets::Facets;
pub use live::{FilterView, LiveFilter};
