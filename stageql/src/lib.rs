//! StageQL - query documents for the Stagebook artist catalog
//!
//! A query document names one root field and the artist fields to return:
//!
//! ```text
//! query GetArtistsByCategory($category: String!) {
//!   artistsByCategory(category: $category) {
//!     id
//!     name
//!     priceRange {
//!       min
//!       max
//!     }
//!   }
//! }
//! ```
//!
//! Two readings of a document are provided:
//!
//! - [`extract_fields`] and [`classify`] reproduce the line-based field list
//!   and the substring dispatch that existing callers depend on.
//! - [`parse`] is a real parser that yields an explicit [`Operation`] tag
//!   from the root field.
//!
//! # Root fields
//!
//! - `artists` - every artist
//! - `artist(id:)` - one artist or null
//! - `artistsByCategory(category:)` - category membership
//! - `artistsByLocation(location:)` - case-insensitive location substring

mod ast;
mod classify;
mod error;
mod parser;
mod selection;

pub use ast::*;
pub use classify::{
    classify, FETCH_BY_CATEGORY_PATTERN, FETCH_BY_ID_PATTERN, FETCH_BY_LOCATION_PATTERN,
};
pub use error::ParseError;
pub use selection::extract_fields;

/// Parse a query document into an AST
pub fn parse(input: &str) -> Result<QueryDocument, ParseError> {
    parser::parse_document(input)
}

/// Parse a document and map its root field to an operation
///
/// Returns `Ok(None)` when the document parses but names a root field the
/// catalog does not serve.
pub fn parse_operation(input: &str) -> Result<(QueryDocument, Option<Operation>), ParseError> {
    let doc = parse(input)?;
    let op = Operation::from_root_field(&doc.root.name);
    Ok((doc, op))
}
