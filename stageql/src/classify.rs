//! Substring-based operation classification
//!
//! Checks run in a fixed order and the first hit wins. `artist(` must be
//! tested before the list patterns.

use crate::ast::Operation;

pub const FETCH_BY_ID_PATTERN: &str = "artist(";
pub const FETCH_BY_CATEGORY_PATTERN: &str = "artistsByCategory";
pub const FETCH_BY_LOCATION_PATTERN: &str = "artistsByLocation";

/// Classify a raw document by pattern presence
pub fn classify(document: &str) -> Operation {
    if document.contains(FETCH_BY_ID_PATTERN) {
        Operation::FetchById
    } else if document.contains(FETCH_BY_CATEGORY_PATTERN) {
        Operation::FetchByCategory
    } else if document.contains(FETCH_BY_LOCATION_PATTERN) {
        Operation::FetchByLocation
    } else {
        Operation::FetchAll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_operation() {
        assert_eq!(classify("{ artist(id: $id) { id } }"), Operation::FetchById);
        assert_eq!(
            classify("{ artistsByCategory(category: $c) { id } }"),
            Operation::FetchByCategory
        );
        assert_eq!(
            classify("{ artistsByLocation(location: $l) { id } }"),
            Operation::FetchByLocation
        );
        assert_eq!(classify("{ artists { id } }"), Operation::FetchAll);
    }

    #[test]
    fn test_default_is_fetch_all() {
        assert_eq!(classify(""), Operation::FetchAll);
        assert_eq!(classify("{}"), Operation::FetchAll);
    }

    #[test]
    fn test_priority_order() {
        // Both list patterns present: category wins over location
        let doc = "artistsByLocation artistsByCategory";
        assert_eq!(classify(doc), Operation::FetchByCategory);

        // A single-record pattern anywhere wins over everything
        let doc = "artistsByCategory # see artist(id)";
        assert_eq!(classify(doc), Operation::FetchById);
    }
}
