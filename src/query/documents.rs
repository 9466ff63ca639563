//! Predefined query documents

use stageql::Operation;

pub const GET_ARTISTS: &str = r#"
query GetArtists {
  artists {
    id
    name
    categories
    location
    priceRange {
      min
      max
    }
    bio
    image
    languages
  }
}
"#;

pub const GET_ARTIST: &str = r#"
query GetArtist($id: ID!) {
  artist(id: $id) {
    id
    name
    categories
    location
    priceRange {
      min
      max
    }
    bio
    image
    languages
  }
}
"#;

pub const GET_ARTISTS_BY_CATEGORY: &str = r#"
query GetArtistsByCategory($category: String!) {
  artistsByCategory(category: $category) {
    id
    name
    categories
    location
    priceRange {
      min
      max
    }
    bio
    image
    languages
  }
}
"#;

pub const GET_ARTISTS_BY_LOCATION: &str = r#"
query GetArtistsByLocation($location: String!) {
  artistsByLocation(location: $location) {
    id
    name
    categories
    location
    priceRange {
      min
      max
    }
    bio
    image
    languages
  }
}
"#;

/// The predefined document for an operation
pub fn for_operation(operation: Operation) -> &'static str {
    match operation {
        Operation::FetchAll => GET_ARTISTS,
        Operation::FetchById => GET_ARTIST,
        Operation::FetchByCategory => GET_ARTISTS_BY_CATEGORY,
        Operation::FetchByLocation => GET_ARTISTS_BY_LOCATION,
    }
}

/// Look up a predefined document by its short name
pub fn preset(name: &str) -> Option<&'static str> {
    let operation = match name {
        "artists" | "all" => Operation::FetchAll,
        "artist" | "by-id" => Operation::FetchById,
        "by-category" => Operation::FetchByCategory,
        "by-location" => Operation::FetchByLocation,
        _ => return None,
    };
    Some(for_operation(operation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_classifies_each_document() {
        for op in Operation::ALL {
            assert_eq!(stageql::classify(for_operation(op)), op);
        }
    }

    #[test]
    fn test_parser_agrees_with_heuristic() {
        for op in Operation::ALL {
            let (_, parsed) = stageql::parse_operation(for_operation(op)).unwrap();
            assert_eq!(parsed, Some(op));
        }
    }

    #[test]
    fn test_every_document_selects_all_fields() {
        let expected = [
            "id", "name", "categories", "location", "priceRange", "bio", "image", "languages",
        ];
        for op in Operation::ALL {
            let fields = stageql::extract_fields(for_operation(op));
            for field in expected {
                assert!(fields.iter().any(|f| f == field), "{} missing {}", op, field);
            }
        }
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(preset("by-location"), Some(GET_ARTISTS_BY_LOCATION));
        assert!(preset("venues").is_none());
    }
}
