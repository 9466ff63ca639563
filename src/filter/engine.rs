//! Predicate evaluation

use super::config::{CategoryFilter, FilterConfig, PriceSpan};
use crate::model::Artist;

/// A filter configuration prepared for repeated evaluation
#[derive(Debug, Clone)]
pub struct Predicate {
    category: CategoryFilter,
    /// Case-folded location needle, `None` when unconstrained
    needle: Option<String>,
    price: PriceSpan,
}

impl Predicate {
    pub fn compile(config: &FilterConfig) -> Self {
        let needle = if config.location.is_empty() {
            None
        } else {
            Some(config.location.to_lowercase())
        };

        Self {
            category: config.category,
            needle,
            price: config.price,
        }
    }

    /// All three predicates must pass
    pub fn test(&self, artist: &Artist) -> bool {
        self.matches_category(artist) && self.matches_location(artist) && self.price.overlaps(&artist.price_range)
    }

    fn matches_category(&self, artist: &Artist) -> bool {
        match self.category {
            CategoryFilter::Any => true,
            CategoryFilter::Only(category) => artist.has_category(category),
        }
    }

    fn matches_location(&self, artist: &Artist) -> bool {
        match self.needle {
            None => true,
            Some(ref needle) => artist.location.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Evaluate a configuration against a single artist
pub fn matches(artist: &Artist, config: &FilterConfig) -> bool {
    Predicate::compile(config).test(artist)
}

/// Filter a record set, keeping original relative order
pub fn apply(artists: &[Artist], config: &FilterConfig) -> Vec<Artist> {
    let predicate = Predicate::compile(config);
    artists
        .iter()
        .filter(|artist| predicate.test(artist))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{fixtures, Category};

    fn pair() -> Vec<Artist> {
        vec![
            Artist::new("1", "One")
                .with_categories([Category::Singer])
                .with_location("New York")
                .with_price(500, 1000),
            Artist::new("2", "Two")
                .with_categories([Category::Dj])
                .with_location("Boston")
                .with_price(2000, 3000),
        ]
    }

    fn ids(artists: &[Artist]) -> Vec<&str> {
        artists.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_default_config_keeps_everything_in_order() {
        let roster = fixtures::artists();
        assert_eq!(apply(&roster, &FilterConfig::default()), roster);
    }

    #[test]
    fn test_category() {
        let config = FilterConfig::new().with_category(Category::Dj);
        assert_eq!(ids(&apply(&pair(), &config)), vec!["2"]);
    }

    #[test]
    fn test_location_is_case_insensitive_substring() {
        let set = vec![
            Artist::new("a", "A").with_location("New York").with_price(0, 10),
            Artist::new("b", "B").with_location("Newark").with_price(0, 10),
        ];

        let config = FilterConfig::new().with_location("new");
        assert_eq!(ids(&apply(&set, &config)), vec!["a", "b"]);

        let config = FilterConfig::new().with_location("NEWARK");
        assert_eq!(ids(&apply(&set, &config)), vec!["b"]);

        let config = FilterConfig::new().with_location("boston");
        assert!(apply(&set, &config).is_empty());
    }

    #[test]
    fn test_price_overlap() {
        let config = FilterConfig::new().with_price(900, 1999);
        assert_eq!(ids(&apply(&pair(), &config)), vec!["1"]);

        let config = FilterConfig::new().with_price(1000, 2000);
        assert_eq!(ids(&apply(&pair(), &config)), vec!["1", "2"]);
    }

    #[test]
    fn test_all_predicates_must_pass() {
        let config = FilterConfig::new()
            .with_category(Category::Singer)
            .with_location("boston");
        assert!(apply(&pair(), &config).is_empty());
    }

    #[test]
    fn test_inverted_span_yields_empty() {
        let config = FilterConfig::new().with_price(5000, 0);
        assert!(apply(&fixtures::artists(), &config).is_empty());
    }

    #[test]
    fn test_widening_never_removes() {
        let roster = fixtures::artists();
        let spans = [(1000, 1200), (800, 2000), (500, 3000), (0, 5000), (0, u32::MAX)];

        let mut previous: Vec<Artist> = Vec::new();
        for (lo, hi) in spans {
            let current = apply(&roster, &FilterConfig::new().with_price(lo, hi));
            assert!(previous.iter().all(|a| current.contains(a)));
            previous = current;
        }
    }

    #[test]
    fn test_matches_single() {
        let artist = &pair()[0];
        assert!(matches(artist, &FilterConfig::default()));
        assert!(!matches(artist, &FilterConfig::new().with_category(Category::Band)));
    }
}
