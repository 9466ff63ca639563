//! Derived facets for populating filter controls

use serde::Serialize;
use std::collections::BTreeSet;

use super::config::{PriceSpan, DEFAULT_PRICE_SPAN};
use crate::model::Artist;

/// Read-only summaries of a record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    /// Distinct locations, ascending
    pub locations: Vec<String>,
    /// Lowest minimum and highest maximum price
    pub price_bounds: PriceSpan,
}

impl Facets {
    pub fn from_artists(artists: &[Artist]) -> Self {
        let locations: BTreeSet<&str> = artists.iter().map(|a| a.location.as_str()).collect();

        let price_bounds = match (
            artists.iter().map(|a| a.price_range.min).min(),
            artists.iter().map(|a| a.price_range.max).max(),
        ) {
            (Some(lo), Some(hi)) => PriceSpan::new(lo, hi),
            _ => DEFAULT_PRICE_SPAN,
        };

        Self {
            locations: locations.into_iter().map(String::from).collect(),
            price_bounds,
        }
    }
}

impl Default for Facets {
    fn default() -> Self {
        Self::from_artists(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    #[test]
    fn test_empty_set_defaults() {
        let facets = Facets::from_artists(&[]);
        assert!(facets.locations.is_empty());
        assert_eq!(facets.price_bounds, PriceSpan::new(0, 5000));
    }

    #[test]
    fn test_locations_sorted_and_distinct() {
        let roster = fixtures::artists();
        let facets = Facets::from_artists(&roster);

        let mut expected: Vec<String> = roster.iter().map(|a| a.location.clone()).collect();
        expected.sort();
        expected.dedup();

        assert_eq!(facets.locations, expected);
        assert!(facets.locations.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_price_bounds() {
        let set = vec![
            Artist::new("1", "A").with_location("X").with_price(500, 1000),
            Artist::new("2", "B").with_location("Y").with_price(200, 800),
            Artist::new("3", "C").with_location("X").with_price(900, 7500),
        ];
        let facets = Facets::from_artists(&set);
        assert_eq!(facets.price_bounds, PriceSpan::new(200, 7500));
        assert_eq!(facets.locations, vec!["X", "Y"]);
    }
}
