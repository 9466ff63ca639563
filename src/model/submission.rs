//! Onboarding form submissions

use serde::{Deserialize, Serialize};

use super::artist::{Artist, Category, Language, PriceRange};
use crate::validation::collapse_whitespace;

/// A validated onboarding form, not yet assigned an identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub name: String,
    pub categories: Vec<Category>,
    pub location: String,
    pub price_range: PriceRange,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub languages: Vec<Language>,
}

impl Submission {
    /// Turn the submission into an artist record with the given ID
    pub fn into_artist(self, id: impl Into<String>) -> Artist {
        Artist {
            id: id.into(),
            name: collapse_whitespace(&self.name),
            categories: distinct(self.categories),
            location: collapse_whitespace(&self.location),
            price_range: self.price_range,
            bio: self.bio.trim().to_string(),
            image: self.image.filter(|uri| !uri.trim().is_empty()),
            languages: distinct(self.languages),
        }
    }
}

/// Drop repeated tags, keeping first-seen order
fn distinct<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
