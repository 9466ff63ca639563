//! Artist record
//!
//! An artist is the single entity in the catalog. Categories and languages
//! come from closed vocabularies; everything else is free text except the
//! price range.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Identifier prefix for artists submitted during this process lifetime
pub const SESSION_PREFIX: &str = "session-";

/// Build the identifier of the `seq`-th session submission
pub fn session_id(seq: u64) -> String {
    format!("{}{}", SESSION_PREFIX, seq)
}

/// An artist in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    /// Unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Category tags
    pub categories: Vec<Category>,

    /// Free-text location, e.g. "New York"
    pub location: String,

    /// Booking fee range
    pub price_range: PriceRange,

    /// Biography
    #[serde(default)]
    pub bio: String,

    /// Image URI, omitted when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Spoken languages
    #[serde(default)]
    pub languages: Vec<Language>,
}

/// Inclusive booking fee range, `min <= max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl PriceRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

impl Artist {
    /// Create an artist with the given ID and name; other fields empty
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            categories: Vec::new(),
            location: String::new(),
            price_range: PriceRange::new(0, 0),
            bio: String::new(),
            image: None,
            languages: Vec::new(),
        }
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_price(mut self, min: u32, max: u32) -> Self {
        self.price_range = PriceRange::new(min, max);
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_languages(mut self, languages: impl IntoIterator<Item = Language>) -> Self {
        self.languages = languages.into_iter().collect();
        self
    }

    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// True for artists submitted this session (never persisted)
    pub fn is_session(&self) -> bool {
        self.id.starts_with(SESSION_PREFIX)
    }
}

/// Performer category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Singer,
    Dj,
    Band,
    Comedian,
    Dancer,
    Magician,
    Instrumentalist,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Singer,
        Category::Dj,
        Category::Band,
        Category::Comedian,
        Category::Dancer,
        Category::Magician,
        Category::Instrumentalist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Singer => "singer",
            Category::Dj => "dj",
            Category::Band => "band",
            Category::Comedian => "comedian",
            Category::Dancer => "dancer",
            Category::Magician => "magician",
            Category::Instrumentalist => "instrumentalist",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownVariant {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Spoken language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Mandarin,
    Japanese,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Portuguese,
        Language::Mandarin,
        Language::Japanese,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
            Language::French => "french",
            Language::German => "german",
            Language::Italian => "italian",
            Language::Portuguese => "portuguese",
            Language::Mandarin => "mandarin",
            Language::Japanese => "japanese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownVariant {
                kind: "language",
                value: s.to_string(),
            })
    }
}
