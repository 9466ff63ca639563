//! Filter configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;
use crate::model::{Category, PriceRange};

/// Full slider span, also the price bounds of an empty catalog
pub const DEFAULT_PRICE_SPAN: PriceSpan = PriceSpan { lo: 0, hi: 5000 };

/// Inclusive price interval used for overlap tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceSpan {
    pub lo: u32,
    pub hi: u32,
}

impl PriceSpan {
    pub const fn new(lo: u32, hi: u32) -> Self {
        Self { lo, hi }
    }

    /// True when `range` and this span share at least one price
    ///
    /// Inverted spans (`lo > hi`) overlap nothing whose own range is
    /// ordered.
    pub fn overlaps(&self, range: &PriceRange) -> bool {
        range.min <= self.hi && range.max >= self.lo
    }
}

impl Default for PriceSpan {
    fn default() -> Self {
        DEFAULT_PRICE_SPAN
    }
}

/// Category constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// No category constraint
    #[default]
    Any,
    Only(Category),
}

impl FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" | "any" => Ok(CategoryFilter::Any),
            other => other.parse().map(CategoryFilter::Only),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

/// The three-predicate filter descriptor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterConfig {
    pub category: CategoryFilter,
    /// Location substring; empty means no constraint
    pub location: String,
    pub price: PriceSpan,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_price(mut self, lo: u32, hi: u32) -> Self {
        self.price = PriceSpan::new(lo, hi);
        self
    }

    /// Merge the fields set in `patch`
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
    }
}

/// Partial update of a [`FilterConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterPatch {
    pub category: Option<CategoryFilter>,
    pub location: Option<String>,
    pub price: Option<PriceSpan>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn price(mut self, lo: u32, hi: u32) -> Self {
        self.price = Some(PriceSpan::new(lo, hi));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.location.is_none() && self.price.is_none()
    }
}
