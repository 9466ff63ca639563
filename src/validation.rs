//! Input validation for onboarding submissions
//!
//! Submissions come straight from a public form, so every free-text field
//! is length-bounded and the price range must be ordered before the record
//! is allowed into the catalog.

use thiserror::Error;

use crate::model::{PriceRange, Submission};

/// Validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{0}' cannot be empty")]
    Empty(&'static str),

    #[error("'{0}' is too long (max {1} characters)")]
    TooLong(&'static str, usize),

    #[error("price range is inverted: min {min} is greater than max {max}")]
    InvertedPriceRange { min: u32, max: u32 },

    #[error("price {0} exceeds the maximum of {1}")]
    PriceTooHigh(u32, u32),

    #[error("image '{0}' must be an http(s) URL or an absolute path")]
    InvalidImage(String),
}

impl ValidationError {
    /// Name of the form field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Empty(field) | ValidationError::TooLong(field, _) => field,
            ValidationError::InvertedPriceRange { .. } | ValidationError::PriceTooHigh(..) => {
                "priceRange"
            }
            ValidationError::InvalidImage(_) => "image",
        }
    }
}

/// Maximum length for names and locations
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for a biography
pub const MAX_BIO_LENGTH: usize = 2000;

/// Upper bound for a booking fee
pub const MAX_PRICE: u32 = 1_000_000;

/// Validate a whole submission, reporting the first failing field
pub fn validate_submission(submission: &Submission) -> Result<(), ValidationError> {
    validate_text(&submission.name, "name", MAX_NAME_LENGTH)?;

    if submission.categories.is_empty() {
        return Err(ValidationError::Empty("categories"));
    }

    validate_text(&submission.location, "location", MAX_NAME_LENGTH)?;
    validate_price_range(&submission.price_range)?;

    if submission.bio.chars().count() > MAX_BIO_LENGTH {
        return Err(ValidationError::TooLong("bio", MAX_BIO_LENGTH));
    }

    if let Some(ref image) = submission.image {
        validate_image(image)?;
    }

    if submission.languages.is_empty() {
        return Err(ValidationError::Empty("languages"));
    }

    Ok(())
}

/// Validate a required, length-bounded text field
pub fn validate_text(value: &str, field: &'static str, max: usize) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong(field, max));
    }
    Ok(())
}

/// Validate a booking fee range
pub fn validate_price_range(range: &PriceRange) -> Result<(), ValidationError> {
    if range.min > range.max {
        return Err(ValidationError::InvertedPriceRange {
            min: range.min,
            max: range.max,
        });
    }
    if range.max > MAX_PRICE {
        return Err(ValidationError::PriceTooHigh(range.max, MAX_PRICE));
    }
    Ok(())
}

/// Validate an image reference
///
/// An empty string counts as "no image" and passes.
pub fn validate_image(image: &str) -> Result<(), ValidationError> {
    let image = image.trim();
    if image.is_empty() {
        return Ok(());
    }

    let allowed = image.starts_with("https://")
        || image.starts_with("http://")
        || (image.starts_with('/') && !image.contains(".."));

    if allowed {
        Ok(())
    } else {
        Err(ValidationError::InvalidImage(image.to_string()))
    }
}

/// Trim and collapse internal runs of whitespace to a single space
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
