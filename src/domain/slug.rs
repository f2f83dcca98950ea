// Copyright (c) 2025 - Cowboy AI, Inc.
//! Slug Value Object
//!
//! URL-safe short names used to identify sites, manufacturers, roles and
//! platforms.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Slug validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SlugError {
    #[error("Slug is empty")]
    Empty,

    #[error("Slug exceeds maximum length of 50 characters: {0}")]
    TooLong(usize),

    #[error("Invalid character in slug: {0:?}")]
    InvalidCharacter(char),
}

/// Slug value object
///
/// Invariants:
/// - Non-empty, at most 50 characters
/// - ASCII letters, digits, hyphens and underscores only
///
/// # Examples
///
/// ```rust
/// use dcim_inventory::domain::Slug;
///
/// let slug = Slug::new("juniper-ex4300").unwrap();
/// assert_eq!(slug.as_str(), "juniper-ex4300");
///
/// assert!(Slug::new("").is_err());
/// assert!(Slug::new("has space").is_err());
/// assert_eq!(Slug::slugify("Core Switch").as_str(), "core-switch");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    pub const MAX_LENGTH: usize = 50;

    pub fn new(slug: impl Into<String>) -> Result<Self, SlugError> {
        let slug = slug.into();

        if slug.is_empty() {
            return Err(SlugError::Empty);
        }

        if slug.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong(slug.len()));
        }

        if let Some(ch) = slug
            .chars()
            .find(|ch| !ch.is_ascii_alphanumeric() && *ch != '-' && *ch != '_')
        {
            return Err(SlugError::InvalidCharacter(ch));
        }

        Ok(Self(slug))
    }

    /// Derive a slug from a display name
    ///
    /// Lowercases, turns runs of other characters into single hyphens, trims
    /// hyphens from both ends and truncates to the maximum length. A name with
    /// no usable characters becomes `"unnamed"`.
    pub fn slugify(name: &str) -> Self {
        let mut slug = String::with_capacity(name.len());
        for ch in name.chars() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                slug.push(ch.to_ascii_lowercase());
            } else if !slug.ends_with('-') {
                slug.push('-');
            }
        }

        let mut slug = slug.trim_matches('-').to_string();
        slug.truncate(Self::MAX_LENGTH);
        let slug = slug.trim_end_matches('-').to_string();

        if slug.is_empty() {
            Self("unnamed".to_string())
        } else {
            Self(slug)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Slug {
    type Error = SlugError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}
