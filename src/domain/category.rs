//! Category label type used to group notes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name that selects every category when used as a filter.
///
/// It can never be used as a category name itself.
pub const ALL_CATEGORIES: &str = "all";

/// The kind of error that occurred when parsing a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseCategoryErrorKind {
    /// The name is empty or whitespace-only.
    Empty,
    /// The name collides with the "all" filter sentinel.
    Reserved,
}

/// Error returned when parsing an invalid category name.
#[derive(Debug, Clone)]
pub struct ParseCategoryError {
    kind: ParseCategoryErrorKind,
    value: String,
}

impl ParseCategoryError {
    /// Returns what was wrong with the name.
    pub fn kind(&self) -> ParseCategoryErrorKind {
        self.kind
    }

    /// Returns the invalid value that caused this error.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseCategoryErrorKind::Empty => write!(f, "category name cannot be empty"),
            ParseCategoryErrorKind::Reserved => write!(
                f,
                "category name '{}' is reserved for the all-categories filter",
                self.value
            ),
        }
    }
}

impl std::error::Error for ParseCategoryError {}

/// A category label for grouping notes.
///
/// Categories are flat, case-sensitive names. Surrounding whitespace is
/// trimmed; the remaining name must be non-empty and must not be the
/// reserved [`ALL_CATEGORIES`] sentinel.
///
/// # Examples
///
/// ```
/// use marginalia::domain::Category;
///
/// let cat = Category::new("  Poetry ").unwrap();
/// assert_eq!(cat.as_str(), "Poetry");
///
/// // Case matters
/// assert_ne!(cat, Category::new("poetry").unwrap());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Category(String);

impl Category {
    /// Creates a new Category from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseCategoryError` if:
    /// - The name is empty or whitespace-only
    /// - The name is the reserved "all" sentinel
    pub fn new(s: &str) -> Result<Self, ParseCategoryError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ParseCategoryError {
                kind: ParseCategoryErrorKind::Empty,
                value: s.to_string(),
            });
        }

        if trimmed == ALL_CATEGORIES {
            return Err(ParseCategoryError {
                kind: ParseCategoryErrorKind::Reserved,
                value: trimmed.to_string(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the category name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category(\"{}\")", self.0)
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl PartialEq<str> for Category {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
