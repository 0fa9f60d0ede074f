//! Category filter, substring search, and recency ordering.

use crate::domain::{ALL_CATEGORIES, Note};
use chrono::{DateTime, Utc};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Which category a listing is restricted to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every note, whatever its category (the "all" sentinel).
    #[default]
    All,
    /// Only notes whose category equals this name exactly (case-sensitive).
    Only(String),
}

impl CategoryFilter {
    pub fn only(name: impl Into<String>) -> Self {
        Self::Only(name.into())
    }

    /// Returns true if `note` passes the filter.
    pub fn matches(&self, note: &Note) -> bool {
        match self {
            Self::All => true,
            Self::Only(name) => note.category() == name,
        }
    }

    /// Returns true if the filter selects exactly the category `name`.
    pub fn selects(&self, name: &str) -> bool {
        matches!(self, Self::Only(selected) if selected == name)
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    /// `"all"` (after trimming) selects every category; anything else is
    /// an exact category name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == ALL_CATEGORIES {
            Ok(Self::All)
        } else {
            Ok(Self::Only(trimmed.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{}", ALL_CATEGORIES),
            Self::Only(name) => write!(f, "{}", name),
        }
    }
}

/// Sort key: most recently touched first, then most recently created.
/// Absent timestamps compare lower than any present one.
fn recency_key(note: &Note) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    (note.last_touched(), note.created_at())
}

/// Filters `notes` by category and search text, newest first.
///
/// Search text is trimmed; empty text matches everything, otherwise a note
/// matches when its title or content contains the text case-insensitively.
/// Notes with equal sort keys keep their collection order.
pub fn select_notes<'a>(
    notes: impl IntoIterator<Item = &'a Note>,
    filter: &CategoryFilter,
    search: &str,
) -> Vec<&'a Note> {
    let needle = search.trim().to_lowercase();

    let mut selected: Vec<&Note> = notes
        .into_iter()
        .filter(|n| filter.matches(n))
        .filter(|n| needle.is_empty() || n.matches_lowercase(&needle))
        .collect();

    // stable: ties keep insertion order
    selected.sort_by(|a, b| recency_key(b).cmp(&recency_key(a)));
    selected
}
