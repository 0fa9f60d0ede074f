//! Opaque note identifier with ULID generation and serde support.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Number of characters shown when an id is abbreviated.
const PREFIX_LEN: usize = 10;

/// A unique identifier for notes.
///
/// Ids are opaque tokens. Fresh ids are ULIDs (26-character Crockford
/// Base32, lexicographically sortable by creation time), but ids that
/// arrive through import are kept verbatim whatever their shape, so the
/// type only guarantees a non-blank string.
///
/// # Examples
///
/// ```
/// use marginalia::domain::NoteId;
///
/// let id = NoteId::generate();
/// assert_eq!(id.as_str().len(), 26);
///
/// let imported: NoteId = "n_lx2k9a3f".parse().unwrap();
/// assert_eq!(imported.as_str(), "n_lx2k9a3f");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NoteId(String);

impl NoteId {
    /// Creates a fresh id from the current time.
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the abbreviated form shown in listings.
    ///
    /// For generated ids the first 10 characters encode the full 48-bit
    /// millisecond timestamp, which keeps prefixes distinct in practice.
    pub fn prefix(&self) -> &str {
        match self.0.char_indices().nth(PREFIX_LEN) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId(\"{}\")", self.0)
    }
}

/// Error returned when parsing a blank note id.
#[derive(Debug, Clone)]
pub struct ParseNoteIdError {
    value: String,
}

impl ParseNoteIdError {
    /// Returns the invalid value that caused this error.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseNoteIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid note id '{}': id cannot be blank", self.value)
    }
}

impl std::error::Error for ParseNoteIdError {}

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseNoteIdError {
                value: s.to_string(),
            });
        }
        Ok(Self(s.to_string()))
    }
}

impl Serialize for NoteId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
