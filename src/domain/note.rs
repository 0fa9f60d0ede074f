//! Note struct representing a single reading note.

use crate::domain::NoteId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of error that occurred when constructing a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseNoteErrorKind {
    EmptyTitle,
}

/// Error returned when constructing an invalid note.
#[derive(Debug, Clone)]
pub struct ParseNoteError {
    kind: ParseNoteErrorKind,
}

impl fmt::Display for ParseNoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseNoteErrorKind::EmptyTitle => write!(f, "invalid note: title cannot be empty"),
        }
    }
}

impl std::error::Error for ParseNoteError {}

/// A reading note: the title of a work, a category label, and free-text
/// reflections.
///
/// # Fields
/// - `id`: Opaque unique identifier, immutable once assigned
/// - `title`: Title of the book or work (non-empty, trimmed)
/// - `category`: Category label; may name a category that no longer exists
/// - `content`: Free text, markdown by convention, opaque to the store
/// - `created_at` / `updated_at`: Millisecond timestamps. Notes made by the
///   store always carry both; imported notes may lack either.
///
/// # Examples
///
/// ```
/// use marginalia::domain::{Note, NoteId};
/// use chrono::Utc;
///
/// let note = Note::new(NoteId::generate(), "Dubliners", "Novel", "", Utc::now()).unwrap();
/// assert_eq!(note.title(), "Dubliners");
/// assert_eq!(note.created_at(), note.updated_at());
/// ```
#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    id: NoteId,
    title: String,
    category: String,
    content: String,
    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    created_at: Option<DateTime<Utc>>,
    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Creates a new note stamped with `now` as both creation and update time.
    /// The category is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if the title is empty or whitespace-only.
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        category: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, ParseNoteError> {
        let category: String = category.into();
        Note::builder(id, title)
            .category(category.trim())
            .content(content)
            .created_at(Some(now))
            .updated_at(Some(now))
            .build()
    }

    /// Creates a builder for constructing a Note with optional fields.
    pub fn builder(id: NoteId, title: impl Into<String>) -> NoteBuilder {
        NoteBuilder::new(id, title)
    }

    /// Returns the note's unique identifier.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the note's category label.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the note's content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the note was created, if known.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns when the note was last updated, if known.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the timestamp listings sort by: the update time, or the
    /// creation time when the note has never recorded an update.
    pub fn last_touched(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.created_at)
    }

    /// Returns true if the title or content contains `needle`, ignoring case.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }

    /// Replaces the editable fields and stamps the update time. Title and
    /// category are trimmed.
    ///
    /// The update time never moves backwards and never precedes creation.
    pub(crate) fn revise(
        &mut self,
        title: &str,
        category: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), ParseNoteError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ParseNoteError {
                kind: ParseNoteErrorKind::EmptyTitle,
            });
        }

        let category: String = category.into();
        let floor = self.updated_at.max(self.created_at);
        self.title = trimmed.to_string();
        self.category = category.trim().to_string();
        self.content = content.into();
        self.updated_at = Some(floor.map_or(now, |f| f.max(now)));
        Ok(())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.id.prefix())
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("category", &self.category)
            .field("content", &self.content)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Builder for constructing a Note with optional fields.
pub struct NoteBuilder {
    id: NoteId,
    title: String,
    category: String,
    content: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl NoteBuilder {
    fn new(id: NoteId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            category: String::new(),
            content: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Sets the note's category label. Stored verbatim.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the note's content. Stored verbatim.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets the creation timestamp.
    pub fn created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Sets the update timestamp.
    pub fn updated_at(mut self, updated_at: Option<DateTime<Utc>>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// Builds the Note.
    ///
    /// When both timestamps are set, an update time earlier than the
    /// creation time is raised to the creation time.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if the title is empty or whitespace-only.
    pub fn build(self) -> Result<Note, ParseNoteError> {
        let trimmed = self.title.trim();

        if trimmed.is_empty() {
            return Err(ParseNoteError {
                kind: ParseNoteErrorKind::EmptyTitle,
            });
        }

        let updated_at = match (self.created_at, self.updated_at) {
            (Some(created), Some(updated)) => Some(updated.max(created)),
            (_, updated) => updated,
        };

        Ok(Note {
            id: self.id,
            title: trimmed.to_string(),
            category: self.category,
            content: self.content,
            created_at: self.created_at,
            updated_at,
        })
    }
}

impl<'de> Deserialize<'de> for Note {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct NoteHelper {
            id: NoteId,
            title: String,
            #[serde(default)]
            category: String,
            #[serde(default)]
            content: String,
            #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
            created_at: Option<DateTime<Utc>>,
            #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
            updated_at: Option<DateTime<Utc>>,
        }

        let helper = NoteHelper::deserialize(deserializer)?;

        Note::builder(helper.id, helper.title)
            .category(helper.category)
            .content(helper.content)
            .created_at(helper.created_at)
            .updated_at(helper.updated_at)
            .build()
            .map_err(serde::de::Error::custom)
    }
}
