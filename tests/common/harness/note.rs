//! Builder for test notes with sensible defaults.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use marginalia::domain::{Note, NoteId};

/// Builder for creating test notes with sensible defaults.
///
/// Automatically generates an ID and timestamps, with a fluent API
/// for setting optional fields.
#[derive(Debug)]
pub struct TestNote {
    id: NoteId,
    title: String,
    category: String,
    content: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl TestNote {
    /// Creates a new test note with the given title, filed under "Novel".
    pub fn new(title: impl Into<String>) -> Self {
        let now = DateTime::from_timestamp_millis(Utc::now().timestamp_millis());
        Self {
            id: NoteId::generate(),
            title: title.into(),
            category: "Novel".to_string(),
            content: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets an explicit ID for the note.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into().parse().expect("Invalid NoteId");
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets both timestamps.
    pub fn at(mut self, when: DateTime<Utc>) -> Self {
        self.created_at = Some(when);
        self.updated_at = Some(when);
        self
    }

    pub fn updated(mut self, when: DateTime<Utc>) -> Self {
        self.updated_at = Some(when);
        self
    }

    /// Returns the full ID.
    pub fn id_str(&self) -> String {
        self.id.to_string()
    }

    /// Returns the 10-character ID prefix.
    pub fn id_prefix(&self) -> String {
        self.id.prefix().to_string()
    }

    /// Converts to a domain Note.
    pub fn to_note(&self) -> Note {
        Note::builder(self.id.clone(), self.title.clone())
            .category(self.category.clone())
            .content(self.content.clone())
            .created_at(self.created_at)
            .updated_at(self.updated_at)
            .build()
            .expect("Failed to build test note")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_defaults() {
        let note = TestNote::new("Walden").to_note();
        assert_eq!(note.title(), "Walden");
        assert_eq!(note.category(), "Novel");
        assert_eq!(note.created_at(), note.updated_at());
    }

    #[test]
    fn test_note_explicit_fields() {
        let when = crate::common::datetime("2024-03-01T08:00:00Z");
        let note = TestNote::new("Walden")
            .id("x1")
            .category("Essay")
            .content("woods")
            .at(when)
            .to_note();
        assert_eq!(note.id().as_str(), "x1");
        assert_eq!(note.category(), "Essay");
        assert_eq!(note.content(), "woods");
        assert_eq!(note.created_at(), Some(when));
    }
}
