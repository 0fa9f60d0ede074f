//! Export and additive import of the note collection.
//!
//! The exported document has the same shape as the persisted notes
//! document: a JSON array of note records with epoch-millisecond
//! timestamps. Import is an additive merge. Incoming records are appended
//! without any id deduplication, so importing an export into the store it
//! came from doubles every note.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::error::{StoreError, StoreResult};
use super::notes::NoteStore;
use crate::domain::{Note, NoteId};

/// File name suggested for exports.
pub const DEFAULT_EXPORT_FILENAME: &str = "reading-notes-export.json";

/// Outcome of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of records appended.
    pub added: usize,
    /// How many of them received a generated id.
    pub ids_assigned: usize,
}

/// A note-like record as accepted by import. Only `title` is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportRecord {
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    updated_at: Option<DateTime<Utc>>,
}

/// Serializes the notes, in collection order, as pretty-printed JSON.
pub fn export(notes: &[Note]) -> Vec<u8> {
    // Note serialization cannot fail: string keys, plain values.
    serde_json::to_vec_pretty(notes).unwrap_or_default()
}

/// Parses `bytes` and appends every record to `store`.
///
/// Records without an id (missing, null, or empty) get a fresh one; ids
/// that are present are kept verbatim even if they collide with existing
/// notes. The whole document is validated before anything is appended, and
/// the store persists once afterwards.
///
/// # Errors
///
/// Returns `StoreError::Format` if the payload is not UTF-8 JSON, the top
/// level is not an array, or any element is not a note-like record.
pub fn import(bytes: &[u8], store: &mut NoteStore) -> StoreResult<ImportSummary> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| StoreError::format(format!("document is not UTF-8: {e}")))?;
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);

    let document: Value = serde_json::from_str(text)
        .map_err(|e| StoreError::format(format!("document is not valid JSON: {e}")))?;

    let Value::Array(items) = document else {
        return Err(StoreError::format("expected an array of note records"));
    };

    let mut batch = Vec::with_capacity(items.len());
    let mut ids_assigned = 0;
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            return Err(StoreError::format(format!(
                "record {index} is not an object"
            )));
        }

        let record: ImportRecord = serde_json::from_value(item)
            .map_err(|e| StoreError::format(format!("record {index}: {e}")))?;

        let id = match record.id.as_deref().map(str::parse::<NoteId>) {
            Some(Ok(id)) => id,
            _ => {
                ids_assigned += 1;
                fresh_unique_id(store, &batch)
            }
        };

        let note = Note::builder(id, record.title)
            .category(record.category.unwrap_or_default())
            .content(record.content.unwrap_or_default())
            .created_at(record.created_at)
            .updated_at(record.updated_at)
            .build()
            .map_err(|e| StoreError::format(format!("record {index}: {e}")))?;
        batch.push(note);
    }

    let added = store.append_batch(batch);
    Ok(ImportSummary {
        added,
        ids_assigned,
    })
}

/// A generated id unused by the store and by the pending batch.
fn fresh_unique_id(store: &NoteStore, batch: &[Note]) -> NoteId {
    loop {
        let id = store.fresh_id();
        if batch.iter().all(|n| n.id() != &id) {
            return id;
        }
    }
}
