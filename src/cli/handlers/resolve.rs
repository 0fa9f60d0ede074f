//! Note resolution utilities.

use anyhow::{Result, bail};

use crate::domain::{Note, NoteId};
use crate::store::{NoteStore, Resolution};

/// Prints the candidates sharing an ambiguous prefix.
pub(crate) fn print_ambiguous_notes(identifier: &str, notes: &[&Note]) {
    eprintln!("Ambiguous: '{}' matches {} notes:", identifier, notes.len());
    for note in notes {
        eprintln!("  {} - {} ({})", note.id(), note.title(), note.category());
    }
    eprintln!();
    eprintln!("Use a longer ID prefix to specify which note you mean.");
}

/// Resolves a full note id or a unique id prefix.
///
/// # Errors
///
/// Fails if nothing matches or if the prefix matches several notes.
pub fn resolve_note_id(store: &NoteStore, identifier: &str) -> Result<NoteId> {
    match store.resolve(identifier) {
        Resolution::Unique(note) => Ok(note.id().clone()),
        Resolution::Ambiguous(notes) => {
            print_ambiguous_notes(identifier, &notes);
            bail!("ambiguous note identifier");
        }
        Resolution::NotFound => bail!("note not found: '{}'", identifier),
    }
}
