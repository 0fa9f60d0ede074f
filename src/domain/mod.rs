//! Core types: Note, NoteId, Category

mod category;
mod note;
mod note_id;

pub use category::{ALL_CATEGORIES, Category, ParseCategoryError, ParseCategoryErrorKind};
pub use note::{Note, NoteBuilder, ParseNoteError};
pub use note_id::{NoteId, ParseNoteIdError};
