//! The note store: notes, categories, query, import/export, change events

mod categories;
pub mod codec;
mod error;
mod events;
mod notes;
mod query;

pub use categories::{CategoryRegistry, DEFAULT_CATEGORIES};
pub use codec::{DEFAULT_EXPORT_FILENAME, ImportSummary};
pub use error::{StoreError, StoreResult};
pub use events::{ChangeNotifier, StoreEvent, Subscriber};
pub use notes::{NoteStore, Resolution};
pub use query::{CategoryFilter, select_notes};
