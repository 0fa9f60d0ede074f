//! Persistence backends, clock, logging setup

mod clock;
mod logging;
mod persistence;

pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::init_logging;
pub use persistence::{
    CATEGORIES_KEY, FileStore, KeyValueStore, MemoryStore, NOTES_KEY, PersistenceAdapter,
    StorageError,
};
