//! Change notification for presentation layers.

use crate::domain::NoteId;
use std::fmt;

/// A successful mutation of the note collection or the category list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    NoteCreated(NoteId),
    NoteUpdated(NoteId),
    NoteDeleted(NoteId),
    NotesImported { added: usize },
    CategoryAdded(String),
    CategoryRemoved(String),
}

/// Callback registered against a store.
pub type Subscriber = Box<dyn FnMut(&StoreEvent)>;

/// Ordered list of subscribers, notified after each persisted mutation.
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: Vec<Subscriber>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback. Callbacks run in registration order.
    pub fn subscribe(&mut self, callback: impl FnMut(&StoreEvent) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    pub fn notify(&mut self, event: &StoreEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
