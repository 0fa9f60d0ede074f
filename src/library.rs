//! Session facade tying the note store, the category registry, and the
//! active view together.

use log::debug;
use std::rc::Rc;

use crate::domain::{Category, Note};
use crate::infra::{Clock, PersistenceAdapter, SystemClock};
use crate::store::{CategoryFilter, CategoryRegistry, NoteStore, StoreResult};

/// One open library: its notes, its categories, and what the user is
/// currently looking at.
#[derive(Debug)]
pub struct Library {
    notes: NoteStore,
    categories: CategoryRegistry,
    filter: CategoryFilter,
    search: String,
}

impl Library {
    /// Opens both documents with the built-in default categories.
    pub fn open(persistence: PersistenceAdapter) -> Self {
        Self::open_with(persistence, Vec::new(), Rc::new(SystemClock))
    }

    /// Opens both documents with explicit defaults and clock.
    ///
    /// An empty `defaults` list means the built-in defaults.
    pub fn open_with(
        persistence: PersistenceAdapter,
        defaults: Vec<Category>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let categories = CategoryRegistry::open_with_defaults(persistence.clone(), defaults);
        let notes = NoteStore::open_with_clock(persistence, clock);
        Self {
            notes,
            categories,
            filter: CategoryFilter::All,
            search: String::new(),
        }
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut NoteStore {
        &mut self.notes
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn categories_mut(&mut self) -> &mut CategoryRegistry {
        &mut self.categories
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// The notes the active view shows, newest first.
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.notes.query(&self.filter, &self.search)
    }

    /// Removes a custom category and resets the active filter to "all" if it
    /// pointed at the removed category.
    pub fn remove_category(&mut self, name: &str) -> StoreResult<()> {
        self.categories.remove(name)?;
        if self.filter.selects(name.trim()) {
            debug!("event=filter_reset removed={}", name.trim());
            self.filter = CategoryFilter::All;
        }
        Ok(())
    }
}
