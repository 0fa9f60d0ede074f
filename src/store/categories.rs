//! Ordered category list with protected defaults.

use log::{debug, info};

use super::error::{StoreError, StoreResult};
use super::events::{ChangeNotifier, StoreEvent};
use crate::domain::Category;
use crate::infra::{CATEGORIES_KEY, PersistenceAdapter};

/// Categories every fresh library starts with.
pub const DEFAULT_CATEGORIES: &[&str] = &["Novel", "Poetry", "Essay", "Miscellany"];

/// Owns the ordered category list: defaults first, then custom additions
/// in the order they were added.
///
/// Removing a category never touches notes; notes keep the stale name.
pub struct CategoryRegistry {
    categories: Vec<Category>,
    default_count: usize,
    persistence: PersistenceAdapter,
    notifier: ChangeNotifier,
}

impl CategoryRegistry {
    /// Loads the categories document on top of [`DEFAULT_CATEGORIES`].
    pub fn open(persistence: PersistenceAdapter) -> Self {
        let defaults = DEFAULT_CATEGORIES
            .iter()
            .filter_map(|name| Category::new(name).ok())
            .collect();
        Self::open_with_defaults(persistence, defaults)
    }

    /// Loads the categories document on top of the given defaults.
    ///
    /// Duplicate defaults are collapsed. An empty default list falls back
    /// to [`DEFAULT_CATEGORIES`] so the registry is never empty. Stored
    /// names that are blank, reserved, repeated, or already defaults are
    /// skipped; a missing or malformed document contributes nothing.
    pub fn open_with_defaults(persistence: PersistenceAdapter, defaults: Vec<Category>) -> Self {
        let mut categories: Vec<Category> = Vec::new();
        for category in defaults {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        if categories.is_empty() {
            return Self::open(persistence);
        }
        let default_count = categories.len();

        let stored: Vec<String> = persistence.load_json(CATEGORIES_KEY).unwrap_or_default();
        for name in &stored {
            if let Ok(category) = Category::new(name) {
                if !categories.contains(&category) {
                    categories.push(category);
                }
            }
        }
        debug!(
            "event=categories_load defaults={} custom={}",
            default_count,
            categories.len() - default_count
        );

        Self {
            categories,
            default_count,
            persistence,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Registers a change callback.
    pub fn subscribe(&mut self, callback: impl FnMut(&StoreEvent) + 'static) {
        self.notifier.subscribe(callback);
    }

    /// Returns every category: defaults first, then custom ones in add order.
    pub fn list(&self) -> &[Category] {
        &self.categories
    }

    /// Returns the default categories.
    pub fn defaults(&self) -> &[Category] {
        &self.categories[..self.default_count]
    }

    /// Returns the user-added categories.
    pub fn custom(&self) -> &[Category] {
        &self.categories[self.default_count..]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    pub fn is_default(&self, name: &str) -> bool {
        self.defaults().iter().any(|c| c == name)
    }

    /// Returns the first default, used for new drafts.
    pub fn first(&self) -> &Category {
        &self.categories[0]
    }

    /// Adds a custom category.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if the trimmed name is empty or the
    /// reserved "all" sentinel, and `StoreError::Duplicate` if a category
    /// with the same trimmed name exists.
    pub fn add(&mut self, name: &str) -> StoreResult<Category> {
        let category = Category::new(name).map_err(|e| StoreError::validation(e.to_string()))?;

        if self.categories.contains(&category) {
            return Err(StoreError::Duplicate {
                name: category.to_string(),
            });
        }

        self.categories.push(category.clone());
        self.persist();
        info!("event=category_add name={}", category);
        self.notifier
            .notify(&StoreEvent::CategoryAdded(category.to_string()));
        Ok(category)
    }

    /// Removes a custom category. Notes filed under it are left alone.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ProtectedCategory` for defaults and
    /// `StoreError::CategoryNotFound` if no such category exists.
    pub fn remove(&mut self, name: &str) -> StoreResult<()> {
        let name = name.trim();
        if self.is_default(name) {
            return Err(StoreError::ProtectedCategory {
                name: name.to_string(),
            });
        }

        let position = self
            .categories
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| StoreError::CategoryNotFound {
                name: name.to_string(),
            })?;

        self.categories.remove(position);
        self.persist();
        info!("event=category_remove name={}", name);
        self.notifier
            .notify(&StoreEvent::CategoryRemoved(name.to_string()));
        Ok(())
    }

    fn persist(&self) {
        let names: Vec<&str> = self.categories.iter().map(|c| c.as_str()).collect();
        self.persistence.save_json(CATEGORIES_KEY, &names);
    }
}

impl std::fmt::Debug for CategoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryRegistry")
            .field("categories", &self.categories)
            .field("default_count", &self.default_count)
            .finish()
    }
}
