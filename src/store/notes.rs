//! The note collection and its create/update/delete/query operations.

use log::{debug, info, warn};
use serde_json::Value;
use std::rc::Rc;

use super::error::{StoreError, StoreResult};
use super::events::{ChangeNotifier, StoreEvent};
use super::query::{CategoryFilter, select_notes};
use crate::domain::{Note, NoteId};
use crate::infra::{Clock, NOTES_KEY, PersistenceAdapter, SystemClock};

/// Result of resolving a user-typed note identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// Exactly one note matched.
    Unique(&'a Note),
    /// Several distinct ids share the prefix.
    Ambiguous(Vec<&'a Note>),
    /// No note matched.
    NotFound,
}

/// Owns the note collection.
///
/// Every mutation is written through to the [`PersistenceAdapter`] before
/// the call returns, then announced to subscribers.
pub struct NoteStore {
    notes: Vec<Note>,
    persistence: PersistenceAdapter,
    clock: Rc<dyn Clock>,
    notifier: ChangeNotifier,
}

impl NoteStore {
    /// Loads the notes document using the system clock.
    ///
    /// A missing, unreadable, or malformed document yields an empty store.
    pub fn open(persistence: PersistenceAdapter) -> Self {
        Self::open_with_clock(persistence, Rc::new(SystemClock))
    }

    /// Loads the notes document with an explicit clock.
    pub fn open_with_clock(persistence: PersistenceAdapter, clock: Rc<dyn Clock>) -> Self {
        let notes = load_notes(&persistence);
        debug!("event=notes_load count={}", notes.len());
        Self {
            notes,
            persistence,
            clock,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Registers a change callback.
    pub fn subscribe(&mut self, callback: impl FnMut(&StoreEvent) + 'static) {
        self.notifier.subscribe(callback);
    }

    /// Returns every note in collection order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Returns the first note with `id`.
    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id() == id)
    }

    /// Creates a note and appends it to the collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if the trimmed title is empty.
    pub fn create(&mut self, title: &str, category: &str, content: &str) -> StoreResult<Note> {
        if title.trim().is_empty() {
            return Err(StoreError::validation("title cannot be empty"));
        }

        let id = self.fresh_id();
        let note = Note::new(id, title, category, content, self.clock.now())
            .map_err(|e| StoreError::validation(e.to_string()))?;

        self.notes.push(note.clone());
        self.persist();
        info!("event=note_create id={} category={}", note.id(), note.category());
        self.notifier.notify(&StoreEvent::NoteCreated(note.id().clone()));
        Ok(note)
    }

    /// Replaces a note's title, category, and content.
    ///
    /// The id and creation time never change; the update time moves to now
    /// (or stays put if the clock went backwards).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no note has `id`, then
    /// `StoreError::Validation` if the trimmed title is empty.
    pub fn update(
        &mut self,
        id: &NoteId,
        title: &str,
        category: &str,
        content: &str,
    ) -> StoreResult<Note> {
        let now = self.clock.now();
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id() == id)
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })?;

        note.revise(title, category, content, now)
            .map_err(|e| StoreError::validation(e.to_string()))?;
        let updated = note.clone();

        self.persist();
        info!("event=note_update id={}", id);
        self.notifier.notify(&StoreEvent::NoteUpdated(id.clone()));
        Ok(updated)
    }

    /// Removes the note with `id`. Returns false, changing nothing, if no
    /// such note exists.
    pub fn delete(&mut self, id: &NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id() != id);
        if self.notes.len() == before {
            debug!("event=note_delete id={} status=not_found", id);
            return false;
        }

        self.persist();
        info!("event=note_delete id={} removed={}", id, before - self.notes.len());
        self.notifier.notify(&StoreEvent::NoteDeleted(id.clone()));
        true
    }

    /// Returns the notes passing `filter` and `search`, newest first.
    ///
    /// See [`select_notes`] for the matching and ordering rules.
    pub fn query(&self, filter: &CategoryFilter, search: &str) -> Vec<&Note> {
        select_notes(&self.notes, filter, search)
    }

    /// Resolves an exact id or an unambiguous id prefix.
    pub fn resolve(&self, identifier: &str) -> Resolution<'_> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Resolution::NotFound;
        }

        if let Some(note) = self.notes.iter().find(|n| n.id().as_str() == identifier) {
            return Resolution::Unique(note);
        }

        let mut candidates: Vec<&Note> = Vec::new();
        for note in &self.notes {
            let seen = candidates.iter().any(|c| c.id() == note.id());
            if note.id().as_str().starts_with(identifier) && !seen {
                candidates.push(note);
            }
        }

        match candidates.len() {
            0 => Resolution::NotFound,
            1 => Resolution::Unique(candidates[0]),
            _ => Resolution::Ambiguous(candidates),
        }
    }

    /// Appends already-built notes as one batch, persisting once.
    ///
    /// No id deduplication happens here; that is the additive merge the
    /// import path relies on.
    pub(crate) fn append_batch(&mut self, batch: Vec<Note>) -> usize {
        let added = batch.len();
        self.notes.extend(batch);
        self.persist();
        info!("event=notes_import added={} total={}", added, self.notes.len());
        self.notifier.notify(&StoreEvent::NotesImported { added });
        added
    }

    /// Generates an id not used by any live note.
    pub(crate) fn fresh_id(&self) -> NoteId {
        loop {
            let id = NoteId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&self) {
        self.persistence.save_json(NOTES_KEY, &self.notes);
    }
}

/// Reads the notes document record by record.
///
/// A record that is not a valid note is logged and skipped, so one bad
/// entry never hides the rest of the collection.
fn load_notes(persistence: &PersistenceAdapter) -> Vec<Note> {
    let records: Vec<Value> = persistence.load_json(NOTES_KEY).unwrap_or_default();
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Note>(record) {
            Ok(note) => Some(note),
            Err(err) => {
                warn!("event=notes_load index={} status=skipped error={}", index, err);
                None
            }
        })
        .collect()
}

impl std::fmt::Debug for NoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteStore")
            .field("notes", &self.notes.len())
            .field("notifier", &self.notifier)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{FixedClock, MemoryStore};
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    struct Fixture {
        backend: Rc<MemoryStore>,
        clock: Rc<FixedClock>,
        store: NoteStore,
    }

    fn fixture() -> Fixture {
        let backend = Rc::new(MemoryStore::new());
        let clock = Rc::new(FixedClock::at_millis(1_700_000_000_000));
        let store =
            NoteStore::open_with_clock(PersistenceAdapter::new(backend.clone()), clock.clone());
        Fixture {
            backend,
            clock,
            store,
        }
    }

    fn stored_notes(backend: &MemoryStore) -> Vec<Note> {
        serde_json::from_str(&backend.raw(NOTES_KEY).expect("notes written")).unwrap()
    }

    // ===========================================
    // Loading
    // ===========================================

    #[test]
    fn open_missing_document_is_empty() {
        let fx = fixture();
        assert!(fx.store.is_empty());
    }

    #[test]
    fn open_corrupt_document_is_empty() {
        let backend = Rc::new(MemoryStore::new());
        backend.insert(NOTES_KEY, "[{\"id\": ");
        let store = NoteStore::open(PersistenceAdapter::new(backend));
        assert!(store.is_empty());
    }

    #[test]
    fn open_wrong_shape_is_empty() {
        let backend = Rc::new(MemoryStore::new());
        backend.insert(NOTES_KEY, "{\"notes\": []}");
        let store = NoteStore::open(PersistenceAdapter::new(backend));
        assert!(store.is_empty());
    }

    #[test]
    fn open_reads_existing_document() {
        let backend = Rc::new(MemoryStore::new());
        backend.insert(
            NOTES_KEY,
            r#"[{"id":"n_1","title":"Walden","category":"Essay","content":"","createdAt":1,"updatedAt":2}]"#,
        );
        let store = NoteStore::open(PersistenceAdapter::new(backend));
        assert_eq!(store.len(), 1);
        assert_eq!(store.notes()[0].title(), "Walden");
    }

    #[test]
    fn open_skips_unreadable_records_and_keeps_the_rest() {
        let backend = Rc::new(MemoryStore::new());
        backend.insert(
            NOTES_KEY,
            r#"[{"id":"n_1","title":"Walden"},{"id":"n_2","title":"Dubliners"},{"id":"n_3","content":"untitled"},{"id":4,"title":"Numeric"}]"#,
        );
        let mut store = NoteStore::open(PersistenceAdapter::new(backend.clone()));
        assert_eq!(store.len(), 2);

        store.create("New", "Novel", "").unwrap();

        let titles: Vec<String> = stored_notes(&backend)
            .iter()
            .map(|n| n.title().to_string())
            .collect();
        assert_eq!(titles, vec!["Walden", "Dubliners", "New"]);
    }

    // ===========================================
    // create
    // ===========================================

    #[test]
    fn create_assigns_id_and_equal_timestamps() {
        let mut fx = fixture();
        let note = fx.store.create("Dubliners", "Novel", "stories").unwrap();

        assert_eq!(note.created_at(), note.updated_at());
        assert_eq!(note.created_at(), Some(fx.clock.now()));
        assert_eq!(fx.store.len(), 1);
        assert_eq!(fx.store.get(note.id()), Some(&note));
    }

    #[test]
    fn create_persists_immediately() {
        let mut fx = fixture();
        let note = fx.store.create("Dubliners", "Novel", "").unwrap();
        assert_eq!(stored_notes(&fx.backend), vec![note]);
    }

    #[test]
    fn create_rejects_blank_title() {
        let mut fx = fixture();
        let err = fx.store.create("   ", "Novel", "").unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }));
        assert!(fx.store.is_empty());
        assert_eq!(fx.backend.raw(NOTES_KEY), None);
    }

    #[test]
    fn create_and_update_trim_category() {
        let mut fx = fixture();
        let note = fx.store.create("Leaves of Grass", " Poetry ", "").unwrap();
        assert_eq!(note.category(), "Poetry");
        assert_eq!(fx.store.query(&CategoryFilter::only("Poetry"), "").len(), 1);

        let updated = fx
            .store
            .update(note.id(), "Leaves of Grass", "Essay\n", "")
            .unwrap();
        assert_eq!(updated.category(), "Essay");
    }

    #[test]
    fn create_ids_are_unique() {
        let mut fx = fixture();
        let a = fx.store.create("A", "Novel", "").unwrap();
        let b = fx.store.create("B", "Novel", "").unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn create_survives_write_failure() {
        let mut fx = fixture();
        fx.backend.fail_writes(true);
        let note = fx.store.create("Kept in memory", "Novel", "").unwrap();
        assert_eq!(fx.store.get(note.id()).map(|n| n.title()), Some("Kept in memory"));
        assert_eq!(fx.backend.raw(NOTES_KEY), None);
    }

    // ===========================================
    // update
    // ===========================================

    #[test]
    fn update_keeps_id_and_created() {
        let mut fx = fixture();
        let original = fx.store.create("Old", "Novel", "a").unwrap();
        fx.clock.advance(Duration::seconds(5));

        let updated = fx
            .store
            .update(original.id(), "New", "Poetry", "b")
            .unwrap();

        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.created_at(), original.created_at());
        assert_eq!(updated.updated_at(), Some(fx.clock.now()));
        assert_eq!(updated.category(), "Poetry");
        assert_eq!(stored_notes(&fx.backend), vec![updated]);
    }

    #[test]
    fn update_with_clock_skew_does_not_go_backwards() {
        let mut fx = fixture();
        let original = fx.store.create("T", "Novel", "").unwrap();
        fx.clock.advance(Duration::seconds(-30));

        let updated = fx.store.update(original.id(), "T2", "Novel", "").unwrap();
        assert_eq!(updated.updated_at(), original.updated_at());
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut fx = fixture();
        let id: NoteId = "missing".parse().unwrap();
        let err = fx.store.update(&id, "T", "Novel", "").unwrap_err();
        assert_eq!(err, StoreError::NotFound { id });
    }

    #[test]
    fn update_not_found_wins_over_validation() {
        let mut fx = fixture();
        let id: NoteId = "missing".parse().unwrap();
        let err = fx.store.update(&id, "", "Novel", "").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn update_blank_title_changes_nothing() {
        let mut fx = fixture();
        let original = fx.store.create("T", "Novel", "a").unwrap();
        let err = fx.store.update(original.id(), " ", "Poetry", "b").unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }));
        assert_eq!(fx.store.get(original.id()), Some(&original));
    }

    // ===========================================
    // delete
    // ===========================================

    #[test]
    fn delete_removes_exactly_that_note() {
        let mut fx = fixture();
        let a = fx.store.create("A", "Novel", "").unwrap();
        let b = fx.store.create("B", "Novel", "").unwrap();

        assert!(fx.store.delete(a.id()));
        assert_eq!(fx.store.notes(), &[b.clone()]);
        assert_eq!(stored_notes(&fx.backend), vec![b]);
    }

    #[test]
    fn delete_unknown_is_noop() {
        let mut fx = fixture();
        fx.store.create("A", "Novel", "").unwrap();
        let before = fx.backend.raw(NOTES_KEY);

        assert!(!fx.store.delete(&"ghost".parse().unwrap()));
        assert_eq!(fx.store.len(), 1);
        assert_eq!(fx.backend.raw(NOTES_KEY), before);
    }

    // ===========================================
    // query / resolve
    // ===========================================

    #[test]
    fn query_all_returns_newest_first() {
        let mut fx = fixture();
        let a = fx.store.create("A", "Novel", "").unwrap();
        fx.clock.advance(Duration::seconds(1));
        let b = fx.store.create("B", "Poetry", "").unwrap();
        fx.clock.advance(Duration::seconds(1));
        fx.store.update(a.id(), "A2", "Novel", "").unwrap();

        let ids: Vec<_> = fx
            .store
            .query(&CategoryFilter::All, "")
            .iter()
            .map(|n| n.id().clone())
            .collect();
        assert_eq!(ids, vec![a.id().clone(), b.id().clone()]);
    }

    #[test]
    fn query_same_millisecond_keeps_insertion_order() {
        let mut fx = fixture();
        let a = fx.store.create("A", "Novel", "").unwrap();
        let b = fx.store.create("B", "Novel", "").unwrap();
        let listed = fx.store.query(&CategoryFilter::All, "");
        assert_eq!(listed, vec![&a, &b]);
    }

    #[test]
    fn resolve_exact_and_prefix() {
        let mut fx = fixture();
        let note = fx.store.create("A", "Novel", "").unwrap();

        assert_eq!(fx.store.resolve(note.id().as_str()), Resolution::Unique(&note));
        assert_eq!(fx.store.resolve(&note.id().as_str()[..20]), Resolution::Unique(&note));
        assert_eq!(fx.store.resolve("zzzz"), Resolution::NotFound);
        assert_eq!(fx.store.resolve("  "), Resolution::NotFound);
    }

    #[test]
    fn resolve_shared_prefix_is_ambiguous() {
        let backend = Rc::new(MemoryStore::new());
        backend.insert(
            NOTES_KEY,
            r#"[{"id":"n_abc1","title":"A"},{"id":"n_abc2","title":"B"}]"#,
        );
        let store = NoteStore::open(PersistenceAdapter::new(backend));
        match store.resolve("n_abc") {
            Resolution::Ambiguous(notes) => assert_eq!(notes.len(), 2),
            other => panic!("expected ambiguous, got {:?}", other),
        }
    }

    // ===========================================
    // notifications
    // ===========================================

    #[test]
    fn subscribers_see_successful_mutations_only() {
        let mut fx = fixture();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        fx.store.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        let note = fx.store.create("A", "Novel", "").unwrap();
        let _ = fx.store.create("", "Novel", "");
        fx.store.update(note.id(), "B", "Novel", "").unwrap();
        fx.store.delete(&"ghost".parse().unwrap());
        fx.store.delete(note.id());

        assert_eq!(
            *events.borrow(),
            vec![
                StoreEvent::NoteCreated(note.id().clone()),
                StoreEvent::NoteUpdated(note.id().clone()),
                StoreEvent::NoteDeleted(note.id().clone()),
            ]
        );
    }
}
