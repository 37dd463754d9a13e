use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

use tracing::{debug, warn};

use crate::book::{Book, BookDraft, BookRef, CatalogChange, RecordKey};
use crate::config::{CatalogConfig, IdPolicy};
use crate::error::CatalogError;
use crate::observable::{Listener, ObservableStore};

/// Books plus the id counter, guarded together so id assignment and insertion
/// happen under one lock.
#[derive(Debug)]
struct Shelf {
    records: Vec<BookRef>,
    /// `None` once every id up to `u64::MAX` has been handed out or added.
    next_id: Option<u64>,
}

impl Shelf {
    fn advance_past(&mut self, id: u64) {
        self.next_id = match (self.next_id, id.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };
    }

    fn assign_id(&mut self, policy: IdPolicy) -> Result<u64, CatalogError> {
        let id = match policy {
            IdPolicy::Monotonic => self.next_id.ok_or(CatalogError::IdsExhausted)?,
            IdPolicy::NextUnused => match self.records.iter().map(|book| book.id).max() {
                Some(max) => max.checked_add(1).ok_or(CatalogError::IdsExhausted)?,
                None => 1,
            },
        };
        self.advance_past(id);
        Ok(id)
    }
}

pub struct BookCollection {
    shelf: RwLock<Shelf>,
    track_changes: AtomicBool,
    changes: Mutex<Vec<CatalogChange>>,
    store: ObservableStore,
    config: CatalogConfig,
}

impl Default for BookCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BookCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookCollection")
            .field("shelf", &self.shelf)
            .field("store", &self.store)
            .field("config", &self.config)
            .finish()
    }
}

impl BookCollection {
    pub fn new() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    pub fn with_config(config: CatalogConfig) -> Self {
        Self::with_books(config, Vec::new())
    }

    /// Seed the collection. Seeding does not notify anyone.
    pub fn with_books(config: CatalogConfig, books: impl IntoIterator<Item = Book>) -> Self {
        let mut shelf = Shelf {
            records: Vec::new(),
            next_id: Some(1),
        };
        for book in books {
            shelf.advance_past(book.id);
            shelf.records.push(BookRef::new(book));
        }

        BookCollection {
            shelf: RwLock::new(shelf),
            track_changes: AtomicBool::new(false),
            changes: Mutex::new(Vec::new()),
            store: ObservableStore::with_max_passes(config.max_notify_passes),
            config,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn subscribe(&self, listener: Listener) {
        self.store.subscribe(listener);
    }

    pub fn unsubscribe(&self, listener: &Listener) {
        self.store.unsubscribe(listener);
    }

    pub fn subscriber_count(&self) -> usize {
        self.store.len()
    }

    /// Ordered snapshot of the current books.
    pub fn books(&self) -> Result<Vec<BookRef>, CatalogError> {
        let shelf = self
            .shelf
            .read()
            .map_err(|_| CatalogError::LockPoisoned("read"))?;
        Ok(shelf.records.clone())
    }

    pub fn len(&self) -> Result<usize, CatalogError> {
        let shelf = self
            .shelf
            .read()
            .map_err(|_| CatalogError::LockPoisoned("read"))?;
        Ok(shelf.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, CatalogError> {
        Ok(self.len()? == 0)
    }

    /// First book with `id`, in display order.
    pub fn find_by_id(&self, id: u64) -> Result<Option<BookRef>, CatalogError> {
        let shelf = self
            .shelf
            .read()
            .map_err(|_| CatalogError::LockPoisoned("read"))?;
        Ok(shelf.records.iter().find(|book| book.id == id).cloned())
    }

    /// Append `book` and notify. Ids are not checked for uniqueness; use
    /// [`BookCollection::create`] to get a fresh id.
    pub fn add(&self, book: Book) -> Result<BookRef, CatalogError> {
        let added = {
            let mut shelf = self
                .shelf
                .write()
                .map_err(|_| CatalogError::LockPoisoned("write"))?;
            shelf.advance_past(book.id);
            let added = BookRef::new(book);
            shelf.records.push(added.clone());
            added
        };

        debug!(id = added.id, title = %added.title, "book added");
        self.record(CatalogChange::Added(added.book().clone()));
        self.store.notify();
        Ok(added)
    }

    /// Assign an id according to the configured [`IdPolicy`], append and
    /// notify.
    ///
    /// Fails with [`CatalogError::IdsExhausted`] instead of handing out an id
    /// that is already taken.
    pub fn create(&self, draft: BookDraft) -> Result<BookRef, CatalogError> {
        let created = {
            let mut shelf = self
                .shelf
                .write()
                .map_err(|_| CatalogError::LockPoisoned("write"))?;
            let id = shelf.assign_id(self.config.id_policy)?;
            let created = BookRef::new(draft.into_book(id));
            shelf.records.push(created.clone());
            created
        };

        debug!(id = created.id, title = %created.title, "book created");
        self.record(CatalogChange::Added(created.book().clone()));
        self.store.notify();
        Ok(created)
    }

    /// Remove the record `book` refers to. The handle still matches after
    /// the record has been updated.
    ///
    /// Returns whether an entry was removed. Subscribers are notified after a
    /// removal, and also after a miss unless `notify_on_noop_remove` is off.
    pub fn remove(&self, book: &BookRef) -> Result<bool, CatalogError> {
        let removed = {
            let mut shelf = self
                .shelf
                .write()
                .map_err(|_| CatalogError::LockPoisoned("write"))?;
            shelf
                .records
                .iter()
                .position(|candidate| candidate.same_record(book))
                .map(|index| shelf.records.remove(index))
        };

        Ok(self.finish_remove(removed).is_some())
    }

    /// Remove the first book with `id`. Same notification rules as
    /// [`BookCollection::remove`].
    pub fn remove_by_id(&self, id: u64) -> Result<Option<BookRef>, CatalogError> {
        let removed = {
            let mut shelf = self
                .shelf
                .write()
                .map_err(|_| CatalogError::LockPoisoned("write"))?;
            shelf
                .records
                .iter()
                .position(|candidate| candidate.id == id)
                .map(|index| shelf.records.remove(index))
        };

        Ok(self.finish_remove(removed))
    }

    fn finish_remove(&self, removed: Option<BookRef>) -> Option<BookRef> {
        match &removed {
            Some(book) => {
                debug!(id = book.id, "book removed");
                self.record(CatalogChange::Removed(book.book().clone()));
                self.store.notify();
            }
            None => {
                debug!("remove matched nothing");
                if self.config.notify_on_noop_remove {
                    self.store.notify();
                }
            }
        }
        removed
    }

    /// Overwrite every field of the first book whose id is `book.id`. The
    /// record keeps its position and its identity, then subscribers are
    /// notified.
    ///
    /// Fails with [`CatalogError::NotFound`] when no book has that id; the
    /// collection is left untouched and nobody is notified.
    pub fn update(&self, book: Book) -> Result<BookRef, CatalogError> {
        let id = book.id;
        self.replace_where(book, |candidate| candidate.id == id)
    }

    /// Like [`BookCollection::update`], but targets the record with `key`
    /// rather than the first one with a matching id. `book.id` may differ from
    /// the record's current id.
    pub fn update_record(&self, key: RecordKey, book: Book) -> Result<BookRef, CatalogError> {
        self.replace_where(book, |candidate| candidate.key() == key)
    }

    fn replace_where<P>(&self, book: Book, matches: P) -> Result<BookRef, CatalogError>
    where
        P: Fn(&BookRef) -> bool,
    {
        let updated = {
            let mut shelf = self
                .shelf
                .write()
                .map_err(|_| CatalogError::LockPoisoned("write"))?;
            let id = book.id;
            let slot = shelf
                .records
                .iter_mut()
                .find(|candidate| matches(&**candidate))
                .ok_or(CatalogError::NotFound { id })?;
            *slot = slot.replaced(book);
            let updated = slot.clone();
            shelf.advance_past(id);
            updated
        };

        debug!(id = updated.id, title = %updated.title, "book updated");
        self.record(CatalogChange::Updated(updated.book().clone()));
        self.store.notify();
        Ok(updated)
    }

    /// Start or stop recording [`CatalogChange`]s for [`BookCollection::drain_changes`].
    pub fn set_change_tracking(&self, enabled: bool) {
        self.track_changes.store(enabled, Ordering::Release);
    }

    /// Take the changes recorded since the last drain, oldest first.
    pub fn drain_changes(&self) -> Result<Vec<CatalogChange>, CatalogError> {
        let mut changes = self
            .changes
            .lock()
            .map_err(|_| CatalogError::LockPoisoned("changes"))?;
        Ok(changes.drain(..).collect())
    }

    // The mutation has already been applied when this runs, so a poisoned
    // change log must not fail the caller.
    fn record(&self, change: CatalogChange) {
        if !self.track_changes.load(Ordering::Acquire) {
            return;
        }
        match self.changes.lock() {
            Ok(mut changes) => changes.push(change),
            Err(_) => warn!(
                event = change.event_type(),
                id = change.book().id,
                "change log lock poisoned; change not recorded"
            ),
        }
    }
}
