use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::Book;

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Identity of a stored record. Stable across updates, unique per process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(u64);

impl RecordKey {
    fn next() -> Self {
        RecordKey(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a book stored in a collection.
///
/// Dereferences to the book as it was when the handle was taken. The record
/// behind it keeps its [`RecordKey`] when its fields are updated, so a handle
/// taken before an update still identifies the same record.
#[derive(Clone)]
pub struct BookRef {
    key: RecordKey,
    book: Arc<Book>,
}

impl BookRef {
    pub(crate) fn new(book: Book) -> Self {
        BookRef {
            key: RecordKey::next(),
            book: Arc::new(book),
        }
    }

    /// Same record, new field values.
    pub(crate) fn replaced(&self, book: Book) -> Self {
        BookRef {
            key: self.key,
            book: Arc::new(book),
        }
    }

    pub fn key(&self) -> RecordKey {
        self.key
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    /// Both handles identify the same stored record, whatever its fields.
    pub fn same_record(&self, other: &BookRef) -> bool {
        self.key == other.key
    }

    /// Same record, and no update happened between the two handles.
    pub fn same_snapshot(&self, other: &BookRef) -> bool {
        self.key == other.key && Arc::ptr_eq(&self.book, &other.book)
    }
}

impl Deref for BookRef {
    type Target = Book;

    fn deref(&self) -> &Book {
        &self.book
    }
}

impl fmt::Debug for BookRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookRef")
            .field("key", &self.key.0)
            .field("book", &*self.book)
            .finish()
    }
}
