//! BookCollection - ordered, observable list of books.
//!
//! Every mutation is applied under the write lock, the lock is released, and
//! only then are subscribers notified. Listeners can therefore read the
//! collection (or even mutate it) from inside a notification.
//!
//! ```ignore
//! let books = Arc::new(BookCollection::new());
//! books.subscribe(listener(|| println!("catalog changed")));
//!
//! let dune = books.create(BookDraft::new("Dune", "978-0441013593", Author::new("Frank Herbert")))?;
//! books.update(Book { title: "Dune (1965)".into(), ..(*dune).clone() })?;
//! books.remove(&dune)?; // no-op: `dune` is the pre-update snapshot
//! books.remove_by_id(dune.id)?;
//! ```

mod collection;

pub use collection::BookCollection;
