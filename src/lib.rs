//! Observable in-memory book catalog.
//!
//! A [`BookCollection`] holds books in display order and notifies its
//! subscribers synchronously after every mutation. A [`BooksTable`] subscribes
//! to a collection and fully re-renders itself on every notification. Input
//! comes from a [`BookForm`] shown in a [`ModalController`].
//!
//! ```ignore
//! use std::sync::Arc;
//! use book_catalog::{BookCollection, BooksTable, ModalController, FormField};
//!
//! let books = Arc::new(BookCollection::new());
//! let table = BooksTable::new(Arc::clone(&books))?;
//! let mut modal = ModalController::new();
//!
//! table.open_create_form(&mut modal);
//! if let Some(form) = modal.form_mut() {
//!     form.set(FormField::Title, "Dune")
//!         .set(FormField::Isbn, "978-0441013593")
//!         .set(FormField::AuthorName, "Frank Herbert");
//! }
//! modal.submit(&books)?;
//! println!("{}", table);
//! ```

mod book;
mod collection;
mod config;
mod error;
mod form;
mod observable;
mod view;

#[cfg(feature = "emitter")]
pub mod emitter;

pub use book::{Author, Book, BookDraft, BookRef, CatalogChange, RecordKey};
pub use collection::BookCollection;
pub use config::{CatalogConfig, ConfigError, IdPolicy};
pub use error::CatalogError;
pub use form::{
    BookForm, FormError, FormField, FormMode, ModalController, Submittable, ValidationError,
};
pub use observable::{listener, Listener, ObservableStore};
pub use view::{BooksTable, Renderable, RenderedTable, TableRenderer, CREATE_ACTION_LABEL};

#[cfg(feature = "emitter")]
pub use emitter::{ChangeEmitter, EmitError};
