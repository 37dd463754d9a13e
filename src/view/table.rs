use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::{debug, error};

use crate::book::BookRef;
use crate::collection::BookCollection;
use crate::error::CatalogError;
use crate::form::{BookForm, ModalController};
use crate::observable::{listener, Listener};

use super::{RenderedTable, TableRenderer};

pub const CREATE_ACTION_LABEL: &str = "New book";

/// A view that can rebuild its entire output from current state.
pub trait Renderable {
    fn render(&self) -> Result<(), CatalogError>;
}

#[derive(Debug, Default)]
struct TableState {
    table: RenderedTable,
    /// The records behind `table.rows`, row for row.
    books: Vec<BookRef>,
    renders: u64,
}

fn render_into(books: &BookCollection, state: &Mutex<TableState>) -> Result<(), CatalogError> {
    let books = books.books()?;
    let table = TableRenderer::render(&books);
    let mut state = state
        .lock()
        .map_err(|_| CatalogError::LockPoisoned("table render"))?;
    state.table = table;
    state.books = books;
    state.renders += 1;
    debug!(rows = state.table.rows.len(), renders = state.renders, "table rendered");
    Ok(())
}

/// Table of all books, kept in sync with its collection.
///
/// Subscribes on construction and unsubscribes on drop. The listener only
/// holds a weak reference to the collection.
pub struct BooksTable {
    books: Arc<BookCollection>,
    state: Arc<Mutex<TableState>>,
    on_change: Listener,
}

impl fmt::Debug for BooksTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BooksTable")
            .field("books", &self.books)
            .field("state", &self.state)
            .finish()
    }
}

impl BooksTable {
    pub fn new(books: Arc<BookCollection>) -> Result<Self, CatalogError> {
        let state = Arc::new(Mutex::new(TableState::default()));

        let on_change = {
            let books = Arc::downgrade(&books);
            let state = Arc::clone(&state);
            listener(move || {
                let Some(books) = books.upgrade() else {
                    return;
                };
                if let Err(err) = render_into(&books, &state) {
                    error!(%err, "table re-render failed");
                }
            })
        };
        books.subscribe(on_change.clone());

        let table = BooksTable {
            books,
            state,
            on_change,
        };
        table.render()?;
        Ok(table)
    }

    pub fn collection(&self) -> &Arc<BookCollection> {
        &self.books
    }

    /// The table as of the last render.
    pub fn snapshot(&self) -> Result<RenderedTable, CatalogError> {
        let state = self
            .state
            .lock()
            .map_err(|_| CatalogError::LockPoisoned("table read"))?;
        Ok(state.table.clone())
    }

    /// Number of full renders so far, the initial one included.
    pub fn render_count(&self) -> Result<u64, CatalogError> {
        let state = self
            .state
            .lock()
            .map_err(|_| CatalogError::LockPoisoned("table read"))?;
        Ok(state.renders)
    }

    /// The book rendered in `row` by the last render.
    pub fn book_at_row(&self, row: usize) -> Result<Option<BookRef>, CatalogError> {
        let state = self
            .state
            .lock()
            .map_err(|_| CatalogError::LockPoisoned("table read"))?;
        Ok(state.books.get(row).cloned())
    }

    /// Open an empty create form in `modal`.
    pub fn open_create_form(&self, modal: &mut ModalController) {
        modal.show(BookForm::create());
    }

    /// Open an edit form for the book shown in `row`. Returns false, leaving
    /// the modal alone, when the row does not resolve to a book.
    pub fn open_edit_form(
        &self,
        modal: &mut ModalController,
        row: usize,
    ) -> Result<bool, CatalogError> {
        match self.book_at_row(row)? {
            Some(book) => {
                modal.show(BookForm::edit(&book));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the book shown in `row` from the collection.
    pub fn delete_row(&self, row: usize) -> Result<Option<BookRef>, CatalogError> {
        match self.book_at_row(row)? {
            Some(book) => {
                self.books.remove(&book)?;
                Ok(Some(book))
            }
            None => Ok(None),
        }
    }
}

impl Renderable for BooksTable {
    fn render(&self) -> Result<(), CatalogError> {
        render_into(&self.books, &self.state)
    }
}

impl Drop for BooksTable {
    fn drop(&mut self) {
        self.books.unsubscribe(&self.on_change);
    }
}

impl fmt::Display for BooksTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.snapshot().map_err(|_| fmt::Error)?;
        write!(f, "{}", table)?;
        write!(f, "[ {} ]", CREATE_ACTION_LABEL)
    }
}
