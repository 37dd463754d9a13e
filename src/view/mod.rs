//! View - table rendering of a [`BookCollection`](crate::BookCollection).
//!
//! The table never patches itself. On every notification it throws away its
//! output and rebuilds it from the collection's current ordered books.

mod renderer;
mod table;

pub use renderer::{RenderedTable, TableRenderer};
pub use table::{BooksTable, Renderable, CREATE_ACTION_LABEL};
