mod book;
mod change;
mod record;

pub use book::{Author, Book, BookDraft};
pub use change::CatalogChange;
pub use record::{BookRef, RecordKey};
