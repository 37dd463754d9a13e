use serde::{Deserialize, Serialize};

use super::Book;

/// An effective mutation of a collection, recorded for the change feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "book")]
pub enum CatalogChange {
    Added(Book),
    Updated(Book),
    Removed(Book),
}

impl CatalogChange {
    pub fn event_type(&self) -> &'static str {
        match self {
            CatalogChange::Added(_) => "BookAdded",
            CatalogChange::Updated(_) => "BookUpdated",
            CatalogChange::Removed(_) => "BookRemoved",
        }
    }

    pub fn book(&self) -> &Book {
        match self {
            CatalogChange::Added(book)
            | CatalogChange::Updated(book)
            | CatalogChange::Removed(book) => book,
        }
    }

    /// JSON payload carried by the emitted event: the affected book.
    pub fn payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self.book())
    }
}
