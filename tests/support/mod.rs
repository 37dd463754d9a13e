//! Shared fixtures for integration tests.

#![allow(dead_code)]

use book_catalog::{listener, Author, Book, BookCollection, BookDraft, Listener};
use std::sync::{Arc, Mutex};

pub fn book(id: u64, title: &str, isbn: &str, author: &str) -> Book {
    Book::new(id, title, isbn, Author::new(author))
}

pub fn draft() -> BookDraft {
    BookDraft::new("Untitled", "-", Author::new("Anonymous"))
}

/// Records the name of each listener as it is called.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener(&self, name: &str) -> Listener {
        let calls = Arc::clone(&self.calls);
        let name = name.to_string();
        listener(move || calls.lock().unwrap().push(name.clone()))
    }

    pub fn subscribe(&self, books: &BookCollection, name: &str) -> Listener {
        let on_change = self.listener(name);
        books.subscribe(on_change.clone());
        on_change
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}
