use event_emitter_rs::EventEmitter;
use tracing::debug;

use crate::collection::BookCollection;

use super::EmitError;

/// Forwards recorded collection changes to named event listeners.
///
/// Delivery goes through `event_emitter_rs`, which calls listeners on their
/// own threads; do not rely on a listener having run when `forward` returns.
pub struct ChangeEmitter {
    event_emitter: EventEmitter,
}

impl ChangeEmitter {
    /// Turn on change tracking for `books` and build an emitter for it.
    pub fn attach(books: &BookCollection) -> Self {
        books.set_change_tracking(true);
        Self {
            event_emitter: EventEmitter::new(),
        }
    }

    /// Register a listener for `BookAdded`, `BookUpdated` or `BookRemoved`.
    /// The listener receives the affected book as JSON. Returns the listener
    /// id for [`ChangeEmitter::remove_listener`].
    pub fn on<F>(&mut self, event: &str, listener: F) -> String
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.event_emitter.on(event, listener)
    }

    pub fn remove_listener(&mut self, listener_id: &str) -> bool {
        self.event_emitter.remove_listener(listener_id).is_some()
    }

    /// Emit every change recorded since the last call, oldest first. Returns
    /// how many were emitted.
    pub fn forward(&mut self, books: &BookCollection) -> Result<usize, EmitError> {
        let changes = books.drain_changes()?;
        for change in &changes {
            let payload = change.payload()?;
            debug!(event = change.event_type(), id = change.book().id, "emitting change");
            self.event_emitter.emit(change.event_type(), payload);
        }
        Ok(changes.len())
    }

    /// Stop recording changes on `books`. Anything still recorded is dropped.
    pub fn detach(self, books: &BookCollection) {
        books.set_change_tracking(false);
        let _ = books.drain_changes();
    }
}
