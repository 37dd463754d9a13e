//! Observable - synchronous, payload-less publish/subscribe.
//!
//! Listeners take no arguments. A notification only says "something changed";
//! receivers pull whatever state they need from the source themselves.
//!
//! ```ignore
//! let store = ObservableStore::new();
//! let on_change = listener(|| println!("changed"));
//! store.subscribe(on_change.clone());
//! store.notify();
//! store.unsubscribe(&on_change);
//! ```

mod store;

pub use store::{listener, Listener, ObservableStore};
