//! Change feed - named, payload-carrying events for catalog mutations.
//!
//! Collection notifications carry no payload. When a consumer needs to know
//! *what* changed (a log, an audit trail, another process), attach a
//! [`ChangeEmitter`]: it turns on change tracking and, on each `forward`,
//! emits every recorded change as `BookAdded` / `BookUpdated` / `BookRemoved`
//! with the book as a JSON string.
//!
//! ```ignore
//! let mut feed = ChangeEmitter::attach(&books);
//! feed.on("BookAdded", |json| println!("added: {}", json));
//!
//! books.create(draft)?;
//! feed.forward(&books)?;
//! ```

mod change_emitter;
mod error;

pub use change_emitter::ChangeEmitter;
pub use error::EmitError;
