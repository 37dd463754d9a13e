//! Forms - create/edit input for the catalog, and the modal that hosts them.
//!
//! There is one form type. Whether it creates a new book or edits an existing
//! one is decided by its [`FormMode`]; the collection call it makes on submit
//! follows from the mode.

mod error;
mod form;
mod modal;

pub use error::{FormError, ValidationError};
pub use form::{BookForm, FormField, FormMode, Submittable};
pub use modal::ModalController;
