use tracing::debug;

use crate::book::BookRef;
use crate::collection::BookCollection;

use super::{BookForm, FormError, Submittable};

/// The single modal surface forms are shown in.
///
/// Owned by the application and handed by reference to whatever needs to open
/// or close it.
#[derive(Debug, Default)]
pub struct ModalController {
    form: Option<BookForm>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `form`, replacing whatever was open.
    pub fn show(&mut self, form: BookForm) {
        debug!(mode = ?form.mode(), "modal shown");
        self.form = Some(form);
    }

    /// Close the modal and discard its content.
    pub fn hide(&mut self) -> Option<BookForm> {
        debug!("modal hidden");
        self.form.take()
    }

    pub fn is_visible(&self) -> bool {
        self.form.is_some()
    }

    pub fn form(&self) -> Option<&BookForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut BookForm> {
        self.form.as_mut()
    }

    /// Submit the open form. Closes the modal on success; on failure the form
    /// stays open with its error flags set.
    pub fn submit(&mut self, books: &BookCollection) -> Result<BookRef, FormError> {
        let form = self.form.as_mut().ok_or(FormError::NoForm)?;
        let saved = form.submit(books)?;
        self.hide();
        Ok(saved)
    }
}
