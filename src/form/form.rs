use std::fmt;

use crate::book::{Author, BookDraft, BookRef, RecordKey};
use crate::collection::BookCollection;

use super::{FormError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: u64 },
}

/// Input fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Isbn,
    AuthorName,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Title, FormField::Isbn, FormField::AuthorName];

    pub fn name(self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Isbn => "isbn",
            FormField::AuthorName => "author.name",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Isbn => "ISBN",
            FormField::AuthorName => "Author",
        }
    }
}

/// Something that turns collected input into a collection mutation.
pub trait Submittable {
    fn submit(&mut self, books: &BookCollection) -> Result<BookRef, FormError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookForm {
    mode: FormMode,
    title: String,
    isbn: String,
    author_name: String,
    author_id: Option<u64>,
    /// The record an edit form writes back to.
    record: Option<RecordKey>,
    errors: Vec<FormField>,
}

impl BookForm {
    pub fn create() -> Self {
        BookForm {
            mode: FormMode::Create,
            title: String::new(),
            isbn: String::new(),
            author_name: String::new(),
            author_id: None,
            record: None,
            errors: Vec::new(),
        }
    }

    /// An edit form pre-filled from `book`. Submitting it updates that record,
    /// even if another book shares its id.
    pub fn edit(book: &BookRef) -> Self {
        BookForm {
            mode: FormMode::Edit { id: book.id },
            title: book.title.clone(),
            isbn: book.isbn.clone(),
            author_name: book.author.name.clone(),
            author_id: book.author.id,
            record: Some(book.key()),
            errors: Vec::new(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add book",
            FormMode::Edit { .. } => "Update book",
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Isbn => &self.isbn,
            FormField::AuthorName => &self.author_name,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match field {
            FormField::Title => self.title = value,
            FormField::Isbn => self.isbn = value,
            FormField::AuthorName => self.author_name = value,
        }
        self
    }

    /// Fields flagged by the last validation.
    pub fn errors(&self) -> &[FormField] {
        &self.errors
    }

    /// Field to focus: the first flagged one, or the title.
    pub fn focus(&self) -> FormField {
        self.errors.first().copied().unwrap_or(FormField::Title)
    }

    /// Check that every field is filled in. Flags the empty ones (and clears
    /// flags on fields that have since been filled).
    pub fn validate(&mut self) -> Result<BookDraft, ValidationError> {
        self.errors = FormField::ALL
            .into_iter()
            .filter(|field| self.value(*field).trim().is_empty())
            .collect();

        if !self.errors.is_empty() {
            return Err(ValidationError {
                missing: self.errors.clone(),
            });
        }

        Ok(BookDraft::new(
            self.title.clone(),
            self.isbn.clone(),
            Author {
                id: self.author_id,
                name: self.author_name.clone(),
            },
        ))
    }
}

impl Submittable for BookForm {
    fn submit(&mut self, books: &BookCollection) -> Result<BookRef, FormError> {
        let draft = self.validate()?;
        let saved = match self.mode {
            FormMode::Create => books.create(draft)?,
            FormMode::Edit { id } => match self.record {
                Some(key) => books.update_record(key, draft.into_book(id))?,
                None => books.update(draft.into_book(id))?,
            },
        };
        Ok(saved)
    }
}

impl fmt::Display for BookForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let FormMode::Edit { id } = self.mode {
            writeln!(f, "id: {}", id)?;
        }
        for field in FormField::ALL {
            let marker = if self.errors.contains(&field) { " !" } else { "" };
            writeln!(f, "{}: [{}]{}", field.label(), self.value(field), marker)?;
        }
        write!(f, "[ {} ] [ Cancel ]", self.submit_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Book;
    use crate::error::CatalogError;

    fn filled(mut form: BookForm) -> BookForm {
        form.set(FormField::Title, "Dune")
            .set(FormField::Isbn, "978-0441013593")
            .set(FormField::AuthorName, "Frank Herbert");
        form
    }

    #[test]
    fn empty_fields_are_flagged_in_order() {
        let mut form = BookForm::create();
        form.set(FormField::Isbn, "X");

        let err = form.validate().unwrap_err();
        assert_eq!(err.missing, vec![FormField::Title, FormField::AuthorName]);
        assert_eq!(err.focus(), Some(FormField::Title));
        assert_eq!(form.focus(), FormField::Title);
        assert_eq!(err.to_string(), "required fields missing: title, author.name");
    }

    #[test]
    fn flags_clear_once_filled() {
        let mut form = BookForm::create();
        form.set(FormField::Title, "   ");
        assert!(form.validate().is_err());
        assert_eq!(form.errors().len(), 3);

        let mut form = filled(form);
        assert!(form.validate().is_ok());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn create_submit_adds_book() {
        let books = BookCollection::new();
        let mut form = filled(BookForm::create());

        let saved = form.submit(&books).unwrap();
        assert_eq!(saved.id, 1);
        assert_eq!(saved.title, "Dune");
        assert_eq!(books.len().unwrap(), 1);
    }

    #[test]
    fn invalid_submit_leaves_collection_alone() {
        let books = BookCollection::new();
        let mut form = BookForm::create();

        let err = form.submit(&books).unwrap_err();
        assert!(matches!(err, FormError::Validation(_)));
        assert!(books.is_empty().unwrap());
    }

    #[test]
    fn edit_form_binds_and_updates() {
        let books = BookCollection::new();
        let original = books
            .add(Book::new(3, "A", "X", Author::with_id(8, "Au")))
            .unwrap();

        let mut form = BookForm::edit(&original);
        assert_eq!(form.mode(), FormMode::Edit { id: 3 });
        assert_eq!(form.value(FormField::Title), "A");
        assert_eq!(form.submit_label(), "Update book");

        form.set(FormField::Title, "A2");
        let saved = form.submit(&books).unwrap();
        assert_eq!(saved.id, 3);
        assert_eq!(saved.title, "A2");
        assert_eq!(saved.author, Author::with_id(8, "Au"));
    }

    #[test]
    fn edit_of_removed_book_is_not_found() {
        let books = BookCollection::new();
        let original = books.add(Book::new(3, "A", "X", Author::new("Au"))).unwrap();
        let mut form = BookForm::edit(&original);
        books.remove(&original).unwrap();

        let err = form.submit(&books).unwrap_err();
        assert_eq!(err, FormError::Catalog(CatalogError::NotFound { id: 3 }));
    }

    #[test]
    fn edit_targets_its_own_record_among_duplicate_ids() {
        let books = BookCollection::new();
        books.add(Book::new(3, "first", "X", Author::new("Au"))).unwrap();
        let second = books.add(Book::new(3, "second", "Y", Author::new("Bu"))).unwrap();

        let mut form = BookForm::edit(&second);
        form.set(FormField::Title, "second v2");
        form.submit(&books).unwrap();

        let titles: Vec<String> = books.books().unwrap().iter().map(|b| b.title.clone()).collect();
        assert_eq!(titles, vec!["first", "second v2"]);
    }

    #[test]
    fn display_marks_errors() {
        let mut form = BookForm::create();
        form.set(FormField::Title, "Dune");
        let _ = form.validate();

        let text = form.to_string();
        assert!(text.contains("Title: [Dune]\n"));
        assert!(text.contains("ISBN: [] !"));
        assert!(text.ends_with("[ Add book ] [ Cancel ]"));
    }
}
