use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Author {
            id: None,
            name: name.into(),
        }
    }

    pub fn with_id(id: u64, name: impl Into<String>) -> Self {
        Author {
            id: Some(id),
            name: name.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub isbn: String,
    pub author: Author,
}

impl Book {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        isbn: impl Into<String>,
        author: Author,
    ) -> Self {
        Book {
            id,
            title: title.into(),
            isbn: isbn.into(),
            author,
        }
    }

    /// Column names, in display order.
    pub fn fields() -> [&'static str; 4] {
        ["id", "title", "isbn", "author"]
    }

    /// Cell values in the same order as [`Book::fields`].
    pub fn cells(&self) -> [String; 4] {
        [
            self.id.to_string(),
            self.title.clone(),
            self.isbn.clone(),
            self.author.name.clone(),
        ]
    }
}

/// Book fields collected from a form, before an id is assigned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub isbn: String,
    pub author: Author,
}

impl BookDraft {
    pub fn new(title: impl Into<String>, isbn: impl Into<String>, author: Author) -> Self {
        BookDraft {
            title: title.into(),
            isbn: isbn.into(),
            author,
        }
    }

    pub fn into_book(self, id: u64) -> Book {
        Book {
            id,
            title: self.title,
            isbn: self.isbn,
            author: self.author,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_follow_field_order() {
        let book = Book::new(3, "Dune", "978-0441013593", Author::new("Frank Herbert"));
        assert_eq!(Book::fields(), ["id", "title", "isbn", "author"]);
        assert_eq!(
            book.cells(),
            [
                "3".to_string(),
                "Dune".to_string(),
                "978-0441013593".to_string(),
                "Frank Herbert".to_string()
            ]
        );
    }

    #[test]
    fn draft_into_book() {
        let draft = BookDraft::new("A", "X", Author::new("Au"));
        let book = draft.into_book(9);
        assert_eq!(book, Book::new(9, "A", "X", Author::new("Au")));
    }

    #[test]
    fn author_id_is_optional_in_json() {
        let book: Book = serde_json::from_str(
            r#"{"id":1,"title":"A","isbn":"X","author":{"name":"Au"}}"#,
        )
        .unwrap();
        assert_eq!(book.author.id, None);

        let json = serde_json::to_string(&Author::with_id(4, "Bu")).unwrap();
        assert_eq!(json, r#"{"id":4,"name":"Bu"}"#);
    }
}
