//! Walk through a small catalog session and print the table after each step.
//!
//! Run with `RUST_LOG=book_catalog=debug` to see the mutation log.

use std::error::Error;
use std::sync::Arc;

use book_catalog::{
    Author, Book, BookCollection, BooksTable, CatalogConfig, ChangeEmitter, FormField,
    ModalController,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let books = Arc::new(BookCollection::with_books(
        CatalogConfig::default(),
        vec![Book::new(
            1,
            "The Left Hand of Darkness",
            "978-0441478125",
            Author::new("Ursula K. Le Guin"),
        )],
    ));
    let table = BooksTable::new(Arc::clone(&books))?;
    let mut modal = ModalController::new();
    let mut feed = ChangeEmitter::attach(&books);
    feed.on("BookAdded", |json: String| println!("feed: added {}", json));

    println!("{}\n", table);

    table.open_create_form(&mut modal);
    if let Some(form) = modal.form_mut() {
        form.set(FormField::Title, "Dune")
            .set(FormField::Isbn, "978-0441013593");
    }
    if let Err(err) = modal.submit(&books) {
        println!("rejected: {}", err);
        if let Some(form) = modal.form() {
            println!("{}\n", form);
        }
    }

    if let Some(form) = modal.form_mut() {
        form.set(FormField::AuthorName, "Frank Herbert");
    }
    modal.submit(&books)?;
    println!("{}\n", table);

    if table.open_edit_form(&mut modal, 0)? {
        if let Some(form) = modal.form_mut() {
            form.set(FormField::Title, "The Dispossessed")
                .set(FormField::Isbn, "978-0061054884");
        }
        modal.submit(&books)?;
    }
    println!("{}\n", table);

    table.delete_row(1)?;
    println!("{}", table);

    feed.forward(&books)?;
    std::thread::sleep(std::time::Duration::from_millis(50));
    Ok(())
}
