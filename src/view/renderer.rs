use std::fmt;

use crate::book::{Book, BookRef};

/// Header and body of a rendered table, as plain cell text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RenderedTable {
    /// Id shown in the first cell of `row`.
    pub fn row_id(&self, row: usize) -> Option<u64> {
        self.rows.get(row)?.first()?.parse().ok()
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|cell| cell.chars().count()).collect();
        for row in &self.rows {
            for (index, cell) in row.iter().enumerate() {
                let width = cell.chars().count();
                match widths.get_mut(index) {
                    Some(current) => *current = (*current).max(width),
                    None => widths.push(width),
                }
            }
        }
        widths
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    write!(f, "|")?;
    for (cell, width) in cells.iter().zip(widths) {
        write!(f, " {:<width$} |", cell, width = *width)?;
    }
    writeln!(f)
}

fn write_rule(f: &mut fmt::Formatter<'_>, widths: &[usize]) -> fmt::Result {
    write!(f, "+")?;
    for width in widths {
        write!(f, "{}+", "-".repeat(width + 2))?;
    }
    writeln!(f)
}

impl fmt::Display for RenderedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();
        write_rule(f, &widths)?;
        write_row(f, &self.header, &widths)?;
        write_rule(f, &widths)?;
        for row in &self.rows {
            write_row(f, row, &widths)?;
        }
        write_rule(f, &widths)
    }
}

/// Stateless full render of a book sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct TableRenderer;

impl TableRenderer {
    pub fn render(books: &[BookRef]) -> RenderedTable {
        RenderedTable {
            header: Self::render_head(),
            rows: Self::render_body(books),
        }
    }

    pub fn render_head() -> Vec<String> {
        Book::fields().iter().map(|field| field.to_string()).collect()
    }

    pub fn render_body(books: &[BookRef]) -> Vec<Vec<String>> {
        books.iter().map(|book| book.cells().to_vec()).collect()
    }
}
