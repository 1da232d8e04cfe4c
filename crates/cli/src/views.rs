//! Catalog and admin views.
//!
//! Both views fetch the collection once and keep it locally. The admin view
//! folds each mutation response into that local copy instead of re-fetching,
//! so edits made by other clients only show up on the next load.

use std::fmt::Write as _;

use shelf_app::{Acknowledgement, Book, BookId, NewBook};

use crate::client::{BooksClient, ClientError};

fn availability(book: &Book) -> &'static str {
    if book.available {
        "Available"
    } else {
        "Not Available"
    }
}

/// Text shown in place of content when a request fails
pub fn render_error(err: &ClientError) -> String {
    format!("Error: {}", err)
}

/// Public, read-only listing.
pub struct CatalogView {
    books: Vec<Book>,
}

impl CatalogView {
    pub async fn load(client: &BooksClient) -> Result<Self, ClientError> {
        let books = client.list_books().await?;
        tracing::debug!(count = books.len(), "catalog loaded");
        Ok(Self { books })
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn render(&self) -> String {
        if self.books.is_empty() {
            return "No books in the catalog.".to_string();
        }

        let mut out = String::new();
        for book in &self.books {
            let _ = writeln!(out, "{}", book.title);
            let _ = writeln!(out, "  by {}", book.author);
            let _ = writeln!(out, "  {}", availability(book));
        }
        out
    }
}

/// Field overrides for an edit. Unset fields keep the current value; the
/// merged record is always sent in full.
#[derive(Debug, Clone, Default)]
pub struct BookEdit {
    pub title: Option<String>,
    pub author: Option<String>,
    pub available: Option<bool>,
    pub image: Option<String>,
}

impl BookEdit {
    pub fn apply(&self, book: &Book) -> Book {
        Book {
            id: book.id,
            title: self.title.clone().unwrap_or_else(|| book.title.clone()),
            author: self.author.clone().unwrap_or_else(|| book.author.clone()),
            available: self.available.unwrap_or(book.available),
            image: self.image.clone().unwrap_or_else(|| book.image.clone()),
        }
    }
}

/// Admin management view with local reconciliation.
pub struct AdminView {
    client: BooksClient,
    books: Vec<Book>,
}

impl AdminView {
    pub async fn load(client: BooksClient) -> Result<Self, ClientError> {
        let books = client.list_books().await?;
        Ok(Self::from_books(client, books))
    }

    pub fn from_books(client: BooksClient, books: Vec<Book>) -> Self {
        Self { client, books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn find(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub async fn add(&mut self, new_book: NewBook) -> Result<&Book, ClientError> {
        let created = self.client.create_book(&new_book).await?;
        tracing::info!(book_id = created.id, "book added");
        Ok(self.apply_created(created))
    }

    pub async fn edit(&mut self, id: BookId, edit: &BookEdit) -> Result<&Book, ClientError> {
        let current = self.find(id).ok_or(ClientError::NotInView(id))?;
        let replacement = edit.apply(current);

        let updated = self.client.update_book(&replacement).await?;
        tracing::info!(book_id = updated.id, "book updated");
        Ok(self.apply_updated(updated))
    }

    pub async fn remove(&mut self, id: BookId) -> Result<Acknowledgement, ClientError> {
        let ack = self.client.delete_book(id).await?;
        tracing::info!(book_id = id, "book removed");
        self.apply_removed(id);
        Ok(ack)
    }

    fn apply_created(&mut self, book: Book) -> &Book {
        self.books.push(book);
        let last = self.books.len() - 1;
        &self.books[last]
    }

    fn apply_updated(&mut self, book: Book) -> &Book {
        match self.books.iter().position(|existing| existing.id == book.id) {
            Some(index) => {
                self.books[index] = book;
                &self.books[index]
            }
            None => self.apply_created(book),
        }
    }

    fn apply_removed(&mut self, id: BookId) {
        self.books.retain(|book| book.id != id);
    }

    pub fn render(&self) -> String {
        if self.books.is_empty() {
            return "No books in the catalog.".to_string();
        }

        let mut out = String::new();
        for book in &self.books {
            let _ = writeln!(out, "[{}] {}", book.id, book.title);
            let _ = writeln!(out, "     by {}", book.author);
            let _ = writeln!(out, "     {}", availability(book));
            let _ = writeln!(out, "     cover: {}", book.image);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: BookId, title: &str, available: bool) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: "Tove Jansson".to_string(),
            available,
            image: format!("/{}.png", id),
        }
    }

    fn offline_view(books: Vec<Book>) -> AdminView {
        let client = BooksClient::new("http://127.0.0.1:9").unwrap();
        AdminView::from_books(client, books)
    }

    #[test]
    fn catalog_render_marks_availability() {
        let view = CatalogView {
            books: vec![book(1, "Comet in Moominland", true), book(2, "Moominsummer Madness", false)],
        };
        let text = view.render();

        assert!(text.contains("Comet in Moominland\n  by Tove Jansson\n  Available\n"));
        assert!(text.contains("Moominsummer Madness\n  by Tove Jansson\n  Not Available\n"));
    }

    #[test]
    fn empty_catalog_says_so() {
        let view = CatalogView { books: Vec::new() };
        assert_eq!(view.render(), "No books in the catalog.");
    }

    #[test]
    fn edit_overrides_only_given_fields() {
        let original = book(4, "Finn Family Moomintroll", true);
        let edit = BookEdit {
            title: Some("The Happy Moomins".to_string()),
            available: Some(false),
            ..BookEdit::default()
        };

        let merged = edit.apply(&original);
        assert_eq!(merged.id, 4);
        assert_eq!(merged.title, "The Happy Moomins");
        assert!(!merged.available);
        assert_eq!(merged.author, original.author);
        assert_eq!(merged.image, original.image);
    }

    #[test]
    fn reconciliation_follows_server_records() {
        let mut view = offline_view(vec![book(1, "A", true), book(2, "B", true)]);

        view.apply_created(book(3, "C", true));
        assert_eq!(view.books().len(), 3);

        view.apply_updated(book(2, "B revised", false));
        assert_eq!(view.find(2).unwrap().title, "B revised");
        assert_eq!(view.books()[1].id, 2);

        view.apply_removed(1);
        let ids: Vec<BookId> = view.books().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn editing_a_book_outside_the_view_fails_locally() {
        let mut view = offline_view(vec![book(1, "A", true)]);
        let err = view.edit(99, &BookEdit::default()).await.unwrap_err();
        assert!(matches!(err, ClientError::NotInView(99)));
    }

    #[test]
    fn errors_render_as_plain_text() {
        let err = ClientError::NotInView(7);
        assert_eq!(render_error(&err), "Error: book 7 is not in the current view");
    }
}
