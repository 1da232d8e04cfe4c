//! Book storage.
//!
//! Handlers only see [`BookStore`]; the process owns one store instance whose
//! lifecycle is driven by the books module (`init` seeds, `stop` clears).

use async_trait::async_trait;
use shelf_http::error::AppError;
use thiserror::Error;
use tokio::sync::RwLock;

use super::models::{Book, BookId, NewBook};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("book {id} not found")]
    NotFound { id: BookId },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => AppError::not_found("Book not found"),
            StoreError::Internal(e) => AppError::Internal(e),
        }
    }
}

#[async_trait]
pub trait BookStore: Send + Sync {
    /// Every record, in insertion order
    async fn list(&self) -> Result<Vec<Book>, StoreError>;

    /// Assign the next id and append
    async fn create(&self, new_book: NewBook) -> Result<Book, StoreError>;

    /// Replace the record whose id matches `book.id`
    async fn update(&self, book: Book) -> Result<Book, StoreError>;

    async fn delete(&self, id: BookId) -> Result<(), StoreError>;

    /// Replace the whole collection
    async fn reset(&self, books: Vec<Book>) -> Result<(), StoreError>;

    async fn clear(&self) -> Result<(), StoreError> {
        self.reset(Vec::new()).await
    }
}

/// Process-local store. Each call takes the lock for its own duration only;
/// there is no version check, so racing writers to one id are last-writer-wins.
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }
}

/// `max(id) + 1`, or 1 for an empty collection
fn next_id(books: &[Book]) -> BookId {
    books.iter().map(|b| b.id).max().map_or(1, |max| max + 1)
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.books.read().await.clone())
    }

    async fn create(&self, new_book: NewBook) -> Result<Book, StoreError> {
        let mut books = self.books.write().await;
        let book = new_book.with_id(next_id(&books));
        books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, book: Book) -> Result<Book, StoreError> {
        let mut books = self.books.write().await;
        let slot = books
            .iter_mut()
            .find(|existing| existing.id == book.id)
            .ok_or(StoreError::NotFound { id: book.id })?;
        *slot = book.clone();
        Ok(book)
    }

    async fn delete(&self, id: BookId) -> Result<(), StoreError> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|existing| existing.id == id)
            .ok_or(StoreError::NotFound { id })?;
        books.remove(index);
        Ok(())
    }

    async fn reset(&self, books: Vec<Book>) -> Result<(), StoreError> {
        *self.books.write().await = books;
        Ok(())
    }
}
