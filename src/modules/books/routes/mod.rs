//! HTTP handlers for the book resource, all served from the module root.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shelf_authz::{AdminGuard, RequireAdmin};
use shelf_http::error::AppResult;

use super::models::{Acknowledgement, Book, DeleteBook, NewBook};
use super::store::BookStore;

/// Shared state for the books router
#[derive(Clone)]
pub struct BooksState {
    pub store: Arc<dyn BookStore>,
    pub guard: AdminGuard,
}

impl FromRef<BooksState> for AdminGuard {
    fn from_ref(state: &BooksState) -> Self {
        state.guard.clone()
    }
}

pub fn router(state: BooksState) -> Router {
    Router::new()
        .route(
            "/",
            get(list_books)
                .post(create_book)
                .put(update_book)
                .delete(delete_book),
        )
        .route("/health", get(health_check))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn list_books(State(state): State<BooksState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.store.list().await?;
    Ok(Json(books))
}

async fn create_book(
    State(state): State<BooksState>,
    _admin: RequireAdmin,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let Json(new_book) = payload?;

    let book = state.store.create(new_book).await?;
    tracing::info!(book_id = book.id, title = %book.title, "book created");

    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(state): State<BooksState>,
    _admin: RequireAdmin,
    payload: Result<Json<Book>, JsonRejection>,
) -> AppResult<Json<Book>> {
    let Json(book) = payload?;

    let book = state.store.update(book).await?;
    tracing::info!(book_id = book.id, title = %book.title, "book updated");

    Ok(Json(book))
}

async fn delete_book(
    State(state): State<BooksState>,
    _admin: RequireAdmin,
    payload: Result<Json<DeleteBook>, JsonRejection>,
) -> AppResult<Json<Acknowledgement>> {
    let Json(DeleteBook { id }) = payload?;

    state.store.delete(id).await?;
    tracing::info!(book_id = id, "book deleted");

    Ok(Json(Acknowledgement::new("Book deleted successfully")))
}
