use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shelf_app::{Acknowledgement, Book, BookId, DeleteBook, NewBook};
use thiserror::Error;

const BOOKS_PATH: &str = "/api/books";
const SESSION_PATH: &str = "/api/admin/session";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message} (HTTP {status})")]
    Api { status: StatusCode, message: String },

    #[error("book {0} is not in the current view")]
    NotInView(BookId),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status(),
            ClientError::NotInView(_) => None,
        }
    }
}

/// Server error envelope: `{"error": {"message": ...}}`
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorMessage,
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: String,
}

/// Thin HTTP client for the book resource and the admin session endpoint.
#[derive(Clone, Debug)]
pub struct BooksClient {
    http: reqwest::Client,
    base_url: String,
    admin_password: Option<String>,
}

impl BooksClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            admin_password: None,
        })
    }

    /// Send `password` as a bearer secret on every mutating request
    pub fn with_admin_password(mut self, password: Option<String>) -> Self {
        self.admin_password = password;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.admin_password {
            Some(password) => request.bearer_auth(password),
            None => request,
        }
    }

    pub async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
        let response = self.http.get(self.url(BOOKS_PATH)).send().await?;
        decode(response).await
    }

    pub async fn create_book(&self, new_book: &NewBook) -> Result<Book, ClientError> {
        let request = self.http.post(self.url(BOOKS_PATH)).json(new_book);
        let response = self.authorized(request).send().await?;
        decode(response).await
    }

    pub async fn update_book(&self, book: &Book) -> Result<Book, ClientError> {
        let request = self.http.put(self.url(BOOKS_PATH)).json(book);
        let response = self.authorized(request).send().await?;
        decode(response).await
    }

    pub async fn delete_book(&self, id: BookId) -> Result<Acknowledgement, ClientError> {
        let request = self
            .http
            .delete(self.url(BOOKS_PATH))
            .json(&DeleteBook { id });
        let response = self.authorized(request).send().await?;
        decode(response).await
    }

    /// Ask the server whether `password` opens the admin view
    pub async fn open_session(&self, password: &str) -> Result<Acknowledgement, ClientError> {
        let response = self
            .http
            .post(self.url(SESSION_PATH))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status,
        message: error_message(status, &body),
    })
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }
    if let Ok(ack) = serde_json::from_str::<Acknowledgement>(body) {
        return ack.message;
    }
    status
        .canonical_reason()
        .unwrap_or("unexpected response")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_envelope() {
        let body = r#"{"error":{"code":"not_found","message":"Book not found","details":[],"trace_id":"x","timestamp":"y"}}"#;
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, body),
            "Book not found"
        );
    }

    #[test]
    fn error_message_accepts_bare_message() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"message":"Book not found"}"#),
            "Book not found"
        );
    }

    #[test]
    fn error_message_falls_back_to_reason() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html>"),
            "Bad Gateway"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = BooksClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.url(BOOKS_PATH), "http://localhost:8080/api/books");
    }
}
