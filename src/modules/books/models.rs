use serde::{Deserialize, Serialize};

/// Server-assigned book identifier
pub type BookId = i64;

/// A catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier, assigned on creation
    pub id: BookId,
    /// Title of the book
    pub title: String,
    /// Author(s), free-form
    pub author: String,
    /// Whether the book can currently be borrowed
    pub available: bool,
    /// Cover image URL or local path
    pub image: String,
}

/// Request model for creating a new book. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(default = "NewBook::default_available")]
    pub available: bool,
    pub image: String,
}

impl NewBook {
    fn default_available() -> bool {
        true
    }

    /// Attach a server-assigned id
    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            available: self.available,
            image: self.image,
        }
    }
}

/// Body of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteBook {
    pub id: BookId,
}

/// Plain acknowledgement returned by operations without a record payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub message: String,
}

impl Acknowledgement {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
