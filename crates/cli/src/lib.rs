//! Client-side views over the SHELF book API.

pub mod client;
pub mod views;

pub use client::{BooksClient, ClientError};
pub use views::{AdminView, BookEdit, CatalogView};
