//! SHELF application library
//!
//! Domain modules for the library catalog: the book resource and the admin gate.

pub mod modules;

pub use modules::books::models::{Acknowledgement, Book, BookId, DeleteBook, NewBook};
pub use modules::register_all;
