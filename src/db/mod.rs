//! Persistence module split across logical submodules.

mod books;
mod connection;
mod loans;
mod users;

pub use books::{create_book, delete_book, fetch_books, update_book};
pub use connection::{apply_schema, ensure_schema};
pub use loans::{borrow_book, fetch_loans_for_user, return_book};
pub use users::{authenticate, register_user};
