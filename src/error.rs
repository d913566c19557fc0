//! Error taxonomy shared by the persistence layer and the UI. Workflow
//! violations carry enough context to render a friendly footer message, while
//! anything that goes wrong inside SQLite collapses into `DataAccess`. The
//! `Display` text of each variant is exactly what the UI shows the user.

use thiserror::Error;

/// Failures surfaced by catalog, loan, and authentication operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The connection or a statement failed. The UI treats this as fatal for
    /// the current operation and leaves whatever it was showing on screen.
    #[error("database error: {0}")]
    DataAccess(#[from] rusqlite::Error),

    /// Borrow attempted on a book whose availability flag is already off.
    #[error("\"{title}\" is already borrowed.")]
    AlreadyBorrowed { title: String },

    /// Return attempted by a user who holds no loan for this book.
    #[error("You have not borrowed \"{title}\".")]
    NotBorrowedByUser { title: String },

    /// Username/password pair matched no stored user.
    #[error("Invalid username or password.")]
    InvalidCredentials,

    /// The referenced book id no longer exists in the catalog.
    #[error("Book not found.")]
    BookNotFound,
}

/// Shorthand used throughout the `db` module.
pub type Result<T> = std::result::Result<T, LibraryError>;
