//! Core library surface for the Library Lending Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: the persistence layer, the domain models, and the interactive app.
pub mod credentials;
pub mod db;
pub mod error;
pub mod models;
pub mod ui;

/// Convenience re-export for the persistence layer. `main.rs` uses this to
/// initialize the embedded SQLite store.
pub use db::ensure_schema;

/// The error taxonomy every persistence function reports through.
pub use error::LibraryError;

/// The primary domain types that other layers manipulate.
pub use models::{Book, Loan, Role, User};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
