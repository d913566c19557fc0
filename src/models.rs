//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. The intent is that these types stay light-weight data holders so other
//! layers can focus on presentation and persistence logic.

use std::fmt;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;

/// Access level stored with each user row. The role decides which catalog
/// operations a session may perform: admins manage the catalog, users borrow
/// and return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// The TEXT value persisted in the `role` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// Flip between the two roles. Used by the registration form when the
    /// role field is focused.
    pub fn toggle(&self) -> Role {
        match self {
            Role::User => Role::Admin,
            Role::Admin => Role::User,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromSql for Role {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(FromSqlError::Other(
                format!("unknown role value: {other}").into(),
            )),
        }
    }
}

impl ToSql for Role {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

#[derive(Debug, Clone)]
/// Catalog entry shown in the main table. `available` is false exactly while
/// an active loan row references this book; the loan workflow keeps the two
/// in sync inside a single transaction.
pub struct Book {
    /// Primary key from the database. Edit/delete/borrow flows bubble the id
    /// back to the persistence layer.
    pub id: i64,
    /// Title displayed in the catalog table.
    pub title: String,
    /// Author displayed next to the title.
    pub author: String,
    /// Whether the book can currently be borrowed.
    pub available: bool,
}

impl Book {
    /// The Yes/No text rendered in the table's availability column.
    pub fn availability_label(&self) -> &'static str {
        if self.available {
            "Yes"
        } else {
            "No"
        }
    }
}

#[derive(Debug, Clone)]
/// A stored account. `password` holds the protected form produced by the
/// active `PasswordScheme`; authentication never compares raw input against
/// it directly.
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An active borrow relationship. Returning the book deletes the row, so no
/// loan history survives a return.
pub struct Loan {
    pub user_id: i64,
    pub book_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_text() {
        assert_eq!(Role::User.as_str(), "USER");
        assert_eq!(Role::Admin.as_str(), "ADMIN");
        assert_eq!(Role::User.toggle(), Role::Admin);
        assert_eq!(Role::Admin.toggle(), Role::User);
    }

    #[test]
    fn availability_label_matches_flag() {
        let mut book = Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            available: true,
        };
        assert_eq!(book.availability_label(), "Yes");
        book.available = false;
        assert_eq!(book.availability_label(), "No");
    }
}
