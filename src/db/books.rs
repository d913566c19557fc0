use rusqlite::{params, Connection};

use crate::error::Result;
use crate::models::Book;

/// Retrieve the whole catalog in storage order. Callers re-run this after
/// every mutation instead of patching their in-memory copy, so the query is
/// the single source of truth for what the table shows.
pub fn fetch_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn.prepare("SELECT id, title, author, available FROM books")?;

    let books = stmt
        .query_map([], |row| {
            Ok(Book {
                id: row.get(0)?,
                title: row.get(1)?,
                author: row.get(2)?,
                available: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(books)
}

/// Insert a new book, available by default, returning the hydrated struct so
/// the caller can focus the new row after reloading. Titles are stored as
/// typed: no emptiness or duplicate checks.
pub fn create_book(conn: &Connection, title: &str, author: &str) -> Result<Book> {
    conn.execute(
        "INSERT INTO books (title, author, available) VALUES (?1, ?2, 1)",
        params![title, author],
    )?;

    let id = conn.last_insert_rowid();
    Ok(Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        available: true,
    })
}

/// Overwrite title and author for an existing book. The availability flag is
/// owned by the loan workflow and is never touched here. An id that matches
/// no row updates nothing and is not reported.
pub fn update_book(conn: &Connection, id: i64, title: &str, author: &str) -> Result<()> {
    conn.execute(
        "UPDATE books SET title = ?1, author = ?2 WHERE id = ?3",
        params![title, author, id],
    )?;

    Ok(())
}

/// Remove a book row. Loan rows referencing the id are left behind; the
/// schema has no cascade and the catalog does not know about loans.
pub fn delete_book(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM books WHERE id = ?1", params![id])?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::apply_schema;
    use crate::db::loans::fetch_loans_for_user;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn create_then_fetch_round_trips() {
        let conn = test_conn();
        let created = create_book(&conn, "Dune", "Frank Herbert").unwrap();
        assert!(created.available);

        let books = fetch_books(&conn).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, created.id);
        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[0].author, "Frank Herbert");
        assert!(books[0].available);
    }

    #[test]
    fn update_overwrites_title_and_author_only() {
        let conn = test_conn();
        let book = create_book(&conn, "Dune", "F. Herbert").unwrap();
        conn.execute("UPDATE books SET available = 0 WHERE id = ?1", [book.id])
            .unwrap();

        update_book(&conn, book.id, "Dune Messiah", "Frank Herbert").unwrap();

        let books = fetch_books(&conn).unwrap();
        assert_eq!(books[0].title, "Dune Messiah");
        assert_eq!(books[0].author, "Frank Herbert");
        assert!(!books[0].available, "update must not touch availability");
    }

    #[test]
    fn update_of_missing_id_is_a_silent_no_op() {
        let conn = test_conn();
        update_book(&conn, 999, "Ghost", "Nobody").unwrap();
        assert!(fetch_books(&conn).unwrap().is_empty());
    }

    #[test]
    fn delete_removes_the_row() {
        let conn = test_conn();
        let keep = create_book(&conn, "Dune", "Frank Herbert").unwrap();
        let gone = create_book(&conn, "Emma", "Jane Austen").unwrap();

        delete_book(&conn, gone.id).unwrap();

        let books = fetch_books(&conn).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, keep.id);

        delete_book(&conn, gone.id).unwrap();
    }

    #[test]
    fn delete_orphans_existing_loan_rows() {
        let conn = test_conn();
        let book = create_book(&conn, "Dune", "Frank Herbert").unwrap();
        conn.execute(
            "INSERT INTO borrowed_books (user_id, book_id) VALUES (1, ?1)",
            [book.id],
        )
        .unwrap();

        delete_book(&conn, book.id).unwrap();

        let loans = fetch_loans_for_user(&conn, 1).unwrap();
        assert_eq!(loans.len(), 1, "no cascade: the loan row survives");
        assert_eq!(loans[0].book_id, book.id);
    }
}
