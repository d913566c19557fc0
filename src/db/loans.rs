use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use crate::error::{LibraryError, Result};
use crate::models::{Loan, User};

/// Borrow a book for the given user. The availability check and both writes
/// (loan row insert, flag flip) run inside one immediate transaction, so a
/// failure at any point leaves the database exactly as it was and two
/// concurrent borrowers of the same book cannot both commit.
pub fn borrow_book(conn: &mut Connection, user: &User, book_id: i64) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let row = tx
        .query_row(
            "SELECT title, available FROM books WHERE id = ?1",
            params![book_id],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?)),
        )
        .optional()?;

    let (title, available) = row.ok_or(LibraryError::BookNotFound)?;
    if !available {
        // Dropping the transaction rolls it back; nothing was written.
        return Err(LibraryError::AlreadyBorrowed { title });
    }

    tx.execute(
        "INSERT INTO borrowed_books (user_id, book_id) VALUES (?1, ?2)",
        params![user.id, book_id],
    )?;
    tx.execute(
        "UPDATE books SET available = 0 WHERE id = ?1",
        params![book_id],
    )?;

    tx.commit()?;
    Ok(())
}

/// Return a book previously borrowed by the given user. Mirrors the borrow
/// path: the loan lookup, the loan delete, and the flag flip share one
/// transaction.
pub fn return_book(conn: &mut Connection, user: &User, book_id: i64) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let title = tx
        .query_row(
            "SELECT title FROM books WHERE id = ?1",
            params![book_id],
            |row| row.get::<_, String>(0),
        )
        .optional()?
        .ok_or(LibraryError::BookNotFound)?;

    let holds_loan = tx
        .query_row(
            "SELECT 1 FROM borrowed_books WHERE user_id = ?1 AND book_id = ?2",
            params![user.id, book_id],
            |_| Ok(()),
        )
        .optional()?
        .is_some();

    if !holds_loan {
        return Err(LibraryError::NotBorrowedByUser { title });
    }

    tx.execute(
        "DELETE FROM borrowed_books WHERE user_id = ?1 AND book_id = ?2",
        params![user.id, book_id],
    )?;
    tx.execute(
        "UPDATE books SET available = 1 WHERE id = ?1",
        params![book_id],
    )?;

    tx.commit()?;
    Ok(())
}

/// List the active loans held by one user. The catalog screen uses this to
/// mark rows the session user can return.
pub fn fetch_loans_for_user(conn: &Connection, user_id: i64) -> Result<Vec<Loan>> {
    let mut stmt =
        conn.prepare("SELECT user_id, book_id FROM borrowed_books WHERE user_id = ?1")?;

    let loans = stmt
        .query_map(params![user_id], |row| {
            Ok(Loan {
                user_id: row.get(0)?,
                book_id: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(loans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::books::{create_book, fetch_books};
    use crate::db::connection::apply_schema;
    use crate::models::Role;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        conn
    }

    fn test_user(id: i64) -> User {
        User {
            id,
            username: format!("user{id}"),
            password: "secret".to_string(),
            role: Role::User,
        }
    }

    /// `available == false` exactly for the books with an active loan row.
    fn assert_availability_invariant(conn: &Connection) {
        for book in fetch_books(conn).unwrap() {
            let loaned: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM borrowed_books WHERE book_id = ?1",
                    [book.id],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(
                book.available,
                loaned == 0,
                "invariant violated for book {}",
                book.id
            );
        }
    }

    #[test]
    fn borrow_flips_availability_and_records_the_loan() {
        let mut conn = test_conn();
        let book = create_book(&conn, "Dune", "Frank Herbert").unwrap();
        let user = test_user(1);

        borrow_book(&mut conn, &user, book.id).unwrap();

        let books = fetch_books(&conn).unwrap();
        assert!(!books[0].available);
        let loans = fetch_loans_for_user(&conn, user.id).unwrap();
        assert_eq!(
            loans,
            vec![Loan {
                user_id: user.id,
                book_id: book.id
            }]
        );
        assert_availability_invariant(&conn);
    }

    #[test]
    fn return_restores_availability_and_erases_the_loan() {
        let mut conn = test_conn();
        let book = create_book(&conn, "Dune", "Frank Herbert").unwrap();
        let user = test_user(1);
        borrow_book(&mut conn, &user, book.id).unwrap();

        return_book(&mut conn, &user, book.id).unwrap();

        let books = fetch_books(&conn).unwrap();
        assert!(books[0].available);
        assert!(fetch_loans_for_user(&conn, user.id).unwrap().is_empty());
        assert_availability_invariant(&conn);
    }

    #[test]
    fn borrowing_an_unavailable_book_fails_without_writes() {
        let mut conn = test_conn();
        let book = create_book(&conn, "Dune", "Frank Herbert").unwrap();
        let first = test_user(1);
        let second = test_user(2);
        borrow_book(&mut conn, &first, book.id).unwrap();

        let err = borrow_book(&mut conn, &second, book.id).unwrap_err();
        assert!(matches!(err, LibraryError::AlreadyBorrowed { ref title } if title == "Dune"));

        // The first borrower's loan is the only row and the flag is untouched.
        assert!(fetch_loans_for_user(&conn, second.id).unwrap().is_empty());
        assert_eq!(fetch_loans_for_user(&conn, first.id).unwrap().len(), 1);
        assert!(!fetch_books(&conn).unwrap()[0].available);
        assert_availability_invariant(&conn);
    }

    #[test]
    fn returning_a_book_you_do_not_hold_fails_without_writes() {
        let mut conn = test_conn();
        let book = create_book(&conn, "Dune", "Frank Herbert").unwrap();
        let holder = test_user(1);
        let other = test_user(2);
        borrow_book(&mut conn, &holder, book.id).unwrap();

        let err = return_book(&mut conn, &other, book.id).unwrap_err();
        assert!(matches!(err, LibraryError::NotBorrowedByUser { ref title } if title == "Dune"));

        assert_eq!(fetch_loans_for_user(&conn, holder.id).unwrap().len(), 1);
        assert!(!fetch_books(&conn).unwrap()[0].available);
        assert_availability_invariant(&conn);
    }

    #[test]
    fn returning_with_no_loan_at_all_fails() {
        let mut conn = test_conn();
        let book = create_book(&conn, "Dune", "Frank Herbert").unwrap();
        let user = test_user(1);

        let err = return_book(&mut conn, &user, book.id).unwrap_err();
        assert!(matches!(err, LibraryError::NotBorrowedByUser { .. }));
        assert!(fetch_books(&conn).unwrap()[0].available);
    }

    #[test]
    fn borrowing_a_missing_book_reports_not_found() {
        let mut conn = test_conn();
        let user = test_user(1);
        let err = borrow_book(&mut conn, &user, 42).unwrap_err();
        assert!(matches!(err, LibraryError::BookNotFound));
        let err = return_book(&mut conn, &user, 42).unwrap_err();
        assert!(matches!(err, LibraryError::BookNotFound));
    }

    #[test]
    fn invariant_holds_across_a_mixed_sequence() {
        let mut conn = test_conn();
        let dune = create_book(&conn, "Dune", "Frank Herbert").unwrap();
        let emma = create_book(&conn, "Emma", "Jane Austen").unwrap();
        let alice = test_user(1);
        let bob = test_user(2);

        borrow_book(&mut conn, &alice, dune.id).unwrap();
        borrow_book(&mut conn, &bob, emma.id).unwrap();
        assert_availability_invariant(&conn);

        return_book(&mut conn, &alice, dune.id).unwrap();
        assert_availability_invariant(&conn);

        borrow_book(&mut conn, &bob, dune.id).unwrap();
        assert!(borrow_book(&mut conn, &alice, dune.id).is_err());
        assert_availability_invariant(&conn);
    }
}
