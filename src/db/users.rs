use rusqlite::{params, Connection};

use crate::credentials::PasswordScheme;
use crate::error::{LibraryError, Result};
use crate::models::{Role, User};

/// Look up a user by username and verify the supplied password through the
/// active scheme. Usernames are not unique in the schema, so every matching
/// row is considered; the first one whose stored password verifies wins. Any
/// mismatch collapses into `InvalidCredentials` so the login screen leaks
/// nothing about which half was wrong.
pub fn authenticate(
    conn: &Connection,
    scheme: &dyn PasswordScheme,
    username: &str,
    password: &str,
) -> Result<User> {
    let mut stmt =
        conn.prepare("SELECT id, username, password, role FROM users WHERE username = ?1")?;

    let candidates = stmt
        .query_map(params![username], |row| {
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                role: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    candidates
        .into_iter()
        .find(|user| scheme.verify(password, &user.password))
        .ok_or(LibraryError::InvalidCredentials)
}

/// Insert a new account, storing the scheme-protected password. No username
/// uniqueness check and no strength rule; the registration dialog accepts
/// whatever the user typed.
pub fn register_user(
    conn: &Connection,
    scheme: &dyn PasswordScheme,
    username: &str,
    password: &str,
    role: Role,
) -> Result<User> {
    let stored = scheme.protect(password);
    conn.execute(
        "INSERT INTO users (username, password, role) VALUES (?1, ?2, ?3)",
        params![username, stored, role],
    )?;

    let id = conn.last_insert_rowid();
    Ok(User {
        id,
        username: username.to_string(),
        password: stored,
        role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::PlainText;
    use crate::db::connection::apply_schema;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn register_then_authenticate_returns_matching_role() {
        let conn = test_conn();
        register_user(&conn, &PlainText, "alice", "wonderland", Role::Admin).unwrap();

        let user = authenticate(&conn, &PlainText, "alice", "wonderland").unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn wrong_password_is_invalid_credentials() {
        let conn = test_conn();
        register_user(&conn, &PlainText, "alice", "wonderland", Role::User).unwrap();

        let err = authenticate(&conn, &PlainText, "alice", "looking-glass").unwrap_err();
        assert!(matches!(err, LibraryError::InvalidCredentials));
    }

    #[test]
    fn unknown_username_is_invalid_credentials() {
        let conn = test_conn();
        let err = authenticate(&conn, &PlainText, "nobody", "anything").unwrap_err();
        assert!(matches!(err, LibraryError::InvalidCredentials));
    }

    #[test]
    fn duplicate_usernames_resolve_to_the_verifying_row() {
        let conn = test_conn();
        register_user(&conn, &PlainText, "pat", "first", Role::User).unwrap();
        let second = register_user(&conn, &PlainText, "pat", "second", Role::Admin).unwrap();

        let user = authenticate(&conn, &PlainText, "pat", "second").unwrap();
        assert_eq!(user.id, second.id);
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn stored_password_goes_through_the_scheme() {
        let conn = test_conn();
        let user = register_user(&conn, &PlainText, "alice", "wonderland", Role::User).unwrap();
        assert_eq!(user.password, "wonderland");
    }
}
