//! Password handling behind a small seam so the stored format can change
//! without touching authentication callers.

/// Strategy for converting a password into its stored column value and for
/// checking a login attempt against that value.
pub trait PasswordScheme {
    /// Produce the value persisted in the `password` column.
    fn protect(&self, password: &str) -> String;

    /// Check a login attempt against the stored value.
    fn verify(&self, attempt: &str, stored: &str) -> bool;
}

/// Stores passwords exactly as typed. This matches the rows already present
/// in existing databases; replacing it with a hashing scheme requires
/// migrating those rows first.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainText;

impl PasswordScheme for PlainText {
    fn protect(&self, password: &str) -> String {
        password.to_string()
    }

    fn verify(&self, attempt: &str, stored: &str) -> bool {
        attempt == stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plaintext_protect_is_identity() {
        assert_eq!(PlainText.protect("hunter2"), "hunter2");
    }

    #[test]
    fn plaintext_verify_is_exact_equality() {
        assert!(PlainText.verify("hunter2", "hunter2"));
        assert!(!PlainText.verify("hunter2", "Hunter2"));
        assert!(!PlainText.verify("", "hunter2"));
    }
}
