use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Book, Role};

/// Form state for the login screen.
#[derive(Default, Clone)]
pub(crate) struct LoginForm {
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) active: LoginField,
    pub(crate) error: Option<String>,
}

/// Fields available within the login form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum LoginField {
    #[default]
    Username,
    Password,
}

impl LoginForm {
    /// Swap focus between the username and password fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    /// Append a character to the active field.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            LoginField::Username => self.username.push(ch),
            LoginField::Password => self.password.push(ch),
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            LoginField::Username => {
                self.username.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }

    /// Render a styled line for the form, masking the password field.
    pub(crate) fn build_line(&self, field_name: &str, field: LoginField) -> Line<'static> {
        let (value, is_active, mask) = match field {
            LoginField::Username => (&self.username, self.active == LoginField::Username, false),
            LoginField::Password => (&self.password, self.active == LoginField::Password, true),
        };

        let display = if mask {
            "*".repeat(value.chars().count())
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: LoginField) -> usize {
        match field {
            LoginField::Username => self.username.chars().count(),
            LoginField::Password => self.password.chars().count(),
        }
    }
}

/// Form state for the registration dialog. Role defaults to `USER`, matching
/// the first entry of the original role picker.
#[derive(Clone)]
pub(crate) struct RegisterForm {
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) role: Role,
    pub(crate) active: RegisterField,
    pub(crate) error: Option<String>,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            role: Role::User,
            active: RegisterField::Username,
            error: None,
        }
    }
}

/// Fields available within the registration form.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum RegisterField {
    Username,
    Password,
    Role,
}

impl RegisterForm {
    /// Cycle focus across the three fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            RegisterField::Username => RegisterField::Password,
            RegisterField::Password => RegisterField::Role,
            RegisterField::Role => RegisterField::Username,
        };
    }

    /// Append a character to the active text field. A space on the role field
    /// flips the role instead of inserting text.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            RegisterField::Username | RegisterField::Password if ch.is_control() => false,
            RegisterField::Username => {
                self.username.push(ch);
                true
            }
            RegisterField::Password => {
                self.password.push(ch);
                true
            }
            RegisterField::Role => {
                if ch == ' ' {
                    self.toggle_role();
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Remove the last character from the active text field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            RegisterField::Username => {
                self.username.pop();
            }
            RegisterField::Password => {
                self.password.pop();
            }
            RegisterField::Role => {}
        }
    }

    /// Flip between the two roles.
    pub(crate) fn toggle_role(&mut self) {
        self.role = self.role.toggle();
    }

    /// Render a styled line for the dialog, masking the password field and
    /// showing the role as a picker.
    pub(crate) fn build_line(&self, field_name: &str, field: RegisterField) -> Line<'static> {
        let is_active = self.active == field;

        let display = match field {
            RegisterField::Username => self.username.clone(),
            RegisterField::Password => "*".repeat(self.password.chars().count()),
            RegisterField::Role => format!("< {} >", self.role),
        };

        let empty = match field {
            RegisterField::Username => self.username.is_empty(),
            RegisterField::Password => self.password.is_empty(),
            RegisterField::Role => false,
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if empty {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: RegisterField) -> usize {
        match field {
            RegisterField::Username => self.username.chars().count(),
            RegisterField::Password => self.password.chars().count(),
            RegisterField::Role => 0,
        }
    }
}

/// Form state for adding or editing a catalog entry. Titles and authors are
/// stored as typed; there is deliberately no emptiness or duplicate check.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

/// Fields available within the book form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
}

impl BookForm {
    /// Populate the form from an existing book when editing.
    pub(crate) fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            active: BookField::Title,
            error: None,
        }
    }

    /// Swap focus between the title and author fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Title,
        };
    }

    /// Append a character to the active field.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            BookField::Title => self.title.push(ch),
            BookField::Author => self.author.push(ch),
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            BookField::Title => {
                self.title.pop();
            }
            BookField::Author => {
                self.author.pop();
            }
        }
    }

    /// The values handed to the persistence layer, whitespace-trimmed.
    pub(crate) fn values(&self) -> (String, String) {
        (
            self.title.trim().to_string(),
            self.author.trim().to_string(),
        )
    }

    /// Render a styled line for the modal form.
    pub(crate) fn build_line(&self, field_name: &str, field: BookField) -> Line<'static> {
        let (value, is_active) = match field {
            BookField::Title => (&self.title, self.active == BookField::Title),
            BookField::Author => (&self.author, self.active == BookField::Author),
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(value.clone(), style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        match field {
            BookField::Title => self.title.chars().count(),
            BookField::Author => self.author.chars().count(),
        }
    }
}

/// State for confirming a permanent catalog delete.
#[derive(Clone)]
pub(crate) struct ConfirmBookDelete {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) author: String,
}

impl ConfirmBookDelete {
    /// Build the confirmation state from the book being considered.
    pub(crate) fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_masks_password_but_counts_characters() {
        let mut form = LoginForm::default();
        form.toggle_field();
        assert!(form.push_char('a'));
        assert!(form.push_char('b'));
        assert_eq!(form.value_len(LoginField::Password), 2);
        assert_eq!(form.value_len(LoginField::Username), 0);
        form.backspace();
        assert_eq!(form.password, "a");
    }

    #[test]
    fn register_form_space_toggles_role_only_when_focused() {
        let mut form = RegisterForm::default();
        assert!(form.push_char(' '), "space is a valid username character");
        assert_eq!(form.username, " ");
        assert_eq!(form.role, Role::User);

        form.active = RegisterField::Role;
        assert!(form.push_char(' '));
        assert_eq!(form.role, Role::Admin);
        assert!(!form.push_char('x'));
    }

    #[test]
    fn book_form_accepts_empty_values() {
        let form = BookForm::default();
        let (title, author) = form.values();
        assert_eq!(title, "");
        assert_eq!(author, "");
    }

    #[test]
    fn book_form_focus_cycles_between_fields() {
        let mut form = BookForm::default();
        assert_eq!(form.active, BookField::Title);
        form.toggle_field();
        assert_eq!(form.active, BookField::Author);
        form.toggle_field();
        assert_eq!(form.active, BookField::Title);
    }
}
