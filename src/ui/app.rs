use std::collections::HashSet;
use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::credentials::PlainText;
use crate::db::{
    authenticate, borrow_book, create_book, delete_book, fetch_books, fetch_loans_for_user,
    register_user, return_book, update_book,
};
use crate::models::{Book, Role, User};

use super::forms::{
    BookField, BookForm, ConfirmBookDelete, LoginField, LoginForm, RegisterField, RegisterForm,
};
use super::helpers::{centered_rect, surface_error};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// High-level navigation states. The catalog screen carries the signed-in
/// user so every loan call receives the session context explicitly.
enum Screen {
    Login(LoginForm),
    Catalog { user: User },
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    Registering(RegisterForm),
    AddingBook(BookForm),
    EditingBook { id: i64, form: BookForm },
    ConfirmDelete(ConfirmBookDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    conn: Connection,
    scheme: PlainText,
    books: Vec<Book>,
    /// Ids of books currently borrowed by the session user; drives the
    /// "No (you)" marker in the availability column.
    my_loans: HashSet<i64>,
    selected: usize,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            scheme: PlainText,
            books: Vec::new(),
            my_loans: HashSet::new(),
            selected: 0,
            screen: Screen::Login(LoginForm::default()),
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Registering(form) => self.handle_register(code, form)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form)?,
            Mode::EditingBook { id, form } => self.handle_edit_book(code, id, form)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    /// Ctrl+R opens the registration dialog from the login screen.
    pub(crate) fn handle_ctrl_r(&mut self) -> Result<()> {
        if matches!(self.screen, Screen::Login(_)) && matches!(self.mode, Mode::Normal) {
            self.clear_status();
            self.mode = Mode::Registering(RegisterForm::default());
        }
        Ok(())
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Login(_) => self.handle_login_key(code, exit),
            Screen::Catalog { .. } => self.handle_catalog_key(code, exit),
        }
    }

    fn handle_login_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let mut submit = false;

        if let Screen::Login(form) = &mut self.screen {
            match code {
                KeyCode::Esc => *exit = true,
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                    form.toggle_field()
                }
                KeyCode::Backspace => form.backspace(),
                KeyCode::Enter => submit = true,
                KeyCode::Char(ch) => {
                    if form.push_char(ch) {
                        form.error = None;
                    }
                }
                _ => {}
            }
        }

        if submit {
            self.attempt_login()?;
        }
        Ok(Mode::Normal)
    }

    fn attempt_login(&mut self) -> Result<()> {
        let (username, password) = match &self.screen {
            Screen::Login(form) => (form.username.clone(), form.password.clone()),
            Screen::Catalog { .. } => return Ok(()),
        };

        match authenticate(&self.conn, &self.scheme, &username, &password) {
            Ok(user) => {
                let greeting = format!("Signed in as {} ({}).", user.username, user.role);
                self.screen = Screen::Catalog { user };
                self.reload_catalog(None)?;
                self.set_status(greeting, StatusKind::Info);
            }
            Err(err) => {
                let message = err.to_string();
                if let Screen::Login(form) = &mut self.screen {
                    form.error = Some(message.clone());
                    form.password.clear();
                }
                self.set_status(message, StatusKind::Error);
            }
        }

        Ok(())
    }

    fn handle_catalog_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let role = match &self.screen {
            Screen::Catalog { user } => user.role,
            Screen::Login(_) => return Ok(Mode::Normal),
        };

        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => *exit = true,
            KeyCode::Esc => self.logout(),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-5),
            KeyCode::PageDown => self.move_selection(5),
            KeyCode::Home => self.select_first(),
            KeyCode::End => self.select_last(),
            KeyCode::Char('b') | KeyCode::Char('B') if role == Role::User => {
                self.borrow_selected()?;
            }
            KeyCode::Char('r') | KeyCode::Char('R') if role == Role::User => {
                self.return_selected()?;
            }
            KeyCode::Char('+') if role == Role::Admin => {
                self.clear_status();
                return Ok(Mode::AddingBook(BookForm::default()));
            }
            KeyCode::Char('e') | KeyCode::Char('E') if role == Role::Admin => {
                if let Some(book) = self.current_book().cloned() {
                    self.clear_status();
                    return Ok(Mode::EditingBook {
                        id: book.id,
                        form: BookForm::from_book(&book),
                    });
                } else {
                    self.set_status("No book selected to edit.", StatusKind::Error);
                }
            }
            KeyCode::Char('-') if role == Role::Admin => {
                if let Some(book) = self.current_book().cloned() {
                    self.clear_status();
                    return Ok(Mode::ConfirmDelete(ConfirmBookDelete::from(book)));
                } else {
                    self.set_status("No book selected to delete.", StatusKind::Error);
                }
            }
            _ => {}
        }

        Ok(Mode::Normal)
    }

    fn handle_register(&mut self, code: KeyCode, mut form: RegisterForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Registration cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Left | KeyCode::Right if form.active == RegisterField::Role => {
                form.toggle_role()
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_user(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::Registering(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_book(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingBook(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_edit_book(&mut self, code: KeyCode, id: i64, mut form: BookForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Edit book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_existing_book(id, &form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::EditingBook { id, form })
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmBookDelete) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if let Err(err) = self.perform_delete(&confirm) {
                    self.set_status(surface_error(&err), StatusKind::Error);
                }
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.set_status("Delete cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    fn save_new_user(&mut self, form: &RegisterForm) -> Result<()> {
        let user = register_user(
            &self.conn,
            &self.scheme,
            &form.username,
            &form.password,
            form.role,
        )?;

        // Prefill the login form so the fresh account can sign straight in.
        if let Screen::Login(login) = &mut self.screen {
            login.username = user.username.clone();
            login.password.clear();
            login.error = None;
        }
        self.set_status(
            format!("Registered {} ({}).", user.username, user.role),
            StatusKind::Info,
        );
        Ok(())
    }

    fn save_new_book(&mut self, form: &BookForm) -> Result<()> {
        let (title, author) = form.values();
        let book = create_book(&self.conn, &title, &author)?;
        self.reload_catalog(Some(book.id))?;
        self.set_status(format!("Added \"{}\".", book.title), StatusKind::Info);
        Ok(())
    }

    fn save_existing_book(&mut self, id: i64, form: &BookForm) -> Result<()> {
        let (title, author) = form.values();
        update_book(&self.conn, id, &title, &author)?;
        self.reload_catalog(Some(id))?;
        self.set_status(format!("Updated \"{title}\"."), StatusKind::Info);
        Ok(())
    }

    fn perform_delete(&mut self, confirm: &ConfirmBookDelete) -> Result<()> {
        delete_book(&self.conn, confirm.id)?;
        self.reload_catalog(None)?;
        self.set_status(format!("Deleted \"{}\".", confirm.title), StatusKind::Info);
        Ok(())
    }

    fn borrow_selected(&mut self) -> Result<()> {
        let Some(book) = self.current_book().cloned() else {
            self.set_status("Select a book to borrow.", StatusKind::Error);
            return Ok(());
        };
        let user = match &self.screen {
            Screen::Catalog { user } => user.clone(),
            Screen::Login(_) => return Ok(()),
        };

        match borrow_book(&mut self.conn, &user, book.id) {
            Ok(()) => {
                self.reload_catalog(Some(book.id))?;
                self.set_status(format!("Borrowed \"{}\".", book.title), StatusKind::Info);
            }
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
        Ok(())
    }

    fn return_selected(&mut self) -> Result<()> {
        let Some(book) = self.current_book().cloned() else {
            self.set_status("Select a book to return.", StatusKind::Error);
            return Ok(());
        };
        let user = match &self.screen {
            Screen::Catalog { user } => user.clone(),
            Screen::Login(_) => return Ok(()),
        };

        match return_book(&mut self.conn, &user, book.id) {
            Ok(()) => {
                self.reload_catalog(Some(book.id))?;
                self.set_status(format!("Returned \"{}\".", book.title), StatusKind::Info);
            }
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
        Ok(())
    }

    fn logout(&mut self) {
        self.screen = Screen::Login(LoginForm::default());
        self.books.clear();
        self.my_loans.clear();
        self.selected = 0;
        self.set_status("Signed out.", StatusKind::Info);
    }

    /// Re-query the catalog and the session user's loans. Called after every
    /// mutation; the in-memory list is never patched incrementally.
    fn reload_catalog(&mut self, focus_id: Option<i64>) -> Result<()> {
        self.books = fetch_books(&self.conn)?;
        self.my_loans = match &self.screen {
            Screen::Catalog { user } => fetch_loans_for_user(&self.conn, user.id)?
                .into_iter()
                .map(|loan| loan.book_id)
                .collect(),
            Screen::Login(_) => HashSet::new(),
        };

        if self.books.is_empty() {
            self.selected = 0;
            return Ok(());
        }

        if let Some(id) = focus_id {
            if let Some((idx, _)) = self.books.iter().enumerate().find(|(_, b)| b.id == id) {
                self.selected = idx;
                return Ok(());
            }
        }

        if self.selected >= self.books.len() {
            self.selected = self.books.len().saturating_sub(1);
        }

        Ok(())
    }

    fn current_book(&self) -> Option<&Book> {
        self.books.get(self.selected)
    }

    fn move_selection(&mut self, delta: isize) {
        if self.books.is_empty() {
            return;
        }
        let last = (self.books.len() - 1) as isize;
        self.selected = (self.selected as isize + delta).clamp(0, last) as usize;
    }

    fn select_first(&mut self) {
        self.selected = 0;
    }

    fn select_last(&mut self) {
        self.selected = self.books.len().saturating_sub(1);
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Login(form) => self.draw_login(frame, content_area, form),
            Screen::Catalog { user } => self.draw_catalog(frame, content_area, user),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::Registering(form) => self.draw_register_form(frame, area, form),
            Mode::AddingBook(form) => self.draw_book_form(frame, area, "Add Book", form),
            Mode::EditingBook { form, .. } => self.draw_book_form(frame, area, "Edit Book", form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Normal => {}
        }
    }

    fn draw_login(&self, frame: &mut Frame, area: Rect, form: &LoginForm) {
        let popup_area = centered_rect(50, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Library Login").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let username_line = form.build_line("Username", LoginField::Username);
        let password_line = form.build_line("Password", LoginField::Password);

        let mut lines = vec![username_line, password_line, Line::from("")];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to sign in. Tab switches fields, Ctrl+R registers, Esc quits.",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        // The modal register dialog owns the cursor while it is open.
        if matches!(self.mode, Mode::Normal) {
            let (cursor_x, cursor_y) = match form.active {
                LoginField::Username => {
                    let prefix = "Username: ".len() as u16;
                    (
                        inner.x + prefix + form.value_len(LoginField::Username) as u16,
                        inner.y,
                    )
                }
                LoginField::Password => {
                    let prefix = "Password: ".len() as u16;
                    (
                        inner.x + prefix + form.value_len(LoginField::Password) as u16,
                        inner.y + 1,
                    )
                }
            };
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }

    fn draw_catalog(&self, frame: &mut Frame, area: Rect, user: &User) {
        let title = format!("Catalog - {} ({})", user.username, user.role);

        if self.books.is_empty() {
            let hint = if user.role == Role::Admin {
                "No books in the catalog yet. Press '+' to add one."
            } else {
                "No books in the catalog yet."
            };
            let message = Paragraph::new(hint)
                .alignment(Alignment::Center)
                .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(vec![
            Cell::from("ID"),
            Cell::from("Title"),
            Cell::from("Author"),
            Cell::from("Available"),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = self.books.iter().map(|book| {
            let availability = if book.available {
                book.availability_label().to_string()
            } else if self.my_loans.contains(&book.id) {
                "No (you)".to_string()
            } else {
                book.availability_label().to_string()
            };

            Row::new(vec![
                Cell::from(book.id.to_string()),
                Cell::from(book.title.clone()),
                Cell::from(book.author.clone()),
                Cell::from(availability),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Percentage(45),
                Constraint::Percentage(35),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = TableState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        match (&self.screen, &self.mode) {
            (_, Mode::Registering(_)) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Switch   "),
                Span::styled("[Space]", key_style),
                Span::raw(" Toggle role   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Create   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (_, Mode::AddingBook(_)) | (_, Mode::EditingBook { .. }) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Switch   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (_, Mode::ConfirmDelete(_)) => Line::from(vec![
                Span::styled("[Y]", key_style),
                Span::raw(" Confirm   "),
                Span::styled("[N]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Screen::Login(_), Mode::Normal) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Sign in   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Switch   "),
                Span::styled("[Ctrl+R]", key_style),
                Span::raw(" Register   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Quit"),
            ]),
            (Screen::Catalog { user }, Mode::Normal) if user.role == Role::Admin => {
                Line::from(vec![
                    Span::styled("[Up/Down]", key_style),
                    Span::raw(" Navigate   "),
                    Span::styled("[+]", key_style),
                    Span::raw(" Add   "),
                    Span::styled("[E]", key_style),
                    Span::raw(" Edit   "),
                    Span::styled("[-]", key_style),
                    Span::raw(" Delete   "),
                    Span::styled("[Esc]", key_style),
                    Span::raw(" Logout   "),
                    Span::styled("[Q]", key_style),
                    Span::raw(" Quit"),
                ])
            }
            (Screen::Catalog { .. }, Mode::Normal) => Line::from(vec![
                Span::styled("[Up/Down]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[B]", key_style),
                Span::raw(" Borrow   "),
                Span::styled("[R]", key_style),
                Span::raw(" Return   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Logout   "),
                Span::styled("[Q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_register_form(&self, frame: &mut Frame, area: Rect, form: &RegisterForm) {
        let popup_area = centered_rect(60, 45, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Register").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let username_line = form.build_line("Username", RegisterField::Username);
        let password_line = form.build_line("Password", RegisterField::Password);
        let role_line = form.build_line("Role", RegisterField::Role);

        let mut lines = vec![username_line, password_line, role_line, Line::from("")];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to create. Tab switches fields, Space toggles role, Esc cancels.",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let cursor = match form.active {
            RegisterField::Username => {
                let prefix = "Username: ".len() as u16;
                Some((
                    inner.x + prefix + form.value_len(RegisterField::Username) as u16,
                    inner.y,
                ))
            }
            RegisterField::Password => {
                let prefix = "Password: ".len() as u16;
                Some((
                    inner.x + prefix + form.value_len(RegisterField::Password) as u16,
                    inner.y + 1,
                ))
            }
            RegisterField::Role => None,
        };
        if let Some((cursor_x, cursor_y)) = cursor {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &BookForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let title_line = form.build_line("Title", BookField::Title);
        let author_line = form.build_line("Author", BookField::Author);

        let mut lines = vec![title_line, author_line, Line::from("")];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save. Tab switches fields, Esc cancels.",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (cursor_x, cursor_y) = match form.active {
            BookField::Title => {
                let prefix = "Title: ".len() as u16;
                (
                    inner.x + prefix + form.value_len(BookField::Title) as u16,
                    inner.y,
                )
            }
            BookField::Author => {
                let prefix = "Author: ".len() as u16;
                (
                    inner.x + prefix + form.value_len(BookField::Author) as u16,
                    inner.y + 1,
                )
            }
        };
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmBookDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Delete")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!(
                "Delete \"{}\" by {}?",
                confirm.title, confirm.author
            )),
            Line::from("Loan records for this book are left behind."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
