//! Login form with username, password, "remember me" and an inline error line.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::layout::centered_box;
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;

const CARD_WIDTH: u16 = 52;
const CARD_HEIGHT: u16 = 19;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
    Remember,
    Submit,
}

impl LoginField {
    const ORDER: [LoginField; 4] = [
        LoginField::Username,
        LoginField::Password,
        LoginField::Remember,
        LoginField::Submit,
    ];

    fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|&f| f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|&f| f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Outcome of one input event on the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginResult {
    Consumed,
    LoggedIn,
    Ignored,
}

pub struct LoginState {
    pub username: InputBuffer,
    pub password: InputBuffer,
    pub remember: bool,
    pub show_password: bool,
    pub error: Option<String>,
    pub focus: LoginField,
}

impl Default for LoginState {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginState {
    pub fn new() -> Self {
        Self {
            username: InputBuffer::new(),
            password: InputBuffer::new(),
            remember: false,
            show_password: false,
            error: None,
            focus: LoginField::Username,
        }
    }

    /// Pre-fill from the remember store. Called once per mount.
    pub fn load(&mut self, services: &Services) {
        if let Some(saved) = services.gate.remembered() {
            self.username = InputBuffer::with_text(saved.username);
            self.password = InputBuffer::with_text(saved.password);
            self.remember = true;
            log::debug!("Login form pre-filled from remember store");
        }
    }

    /// Validate the form and ask the gate to log in.
    pub fn submit(&mut self, services: &Services) -> LoginResult {
        // Both fields are required; an empty one takes focus instead of submitting.
        if self.username.text().is_empty() {
            self.focus = LoginField::Username;
            return LoginResult::Consumed;
        }
        if self.password.text().is_empty() {
            self.focus = LoginField::Password;
            return LoginResult::Consumed;
        }

        match services
            .gate
            .login(self.username.text(), self.password.text(), self.remember)
        {
            Ok(()) => {
                self.error = None;
                LoginResult::LoggedIn
            }
            Err(e) => {
                self.error = Some(e.to_string());
                LoginResult::Consumed
            }
        }
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> LoginResult {
        let Event::Key(key @ KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return LoginResult::Ignored;
        };

        match (*modifiers, *code) {
            (KeyModifiers::CONTROL, KeyCode::Char('r')) => {
                self.remember = !self.remember;
                LoginResult::Consumed
            }
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
                self.show_password = !self.show_password;
                LoginResult::Consumed
            }
            (_, KeyCode::Tab | KeyCode::Down) => {
                self.focus = self.focus.next();
                LoginResult::Consumed
            }
            (_, KeyCode::BackTab | KeyCode::Up) => {
                self.focus = self.focus.prev();
                LoginResult::Consumed
            }
            (_, KeyCode::Enter) if self.focus == LoginField::Remember => {
                self.remember = !self.remember;
                LoginResult::Consumed
            }
            (_, KeyCode::Enter) => self.submit(services),
            (KeyModifiers::NONE, KeyCode::Char(' ')) if self.focus == LoginField::Remember => {
                self.remember = !self.remember;
                LoginResult::Consumed
            }
            _ => {
                let field = match self.focus {
                    LoginField::Username => &mut self.username,
                    LoginField::Password => &mut self.password,
                    LoginField::Remember | LoginField::Submit => return LoginResult::Ignored,
                };
                if field.handle_key(key) {
                    LoginResult::Consumed
                } else {
                    LoginResult::Ignored
                }
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let card = centered_box(CARD_WIDTH, CARD_HEIGHT, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_BASE));
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let [title, subtitle, _, user_label, user_field, _, pass_label, pass_field, _, remember, _, submit, _, error, hints] =
            Layout::vertical([
                Constraint::Length(1), // title
                Constraint::Length(1), // subtitle
                Constraint::Length(1),
                Constraint::Length(1), // username label
                Constraint::Length(1), // username input
                Constraint::Length(1),
                Constraint::Length(1), // password label
                Constraint::Length(1), // password input
                Constraint::Length(1),
                Constraint::Length(1), // remember me
                Constraint::Length(1),
                Constraint::Length(1), // sign in
                Constraint::Length(1),
                Constraint::Length(1), // error
                Constraint::Min(0),    // hints
            ])
            .areas(inner.inner(ratatui::layout::Margin::new(2, 0)));

        frame.render_widget(
            Paragraph::new(Span::styled("Admin Login", theme::title())).alignment(Alignment::Center),
            title,
        );
        frame.render_widget(
            Paragraph::new(Span::styled("Sign in to access the admin panel.", theme::muted()))
                .alignment(Alignment::Center),
            subtitle,
        );

        self.render_field(frame, user_label, user_field, "Username", self.username.text().to_string(), LoginField::Username);
        let shown = if self.show_password {
            self.password.text().to_string()
        } else {
            self.password.masked()
        };
        self.render_field(frame, pass_label, pass_field, "Password", shown, LoginField::Password);

        let check = if self.remember { "[x]" } else { "[ ]" };
        let remember_style = if self.focus == LoginField::Remember {
            theme::highlight()
        } else {
            Style::default().fg(theme::TEXT)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!("{check} Remember me"), remember_style)),
            remember,
        );

        let submit_style = if self.focus == LoginField::Submit {
            theme::insert_badge()
        } else {
            theme::brand_badge()
        };
        frame.render_widget(
            Paragraph::new(Span::styled("  Sign In  ", submit_style)).alignment(Alignment::Center),
            submit,
        );

        if let Some(ref message) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    message.as_str(),
                    Style::default().fg(theme::ERROR).add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
                error,
            );
        }

        frame.render_widget(
            Paragraph::new(vec![
                Line::from(vec![
                    Span::styled("Tab", theme::key_hint()),
                    Span::styled(":next  ", theme::dim()),
                    Span::styled("Ctrl+R", theme::key_hint()),
                    Span::styled(":remember  ", theme::dim()),
                    Span::styled("Ctrl+S", theme::key_hint()),
                    Span::styled(":show", theme::dim()),
                ]),
            ])
            .alignment(Alignment::Center),
            hints,
        );

        // Terminal cursor inside the focused text field.
        let cursor_field = match self.focus {
            LoginField::Username => Some((user_field, self.username.cursor_column())),
            LoginField::Password => Some((pass_field, self.password.cursor_column())),
            _ => None,
        };
        if let Some((field, column)) = cursor_field {
            let x = field.x + 1 + column as u16;
            if x < field.x + field.width {
                frame.set_cursor_position(Position::new(x, field.y));
            }
        }
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        label_area: Rect,
        input_area: Rect,
        label: &str,
        value: String,
        field: LoginField,
    ) {
        let focused = self.focus == field;
        frame.render_widget(
            Paragraph::new(Span::styled(label.to_string(), theme::heading())),
            label_area,
        );
        let style = if focused {
            Style::default().fg(theme::TEXT).bg(theme::BG_SURFACE)
        } else {
            Style::default().fg(theme::TEXT_MUTED).bg(theme::BG_SURFACE)
        };
        let marker = if focused { "▌" } else { " " };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(theme::PRIMARY_LIGHT)),
                Span::raw(value),
            ]))
            .style(style),
            input_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::CredentialGate;
    use crate::core::remember::{MemoryStore, RememberStore, RememberedLogin};
    use crate::core::seed::SeedData;
    use tokio::sync::mpsc;

    fn services_with(store: MemoryStore) -> Services {
        let (tx, _rx) = mpsc::unbounded_channel();
        Services::new(SeedData::default(), CredentialGate::new(Box::new(store)), tx)
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(state: &mut LoginState, services: &Services, text: &str) {
        for c in text.chars() {
            state.handle_input(&press(KeyCode::Char(c)), services);
        }
    }

    #[test]
    fn test_successful_login() {
        let services = services_with(MemoryStore::new());
        let mut state = LoginState::new();
        type_text(&mut state, &services, "budstech");
        state.handle_input(&press(KeyCode::Tab), &services);
        type_text(&mut state, &services, "12345");
        assert_eq!(
            state.handle_input(&press(KeyCode::Enter), &services),
            LoginResult::LoggedIn
        );
        assert!(state.error.is_none());
    }

    #[test]
    fn test_invalid_login_shows_inline_error() {
        let services = services_with(MemoryStore::new());
        let mut state = LoginState::new();
        type_text(&mut state, &services, "budstech");
        state.handle_input(&press(KeyCode::Tab), &services);
        type_text(&mut state, &services, "nope");
        assert_eq!(
            state.handle_input(&press(KeyCode::Enter), &services),
            LoginResult::Consumed
        );
        assert_eq!(state.error.as_deref(), Some("Invalid username or password."));

        // Form stays usable for a retry.
        for _ in 0..4 {
            state.handle_input(&press(KeyCode::Backspace), &services);
        }
        type_text(&mut state, &services, "12345");
        assert_eq!(
            state.handle_input(&press(KeyCode::Enter), &services),
            LoginResult::LoggedIn
        );
    }

    #[test]
    fn test_empty_fields_are_required() {
        let services = services_with(MemoryStore::new());
        let mut state = LoginState::new();
        state.focus = LoginField::Submit;
        assert_eq!(state.submit(&services), LoginResult::Consumed);
        assert_eq!(state.focus, LoginField::Username);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_prefill_from_store() {
        let store = MemoryStore::new();
        store
            .save(&RememberedLogin {
                username: "budstech".into(),
                password: "12345".into(),
            })
            .unwrap();
        let services = services_with(store);
        let mut state = LoginState::new();
        state.load(&services);
        assert_eq!(state.username.text(), "budstech");
        assert_eq!(state.password.text(), "12345");
        assert!(state.remember);
    }

    #[test]
    fn test_toggles() {
        let services = services_with(MemoryStore::new());
        let mut state = LoginState::new();
        state.handle_input(&ctrl('r'), &services);
        assert!(state.remember);
        state.handle_input(&ctrl('s'), &services);
        assert!(state.show_password);

        state.focus = LoginField::Remember;
        state.handle_input(&press(KeyCode::Char(' ')), &services);
        assert!(!state.remember);
        state.handle_input(&press(KeyCode::Enter), &services);
        assert!(state.remember);
    }

    #[test]
    fn test_focus_cycle() {
        let services = services_with(MemoryStore::new());
        let mut state = LoginState::new();
        state.handle_input(&press(KeyCode::BackTab), &services);
        assert_eq!(state.focus, LoginField::Submit);
        state.handle_input(&press(KeyCode::Tab), &services);
        assert_eq!(state.focus, LoginField::Username);
    }
}
