use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, AreaFocus, Notification, NotificationLevel, Page};
use super::layout::{centered_rect, AppLayout};
use super::services::Services;
use super::sidebar::SidebarState;
use super::theme;
use super::views::dashboard::DashboardState;
use super::views::login::{LoginResult, LoginState};
use super::views::payments::PaymentsState;
use super::views::subscriptions::SubscriptionsState;

/// Pages mounted for the lifetime of a login.
///
/// Dropped on logout so the next login starts from the seed data.
pub struct Session {
    pub username: String,
    pub subscriptions: SubscriptionsState,
    pub payments: PaymentsState,
    pub dashboard: DashboardState,
}

impl Session {
    fn mount(username: String, services: &Services) -> Self {
        let subscriptions = SubscriptionsState::new(services.data.subscriptions.clone());
        let payments = PaymentsState::new(services.data.payments.clone());
        let dashboard = DashboardState::load(&services.data.subscriptions, &services.data.payments);
        Self {
            username,
            subscriptions,
            payments,
            dashboard,
        }
    }

    /// Whether the current page is capturing text input.
    fn is_typing(&self, page: Page) -> bool {
        match page {
            Page::Subscriptions => self.subscriptions.is_typing(),
            Page::PaymentDetails => self.payments.is_typing(),
            Page::Dashboard => false,
        }
    }
}

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Page shown once logged in.
    pub page: Page,
    /// Whether sidebar or main content has input focus.
    pub area_focus: AreaFocus,
    /// Sidebar navigation state.
    pub sidebar: SidebarState,
    /// Login form, shown while logged out.
    pub login: LoginState,
    /// Mounted pages; `None` while logged out.
    pub session: Option<Session>,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for events queued by views and services.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    services: Services,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        services: Services,
    ) -> Self {
        let mut login = LoginState::new();
        login.load(&services);
        Self {
            running: true,
            page: Page::default(),
            area_focus: AreaFocus::Main,
            sidebar: SidebarState::new(),
            login,
            session: None,
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            event_rx,
            services,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    /// Apply queued events without waiting. Used where no loop is running.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Ctrl+C quits from anywhere
                if is_ctrl_c(&crossterm_event) {
                    self.handle_action(Action::Quit);
                    return;
                }

                // Priority 2: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 3: Login form owns all input while logged out
                if !self.is_logged_in() {
                    match self.login.handle_input(&crossterm_event, &self.services) {
                        LoginResult::LoggedIn => self.handle_action(Action::LoggedIn),
                        LoginResult::Consumed => {}
                        LoginResult::Ignored => {
                            if let Some(Action::ShowHelp) = self.map_input_to_action(crossterm_event) {
                                self.handle_action(Action::ShowHelp);
                            }
                        }
                    }
                    return;
                }

                // Priority 4: Sidebar input (when focused)
                if self.area_focus == AreaFocus::Sidebar
                    && self.handle_sidebar_input(&crossterm_event)
                {
                    return;
                }

                // Priority 5: Current page
                if self.dispatch_view_input(&crossterm_event) {
                    return;
                }

                // Priority 6: Global keybindings
                if let Some(action) = self.map_input_to_action(crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    /// Dispatch input to the current page. Returns true if consumed.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        match self.page {
            Page::Subscriptions => session.subscriptions.handle_input(event, &self.services),
            Page::PaymentDetails => session.payments.handle_input(event),
            Page::Dashboard => false,
        }
    }

    /// Handle sidebar-specific input. Returns true if consumed.
    fn handle_sidebar_input(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.sidebar.select_next();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.sidebar.select_prev();
                true
            }
            (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char('l')) => {
                let page = self.sidebar.selected_page();
                self.handle_action(Action::Navigate(page));
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('h')) => {
                self.sidebar.user_collapsed = true;
                self.area_focus = AreaFocus::Main;
                true
            }
            (KeyModifiers::NONE, KeyCode::Esc) => {
                self.area_focus = AreaFocus::Main;
                true
            }
            _ => false,
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        let typing = self
            .session
            .as_ref()
            .is_some_and(|s| s.is_typing(self.page));

        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('l')) => Some(Action::Logout),
            (KeyModifiers::CONTROL, KeyCode::Char('b')) => Some(Action::ToggleSidebar),
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) if !typing => match code {
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Tab => Some(Action::TabNext),
                KeyCode::BackTab => Some(Action::TabPrev),
                KeyCode::Char('1') => Some(Action::Navigate(Page::Subscriptions)),
                KeyCode::Char('2') => Some(Action::Navigate(Page::Dashboard)),
                KeyCode::Char('3') => Some(Action::Navigate(Page::PaymentDetails)),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::LoggedIn => {
                let username = self.login.username.text().to_string();
                log::info!("Session started for {username}");
                self.session = Some(Session::mount(username.clone(), &self.services));
                self.set_page(Page::default());
                self.push_notification(format!("Welcome, {username}"), NotificationLevel::Success);
            }
            Action::Logout => {
                if self.session.take().is_some() {
                    log::info!("Logged out");
                }
                self.page = Page::default();
                self.sidebar.sync_to_page(self.page);
                self.area_focus = AreaFocus::Main;
                self.login = LoginState::new();
                self.login.load(&self.services);
            }
            // Page changes require a session
            Action::Navigate(_) | Action::TabNext | Action::TabPrev
                if !self.is_logged_in() =>
            {
                log::debug!("Ignoring {action:?} while logged out");
            }
            Action::Navigate(page) => self.set_page(page),
            Action::TabNext => self.set_page(self.page.next()),
            Action::TabPrev => self.set_page(self.page.prev()),
            Action::ToggleSidebar => {
                self.sidebar.toggle_collapse();
                // Expanding hands focus to the sidebar
                if !self.sidebar.user_collapsed {
                    self.area_focus = AreaFocus::Sidebar;
                    self.sidebar.sync_to_page(self.page);
                } else {
                    self.area_focus = AreaFocus::Main;
                }
            }
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
        }
    }

    /// Switch page, sync the sidebar and remount the dashboard.
    fn set_page(&mut self, page: Page) {
        self.page = page;
        self.sidebar.sync_to_page(page);
        self.area_focus = AreaFocus::Main;

        if page == Page::Dashboard {
            if let Some(session) = self.session.as_mut() {
                session.dashboard = DashboardState::load(
                    session.subscriptions.table().records(),
                    &self.services.data.payments,
                );
            }
        }
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: 30,
        });

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired.
    pub fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        match &self.session {
            None => {
                frame.render_widget(Block::default().style(Style::default().bg(theme::BG_BASE)), area);
                self.login.render(frame, area);
            }
            Some(session) => {
                let (layout, visibility) = AppLayout::compute(area, self.sidebar.user_collapsed);

                if let Some(sidebar_area) = layout.sidebar {
                    self.sidebar
                        .render(frame, sidebar_area, visibility, self.page, self.area_focus);
                }

                self.render_header(frame, layout.header, session);

                match self.page {
                    Page::Subscriptions => session.subscriptions.render(frame, layout.main),
                    Page::Dashboard => session.dashboard.render(frame, layout.main),
                    Page::PaymentDetails => session.payments.render(frame, layout.main),
                }

                self.render_status_bar(frame, layout.status, session);
            }
        }

        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title, account] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(36)]).areas(inner);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(" "),
                Span::styled(self.page.icon(), theme::heading()),
                Span::raw(" "),
                Span::styled(self.page.title(), theme::title()),
            ])),
            title,
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(session.username.as_str(), theme::muted()),
                Span::raw("  "),
                Span::styled("Ctrl+L", theme::key_hint().add_modifier(Modifier::BOLD)),
                Span::styled(" Logout ", Style::default().fg(theme::ERROR)),
            ]))
            .alignment(Alignment::Right),
            account,
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let mode_indicator = if session.is_typing(self.page) {
            Span::styled(" SEARCH ", theme::insert_badge())
        } else {
            Span::raw("")
        };

        let status = Line::from(vec![
            Span::styled(" BUDSTECH ", theme::brand_badge()),
            Span::raw(" "),
            mode_indicator,
            Span::raw(" "),
            Span::styled(
                self.page.label(),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":page "),
            Span::styled("Ctrl+B", theme::key_hint()),
            Span::raw(":sidebar "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("Ctrl+C", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = (self.notifications.len() as u16).min(area.height);
        let x = area.width.saturating_sub(max_width + 1);
        let notification_area = Rect::new(x, 1, max_width, height).intersection(area);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(format!(" {prefix} "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::raw(n.message.as_str()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = [
            ("Global:", ""),
            ("?", "Toggle this help"),
            ("Tab / Shift+Tab", "Next / previous page"),
            ("1 / 2 / 3", "Admin / Dashboard / Payments"),
            ("Ctrl+B", "Toggle sidebar collapse/expand"),
            ("Ctrl+L", "Log out"),
            ("Ctrl+C", "Quit"),
            ("", ""),
            ("Login:", ""),
            ("Tab / Shift+Tab", "Next / previous field"),
            ("Enter", "Sign in"),
            ("Ctrl+R", "Toggle remember me"),
            ("Ctrl+S", "Show / hide password"),
            ("", ""),
            ("Sidebar (when focused):", ""),
            ("j/k", "Navigate up/down"),
            ("Enter / l", "Open page"),
            ("h", "Collapse sidebar"),
            ("Esc", "Focus main content"),
            ("", ""),
            ("Tables:", ""),
            ("/", "Search (Esc/Enter to finish)"),
            ("j/k", "Move selection"),
            ("←/→", "Select column"),
            ("Enter / o", "Sort by column (again to reverse)"),
            ("x", "Clear sort"),
            ("", ""),
            ("Admin page:", ""),
            ("p / s", "Cycle plan / status filter"),
            ("Space / a", "Toggle active"),
            ("c", "Choose columns"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{key:<22}"),
                        Style::default()
                            .fg(theme::PRIMARY_LIGHT)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("?", theme::heading()),
            Span::raw(" or "),
            Span::styled("Esc", theme::heading()),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

fn is_ctrl_c(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            ..
        })
    )
}
