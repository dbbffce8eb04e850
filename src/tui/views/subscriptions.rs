//! Subscription management: a searchable, filterable, sortable table with
//! per-row activation toggles.
//!
//! Toggles change only this page's copy of the records.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::{header_label, render_search_bar, TableCursor};
use crate::core::format::{self, UsageLevel};
use crate::core::models::Subscription;
use crate::core::records::{SubscriptionColumn, SubscriptionTable};
use crate::tui::events::NotificationLevel;
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::column_picker::ColumnPicker;

const GAUGE_WIDTH: usize = 10;

pub struct SubscriptionsState {
    table: SubscriptionTable,
    cursor: TableCursor,
    columns: ColumnPicker<SubscriptionColumn>,
}

impl SubscriptionsState {
    pub fn new(records: Vec<Subscription>) -> Self {
        Self {
            table: SubscriptionTable::new(records),
            cursor: TableCursor::default(),
            columns: ColumnPicker::new(SubscriptionColumn::ALL.map(|c| (c, c.label()))),
        }
    }

    pub fn table(&self) -> &SubscriptionTable {
        &self.table
    }

    pub fn cursor(&self) -> &TableCursor {
        &self.cursor
    }

    pub fn is_typing(&self) -> bool {
        self.cursor.searching
    }

    fn selected_column(&self) -> Option<SubscriptionColumn> {
        self.columns.visible_columns().get(self.cursor.column).copied()
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        if self.columns.is_open() {
            let consumed = self.columns.handle_input(event);
            self.cursor
                .clamp_column(self.columns.visible_columns().len());
            return consumed;
        }

        let Event::Key(key @ KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        if self.cursor.searching {
            let consumed = self.cursor.handle_search_key(key, &mut self.table);
            self.cursor.clamp(self.table.len());
            return consumed;
        }

        let visible = self.columns.visible_columns().len();
        if self.cursor.handle_nav_key(key, self.table.len(), visible) {
            return true;
        }

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('/')) => {
                self.cursor.searching = true;
            }
            (KeyModifiers::NONE, KeyCode::Char('p')) => {
                self.table.filters_mut(|f| f.cycle_plan());
                self.cursor.clamp(self.table.len());
            }
            (KeyModifiers::NONE, KeyCode::Char('s')) => {
                self.table.filters_mut(|f| f.cycle_status());
                self.cursor.clamp(self.table.len());
            }
            (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char('o')) => {
                if let Some(column) = self.selected_column() {
                    self.table.request_sort(column);
                }
            }
            (KeyModifiers::NONE, KeyCode::Char('x')) => self.table.clear_sort(),
            (KeyModifiers::NONE, KeyCode::Char(' ') | KeyCode::Char('a')) => {
                self.toggle_selected(services);
            }
            (KeyModifiers::NONE, KeyCode::Char('c')) => self.columns.open(),
            (KeyModifiers::NONE, KeyCode::Esc) if !self.table.query().is_empty() => {
                self.table.clear_query();
            }
            _ => return false,
        }
        true
    }

    fn toggle_selected(&mut self, services: &Services) {
        let Some((id, username)) = self
            .table
            .row(self.cursor.row)
            .map(|s| (s.id, s.username.clone()))
        else {
            return;
        };
        if let Some(active) = self.table.toggle_active(id) {
            let verb = if active { "Activated" } else { "Deactivated" };
            log::info!("{verb} subscription {id} ({username})");
            services.notify(format!("{verb} {username}"), NotificationLevel::Success);
        }
        self.cursor.clamp(self.table.len());
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [bar, body] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        let filters = self.table.filters();
        render_search_bar(
            frame,
            bar,
            self.table.query(),
            self.cursor.searching,
            "Search...",
            vec![
                Span::styled("[p] ", theme::key_hint()),
                Span::styled(filters.plan_label(), theme::heading()),
                Span::raw("  "),
                Span::styled("[s] ", theme::key_hint()),
                Span::styled(filters.status_label(), theme::heading()),
                Span::raw("  "),
                Span::styled(
                    format!("{}/{} shown", self.table.len(), self.table.source_len()),
                    theme::muted(),
                ),
            ],
        );

        self.render_table(frame, body);
        self.columns.render(frame, area);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let visible = self.columns.visible_columns();
        let block = theme::block_focused("Subscriptions");

        if self.table.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new(vec![
                    Line::raw(""),
                    Line::from(Span::styled("  No subscriptions match the current search", theme::muted())),
                ]),
                inner,
            );
            return;
        }

        let header = Row::new(visible.iter().enumerate().map(|(i, &column)| {
            let arrow = self.table.sort_direction(column).map(|d| d.arrow());
            let mut style = Style::default()
                .fg(theme::PRIMARY_LIGHT)
                .add_modifier(Modifier::BOLD);
            if i == self.cursor.column {
                style = style.add_modifier(Modifier::UNDERLINED).fg(theme::ACCENT);
            }
            Cell::from(header_label(column.label(), arrow)).style(style)
        }))
        .height(1)
        .bottom_margin(1);

        let rows = self
            .table
            .rows()
            .map(|sub| Row::new(visible.iter().map(|&column| cell(sub, column))));

        let widths: Vec<Constraint> = visible.iter().map(|&c| column_width(c)).collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(theme::row_highlight())
            .highlight_symbol("▸ ");

        let mut state = TableState::default().with_selected(Some(self.cursor.row));
        frame.render_stateful_widget(table, area, &mut state);

        let hint_area = Rect::new(area.x + 2, area.bottom().saturating_sub(1), area.width.saturating_sub(4), 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                " [/] search [←/→] column [enter] sort [x] unsort [space] toggle [c] columns ",
                theme::dim(),
            )),
            hint_area,
        );
    }
}

fn column_width(column: SubscriptionColumn) -> Constraint {
    match column {
        SubscriptionColumn::Username => Constraint::Length(12),
        SubscriptionColumn::Company => Constraint::Min(16),
        SubscriptionColumn::Registered
        | SubscriptionColumn::Start
        | SubscriptionColumn::End => Constraint::Length(12),
        SubscriptionColumn::Plan => Constraint::Length(12),
        SubscriptionColumn::Status => Constraint::Length(10),
        SubscriptionColumn::UploadsLeft => Constraint::Length(24),
    }
}

fn cell(sub: &Subscription, column: SubscriptionColumn) -> Cell<'static> {
    match column {
        SubscriptionColumn::Username => {
            Cell::from(sub.username.clone()).style(Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD))
        }
        SubscriptionColumn::Company => Cell::from(sub.company_name.clone()),
        SubscriptionColumn::Registered => Cell::from(format::date(&sub.registration_date)),
        SubscriptionColumn::Start => Cell::from(format::date(&sub.subscription_start_date)),
        SubscriptionColumn::End => Cell::from(format::date(&sub.subscription_end_date)),
        SubscriptionColumn::Plan => Cell::from(format!(" {} ", sub.plan.label())).style(
            Style::default()
                .fg(theme::BG_BASE)
                .bg(theme::plan_color(sub.plan)),
        ),
        SubscriptionColumn::Status => Cell::from(sub.status().label())
            .style(Style::default().fg(theme::status_color(sub.is_active))),
        SubscriptionColumn::UploadsLeft => uploads_cell(sub),
    }
}

/// `left / total` with a bar for the remaining share.
fn uploads_cell(sub: &Subscription) -> Cell<'static> {
    let level = UsageLevel::from_percent(sub.usage_percent());
    let filled = remaining_blocks(sub);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(GAUGE_WIDTH - filled));
    Cell::from(Line::from(vec![
        Span::raw(format!("{:>5}/{:<5} ", sub.uploads_left(), sub.total_uploads)),
        Span::styled(bar, Style::default().fg(theme::usage_color(level))),
    ]))
}

fn remaining_blocks(sub: &Subscription) -> usize {
    let remaining = (100.0 - sub.usage_percent()).clamp(0.0, 100.0);
    ((remaining / 100.0) * GAUGE_WIDTH as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::CredentialGate;
    use crate::core::models::{Plan, SubscriptionStatus};
    use crate::core::remember::MemoryStore;
    use crate::core::seed::SeedData;
    use crate::core::table::SortDirection;
    use crate::tests::common::fixtures::subscription;
    use tokio::sync::mpsc;

    fn services() -> (Services, mpsc::UnboundedReceiver<crate::tui::events::AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Services::new(
                SeedData::default(),
                CredentialGate::new(Box::new(MemoryStore::new())),
                tx,
            ),
            rx,
        )
    }

    fn state() -> SubscriptionsState {
        SubscriptionsState::new(vec![
            subscription(1, "jdoe", "Globex", Plan::Pro, 100, 10, true),
            subscription(2, "asmith", "Initech", Plan::Basic, 100, 90, false),
            subscription(3, "bwayne", "Wayne", Plan::Enterprise, 500, 250, true),
        ])
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ids(state: &SubscriptionsState) -> Vec<u32> {
        state.table().rows().map(|s| s.id).collect()
    }

    #[test]
    fn test_search_mode() {
        let (services, _rx) = services();
        let mut s = state();
        s.handle_input(&press(KeyCode::Char('/')), &services);
        assert!(s.is_typing());
        for c in "init".chars() {
            s.handle_input(&press(KeyCode::Char(c)), &services);
        }
        assert_eq!(ids(&s), vec![2]);
        s.handle_input(&press(KeyCode::Enter), &services);
        assert!(!s.is_typing());
        s.handle_input(&press(KeyCode::Esc), &services);
        assert_eq!(s.table().len(), 3);
    }

    #[test]
    fn test_filter_keys() {
        let (services, _rx) = services();
        let mut s = state();
        s.handle_input(&press(KeyCode::Char('p')), &services);
        assert_eq!(s.table().filters().plan, Some(Plan::Basic));
        assert_eq!(ids(&s), vec![2]);
        s.handle_input(&press(KeyCode::Char('p')), &services);
        s.handle_input(&press(KeyCode::Char('p')), &services);
        s.handle_input(&press(KeyCode::Char('p')), &services);
        s.handle_input(&press(KeyCode::Char('s')), &services);
        assert_eq!(s.table().filters().status, Some(SubscriptionStatus::Active));
        assert_eq!(ids(&s), vec![1, 3]);
    }

    #[test]
    fn test_sort_on_uploads_left_column() {
        let (services, _rx) = services();
        let mut s = state();
        for _ in 0..7 {
            s.handle_input(&press(KeyCode::Right), &services);
        }
        s.handle_input(&press(KeyCode::Enter), &services);
        assert_eq!(
            s.table().sort_direction(SubscriptionColumn::UploadsLeft),
            Some(SortDirection::Ascending)
        );
        assert_eq!(ids(&s), vec![2, 1, 3]);
        s.handle_input(&press(KeyCode::Enter), &services);
        assert_eq!(ids(&s), vec![3, 1, 2]);
        s.handle_input(&press(KeyCode::Char('x')), &services);
        assert_eq!(ids(&s), vec![1, 2, 3]);
    }

    #[test]
    fn test_toggle_selected_notifies() {
        let (services, mut rx) = services();
        let mut s = state();
        s.handle_input(&press(KeyCode::Down), &services);
        s.handle_input(&press(KeyCode::Char(' ')), &services);
        assert!(s.table().records()[1].is_active);
        assert!(matches!(
            rx.try_recv(),
            Ok(crate::tui::events::AppEvent::Notification(_))
        ));
    }

    #[test]
    fn test_column_picker_hides_column() {
        let (services, _rx) = services();
        let mut s = state();
        s.handle_input(&press(KeyCode::Char('c')), &services);
        s.handle_input(&press(KeyCode::Char(' ')), &services);
        s.handle_input(&press(KeyCode::Esc), &services);
        assert_eq!(s.selected_column(), Some(SubscriptionColumn::Company));
    }

    #[test]
    fn test_remaining_blocks() {
        let full = subscription(1, "a", "A", Plan::Pro, 100, 0, true);
        let low = subscription(2, "b", "B", Plan::Pro, 100, 90, true);
        let empty = subscription(3, "c", "C", Plan::Pro, 100, 100, true);
        assert_eq!(remaining_blocks(&full), GAUGE_WIDTH);
        assert_eq!(remaining_blocks(&low), 1);
        assert_eq!(remaining_blocks(&empty), 0);
    }
}
