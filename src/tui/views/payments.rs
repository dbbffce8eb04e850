//! Payment details: searchable and sortable, read-only.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::{header_label, render_search_bar, TableCursor};
use crate::core::format;
use crate::core::models::Payment;
use crate::core::records::{PaymentColumn, PaymentTable};
use crate::tui::theme;

pub struct PaymentsState {
    table: PaymentTable,
    cursor: TableCursor,
}

impl PaymentsState {
    pub fn new(records: Vec<Payment>) -> Self {
        Self {
            table: PaymentTable::new(records),
            cursor: TableCursor::default(),
        }
    }

    pub fn table(&self) -> &PaymentTable {
        &self.table
    }

    pub fn is_typing(&self) -> bool {
        self.cursor.searching
    }

    pub fn handle_input(&mut self, event: &Event) -> bool {
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

        if self
            .cursor
            .handle_nav_key(key, self.table.len(), PaymentColumn::ALL.len())
        {
            return true;
        }

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('/')) => self.cursor.searching = true,
            (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char('o')) => {
                if let Some(&column) = PaymentColumn::ALL.get(self.cursor.column) {
                    self.table.request_sort(column);
                }
            }
            (KeyModifiers::NONE, KeyCode::Char('x')) => self.table.clear_sort(),
            (KeyModifiers::NONE, KeyCode::Esc) if !self.table.query().is_empty() => {
                self.table.clear_query();
                self.cursor.clamp(self.table.len());
            }
            _ => return false,
        }
        true
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [bar, body] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        let shown_total: f64 = self.table.rows().map(|p| p.total_amount_paid).sum();
        render_search_bar(
            frame,
            bar,
            self.table.query(),
            self.cursor.searching,
            "Search by username or company...",
            vec![
                Span::styled(
                    format!("{}/{} shown", self.table.len(), self.table.source_len()),
                    theme::muted(),
                ),
                Span::raw("  "),
                Span::styled(format::usd(shown_total), theme::heading()),
            ],
        );

        let block = theme::block_focused("Payments");
        if self.table.is_empty() {
            let inner = block.inner(body);
            frame.render_widget(block, body);
            frame.render_widget(
                Paragraph::new(vec![
                    Line::raw(""),
                    Line::from(Span::styled("  No payments match the current search", theme::muted())),
                ]),
                inner,
            );
            return;
        }

        let header = Row::new(PaymentColumn::ALL.iter().enumerate().map(|(i, &column)| {
            let arrow = self.table.sort_direction(column).map(|d| d.arrow());
            let mut style = Style::default()
                .fg(theme::PRIMARY_LIGHT)
                .add_modifier(Modifier::BOLD);
            if i == self.cursor.column {
                style = style.add_modifier(Modifier::UNDERLINED).fg(theme::ACCENT);
            }
            Cell::from(header_label(column.label(), arrow)).style(style)
        }))
        .bottom_margin(1);

        let rows = self.table.rows().map(|p| {
            Row::new([
                Cell::from(p.username.clone())
                    .style(Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD)),
                Cell::from(p.company_name.clone()),
                Cell::from(Line::from(format::usd(p.total_amount_paid)).right_aligned())
                    .style(Style::default().fg(theme::SUCCESS)),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(14),
                Constraint::Min(18),
                Constraint::Length(20),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(theme::row_highlight())
        .highlight_symbol("▸ ");

        let mut state = TableState::default().with_selected(Some(self.cursor.row));
        frame.render_stateful_widget(table, body, &mut state);
    }
}
