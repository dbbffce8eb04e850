//! Popup for choosing which table columns are shown.
//!
//! At least one column always stays visible.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::tui::layout::centered_box;
use crate::tui::theme;

pub struct ColumnPicker<C> {
    columns: Vec<(C, &'static str)>,
    visible: Vec<bool>,
    cursor: usize,
    open: bool,
}

impl<C: Copy + PartialEq> ColumnPicker<C> {
    /// All columns start visible.
    pub fn new(columns: impl IntoIterator<Item = (C, &'static str)>) -> Self {
        let columns: Vec<_> = columns.into_iter().collect();
        let visible = vec![true; columns.len()];
        Self {
            columns,
            visible,
            cursor: 0,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
        self.cursor = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_visible(&self, column: C) -> bool {
        self.columns
            .iter()
            .position(|(c, _)| *c == column)
            .is_some_and(|i| self.visible[i])
    }

    /// Visible columns in declaration order.
    pub fn visible_columns(&self) -> Vec<C> {
        self.columns
            .iter()
            .zip(&self.visible)
            .filter(|(_, shown)| **shown)
            .map(|((c, _), _)| *c)
            .collect()
    }

    /// Show or hide `column`. Hiding the last visible column is refused.
    pub fn toggle(&mut self, column: C) -> bool {
        let Some(idx) = self.columns.iter().position(|(c, _)| *c == column) else {
            return false;
        };
        if self.visible[idx] && self.visible.iter().filter(|v| **v).count() <= 1 {
            return false;
        }
        self.visible[idx] = !self.visible[idx];
        true
    }

    /// Handle input while open. Returns true if consumed.
    pub fn handle_input(&mut self, event: &Event) -> bool {
        if !self.open {
            return false;
        }
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return true;
        };

        match code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.cursor = (self.cursor + 1) % self.columns.len().max(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let len = self.columns.len().max(1);
                self.cursor = (self.cursor + len - 1) % len;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(&(column, _)) = self.columns.get(self.cursor) {
                    self.toggle(column);
                }
            }
            KeyCode::Esc | KeyCode::Char('c') => self.close(),
            _ => {}
        }
        true
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.open {
            return;
        }
        let height = self.columns.len() as u16 + 4;
        let popup = centered_box(34, height, area);

        let mut lines: Vec<Line> = self
            .columns
            .iter()
            .zip(&self.visible)
            .enumerate()
            .map(|(i, ((_, label), shown))| {
                let check = if *shown { "[x]" } else { "[ ]" };
                let style = if i == self.cursor {
                    theme::highlight()
                } else {
                    theme::muted()
                };
                Line::from(Span::styled(format!(" {check} {label}"), style))
            })
            .collect();
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            " [space] toggle  [esc] close",
            theme::dim(),
        )));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(theme::block_focused("Columns")),
            popup,
        );
    }
}
