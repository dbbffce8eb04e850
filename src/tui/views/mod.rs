pub mod dashboard;
pub mod login;
pub mod payments;
pub mod subscriptions;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::table::{RecordFilter, TableRecord, TableView};

use super::theme;

/// Row selection, column cursor and search mode shared by the table pages.
#[derive(Debug, Clone, Default)]
pub struct TableCursor {
    /// Selected row in the derived view.
    pub row: usize,
    /// Index into the page's visible columns.
    pub column: usize,
    /// Typing edits the query while set.
    pub searching: bool,
}

impl TableCursor {
    /// Keep the row selection inside a view of `len` rows.
    pub fn clamp(&mut self, len: usize) {
        self.row = self.row.min(len.saturating_sub(1));
    }

    pub fn clamp_column(&mut self, columns: usize) {
        self.column = self.column.min(columns.saturating_sub(1));
    }

    /// Keys that edit the query while searching. Returns true if consumed.
    pub fn handle_search_key<R, F>(&mut self, key: &KeyEvent, table: &mut TableView<R, F>) -> bool
    where
        R: TableRecord,
        F: RecordFilter<R>,
    {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => table.clear_query(),
            (KeyModifiers::CONTROL, _) => return false,
            (_, KeyCode::Esc | KeyCode::Enter) => self.searching = false,
            (_, KeyCode::Backspace) => table.pop_query_char(),
            (_, KeyCode::Char(c)) => table.push_query_char(c),
            _ => return true,
        }
        self.row = 0;
        true
    }

    /// Row navigation keys. Returns true if consumed.
    pub fn handle_nav_key(&mut self, key: &KeyEvent, len: usize, columns: usize) -> bool {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                if len > 0 {
                    self.row = (self.row + 1).min(len - 1);
                }
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.row = self.row.saturating_sub(1);
            }
            (KeyModifiers::NONE, KeyCode::Char('g') | KeyCode::Home) => self.row = 0,
            (KeyModifiers::SHIFT, KeyCode::Char('G')) | (_, KeyCode::End) => {
                self.row = len.saturating_sub(1);
            }
            (KeyModifiers::NONE, KeyCode::Char('h') | KeyCode::Left) => {
                self.column = self.column.saturating_sub(1);
            }
            (KeyModifiers::NONE, KeyCode::Char('l') | KeyCode::Right) => {
                if columns > 0 {
                    self.column = (self.column + 1).min(columns - 1);
                }
            }
            _ => return false,
        }
        true
    }
}

/// Search box line: query text with a cursor block while typing.
pub(super) fn render_search_bar(
    frame: &mut Frame,
    area: Rect,
    query: &str,
    searching: bool,
    placeholder: &str,
    trailing: Vec<Span<'static>>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if searching {
            theme::border_focused()
        } else {
            theme::border_default()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![Span::styled(" / ", theme::key_hint())];
    if query.is_empty() && !searching {
        spans.push(Span::styled(placeholder.to_string(), theme::dim()));
    } else {
        spans.push(Span::raw(query.to_string()));
        if searching {
            spans.push(Span::styled("█", theme::highlight()));
        }
    }
    spans.push(Span::raw("   "));
    spans.extend(trailing);

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

/// Header label with the sort arrow when sorted.
pub(super) fn header_label(label: &str, arrow: Option<&str>) -> String {
    match arrow {
        Some(arrow) => format!("{label} {arrow}"),
        None => label.to_string(),
    }
}
