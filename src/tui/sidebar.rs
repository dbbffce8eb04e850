//! Collapsible left sidebar listing the console pages.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::events::{AreaFocus, Page};
use super::layout::SidebarVisibility;
use super::theme;

/// Sidebar navigation state.
pub struct SidebarState {
    /// Whether the user has toggled collapse (Ctrl+B).
    pub user_collapsed: bool,
    /// Currently highlighted item index (into Page::ALL).
    pub selected: usize,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self::new()
    }
}

impl SidebarState {
    pub fn new() -> Self {
        Self {
            user_collapsed: false,
            selected: 0,
        }
    }

    pub fn toggle_collapse(&mut self) {
        self.user_collapsed = !self.user_collapsed;
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % Page::ALL.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + Page::ALL.len() - 1) % Page::ALL.len();
    }

    pub fn selected_page(&self) -> Page {
        Page::ALL[self.selected]
    }

    /// Sync selection to the shown page (e.g., after Tab navigation).
    pub fn sync_to_page(&mut self, page: Page) {
        if let Some(idx) = Page::ALL.iter().position(|&p| p == page) {
            self.selected = idx;
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        visibility: SidebarVisibility,
        current: Page,
        area_focus: AreaFocus,
    ) {
        let lines = match visibility {
            SidebarVisibility::Hidden => return,
            SidebarVisibility::Collapsed => self.collapsed_lines(current),
            SidebarVisibility::Expanded => self.expanded_lines(area, current, area_focus),
        };

        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme::BG_SURFACE)),
            area,
        );
    }

    fn collapsed_lines(&self, current: Page) -> Vec<Line<'static>> {
        let mut lines = vec![Line::raw("")];
        for page in Page::ALL {
            let style = if page == current {
                theme::highlight()
            } else {
                theme::muted()
            };
            lines.push(Line::from(Span::styled(format!(" {}", page.icon()), style)));
        }
        lines
    }

    fn expanded_lines(
        &self,
        area: Rect,
        current: Page,
        area_focus: AreaFocus,
    ) -> Vec<Line<'static>> {
        let sidebar_focused = area_focus == AreaFocus::Sidebar;
        let mut lines = vec![
            Line::from(Span::styled(" Budstech Admin", theme::title())),
            Line::raw(""),
        ];

        for (idx, page) in Page::ALL.into_iter().enumerate() {
            let is_current = page == current;
            let is_selected = sidebar_focused && idx == self.selected;

            let prefix = if is_selected { "▸ " } else { "  " };
            let style = match (is_selected, is_current) {
                (_, true) => theme::highlight(),
                (true, false) => Style::default()
                    .fg(theme::TEXT)
                    .add_modifier(Modifier::BOLD),
                (false, false) => theme::muted(),
            };

            let label = format!("{prefix}{} {}", page.icon(), page.label());
            let padded = format!("{:<width$}", label, width = area.width as usize);
            lines.push(Line::from(Span::styled(padded, style)));
        }
        lines
    }
}
