//! Dashboard with revenue and user totals and a plan distribution.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::format;
use crate::core::models::{Payment, Plan, Subscription};
use crate::core::stats::DashboardStats;
use crate::tui::theme;

const CARD_HEIGHT: u16 = 5;

pub struct DashboardState {
    stats: DashboardStats,
}

impl DashboardState {
    /// Aggregate on mount; the stats do not track later edits.
    pub fn load(subscriptions: &[Subscription], payments: &[Payment]) -> Self {
        let stats = DashboardStats::compute(subscriptions, payments);
        log::debug!(
            "Dashboard: {} users, {} active, revenue {:.2}",
            stats.total_users,
            stats.active_users,
            stats.total_revenue
        );
        Self { stats }
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [cards, plans] =
            Layout::vertical([Constraint::Length(CARD_HEIGHT), Constraint::Min(0)]).areas(area);

        let [revenue, active, total] = Layout::horizontal([Constraint::Ratio(1, 3); 3])
            .spacing(1)
            .areas(cards);

        render_card(frame, revenue, "Total Revenue", format::usd(self.stats.total_revenue));
        render_card(frame, active, "Active Users", self.stats.active_users.to_string());
        render_card(frame, total, "Total Users", self.stats.total_users.to_string());

        self.render_plans(frame, plans);
    }

    fn render_plans(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_default("Plan Distribution");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.stats.plan_counts.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  No subscriptions", theme::muted())),
                inner,
            );
            return;
        }

        // label, count and percentage take ~30 columns
        let bar_width = inner.width.saturating_sub(32).max(4) as usize;
        let mut lines = vec![Line::raw("")];
        for (&plan, &count) in &self.stats.plan_counts {
            lines.push(plan_line(plan, count, self.stats.plan_share(plan), bar_width));
            lines.push(Line::raw(""));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn render_card(frame: &mut Frame, area: Rect, title: &str, value: String) {
    let block = theme::block_default(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(vec![
            Line::raw(""),
            Line::from(Span::styled(value, theme::title())).centered(),
        ]),
        inner,
    );
}

fn plan_line(plan: Plan, count: usize, share: f64, width: usize) -> Line<'static> {
    let filled = bar_cells(share, width);
    let color = theme::plan_color(plan);
    Line::from(vec![
        Span::styled(
            format!("  {:<12}", plan.label()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(width - filled), theme::dim()),
        Span::styled(format!(" {count:>4} "), theme::heading()),
        Span::styled(format!("({share:.1}%)"), theme::muted()),
    ])
}

fn bar_cells(share: f64, width: usize) -> usize {
    ((share.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize
}
