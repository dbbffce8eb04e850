//! Centralized indigo color theme for the admin console.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::format::UsageLevel;
use crate::core::models::Plan;

// ── Primary palette ─────────────────────────────────────────────────────────

/// Indigo: primary accent and focused borders.
pub const PRIMARY: Color = Color::Rgb(0x4F, 0x46, 0xE5);
/// Light indigo for highlights.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x81, 0x8C, 0xF8);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Amber for titles.
pub const ACCENT: Color = Color::Rgb(0xF5, 0x9E, 0x0B);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Base background.
pub const BG_BASE: Color = Color::Rgb(0x11, 0x18, 0x27);
/// Elevated panels and the sidebar.
pub const BG_SURFACE: Color = Color::Rgb(0x1F, 0x29, 0x37);

// ── Text ────────────────────────────────────────────────────────────────────

/// Primary text.
pub const TEXT: Color = Color::Rgb(0xE5, 0xE7, 0xEB);
/// Secondary labels.
pub const TEXT_MUTED: Color = Color::Rgb(0x9C, 0xA3, 0xAF);
/// Faint hints and borders.
pub const TEXT_DIM: Color = Color::Rgb(0x4B, 0x55, 0x63);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xEF, 0x44, 0x44);
pub const SUCCESS: Color = Color::Rgb(0x22, 0xC5, 0x5E);
pub const WARNING: Color = Color::Rgb(0xEA, 0xB3, 0x08);
pub const INFO: Color = Color::Rgb(0x3B, 0x82, 0xF6);

// ── Domain ──────────────────────────────────────────────────────────────────

/// Chip colour for a subscription plan.
pub fn plan_color(plan: Plan) -> Color {
    match plan {
        Plan::Basic => Color::Rgb(0x60, 0xA5, 0xFA),
        Plan::Pro => Color::Rgb(0xC0, 0x84, 0xFC),
        Plan::Enterprise => Color::Rgb(0x4A, 0xDE, 0x80),
    }
}

/// Gauge colour for upload quota usage.
pub fn usage_color(level: UsageLevel) -> Color {
    match level {
        UsageLevel::Healthy => SUCCESS,
        UsageLevel::High => WARNING,
        UsageLevel::Critical => ERROR,
    }
}

pub fn status_color(active: bool) -> Color {
    if active {
        SUCCESS
    } else {
        TEXT_MUTED
    }
}

// ── Style helpers ───────────────────────────────────────────────────────────

/// Accent-colored bold text (titles, active items).
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Section header style.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY_LIGHT).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "[q]:quit").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY_LIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Search mode badge.
pub fn insert_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Selected table row.
pub fn row_highlight() -> Style {
    Style::default().bg(BG_SURFACE).add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered block with focused styling.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}

/// A bordered block with default (unfocused) styling.
pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_default())
}
