//! Night-lab palette: near-black panels, cyan readouts, neon accent.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Cyan: headings, focused borders, active tab.
pub const PRIMARY: Color = Color::Rgb(0x67, 0xE8, 0xF9);
/// Pale cyan for metric values.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0xA5, 0xF3, 0xFC);
/// Deep blue-grey tile and panel borders.
pub const BORDER: Color = Color::Rgb(0x16, 0x30, 0x42);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Neon green submit affordance, brand badge.
pub const ACCENT: Color = Color::Rgb(0x39, 0xFF, 0x14);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Base background.
pub const BG_BASE: Color = Color::Rgb(0x0B, 0x12, 0x1A);
/// Raised tiles.
pub const BG_SURFACE: Color = Color::Rgb(0x0E, 0x16, 0x20);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xE5, 0xE5, 0xE5);
/// Secondary labels, messages.
pub const TEXT_MUTED: Color = Color::Rgb(0xA3, 0xA3, 0xA3);
/// Disabled fields, faint hints.
pub const TEXT_DIM: Color = Color::Rgb(0x52, 0x52, 0x52);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xF8, 0x71, 0x71);
pub const SUCCESS: Color = Color::Rgb(0x4A, 0xDE, 0x80);
pub const WARNING: Color = Color::Rgb(0xFB, 0xBF, 0x24);
pub const INFO: Color = Color::Rgb(0x60, 0xA5, 0xFA);

// ── Style helpers ───────────────────────────────────────────────────────────

/// View titles.
pub fn title() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Selected form row.
pub fn highlight() -> Style {
    Style::default().fg(BG_BASE).bg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn label() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn value() -> Style {
    Style::default().fg(TEXT)
}

/// Locked field (e.g. catalyst rate without catalyst).
pub fn disabled() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::CROSSED_OUT)
}

pub fn error() -> Style {
    Style::default().fg(ERROR)
}

/// Metric value inside a tile.
pub fn metric() -> Style {
    Style::default()
        .fg(PRIMARY_LIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Key hint style (e.g., "[q]:quit").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Submit button at rest.
pub fn button() -> Style {
    Style::default().fg(BG_BASE).bg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Submit button while a request is in flight.
pub fn button_busy() -> Style {
    Style::default().fg(TEXT_MUTED).bg(BORDER)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Edit mode badge.
pub fn edit_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// Panel with a cyan border and title.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(self::title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PRIMARY))
}

/// Panel with the muted border.
pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER))
}

/// Metric tile frame.
pub fn tile(label: &str) -> Block<'_> {
    Block::default()
        .title(Line::styled(format!(" {label} "), self::label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER))
        .style(Style::default().bg(BG_SURFACE))
}
