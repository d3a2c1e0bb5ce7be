//! Root layout computation for tab header + main content + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the tab header (bordered, one row of tabs).
pub const HEADER_HEIGHT: u16 = 3;
/// Drop the header below this terminal height.
pub const HIDE_HEADER_THRESHOLD: u16 = 10;
/// Side-by-side form and results at or above this width.
pub const WIDE_THRESHOLD: u16 = 100;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Tab header (None if the terminal is too short).
    pub header: Option<Rect>,
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    pub fn compute(area: Rect) -> Self {
        let show_header = area.height >= HIDE_HEADER_THRESHOLD;
        let header_height = if show_header { HEADER_HEIGHT } else { 0 };

        let rows = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

        AppLayout {
            header: show_header.then_some(rows[0]),
            main: rows[1],
            status: rows[2],
        }
    }
}

/// Split a view area into form and results panes.
///
/// Wide terminals get columns; narrow ones stack the form above the results.
pub fn form_and_results(area: Rect, form_rows: u16) -> (Rect, Rect) {
    if area.width >= WIDE_THRESHOLD {
        let cols =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(area);
        (cols[0], cols[1])
    } else {
        let rows =
            Layout::vertical([Constraint::Length(form_rows + 2), Constraint::Min(3)]).split(area);
        (rows[0], rows[1])
    }
}
