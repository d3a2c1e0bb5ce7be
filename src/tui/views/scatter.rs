//! Scatter plot selector and embedded document hand-off.
//!
//! The service answers with a self-contained HTML document. Each successful
//! response replaces the host page on the [`EmbedSurface`](crate::core::embed::EmbedSurface),
//! which can then be opened in the system browser.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::super::theme;
use crate::core::embed::SANDBOX;
use crate::core::error::ValidationError;
use crate::core::params::{SelectionField, VisualizationSelection};
use crate::core::request::{RequestController, StalePolicy};
use crate::tui::events::NotificationLevel;
use crate::tui::layout::form_and_results;
use crate::tui::services::Services;

const LABEL_WIDTH: usize = 21;
/// Selector rows plus the submit row.
const ROW_COUNT: usize = SelectionField::ALL.len() + 1;

/// Host page currently on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MountedDocument {
    pub path: PathBuf,
    pub bytes: usize,
}

pub struct ScatterViewState {
    selection: VisualizationSelection,
    selected: usize,
    controller: RequestController<String>,
    mounted: Option<MountedDocument>,
}

impl ScatterViewState {
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            selection: VisualizationSelection::default(),
            selected: 0,
            controller: RequestController::new("scatter", policy),
            mounted: None,
        }
    }

    pub fn selection(&self) -> &VisualizationSelection {
        &self.selection
    }

    /// The selector under the cursor, or `None` on the submit row.
    pub fn selected_field(&self) -> Option<SelectionField> {
        SelectionField::ALL.get(self.selected).copied()
    }

    pub fn mounted(&self) -> Option<&MountedDocument> {
        self.mounted.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.controller.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.controller.error()
    }

    /// Apply outcomes delivered since the last tick and mount any new document.
    pub fn poll(&mut self, services: &Services) -> bool {
        if !self.controller.poll() {
            return false;
        }
        self.sync_surface(services);
        true
    }

    /// Wait for the next outcome. Used where no tick loop is running.
    pub async fn settled(&mut self, services: &Services) -> bool {
        if !self.controller.settled().await {
            return false;
        }
        self.sync_surface(services);
        true
    }

    fn sync_surface(&mut self, services: &Services) {
        let mounted = match self.controller.result() {
            Some(html) if html.trim().is_empty() => {
                services.notify("Service returned an empty document", NotificationLevel::Warning);
                None
            }
            Some(html) => match services.surface.mount(html) {
                Ok(path) => {
                    log::debug!("scatter: document ready at {}", path.display());
                    Some(MountedDocument {
                        path,
                        bytes: html.len(),
                    })
                }
                Err(e) => {
                    log::error!("scatter: failed to mount document: {e}");
                    services.notify(format!("Could not write plot: {e}"), NotificationLevel::Error);
                    None
                }
            },
            // Failed requests hide the previous plot.
            None => None,
        };

        // An older response landing first is mounted but not opened; the
        // newest one opens the page once.
        let pending = self.controller.in_flight() > 0;
        if let Some(doc) = mounted.as_ref().filter(|_| !pending) {
            if services.auto_open {
                open_document(&doc.path, services);
            } else {
                services.notify("Scatter plot ready, press 'o' to open", NotificationLevel::Success);
            }
        }
        self.mounted = mounted;
    }

    // ── Input ──────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        let field = self.selected_field();
        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.selected = (self.selected + 1).min(ROW_COUNT - 1);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('h') | KeyCode::Left) => {
                if let Some(field) = field {
                    self.selection = self.selection.cycle(field, false);
                }
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('l') | KeyCode::Right) => {
                if let Some(field) = field {
                    self.selection = self.selection.cycle(field, true);
                }
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace) => {
                if let Some(field) = field {
                    self.selection = self.selection.clear(field);
                }
                true
            }
            (KeyModifiers::NONE, KeyCode::Enter) => {
                match field {
                    Some(field) => self.selection = self.selection.cycle(field, true),
                    None => self.submit(services),
                }
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('s')) => {
                self.submit(services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('o')) => {
                match &self.mounted {
                    Some(doc) => open_document(&doc.path, services),
                    None => services.notify("No plot to open yet", NotificationLevel::Info),
                }
                true
            }
            _ => false,
        }
    }

    /// Request a plot for the current selection.
    pub fn submit(&mut self, services: &Services) {
        self.mounted = None;
        if !self.selection.is_complete() {
            self.controller.reject(ValidationError::MissingAxes.into());
            return;
        }
        let api = Arc::clone(&services.api);
        let selection = self.selection;
        self.controller
            .submit(async move { api.scatter_html(&selection).await });
    }

    // ── Rendering ──────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (form_area, results_area) = form_and_results(area, ROW_COUNT as u16 + 2);
        self.render_form(frame, form_area);
        self.render_document(frame, results_area);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("Scatter");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line<'static>> = Vec::with_capacity(ROW_COUNT + 2);
        for (i, field) in SelectionField::ALL.iter().enumerate() {
            let value = self.selection.value(*field);
            let value_span = if !value.is_empty() {
                Span::styled(format!("‹ {value} ›"), theme::value())
            } else if field.required() {
                Span::styled("‹ Select... ›", theme::label())
            } else {
                Span::styled("‹ (none) ›", theme::key_hint())
            };
            let line = Line::from(vec![
                Span::styled(
                    format!(" {:<width$}", field.label(), width = LABEL_WIDTH),
                    theme::label(),
                ),
                value_span,
            ]);
            lines.push(if i == self.selected {
                line.style(theme::highlight())
            } else {
                line
            });
        }

        let (text, style) = if self.controller.is_loading() {
            (" Loading... ", theme::button_busy())
        } else {
            (" Render ", theme::button())
        };
        let marker = if self.selected_field().is_none() { "▸ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(format!(" {marker}"), theme::title()),
            Span::styled(text, style),
        ]));

        if let Some(error) = self.controller.error() {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(format!(" {error}"), theme::error())));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_document(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_default("Plot");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line<'static>> = match &self.mounted {
            Some(doc) => vec![
                Line::raw(""),
                Line::from(vec![
                    Span::styled("  Page:    ", theme::label()),
                    Span::styled(doc.path.display().to_string(), theme::value()),
                ]),
                Line::from(vec![
                    Span::styled("  Size:    ", theme::label()),
                    Span::styled(format!("{} bytes", doc.bytes), theme::value()),
                ]),
                Line::from(vec![
                    Span::styled("  Sandbox: ", theme::label()),
                    Span::styled(SANDBOX, theme::value()),
                ]),
                Line::raw(""),
                Line::from(Span::styled("  [o] open in browser", theme::key_hint())),
            ],
            None if self.controller.is_loading() => {
                vec![Line::from(Span::styled(" Loading...", theme::label()))]
            }
            None => vec![Line::from(Span::styled(
                " Pick Column X and Column Y, then press 's'",
                theme::label(),
            ))],
        };

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

fn open_document(path: &Path, services: &Services) {
    match services.surface.open(path) {
        Ok(()) => services.notify("Opened scatter plot", NotificationLevel::Success),
        Err(e) => {
            log::warn!("scatter: {e}");
            services.notify(e.to_string(), NotificationLevel::Warning);
        }
    }
}
