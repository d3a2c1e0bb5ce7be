//! KNN prediction form and metric tiles.
//!
//! The form owns a [`PredictionParameters`] record that is replaced on every
//! edit. Submitting validates locally, then hands the call to the view's
//! [`RequestController`]; outcomes are applied when the app ticks.

use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::super::theme;
use crate::core::metrics::{tiles, PredictionResult};
use crate::core::params::{
    cycle, AgentType, CatalystType, NumericField, PredictionParameters, SampleType,
};
use crate::core::request::{RequestController, StalePolicy};
use crate::tui::events::NotificationLevel;
use crate::tui::layout::form_and_results;
use crate::tui::services::Services;
use crate::tui::widgets::number_input::NumberInput;

/// Width of the label column in the form.
const LABEL_WIDTH: usize = 15;

// ── Rows ───────────────────────────────────────────────────────────────────

/// One selectable line of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictRow {
    Number(NumericField),
    Agent,
    Sample,
    Catalyst,
    Submit,
}

impl PredictRow {
    pub const ALL: [PredictRow; 9] = [
        PredictRow::Number(NumericField::Time),
        PredictRow::Number(NumericField::TIn),
        PredictRow::Number(NumericField::TPr),
        PredictRow::Number(NumericField::QAgent),
        PredictRow::Agent,
        PredictRow::Sample,
        PredictRow::Catalyst,
        PredictRow::Number(NumericField::CatalystRate),
        PredictRow::Submit,
    ];

    fn label(self) -> &'static str {
        match self {
            PredictRow::Number(field) => field.key(),
            PredictRow::Agent => "agent_type",
            PredictRow::Sample => "sample_type",
            PredictRow::Catalyst => "catalyst_type",
            PredictRow::Submit => "",
        }
    }
}

/// Display text for a bound number. `NaN` is the unparseable sentinel.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "invalid".to_string()
    } else {
        value.to_string()
    }
}

/// Snap stepped values to four decimals so repeated steps don't drift.
fn snap(value: f64) -> f64 {
    (value * 1e4).round() / 1e4
}

// ── State ──────────────────────────────────────────────────────────────────

pub struct PredictViewState {
    params: PredictionParameters,
    selected: usize,
    editor: Option<NumberInput>,
    controller: RequestController<PredictionResult>,
}

impl PredictViewState {
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            params: PredictionParameters::default(),
            selected: 0,
            editor: None,
            controller: RequestController::new("predict", policy),
        }
    }

    pub fn params(&self) -> &PredictionParameters {
        &self.params
    }

    pub fn selected_row(&self) -> PredictRow {
        PredictRow::ALL[self.selected]
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.controller.is_loading()
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.controller.result()
    }

    pub fn error(&self) -> Option<&str> {
        self.controller.error()
    }

    /// Apply outcomes delivered since the last tick.
    pub fn poll(&mut self) -> bool {
        self.controller.poll()
    }

    /// Wait for the next outcome. Used where no tick loop is running.
    pub async fn settled(&mut self) -> bool {
        self.controller.settled().await
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

        if self.editor.is_some() {
            return self.handle_edit_key(*code);
        }

        let row = self.selected_row();
        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.selected = (self.selected + 1).min(PredictRow::ALL.len() - 1);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('h') | KeyCode::Left) => {
                self.adjust(row, false, services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('l') | KeyCode::Right) => {
                self.adjust(row, true, services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('s')) => {
                self.submit(services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char('i')) => {
                match row {
                    PredictRow::Number(field) => self.begin_edit(field, services),
                    PredictRow::Submit => {
                        if *code == KeyCode::Enter {
                            self.submit(services);
                        }
                    }
                    _ => self.adjust(row, true, services),
                }
                true
            }
            _ => false,
        }
    }

    /// While editing every key is consumed so global bindings stay quiet.
    fn handle_edit_key(&mut self, code: KeyCode) -> bool {
        let Some(editor) = self.editor.as_mut() else {
            return false;
        };
        match code {
            KeyCode::Esc => self.editor = None,
            KeyCode::Enter => {
                if let Some(editor) = self.editor.take() {
                    let (field, raw) = editor.commit();
                    self.params = self.params.bind(field, &raw);
                    log::debug!("predict: bound {} = {}", field.key(), self.params.get(field));
                }
            }
            KeyCode::Char(c) => {
                editor.insert_char(c);
            }
            KeyCode::Backspace => editor.backspace(),
            KeyCode::Delete => editor.delete(),
            KeyCode::Left => editor.move_left(),
            KeyCode::Right => editor.move_right(),
            KeyCode::Home => editor.move_home(),
            KeyCode::End => editor.move_end(),
            _ => {}
        }
        true
    }

    fn begin_edit(&mut self, field: NumericField, services: &Services) {
        if self.is_locked(field, services) {
            return;
        }
        self.editor = Some(NumberInput::new(field, self.params.get(field)));
    }

    /// Notify and return true when `field` cannot change right now.
    fn is_locked(&self, field: NumericField, services: &Services) -> bool {
        if field == NumericField::CatalystRate && !self.params.catalyst_rate_editable() {
            services.notify(
                "catalyst_rate is locked while catalyst_type is None",
                NotificationLevel::Info,
            );
            return true;
        }
        false
    }

    /// Step a numeric row or cycle an enumerated one.
    fn adjust(&mut self, row: PredictRow, forward: bool, services: &Services) {
        self.params = match row {
            PredictRow::Number(field) => {
                if self.is_locked(field, services) {
                    return;
                }
                let delta = if forward { field.step() } else { -field.step() };
                let mut value = snap(self.params.get(field) + delta);
                if field == NumericField::CatalystRate {
                    value = value.max(0.0);
                }
                self.params.with_value(field, value)
            }
            PredictRow::Agent => self
                .params
                .with_agent_type(cycle(&AgentType::ALL, self.params.agent_type, forward)),
            PredictRow::Sample => self
                .params
                .with_sample_type(cycle(&SampleType::ALL, self.params.sample_type, forward)),
            PredictRow::Catalyst => self.params.with_catalyst_type(cycle(
                &CatalystType::ALL,
                self.params.catalyst_type,
                forward,
            )),
            PredictRow::Submit => return,
        };
    }

    /// Validate and send the current record.
    pub fn submit(&mut self, services: &Services) {
        if let Err(e) = self.params.validate() {
            self.controller.reject(e.into());
            return;
        }
        let api = Arc::clone(&services.api);
        let params = self.params;
        self.controller
            .submit(async move { api.predict(&params).await });
    }

    // ── Rendering ──────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (form_area, results_area) = form_and_results(area, PredictRow::ALL.len() as u16 + 2);
        self.render_form(frame, form_area);
        self.render_results(frame, results_area);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("KNN prediction");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line<'static>> = Vec::with_capacity(PredictRow::ALL.len() + 2);
        for (i, row) in PredictRow::ALL.iter().enumerate() {
            let selected = i == self.selected;
            let line = match row {
                PredictRow::Submit => self.submit_line(selected),
                _ => self.field_line(*row, selected),
            };
            lines.push(line);
        }

        if let Some(error) = self.controller.error() {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(format!(" {error}"), theme::error())));
        }

        frame.render_widget(Paragraph::new(lines), inner);

        if let Some(editor) = &self.editor {
            let x = inner.x + 1 + LABEL_WIDTH as u16 + editor.cursor_position() as u16;
            let y = inner.y + self.selected as u16;
            frame.set_cursor_position((x.min(inner.right().saturating_sub(1)), y));
        }
    }

    fn field_line(&self, row: PredictRow, selected: bool) -> Line<'static> {
        let label = Span::styled(
            format!(" {:<width$}", row.label(), width = LABEL_WIDTH),
            theme::label(),
        );

        let value = match row {
            PredictRow::Number(field) => {
                let editing = self.editor.as_ref().filter(|e| e.field() == field);
                if let Some(editor) = editing {
                    Span::styled(
                        editor.text().to_string(),
                        Style::default()
                            .fg(theme::PRIMARY_LIGHT)
                            .add_modifier(Modifier::UNDERLINED),
                    )
                } else if field == NumericField::CatalystRate
                    && !self.params.catalyst_rate_editable()
                {
                    Span::styled(format_number(self.params.get(field)), theme::disabled())
                } else {
                    let v = self.params.get(field);
                    let style = if v.is_nan() { theme::error() } else { theme::value() };
                    Span::styled(format_number(v), style)
                }
            }
            PredictRow::Agent => choice(self.params.agent_type.label()),
            PredictRow::Sample => choice(self.params.sample_type.label()),
            PredictRow::Catalyst => choice(self.params.catalyst_type.label()),
            PredictRow::Submit => Span::raw(""),
        };

        let line = Line::from(vec![label, value]);
        if selected && self.editor.is_none() {
            line.style(theme::highlight())
        } else {
            line
        }
    }

    fn submit_line(&self, selected: bool) -> Line<'static> {
        let (text, style) = if self.controller.is_loading() {
            (" Computing... ", theme::button_busy())
        } else {
            (" Predict ", theme::button())
        };
        let marker = if selected { "▸ " } else { "  " };
        Line::from(vec![
            Span::styled(format!(" {marker}"), theme::title()),
            Span::styled(text, style),
        ])
    }

    fn render_results(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_default("Results");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(result) = self.controller.result() else {
            let hint = if self.controller.is_loading() {
                " Computing..."
            } else {
                " Press 's' to run the model"
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(hint, theme::label()))),
                inner,
            );
            return;
        };

        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

        let tiles = tiles(result);
        for (r, pair) in tiles.chunks(2).enumerate() {
            let cols = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[r]);
            for (c, tile) in pair.iter().enumerate() {
                let block = theme::tile(tile.label);
                let tile_inner = block.inner(cols[c]);
                frame.render_widget(block, cols[c]);
                frame.render_widget(
                    Paragraph::new(Span::styled(tile.value.clone(), theme::metric())),
                    tile_inner,
                );
            }
        }

        if !result.message.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!(" {}", result.message),
                    theme::label(),
                ))),
                rows[3],
            );
        }
    }
}

fn choice(label: &'static str) -> Span<'static> {
    Span::styled(format!("‹ {label} ›"), theme::value())
}
