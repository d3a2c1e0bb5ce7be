//! Form records for the two feature views.
//!
//! Every mutation returns a new record instead of editing in place, so a view
//! can compare the old and new value to decide whether anything changed.
//! Cross-field rules live here too: choosing "no catalyst" zeroes the rate in
//! the same replacement that changes the type.

use serde::{Deserialize, Serialize};

use super::columns::{cycle_optional, CategoricalColumn, NumericColumn};
use super::error::ValidationError;

// ── Enumerated fields ──────────────────────────────────────────────────────

/// Gasification agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentType {
    Air,
    Oxygen,
}

/// Feedstock sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleType {
    #[serde(rename = "TWTS")]
    Twts,
    #[serde(rename = "Leather scraps")]
    LeatherScraps,
}

/// Catalyst added to the bed. `None` is the "no catalyst" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalystType {
    #[serde(rename = "Al-Ni")]
    AlNi,
    #[serde(rename = "Marble dust")]
    MarbleDust,
    None,
}

impl AgentType {
    pub const ALL: [AgentType; 2] = [AgentType::Air, AgentType::Oxygen];

    pub fn label(self) -> &'static str {
        match self {
            AgentType::Air => "Air",
            AgentType::Oxygen => "Oxygen",
        }
    }
}

impl SampleType {
    pub const ALL: [SampleType; 2] = [SampleType::Twts, SampleType::LeatherScraps];

    pub fn label(self) -> &'static str {
        match self {
            SampleType::Twts => "TWTS",
            SampleType::LeatherScraps => "Leather scraps",
        }
    }
}

impl CatalystType {
    pub const ALL: [CatalystType; 3] = [
        CatalystType::AlNi,
        CatalystType::MarbleDust,
        CatalystType::None,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CatalystType::AlNi => "Al-Ni",
            CatalystType::MarbleDust => "Marble dust",
            CatalystType::None => "None",
        }
    }
}

/// Step through a closed set, wrapping in both directions.
pub fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % all.len()
    } else {
        (idx + all.len() - 1) % all.len()
    };
    all[next]
}

// ── Numeric fields ─────────────────────────────────────────────────────────

/// The numeric slots of [`PredictionParameters`] that accept free input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Time,
    TIn,
    TPr,
    QAgent,
    CatalystRate,
}

impl NumericField {
    pub const ALL: [NumericField; 5] = [
        NumericField::Time,
        NumericField::TIn,
        NumericField::TPr,
        NumericField::QAgent,
        NumericField::CatalystRate,
    ];

    /// Key used both as the form label and in the JSON body.
    pub fn key(self) -> &'static str {
        match self {
            NumericField::Time => "time",
            NumericField::TIn => "t_in",
            NumericField::TPr => "t_pr",
            NumericField::QAgent => "q_agent",
            NumericField::CatalystRate => "catalyst_rate",
        }
    }

    /// Increment applied by the step keys.
    pub fn step(self) -> f64 {
        match self {
            NumericField::QAgent => 0.0001,
            _ => 1.0,
        }
    }
}

/// Parse a raw input string the way the form does. Empty or non-numeric
/// input becomes `NaN`, which [`PredictionParameters::validate`] rejects.
pub fn coerce_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

// ── Prediction form ────────────────────────────────────────────────────────

/// Process parameters sent to the KNN model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionParameters {
    pub time: f64,
    pub t_in: f64,
    pub t_pr: f64,
    pub agent_type: AgentType,
    pub q_agent: f64,
    pub sample_type: SampleType,
    pub catalyst_type: CatalystType,
    pub catalyst_rate: f64,
}

impl Default for PredictionParameters {
    fn default() -> Self {
        Self {
            time: 29.0,
            t_in: 500.0,
            t_pr: 1000.0,
            agent_type: AgentType::Oxygen,
            q_agent: 0.015,
            sample_type: SampleType::Twts,
            catalyst_type: CatalystType::MarbleDust,
            catalyst_rate: 10.0,
        }
    }
}

impl PredictionParameters {
    pub fn get(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Time => self.time,
            NumericField::TIn => self.t_in,
            NumericField::TPr => self.t_pr,
            NumericField::QAgent => self.q_agent,
            NumericField::CatalystRate => self.catalyst_rate,
        }
    }

    /// Bind a raw input string to `field`, returning the updated record.
    ///
    /// The rate is frozen while no catalyst is selected; binding it then
    /// returns an unchanged copy.
    pub fn bind(&self, field: NumericField, raw: &str) -> Self {
        self.with_value(field, coerce_number(raw))
    }

    /// Set an already-parsed value on `field`, honouring the same freeze.
    pub fn with_value(&self, field: NumericField, value: f64) -> Self {
        if field == NumericField::CatalystRate && !self.catalyst_rate_editable() {
            return *self;
        }
        let mut next = *self;
        match field {
            NumericField::Time => next.time = value,
            NumericField::TIn => next.t_in = value,
            NumericField::TPr => next.t_pr = value,
            NumericField::QAgent => next.q_agent = value,
            NumericField::CatalystRate => next.catalyst_rate = value,
        }
        next
    }

    pub fn with_agent_type(&self, agent_type: AgentType) -> Self {
        Self { agent_type, ..*self }
    }

    pub fn with_sample_type(&self, sample_type: SampleType) -> Self {
        Self { sample_type, ..*self }
    }

    /// Change the catalyst. Selecting [`CatalystType::None`] zeroes the rate
    /// in the same record; any other choice keeps the current rate.
    pub fn with_catalyst_type(&self, catalyst_type: CatalystType) -> Self {
        let catalyst_rate = if catalyst_type == CatalystType::None {
            0.0
        } else {
            self.catalyst_rate
        };
        Self {
            catalyst_type,
            catalyst_rate,
            ..*self
        }
    }

    pub fn catalyst_rate_editable(&self) -> bool {
        self.catalyst_type != CatalystType::None
    }

    /// Reject records carrying the `NaN` sentinel, reporting the first bad
    /// field in wire order. A selected catalyst also needs a whole,
    /// non-negative rate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for field in NumericField::ALL {
            if !self.get(field).is_finite() {
                return Err(ValidationError::InvalidNumber { field: field.key() });
            }
        }
        let rate = self.catalyst_rate;
        if self.catalyst_rate_editable() && (rate < 0.0 || rate.fract() != 0.0) {
            return Err(ValidationError::OutOfRange {
                field: NumericField::CatalystRate.key(),
            });
        }
        Ok(())
    }
}

// ── Visualization form ─────────────────────────────────────────────────────

/// Column choices for a scatter plot. `None` is the empty choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisualizationSelection {
    pub x: Option<NumericColumn>,
    pub y: Option<NumericColumn>,
    pub size_col: Option<NumericColumn>,
    pub hue: Option<CategoricalColumn>,
}

/// Selector rows of the scatter form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionField {
    X,
    Y,
    SizeCol,
    Hue,
}

impl SelectionField {
    pub const ALL: [SelectionField; 4] = [
        SelectionField::X,
        SelectionField::Y,
        SelectionField::SizeCol,
        SelectionField::Hue,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SelectionField::X => "Column X *",
            SelectionField::Y => "Column Y *",
            SelectionField::SizeCol => "size_col (optional)",
            SelectionField::Hue => "hue (optional)",
        }
    }

    pub fn required(self) -> bool {
        matches!(self, SelectionField::X | SelectionField::Y)
    }
}

impl VisualizationSelection {
    /// Current value of a row as display text; empty when unset.
    pub fn value(&self, field: SelectionField) -> &'static str {
        match field {
            SelectionField::X => self.x.map_or("", NumericColumn::as_str),
            SelectionField::Y => self.y.map_or("", NumericColumn::as_str),
            SelectionField::SizeCol => self.size_col.map_or("", NumericColumn::as_str),
            SelectionField::Hue => self.hue.map_or("", CategoricalColumn::as_str),
        }
    }

    /// Move a row to the next (or previous) catalog entry, passing through
    /// the empty choice.
    pub fn cycle(&self, field: SelectionField, forward: bool) -> Self {
        let mut next = *self;
        match field {
            SelectionField::X => next.x = cycle_optional(&NumericColumn::ALL, self.x, forward),
            SelectionField::Y => next.y = cycle_optional(&NumericColumn::ALL, self.y, forward),
            SelectionField::SizeCol => {
                next.size_col = cycle_optional(&NumericColumn::ALL, self.size_col, forward)
            }
            SelectionField::Hue => {
                next.hue = cycle_optional(&CategoricalColumn::ALL, self.hue, forward)
            }
        }
        next
    }

    /// Reset a row to the empty choice.
    pub fn clear(&self, field: SelectionField) -> Self {
        let mut next = *self;
        match field {
            SelectionField::X => next.x = None,
            SelectionField::Y => next.y = None,
            SelectionField::SizeCol => next.size_col = None,
            SelectionField::Hue => next.hue = None,
        }
        next
    }

    pub fn is_complete(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }
}
