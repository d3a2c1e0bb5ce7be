//! Column catalog of the gasification dataset.
//!
//! The service plots any numeric column on the axes or as point size, and
//! groups colour by a categorical column. Both catalogs are derived from one
//! ordered table so their order matches the dataset layout.

use std::fmt;
use std::str::FromStr;

/// Storage type of a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtype {
    Float,
    Int,
    String,
}

impl Dtype {
    pub fn is_numeric(self) -> bool {
        !matches!(self, Dtype::String)
    }
}

/// Every dataset column, in dataset order.
pub const COLUMNS: &[(&str, Dtype)] = &[
    ("Time", Dtype::Float),
    ("Temperature", Dtype::Int),
    ("ProcessTemperature", Dtype::Int),
    ("AgentType", Dtype::String),
    ("AgentFlow", Dtype::Float),
    ("SampleType", Dtype::String),
    ("CatalystType", Dtype::String),
    ("CatalystRatio", Dtype::Float),
    ("CarbonMonoxide", Dtype::Float),
    ("CarbonDioxide", Dtype::Float),
    ("Methane", Dtype::Float),
    ("Oxygen", Dtype::Float),
    ("Hydrogen", Dtype::Float),
    ("CalorificValue", Dtype::Float),
];

/// Columns valid for `x`, `y` and `size_col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    Time,
    Temperature,
    ProcessTemperature,
    AgentFlow,
    CatalystRatio,
    CarbonMonoxide,
    CarbonDioxide,
    Methane,
    Oxygen,
    Hydrogen,
    CalorificValue,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 11] = [
        NumericColumn::Time,
        NumericColumn::Temperature,
        NumericColumn::ProcessTemperature,
        NumericColumn::AgentFlow,
        NumericColumn::CatalystRatio,
        NumericColumn::CarbonMonoxide,
        NumericColumn::CarbonDioxide,
        NumericColumn::Methane,
        NumericColumn::Oxygen,
        NumericColumn::Hydrogen,
        NumericColumn::CalorificValue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NumericColumn::Time => "Time",
            NumericColumn::Temperature => "Temperature",
            NumericColumn::ProcessTemperature => "ProcessTemperature",
            NumericColumn::AgentFlow => "AgentFlow",
            NumericColumn::CatalystRatio => "CatalystRatio",
            NumericColumn::CarbonMonoxide => "CarbonMonoxide",
            NumericColumn::CarbonDioxide => "CarbonDioxide",
            NumericColumn::Methane => "Methane",
            NumericColumn::Oxygen => "Oxygen",
            NumericColumn::Hydrogen => "Hydrogen",
            NumericColumn::CalorificValue => "CalorificValue",
        }
    }

    pub fn dtype(self) -> Dtype {
        dtype_of(self.as_str()).unwrap_or(Dtype::Float)
    }
}

/// Columns valid for `hue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalColumn {
    AgentType,
    SampleType,
    CatalystType,
}

impl CategoricalColumn {
    pub const ALL: [CategoricalColumn; 3] = [
        CategoricalColumn::AgentType,
        CategoricalColumn::SampleType,
        CategoricalColumn::CatalystType,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoricalColumn::AgentType => "AgentType",
            CategoricalColumn::SampleType => "SampleType",
            CategoricalColumn::CatalystType => "CatalystType",
        }
    }
}

fn dtype_of(name: &str) -> Option<Dtype> {
    COLUMNS
        .iter()
        .find(|(column, _)| *column == name)
        .map(|(_, dtype)| *dtype)
}

/// Raised when parsing a column name outside its catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown column: {0}")]
pub struct UnknownColumn(pub String);

impl FromStr for NumericColumn {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NumericColumn::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

impl FromStr for CategoricalColumn {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoricalColumn::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CategoricalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step through an optional selection: `None` first, then every catalog
/// entry in order, wrapping in both directions.
pub fn cycle_optional<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let len = all.len() + 1;
    let idx = match current {
        None => 0,
        Some(value) => all.iter().position(|c| *c == value).map_or(0, |i| i + 1),
    };
    let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
    if next == 0 {
        None
    } else {
        Some(all[next - 1])
    }
}
