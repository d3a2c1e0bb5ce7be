//! Prediction response and its projection into display tiles.

use serde::{Deserialize, Deserializer, Serialize};

/// Body of a successful `predict-knn` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub data: PredictionMetrics,
}

/// Gas composition and heating value predicted by the model.
///
/// A missing or `null` value reads as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionMetrics {
    #[serde(rename = "CO_perc", deserialize_with = "null_as_zero")]
    pub co_perc: f64,
    #[serde(rename = "CO2_perc", deserialize_with = "null_as_zero")]
    pub co2_perc: f64,
    #[serde(rename = "CH4_perc", deserialize_with = "null_as_zero")]
    pub ch4_perc: f64,
    #[serde(rename = "O2_perc", deserialize_with = "null_as_zero")]
    pub o2_perc: f64,
    #[serde(rename = "H2_perc", deserialize_with = "null_as_zero")]
    pub h2_perc: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub calorific_value: f64,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// One labelled value in the results grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: String,
}

/// Project a result into the six tiles, in display order.
pub fn tiles(result: &PredictionResult) -> [MetricTile; 6] {
    let d = &result.data;
    [
        tile("H₂ %", d.h2_perc),
        tile("CO %", d.co_perc),
        tile("CO₂ %", d.co2_perc),
        tile("CH₄ %", d.ch4_perc),
        tile("O₂ %", d.o2_perc),
        tile("Calorific value", d.calorific_value),
    ]
}

fn tile(label: &'static str, value: f64) -> MetricTile {
    MetricTile {
        label,
        value: format_value(value),
    }
}

/// Fixed three-decimal rendering used by every tile.
pub fn format_value(value: f64) -> String {
    format!("{value:.3}")
}
