//! Table-driven cases for binding, tile formatting and query building.

use rstest::rstest;

use crate::core::columns::{CategoricalColumn, NumericColumn};
use crate::core::error::ValidationError;
use crate::core::metrics::format_value;
use crate::core::params::{
    coerce_number, CatalystType, NumericField, PredictionParameters, VisualizationSelection,
};
use crate::core::wire::{endpoint, scatter_query};

#[rstest]
#[case("29", 29.0)]
#[case(" 500 ", 500.0)]
#[case("0.015", 0.015)]
#[case("1e3", 1000.0)]
#[case("-4.5", -4.5)]
fn test_coerce_number_accepts_decimal_forms(#[case] raw: &str, #[case] expected: f64) {
    assert_eq!(coerce_number(raw), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("abc")]
#[case("12,5")]
#[case("1.2.3")]
fn test_coerce_number_rejects_garbage(#[case] raw: &str) {
    assert!(coerce_number(raw).is_nan());
}

#[rstest]
#[case(NumericField::Time, 1.0)]
#[case(NumericField::TIn, 1.0)]
#[case(NumericField::TPr, 1.0)]
#[case(NumericField::QAgent, 0.0001)]
#[case(NumericField::CatalystRate, 1.0)]
fn test_field_steps(#[case] field: NumericField, #[case] step: f64) {
    assert_eq!(field.step(), step);
}

#[rstest]
#[case(CatalystType::MarbleDust, "0", Ok(()))]
#[case(CatalystType::MarbleDust, "25", Ok(()))]
#[case(CatalystType::AlNi, "-3", Err(ValidationError::OutOfRange { field: "catalyst_rate" }))]
#[case(CatalystType::AlNi, "2.5", Err(ValidationError::OutOfRange { field: "catalyst_rate" }))]
#[case(CatalystType::MarbleDust, "-0.5", Err(ValidationError::OutOfRange { field: "catalyst_rate" }))]
#[case(CatalystType::MarbleDust, "lots", Err(ValidationError::InvalidNumber { field: "catalyst_rate" }))]
fn test_catalyst_rate_validation(
    #[case] catalyst: CatalystType,
    #[case] raw: &str,
    #[case] expected: Result<(), ValidationError>,
) {
    let params = PredictionParameters::default()
        .with_catalyst_type(catalyst)
        .bind(NumericField::CatalystRate, raw);
    assert_eq!(params.validate(), expected);
}

#[rstest]
#[case(12.3456, "12.346")]
#[case(0.0, "0.000")]
#[case(3.0, "3.000")]
#[case(9.87654, "9.877")]
fn test_tile_values_have_three_decimals(#[case] value: f64, #[case] expected: &str) {
    assert_eq!(format_value(value), expected);
}

#[rstest]
#[case(Some(NumericColumn::Time), Some(NumericColumn::Hydrogen), None, Some(CategoricalColumn::AgentType), "x=Time&y=Hydrogen&hue=AgentType")]
#[case(Some(NumericColumn::Methane), Some(NumericColumn::Oxygen), Some(NumericColumn::AgentFlow), None, "x=Methane&y=Oxygen&size_col=AgentFlow")]
#[case(Some(NumericColumn::Temperature), Some(NumericColumn::CalorificValue), Some(NumericColumn::Time), Some(CategoricalColumn::SampleType), "x=Temperature&y=CalorificValue&size_col=Time&hue=SampleType")]
fn test_scatter_query_table(
    #[case] x: Option<NumericColumn>,
    #[case] y: Option<NumericColumn>,
    #[case] size_col: Option<NumericColumn>,
    #[case] hue: Option<CategoricalColumn>,
    #[case] expected: &str,
) {
    let selection = VisualizationSelection { x, y, size_col, hue };
    assert_eq!(scatter_query(&selection).unwrap(), expected);
}

#[rstest]
#[case(None, Some(NumericColumn::Temperature))]
#[case(Some(NumericColumn::Time), None)]
#[case(None, None)]
fn test_scatter_query_missing_axis(
    #[case] x: Option<NumericColumn>,
    #[case] y: Option<NumericColumn>,
) {
    let selection = VisualizationSelection {
        x,
        y,
        ..Default::default()
    };
    assert_eq!(scatter_query(&selection), Err(ValidationError::MissingAxes));
}

#[rstest]
#[case("http://localhost:8000", "http://localhost:8000/api/v1/predict-knn")]
#[case("http://localhost:8000/", "http://localhost:8000/api/v1/predict-knn")]
#[case("https://gasifier.lan", "https://gasifier.lan/api/v1/predict-knn")]
fn test_endpoint_join(#[case] base: &str, #[case] expected: &str) {
    assert_eq!(endpoint(base, "/api/v1/predict-knn"), expected);
}
