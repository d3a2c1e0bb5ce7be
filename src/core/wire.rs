//! Wire shapes expected by the analytics service.
//!
//! Prediction goes out as a flat JSON document, visualization as a
//! form-urlencoded query string.

use serde_json::{Map, Value};
use url::form_urlencoded;

use super::error::ValidationError;
use super::params::{PredictionParameters, VisualizationSelection};

/// Path of the KNN prediction endpoint.
pub const PREDICT_PATH: &str = "/api/v1/predict-knn";
/// Path of the scatter endpoint returning a full HTML document.
pub const SCATTER_HTML_PATH: &str = "/api/v1/viz/scatter/html";

/// Build the JSON body for a prediction request.
///
/// Keys are exactly the eight form fields. Enumerations go out as their
/// labels; numbers stay numbers, integral values without a fractional part.
pub fn prediction_body(params: &PredictionParameters) -> Result<Value, ValidationError> {
    params.validate()?;

    let mut body = Map::with_capacity(8);
    body.insert("time".into(), number(params.time));
    body.insert("t_in".into(), number(params.t_in));
    body.insert("t_pr".into(), number(params.t_pr));
    body.insert("agent_type".into(), params.agent_type.label().into());
    body.insert("q_agent".into(), number(params.q_agent));
    body.insert("sample_type".into(), params.sample_type.label().into());
    body.insert("catalyst_type".into(), params.catalyst_type.label().into());
    body.insert("catalyst_rate".into(), number(params.catalyst_rate));
    Ok(Value::Object(body))
}

/// Largest integer an `f64` holds exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INT {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

/// Build the query string for a scatter request.
///
/// `x` and `y` are mandatory; `size_col` and `hue` are omitted when empty.
pub fn scatter_query(selection: &VisualizationSelection) -> Result<String, ValidationError> {
    let (Some(x), Some(y)) = (selection.x, selection.y) else {
        return Err(ValidationError::MissingAxes);
    };

    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("x", x.as_str());
    query.append_pair("y", y.as_str());
    if let Some(size_col) = selection.size_col {
        query.append_pair("size_col", size_col.as_str());
    }
    if let Some(hue) = selection.hue {
        query.append_pair("hue", hue.as_str());
    }
    Ok(query.finish())
}

/// Join a configured base URL and an endpoint path.
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
