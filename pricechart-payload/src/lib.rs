//! Page payload codec: decodes the embedded price series and turns it into a chart configuration.

use pricechart_core::{ChartConfig, PageConfig, PayloadError, PricePayload};
use serde_json::Value;

/// Decode payload text taken from the page.
///
/// The page template may emit the payload as a JSON string that itself holds
/// the JSON document. A string result is therefore parsed once more; anything
/// it yields is accepted without further checks.
pub fn decode_payload_str(text: &str) -> Result<Value, PayloadError> {
    if text.is_empty() {
        return Err(PayloadError::Empty);
    }

    let mut value: Value = serde_json::from_str(text)?;
    if let Value::String(inner) = &value {
        value = serde_json::from_str(inner)?;
    }

    if is_falsy(&value) {
        return Err(PayloadError::Null);
    }
    Ok(value)
}

/// `null`, `false`, `0` and `""` mean the page carries no price history.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Build the single-series line chart for a decoded payload.
///
/// `dates` and `prices` are copied verbatim; a missing field becomes `null`
/// and is left for the chart library to deal with.
pub fn build_chart_config(payload: &Value, config: &PageConfig) -> ChartConfig {
    let field = |name: &str| payload.get(name).cloned().unwrap_or(Value::Null);
    ChartConfig::line(field("dates"), field("prices"), config)
}

/// Decode payload text and build the chart configuration in one step.
pub fn chart_config_from_str(text: &str, config: &PageConfig) -> Result<ChartConfig, PayloadError> {
    let payload = decode_payload_str(text)?;
    Ok(build_chart_config(&payload, config))
}

/// Encode a payload as plain JSON.
pub fn encode_payload(payload: &PricePayload) -> Result<String, PayloadError> {
    Ok(serde_json::to_string(payload)?)
}

/// Encode a payload the way the product page embeds it: a JSON string wrapping the JSON document.
pub fn embed_payload(payload: &PricePayload) -> Result<String, PayloadError> {
    let inner = encode_payload(payload)?;
    Ok(serde_json::to_string(&inner)?)
}
