use serde::{Deserialize, Deserializer};
use validator::ValidationErrors;

/// Deserialize a JSON value as an integer, mapping anything else to `None`.
///
/// Numbers with no fractional part count as integers (`4.0` is 4). Strings,
/// fractions, booleans and `null` all become `None` so that a `required` rule
/// can reject them with the field's own message instead of a generic
/// body-parsing error.
pub fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_i64().or_else(|| value.as_f64().and_then(integral_f64)))
}

// i64::MAX is not exactly representable as f64; the bound is 2^63
fn integral_f64(n: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (n.is_finite() && n.fract() == 0.0 && n >= -LIMIT && n < LIMIT).then_some(n as i64)
}

/// First message attached to any failed field, falling back to the
/// aggregated description.
pub fn first_error_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
