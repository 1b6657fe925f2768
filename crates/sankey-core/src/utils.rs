use serde_json::Value;

/// Normalizes any numeric input to a finite non-negative value.
///
/// Negative numbers, NaN, missing values and both infinities collapse to `0`; every finite
/// non-negative value passes through unchanged. This is the one clamping rule used by the
/// whole layout (viewport sizes, weights and scales).
pub fn positive_number(value: impl Into<Option<f64>>) -> f64 {
    match value.into() {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

/// Reads a weight cell. Numbers and numeric strings are accepted; everything else is missing.
pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Formats a category value as its display label.
///
/// Numbers use ECMAScript `Number.prototype.toString` formatting so that `1`, `1.5` and
/// `1e21` label the same way the host does.
pub fn format_category(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(v) => format_js_number(v),
            None => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn format_js_number(v: f64) -> String {
    let mut buf = ryu_js::Buffer::new();
    buf.format(v).to_string()
}

/// Converts a font size in points to CSS pixels.
pub fn points_to_px(points: f64) -> f64 {
    points * 4.0 / 3.0
}
