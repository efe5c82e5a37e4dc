//! Helpers shared by validators for inspecting loosely typed values.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Number, Value};

/// Leading float literal, in the shape `parseFloat` accepts.
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("float prefix pattern is valid")
});

/// Returns true if the value counts as "not filled in".
///
/// Only `null` and the empty string are empty. `0` and `false` are real
/// answers and count as filled.
///
/// # Example
///
/// ```rust
/// use formrules::value::is_empty_value;
/// use serde_json::json;
///
/// assert!(is_empty_value(&json!(null)));
/// assert!(is_empty_value(&json!("")));
/// assert!(!is_empty_value(&json!(0)));
/// assert!(!is_empty_value(&json!(false)));
/// assert!(!is_empty_value(&json!([])));
/// ```
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Renders a value in its default string form.
///
/// Strings are returned without quotes, arrays are joined with commas
/// (nulls render as empty) and objects render as `[object Object]`.
///
/// # Example
///
/// ```rust
/// use formrules::value::display_text;
/// use serde_json::json;
///
/// assert_eq!(display_text(&json!("abc")), "abc");
/// assert_eq!(display_text(&json!(12.5)), "12.5");
/// assert_eq!(display_text(&json!([1, null, "x"])), "1,,x");
/// ```
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(format_f64).unwrap_or_default()
    }
}

/// Formats a float the way form hosts print numbers.
///
/// Whole numbers have no trailing `.0`. Magnitudes below `1e-6` or from
/// `1e21` up switch to exponent form, so `1.5e-7` stays `1.5e-7` and `1e21`
/// prints as `1e+21`.
pub fn format_f64(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n != 0.0 && (n.abs() < 1e-6 || n.abs() >= 1e21) {
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => text,
        }
    } else {
        // f64's Display is the shortest round-trip form and prints 100.0 as "100".
        format!("{}", n)
    }
}

/// Parses the leading float literal of a string.
///
/// Leading whitespace is skipped and trailing garbage is ignored, so
/// `"12px"` parses as `12`. Returns `None` when no literal is found.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let trimmed = s.trim_start();
    let literal = FLOAT_PREFIX.find(trimmed)?.as_str();

    match literal.trim_start_matches(['+', '-']) {
        "Infinity" if literal.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => literal.parse::<f64>().ok(),
    }
}

/// Converts a float into a JSON value, keeping whole numbers integral.
///
/// Non-finite floats have no JSON number form and become strings.
pub fn number_value(n: f64) -> Value {
    const SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    if n.is_finite() && n.fract() == 0.0 && n.abs() <= SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(format_f64(n)))
    }
}

/// Returns true if the float has no fractional part.
pub fn is_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0
}

/// Counts the characters after the decimal point in the float's printed form.
///
/// Exponent forms count their mantissa digits plus the exponent suffix:
/// `1e-7` has none and `1.5e-7` has four (`5e-7`).
pub fn decimal_places(n: f64) -> usize {
    format_f64(n)
        .split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0)
}
