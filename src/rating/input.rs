//! Coercion of loosely typed inputs.
//!
//! Numbers may arrive as JSON numbers or as strings, possibly padded with
//! whitespace. A string only has to start with a number; trailing text is
//! ignored.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([-+]?\d+)").expect("integer pattern"));

static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?)").expect("float pattern")
});

/// The input as the caller wrote it, for error messages.
pub fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => LEADING_INTEGER
            .captures(s)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok()),
        _ => None,
    }
}

pub fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => LEADING_FLOAT
            .captures(s)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok()),
        _ => None,
    }
}

/// Zero is only accepted when the input visibly is a zero, not when it is
/// text that failed to parse.
pub fn starts_with_digit(value: &Value) -> bool {
    describe(value)
        .trim_start()
        .starts_with(|c: char| c.is_ascii_digit())
}
