//! Value pipeline for leaf fields
//!
//! A resolved raw value goes through default substitution, trimming, the
//! stop-at cut and finally `enforce` coercion, in that order.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::resolver::is_truthy;
use crate::error::{Error, Result};
use crate::timestamp::TimestampParser;
use crate::types::{Leaf, Modifier, Modifiers, ValueKind};
use serde_json::{Number, Value};
use tracing::trace;

/// Result of running the pipeline on one leaf
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Outcome {
    /// Derived from an input value; subject to the type check
    Resolved(Value),
    /// Derived from the declared default; exempt from the type check
    Defaulted(Value),
    /// Explicit null, the pipeline stopped early
    Null,
}

pub(crate) fn apply(
    leaf: &Leaf,
    modifiers: Modifiers,
    raw: Option<&Value>,
    timestamps: &dyn TimestampParser,
    path: &str,
) -> Result<Outcome> {
    let (value, defaulted) = match raw.filter(|v| is_truthy(v)) {
        Some(value) => (value.clone(), false),
        None => match &leaf.default {
            Some(Value::Null) => {
                trace!(path, "null default");
                return Ok(Outcome::Null);
            }
            Some(default) => {
                trace!(path, "substituting default");
                (default.clone(), true)
            }
            None if modifiers.contains(Modifier::DefaultNull) => {
                trace!(path, "absent value, default_null");
                return Ok(Outcome::Null);
            }
            None => {
                return Err(Error::MissingValue {
                    path: path.to_string(),
                })
            }
        },
    };

    let value = trim(
        value,
        leaf.trim_start.unwrap_or(0),
        leaf.trim_end.unwrap_or(0),
        path,
    )?;
    let value = match leaf.stop_at.as_deref() {
        Some(delimiter) => cut(value, delimiter, path)?,
        None => value,
    };
    let value = if modifiers.contains(Modifier::Enforce) {
        enforce(leaf.kind, leaf.array, value, timestamps, path)?
    } else {
        value
    };

    Ok(if defaulted {
        Outcome::Defaulted(value)
    } else {
        Outcome::Resolved(value)
    })
}

/// Drop `start` leading and `end` trailing characters or elements
fn trim(value: Value, start: usize, end: usize, path: &str) -> Result<Value> {
    if start == 0 && end == 0 {
        return Ok(value);
    }

    match value {
        Value::String(text) => {
            let count = text.chars().count();
            let keep = count.saturating_sub(start).saturating_sub(end);
            Ok(Value::String(text.chars().skip(start).take(keep).collect()))
        }
        Value::Array(items) => {
            let keep = items.len().saturating_sub(start).saturating_sub(end);
            Ok(Value::Array(items.into_iter().skip(start).take(keep).collect()))
        }
        other => Err(Error::coercion(path, "trimmed string", &other, None)),
    }
}

/// Keep the part of a string preceding the first `delimiter`
fn cut(value: Value, delimiter: &str, path: &str) -> Result<Value> {
    match value {
        Value::String(text) if delimiter.is_empty() => Ok(Value::String(text)),
        Value::String(text) => match text.split_once(delimiter) {
            Some((head, _)) => Ok(Value::String(head.to_string())),
            None => Ok(Value::String(text)),
        },
        other => Err(Error::coercion(path, "string cut", &other, None)),
    }
}

/// Coerce to the declared kind, element-wise for sequences declared `array`
fn enforce(
    kind: ValueKind,
    is_array: bool,
    value: Value,
    timestamps: &dyn TimestampParser,
    path: &str,
) -> Result<Value> {
    match value {
        Value::Array(items) if is_array => items
            .iter()
            .map(|item| coerce(kind, item, timestamps, path))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => coerce(kind, &other, timestamps, path),
    }
}

pub(crate) fn coerce(
    kind: ValueKind,
    value: &Value,
    timestamps: &dyn TimestampParser,
    path: &str,
) -> Result<Value> {
    match kind {
        ValueKind::Number => to_number(value, path),
        ValueKind::Integer => to_integer(value, path),
        ValueKind::String => to_string(value, path),
        ValueKind::Timestamp => to_timestamp(value, timestamps, path),
        ValueKind::Object | ValueKind::Boolean | ValueKind::DocumentId => Ok(value.clone()),
    }
}

fn to_number(value: &Value, path: &str) -> Result<Value> {
    let float = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => Some(
            text.trim()
                .parse::<f64>()
                .map_err(|e| Error::coercion(path, ValueKind::Number, value, Some(e.into())))?,
        ),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    float
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| Error::coercion(path, ValueKind::Number, value, None))
}

fn to_integer(value: &Value, path: &str) -> Result<Value> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
        Value::Number(n) => n
            .as_f64()
            .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| Value::from(f.trunc() as i64))
            .ok_or_else(|| Error::coercion(path, ValueKind::Integer, value, None)),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| Error::coercion(path, ValueKind::Integer, value, Some(e.into()))),
        Value::Bool(b) => Ok(Value::from(i64::from(*b))),
        _ => Err(Error::coercion(path, ValueKind::Integer, value, None)),
    }
}

fn to_string(value: &Value, path: &str) -> Result<Value> {
    match value {
        Value::String(_) => Ok(value.clone()),
        Value::Null => Err(Error::coercion(path, ValueKind::String, value, None)),
        other => Ok(Value::String(other.to_string())),
    }
}

fn to_timestamp(value: &Value, timestamps: &dyn TimestampParser, path: &str) -> Result<Value> {
    match value {
        Value::String(text) => timestamps
            .parse(text)
            .map(|parsed| Value::String(parsed.to_rfc3339()))
            .map_err(|e| Error::coercion(path, ValueKind::Timestamp, value, Some(e.into()))),
        _ => Err(Error::coercion(path, ValueKind::Timestamp, value, None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::ChronoTimestampParser;
    use serde_json::json;

    fn run(leaf: &Leaf, modifiers: Modifiers, raw: Option<Value>) -> Result<Outcome> {
        apply(leaf, modifiers, raw.as_ref(), &ChronoTimestampParser, "$.field")
    }

    fn enforced() -> Modifiers {
        Modifiers::empty().with(Modifier::Enforce)
    }

    #[test]
    fn test_trimming() {
        let leaf = Leaf::new(ValueKind::String).trim_start(3);
        assert_eq!(
            run(&leaf, Modifiers::empty(), Some(json!("abc123"))).unwrap(),
            Outcome::Resolved(json!("123"))
        );

        let leaf = Leaf::new(ValueKind::String).trim_end(3);
        assert_eq!(
            run(&leaf, Modifiers::empty(), Some(json!("abc123"))).unwrap(),
            Outcome::Resolved(json!("abc"))
        );

        let leaf = Leaf::new(ValueKind::String).trim_start(10);
        assert_eq!(
            run(&leaf, Modifiers::empty(), Some(json!("abc"))).unwrap(),
            Outcome::Resolved(json!(""))
        );
    }

    #[test]
    fn test_trimming_counts_characters() {
        let leaf = Leaf::new(ValueKind::String).trim_start(1).trim_end(1);
        assert_eq!(
            run(&leaf, Modifiers::empty(), Some(json!("ãçõ"))).unwrap(),
            Outcome::Resolved(json!("ç"))
        );
    }

    #[test]
    fn test_trimming_sequences() {
        let leaf = Leaf::new(ValueKind::Integer).array().trim_start(1);
        assert_eq!(
            run(&leaf, Modifiers::empty(), Some(json!([1, 2, 3]))).unwrap(),
            Outcome::Resolved(json!([2, 3]))
        );
    }

    #[test]
    fn test_stop_at() {
        let leaf = Leaf::new(ValueKind::String).stop_at(" ");
        assert_eq!(
            run(&leaf, Modifiers::empty(), Some(json!("Terry A. Davis"))).unwrap(),
            Outcome::Resolved(json!("Terry"))
        );

        let leaf = Leaf::new(ValueKind::String).stop_at("");
        assert_eq!(
            run(&leaf, Modifiers::empty(), Some(json!("Terry A. Davis"))).unwrap(),
            Outcome::Resolved(json!("Terry A. Davis"))
        );
    }

    #[test]
    fn test_string_steps_reject_other_kinds() {
        let leaf = Leaf::new(ValueKind::Integer).stop_at(" ");
        let err = run(&leaf, Modifiers::empty(), Some(json!(42))).unwrap_err();
        assert!(matches!(err, Error::Coercion { .. }));

        let leaf = Leaf::new(ValueKind::Integer).trim_start(1);
        let err = run(&leaf, Modifiers::empty(), Some(json!(42))).unwrap_err();
        assert!(matches!(err, Error::Coercion { .. }));
    }

    #[test]
    fn test_default_substitution() {
        let leaf = Leaf::new(ValueKind::String).default_value(json!(1500));
        assert_eq!(
            run(&leaf, enforced(), None).unwrap(),
            Outcome::Defaulted(json!("1500"))
        );

        assert_eq!(
            run(&leaf, Modifiers::empty(), Some(json!(""))).unwrap(),
            Outcome::Defaulted(json!(1500))
        );
    }

    #[test]
    fn test_null_outcomes() {
        let leaf = Leaf::new(ValueKind::String).default_value(Value::Null);
        assert_eq!(run(&leaf, enforced(), None).unwrap(), Outcome::Null);

        let leaf = Leaf::new(ValueKind::String);
        let modifiers = Modifiers::empty().with(Modifier::DefaultNull);
        assert_eq!(run(&leaf, modifiers, None).unwrap(), Outcome::Null);
    }

    #[test]
    fn test_missing_value() {
        let leaf = Leaf::new(ValueKind::String);
        let err = run(&leaf, Modifiers::empty(), Some(json!(0))).unwrap_err();
        assert!(matches!(err, Error::MissingValue { ref path } if path == "$.field"));
    }

    #[test]
    fn test_enforce_integer() {
        let leaf = Leaf::new(ValueKind::Integer);
        assert_eq!(
            run(&leaf, enforced(), Some(json!(" 42 "))).unwrap(),
            Outcome::Resolved(json!(42))
        );
        assert_eq!(
            run(&leaf, enforced(), Some(json!(41.9))).unwrap(),
            Outcome::Resolved(json!(41))
        );
        assert_eq!(
            run(&leaf, enforced(), Some(json!(true))).unwrap(),
            Outcome::Resolved(json!(1))
        );

        let err = run(&leaf, enforced(), Some(json!("4x2"))).unwrap_err();
        match err {
            Error::Coercion { target, value, source, .. } => {
                assert_eq!(target, "integer");
                assert_eq!(value, "\"4x2\"");
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_enforce_number_and_string() {
        let leaf = Leaf::new(ValueKind::Number);
        assert_eq!(
            run(&leaf, enforced(), Some(json!("1500.5"))).unwrap(),
            Outcome::Resolved(json!(1500.5))
        );
        assert_eq!(
            run(&leaf, enforced(), Some(json!(15))).unwrap(),
            Outcome::Resolved(json!(15.0))
        );
        assert!(run(&leaf, enforced(), Some(json!("NaN"))).is_err());

        let leaf = Leaf::new(ValueKind::String);
        assert_eq!(
            run(&leaf, enforced(), Some(json!(23))).unwrap(),
            Outcome::Resolved(json!("23"))
        );
        assert_eq!(
            run(&leaf, enforced(), Some(json!({"a": [1]}))).unwrap(),
            Outcome::Resolved(json!("{\"a\":[1]}"))
        );
    }

    #[test]
    fn test_enforce_timestamp() {
        let leaf = Leaf::new(ValueKind::Timestamp);
        assert_eq!(
            run(&leaf, enforced(), Some(json!("2024-03-01 10:30:00"))).unwrap(),
            Outcome::Resolved(json!("2024-03-01T10:30:00+00:00"))
        );

        let err = run(&leaf, enforced(), Some(json!("yesterday-ish"))).unwrap_err();
        assert!(matches!(err, Error::Coercion { ref target, .. } if target == "timestamp"));
    }

    #[test]
    fn test_enforce_applies_per_element() {
        let leaf = Leaf::new(ValueKind::String).array();
        assert_eq!(
            run(&leaf, enforced(), Some(json!([1, 2]))).unwrap(),
            Outcome::Resolved(json!(["1", "2"]))
        );
    }

    #[test]
    fn test_enforce_passes_other_kinds_through() {
        let leaf = Leaf::new(ValueKind::Boolean);
        assert_eq!(
            run(&leaf, enforced(), Some(json!("yes"))).unwrap(),
            Outcome::Resolved(json!("yes"))
        );
    }
}
