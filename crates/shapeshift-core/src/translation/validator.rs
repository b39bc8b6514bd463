//! Type check of final leaf values
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use crate::error::{ActualKind, Error, Result};
use crate::timestamp::is_rfc3339;
use crate::types::{Modifier, Modifiers, ValueKind};
use serde_json::Value;

/// Validate a final value against the declared kind
///
/// Sequences declared `array` are checked through their first element; an
/// empty sequence always passes.
pub(crate) fn check(
    kind: ValueKind,
    is_array: bool,
    value: &Value,
    modifiers: Modifiers,
    path: &str,
) -> Result<()> {
    let subject = match value {
        Value::Array(items) if is_array => match items.first() {
            Some(first) => first,
            None => return Ok(()),
        },
        other => other,
    };

    if accepts(kind, subject, modifiers) {
        Ok(())
    } else {
        Err(Error::TypeMismatch {
            path: path.to_string(),
            actual: ActualKind::of(subject),
            expected: kind,
        })
    }
}

/// Whether `value` is acceptable where `kind` is declared
pub fn accepts(kind: ValueKind, value: &Value, modifiers: Modifiers) -> bool {
    match (kind, value) {
        (_, Value::Null) => modifiers.contains(Modifier::DefaultNull),
        (ValueKind::Object, Value::Object(_)) => true,
        (ValueKind::String, Value::String(_)) => true,
        (ValueKind::Boolean, Value::Bool(_)) => true,
        (ValueKind::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
        (ValueKind::Number, Value::Number(_)) => true,
        (ValueKind::Timestamp, Value::String(text)) => is_rfc3339(text),
        (ValueKind::DocumentId, value) => is_document_id(value),
        _ => false,
    }
}

/// 24 hex digits, bare or in extended JSON `{"$oid": ...}` form
pub fn is_document_id(value: &Value) -> bool {
    fn is_hex24(text: &str) -> bool {
        text.len() == 24 && text.bytes().all(|b| b.is_ascii_hexdigit())
    }

    match value {
        Value::String(text) => is_hex24(text),
        Value::Object(map) if map.len() == 1 => map
            .get("$oid")
            .and_then(Value::as_str)
            .is_some_and(is_hex24),
        _ => false,
    }
}
