//! Path resolution
//!
//! Alternatives are tried left to right; for each one the tiers below are
//! tried in order and the first hit wins:
//!
//! 1. direct member of the current object, for a single plain key
//! 2. the fully expanded flattened table
//! 3. the array-preserving flattened table, for whole sequences only
//!
//! Tiers 1 and 2 skip falsy values (null, false, zero, empty string, empty
//! container). Tier 3 accepts any sequence, empty ones included; scalars
//! stored in that table are never matched there, so a falsy scalar falls
//! through to the next alternative.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::context::{Frame, TranslationContext};
use crate::path::{PathExpression, Step};
use serde_json::Value;
use tracing::trace;

/// Which lookup produced a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tier {
    Direct,
    Expanded,
    Preserved,
}

/// A value found in the input, with its location
#[derive(Debug, Clone)]
pub(crate) struct Resolved<'a> {
    pub value: &'a Value,
    pub location: Vec<Step>,
    pub tier: Tier,
}

/// Resolve the first alternative that yields a value
pub(crate) fn resolve<'a>(
    ctx: &TranslationContext<'a>,
    frame: &Frame<'a>,
    alternatives: &[PathExpression],
) -> Option<Resolved<'a>> {
    let resolved = alternatives
        .iter()
        .find_map(|expression| resolve_one(ctx, frame, expression));

    if let Some(hit) = &resolved {
        trace!(path = %frame.path, tier = ?hit.tier, "resolved source value");
    }
    resolved
}

fn resolve_one<'a>(
    ctx: &TranslationContext<'a>,
    frame: &Frame<'a>,
    expression: &PathExpression,
) -> Option<Resolved<'a>> {
    if let Some(key) = expression.as_plain_key() {
        if let Some(value) = member(frame, key).filter(|v| is_truthy(v)) {
            return Some(Resolved {
                value,
                location: frame.member(key),
                tier: Tier::Direct,
            });
        }
    }

    let location = frame.scoped(expression.bind(frame.index));

    if let Some(value) = ctx.expanded.lookup(&location).filter(|v| is_truthy(v)) {
        return Some(Resolved {
            value,
            location,
            tier: Tier::Expanded,
        });
    }

    ctx.preserved.lookup(&location).filter(|v| v.is_array()).map(|value| Resolved {
        value,
        location,
        tier: Tier::Preserved,
    })
}

/// Direct member of the frame's object, regardless of truthiness
pub(crate) fn member<'a>(frame: &Frame<'a>, key: &str) -> Option<&'a Value> {
    frame.value.as_object().and_then(|map| map.get(key))
}

/// Falsy values count as absent
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
