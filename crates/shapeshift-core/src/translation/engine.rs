//! Recursive tree walk
//!
//! Walks the input and the schema side by side. Objects are translated field
//! by field in schema order; sequences are translated element by element, each
//! element binding its index to the `[]` placeholder of descendant paths.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::context::{Frame, TranslationContext};
use super::pipeline::{self, Outcome};
use super::resolver::{member, resolve};
use super::validator;
use crate::error::{ActualKind, Error, Result};
use crate::path::{parse, PathExpression};
use crate::types::{Branch, Fields, Leaf, Modifier, Modifiers, Node, Schema};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Translate a whole input under a schema
pub(crate) fn translate_root<'a>(ctx: &TranslationContext<'a>, input: &'a Value, schema: &Schema) -> Result<Value> {
    let frame = Frame::root(input, schema.modifiers.unwrap_or_default());

    if schema.array && !input.is_array() {
        return Err(Error::shape(
            &frame.path,
            format!("expected a sequence, found {}", ActualKind::of(input)),
        ));
    }

    walk(ctx, &frame, schema.fields.as_ref(), schema.array)
}

/// Translate the frame's value, an object or a sequence of objects
fn walk<'a>(ctx: &TranslationContext<'a>, frame: &Frame<'a>, fields: Option<&Fields>, array: bool) -> Result<Value> {
    match frame.value {
        Value::Object(_) => translate_object(ctx, frame, fields),
        Value::Array(items) => {
            if !array {
                return Err(Error::shape(&frame.path, "unexpected sequence"));
            }
            debug!(path = %frame.path, len = items.len(), "translating sequence");
            items
                .iter()
                .enumerate()
                .map(|(index, item)| walk(ctx, &frame.element(index, item), fields, array))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        other => Err(Error::shape(
            &frame.path,
            format!("expected an object, found {}", ActualKind::of(other)),
        )),
    }
}

fn translate_object<'a>(ctx: &TranslationContext<'a>, frame: &Frame<'a>, fields: Option<&Fields>) -> Result<Value> {
    let fields = fields.ok_or_else(|| Error::shape(&frame.path, "schema has no children for an object value"))?;
    let mut out = Map::new();

    for (name, node) in fields.iter() {
        let modifiers = node.modifiers().unwrap_or(frame.modifiers);
        let Some(plan) = field_plan(name, node, modifiers, ctx.separator, frame)? else {
            trace!(path = %frame.field_path(name), "empty source path, skipping");
            continue;
        };
        let path = frame.field_path(&plan.output);

        let value = match node {
            Node::Leaf(leaf) => translate_leaf(ctx, frame, leaf, &plan, modifiers, &path)?,
            Node::Object(branch) => translate_branch(ctx, frame, branch, false, &plan, modifiers, path)?,
            Node::Array(branch) => translate_branch(ctx, frame, branch, true, &plan, modifiers, path)?,
        };
        out.insert(plan.output, value);
    }

    Ok(Value::Object(out))
}

/// Output key and lookup paths of one field
struct FieldPlan {
    output: String,
    lookups: Vec<PathExpression>,
    /// The node declares its own source path
    mapped: bool,
}

/// `None` when the field is to be skipped
fn field_plan(
    name: &str,
    node: &Node,
    modifiers: Modifiers,
    separator: &str,
    frame: &Frame<'_>,
) -> Result<Option<FieldPlan>> {
    let source = node.source();
    if source.is_some_and(|s| s.is_empty()) {
        return Ok(None);
    }

    if modifiers.contains(Modifier::Reverse) {
        let output = source
            .and_then(|s| s.primary())
            .unwrap_or(name)
            .to_string();
        return Ok(Some(FieldPlan {
            output,
            lookups: vec![PathExpression::literal(name)],
            mapped: source.is_some(),
        }));
    }

    let lookups = match source {
        Some(source) => source
            .alternatives()
            .into_iter()
            .map(|alternative| {
                parse(alternative, separator).map_err(|source| Error::InvalidPath {
                    path: frame.field_path(name),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?,
        None => vec![PathExpression::literal(name)],
    };

    Ok(Some(FieldPlan {
        output: name.to_string(),
        lookups,
        mapped: source.is_some(),
    }))
}

fn translate_leaf<'a>(
    ctx: &TranslationContext<'a>,
    frame: &Frame<'a>,
    leaf: &Leaf,
    plan: &FieldPlan,
    modifiers: Modifiers,
    path: &str,
) -> Result<Value> {
    let raw = resolve(ctx, frame, &plan.lookups).map(|hit| hit.value);

    match pipeline::apply(leaf, modifiers, raw, ctx.timestamps, path)? {
        Outcome::Null => Ok(Value::Null),
        Outcome::Defaulted(value) => Ok(wrap(leaf.array, value)),
        Outcome::Resolved(value) => {
            let value = wrap(leaf.array, value);
            validator::check(leaf.kind, leaf.array, &value, modifiers, path)?;
            Ok(value)
        }
    }
}

fn translate_branch<'a>(
    ctx: &TranslationContext<'a>,
    frame: &Frame<'a>,
    branch: &Branch,
    array: bool,
    plan: &FieldPlan,
    modifiers: Modifiers,
    path: String,
) -> Result<Value> {
    let child = if !plan.mapped {
        frame.rescoped(modifiers, path)
    } else if let Some(hit) = resolve(ctx, frame, &plan.lookups).filter(|hit| !hit.value.is_null()) {
        frame.descend(hit.value, hit.location, modifiers, path)
    } else if let Some(value) = member(frame, &plan.output) {
        frame.descend(value, frame.member(&plan.output), modifiers, path)
    } else if modifiers.contains(Modifier::DefaultNull) {
        trace!(path = %path, "absent nested value, default_null");
        return Ok(Value::Null);
    } else {
        return Err(Error::MissingValue { path });
    };

    let value = walk(ctx, &child, Some(&branch.fields), array)?;
    Ok(wrap(array, value))
}

/// Wrap a lone value into a one-element sequence when one is declared
fn wrap(array: bool, value: Value) -> Value {
    if array && !value.is_array() && !value.is_null() {
        Value::Array(vec![value])
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::ChronoTimestampParser;
    use crate::types::{FieldsExt, SourcePath, ValueKind};
    use serde_json::json;

    fn run(input: &Value, schema: &Schema) -> Result<Value> {
        let parser = ChronoTimestampParser;
        let ctx = TranslationContext::new(input, ".", &parser);
        translate_root(&ctx, input, schema)
    }

    #[test]
    fn test_flat_object() {
        let schema = Schema::object(
            Fields::new()
                .field("name", Leaf::new(ValueKind::String).from_path("nome"))
                .field("age", Leaf::new(ValueKind::Integer).from_path("idade")),
        );
        let output = run(&json!({"nome": "jurandir", "idade": 23}), &schema).unwrap();
        assert_eq!(output, json!({"name": "jurandir", "age": 23}));
    }

    #[test]
    fn test_field_order_follows_schema() {
        let schema = Schema::object(
            Fields::new()
                .field("b", Leaf::new(ValueKind::Integer))
                .field("a", Leaf::new(ValueKind::Integer)),
        );
        let output = run(&json!({"a": 1, "b": 2}), &schema).unwrap();
        let keys: Vec<&String> = output.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_empty_source_path_skips_field() {
        let schema = Schema::object(
            Fields::new()
                .field("name", Leaf::new(ValueKind::String).from_path("nome"))
                .field("ignored", Leaf::new(ValueKind::String).from_path("")),
        );
        let output = run(&json!({"nome": "x"}), &schema).unwrap();
        assert_eq!(output, json!({"name": "x"}));
    }

    #[test]
    fn test_reverse_swaps_roles() {
        let forward = Schema::object(
            Fields::new().field("name", Leaf::new(ValueKind::String).from_path("nome")),
        );
        let reversed = Schema::object(
            Fields::new().field("name", Leaf::new(ValueKind::String).from_path("nome")),
        )
        .with_modifiers([Modifier::Reverse]);

        let translated = run(&json!({"nome": "jurandir"}), &forward).unwrap();
        assert_eq!(translated, json!({"name": "jurandir"}));
        let back = run(&translated, &reversed).unwrap();
        assert_eq!(back, json!({"nome": "jurandir"}));
    }

    #[test]
    fn test_mapped_branch_without_value_uses_output_key() {
        let schema = Schema::object(Fields::new().field(
            "dog",
            Node::Object(
                Branch::new(Fields::new().field("alias", Leaf::new(ValueKind::String).from_path("apelido")))
                    .from_path("cachorro"),
            ),
        ));
        let output = run(&json!({"dog": {"apelido": "Thor"}}), &schema).unwrap();
        assert_eq!(output, json!({"dog": {"alias": "Thor"}}));
    }

    #[test]
    fn test_missing_branch() {
        let branch = Branch::new(Fields::new().field("alias", Leaf::new(ValueKind::String)))
            .from_path("cachorro");
        let schema = Schema::object(Fields::new().field("dog", Node::Object(branch.clone())));
        let err = run(&json!({"nome": "x"}), &schema).unwrap_err();
        assert!(matches!(err, Error::MissingValue { ref path } if path == "$.dog"));

        let schema = Schema::object(Fields::new().field(
            "dog",
            Node::Object(branch.modifiers([Modifier::DefaultNull])),
        ));
        assert_eq!(run(&json!({"nome": "x"}), &schema).unwrap(), json!({"dog": null}));
    }

    #[test]
    fn test_array_branch_wraps_single_object() {
        let schema = Schema::object(Fields::new().field(
            "jobs",
            Node::Array(
                Branch::new(Fields::new().field("business", Leaf::new(ValueKind::String).from_path("empresa")))
                    .from_path("profissao"),
            ),
        ));
        let output = run(&json!({"profissao": {"empresa": "capsul"}}), &schema).unwrap();
        assert_eq!(output, json!({"jobs": [{"business": "capsul"}]}));
    }

    #[test]
    fn test_sequence_under_object_node() {
        let schema = Schema::object(Fields::new().field(
            "dog",
            Node::Object(
                Branch::new(Fields::new().field("alias", Leaf::new(ValueKind::String)))
                    .from_path("cachorros"),
            ),
        ));
        let err = run(&json!({"cachorros": [{"alias": "Thor"}]}), &schema).unwrap_err();
        assert!(matches!(err, Error::SchemaShape { ref path, ref message }
            if path == "$.dog" && message == "unexpected sequence"));
    }

    #[test]
    fn test_root_shape_errors() {
        let fields = Fields::new().field("name", Leaf::new(ValueKind::String));

        let err = run(&json!([{"name": "a"}]), &Schema::object(fields.clone())).unwrap_err();
        assert!(matches!(err, Error::SchemaShape { ref message, .. } if message == "unexpected sequence"));

        let err = run(&json!({"name": "a"}), &Schema::array(fields)).unwrap_err();
        assert!(matches!(err, Error::SchemaShape { ref path, .. } if path == "$"));

        let err = run(&json!({"name": "a"}), &Schema::default()).unwrap_err();
        assert!(matches!(err, Error::SchemaShape { ref message, .. }
            if message == "schema has no children for an object value"));

        let err = run(&json!("a"), &Schema::default()).unwrap_err();
        assert!(matches!(err, Error::SchemaShape { .. }));
    }

    #[test]
    fn test_invalid_path_is_reported_at_the_field() {
        let schema = Schema::object(Fields::new().field(
            "name",
            Leaf::new(ValueKind::String).from_path(SourcePath::from(".a[x]")),
        ));
        let err = run(&json!({"a": ["b"]}), &schema).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { ref path, .. } if path == "$.name"));
    }

    #[test]
    fn test_leaf_sequence_null_is_not_wrapped() {
        let schema = Schema::object(Fields::new().field(
            "tags",
            Leaf::new(ValueKind::String)
                .array()
                .modifiers([Modifier::DefaultNull]),
        ));
        assert_eq!(run(&json!({}), &schema).unwrap(), json!({"tags": null}));
    }
}
