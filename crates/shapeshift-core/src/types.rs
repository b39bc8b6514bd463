//! Core types for mapping schemas
//!
//! A [`Schema`] describes how to build an output tree from an input tree. Each
//! output field is a [`Node`]: a [`Leaf`] producing one value through the value
//! pipeline, or a [`Branch`] whose value is produced by recursing into its own
//! fields (an object, or an array of objects).
//!
//! Schemas deserialize from the document format used by mapping files:
//!
//! ```
//! use shapeshift_core::{Node, Schema};
//! use serde_json::json;
//!
//! let schema: Schema = serde_json::from_value(json!({
//!     "__fields": {
//!         "name": {"map": "nome", "type": "string"},
//!         "age": {"map": "idade | anos", "type": "integer", "modifiers": ["enforce"]},
//!         "dog": {"map": "cachorro", "type": "object", "__fields": {
//!             "alias": {"map": "apelido", "type": "string"}
//!         }}
//!     }
//! })).unwrap();
//!
//! let fields = schema.fields.unwrap();
//! assert!(matches!(fields.get("dog"), Some(Node::Object(_))));
//! ```

use crate::path::split_alternatives;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Expected runtime kind of a leaf value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    Object,
    String,
    #[serde(alias = "datetime")]
    Timestamp,
    Number,
    Integer,
    #[serde(alias = "objectid", alias = "document_id")]
    DocumentId,
    Boolean,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Object => write!(f, "object"),
            ValueKind::String => write!(f, "string"),
            ValueKind::Timestamp => write!(f, "timestamp"),
            ValueKind::Number => write!(f, "number"),
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::DocumentId => write!(f, "documentId"),
            ValueKind::Boolean => write!(f, "boolean"),
        }
    }
}

/// Behavior flag altering how a node is resolved or validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Integers are no longer accepted where `number` is declared
    Strict,
    /// Swap the output key and the lookup path
    Reverse,
    /// Absent values become null instead of failing
    DefaultNull,
    /// Coerce the value to the declared kind
    Enforce,
}

impl Modifier {
    pub const ALL: [Modifier; 4] = [
        Modifier::Strict,
        Modifier::Reverse,
        Modifier::DefaultNull,
        Modifier::Enforce,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of modifiers active on a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Modifier>", into = "Vec<Modifier>")]
pub struct Modifiers(u8);

impl Modifiers {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn insert(&mut self, modifier: Modifier) {
        self.0 |= modifier.bit();
    }

    pub fn with(mut self, modifier: Modifier) -> Self {
        self.insert(modifier);
        self
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = Modifiers::empty();
        for modifier in iter {
            set.insert(modifier);
        }
        set
    }
}

impl From<Vec<Modifier>> for Modifiers {
    fn from(modifiers: Vec<Modifier>) -> Self {
        modifiers.into_iter().collect()
    }
}

impl From<Modifiers> for Vec<Modifier> {
    fn from(modifiers: Modifiers) -> Self {
        modifiers.iter().collect()
    }
}

/// Where a node's value lives in the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourcePath {
    /// One expression, or several separated by `|`
    Single(String),
    /// Ordered alternatives, first one found wins
    Alternatives(Vec<String>),
}

impl SourcePath {
    /// Alternative expressions in priority order, trimmed, empties dropped
    pub fn alternatives(&self) -> Vec<&str> {
        match self {
            SourcePath::Single(path) => split_alternatives(path),
            SourcePath::Alternatives(paths) => paths
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// The first alternative
    pub fn primary(&self) -> Option<&str> {
        self.alternatives().into_iter().next()
    }

    /// An empty source path means the field is skipped
    pub fn is_empty(&self) -> bool {
        self.alternatives().is_empty()
    }
}

impl From<&str> for SourcePath {
    fn from(path: &str) -> Self {
        SourcePath::Single(path.to_string())
    }
}

impl From<Vec<&str>> for SourcePath {
    fn from(paths: Vec<&str>) -> Self {
        SourcePath::Alternatives(paths.into_iter().map(str::to_string).collect())
    }
}

/// Field producing one value through the value pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub source: Option<SourcePath>,
    pub kind: ValueKind,
    /// The value is a sequence; scalars get wrapped
    pub array: bool,
    /// Fallback for absent values. `Some(Value::Null)` is a real default.
    pub default: Option<Value>,
    pub modifiers: Option<Modifiers>,
    pub trim_start: Option<usize>,
    pub trim_end: Option<usize>,
    pub stop_at: Option<String>,
}

impl Leaf {
    pub fn new(kind: ValueKind) -> Self {
        Self {
            source: None,
            kind,
            array: false,
            default: None,
            modifiers: None,
            trim_start: None,
            trim_end: None,
            stop_at: None,
        }
    }

    pub fn from_path(mut self, source: impl Into<SourcePath>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn array(mut self) -> Self {
        self.array = true;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = Some(modifiers.into_iter().collect());
        self
    }

    pub fn trim_start(mut self, count: usize) -> Self {
        self.trim_start = Some(count);
        self
    }

    pub fn trim_end(mut self, count: usize) -> Self {
        self.trim_end = Some(count);
        self
    }

    pub fn stop_at(mut self, delimiter: impl Into<String>) -> Self {
        self.stop_at = Some(delimiter.into());
        self
    }
}

/// Field whose value is produced by recursing into nested fields
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Without a source, the branch destructures the current object
    pub source: Option<SourcePath>,
    pub modifiers: Option<Modifiers>,
    pub fields: Fields,
}

impl Branch {
    pub fn new(fields: Fields) -> Self {
        Self {
            source: None,
            modifiers: None,
            fields,
        }
    }

    pub fn from_path(mut self, source: impl Into<SourcePath>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = Some(modifiers.into_iter().collect());
        self
    }
}

/// One output field of a mapping schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub enum Node {
    Leaf(Leaf),
    /// Nested object
    Object(Branch),
    /// Sequence of nested objects
    Array(Branch),
}

impl Node {
    pub fn source(&self) -> Option<&SourcePath> {
        match self {
            Node::Leaf(leaf) => leaf.source.as_ref(),
            Node::Object(branch) | Node::Array(branch) => branch.source.as_ref(),
        }
    }

    pub fn modifiers(&self) -> Option<Modifiers> {
        match self {
            Node::Leaf(leaf) => leaf.modifiers,
            Node::Object(branch) | Node::Array(branch) => branch.modifiers,
        }
    }

    pub fn is_array(&self) -> bool {
        match self {
            Node::Leaf(leaf) => leaf.array,
            Node::Object(_) => false,
            Node::Array(_) => true,
        }
    }
}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        Node::Leaf(leaf)
    }
}

/// Root of a mapping schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The whole input is a sequence of records
    #[serde(default, alias = "isArray", skip_serializing_if = "is_false")]
    pub array: bool,
    /// Modifiers inherited by fields that declare none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Modifiers>,
    #[serde(
        default,
        rename = "__fields",
        alias = "fields",
        skip_serializing_if = "Option::is_none"
    )]
    pub fields: Option<Fields>,
}

impl Schema {
    /// Schema for a single record
    pub fn object(fields: Fields) -> Self {
        Self {
            array: false,
            modifiers: None,
            fields: Some(fields),
        }
    }

    /// Schema for a sequence of records
    pub fn array(fields: Fields) -> Self {
        Self {
            array: true,
            modifiers: None,
            fields: Some(fields),
        }
    }

    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = Some(modifiers.into_iter().collect());
        self
    }
}

/// Declared output fields, in schema order
pub type Fields = IndexMap<String, Node>;

/// Chained construction of declaration-ordered maps
pub trait FieldsExt<T> {
    /// Append an entry; an existing name keeps its position and takes the new value
    fn field(self, name: impl Into<String>, value: impl Into<T>) -> Self;
}

impl<T> FieldsExt<T> for IndexMap<String, T> {
    fn field(mut self, name: impl Into<String>, value: impl Into<T>) -> Self {
        self.insert(name.into(), value.into());
        self
    }
}

/// Document form of a node, before the leaf/branch split
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawNode {
    #[serde(
        default,
        alias = "source_path",
        alias = "sourcePath",
        skip_serializing_if = "Option::is_none"
    )]
    map: Option<SourcePath>,
    #[serde(
        rename = "type",
        default,
        alias = "valueKind",
        skip_serializing_if = "Option::is_none"
    )]
    kind: Option<ValueKind>,
    #[serde(default, alias = "isArray", skip_serializing_if = "is_false")]
    array: bool,
    #[serde(
        default,
        alias = "defaultValue",
        deserialize_with = "explicit_value",
        skip_serializing_if = "Option::is_none"
    )]
    default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    modifiers: Option<Modifiers>,
    #[serde(default, alias = "trimStart", skip_serializing_if = "Option::is_none")]
    trim_start: Option<usize>,
    #[serde(default, alias = "trimEnd", skip_serializing_if = "Option::is_none")]
    trim_end: Option<usize>,
    #[serde(
        default,
        alias = "stop_at",
        alias = "stopAt",
        skip_serializing_if = "Option::is_none"
    )]
    pick_until: Option<String>,
    #[serde(
        default,
        rename = "__fields",
        alias = "fields",
        alias = "children",
        skip_serializing_if = "Option::is_none"
    )]
    fields: Option<Fields>,
}

impl TryFrom<RawNode> for Node {
    type Error = String;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        match raw.fields {
            Some(fields) => {
                if let Some(kind) = raw.kind.filter(|k| *k != ValueKind::Object) {
                    return Err(format!(
                        "node with nested fields must have type \"object\", found \"{}\"",
                        kind
                    ));
                }
                let branch = Branch {
                    source: raw.map,
                    modifiers: raw.modifiers,
                    fields,
                };
                Ok(if raw.array {
                    Node::Array(branch)
                } else {
                    Node::Object(branch)
                })
            }
            None => {
                let kind = raw
                    .kind
                    .ok_or_else(|| "node without nested fields must declare a type".to_string())?;
                Ok(Node::Leaf(Leaf {
                    source: raw.map,
                    kind,
                    array: raw.array,
                    default: raw.default,
                    modifiers: raw.modifiers,
                    trim_start: raw.trim_start,
                    trim_end: raw.trim_end,
                    stop_at: raw.pick_until,
                }))
            }
        }
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        match node {
            Node::Leaf(leaf) => RawNode {
                map: leaf.source,
                kind: Some(leaf.kind),
                array: leaf.array,
                default: leaf.default,
                modifiers: leaf.modifiers,
                trim_start: leaf.trim_start,
                trim_end: leaf.trim_end,
                pick_until: leaf.stop_at,
                fields: None,
            },
            Node::Object(branch) => RawNode::branch(branch, false),
            Node::Array(branch) => RawNode::branch(branch, true),
        }
    }
}

impl RawNode {
    fn branch(branch: Branch, array: bool) -> Self {
        RawNode {
            map: branch.source,
            kind: Some(ValueKind::Object),
            array,
            default: None,
            modifiers: branch.modifiers,
            trim_start: None,
            trim_end: None,
            pick_until: None,
            fields: Some(branch.fields),
        }
    }
}

/// Keep an explicit `null` as `Some(Value::Null)`
fn explicit_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

fn is_false(value: &bool) -> bool {
    !*value
}
