//! Shapeshift Core - Schema-driven translation of JSON-like trees
//!
//! This crate reshapes input trees (decoded JSON documents) into output trees
//! described by a declarative mapping schema: renaming and relocating fields,
//! pulling values out of nested paths and arrays, substituting defaults,
//! coercing and validating value kinds.
//!
//! # Main Components
//!
//! - **Mapping Schema**: [`Schema`] and its [`Node`]s, deserializable from JSON or YAML
//! - **Path Language**: dotted/bracketed path expressions and the [`flatten`] utility
//! - **Translation Engine**: [`Translator`] and the [`translate`] shorthand
//! - **Token Translator**: [`translate_token`] for canonicalizing enum-like strings
//! - **Collaborators**: input [`decode`]-ing and pluggable [`TimestampParser`]s
//!
//! # Example
//!
//! ```
//! use shapeshift_core::{translate, Schema};
//! use serde_json::json;
//!
//! # fn example() -> shapeshift_core::Result<()> {
//! let schema: Schema = serde_json::from_value(json!({
//!     "__fields": {
//!         "name": {"map": "nome", "type": "string"},
//!         "skills": {"map": ".detalhes.habilidades", "type": "string", "array": true}
//!     }
//! }))?;
//!
//! let input = json!({
//!     "nome": "jurandir",
//!     "detalhes": {"habilidades": ["programacao", "escrita"]}
//! });
//!
//! let output = translate(&input, &schema)?;
//! assert_eq!(output, json!({"name": "jurandir", "skills": ["programacao", "escrita"]}));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod decode;
pub mod error;
pub mod path;
pub mod timestamp;
pub mod token;
pub mod translation;
pub mod types;

// Re-export main types for convenience
pub use config::TranslatorConfig;
pub use decode::{decode, ContentKind, RawInput};
pub use error::{ActualKind, Error, Result};
pub use path::{FlatTable, PathError, PathExpression, Segment, Step, DEFAULT_SEPARATOR};
pub use timestamp::{ChronoTimestampParser, TimestampError, TimestampParser};
pub use token::{translate_token, TokenMatch, TokenTable};
pub use translation::Translator;
pub use types::{
    Branch, Fields, FieldsExt, Leaf, Modifier, Modifiers, Node, Schema, SourcePath, ValueKind,
};

use serde_json::Value;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Translate `input` under `schema` with the default configuration
pub fn translate(input: &Value, schema: &Schema) -> Result<Value> {
    Translator::new().translate(input, schema)
}

/// Flatten `input` into a path table
///
/// With `preserve_arrays`, every array is also stored whole at its own path.
pub fn flatten<'a>(input: &'a Value, separator: &str, preserve_arrays: bool) -> FlatTable<'a> {
    path::flatten(input, separator, preserve_arrays)
}
