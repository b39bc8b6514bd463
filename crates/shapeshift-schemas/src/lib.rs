//! Shapeshift Schemas - file loading for translation documents
//!
//! Reads the documents that drive `shapeshift-core` from `.json`, `.yaml`
//! or `.yml` files:
//! - **Mapping schemas** describing the output tree of a translation
//! - **Token tables** mapping accepted spellings to canonical tokens
//! - **Translator configs** carrying the key separator
//!
//! ## Quick Start
//!
//! ```rust
//! use shapeshift_schemas::{Format, SchemaLoader};
//! use serde_json::json;
//!
//! let loader = SchemaLoader::new();
//! let schema = loader
//!     .mapping_from_str("__fields:\n  name:\n    map: nome\n    type: string\n", Format::Yaml)
//!     .unwrap();
//!
//! let output = shapeshift_core::translate(&json!({"nome": "Ada"}), &schema).unwrap();
//! assert_eq!(output, json!({"name": "Ada"}));
//! ```

pub mod loader;

pub use loader::{
    CacheConfig, DocumentCache, DocumentKind, DocumentParser, Format, LoaderConfig, LoaderError,
    LoaderResult, SchemaLoader,
};
