//! Document loading and parsing
//!
//! This module reads mapping schemas, token tables and translator configs
//! from YAML or JSON files and keeps the typed result in memory until the
//! file changes on disk.
//!
//! # Example Usage
//!
//! ```no_run
//! use shapeshift_schemas::loader::SchemaLoader;
//! use std::path::Path;
//!
//! let mut loader = SchemaLoader::new();
//! let schema = loader.load_mapping(Path::new("people.yaml"))?;
//! let output = shapeshift_core::translate(&serde_json::json!({"nome": "Ada"}), &schema)?;
//! println!("{output}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

pub mod cache;
pub mod error;
pub mod parser;
pub mod schema_loader;

pub use cache::{CacheConfig, DocumentCache};
pub use error::{LoaderError, LoaderResult};
pub use parser::{DocumentKind, DocumentParser, Format};
pub use schema_loader::{LoaderConfig, SchemaLoader};
