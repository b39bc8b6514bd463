//! Document parsing for YAML and JSON formats
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoaderError::unsupported_format(path)),
        }
    }
}

/// What a document file is expected to contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Mapping,
    TokenTable,
    Config,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Mapping => write!(f, "mapping schema"),
            DocumentKind::TokenTable => write!(f, "token table"),
            DocumentKind::Config => write!(f, "translator config"),
        }
    }
}

/// Parses document files into JSON trees and typed documents
#[derive(Debug, Default)]
pub struct DocumentParser;

impl DocumentParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a file, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| LoaderError::io_error(path, e))?;

        self.parse_content(&content, format, path)
    }

    /// Parse content with an explicit format; `path` is only used for errors
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => {
                // YAML is converted to a JSON tree so both formats deserialize alike
                let yaml_value: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| LoaderError::yaml_parse_error(path, e))?;
                serde_json::to_value(yaml_value).map_err(|e| LoaderError::json_parse_error(path, e))
            }
            Format::Json => serde_json::from_str(content).map_err(|e| LoaderError::json_parse_error(path, e)),
        }
    }

    /// Check the top-level shape a document of `kind` must have
    pub fn validate_basic_structure(&self, value: &Value, kind: DocumentKind, path: &Path) -> LoaderResult<()> {
        let Some(root) = value.as_object() else {
            return Err(LoaderError::invalid_document(
                path,
                kind,
                "document must be an object at the root level",
            ));
        };

        if kind == DocumentKind::Config {
            return Ok(());
        }

        match root.get("__fields").or_else(|| root.get("fields")) {
            Some(Value::Object(_)) => Ok(()),
            Some(_) => Err(LoaderError::invalid_document(path, kind, "'__fields' must be an object")),
            None => Err(LoaderError::invalid_document(path, kind, "missing '__fields'")),
        }
    }

    /// Convert a parsed tree into its typed form
    pub fn interpret<T: DeserializeOwned>(&self, value: Value, kind: DocumentKind, path: &Path) -> LoaderResult<T> {
        serde_json::from_value(value).map_err(|e| LoaderError::document_error(path, kind, e))
    }
}
