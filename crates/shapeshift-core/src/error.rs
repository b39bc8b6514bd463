//! Error types for the Shapeshift core library
//!
//! This module defines the error taxonomy for translations, using thiserror
//! for ergonomic error definitions and anyhow for coercion sources.

use crate::path::PathError;
use crate::types::ValueKind;
use std::fmt;
use thiserror::Error;

/// Main error type for Shapeshift operations
///
/// Every engine variant carries `path`, the output location of the offending
/// field (`$.jobs[1].wage`), so callers can localize the failure.
#[derive(Error, Debug)]
pub enum Error {
    /// Schema structure does not match the input structure
    #[error("Schema shape mismatch at {path}: {message}")]
    SchemaShape { path: String, message: String },

    /// A required field resolved to nothing
    #[error("Value for {path} wasn't provided")]
    MissingValue { path: String },

    /// Final value kind disagrees with the declared kind
    #[error("Type mismatch at {path}: got \"{actual}\", expected \"{expected}\"")]
    TypeMismatch {
        path: String,
        actual: ActualKind,
        expected: ValueKind,
    },

    /// An `enforce` coercion could not be performed
    #[error("Cannot coerce {value} to {target} at {path}")]
    Coercion {
        path: String,
        target: String,
        value: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Unrecognized declared content kind
    #[error("Unsupported content kind: {kind}")]
    UnsupportedContentKind { kind: String },

    /// A path expression in the schema could not be parsed
    #[error("Invalid path expression for {path}: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: PathError,
    },

    /// JSON decoding errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Output location of the offending field, when the error has one
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::SchemaShape { path, .. }
            | Error::MissingValue { path }
            | Error::TypeMismatch { path, .. }
            | Error::Coercion { path, .. }
            | Error::InvalidPath { path, .. } => Some(path),
            Error::UnsupportedContentKind { .. } | Error::Json { .. } => None,
        }
    }

    pub(crate) fn shape(path: &str, message: impl Into<String>) -> Self {
        Error::SchemaShape {
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn coercion(
        path: &str,
        target: impl fmt::Display,
        value: &serde_json::Value,
        source: Option<anyhow::Error>,
    ) -> Self {
        Error::Coercion {
            path: path.to_string(),
            target: target.to_string(),
            value: value.to_string(),
            source,
        }
    }
}

/// Runtime kind of a JSON value, as reported by type mismatches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActualKind {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl ActualKind {
    /// Classify a JSON value
    pub fn of(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ActualKind::Null,
            Value::Bool(_) => ActualKind::Boolean,
            Value::Number(n) if n.is_f64() => ActualKind::Number,
            Value::Number(_) => ActualKind::Integer,
            Value::String(_) => ActualKind::String,
            Value::Array(_) => ActualKind::Array,
            Value::Object(_) => ActualKind::Object,
        }
    }
}

impl fmt::Display for ActualKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActualKind::Null => write!(f, "null"),
            ActualKind::Boolean => write!(f, "boolean"),
            ActualKind::Integer => write!(f, "integer"),
            ActualKind::Number => write!(f, "number"),
            ActualKind::String => write!(f, "string"),
            ActualKind::Array => write!(f, "array"),
            ActualKind::Object => write!(f, "object"),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
