//! Error types for document loading operations
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::parser::DocumentKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors raised while reading, parsing or interpreting a document file
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// The document parsed but does not have the expected shape
    #[error("Invalid {kind} in '{path}': {reason}")]
    InvalidDocument {
        path: PathBuf,
        kind: DocumentKind,
        reason: String,
    },

    /// The document could not be converted into its typed form
    #[error("Invalid {kind} in '{path}': {source}")]
    DocumentError {
        path: PathBuf,
        kind: DocumentKind,
        source: serde_json::Error,
    },
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: &Path, error: std::io::Error) -> Self {
        Self::IoError {
            path: path.to_path_buf(),
            source: error,
        }
    }

    pub fn yaml_parse_error(path: &Path, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path: path.to_path_buf(),
            source: error,
        }
    }

    pub fn json_parse_error(path: &Path, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path: path.to_path_buf(),
            source: error,
        }
    }

    pub fn unsupported_format(path: &Path) -> Self {
        Self::UnsupportedFormat {
            path: path.to_path_buf(),
        }
    }

    pub fn invalid_document(path: &Path, kind: DocumentKind, reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            path: path.to_path_buf(),
            kind,
            reason: reason.into(),
        }
    }

    pub fn document_error(path: &Path, kind: DocumentKind, error: serde_json::Error) -> Self {
        Self::DocumentError {
            path: path.to_path_buf(),
            kind,
            source: error,
        }
    }

    /// Get the path associated with this error
    pub fn path(&self) -> &Path {
        match self {
            Self::IoError { path, .. }
            | Self::YamlParseError { path, .. }
            | Self::JsonParseError { path, .. }
            | Self::UnsupportedFormat { path }
            | Self::InvalidDocument { path, .. }
            | Self::DocumentError { path, .. } => path,
        }
    }
}
