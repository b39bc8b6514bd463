//! Error types for path expression parsing
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// A path expression could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Parse error at position {position}: {message} (in '{input}')")]
pub struct PathError {
    pub message: String,
    /// Byte offset into `input`
    pub position: usize,
    pub input: String,
}

impl PathError {
    pub fn new(message: impl Into<String>, position: usize, input: &str) -> Self {
        Self {
            message: message.into(),
            position,
            input: input.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_error_display() {
        let err = PathError::new("Unterminated bracket", 4, ".a[1");
        assert_eq!(
            err.to_string(),
            "Parse error at position 4: Unterminated bracket (in '.a[1')"
        );
    }
}
