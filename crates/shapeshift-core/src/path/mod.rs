//! Path expressions and the path flattener
//!
//! Source paths in a mapping schema form a small language: separator-delimited
//! keys, bracketed indices, the `[]` placeholder bound to the enclosing array
//! index, and `|`-delimited alternatives. This module parses that language into
//! structured segments and flattens input trees into tables addressed by the
//! same structure, so keys containing separators never collide.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

pub mod ast;
pub mod error;
pub mod flatten;
pub mod parser;

pub use ast::{render, PathExpression, Segment, Step};
pub use error::PathError;
pub use flatten::{flatten, FlatTable};
pub use parser::{parse, split_alternatives, Parser};

/// Default key separator
pub const DEFAULT_SEPARATOR: &str = ".";
