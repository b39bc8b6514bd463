//! Input decoding
//!
//! Turns raw payloads into the tree the engine walks. Only JSON is
//! recognized; pre-decoded trees pass through untouched.

use crate::{Error, Result};
use serde_json::Value;
use std::str::FromStr;

/// Declared content kind of a raw payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
}

impl FromStr for ContentKind {
    type Err = Error;

    /// Accepts `json` and `application/json`, case-insensitively, ignoring
    /// media type parameters such as `; charset=utf-8`
    fn from_str(kind: &str) -> Result<Self> {
        let essence = kind.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case("json") || essence.eq_ignore_ascii_case("application/json") {
            Ok(ContentKind::Json)
        } else {
            Err(Error::UnsupportedContentKind {
                kind: kind.to_string(),
            })
        }
    }
}

/// A payload in one of the forms the decoder accepts
#[derive(Debug, Clone)]
pub enum RawInput<'a> {
    Bytes(&'a [u8]),
    Text(&'a str),
    Tree(Value),
}

impl<'a> From<&'a [u8]> for RawInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        RawInput::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for RawInput<'a> {
    fn from(text: &'a str) -> Self {
        RawInput::Text(text)
    }
}

impl From<Value> for RawInput<'_> {
    fn from(tree: Value) -> Self {
        RawInput::Tree(tree)
    }
}

/// Decode a payload into a tree according to its declared content kind
pub fn decode<'a>(raw: impl Into<RawInput<'a>>, content_kind: &str) -> Result<Value> {
    match content_kind.parse::<ContentKind>()? {
        ContentKind::Json => match raw.into() {
            RawInput::Bytes(bytes) => Ok(serde_json::from_slice(bytes)?),
            RawInput::Text(text) => Ok(serde_json::from_str(text)?),
            RawInput::Tree(tree) => Ok(tree),
        },
    }
}
