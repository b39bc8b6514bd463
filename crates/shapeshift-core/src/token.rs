//! Token translator
//!
//! Maps a single string to a canonical token through an enumerated table of
//! accepted spellings, e.g. provider-specific order statuses to internal ones.
//! Independent of the tree engine.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Strings accepted for one canonical token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenMatch {
    Exact(String),
    AnyOf(Vec<String>),
}

impl TokenMatch {
    pub fn matches(&self, input: &str) -> bool {
        match self {
            TokenMatch::Exact(expected) => expected == input,
            TokenMatch::AnyOf(accepted) => accepted.iter().any(|a| a == input),
        }
    }
}

/// Canonical tokens with their accepted spellings, checked in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenTable {
    #[serde(rename = "__fields", alias = "fields")]
    pub entries: IndexMap<String, TokenMatch>,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(mut self, canonical: impl Into<String>, accepted: TokenMatch) -> Self {
        self.entries.insert(canonical.into(), accepted);
        self
    }
}

/// Canonical token for `input`, or `None` when no entry accepts it
pub fn translate_token<'t>(input: &str, table: &'t TokenTable) -> Option<&'t str> {
    table
        .entries
        .iter()
        .find(|(_, accepted)| accepted.matches(input))
        .map(|(canonical, _)| canonical.as_str())
}
