//! Translator configuration

use crate::path::DEFAULT_SEPARATOR;
use serde::{Deserialize, Serialize};

/// Settings shared by every translation a [`crate::Translator`] performs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Key separator used by path expressions and flattened tables
    pub separator: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}
