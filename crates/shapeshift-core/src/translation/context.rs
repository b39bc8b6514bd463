//! Translation context and recursion frames
//!
//! A [`TranslationContext`] is built once per top-level translation and owns
//! the two flattened views of the input. Each level of the recursive walk gets
//! a [`Frame`] describing where it stands, both in the input and in the output.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use crate::path::{flatten, FlatTable, Step};
use crate::timestamp::TimestampParser;
use crate::types::Modifiers;
use serde_json::Value;

/// Per-call state shared by every frame of one translation
pub(crate) struct TranslationContext<'a> {
    /// Every array expanded into `[idx]` steps
    pub expanded: FlatTable<'a>,
    /// Arrays also stored whole at their own path
    pub preserved: FlatTable<'a>,
    pub separator: &'a str,
    pub timestamps: &'a dyn TimestampParser,
}

impl<'a> TranslationContext<'a> {
    pub fn new(input: &'a Value, separator: &'a str, timestamps: &'a dyn TimestampParser) -> Self {
        Self {
            expanded: flatten(input, separator, false),
            preserved: flatten(input, separator, true),
            separator,
            timestamps,
        }
    }
}

/// Position of one recursion level
#[derive(Debug, Clone)]
pub(crate) struct Frame<'a> {
    /// Input value being translated at this level
    pub value: &'a Value,
    /// Where `value` sits in the top-level input
    pub location: Vec<Step>,
    /// Prefix prepended to paths for flattened lookups
    pub scope: Vec<Step>,
    /// Index of the nearest enclosing array element, bound to `[]`
    pub index: usize,
    /// Modifiers inherited by fields that declare none
    pub modifiers: Modifiers,
    /// Output location, for error reporting
    pub path: String,
}

impl<'a> Frame<'a> {
    pub fn root(value: &'a Value, modifiers: Modifiers) -> Self {
        Self {
            value,
            location: Vec::new(),
            scope: Vec::new(),
            index: 0,
            modifiers,
            path: "$".to_string(),
        }
    }

    /// Frame for the `index`-th element of this frame's sequence
    pub fn element(&self, index: usize, value: &'a Value) -> Self {
        let mut location = self.location.clone();
        location.push(Step::Index(index));
        Self {
            value,
            location,
            scope: self.scope.clone(),
            index,
            modifiers: self.modifiers,
            path: format!("{}[{}]", self.path, index),
        }
    }

    /// Frame destructuring this frame's own value, with lookups relative to it
    pub fn rescoped(&self, modifiers: Modifiers, path: String) -> Self {
        Self {
            value: self.value,
            location: self.location.clone(),
            scope: self.location.clone(),
            index: self.index,
            modifiers,
            path,
        }
    }

    /// Frame for a value resolved from this one
    pub fn descend(&self, value: &'a Value, location: Vec<Step>, modifiers: Modifiers, path: String) -> Self {
        Self {
            value,
            location,
            scope: self.scope.clone(),
            index: self.index,
            modifiers,
            path,
        }
    }

    /// Output location of a field of this frame
    pub fn field_path(&self, name: &str) -> String {
        format!("{}.{}", self.path, name)
    }

    /// Location of a direct member of this frame's value
    pub fn member(&self, key: &str) -> Vec<Step> {
        let mut location = self.location.clone();
        location.push(Step::Key(key.to_string()));
        location
    }

    /// Location of `steps` relative to this frame's scope
    pub fn scoped(&self, steps: Vec<Step>) -> Vec<Step> {
        let mut location = self.scope.clone();
        location.extend(steps);
        location
    }
}
