//! Path flattener
//!
//! Converts a tree into a table from synthetic paths to values. The table
//! borrows from the tree it was built from and keeps the tree's own key order.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::ast::{render, Step};
use super::parser;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Flattened view of a tree, keyed by structured locations
#[derive(Debug, Clone)]
pub struct FlatTable<'a> {
    separator: String,
    entries: Vec<(Vec<Step>, &'a Value)>,
    index: HashMap<Vec<Step>, usize>,
}

impl<'a> FlatTable<'a> {
    fn new(separator: &str) -> Self {
        Self {
            separator: separator.to_string(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn insert(&mut self, location: &[Step], value: &'a Value) {
        match self.index.get(location) {
            Some(&slot) => self.entries[slot].1 = value,
            None => {
                self.index.insert(location.to_vec(), self.entries.len());
                self.entries.push((location.to_vec(), value));
            }
        }
    }

    /// Value stored at a concrete location
    pub fn lookup(&self, location: &[Step]) -> Option<&'a Value> {
        self.index.get(location).map(|&slot| self.entries[slot].1)
    }

    /// Value stored under a rendered path such as `.a.b[0]`
    ///
    /// Placeholders bind to index 0. Malformed paths never match.
    pub fn get(&self, path: &str) -> Option<&'a Value> {
        if path.is_empty() {
            return self.lookup(&[]);
        }
        let expression = parser::parse(path, &self.separator).ok()?;
        self.lookup(&expression.bind(0))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in traversal order, with rendered paths
    pub fn iter(&self) -> impl Iterator<Item = (String, &'a Value)> + '_ {
        self.entries
            .iter()
            .map(|(location, value)| (render(location, &self.separator), *value))
    }

    /// Structured locations in traversal order
    pub fn locations(&self) -> impl Iterator<Item = &[Step]> + '_ {
        self.entries.iter().map(|(location, _)| location.as_slice())
    }

    /// Values in traversal order
    pub fn values(&self) -> impl Iterator<Item = &'a Value> + '_ {
        self.entries.iter().map(|(_, value)| *value)
    }

    /// Owned copy as a JSON object keyed by rendered path
    pub fn to_map(&self) -> Map<String, Value> {
        self.iter()
            .map(|(path, value)| (path, value.clone()))
            .collect()
    }
}

/// Flatten a tree into a path table
///
/// Object members extend the path with `<separator><key>`, array elements
/// with `[<index>]`. With `preserve_arrays`, every array is also stored whole
/// at its own path; arrays of scalars are not expanded further, arrays holding
/// objects or arrays still are, so their members remain addressable.
pub fn flatten<'a>(target: &'a Value, separator: &str, preserve_arrays: bool) -> FlatTable<'a> {
    let mut table = FlatTable::new(separator);
    let mut location = Vec::new();
    flatten_into(target, &mut location, preserve_arrays, &mut table);
    table
}

fn flatten_into<'a>(
    value: &'a Value,
    location: &mut Vec<Step>,
    preserve_arrays: bool,
    table: &mut FlatTable<'a>,
) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                location.push(Step::Key(key.clone()));
                flatten_into(child, location, preserve_arrays, table);
                location.pop();
            }
        }
        Value::Array(items) => {
            if preserve_arrays {
                table.insert(location, value);
                if !items.iter().any(is_container) {
                    return;
                }
            }
            for (i, child) in items.iter().enumerate() {
                location.push(Step::Index(i));
                flatten_into(child, location, preserve_arrays, table);
                location.pop();
            }
        }
        _ => table.insert(location, value),
    }
}

fn is_container(value: &Value) -> bool {
    value.is_object() || value.is_array()
}
