//! Structured representation of path expressions and flattened locations
//!
//! A path expression such as `.profissoes[1].cargo` or `[].jobs.name` parses
//! into a sequence of [`Segment`]s. Binding the array placeholder to a concrete
//! index turns it into a location: a sequence of [`Step`]s, which is also the
//! key type of flattened tables.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use std::fmt;

/// One segment of a parsed path expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object key
    Key(String),
    /// Array index (`[n]`)
    Index(usize),
    /// Array placeholder (`[]`), bound to the enclosing iteration index
    Placeholder,
}

/// A parsed path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    pub segments: Vec<Segment>,
    /// Written with a leading separator; only flattened lookups apply
    pub anchored: bool,
}

/// One step of a concrete location inside a tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    Key(String),
    Index(usize),
}

impl PathExpression {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            anchored: false,
        }
    }

    pub fn anchored(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            anchored: true,
        }
    }

    /// Expression addressing one literal key, with no parsing involved
    pub fn literal(key: impl Into<String>) -> Self {
        Self::new(vec![Segment::Key(key.into())])
    }

    /// The key, if this expression is a single unanchored key
    pub fn as_plain_key(&self) -> Option<&str> {
        if self.anchored {
            return None;
        }
        match self.segments.as_slice() {
            [Segment::Key(key)] => Some(key),
            _ => None,
        }
    }

    pub fn has_placeholder(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Placeholder))
    }

    /// Substitute every placeholder with `index`, producing a concrete location
    pub fn bind(&self, index: usize) -> Vec<Step> {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Key(key) => Step::Key(key.clone()),
                Segment::Index(i) => Step::Index(*i),
                Segment::Placeholder => Step::Index(index),
            })
            .collect()
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 && !self.anchored => write!(f, "{}", escape_key(key, "."))?,
                Segment::Key(key) => write!(f, ".{}", escape_key(key, "."))?,
                Segment::Index(i) => write!(f, "[{}]", i)?,
                Segment::Placeholder => write!(f, "[]")?,
            }
        }
        Ok(())
    }
}

/// Render a location the way flattened tables name their entries
///
/// Every key is preceded by the separator and every index is bracketed, so a
/// top-level object key renders as `.name` and a top-level array element as
/// `[0]`. The empty location renders as the empty string.
pub fn render(steps: &[Step], separator: &str) -> String {
    let mut out = String::new();
    for step in steps {
        match step {
            Step::Key(key) => {
                out.push_str(separator);
                out.push_str(&escape_key(key, separator));
            }
            Step::Index(i) => {
                out.push('[');
                out.push_str(&i.to_string());
                out.push(']');
            }
        }
    }
    out
}

/// Backslash-escape the characters a key cannot contain literally
pub fn escape_key(key: &str, separator: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut rest = key;
    while let Some(ch) = rest.chars().next() {
        if (!separator.is_empty() && rest.starts_with(separator))
            || matches!(ch, '[' | ']' | '|' | '\\')
        {
            out.push('\\');
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}
