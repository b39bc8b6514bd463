//! Path expression parser
//!
//! Grammar, with `SEP` standing for the configured separator:
//!
//! ```text
//! expression := SEP? segment ( SEP key | bracket )*
//! segment    := key | bracket
//! bracket    := '[' digits? ']'
//! key        := ( '\' any | not(SEP | '[' | ']') )+
//! ```
//!
//! Alternatives (`a | b`) are split before parsing, see [`split_alternatives`].
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::ast::{PathExpression, Segment};
use super::error::PathError;

/// Path expression parser
pub struct Parser<'a> {
    /// Input string being parsed
    input: &'a str,
    /// Key separator, `.` by default
    separator: &'a str,
    /// Current byte offset in input
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input
    pub fn new(input: &'a str, separator: &'a str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Err(PathError::new("Empty path expression", 0, input));
        }
        if separator.is_empty() {
            return Err(PathError::new("Empty separator", 0, input));
        }

        Ok(Self {
            input,
            separator,
            position: 0,
        })
    }

    /// Parse the expression into its segments
    pub fn parse(mut self) -> Result<PathExpression, PathError> {
        let mut segments = Vec::new();

        let anchored = self.at_separator();
        if anchored {
            self.position += self.separator.len();
        }

        loop {
            let segment = match self.current_char() {
                Some('[') => self.parse_bracket()?,
                Some(_) => Segment::Key(self.parse_key()?),
                None => return Err(self.error("Expected a key or index")),
            };
            segments.push(segment);

            match self.current_char() {
                None => break,
                Some('[') => continue,
                Some(_) if self.at_separator() => {
                    self.position += self.separator.len();
                    if self.is_at_end() {
                        return Err(self.error("Trailing separator"));
                    }
                }
                Some(ch) => {
                    return Err(self.error(format!("Unexpected character '{}'", ch)));
                }
            }
        }

        Ok(PathExpression {
            segments,
            anchored,
        })
    }

    /// Parse an object key, resolving backslash escapes
    fn parse_key(&mut self) -> Result<String, PathError> {
        let start = self.position;
        let mut key = String::new();

        while let Some(ch) = self.current_char() {
            if ch == '[' || ch == ']' || self.at_separator() {
                break;
            }
            self.advance();

            if ch == '\\' {
                match self.current_char() {
                    Some(escaped) => {
                        key.push(escaped);
                        self.advance();
                    }
                    None => return Err(self.error("Dangling escape")),
                }
            } else {
                key.push(ch);
            }
        }

        if key.is_empty() && self.position == start {
            return Err(self.error("Empty key"));
        }
        Ok(key)
    }

    /// Parse `[n]` or the `[]` placeholder
    fn parse_bracket(&mut self) -> Result<Segment, PathError> {
        let start = self.position;
        self.advance(); // consume '['

        let digits_start = self.position;
        loop {
            match self.current_char() {
                Some(']') => break,
                Some(_) => self.advance(),
                None => {
                    return Err(PathError::new("Unterminated bracket", start, self.input));
                }
            }
        }
        let digits = &self.input[digits_start..self.position];
        self.advance(); // consume ']'

        if digits.is_empty() {
            return Ok(Segment::Placeholder);
        }

        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PathError::new(
                format!("Invalid array index '{}'", digits),
                digits_start,
                self.input,
            ));
        }
        digits
            .parse::<usize>()
            .map(Segment::Index)
            .map_err(|e| PathError::new(e.to_string(), digits_start, self.input))
    }

    fn at_separator(&self) -> bool {
        self.input[self.position..].starts_with(self.separator)
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn error(&self, message: impl Into<String>) -> PathError {
        PathError::new(message, self.position, self.input)
    }
}

/// Parse a single path expression
pub fn parse(input: &str, separator: &str) -> Result<PathExpression, PathError> {
    Parser::new(input.trim(), separator)?.parse()
}

/// Split a source path on unescaped `|`, trimming each alternative
///
/// Empty alternatives are dropped; escapes are left in place for the parser.
pub fn split_alternatives(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, ch) in input.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '|' => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
