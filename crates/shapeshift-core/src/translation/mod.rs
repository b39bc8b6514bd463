//! Translation engine for reshaping input trees under a mapping schema
//!
//! This module implements the core translation functionality: each output
//! field declared by a [`Schema`] is resolved from the input, run through the
//! value pipeline, type checked and assigned under its output name.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

mod context;
mod engine;
mod pipeline;
mod resolver;
mod validator;

pub use resolver::is_truthy;
pub use validator::{accepts, is_document_id};

use crate::config::TranslatorConfig;
use crate::decode::{decode, RawInput};
use crate::path::{flatten, FlatTable};
use crate::timestamp::{ChronoTimestampParser, TimestampParser};
use crate::{Result, Schema};
use context::TranslationContext;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Configured translation engine
///
/// A `Translator` holds no per-call state, so one instance can be shared
/// across threads and reused for any number of translations.
///
/// # Example
///
/// ```
/// use shapeshift_core::{Translator, Schema};
/// use serde_json::json;
///
/// # fn example() -> shapeshift_core::Result<()> {
/// let schema: Schema = serde_json::from_value(json!({
///     "__fields": {
///         "name": {"map": "nome", "type": "string"},
///         "age": {"map": "idade", "type": "string", "modifiers": ["enforce"]}
///     }
/// }))?;
///
/// let translator = Translator::new();
/// let output = translator.translate(&json!({"nome": "jurandir", "idade": 23}), &schema)?;
/// assert_eq!(output, json!({"name": "jurandir", "age": "23"}));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Clone)]
pub struct Translator {
    config: TranslatorConfig,
    timestamps: Arc<dyn TimestampParser>,
}

impl Translator {
    pub fn new() -> Self {
        Self::with_config(TranslatorConfig::default())
    }

    pub fn with_config(config: TranslatorConfig) -> Self {
        Self {
            config,
            timestamps: Arc::new(ChronoTimestampParser),
        }
    }

    /// Replace the parser used by `enforce` on `timestamp` fields
    pub fn with_timestamp_parser(mut self, parser: impl TimestampParser + 'static) -> Self {
        self.timestamps = Arc::new(parser);
        self
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate `input` under `schema`
    ///
    /// # Errors
    ///
    /// Fails on the first field that cannot be produced; there is no
    /// partial result. The error carries the output path of that field.
    pub fn translate(&self, input: &Value, schema: &Schema) -> Result<Value> {
        let start_time = Instant::now();
        let ctx = TranslationContext::new(input, &self.config.separator, self.timestamps.as_ref());

        let output = engine::translate_root(&ctx, input, schema)?;

        debug!(
            entries = ctx.expanded.len(),
            elapsed_us = start_time.elapsed().as_micros() as u64,
            "translated input"
        );
        Ok(output)
    }

    /// Decode a raw payload of the given content kind, then translate it
    pub fn translate_raw<'a>(
        &self,
        raw: impl Into<RawInput<'a>>,
        content_kind: &str,
        schema: &Schema,
    ) -> Result<Value> {
        let input = decode(raw, content_kind)?;
        self.translate(&input, schema)
    }

    /// Flatten `input` with this translator's separator
    pub fn flatten<'a>(&self, input: &'a Value, preserve_arrays: bool) -> FlatTable<'a> {
        flatten(input, &self.config.separator, preserve_arrays)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
