//! Loader for mapping schemas, token tables and translator configs
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use crate::loader::{
    cache::{CacheConfig, DocumentCache},
    error::LoaderResult,
    parser::{DocumentKind, DocumentParser, Format},
};
use log::debug;
use serde::de::DeserializeOwned;
use shapeshift_core::{Schema, TokenTable, TranslatorConfig};
use std::path::Path;
use std::sync::Arc;

/// Configuration for loader behavior
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub cache: CacheConfig,
    /// Check the top-level document shape before interpreting it
    pub validate_basic_structure: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            validate_basic_structure: true,
        }
    }
}

/// Loads documents from `.json`, `.yaml` and `.yml` files, caching the
/// typed result per file until it changes on disk
#[derive(Debug)]
pub struct SchemaLoader {
    config: LoaderConfig,
    parser: DocumentParser,
    mappings: DocumentCache<Schema>,
    token_tables: DocumentCache<TokenTable>,
    configs: DocumentCache<TranslatorConfig>,
}

impl SchemaLoader {
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            parser: DocumentParser::new(),
            mappings: DocumentCache::with_config(config.cache.clone()),
            token_tables: DocumentCache::with_config(config.cache.clone()),
            configs: DocumentCache::with_config(config.cache.clone()),
            config,
        }
    }

    /// Load a mapping schema from file
    pub fn load_mapping(&mut self, path: &Path) -> LoaderResult<Arc<Schema>> {
        load_cached(
            &mut self.mappings,
            &self.parser,
            &self.config,
            path,
            DocumentKind::Mapping,
        )
    }

    /// Load a token table from file
    pub fn load_token_table(&mut self, path: &Path) -> LoaderResult<Arc<TokenTable>> {
        load_cached(
            &mut self.token_tables,
            &self.parser,
            &self.config,
            path,
            DocumentKind::TokenTable,
        )
    }

    /// Load a translator config from file
    pub fn load_config(&mut self, path: &Path) -> LoaderResult<TranslatorConfig> {
        let config = load_cached(
            &mut self.configs,
            &self.parser,
            &self.config,
            path,
            DocumentKind::Config,
        )?;
        Ok(config.as_ref().clone())
    }

    /// Parse a mapping schema from in-memory content
    pub fn mapping_from_str(&self, content: &str, format: Format) -> LoaderResult<Schema> {
        self.interpret_str(content, format, DocumentKind::Mapping)
    }

    /// Parse a token table from in-memory content
    pub fn token_table_from_str(&self, content: &str, format: Format) -> LoaderResult<TokenTable> {
        self.interpret_str(content, format, DocumentKind::TokenTable)
    }

    /// Drop any cached copy of `path`, then load it as a mapping schema
    pub fn reload(&mut self, path: &Path) -> LoaderResult<Arc<Schema>> {
        self.mappings.remove(path)?;
        self.load_mapping(path)
    }

    /// Whether any document loaded from `path` is cached
    pub fn is_cached(&self, path: &Path) -> LoaderResult<bool> {
        Ok(self.mappings.contains(path)? || self.token_tables.contains(path)? || self.configs.contains(path)?)
    }

    pub fn clear_cache(&mut self) {
        self.mappings.clear();
        self.token_tables.clear();
        self.configs.clear();
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    fn interpret_str<T: DeserializeOwned>(&self, content: &str, format: Format, kind: DocumentKind) -> LoaderResult<T> {
        let origin = Path::new("<memory>");
        let value = self.parser.parse_content(content, format, origin)?;
        if self.config.validate_basic_structure {
            self.parser.validate_basic_structure(&value, kind, origin)?;
        }
        self.parser.interpret(value, kind, origin)
    }
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn load_cached<T: DeserializeOwned>(
    cache: &mut DocumentCache<T>,
    parser: &DocumentParser,
    config: &LoaderConfig,
    path: &Path,
    kind: DocumentKind,
) -> LoaderResult<Arc<T>> {
    if let Some(document) = cache.get(path)? {
        return Ok(document);
    }

    debug!("loading {} from {}", kind, path.display());
    let value = parser.parse_file(path)?;
    if config.validate_basic_structure {
        parser.validate_basic_structure(&value, kind, path)?;
    }

    let document = Arc::new(parser.interpret::<T>(value, kind, path)?);
    cache.put(path, Arc::clone(&document))?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::error::LoaderError;
    use std::fs;
    use std::time::{Duration, SystemTime};
    use tempfile::tempdir;

    const MAPPING_YAML: &str = r#"
array: true
__fields:
  name:
    map: nome
    type: string
  age:
    map: idade
    type: integer
"#;

    #[test]
    fn test_load_yaml_mapping() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("people.yaml");
        fs::write(&path, MAPPING_YAML).unwrap();

        let mut loader = SchemaLoader::new();
        let schema = loader.load_mapping(&path).unwrap();

        assert!(schema.array);
        let names: Vec<&str> = schema.fields.as_ref().unwrap().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["name", "age"]);
        assert!(loader.is_cached(&path).unwrap());
    }

    #[test]
    fn test_cached_mapping_is_shared() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("people.yml");
        fs::write(&path, MAPPING_YAML).unwrap();

        let mut loader = SchemaLoader::new();
        let first = loader.load_mapping(&path).unwrap();
        let second = loader.load_mapping(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let reloaded = loader.reload(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &reloaded));
        assert_eq!(first, reloaded);
    }

    #[test]
    fn test_changed_file_is_reparsed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("people.json");
        fs::write(&path, r#"{"__fields": {"name": {"map": "nome", "type": "string"}}}"#).unwrap();

        let mut loader = SchemaLoader::new();
        let first = loader.load_mapping(&path).unwrap();
        assert!(!first.array);

        fs::write(&path, r#"{"array": true, "__fields": {"name": {"map": "nome", "type": "string"}}}"#).unwrap();
        let file = fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(60)).unwrap();

        let second = loader.load_mapping(&path).unwrap();
        assert!(second.array);
    }

    #[test]
    fn test_load_token_table_and_config() {
        let dir = tempdir().unwrap();
        let tokens = dir.path().join("statuses.yaml");
        fs::write(&tokens, "__fields:\n  paid: [\"pagamento aprovado\"]\n  chargeback: chargeback\n").unwrap();
        let config = dir.path().join("translator.json");
        fs::write(&config, r#"{"separator": "/"}"#).unwrap();

        let mut loader = SchemaLoader::new();
        let table = loader.load_token_table(&tokens).unwrap();
        assert_eq!(shapeshift_core::translate_token("pagamento aprovado", &table), Some("paid"));

        assert_eq!(loader.load_config(&config).unwrap().separator, "/");
    }

    #[test]
    fn test_structure_validation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, r#"{"array": true}"#).unwrap();

        let mut loader = SchemaLoader::new();
        let err = loader.load_mapping(&path).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidDocument { .. }));
        assert_eq!(err.path(), path.as_path());
        assert!(!loader.is_cached(&path).unwrap());

        // Without the check the document reaches serde, which accepts a field-less schema
        let mut lenient = SchemaLoader::with_config(LoaderConfig {
            validate_basic_structure: false,
            ..LoaderConfig::default()
        });
        assert!(lenient.load_mapping(&path).unwrap().fields.is_none());
    }

    #[test]
    fn test_from_str() {
        let loader = SchemaLoader::new();
        let schema = loader.mapping_from_str(MAPPING_YAML, Format::Yaml).unwrap();
        assert!(schema.array);

        let err = loader
            .mapping_from_str(r#"{"__fields": {"name": {"map": "nome"}}}"#, Format::Json)
            .unwrap_err();
        assert!(matches!(err, LoaderError::DocumentError { .. }));
    }

    #[test]
    fn test_missing_file() {
        let mut loader = SchemaLoader::new();
        let err = loader.load_mapping(Path::new("/nonexistent/mapping.yaml")).unwrap_err();
        assert!(matches!(err, LoaderError::IoError { .. }));
    }

    #[test]
    fn test_clear_cache() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("people.yaml");
        fs::write(&path, MAPPING_YAML).unwrap();

        let mut loader = SchemaLoader::new();
        loader.load_mapping(&path).unwrap();
        loader.clear_cache();
        assert!(!loader.is_cached(&path).unwrap());
    }
}
