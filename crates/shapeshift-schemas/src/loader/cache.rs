//! In-memory cache of loaded documents, invalidated by file modification time
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use log::debug;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Configuration for cache behavior
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries before the least recently used is evicted
    pub max_entries: usize,
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 256,
            enabled: true,
        }
    }
}

#[derive(Debug)]
struct CacheEntry<T> {
    document: Arc<T>,
    file_mtime: SystemTime,
}

/// Typed documents keyed by canonical file path
#[derive(Debug)]
pub struct DocumentCache<T> {
    entries: HashMap<PathBuf, CacheEntry<T>>,
    access_order: VecDeque<PathBuf>,
    config: CacheConfig,
}

impl<T> DocumentCache<T> {
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            access_order: VecDeque::new(),
            config,
        }
    }

    /// Cached document for `path`, if present and the file is unchanged
    pub fn get(&mut self, path: &Path) -> LoaderResult<Option<Arc<T>>> {
        if !self.config.enabled {
            return Ok(None);
        }

        let key = canonicalize(path)?;
        let Some(entry) = self.entries.get(&key) else {
            debug!("cache miss for {}", key.display());
            return Ok(None);
        };

        if modified(path)? != entry.file_mtime {
            debug!("cache entry for {} is stale", key.display());
            self.remove_key(&key);
            return Ok(None);
        }

        let document = Arc::clone(&entry.document);
        self.touch(&key);
        debug!("cache hit for {}", key.display());
        Ok(Some(document))
    }

    /// Cache a document under the file's current modification time
    pub fn put(&mut self, path: &Path, document: Arc<T>) -> LoaderResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let key = canonicalize(path)?;
        let file_mtime = modified(path)?;

        if !self.entries.contains_key(&key) && self.entries.len() >= self.config.max_entries {
            if let Some(oldest) = self.access_order.pop_front() {
                debug!("evicting {} from cache", oldest.display());
                self.entries.remove(&oldest);
            }
        }

        self.entries.insert(key.clone(), CacheEntry { document, file_mtime });
        self.touch(&key);
        Ok(())
    }

    pub fn remove(&mut self, path: &Path) -> LoaderResult<bool> {
        let key = canonicalize(path)?;
        Ok(self.remove_key(&key))
    }

    pub fn contains(&self, path: &Path) -> LoaderResult<bool> {
        Ok(self.entries.contains_key(&canonicalize(path)?))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.access_order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn touch(&mut self, key: &PathBuf) {
        self.access_order.retain(|p| p != key);
        self.access_order.push_back(key.clone());
    }

    fn remove_key(&mut self, key: &PathBuf) -> bool {
        self.access_order.retain(|p| p != key);
        self.entries.remove(key).is_some()
    }
}

impl<T> Default for DocumentCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn canonicalize(path: &Path) -> LoaderResult<PathBuf> {
    path.canonicalize().map_err(|e| LoaderError::io_error(path, e))
}

fn modified(path: &Path) -> LoaderResult<SystemTime> {
    std::fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map_err(|e| LoaderError::io_error(path, e))
}
