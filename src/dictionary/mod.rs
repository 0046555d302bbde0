//! Translation dictionary loading and TTL caching.
//!
//! The store reads language dictionaries (JSON files of nested string-keyed
//! mappings) from disk and caches successful loads per `(name, path)` pair.
//! An entry expires a configurable number of milliseconds after it was
//! loaded; expiry is checked against an injectable [`Clock`] at lookup time,
//! so eviction is deterministic and tests never need a real timer.
//!
//! A load failure (missing file, parse error) is not an error: it yields a
//! [`LanguageEntry`] with `translation: None`, surfaced downstream as a
//! "language missing" finding. Failed loads are never cached.

pub mod path;

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};

use serde_json::Value;

/// Time source for cache expiry. Injectable so tests control eviction.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The real wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A configured language dictionary source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSpec {
    pub name: String,
    pub path: String,
}

impl LanguageSpec {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A resolved language dictionary.
///
/// `translation` is `None` when the source could not be read or parsed.
/// Loaded dictionaries are shared via `Arc` and never mutated.
#[derive(Debug, Clone)]
pub struct LanguageEntry {
    pub name: String,
    pub translation: Option<Arc<Value>>,
}

/// Per-call cache behavior.
#[derive(Debug, Clone, Copy)]
pub struct ResolveOptions {
    /// Bypass the cache entirely: never read from it, never write to it.
    pub disable_cache: bool,
    /// Lifetime of entries created by this call, in milliseconds.
    pub ttl_ms: u64,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            disable_cache: false,
            ttl_ms: 500,
        }
    }
}

struct CacheEntry {
    entry: LanguageEntry,
    expires_at: Instant,
}

/// Loads and caches translation dictionaries.
pub struct DictionaryStore {
    root: PathBuf,
    clock: Arc<dyn Clock>,
    cache: HashMap<(String, String), CacheEntry>,
}

impl DictionaryStore {
    /// Create a store resolving dictionary paths relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_clock(root, Arc::new(SystemClock))
    }

    pub fn with_clock(root: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            root: root.into(),
            clock,
            cache: HashMap::new(),
        }
    }

    /// Resolve every configured language to its dictionary.
    ///
    /// Entries still within their TTL are returned from the cache without
    /// re-reading the source; expired entries are evicted and reloaded.
    pub fn resolve(&mut self, specs: &[LanguageSpec], opts: ResolveOptions) -> Vec<LanguageEntry> {
        specs.iter().map(|spec| self.resolve_one(spec, opts)).collect()
    }

    fn resolve_one(&mut self, spec: &LanguageSpec, opts: ResolveOptions) -> LanguageEntry {
        let cache_key = (spec.name.clone(), spec.path.clone());

        if !opts.disable_cache {
            let now = self.clock.now();
            if let Some(cached) = self.cache.get(&cache_key) {
                if now < cached.expires_at {
                    return cached.entry.clone();
                }
                self.cache.remove(&cache_key);
            }
        }

        let entry = LanguageEntry {
            name: spec.name.clone(),
            translation: load_translation(&self.root.join(&spec.path)).map(Arc::new),
        };

        if !opts.disable_cache && entry.translation.is_some() {
            let expires_at = self.clock.now() + Duration::from_millis(opts.ttl_ms);
            self.cache.insert(
                cache_key,
                CacheEntry {
                    entry: entry.clone(),
                    expires_at,
                },
            );
        }

        entry
    }
}

fn load_translation(path: &Path) -> Option<Value> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}
