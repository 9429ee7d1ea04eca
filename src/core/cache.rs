//! Keyed caches for export deduplication.
//!
//! Converters run once per (scene, datablock) pair; a cache remembers the
//! finished result and hands out serial numbers for generated names.
//! Lookups for keys that were never added are a caller bug and fail loudly.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::util::{Error, Result};

/// Key for exported-mesh cache entries.
///
/// Stable names, not object identity, so re-running an export over a
/// rebuilt scene graph still hits.
#[derive(Clone, Hash, Eq, PartialEq, Debug)]
pub struct MeshCacheKey {
    /// Scene name the mesh was realized in.
    pub scene: String,
    /// Object name within that scene.
    pub object: String,
}

impl MeshCacheKey {
    pub fn new(scene: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            object: object.into(),
        }
    }
}

/// Named cache with independent per-key serial counters.
#[derive(Debug, Clone)]
pub struct ExportCache<K, V> {
    name: String,
    items: HashMap<K, V>,
    serials: HashMap<K, u64>,
}

impl<K: Eq + Hash + Clone + Debug, V> ExportCache<K, V> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: HashMap::new(),
            serials: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if a result was stored under this key.
    #[inline]
    pub fn have(&self, key: &K) -> bool {
        self.items.contains_key(key)
    }

    /// Store a result, overwriting any previous one.
    pub fn add(&mut self, key: K, value: V) {
        self.items.insert(key, value);
    }

    /// Fetch a stored result. A missing key is a programming error on the
    /// caller's side and returns a cache-miss error naming cache and key.
    pub fn get(&self, key: &K) -> Result<&V> {
        self.items
            .get(key)
            .ok_or_else(|| Error::cache_miss(&self.name, key))
    }

    /// Next serial number for this key: 0 on first call, then 1, 2, ...
    ///
    /// Serials are an independent namespace; they are not affected by
    /// [`add`](Self::add) or [`get`](Self::get).
    pub fn serial(&mut self, key: &K) -> u64 {
        let counter = self.serials.entry(key.clone()).or_insert(0);
        let current = *counter;
        *counter += 1;
        current
    }

    /// Drop all stored results and reset every serial counter.
    pub fn clear(&mut self) {
        self.items.clear();
        self.serials.clear();
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of keys that have drawn serial numbers.
    pub fn serial_count(&self) -> usize {
        self.serials.len()
    }
}
