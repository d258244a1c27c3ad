//! Path-keyed handler storage.
//!
//! # Responsibilities
//! - Map storage keys to shared handler instances
//! - Apply the URL prefix at registration time
//! - Allow the whole mapping to be swapped atomically
//!
//! # Design Decisions
//! - Lookup is a single hash access; the prefix is baked into the key on write
//! - Last registration for a key wins; overrides are reported, not rejected
//! - The registry holds `Arc`s and never owns handler lifetimes exclusively
//! - `replace_all` swaps the map pointer, so readers see the old or the new map,
//!   never a mix

use std::sync::Arc;

use arc_swap::ArcSwap;
use dashmap::DashMap;

use crate::routing::path::{normalize, storage_key};

/// Backing map of a registry: storage key -> handler.
pub type HandlerMap<V> = DashMap<String, Arc<V>>;

/// Mutable URL prefix shared by the registries of one server.
///
/// Read on every registration; changing it only affects later registrations.
#[derive(Debug)]
pub struct UrlPrefix(ArcSwap<String>);

impl UrlPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(ArcSwap::from_pointee(prefix.into()))
    }

    pub fn get(&self) -> Arc<String> {
        self.0.load_full()
    }

    pub fn set(&self, prefix: impl Into<String>) {
        self.0.store(Arc::new(prefix.into()));
    }
}

impl Default for UrlPrefix {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Why a registration stored nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No handler was supplied.
    MissingHandler,
    /// The handler carries no usable route.
    MissingRoute,
}

/// Outcome of a registration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// Stored under `key`; `replaced` is set when a previous entry was overwritten.
    Stored { key: String, replaced: bool },
    /// Nothing was stored and the registry is unchanged.
    Skipped(SkipReason),
}

impl Registration {
    pub fn is_stored(&self) -> bool {
        matches!(self, Registration::Stored { .. })
    }

    /// Storage key, if anything was stored.
    pub fn key(&self) -> Option<&str> {
        match self {
            Registration::Stored { key, .. } => Some(key),
            Registration::Skipped(_) => None,
        }
    }
}

/// Thread-safe mapping from path to handler.
pub struct HandlerRegistry<V: ?Sized> {
    /// Label used in log events ("filter", "action").
    kind: &'static str,
    map: ArcSwap<HandlerMap<V>>,
    prefix: Arc<UrlPrefix>,
}

impl<V: ?Sized> HandlerRegistry<V> {
    /// Create an empty registry reading its URL prefix from `prefix`.
    pub fn new(kind: &'static str, prefix: Arc<UrlPrefix>) -> Self {
        Self {
            kind,
            map: ArcSwap::from_pointee(DashMap::new()),
            prefix,
        }
    }

    /// Exact-match lookup after read-side normalization.
    ///
    /// A miss is `None`; falling back to an error handler is up to the caller.
    pub fn get(&self, path: &str) -> Option<Arc<V>> {
        let key = normalize(path);
        let map = self.map.load();
        let found = map.get(key.as_str()).map(|entry| Arc::clone(entry.value()));
        found
    }

    /// Register `handler` under `path`, overwriting any existing entry.
    ///
    /// A `None` handler is logged and skipped; the existing mapping is kept.
    pub fn put(&self, path: &str, handler: Option<Arc<V>>) -> Registration {
        let Some(handler) = handler else {
            tracing::warn!(kind = self.kind, path = %path, "Added blank {}, pass it", self.kind);
            return Registration::Skipped(SkipReason::MissingHandler);
        };

        let key = storage_key(&self.prefix.get(), path);
        let replaced = self.map.load().insert(key.clone(), handler).is_some();
        Registration::Stored { key, replaced }
    }

    /// Store under a literal key, bypassing normalization and the URL prefix.
    pub(crate) fn seed(&self, key: &str, handler: Arc<V>) {
        self.map.load().insert(key.to_string(), handler);
    }

    /// Atomically swap in a whole new mapping. Defaults are not re-seeded.
    pub fn replace_all(&self, map: HandlerMap<V>) {
        let count = map.len();
        self.map.store(Arc::new(map));
        tracing::info!(kind = self.kind, entries = count, "Replaced {} mapping", self.kind);
    }

    /// The live mapping (not a copy).
    ///
    /// Entries registered after this call land in the returned map unless it
    /// has been swapped out by `replace_all` in the meantime.
    pub fn get_all(&self) -> Arc<HandlerMap<V>> {
        self.map.load_full()
    }

    /// True when a lookup for `path` would hit.
    pub fn contains(&self, path: &str) -> bool {
        self.map.load().contains_key(normalize(path).as_str())
    }

    pub fn len(&self) -> usize {
        self.map.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.load().is_empty()
    }
}
