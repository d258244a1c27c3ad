//! Server-wide settings.
//!
//! # Responsibilities
//! - Own the charset, listen port and URL prefix handed to the I/O layer
//! - Own the Filter and Action registries and the singleton cache
//! - Seed the error handler under the reserved keys
//!
//! # Design Decisions
//! - One instance per running server, shared via `Arc`; tests build their own
//! - Every accessor takes `&self`; interior state is atomic or lock-free
//! - Charset and port are stored verbatim

use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;

use crate::config::ServerConfig;
use crate::http::handler::{Action, ErrorAction, Filter};
use crate::routing::path::{MAPPING_ALL, MAPPING_ERROR, MAPPING_ROOT};
use crate::routing::registry::{HandlerMap, HandlerRegistry, UrlPrefix};
use crate::routing::singleton::SingletonResolver;

/// Charset, port, URL prefix and the two handler registries of a server.
pub struct ServerSettings {
    charset: ArcSwap<String>,
    port: AtomicU16,
    url_prefix: Arc<UrlPrefix>,
    pub(crate) filters: HandlerRegistry<dyn Filter>,
    pub(crate) actions: HandlerRegistry<dyn Action>,
    pub(crate) singletons: SingletonResolver,
}

impl ServerSettings {
    /// Settings with default values and the error handler seeded.
    pub fn new() -> Self {
        Self::from_config(&ServerConfig::default())
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let url_prefix = Arc::new(UrlPrefix::new(config.url_prefix.clone()));
        let settings = Self {
            charset: ArcSwap::from_pointee(config.charset.clone()),
            port: AtomicU16::new(config.port),
            filters: HandlerRegistry::new("filter", Arc::clone(&url_prefix)),
            actions: HandlerRegistry::new("action", Arc::clone(&url_prefix)),
            url_prefix,
            singletons: SingletonResolver::new(),
        };
        settings.seed_defaults();

        tracing::info!(
            charset = %config.charset,
            port = config.port,
            url_prefix = %config.url_prefix,
            "Server settings initialized"
        );
        settings
    }

    fn seed_defaults(&self) {
        let error_action: Arc<dyn Action> = self
            .singletons
            .get_instance::<ErrorAction>()
            .unwrap_or_else(|_| Arc::new(ErrorAction));
        for key in [MAPPING_ROOT, MAPPING_ERROR, MAPPING_ALL] {
            self.actions.seed(key, Arc::clone(&error_action));
        }
    }

    /// Apply a reloaded configuration. Registered handlers are kept.
    pub fn apply_config(&self, config: &ServerConfig) {
        self.set_charset(config.charset.clone());
        self.set_port(config.port);
        self.set_url_prefix(config.url_prefix.clone());
        tracing::info!(
            charset = %config.charset,
            port = config.port,
            url_prefix = %config.url_prefix,
            "Server settings reloaded"
        );
    }

    pub fn charset(&self) -> String {
        String::clone(&self.charset.load())
    }

    pub fn set_charset(&self, charset: impl Into<String>) {
        self.charset.store(Arc::new(charset.into()));
    }

    pub fn port(&self) -> u16 {
        self.port.load(Ordering::Acquire)
    }

    pub fn set_port(&self, port: u16) {
        self.port.store(port, Ordering::Release);
    }

    pub fn url_prefix(&self) -> Arc<String> {
        self.url_prefix.get()
    }

    /// Only registrations made after this call use the new prefix.
    pub fn set_url_prefix(&self, prefix: impl Into<String>) {
        self.url_prefix.set(prefix);
    }

    /// Filter for `path`; blank resolves to the root.
    pub fn get_filter(&self, path: &str) -> Option<Arc<dyn Filter>> {
        self.filters.get(path)
    }

    /// Action for `path`; blank resolves to the root.
    pub fn get_action(&self, path: &str) -> Option<Arc<dyn Action>> {
        self.actions.get(path)
    }

    pub fn get_filter_map(&self) -> Arc<HandlerMap<dyn Filter>> {
        self.filters.get_all()
    }

    pub fn get_action_map(&self) -> Arc<HandlerMap<dyn Action>> {
        self.actions.get_all()
    }

    pub fn set_filter_map(&self, map: HandlerMap<dyn Filter>) {
        self.filters.replace_all(map);
    }

    /// Replaces every Action, including the seeded error handlers.
    pub fn set_action_map(&self, map: HandlerMap<dyn Action>) {
        self.actions.replace_all(map);
    }

    pub fn filters(&self) -> &HandlerRegistry<dyn Filter> {
        &self.filters
    }

    pub fn actions(&self) -> &HandlerRegistry<dyn Action> {
        &self.actions
    }

    pub fn singletons(&self) -> &SingletonResolver {
        &self.singletons
    }

    /// Sorted snapshot of both registries for external tooling.
    pub fn route_table(&self) -> RouteTable {
        let mut filters: Vec<RouteEntry> = self
            .get_filter_map()
            .iter()
            .map(|r| RouteEntry {
                path: r.key().clone(),
                handler: r.value().type_name(),
            })
            .collect();
        let mut actions: Vec<RouteEntry> = self
            .get_action_map()
            .iter()
            .map(|r| RouteEntry {
                path: r.key().clone(),
                handler: r.value().type_name(),
            })
            .collect();
        filters.sort_by(|a, b| a.path.cmp(&b.path));
        actions.sort_by(|a, b| a.path.cmp(&b.path));

        RouteTable { filters, actions }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// One row of a [`RouteTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub path: String,
    pub handler: &'static str,
}

/// Snapshot of registered paths.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RouteTable {
    pub filters: Vec<RouteEntry>,
    pub actions: Vec<RouteEntry>,
}
