//! Configuration schema definitions.
//!
//! Values are stored verbatim; a bad charset name only surfaces when the
//! network layer tries to use it.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CHARSET: &str = "utf-8";
pub const DEFAULT_PORT: u16 = 8888;

/// Root configuration for the server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Charset name handed to the I/O layer (e.g., "utf-8").
    pub charset: String,

    /// Listen port handed to the I/O layer.
    pub port: u16,

    /// Prepended to every registered path (e.g., "/api"). Empty by default.
    pub url_prefix: String,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            charset: DEFAULT_CHARSET.to_string(),
            port: DEFAULT_PORT,
            url_prefix: String::new(),
            log_level: "info".to_string(),
        }
    }
}
