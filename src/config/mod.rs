//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → ServerConfig
//!     → ServerSettings::from_config (seeded registries)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → ServerSettings::apply_config (charset, port, url prefix)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - No range or charset-name validation at this layer
//! - A URL prefix change affects later registrations only

pub mod loader;
pub mod schema;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::ServerConfig;
pub use watcher::ConfigWatcher;
