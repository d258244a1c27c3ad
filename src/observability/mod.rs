//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registry, registrar, settings, config watcher
//!     → tracing events (structured fields: path, kind, handler)
//!     → logging.rs subscriber (fmt layer, env filter)
//! ```

pub mod logging;
