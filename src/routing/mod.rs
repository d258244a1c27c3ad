//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (startup or runtime):
//!     registrar.rs (explicit path, singleton type, or Action::route)
//!     → singleton.rs (shared instance per type)
//!     → path.rs (normalize, ensure leading slash)
//!     → registry.rs (URL prefix + key → handler)
//!
//! Lookup (per request):
//!     raw path
//!     → path.rs (blank → "/", collapse "//")
//!     → registry.rs (exact match)
//!     → handler or None
//! ```
//!
//! # Design Decisions
//! - Exact-match lookup only; no wildcards, regex or path parameters
//! - Last registration wins; overrides are logged
//! - Skips are returned as values, errors only for failed construction

pub mod path;
pub mod registrar;
pub mod registry;
pub mod singleton;

pub use path::{normalize, NormalizedPath, MAPPING_ALL, MAPPING_ERROR, MAPPING_ROOT};
pub use registry::{HandlerMap, HandlerRegistry, Registration, SkipReason, UrlPrefix};
pub use singleton::{Singleton, SingletonResolver};
