//! Path-keyed Filter and Action registry for a minimal HTTP server.
//!
//! The network layer owns sockets and HTTP parsing; this crate decides which
//! [`Filter`] and [`Action`] run for a request path.

pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod routing;
pub mod settings;

pub use config::ServerConfig;
pub use error::{BoxError, RegistryError, RegistryResult};
pub use http::{Action, ErrorAction, Filter};
pub use routing::{Registration, Singleton, SingletonResolver, SkipReason};
pub use settings::{RouteEntry, RouteTable, ServerSettings};
