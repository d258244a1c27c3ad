//! HTTP-facing side of the registry.
//!
//! # Data Flow
//! ```text
//! Request from the network layer
//!     → dispatch.rs (path lookup in ServerSettings)
//!     → handler.rs Filter (may stop the request)
//!     → handler.rs Action (or ErrorAction on a miss)
//!     → Response back to the network layer
//! ```

pub mod dispatch;
pub mod handler;

pub use dispatch::{dispatch, router};
pub use handler::{Action, ErrorAction, Filter};
