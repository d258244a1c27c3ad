//! Request-time behaviors stored in the registries.
//!
//! # Responsibilities
//! - Define the Filter (interceptor) and Action (terminal handler) contracts
//! - Provide the built-in error Action
//!
//! # Design Decisions
//! - Handlers are shared (`Arc`) and take `&self`; per-request state lives in
//!   the request, typically as extensions
//! - Route metadata is a method on the Action, not an attribute

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::BoxError;
use crate::routing::singleton::Singleton;

/// Pre-processing interceptor run before the Action of the same path.
pub trait Filter: Send + Sync {
    /// `Ok(())` passes the request on; `Err(response)` ends it with `response`.
    fn do_filter(&self, req: &mut Request) -> Result<(), Response>;

    /// Name used in logs and route tables.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Terminal request handler.
pub trait Action: Send + Sync {
    fn do_action(&self, req: Request) -> Response;

    /// Preferred path for self-registration. `None` or blank opts out.
    fn route(&self) -> Option<&str> {
        None
    }

    /// Name used in logs and route tables.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Answers every request with `404 Not Found`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorAction;

impl Action for ErrorAction {
    fn do_action(&self, req: Request) -> Response {
        let body = format!("404 Not Found: {}", req.uri().path());
        (StatusCode::NOT_FOUND, body).into_response()
    }
}

impl Singleton for ErrorAction {
    fn construct() -> Result<Self, BoxError> {
        Ok(ErrorAction)
    }
}
