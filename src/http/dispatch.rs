//! Per-request handler resolution.
//!
//! # Responsibilities
//! - Run the Filter registered for the request path, if any
//! - Run the matching Action, or the error Action on a miss
//! - Expose the above as an axum fallback for the network layer
//!
//! # Design Decisions
//! - Exact-match lookup only; `/*` is a literal key, not a wildcard
//! - A miss never fails: `/_error` is tried next, then a built-in `ErrorAction`

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::response::Response;
use axum::Router;

use crate::http::handler::{Action, ErrorAction};
use crate::routing::path::MAPPING_ERROR;
use crate::settings::ServerSettings;

/// Resolve and run the Filter and Action for `req`.
pub fn dispatch(settings: &ServerSettings, mut req: Request) -> Response {
    let path = req.uri().path().to_string();

    if let Some(filter) = settings.get_filter(&path) {
        if let Err(response) = filter.do_filter(&mut req) {
            tracing::debug!(path = %path, filter = filter.type_name(), "Request stopped by filter");
            return response;
        }
    }

    let action: Arc<dyn Action> = match settings.get_action(&path) {
        Some(action) => action,
        None => {
            tracing::debug!(path = %path, "No action mapped, using error action");
            settings
                .get_action(MAPPING_ERROR)
                .unwrap_or_else(|| Arc::new(ErrorAction) as Arc<dyn Action>)
        }
    };
    action.do_action(req)
}

async fn dispatch_handler(State(settings): State<Arc<ServerSettings>>, req: Request) -> Response {
    dispatch(&settings, req)
}

/// An axum router that sends every request through [`dispatch`].
pub fn router(settings: Arc<ServerSettings>) -> Router {
    Router::new().fallback(dispatch_handler).with_state(settings)
}
