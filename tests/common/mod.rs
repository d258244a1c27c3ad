//! Shared handlers for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use action_server::{Action, BoxError, Filter, ServerConfig, Singleton};
use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Install a subscriber once per test binary; later calls are ignored.
pub fn init_logging() {
    let config = ServerConfig {
        log_level: "action_server=debug".into(),
        ..ServerConfig::default()
    };
    let _ = action_server::observability::logging::init_from_config(&config);
}

/// Build a GET request for `path`.
pub fn request(path: &str) -> Request {
    axum::http::Request::builder().uri(path).body(Body::empty()).unwrap()
}

/// Answers with a fixed body.
pub struct Text(pub &'static str);

impl Action for Text {
    fn do_action(&self, _req: Request) -> Response {
        self.0.into_response()
    }
}

/// Self-registering Action mounted at `/widgets`.
#[derive(Default)]
pub struct WidgetAction;

impl Action for WidgetAction {
    fn do_action(&self, _req: Request) -> Response {
        "widgets".into_response()
    }

    fn route(&self) -> Option<&str> {
        Some("/widgets")
    }
}

impl Singleton for WidgetAction {
    fn construct() -> Result<Self, BoxError> {
        Ok(WidgetAction)
    }
}

/// Counts constructions so races can be checked.
pub static SLOW_BUILDS: AtomicUsize = AtomicUsize::new(0);

pub struct SlowAction;

impl Action for SlowAction {
    fn do_action(&self, _req: Request) -> Response {
        "slow".into_response()
    }
}

impl Singleton for SlowAction {
    fn construct() -> Result<Self, BoxError> {
        SLOW_BUILDS.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(20));
        Ok(SlowAction)
    }
}

/// Rejects requests without an `x-token` header.
#[derive(Default)]
pub struct TokenFilter;

/// Marker attached by [`TokenFilter`] to accepted requests.
#[derive(Clone, Debug)]
pub struct Authenticated(pub String);

impl Filter for TokenFilter {
    fn do_filter(&self, req: &mut Request) -> Result<(), Response> {
        let token = req
            .headers()
            .get("x-token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        match token {
            Some(token) => {
                req.extensions_mut().insert(Authenticated(token));
                Ok(())
            }
            None => Err((StatusCode::UNAUTHORIZED, "Missing x-token header").into_response()),
        }
    }
}

impl Singleton for TokenFilter {
    fn construct() -> Result<Self, BoxError> {
        Ok(TokenFilter)
    }
}

/// Echoes the token attached by [`TokenFilter`].
pub struct WhoAmI;

impl Action for WhoAmI {
    fn do_action(&self, req: Request) -> Response {
        match req.extensions().get::<Authenticated>() {
            Some(Authenticated(token)) => token.clone().into_response(),
            None => (StatusCode::INTERNAL_SERVER_ERROR, "filter did not run").into_response(),
        }
    }
}
