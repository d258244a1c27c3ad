//! Handler registration.
//!
//! # Registration Shapes
//! ```text
//! set_action(path, instance)          → actions.put
//! set_action_type::<T>(path)          → singleton T → set_action
//! register_action(instance)           → instance.route() → set_action
//! register_action_type::<T>()         → singleton T → register_action
//! ```
//! Filters support the first two shapes.
//!
//! # Design Decisions
//! - Every call is a single overwrite; there is no multi-step protocol
//! - Missing route metadata is a skip, not an error
//! - Singleton construction errors are returned and nothing is stored

use std::sync::Arc;

use crate::error::RegistryResult;
use crate::http::handler::{Action, Filter};
use crate::routing::registry::{Registration, SkipReason};
use crate::routing::singleton::Singleton;
use crate::settings::ServerSettings;

impl ServerSettings {
    /// Register `filter` under `path`, replacing any existing Filter there.
    pub fn set_filter(&self, path: &str, filter: Arc<dyn Filter>) -> Registration {
        let name = filter.type_name();
        let outcome = self.filters.put(path, Some(filter));
        if let Registration::Stored { key, replaced } = &outcome {
            tracing::info!(path = %key, filter = name, replaced = *replaced, "Added filter");
        }
        outcome
    }

    /// Register the shared instance of `T` under `path`.
    pub fn set_filter_type<T: Filter + Singleton>(&self, path: &str) -> RegistryResult<Registration> {
        let filter = self.singletons.get_instance::<T>()?;
        Ok(self.set_filter(path, filter))
    }

    /// Register `action` under `path`, replacing any existing Action there.
    pub fn set_action(&self, path: &str, action: Arc<dyn Action>) -> Registration {
        let name = action.type_name();
        let outcome = self.actions.put(path, Some(action));
        if let Registration::Stored { key, replaced } = &outcome {
            tracing::info!(path = %key, action = name, replaced = *replaced, "Added action");
        }
        outcome
    }

    /// Register the shared instance of `T` under `path`.
    pub fn set_action_type<T: Action + Singleton>(&self, path: &str) -> RegistryResult<Registration> {
        let action = self.singletons.get_instance::<T>()?;
        Ok(self.set_action(path, action))
    }

    /// Register `action` under its own [`Action::route`].
    ///
    /// Without a non-blank route nothing is stored and
    /// `Skipped(MissingRoute)` is returned.
    pub fn register_action(&self, action: Arc<dyn Action>) -> Registration {
        let route = action
            .route()
            .filter(|r| !r.trim().is_empty())
            .map(str::to_string);

        match route {
            Some(path) => self.set_action(&path, action),
            None => {
                tracing::debug!(action = action.type_name(), "No route declared, skipping");
                Registration::Skipped(SkipReason::MissingRoute)
            }
        }
    }

    /// Register the shared instance of `T` under its own route.
    pub fn register_action_type<T: Action + Singleton>(&self) -> RegistryResult<Registration> {
        let action = self.singletons.get_instance::<T>()?;
        Ok(self.register_action(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::error::{BoxError, RegistryError};
    use axum::extract::Request;
    use axum::response::{IntoResponse, Response};

    struct Widgets;

    impl Action for Widgets {
        fn do_action(&self, _req: Request) -> Response {
            "widgets".into_response()
        }

        fn route(&self) -> Option<&str> {
            Some("/widgets")
        }
    }

    impl Singleton for Widgets {
        fn construct() -> Result<Self, BoxError> {
            Ok(Widgets)
        }
    }

    struct Unrouted;

    impl Action for Unrouted {
        fn do_action(&self, _req: Request) -> Response {
            "unrouted".into_response()
        }
    }

    impl Singleton for Unrouted {
        fn construct() -> Result<Self, BoxError> {
            Ok(Unrouted)
        }
    }

    struct BlankRoute;

    impl Action for BlankRoute {
        fn do_action(&self, _req: Request) -> Response {
            "blank".into_response()
        }

        fn route(&self) -> Option<&str> {
            Some("   ")
        }
    }

    struct Auth;

    impl Filter for Auth {
        fn do_filter(&self, _req: &mut Request) -> Result<(), Response> {
            Ok(())
        }
    }

    impl Singleton for Auth {
        fn construct() -> Result<Self, BoxError> {
            Ok(Auth)
        }
    }

    struct NeedsDatabase;

    impl Action for NeedsDatabase {
        fn do_action(&self, _req: Request) -> Response {
            "db".into_response()
        }
    }

    impl Singleton for NeedsDatabase {
        fn construct() -> Result<Self, BoxError> {
            Err("database url not configured".into())
        }
    }

    #[test]
    fn test_register_by_route() {
        let settings = ServerSettings::new();
        let widgets: Arc<dyn Action> = Arc::new(Widgets);

        let outcome = settings.register_action(widgets.clone());
        assert_eq!(outcome.key(), Some("/widgets"));
        assert!(Arc::ptr_eq(&settings.get_action("/widgets").unwrap(), &widgets));
    }

    #[test]
    fn test_register_without_route_is_noop() {
        let settings = ServerSettings::new();
        let before = settings.actions().len();

        assert_eq!(
            settings.register_action(Arc::new(Unrouted)),
            Registration::Skipped(SkipReason::MissingRoute)
        );
        assert_eq!(
            settings.register_action(Arc::new(BlankRoute)),
            Registration::Skipped(SkipReason::MissingRoute)
        );
        assert_eq!(settings.actions().len(), before);
    }

    #[test]
    fn test_register_type_uses_singleton() {
        let settings = ServerSettings::new();
        settings.register_action_type::<Widgets>().unwrap();
        settings.set_action_type::<Widgets>("/gadgets").unwrap();

        let a = settings.get_action("/widgets").unwrap();
        let b = settings.get_action("/gadgets").unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let cached = settings.singletons().get_instance::<Widgets>().unwrap();
        let cached: Arc<dyn Action> = cached;
        assert!(Arc::ptr_eq(&a, &cached));
    }

    #[test]
    fn test_register_type_without_route() {
        let settings = ServerSettings::new();
        let outcome = settings.register_action_type::<Unrouted>().unwrap();
        assert!(!outcome.is_stored());
        // The instance is still cached for later manual registration
        assert!(settings.singletons().contains::<Unrouted>());
    }

    #[test]
    fn test_filter_registration() {
        let settings = ServerSettings::new();
        let outcome = settings.set_filter("users//profile", Arc::new(Auth));
        assert_eq!(outcome.key(), Some("/users/profile"));

        assert!(settings.get_filter("users//profile").is_some());
        assert!(settings.get_filter("/users/profile").is_some());
        assert!(settings.get_filter("/other").is_none());

        settings.set_filter_type::<Auth>("/admin").unwrap();
        assert!(settings.get_filter("/admin").is_some());
    }

    #[test]
    fn test_construction_failure_stores_nothing() {
        let settings = ServerSettings::new();
        let err = settings.set_action_type::<NeedsDatabase>("/db").unwrap_err();
        assert!(matches!(err, RegistryError::Construction { .. }));
        assert!(settings.get_action("/db").is_none());
    }

    #[test]
    fn test_url_prefix_applies_to_actions() {
        let settings = ServerSettings::from_config(&ServerConfig {
            url_prefix: "/api".into(),
            ..ServerConfig::default()
        });

        let outcome = settings.set_action("orders", Arc::new(Unrouted));
        assert_eq!(outcome.key(), Some("/api/orders"));
        assert!(settings.get_action("/api/orders").is_some());
        assert!(settings.get_action("/orders").is_none());
    }

    #[test]
    fn test_override_reports_replacement() {
        let settings = ServerSettings::new();
        settings.set_action("/x", Arc::new(Unrouted));
        let outcome = settings.set_action("/x", Arc::new(Widgets));
        assert_eq!(outcome, Registration::Stored { key: "/x".into(), replaced: true });
        assert!(settings.get_action("/x").unwrap().type_name().ends_with("Widgets"));

        // Overriding a seeded entry is allowed too
        let outcome = settings.set_action("/", Arc::new(Widgets));
        assert_eq!(outcome, Registration::Stored { key: "/".into(), replaced: true });
    }
}
