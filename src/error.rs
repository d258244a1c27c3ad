//! Registration error definitions.

use thiserror::Error;

/// Boxed error returned by handler constructors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while registering handlers.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The handler constructor failed; nothing was registered.
    #[error("Failed to construct singleton {type_name}: {source}")]
    Construction {
        type_name: &'static str,
        #[source]
        source: BoxError,
    },

    /// The cached instance for a type id has an unexpected concrete type.
    #[error("Cached singleton is not an instance of {0}")]
    InstanceType(&'static str),
}

/// Result type for registration operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
