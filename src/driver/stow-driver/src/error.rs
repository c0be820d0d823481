//! Driver error types.

use thiserror::Error;

/// Errors that can occur during driver operations.
///
/// Absence of stored data is not an error; `hydrate` reports it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Resolving the connection options failed.
    #[error("options resolution failed: {0}")]
    OptionsResolution(String),

    /// Establishing the remote connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// A remote call failed after a connection was established.
    #[error("remote operation failed: {0}")]
    RemoteOperation(String),

    /// Graceful disconnect failed.
    #[error("teardown failed: {0}")]
    Teardown(String),

    /// Serializing or deserializing the stored value failed.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The hydrated value was rejected by the serializer's validator.
    #[error("validation failed: {0}")]
    Validation(String),
}
