//! Storage engine trait definition.

use async_trait::async_trait;

use crate::error::DriverError;

/// Backend extension points for a storage driver.
///
/// An engine owns whatever resources it needs (a connection handle, a file,
/// an in-process buffer) and persists exactly one binary record. Handlers take
/// `&mut self`: a driver issues at most one operation at a time, and the
/// borrow rules make that explicit.
#[async_trait]
pub trait StorageEngine: Send + Sync {
    /// Ensures the engine is ready for remote operations.
    ///
    /// Returns whether a usable backend handle is now available. Engines that
    /// connect lazily establish their connection here.
    async fn handle_init(&mut self) -> Result<bool, DriverError>;

    /// Writes the record, overwriting any prior value.
    async fn handle_store(&mut self, data: &[u8]) -> Result<(), DriverError>;

    /// Reads the record back as raw bytes.
    ///
    /// Returns `Ok(None)` when nothing has been stored. An empty value is
    /// `Ok(Some(vec![]))`, distinct from absent.
    async fn handle_hydrate(&mut self) -> Result<Option<Vec<u8>>, DriverError>;

    /// Removes the record. Clearing an absent record is not an error.
    async fn handle_clear(&mut self) -> Result<(), DriverError>;

    /// Releases any held backend handle, disconnecting gracefully.
    ///
    /// Returns `true` whether or not a handle existed. A subsequent operation
    /// must start from scratch.
    async fn handle_unload(&mut self) -> Result<bool, DriverError>;
}
