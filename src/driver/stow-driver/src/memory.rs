//! In-process storage engine.

use async_trait::async_trait;

use crate::engine::StorageEngine;
use crate::error::DriverError;

/// Engine that keeps the record in process memory.
///
/// Nothing survives a restart; useful for tests and as the reference
/// implementation of the [`StorageEngine`] contract.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    data: Option<Vec<u8>>,
}

impl MemoryEngine {
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageEngine for MemoryEngine {
    async fn handle_init(&mut self) -> Result<bool, DriverError> {
        Ok(true)
    }

    async fn handle_store(&mut self, data: &[u8]) -> Result<(), DriverError> {
        self.data = Some(data.to_vec());
        Ok(())
    }

    async fn handle_hydrate(&mut self) -> Result<Option<Vec<u8>>, DriverError> {
        Ok(self.data.clone())
    }

    async fn handle_clear(&mut self) -> Result<(), DriverError> {
        self.data = None;
        Ok(())
    }

    async fn handle_unload(&mut self) -> Result<bool, DriverError> {
        Ok(true)
    }
}
