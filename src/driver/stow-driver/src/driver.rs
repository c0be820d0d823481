//! The storage driver front end.

use std::marker::PhantomData;

use tracing::debug;

use crate::engine::StorageEngine;
use crate::error::DriverError;
use crate::serialize::{Serializer, StoreProcessor};

/// Persists one value of type `T` behind one key, via a pluggable engine.
///
/// The driver owns the engine exclusively and issues one operation at a time.
/// It tracks whether the backend has been initialized; `store` and `hydrate`
/// initialize on demand, `clear` and `unload` reset the flag so the next
/// operation starts fresh.
pub struct StorageDriver<T, S, E>
where
    S: Serializer<T>,
    E: StorageEngine,
{
    name: String,
    serializer: S,
    processor: Option<Box<dyn StoreProcessor>>,
    engine: E,
    initialized: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T, S, E> StorageDriver<T, S, E>
where
    S: Serializer<T>,
    E: StorageEngine,
{
    /// Creates a driver. No backend work happens until the first operation.
    pub fn new(name: impl Into<String>, serializer: S, engine: E) -> Self {
        Self {
            name: name.into(),
            serializer,
            processor: None,
            engine,
            initialized: false,
            _marker: PhantomData,
        }
    }

    /// Adds a processor applied to the serialized bytes around every
    /// store/hydrate.
    pub fn with_processor(mut self, processor: impl StoreProcessor + 'static) -> Self {
        self.processor = Some(Box::new(processor));
        self
    }

    /// Returns the driver name, used for identification and logging.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the backend has been initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Ensures the backend is ready; returns whether a backend handle is
    /// available.
    pub async fn init(&mut self) -> Result<bool, DriverError> {
        if !self.initialized {
            self.initialized = self.engine.handle_init().await?;
            debug!(driver = %self.name, ready = self.initialized, "driver initialized");
        }
        Ok(self.initialized)
    }

    /// Serializes `value` and stores it, overwriting any prior value.
    pub async fn store(&mut self, value: &T) -> Result<(), DriverError> {
        self.ensure_init().await?;

        let mut data = self.serializer.serialize(value)?;
        if let Some(processor) = &self.processor {
            data = processor.pre_store(data).await?;
        }

        self.engine.handle_store(&data).await?;
        debug!(driver = %self.name, bytes = data.len(), "value stored");
        Ok(())
    }

    /// Reads the stored value back, or `None` if nothing is stored.
    pub async fn hydrate(&mut self) -> Result<Option<T>, DriverError> {
        self.ensure_init().await?;

        let Some(mut data) = self.engine.handle_hydrate().await? else {
            debug!(driver = %self.name, "nothing to hydrate");
            return Ok(None);
        };

        if let Some(processor) = &self.processor {
            data = processor.post_hydrate(data).await?;
        }

        let value = self.serializer.deserialize(&data)?;
        if !self.serializer.validate(&value) {
            return Err(DriverError::Validation(format!(
                "hydrated value rejected by validator ({})",
                self.name
            )));
        }

        debug!(driver = %self.name, bytes = data.len(), "value hydrated");
        Ok(Some(value))
    }

    /// Removes the stored value. Idempotent.
    ///
    /// Also marks the driver uninitialized; the next operation re-runs init.
    pub async fn clear(&mut self) -> Result<(), DriverError> {
        self.engine.handle_clear().await?;
        self.initialized = false;
        debug!(driver = %self.name, "store cleared");
        Ok(())
    }

    /// Releases backend resources. The driver remains usable; the next
    /// operation reconnects from scratch.
    pub async fn unload(&mut self) -> Result<bool, DriverError> {
        let released = self.engine.handle_unload().await?;
        self.initialized = false;
        debug!(driver = %self.name, "driver unloaded");
        Ok(released)
    }

    async fn ensure_init(&mut self) -> Result<(), DriverError> {
        if !self.init().await? {
            return Err(DriverError::Connection(format!(
                "driver {} failed to initialize",
                self.name
            )));
        }
        Ok(())
    }
}
