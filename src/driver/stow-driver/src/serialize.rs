//! Serializer and store-processor contracts.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::DriverError;

/// Converts between the application value and its stored binary form.
pub trait Serializer<T>: Send + Sync {
    /// Serializes a value to bytes.
    fn serialize(&self, value: &T) -> Result<Vec<u8>, DriverError>;

    /// Deserializes a value from bytes.
    fn deserialize(&self, data: &[u8]) -> Result<T, DriverError>;

    /// Checks a hydrated value. The default accepts everything.
    fn validate(&self, value: &T) -> bool {
        let _ = value;
        true
    }
}

/// Transforms the serialized bytes on their way to and from the engine.
///
/// Useful for encryption or compression layers that should apply uniformly
/// regardless of which engine stores the bytes.
#[async_trait]
pub trait StoreProcessor: Send + Sync {
    /// Applied to serialized bytes before they are stored.
    async fn pre_store(&self, data: Vec<u8>) -> Result<Vec<u8>, DriverError>;

    /// Applied to stored bytes before they are deserialized.
    async fn post_hydrate(&self, data: Vec<u8>) -> Result<Vec<u8>, DriverError>;
}

/// JSON serializer backed by serde_json, with an optional validator.
pub struct JsonSerializer<T> {
    validator: Option<Box<dyn Fn(&T) -> bool + Send + Sync>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonSerializer<T> {
    /// Creates a serializer without a validator.
    pub fn new() -> Self {
        Self {
            validator: None,
            _marker: PhantomData,
        }
    }

    /// Adds a validator applied to every hydrated value.
    pub fn with_validator(
        mut self,
        validator: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }
}

impl<T> Default for JsonSerializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Serializer<T> for JsonSerializer<T>
where
    T: Serialize + DeserializeOwned,
{
    fn serialize(&self, value: &T) -> Result<Vec<u8>, DriverError> {
        serde_json::to_vec(value).map_err(|e| DriverError::Serialization(e.to_string()))
    }

    fn deserialize(&self, data: &[u8]) -> Result<T, DriverError> {
        serde_json::from_slice(data).map_err(|e| DriverError::Serialization(e.to_string()))
    }

    fn validate(&self, value: &T) -> bool {
        match &self.validator {
            Some(validator) => validator(value),
            None => true,
        }
    }
}
