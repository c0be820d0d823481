//! Integration tests for stow drivers.
//!
//! The in-memory scenarios always run. Scenarios against a real Redis server
//! are `#[ignore]`d; run them with `cargo test -- --ignored` against a server
//! reachable at `REDIS_URL` (default `redis://127.0.0.1:6379`).

use serde::{Deserialize, Serialize};

use stow_driver::{JsonSerializer, MemoryEngine, StorageDriver};
use stow_driver_redis::{ConnectOptions, RedisEngine, RedisStorageDriver};

/// Payload stored by every scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data {
    pub test: String,
}

/// The canonical test value.
pub fn demo_data() -> Data {
    Data {
        test: "demo".into(),
    }
}

/// Redis URL used by the live tests.
pub fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}

/// Serializer used by every scenario, with a shape check on hydrate.
pub fn serializer() -> JsonSerializer<Data> {
    JsonSerializer::new().with_validator(|data: &Data| !data.test.is_empty())
}

/// Driver against a live Redis server with static options.
pub fn redis_driver(
    name: &str,
    key: &str,
) -> anyhow::Result<RedisStorageDriver<Data, JsonSerializer<Data>>> {
    let options = ConnectOptions::new(redis_url().as_str())?;
    Ok(StorageDriver::new(
        name,
        serializer(),
        RedisEngine::new(key, options),
    ))
}

/// Driver against a live Redis server with provider-supplied options.
pub fn redis_driver_with_provider(
    name: &str,
    key: &str,
) -> RedisStorageDriver<Data, JsonSerializer<Data>> {
    let options = ConnectOptions::provider(|| {
        redis::IntoConnectionInfo::into_connection_info(redis_url().as_str())
    });
    StorageDriver::new(name, serializer(), RedisEngine::new(key, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stow_driver::DriverError;

    /// Runs the full lifecycle from the original driver contract: clear,
    /// hydrate absent, store, hydrate back, clear again, unload, reuse.
    async fn run_lifecycle<E: stow_driver::StorageEngine>(
        driver: &mut StorageDriver<Data, JsonSerializer<Data>, E>,
    ) {
        driver.clear().await.unwrap();
        assert!(!driver.is_initialized());

        assert_eq!(driver.hydrate().await.unwrap(), None);
        assert!(driver.is_initialized());

        driver.store(&demo_data()).await.unwrap();
        assert_eq!(driver.hydrate().await.unwrap(), Some(demo_data()));

        // A second hydrate sees the same value.
        assert_eq!(driver.hydrate().await.unwrap(), Some(demo_data()));

        driver.clear().await.unwrap();
        assert!(!driver.is_initialized());
        assert_eq!(driver.hydrate().await.unwrap(), None);

        assert!(driver.unload().await.unwrap());
        assert!(!driver.is_initialized());

        // The driver reconnects on next use.
        driver.store(&demo_data()).await.unwrap();
        assert_eq!(driver.hydrate().await.unwrap(), Some(demo_data()));

        driver.clear().await.unwrap();
        driver.unload().await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_lifecycle() {
        let mut driver = StorageDriver::new("memory", serializer(), MemoryEngine::new());
        run_lifecycle(&mut driver).await;
    }

    #[tokio::test]
    async fn test_unreachable_redis_fails_with_connection_error() {
        let options = ConnectOptions::new("redis://127.0.0.1:1/").unwrap();
        let mut driver: RedisStorageDriver<Data, _> =
            StorageDriver::new("unreachable", serializer(), RedisEngine::new("test", options));

        let result = driver.init().await;
        assert!(matches!(result, Err(DriverError::Connection(_))));
        assert!(!driver.is_initialized());
    }

    #[tokio::test]
    #[ignore = "requires a running Redis server (REDIS_URL)"]
    async fn test_redis_lifecycle_static_options() {
        let mut driver = redis_driver("redis-static", "test").unwrap();
        run_lifecycle(&mut driver).await;
    }

    #[tokio::test]
    #[ignore = "requires a running Redis server (REDIS_URL)"]
    async fn test_redis_lifecycle_provider_options() {
        let mut driver = redis_driver_with_provider("redis-provider", "test-provider");
        run_lifecycle(&mut driver).await;
    }

    #[tokio::test]
    #[ignore = "requires a running Redis server (REDIS_URL)"]
    async fn test_redis_static_and_provider_agree() {
        // Static and provider options must be observably identical: a value
        // stored through one is hydrated through the other.
        let key = "test-shared";
        let mut writer = redis_driver("writer", key).unwrap();
        let mut reader = redis_driver_with_provider("reader", key);

        writer.clear().await.unwrap();
        writer.store(&demo_data()).await.unwrap();

        assert_eq!(reader.hydrate().await.unwrap(), Some(demo_data()));

        writer.clear().await.unwrap();
        writer.unload().await.unwrap();
        reader.unload().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a running Redis server (REDIS_URL)"]
    async fn test_redis_clear_idempotent() {
        let mut driver = redis_driver("redis-clear", "test-clear").unwrap();

        driver.clear().await.unwrap();
        driver.clear().await.unwrap();

        driver.store(&demo_data()).await.unwrap();
        driver.clear().await.unwrap();
        driver.clear().await.unwrap();
        assert_eq!(driver.hydrate().await.unwrap(), None);

        driver.unload().await.unwrap();
    }
}
