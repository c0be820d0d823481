//! # Stow Driver - Redis Engine
//!
//! Redis implementation of the stow storage engine.
//!
//! The engine persists one binary value in a single field (`value`) of a hash
//! at a fixed key. The connection is established lazily: nothing talks to
//! Redis until the first operation, and [`StorageEngine::handle_unload`]
//! releases the connection so the next operation reconnects from scratch.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use tracing::debug;

use stow_driver::{DriverError, StorageDriver, StorageEngine};

pub mod options;

pub use options::ConnectOptions;

/// Hash field holding the stored bytes.
const VALUE_FIELD: &str = "value";

/// Storage driver backed by a [`RedisEngine`].
pub type RedisStorageDriver<T, S> = StorageDriver<T, S, RedisEngine>;

/// Redis storage engine with a lazily established connection.
///
/// Holds at most one connection handle. The handle is created on first use,
/// reused by later operations, and released by `handle_unload`. A failed
/// connect leaves the handle absent, so the next operation retries from
/// scratch with freshly resolved options.
pub struct RedisEngine {
    key: String,
    options: ConnectOptions,
    conn: Option<MultiplexedConnection>,
}

impl RedisEngine {
    /// Creates an engine for the given storage key.
    ///
    /// No connection is made here; the engine connects on first use.
    pub fn new(key: impl Into<String>, options: impl Into<ConnectOptions>) -> Self {
        Self {
            key: key.into(),
            options: options.into(),
            conn: None,
        }
    }

    /// Returns the storage key this engine manages.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the held connection, connecting first if none exists.
    ///
    /// Options are resolved anew for every connection attempt, so a provider
    /// can rotate credentials or endpoints between reconnects.
    async fn connection(&mut self) -> Result<MultiplexedConnection, DriverError> {
        if let Some(conn) = &self.conn {
            return Ok(conn.clone());
        }

        let info = self.options.resolve().await?;
        debug!(key = %self.key, addr = %info.addr, "Connecting to Redis");

        let client =
            Client::open(info).map_err(|e| DriverError::Connection(e.to_string()))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| DriverError::Connection(e.to_string()))?;

        debug!(key = %self.key, "Redis connection established");
        Ok(self.conn.insert(conn).clone())
    }
}

#[async_trait]
impl StorageEngine for RedisEngine {
    async fn handle_init(&mut self) -> Result<bool, DriverError> {
        self.connection().await?;
        Ok(true)
    }

    async fn handle_store(&mut self, data: &[u8]) -> Result<(), DriverError> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .hset(&self.key, VALUE_FIELD, data)
            .await
            .map_err(|e| DriverError::RemoteOperation(e.to_string()))?;
        Ok(())
    }

    async fn handle_hydrate(&mut self) -> Result<Option<Vec<u8>>, DriverError> {
        let mut conn = self.connection().await?;
        // HGETALL with byte values keeps the read binary-safe; a missing key
        // comes back as an empty hash.
        let mut fields: HashMap<String, Vec<u8>> = conn
            .hgetall(&self.key)
            .await
            .map_err(|e| DriverError::RemoteOperation(e.to_string()))?;
        Ok(fields.remove(VALUE_FIELD))
    }

    async fn handle_clear(&mut self) -> Result<(), DriverError> {
        let mut conn = self.connection().await?;
        // DEL of a missing key is a no-op, keeping clear idempotent.
        let _: () = conn
            .del(&self.key)
            .await
            .map_err(|e| DriverError::RemoteOperation(e.to_string()))?;
        Ok(())
    }

    async fn handle_unload(&mut self) -> Result<bool, DriverError> {
        if let Some(mut conn) = self.conn.take() {
            // Flush-and-close: QUIT waits for the server's reply before the
            // handle is dropped.
            let _: () = redis::cmd("QUIT")
                .query_async(&mut conn)
                .await
                .map_err(|e| DriverError::Teardown(e.to_string()))?;
            debug!(key = %self.key, "Redis connection released");
        }
        Ok(true)
    }
}
