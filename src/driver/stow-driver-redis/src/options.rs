//! Connection options resolution.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use redis::{ConnectionInfo, IntoConnectionInfo, RedisResult};

use stow_driver::DriverError;

type ProviderFuture = Pin<Box<dyn Future<Output = RedisResult<ConnectionInfo>> + Send>>;
type ProviderFn = dyn Fn() -> ProviderFuture + Send + Sync;

/// Redis connection options: a static value or a provider invoked once per
/// connection attempt.
///
/// A provider supports credentials or endpoints that change over time; it is
/// consulted on every reconnect, and its result is never cached.
pub enum ConnectOptions {
    /// Fixed options, reused for every connection attempt.
    Static(ConnectionInfo),
    /// Provider called for fresh options on every connection attempt.
    Provider(Box<ProviderFn>),
}

impl ConnectOptions {
    /// Creates static options from anything resolvable to connection info,
    /// such as a `redis://` URL.
    pub fn new(info: impl IntoConnectionInfo) -> Result<Self, DriverError> {
        let info = info
            .into_connection_info()
            .map_err(|e| DriverError::OptionsResolution(e.to_string()))?;
        Ok(Self::Static(info))
    }

    /// Creates options backed by a synchronous provider function.
    pub fn provider<F>(provider: F) -> Self
    where
        F: Fn() -> RedisResult<ConnectionInfo> + Send + Sync + 'static,
    {
        Self::Provider(Box::new(move || {
            let result = provider();
            Box::pin(async move { result })
        }))
    }

    /// Creates options backed by an asynchronous provider function.
    pub fn async_provider<F, Fut>(provider: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RedisResult<ConnectionInfo>> + Send + 'static,
    {
        Self::Provider(Box::new(move || Box::pin(provider())))
    }

    /// Resolves concrete connection info for one connection attempt.
    pub(crate) async fn resolve(&self) -> Result<ConnectionInfo, DriverError> {
        match self {
            Self::Static(info) => Ok(info.clone()),
            Self::Provider(provider) => provider()
                .await
                .map_err(|e| DriverError::OptionsResolution(e.to_string())),
        }
    }
}

impl From<ConnectionInfo> for ConnectOptions {
    fn from(info: ConnectionInfo) -> Self {
        Self::Static(info)
    }
}

impl fmt::Debug for ConnectOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(info) => f.debug_tuple("Static").field(info).finish(),
            Self::Provider(_) => f.debug_tuple("Provider").finish(),
        }
    }
}
