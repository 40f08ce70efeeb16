//! Builder for [`DataClient`]

use std::sync::Arc;

use tokio::sync::Mutex;

use super::DataClient;
use crate::auth::Credentials;
use crate::cache::{Clock, LinkCache, SystemClock};
use crate::config::ClientConfig;
use crate::transport::Transport;
use crate::transports::HttpTransport;
use crate::Result;

/// Configures and creates a [`DataClient`].
///
/// ```rust
/// use pitwall_data::{ClientConfig, Credentials, DataClient};
///
/// # fn main() -> pitwall_data::Result<()> {
/// let client = DataClient::builder(Credentials::new("driver@example.com", "secret"))
///     .config(ClientConfig { timeout_secs: Some(30), ..ClientConfig::default() })
///     .build()?;
/// assert_eq!(client.config().timeout_secs, Some(30));
/// # Ok(())
/// # }
/// ```
pub struct DataClientBuilder {
    credentials: Credentials,
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    clock: Option<Arc<dyn Clock>>,
}

impl DataClientBuilder {
    pub(crate) fn new(credentials: Credentials) -> Self {
        Self { credentials, config: ClientConfig::default(), transport: None, clock: None }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Point the client at a different host.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Use a custom network layer instead of [`HttpTransport`].
    pub fn transport<T: Transport>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use a shared network layer.
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom time source for link expiry.
    pub fn clock<C: Clock>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Create the client. No network I/O happens here.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Config`](crate::ApiError::Config) if the configuration is invalid
    /// - [`ApiError::Transport`](crate::ApiError::Transport) if the default
    ///   transport cannot be initialized
    pub fn build(self) -> Result<DataClient> {
        self.config.validate()?;

        let base_url = self.config.base_url()?;
        let auth_url = self.config.auth_url()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.config)?),
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        Ok(DataClient {
            config: self.config,
            base_url,
            auth_url,
            credentials: self.credentials,
            transport,
            clock,
            session: Mutex::new(None),
            cache: Mutex::new(LinkCache::new()),
        })
    }
}

impl std::fmt::Debug for DataClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataClientBuilder")
            .field("credentials", &self.credentials)
            .field("config", &self.config)
            .field("custom_transport", &self.transport.is_some())
            .field("custom_clock", &self.clock.is_some())
            .finish()
    }
}
