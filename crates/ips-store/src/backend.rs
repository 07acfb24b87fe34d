//! # IPFS Storage Backend
//!
//! [`IpfsStorage`] drives a daemon [`ControlApi`] to satisfy the
//! [`StorageBackend`] contract. The mapping is narrow:
//!
//! | Contract operation | Daemon operation(s) |
//! |--------------------|----------------------------------|
//! | `open(name)`       | `cat`                            |
//! | `save(content)`    | `add` (unpinned), then `pin/add` |
//! | `size(name)`       | `object/stat` (CumulativeSize)   |
//! | `delete(name)`     | `pin/rm`                         |
//! | `url(name)`        | none; gateway prefix + name      |
//!
//! Daemon failures are translated once, here: lookup failures become
//! [`StorageError::NotFound`], everything else [`StorageError::Transport`],
//! and a pin that fails after a successful add becomes the distinct
//! [`StorageError::PinFailure`] carrying the added address.

use std::sync::Arc;

use async_trait::async_trait;

use ips_core::{ContentAddress, ContentFile, ContentSource, StorageBackend, StorageError};
use ips_rpc::{ControlApi, HttpControlClient, RpcError, VersionInfo};

use crate::settings::{self, StorageSettings};

/// Content-addressed object storage over an IPFS daemon.
#[derive(Clone)]
pub struct IpfsStorage {
    client: Arc<dyn ControlApi>,
    gateway_url: String,
}

impl IpfsStorage {
    /// Storage against the default local daemon and public gateway.
    ///
    /// # Errors
    ///
    /// [`StorageError::Configuration`] when the HTTP client cannot be
    /// built. Connectivity is not probed; a dead daemon surfaces on first
    /// use, not here.
    pub fn new() -> Result<Self, StorageError> {
        Self::with_urls(None, None, &StorageSettings::default())
    }

    /// Storage configured from a settings object, defaults filling the
    /// gaps.
    pub fn with_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        Self::with_urls(None, None, settings)
    }

    /// Storage with the full precedence chain: explicit arguments override
    /// `settings`, which override the defaults.
    ///
    /// # Errors
    ///
    /// [`StorageError::Configuration`] when the resolved API URL does not
    /// parse into a dialable endpoint.
    pub fn with_urls(
        api_url: Option<&str>,
        gateway_url: Option<&str>,
        settings: &StorageSettings,
    ) -> Result<Self, StorageError> {
        let resolved = settings::resolve(api_url, gateway_url, settings)?;
        let client = HttpControlClient::new(resolved.api_endpoint).map_err(|e| {
            StorageError::Configuration {
                reason: match e {
                    RpcError::Config { reason } => reason,
                    other => other.to_string(),
                },
            }
        })?;
        Ok(Self::with_client(Arc::new(client), resolved.gateway_url))
    }

    /// Storage over any [`ControlApi`], with the gateway prefix given
    /// directly. This is how tests inject the in-memory double and how
    /// embedders bring their own transport.
    pub fn with_client(client: Arc<dyn ControlApi>, gateway_url: impl Into<String>) -> Self {
        Self {
            client,
            gateway_url: gateway_url.into(),
        }
    }

    /// The gateway prefix `url` concatenates onto.
    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    /// Ask the daemon for its version, verifying connectivity without
    /// storing anything.
    pub async fn probe(&self) -> Result<VersionInfo, StorageError> {
        self.client
            .version()
            .await
            .map_err(|e| map_rpc("probe", e, None))
    }
}

impl std::fmt::Debug for IpfsStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpfsStorage")
            .field("gateway_url", &self.gateway_url)
            .finish_non_exhaustive()
    }
}

/// Translate a daemon client error into the storage taxonomy.
fn map_rpc(operation: &str, err: RpcError, address: Option<&str>) -> StorageError {
    if err.is_not_found() {
        if let Some(address) = address {
            return StorageError::NotFound {
                address: address.to_string(),
            };
        }
    }
    StorageError::Transport {
        operation: operation.to_string(),
        reason: err.to_string(),
    }
}

#[async_trait]
impl StorageBackend for IpfsStorage {
    async fn open(&self, name: &str) -> Result<ContentFile, StorageError> {
        let address = ContentAddress::from(name);
        let bytes = self
            .client
            .cat(&address)
            .await
            .map_err(|e| map_rpc("open", e, Some(name)))?;
        Ok(ContentFile::new(address, bytes))
    }

    async fn save(&self, content: ContentSource) -> Result<ContentAddress, StorageError> {
        let added = self
            .client
            .add(content)
            .await
            .map_err(|e| map_rpc("save", e, None))?;
        let address = ContentAddress::from(added.hash);

        if let Err(e) = self.client.pin_add(&address).await {
            tracing::warn!(address = %address, error = %e, "content added but pin failed");
            return Err(StorageError::PinFailure {
                address: address.into_string(),
                reason: e.to_string(),
            });
        }

        tracing::debug!(address = %address, "content saved and pinned");
        Ok(address)
    }

    async fn size(&self, name: &str) -> Result<u64, StorageError> {
        let address = ContentAddress::from(name);
        let stat = self
            .client
            .object_stat(&address)
            .await
            .map_err(|e| map_rpc("size", e, Some(name)))?;
        Ok(stat.cumulative_size)
    }

    async fn delete(&self, name: &str) -> Result<(), StorageError> {
        let address = ContentAddress::from(name);
        self.client
            .pin_rm(&address)
            .await
            .map_err(|e| map_rpc("delete", e, Some(name)))?;
        tracing::debug!(address = %address, "pin released");
        Ok(())
    }

    fn url(&self, name: &str) -> String {
        format!("{}{}", self.gateway_url, name)
    }

    fn valid_name(&self, name: &str) -> String {
        name.to_string()
    }

    fn available_name(&self, name: &str, _max_length: Option<usize>) -> String {
        name.to_string()
    }
}
