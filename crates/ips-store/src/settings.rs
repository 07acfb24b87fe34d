//! # Storage Settings
//!
//! Where the backend's two URLs come from. Resolution happens once, at
//! construction, with a fixed precedence:
//!
//! 1. an explicit constructor argument,
//! 2. the supplied [`StorageSettings`] object (for example
//!    [`StorageSettings::from_env`]),
//! 3. the hardcoded defaults: a daemon on the local machine and the public
//!    `ipfs.io` gateway.
//!
//! The resolved API URL must parse into a dialable endpoint or construction
//! fails. The gateway URL is never validated or normalized; it is a prefix
//! for string concatenation and nothing else.

use ips_core::StorageError;
use ips_rpc::ApiEndpoint;

/// Default control API URL: a daemon on the local machine.
pub const DEFAULT_API_URL: &str = "http://localhost:5001/api/v0/";

/// Default gateway URL prefix for public fetch URLs.
pub const DEFAULT_GATEWAY_URL: &str = "https://ipfs.io/ipfs/";

/// Environment variable naming the control API URL.
pub const API_URL_VAR: &str = "IPFS_STORAGE_API_URL";

/// Environment variable naming the gateway URL prefix.
pub const GATEWAY_URL_VAR: &str = "IPFS_STORAGE_GATEWAY_URL";

/// Externally supplied storage settings.
///
/// A `None` field falls through to the default; an explicit constructor
/// argument overrides both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageSettings {
    /// Control API URL, e.g. `http://localhost:5001/api/v0/`.
    pub api_url: Option<String>,
    /// Gateway URL prefix, e.g. `https://ipfs.io/ipfs/`. Trailing slash
    /// included: fetch URLs are built by plain concatenation.
    pub gateway_url: Option<String>,
}

impl StorageSettings {
    /// Settings that name neither URL; everything falls to the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from `IPFS_STORAGE_API_URL` and
    /// `IPFS_STORAGE_GATEWAY_URL`. Unset variables fall through.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var(API_URL_VAR).ok(),
            gateway_url: std::env::var(GATEWAY_URL_VAR).ok(),
        }
    }
}

/// The URLs a backend is built from, after precedence and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedUrls {
    pub api_endpoint: ApiEndpoint,
    pub gateway_url: String,
}

/// Apply the precedence chain and parse the API URL.
pub(crate) fn resolve(
    api_url: Option<&str>,
    gateway_url: Option<&str>,
    settings: &StorageSettings,
) -> Result<ResolvedUrls, StorageError> {
    let api_url = api_url
        .map(str::to_string)
        .or_else(|| settings.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let gateway_url = gateway_url
        .map(str::to_string)
        .or_else(|| settings.gateway_url.clone())
        .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());

    let api_endpoint = ApiEndpoint::parse(&api_url).map_err(|e| StorageError::Configuration {
        reason: match e {
            ips_rpc::RpcError::Config { reason } => reason,
            other => other.to_string(),
        },
    })?;

    Ok(ResolvedUrls {
        api_endpoint,
        gateway_url,
    })
}
