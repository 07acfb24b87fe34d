//! # Control API Client
//!
//! The [`ControlApi`] contract and its live HTTP implementation.
//!
//! The daemon's RPC surface is POST-only: verbs live in the path
//! (`/cat`, `/pin/add`), arguments in the `arg` query parameter, and `add`
//! uploads its payload as a multipart form. Responses are JSON except for
//! `cat`, which returns the raw stored bytes.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use ips_core::{ContentAddress, ContentSource};

use crate::endpoint::ApiEndpoint;
use crate::error::RpcError;
use crate::types::{AddResponse, ErrorBody, ObjectStat, PinResponse, VersionInfo};

/// Request timeout applied when the caller does not choose one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Daemon control API operations the storage layer relies on.
///
/// Object-safe so callers can hold `Arc<dyn ControlApi>` and swap the live
/// client for the in-memory double in tests.
#[async_trait]
pub trait ControlApi: Send + Sync {
    /// Add content, returning the daemon's add record. Pinning is a
    /// separate, explicit step; `add` leaves the content unpinned.
    async fn add(&self, content: ContentSource) -> Result<AddResponse, RpcError>;

    /// Retrieve the raw bytes stored under `address`.
    async fn cat(&self, address: &ContentAddress) -> Result<Bytes, RpcError>;

    /// Pin `address`, protecting it from garbage collection.
    async fn pin_add(&self, address: &ContentAddress) -> Result<PinResponse, RpcError>;

    /// Remove the pin on `address`. The daemon refuses when no such pin
    /// exists.
    async fn pin_rm(&self, address: &ContentAddress) -> Result<PinResponse, RpcError>;

    /// DAG statistics for `address`.
    async fn object_stat(&self, address: &ContentAddress) -> Result<ObjectStat, RpcError>;

    /// Daemon build and version information. Cheap connectivity probe.
    async fn version(&self) -> Result<VersionInfo, RpcError>;
}

/// Live [`ControlApi`] implementation over HTTP.
#[derive(Debug, Clone)]
pub struct HttpControlClient {
    http: reqwest::Client,
    endpoint: ApiEndpoint,
}

impl HttpControlClient {
    /// Build a client for `endpoint` with the default request timeout.
    pub fn new(endpoint: ApiEndpoint) -> Result<Self, RpcError> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Build a client for `endpoint` with an explicit request timeout.
    pub fn with_timeout(endpoint: ApiEndpoint, timeout: Duration) -> Result<Self, RpcError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RpcError::Config {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { http, endpoint })
    }

    /// The endpoint this client dials.
    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    /// Dispatch a prepared request and normalize failures.
    ///
    /// Non-success statuses become [`RpcError::Api`] carrying the daemon's
    /// `Message` when the body parses as its error shape, or the raw body
    /// text when it does not.
    async fn execute(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, RpcError> {
        tracing::debug!(endpoint, "dispatching control API request");
        let resp = request.send().await.map_err(|e| RpcError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) if !parsed.message.is_empty() => parsed.message,
                _ => body,
            };
            tracing::warn!(endpoint, status, %message, "daemon returned an error");
            return Err(RpcError::Api {
                endpoint: endpoint.to_string(),
                status,
                message,
            });
        }

        Ok(resp)
    }
}

#[async_trait]
impl ControlApi for HttpControlClient {
    async fn add(&self, content: ContentSource) -> Result<AddResponse, RpcError> {
        let endpoint = "POST /add";
        let url = self.endpoint.op_url("add");

        let len_hint = content.len_hint();
        let body = reqwest::Body::wrap_stream(content.into_stream());
        let part = match len_hint {
            Some(len) => reqwest::multipart::Part::stream_with_length(body, len),
            None => reqwest::multipart::Part::stream(body),
        }
        .file_name("file");
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .execute(
                endpoint,
                self.http
                    .post(&url)
                    .query(&[("pin", "false")])
                    .multipart(form),
            )
            .await?;

        let added: AddResponse = resp.json().await.map_err(|e| RpcError::Decode {
            endpoint: endpoint.to_string(),
            source: e,
        })?;
        tracing::debug!(address = %added.hash, "content added");
        Ok(added)
    }

    async fn cat(&self, address: &ContentAddress) -> Result<Bytes, RpcError> {
        let endpoint = "POST /cat";
        let url = self.endpoint.op_url("cat");

        let resp = self
            .execute(
                endpoint,
                self.http.post(&url).query(&[("arg", address.as_str())]),
            )
            .await?;

        resp.bytes().await.map_err(|e| RpcError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }

    async fn pin_add(&self, address: &ContentAddress) -> Result<PinResponse, RpcError> {
        let endpoint = "POST /pin/add";
        let url = self.endpoint.op_url("pin/add");

        let resp = self
            .execute(
                endpoint,
                self.http.post(&url).query(&[("arg", address.as_str())]),
            )
            .await?;

        resp.json().await.map_err(|e| RpcError::Decode {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }

    async fn pin_rm(&self, address: &ContentAddress) -> Result<PinResponse, RpcError> {
        let endpoint = "POST /pin/rm";
        let url = self.endpoint.op_url("pin/rm");

        let resp = self
            .execute(
                endpoint,
                self.http.post(&url).query(&[("arg", address.as_str())]),
            )
            .await?;

        resp.json().await.map_err(|e| RpcError::Decode {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }

    async fn object_stat(&self, address: &ContentAddress) -> Result<ObjectStat, RpcError> {
        let endpoint = "POST /object/stat";
        let url = self.endpoint.op_url("object/stat");

        let resp = self
            .execute(
                endpoint,
                self.http.post(&url).query(&[("arg", address.as_str())]),
            )
            .await?;

        resp.json().await.map_err(|e| RpcError::Decode {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }

    async fn version(&self) -> Result<VersionInfo, RpcError> {
        let endpoint = "POST /version";
        let url = self.endpoint.op_url("version");

        let resp = self.execute(endpoint, self.http.post(&url)).await?;

        resp.json().await.map_err(|e| RpcError::Decode {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The contract must stay object-safe: the storage layer holds clients
    // as trait objects.
    #[test]
    fn control_api_is_object_safe() {
        fn assert_dyn(_: &dyn ControlApi) {}
        let client =
            HttpControlClient::new(ApiEndpoint::parse("http://localhost:5001/api/v0/").unwrap())
                .unwrap();
        assert_dyn(&client);
    }

    #[test]
    fn client_reports_its_endpoint() {
        let endpoint = ApiEndpoint::parse("https://node.internal:9095/api/v0/").unwrap();
        let client = HttpControlClient::new(endpoint.clone()).unwrap();
        assert_eq!(client.endpoint(), &endpoint);
    }
}
