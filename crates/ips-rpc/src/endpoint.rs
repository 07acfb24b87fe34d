//! # API Endpoint
//!
//! Decomposition of a control API URL into the parts the client dials:
//! scheme, host, port, and path prefix. The daemon convention is
//! `http://localhost:5001/api/v0/`; deployments move any of the four parts.

use url::Url;

use crate::error::RpcError;

/// Port the daemon listens on when the URL does not name one.
pub const DEFAULT_API_PORT: u16 = 5001;

/// Where the daemon control API lives.
///
/// Produced by [`ApiEndpoint::parse`] from a URL string. The path prefix is
/// kept with leading and trailing slashes trimmed, so reassembly is
/// unambiguous regardless of how the configured URL was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    scheme: String,
    host: String,
    port: u16,
    path_prefix: String,
}

impl ApiEndpoint {
    /// Parse a control API URL into its dialable parts.
    ///
    /// The scheme must be `http` or `https` and the URL must name a host.
    /// A port written in the URL is always honored, the scheme defaults
    /// `:80` and `:443` included; a URL without one falls back to the
    /// daemon convention ([`DEFAULT_API_PORT`]) rather than the scheme
    /// default.
    ///
    /// # Errors
    ///
    /// [`RpcError::Config`] when the URL does not parse, uses an
    /// unsupported scheme, or has no host.
    pub fn parse(input: &str) -> Result<Self, RpcError> {
        let url = Url::parse(input).map_err(|e| RpcError::Config {
            reason: format!("invalid control API URL {input:?}: {e}"),
        })?;

        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(RpcError::Config {
                reason: format!("unsupported control API scheme {scheme:?} in {input:?}"),
            });
        }

        let host = url.host_str().ok_or_else(|| RpcError::Config {
            reason: format!("control API URL {input:?} has no host"),
        })?;

        let port = match url.port() {
            Some(port) => port,
            // The parser reports scheme-default ports as absent; an
            // explicitly written `:80`/`:443` is recovered from the
            // authority text instead of falling back.
            None if names_explicit_port(input) => {
                url.port_or_known_default().unwrap_or(DEFAULT_API_PORT)
            }
            None => DEFAULT_API_PORT,
        };

        Ok(Self {
            scheme: scheme.to_string(),
            host: host.to_string(),
            port,
            path_prefix: url.path().trim_matches('/').to_string(),
        })
    }

    /// URL scheme, `http` or `https`.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host the daemon listens on.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port the daemon listens on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// API path prefix without surrounding slashes (`api/v0` by convention;
    /// may be empty).
    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// The reassembled base URL, without a trailing slash.
    pub fn base_url(&self) -> String {
        if self.path_prefix.is_empty() {
            format!("{}://{}:{}", self.scheme, self.host, self.port)
        } else {
            format!(
                "{}://{}:{}/{}",
                self.scheme, self.host, self.port, self.path_prefix
            )
        }
    }

    /// Full URL for an operation path such as `cat` or `pin/add`.
    pub fn op_url(&self, op: &str) -> String {
        format!("{}/{}", self.base_url(), op)
    }
}

impl std::fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base_url())
    }
}

/// Whether the authority section of `input` writes a port.
fn names_explicit_port(input: &str) -> bool {
    let rest = match input.split_once("://") {
        Some((_, rest)) => rest,
        None => return false,
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, tail)| tail);
    match host_port.rsplit_once(':') {
        Some((_, port)) => !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}
