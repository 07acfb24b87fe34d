//! Wire types for daemon control API responses.
//!
//! The daemon serializes response keys in PascalCase. Fields that vary
//! across daemon versions carry `#[serde(default)]`, and unknown fields are
//! ignored, so decoding survives daemon upgrades in either direction.

use serde::{Deserialize, Serialize};

/// Record returned by `add`: what the daemon stored and under which address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddResponse {
    /// Name of the added entry, as echoed by the daemon.
    #[serde(default)]
    pub name: String,
    /// The content address the bytes now live under.
    pub hash: String,
    /// Size of the added entry. The daemon sends this as a string; it is
    /// passed through untouched and nothing here parses it numerically.
    #[serde(default)]
    pub size: String,
}

/// Record returned by `pin/add` and `pin/rm`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PinResponse {
    /// Addresses the pin operation touched.
    #[serde(default)]
    pub pins: Vec<String>,
}

/// DAG statistics returned by `object/stat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectStat {
    /// Address the statistics describe.
    pub hash: String,
    #[serde(default)]
    pub num_links: u64,
    #[serde(default)]
    pub block_size: u64,
    #[serde(default)]
    pub links_size: u64,
    #[serde(default)]
    pub data_size: u64,
    /// Total size of the DAG rooted at this address, links included. This
    /// is the daemon's accounting and may exceed the original payload
    /// length.
    pub cumulative_size: u64,
}

/// Daemon build information returned by `version`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VersionInfo {
    pub version: String,
    #[serde(default)]
    pub commit: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub system: String,
    #[serde(default)]
    pub golang: String,
}

/// Error body the daemon attaches to non-success statuses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
    #[serde(rename = "Type", default)]
    pub kind: String,
}
