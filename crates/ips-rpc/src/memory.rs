//! # In-Memory Control API
//!
//! A deterministic [`ControlApi`] double for tests and offline development.
//! It mirrors the daemon closely enough to exercise every storage-layer
//! path: content-derived addressing, explicit pinning, refusal to unpin
//! what is not pinned, and garbage collection of unpinned content.
//!
//! Addressing convention: the address of a payload is the lowercase hex
//! SHA-256 of its bytes, so identical bytes always land on identical
//! addresses, across clients and across runs.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use bytes::Bytes;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use ips_core::{ContentAddress, ContentSource};

use crate::client::ControlApi;
use crate::error::RpcError;
use crate::types::{AddResponse, ObjectStat, PinResponse, VersionInfo};

/// In-memory [`ControlApi`] double.
#[derive(Debug, Default)]
pub struct MemoryControlClient {
    state: Mutex<State>,
    fail_pins: bool,
}

#[derive(Debug, Default)]
struct State {
    blocks: HashMap<String, Bytes>,
    pins: HashSet<String>,
}

impl MemoryControlClient {
    /// An empty store with daemon-faithful behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `pin_add` always fails, for exercising the
    /// added-but-unpinned save outcome.
    pub fn with_pin_failures() -> Self {
        Self {
            fail_pins: true,
            ..Self::default()
        }
    }

    /// Drop every unpinned block, as the daemon's garbage collector would.
    pub async fn collect_garbage(&self) {
        let mut state = self.state.lock().await;
        let State { blocks, pins } = &mut *state;
        blocks.retain(|address, _| pins.contains(address));
    }

    /// Whether `address` currently holds a pin.
    pub async fn is_pinned(&self, address: &ContentAddress) -> bool {
        self.state.lock().await.pins.contains(address.as_str())
    }

    /// Number of blocks currently stored, pinned or not.
    pub async fn block_count(&self) -> usize {
        self.state.lock().await.blocks.len()
    }

    fn address_of(bytes: &[u8]) -> String {
        hex::encode(Sha256::digest(bytes))
    }

    fn not_found(endpoint: &str, address: &ContentAddress) -> RpcError {
        RpcError::Api {
            endpoint: endpoint.to_string(),
            status: 500,
            message: format!("block {address} was not found locally"),
        }
    }
}

#[async_trait]
impl ControlApi for MemoryControlClient {
    async fn add(&self, content: ContentSource) -> Result<AddResponse, RpcError> {
        let bytes = content
            .read_to_end()
            .await
            .map_err(|e| RpcError::Read { source: e })?;
        let address = Self::address_of(&bytes);
        let size = bytes.len().to_string();

        let mut state = self.state.lock().await;
        state.blocks.insert(address.clone(), bytes);

        Ok(AddResponse {
            name: address.clone(),
            hash: address,
            size,
        })
    }

    async fn cat(&self, address: &ContentAddress) -> Result<Bytes, RpcError> {
        let state = self.state.lock().await;
        state
            .blocks
            .get(address.as_str())
            .cloned()
            .ok_or_else(|| Self::not_found("POST /cat", address))
    }

    async fn pin_add(&self, address: &ContentAddress) -> Result<PinResponse, RpcError> {
        if self.fail_pins {
            return Err(RpcError::Api {
                endpoint: "POST /pin/add".to_string(),
                status: 500,
                message: "pin queue unavailable".to_string(),
            });
        }

        let mut state = self.state.lock().await;
        if !state.blocks.contains_key(address.as_str()) {
            return Err(Self::not_found("POST /pin/add", address));
        }
        state.pins.insert(address.as_str().to_string());
        Ok(PinResponse {
            pins: vec![address.as_str().to_string()],
        })
    }

    async fn pin_rm(&self, address: &ContentAddress) -> Result<PinResponse, RpcError> {
        let mut state = self.state.lock().await;
        if !state.pins.remove(address.as_str()) {
            return Err(RpcError::Api {
                endpoint: "POST /pin/rm".to_string(),
                status: 500,
                message: format!("{address} is not pinned or pinned indirectly"),
            });
        }
        Ok(PinResponse {
            pins: vec![address.as_str().to_string()],
        })
    }

    async fn object_stat(&self, address: &ContentAddress) -> Result<ObjectStat, RpcError> {
        let state = self.state.lock().await;
        let bytes = state
            .blocks
            .get(address.as_str())
            .ok_or_else(|| Self::not_found("POST /object/stat", address))?;
        let len = bytes.len() as u64;

        Ok(ObjectStat {
            hash: address.as_str().to_string(),
            num_links: 0,
            block_size: len,
            links_size: 0,
            data_size: len,
            cumulative_size: len,
        })
    }

    async fn version(&self) -> Result<VersionInfo, RpcError> {
        Ok(VersionInfo {
            version: "0.0.0-memory".to_string(),
            commit: String::new(),
            repo: String::new(),
            system: "in-memory".to_string(),
            golang: String::new(),
        })
    }
}
