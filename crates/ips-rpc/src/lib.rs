//! # ips-rpc -- Typed client for the IPFS daemon control API
//!
//! Provides typed access to the subset of the Kubo RPC API (v0) that
//! content-addressed storage needs. The daemon speaks plain HTTP: every
//! operation is a `POST` under the configured API path, arguments travel as
//! `arg` query parameters, and `add` uploads its payload as multipart form
//! data. Failures come back as non-success statuses carrying a JSON body
//! with `Message`, `Code`, and `Type` fields.
//!
//! ## Endpoints used
//!
//! | Method | Path (relative to the API prefix) | Operation |
//! |--------|-----------------------------------|-----------|
//! | POST   | `/add?pin=false`                  | Add content, unpinned |
//! | POST   | `/cat?arg={address}`              | Read content bytes |
//! | POST   | `/pin/add?arg={address}`          | Pin recursively |
//! | POST   | `/pin/rm?arg={address}`           | Remove a pin |
//! | POST   | `/object/stat?arg={address}`      | DAG statistics |
//! | POST   | `/version`                        | Daemon version info |
//!
//! ## Architecture
//!
//! [`ControlApi`] is the object-safe contract; [`HttpControlClient`] is the
//! live implementation and [`MemoryControlClient`] a deterministic in-memory
//! double for tests and offline development. Callers hold
//! `Arc<dyn ControlApi>` and never care which one is behind it.

pub mod client;
pub mod endpoint;
pub mod error;
pub mod memory;
pub mod types;

pub use client::{ControlApi, HttpControlClient, DEFAULT_TIMEOUT_SECS};
pub use endpoint::{ApiEndpoint, DEFAULT_API_PORT};
pub use error::RpcError;
pub use memory::MemoryControlClient;
pub use types::{AddResponse, ErrorBody, ObjectStat, PinResponse, VersionInfo};
