//! # Object Storage Contract
//!
//! The host-facing storage abstraction a backend conforms to. Hosts address
//! stored content by `name`; for a content-addressed backend the name is the
//! content address itself, so the backend treats every name as an opaque
//! [`ContentAddress`](crate::ContentAddress) and never rewrites one.

use async_trait::async_trait;

use crate::{ContentAddress, ContentFile, ContentSource, StorageError};

/// Object storage as seen by a host application.
///
/// All implementations must satisfy these invariants:
/// - Write-once: there is no overwrite or rename. Saving identical bytes
///   yields the same address, which is idempotent rather than a conflict.
/// - Names are opaque: backends never sanitize, uniquify, or otherwise
///   rewrite a name. `valid_name` and `available_name` are identities.
/// - No retry: a failed exchange is reported once, classified by
///   [`StorageError`]; retry policy belongs to the caller.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Retrieve the full content stored under `name`.
    ///
    /// The returned bytes are exactly what the backend holds, tagged with
    /// `name`. Nothing is interpreted or transformed.
    ///
    /// # Errors
    ///
    /// [`StorageError::NotFound`] when the backend reports the content
    /// unavailable or unresolvable; [`StorageError::Transport`] when the
    /// exchange itself fails.
    async fn open(&self, name: &str) -> Result<ContentFile, StorageError>;

    /// Store content and return the address it now lives under.
    ///
    /// The source is consumed exactly once. The address is derived from the
    /// content by the backend; no caller-chosen name participates.
    ///
    /// # Errors
    ///
    /// [`StorageError::Transport`] when the content could not be stored at
    /// all; [`StorageError::PinFailure`] when it was stored but the backend
    /// could not protect it from reclamation. In the latter case the error
    /// carries the address, so the caller can still reach the content or
    /// retry the protection step.
    async fn save(&self, content: ContentSource) -> Result<ContentAddress, StorageError>;

    /// Size in bytes the backend accounts for `name`.
    ///
    /// For content-addressed backends this is the backend's own accounting
    /// (for IPFS, the DAG's cumulative size including link overhead) and may
    /// exceed the original payload length.
    async fn size(&self, name: &str) -> Result<u64, StorageError>;

    /// Release this backend's retention of `name`.
    ///
    /// Advisory: content-addressed backends never erase shared content on
    /// demand. After a successful delete the content may remain readable
    /// until the backend reclaims it, and content retained elsewhere
    /// survives indefinitely.
    async fn delete(&self, name: &str) -> Result<(), StorageError>;

    /// Public URL under which `name` can be fetched.
    ///
    /// Pure string construction. No escaping, no reachability check, and no
    /// failure mode.
    fn url(&self, name: &str) -> String;

    /// Hook for name sanitization. Content-addressed names are never
    /// rewritten, so this returns `name` unchanged.
    fn valid_name(&self, name: &str) -> String;

    /// Hook for collision avoidance. Identical content always shares one
    /// address, so this returns `name` unchanged and ignores `max_length`.
    fn available_name(&self, name: &str, max_length: Option<usize>) -> String;
}
