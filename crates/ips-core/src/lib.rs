#![deny(missing_docs)]

//! # ips-core -- Foundational types for content-addressed object storage
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: the opaque [`ContentAddress`], the write-side [`ContentSource`]
//! and read-side [`ContentFile`] handles, the [`StorageBackend`] host
//! contract, and the [`StorageError`] taxonomy. It has no internal crate
//! dependencies.
//!
//! ## Design principles
//!
//! 1. **Addresses are opaque.** A [`ContentAddress`] wraps whatever string the
//!    storage daemon issued, verbatim. Nothing in this workspace parses,
//!    validates, or normalizes it; equality is byte equality.
//!
//! 2. **Write-once storage.** The [`StorageBackend`] contract has no
//!    overwrite or rename operations. Saving identical bytes yields the same
//!    address, which is idempotent rather than a conflict.
//!
//! 3. **Content is streamed on the way in.** [`ContentSource`] is consumed
//!    exactly once, chunk by chunk; callers never have to buffer a payload in
//!    memory to save it.
//!
//! 4. **Structured errors.** [`StorageError`] classifies every failure into
//!    four cases with `thiserror` -- no `Box<dyn Error>`, no `.unwrap()`
//!    outside tests.

pub mod address;
pub mod content;
pub mod error;
pub mod storage;

pub use address::ContentAddress;
pub use content::{ContentFile, ContentSource};
pub use error::StorageError;
pub use storage::StorageBackend;
