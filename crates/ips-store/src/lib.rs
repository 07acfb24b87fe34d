//! # ips-store -- Content-addressed object storage over an IPFS daemon
//!
//! [`IpfsStorage`] implements the [`StorageBackend`] contract against a
//! daemon control API. The semantics follow from content addressing:
//!
//! - **Names are addresses.** `save` returns the address the daemon derived
//!   from the bytes; that address is the only name the content has. Hosts
//!   that ask for name sanitization or uniquification get their input back
//!   unchanged.
//! - **Write-once.** Saving identical bytes twice lands on the same address.
//!   There is nothing to overwrite and no conflict to resolve.
//! - **Saving pins.** A save is add-then-pin, so saved content survives the
//!   daemon's garbage collection. When the add lands but the pin fails, the
//!   caller gets the distinct [`StorageError::PinFailure`] carrying the
//!   address: the bytes are reachable but unprotected.
//! - **Delete is advisory.** Deleting releases this node's pin and nothing
//!   more. The content stays readable until the daemon collects it, and
//!   content retained elsewhere survives indefinitely.
//! - **URLs are concatenation.** `url(name)` is the configured gateway
//!   prefix glued onto the name, with no escaping and no validation.
//!
//! ## Configuration
//!
//! Both URLs resolve once, at construction: explicit argument, then
//! [`StorageSettings`] (e.g. from the environment), then the defaults of a
//! local daemon and the public `ipfs.io` gateway. See [`settings`].

pub mod backend;
pub mod settings;

pub use backend::IpfsStorage;
pub use settings::{StorageSettings, DEFAULT_API_URL, DEFAULT_GATEWAY_URL};

// The contract and its vocabulary, re-exported so embedders need only this
// crate in scope to drive a storage.
pub use ips_core::{ContentAddress, ContentFile, ContentSource, StorageBackend, StorageError};
